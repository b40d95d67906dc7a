pub mod geocode;
pub mod sink;
