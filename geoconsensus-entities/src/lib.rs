#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # geoconsensus-entities
//!
//! Reusable, agnostic domain entities for geoconsensus.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod address;
pub mod coordinate;
pub mod geo;
pub mod provider;
pub mod result;
