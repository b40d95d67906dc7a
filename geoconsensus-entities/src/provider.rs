use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A supported geocoding backend.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumCount, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ProviderName {
    /// ArcGIS World Geocoding Service (free)
    Arcgis,
    /// Google Geocoding API (API key)
    Google,
    /// Bing Maps Locations API (API key)
    Bing,
    /// OpenCage Geocoding API (API key)
    Opencage,
    /// Nominatim / OpenStreetMap (free)
    Osm,
}

impl ProviderName {
    pub const fn requires_api_key(self) -> bool {
        match self {
            Self::Google | Self::Bing | Self::Opencage => true,
            Self::Arcgis | Self::Osm => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// All supported providers.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}
