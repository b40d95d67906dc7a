use itertools::Itertools;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street  : Option<String>,
    pub city    : Option<String>,
    pub country : Option<String>,
}

impl Address {
    /// Free-text query string that is sent to the geocoding providers,
    /// e.g. `CLL 131A 9,Bogota,Colombia`.
    pub fn to_forward_query_string(&self) -> String {
        self.parts().join(",")
    }

    fn parts(&self) -> impl Iterator<Item = &str> {
        [&self.street, &self.city, &self.country]
            .into_iter()
            .filter_map(|x| x.as_deref())
            .map(str::trim)
            .filter(|x| !x.is_empty())
    }
}
