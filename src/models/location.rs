use serde::{Deserialize, Serialize};

/// A geocoded place. Created once per distinct search query and never expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: i32,
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// First comma-separated segment of the formatted address, used as the
    /// search term for providers that want a city name rather than coordinates.
    #[must_use]
    pub fn city_name(&self) -> &str {
        self.formatted_query
            .split(',')
            .next()
            .unwrap_or(&self.formatted_query)
            .trim()
    }
}
