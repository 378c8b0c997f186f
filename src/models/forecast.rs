use serde::{Deserialize, Serialize};

/// One daily weather summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecast: String,
    /// Human-readable date string, e.g. "Mon Aug 24 2026".
    pub time: String,
}
