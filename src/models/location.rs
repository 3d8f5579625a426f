use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    pub zip_code: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub county: String,
}

impl Location {
    /// "City, ST" as shown on cards and in the location chip.
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}
