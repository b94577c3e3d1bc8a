use serde::{Deserialize, Serialize};

/// One row of a RentCast rental-data lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalData {
    #[serde(alias = "averageRent")]
    pub rent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, rename = "zipCode", skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl RentalData {
    /// "City, ST" when a city is present, else the state, else the zip code
    pub fn display_name(&self) -> Option<String> {
        match (&self.city, &self.state, &self.zip_code) {
            (Some(city), Some(state), _) => Some(format!("{}, {}", city, state)),
            (Some(city), None, _) => Some(city.clone()),
            (None, Some(state), _) => Some(state.clone()),
            (None, None, zip) => zip.clone(),
        }
    }
}

/// One point of a RentCast history series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: String,
    #[serde(alias = "averageRent")]
    pub rent: f64,
}
