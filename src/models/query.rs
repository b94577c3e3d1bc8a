use crate::{error::AppError, fips};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest location string accepted from a client
pub const MAX_LOCATION_LEN: usize = 128;

/// Unit type requested by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BedroomType {
    Studio,
    #[default]
    One,
    Two,
    Three,
    House,
}

impl BedroomType {
    pub const ALL: [BedroomType; 5] = [
        BedroomType::Studio,
        BedroomType::One,
        BedroomType::Two,
        BedroomType::Three,
        BedroomType::House,
    ];

    /// Canonical key, as sent by the form select
    pub fn as_str(&self) -> &'static str {
        match self {
            BedroomType::Studio => "studio",
            BedroomType::One => "1",
            BedroomType::Two => "2",
            BedroomType::Three => "3",
            BedroomType::House => "house",
        }
    }

    /// Bedroom count for upstream lookups. Houses are queried as 4 bedrooms.
    pub fn bedroom_count(&self) -> u8 {
        match self {
            BedroomType::Studio => 0,
            BedroomType::One => 1,
            BedroomType::Two => 2,
            BedroomType::Three => 3,
            BedroomType::House => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BedroomType::Studio => "Studio",
            BedroomType::One => "1 Bedroom",
            BedroomType::Two => "2 Bedrooms",
            BedroomType::Three => "3 Bedrooms",
            BedroomType::House => "House",
        }
    }

    /// Parse a form key. Returns `None` for keys outside the table.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "studio" | "0" => Some(BedroomType::Studio),
            "1" | "1br" | "one" => Some(BedroomType::One),
            "2" | "2br" | "two" => Some(BedroomType::Two),
            "3" | "3br" | "three" => Some(BedroomType::Three),
            "house" | "4" => Some(BedroomType::House),
            _ => None,
        }
    }
}

impl FromStr for BedroomType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
            .ok_or_else(|| AppError::Validation(format!("Unknown bedroom type: {}", s)))
    }
}

impl TryFrom<String> for BedroomType {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BedroomType> for String {
    fn from(value: BedroomType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for BedroomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the location string should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    City,
    State,
    Zip,
}

impl LocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationKind::City => "city",
            LocationKind::State => "state",
            LocationKind::Zip => "zip",
        }
    }

    /// Guess the kind from the raw input: five digits is a zip code, a
    /// known state name or abbreviation is a state, anything else a city.
    pub fn infer(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.len() == 5 && trimmed.chars().all(|c| c.is_ascii_digit()) {
            LocationKind::Zip
        } else if fips::lookup(trimmed).is_some() {
            LocationKind::State
        } else {
            LocationKind::City
        }
    }
}

impl FromStr for LocationKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "city" => Ok(LocationKind::City),
            "state" => Ok(LocationKind::State),
            "zip" | "zipcode" => Ok(LocationKind::Zip),
            _ => Err(AppError::Validation(format!("Unknown location kind: {}", s))),
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_horizon() -> u32 {
    3
}

/// A single user request for a rent estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentQuery {
    pub location: String,
    #[serde(default)]
    pub bedrooms: BedroomType,
    #[serde(default = "default_horizon")]
    pub horizon_years: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_kind: Option<LocationKind>,
}

impl RentQuery {
    pub fn new(location: impl Into<String>, bedrooms: BedroomType, horizon_years: u32) -> Self {
        Self {
            location: location.into(),
            bedrooms,
            horizon_years,
            location_kind: None,
        }
    }

    pub fn with_kind(mut self, kind: LocationKind) -> Self {
        self.location_kind = Some(kind);
        self
    }

    /// Check the query before any source is consulted
    pub fn validate(&self, max_horizon_years: u32) -> Result<(), AppError> {
        let location = self.location.trim();
        if location.is_empty() {
            return Err(AppError::Validation("Please enter a location".to_string()));
        }
        if location.len() > MAX_LOCATION_LEN {
            return Err(AppError::Validation(format!(
                "Location must be at most {} characters",
                MAX_LOCATION_LEN
            )));
        }
        if self.horizon_years == 0 || self.horizon_years > max_horizon_years {
            return Err(AppError::Validation(format!(
                "Projection horizon must be between 1 and {} years",
                max_horizon_years
            )));
        }
        if self.kind() == LocationKind::Zip
            && !(location.len() == 5 && location.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(AppError::Validation(format!("Invalid zip code: {}", location)));
        }
        Ok(())
    }

    /// The explicit kind, or the inferred one
    pub fn kind(&self) -> LocationKind {
        self.location_kind
            .unwrap_or_else(|| LocationKind::infer(&self.location))
    }

    /// Split "City, ST" into its parts. The state part is `None` when absent.
    pub fn city_and_state(&self) -> (String, Option<String>) {
        match self.location.split_once(',') {
            Some((city, state)) => {
                let state = state.trim();
                (
                    city.trim().to_string(),
                    (!state.is_empty()).then(|| state.to_string()),
                )
            }
            None => (self.location.trim().to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bedroom_keys() {
        assert_eq!(BedroomType::from_key("studio"), Some(BedroomType::Studio));
        assert_eq!(BedroomType::from_key("0"), Some(BedroomType::Studio));
        assert_eq!(BedroomType::from_key("2BR"), Some(BedroomType::Two));
        assert_eq!(BedroomType::from_key(" House "), Some(BedroomType::House));
        assert_eq!(BedroomType::from_key("penthouse"), None);

        for bedrooms in BedroomType::ALL {
            assert_eq!(BedroomType::from_key(bedrooms.as_str()), Some(bedrooms));
        }
    }

    #[test]
    fn test_bedroom_serde() {
        let parsed: BedroomType = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(parsed, BedroomType::Three);
        assert_eq!(serde_json::to_string(&BedroomType::Studio).unwrap(), "\"studio\"");
        assert!(serde_json::from_str::<BedroomType>("\"loft\"").is_err());
    }

    #[test]
    fn test_infer_location_kind() {
        assert_eq!(LocationKind::infer("78701"), LocationKind::Zip);
        assert_eq!(LocationKind::infer("TX"), LocationKind::State);
        assert_eq!(LocationKind::infer("new york"), LocationKind::State);
        assert_eq!(LocationKind::infer("Austin, TX"), LocationKind::City);
    }

    #[test]
    fn test_query_defaults() {
        let query: RentQuery = serde_json::from_str(r#"{"location": "Denver, CO"}"#).unwrap();
        assert_eq!(query.bedrooms, BedroomType::One);
        assert_eq!(query.horizon_years, 3);
        assert_eq!(query.kind(), LocationKind::City);
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let query = RentQuery::new("   ", BedroomType::One, 3);
        assert!(matches!(query.validate(5), Err(AppError::Validation(_))));

        let query = RentQuery::new("Austin, TX", BedroomType::One, 0);
        assert!(query.validate(5).is_err());

        let query = RentQuery::new("Austin, TX", BedroomType::One, 6);
        assert!(query.validate(5).is_err());

        let query = RentQuery::new("7870", BedroomType::One, 1).with_kind(LocationKind::Zip);
        assert!(query.validate(5).is_err());

        let query = RentQuery::new("Austin, TX", BedroomType::Two, 5);
        assert!(query.validate(5).is_ok());
    }

    #[test]
    fn test_city_and_state() {
        let query = RentQuery::new("Austin, TX", BedroomType::One, 1);
        assert_eq!(query.city_and_state(), ("Austin".to_string(), Some("TX".to_string())));

        let query = RentQuery::new("Boise", BedroomType::One, 1);
        assert_eq!(query.city_and_state(), ("Boise".to_string(), None));

        let query = RentQuery::new("Boise, ", BedroomType::One, 1);
        assert_eq!(query.city_and_state(), ("Boise".to_string(), None));
    }
}
