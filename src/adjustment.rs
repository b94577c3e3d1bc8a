use crate::models::query::BedroomType;

/// Multiplier applied to an all-unit median rent for a given unit type
pub fn multiplier(bedrooms: BedroomType) -> f64 {
    match bedrooms {
        BedroomType::Studio => 0.85,
        BedroomType::One => 1.0,
        BedroomType::Two => 1.25,
        BedroomType::Three => 1.5,
        BedroomType::House => 1.8,
    }
}

/// Scale a base median rent by a raw form key. Unknown keys leave the rent unchanged.
pub fn adjust_for_bedrooms(rent: f64, key: &str) -> f64 {
    let factor = BedroomType::from_key(key).map(multiplier).unwrap_or(1.0);
    rent * factor
}

/// Typed variant of [`adjust_for_bedrooms`]
pub fn adjust(rent: f64, bedrooms: BedroomType) -> f64 {
    rent * multiplier(bedrooms)
}
