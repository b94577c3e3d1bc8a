use crate::error::AppError;

/// ACS variable for median gross rent
pub const MEDIAN_GROSS_RENT: &str = "B25064_001E";

/// Median gross rent for one state, read from a Census API table
#[derive(Debug, Clone, PartialEq)]
pub struct MedianRentRow {
    pub name: String,
    pub median_gross_rent: f64,
    pub fips: String,
}

/// Parse the Census table format: a header row followed by data rows of
/// `[NAME, B25064_001E, state]`. Only the first data row is read.
pub fn parse_median_rent(table: &[Vec<String>]) -> Result<MedianRentRow, AppError> {
    let header = table
        .first()
        .ok_or_else(|| AppError::Decode("Census response is empty".to_string()))?;
    let row = table
        .get(1)
        .ok_or_else(|| AppError::Decode("Census response has no data rows".to_string()))?;

    let column = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .and_then(|i| row.get(i))
            .ok_or_else(|| AppError::Decode(format!("Census response is missing column {}", name)))
    };

    let raw = column(MEDIAN_GROSS_RENT)?;
    let median: f64 = raw
        .parse()
        .map_err(|_| AppError::Decode(format!("Median rent is not a number: {}", raw)))?;

    // The ACS encodes missing estimates as large negative sentinels
    if !median.is_finite() || median <= 0.0 {
        return Err(AppError::Decode(format!("Median rent unavailable ({})", raw)));
    }

    Ok(MedianRentRow {
        name: column("NAME")?.clone(),
        median_gross_rent: median,
        fips: column("state")?.clone(),
    })
}
