//! Chart point and connector layout
//!
//! Produces percentage positions for a client to draw as absolutely
//! positioned markers, plus the length and rotation of the line segment
//! joining each consecutive pair.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Historical,
    Current,
    Projected,
}

/// One value to plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub rent: f64,
    pub kind: PointKind,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, rent: f64, kind: PointKind) -> Self {
        Self {
            label: label.into(),
            rent,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub rent: f64,
    pub kind: PointKind,
    /// Horizontal position, 0 at the left edge
    pub x_pct: f64,
    /// Height above the bottom edge
    pub y_pct: f64,
}

/// Segment from point `from` to point `from + 1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub from: usize,
    pub length_px: f64,
    /// Rotation in degrees in screen space (negative rises to the right)
    pub angle_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width_px: f64,
    pub height_px: f64,
    pub min_rent: f64,
    pub max_rent: f64,
    pub points: Vec<ChartPoint>,
    pub connectors: Vec<Connector>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width_px: f64,
    #[serde(default = "default_height")]
    pub height_px: f64,
}

fn default_width() -> f64 {
    600.0
}

fn default_height() -> f64 {
    300.0
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_px: default_width(),
            height_px: default_height(),
        }
    }
}

/// Lay out `series` inside a `width_px` x `height_px` box.
///
/// Points are spread evenly along x. Heights scale between the series min
/// and max; a flat series sits at mid-height.
pub fn layout(series: &[SeriesPoint], config: &ChartConfig) -> ChartLayout {
    let finite = || series.iter().map(|p| p.rent).filter(|r| r.is_finite());
    let min_rent = finite().fold(f64::INFINITY, f64::min);
    let max_rent = finite().fold(f64::NEG_INFINITY, f64::max);
    let range = max_rent - min_rent;

    let last = series.len().saturating_sub(1);
    let points: Vec<ChartPoint> = series
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let x_pct = if last == 0 {
                0.0
            } else {
                i as f64 / last as f64 * 100.0
            };
            let y_pct = if !p.rent.is_finite() {
                0.0
            } else if range > 0.0 {
                (p.rent - min_rent) / range * 100.0
            } else {
                50.0
            };
            ChartPoint {
                label: p.label.clone(),
                rent: p.rent,
                kind: p.kind,
                x_pct,
                y_pct,
            }
        })
        .collect();

    let connectors = points
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let dx = (pair[1].x_pct - pair[0].x_pct) / 100.0 * config.width_px;
            let dy = (pair[1].y_pct - pair[0].y_pct) / 100.0 * config.height_px;
            Connector {
                from: i,
                length_px: dx.hypot(dy),
                angle_deg: (-dy).atan2(dx).to_degrees(),
            }
        })
        .collect();

    ChartLayout {
        width_px: config.width_px,
        height_px: config.height_px,
        min_rent: if min_rent.is_finite() { min_rent } else { 0.0 },
        max_rent: if max_rent.is_finite() { max_rent } else { 0.0 },
        points,
        connectors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(rents: &[f64]) -> Vec<SeriesPoint> {
        rents
            .iter()
            .enumerate()
            .map(|(i, r)| SeriesPoint::new(format!("p{}", i), *r, PointKind::Projected))
            .collect()
    }

    #[test]
    fn test_min_and_max_span_full_height() {
        let chart = layout(&series(&[1500.0, 1560.0, 1622.0]), &ChartConfig::default());
        assert_eq!(chart.points[0].y_pct, 0.0);
        assert_eq!(chart.points[2].y_pct, 100.0);
        assert_eq!(chart.points[0].x_pct, 0.0);
        assert_eq!(chart.points[1].x_pct, 50.0);
        assert_eq!(chart.points[2].x_pct, 100.0);
        assert_eq!(chart.min_rent, 1500.0);
        assert_eq!(chart.max_rent, 1622.0);
    }

    #[test]
    fn test_flat_series_sits_mid_height() {
        let chart = layout(&series(&[1200.0, 1200.0, 1200.0]), &ChartConfig::default());
        assert!(chart.points.iter().all(|p| p.y_pct == 50.0));
        assert!(chart.connectors.iter().all(|c| c.angle_deg == 0.0));
        assert_eq!(chart.connectors[0].length_px, 300.0);
    }

    #[test]
    fn test_connectors() {
        let config = ChartConfig {
            width_px: 100.0,
            height_px: 100.0,
        };
        let chart = layout(&series(&[1000.0, 2000.0]), &config);
        assert_eq!(chart.connectors.len(), 1);
        let c = chart.connectors[0];
        assert_eq!(c.from, 0);
        assert!((c.length_px - 100.0 * 2f64.sqrt()).abs() < 1e-9);
        assert!((c.angle_deg + 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_series() {
        let empty = layout(&[], &ChartConfig::default());
        assert!(empty.points.is_empty());
        assert!(empty.connectors.is_empty());
        assert_eq!(empty.min_rent, 0.0);

        let single = layout(&series(&[900.0]), &ChartConfig::default());
        assert_eq!(single.points[0].x_pct, 0.0);
        assert_eq!(single.points[0].y_pct, 50.0);
        assert!(single.connectors.is_empty());
    }
}
