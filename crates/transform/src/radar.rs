use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use countryguide_core::{CriteriaScore, Criterion, PayloadResult, criterion_label};

/// Outer ring of every radar axis.
pub const FULL_SCALE: u32 = 100;

/// One axis of the radar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarPoint {
    pub label: String,
    /// `round(score * 100)`, half away from zero.
    pub value: i64,
    pub full_scale: u32,
}

/// Chart-ready series for the normalized criteria.
///
/// Population is dropped (raw magnitude, not a score). Everything else keeps
/// input order, including unknown keys, which are labeled with the raw key.
pub fn radar_series(criteria: &CriteriaScore) -> Vec<RadarPoint> {
    criteria
        .iter()
        .filter(|(key, _)| *key != Criterion::Population.key())
        .map(|(key, score)| RadarPoint {
            label: criterion_label(key).to_string(),
            value: to_percent_points(score),
            full_scale: FULL_SCALE,
        })
        .collect()
}

/// [`radar_series`] over an untyped `criteria` value.
pub fn try_radar_series(criteria: Option<&JsonValue>) -> PayloadResult<Vec<RadarPoint>> {
    let criteria = CriteriaScore::from_value(criteria)?;
    Ok(radar_series(&criteria))
}

fn to_percent_points(score: f64) -> i64 {
    // f64::round rounds half away from zero.
    (score * 100.0).round() as i64
}
