use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use countryguide_core::{CriteriaScore, PayloadResult, criterion_label};

/// One labeled row for a linear progress indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRow {
    pub key: String,
    pub label: String,
    /// `score * 100` with exactly one decimal digit, no unit.
    pub percent_text: String,
    /// Raw score, unclamped.
    pub fraction: f64,
}

impl ProgressRow {
    /// Bar width in `[0, 1]` for renderers.
    pub fn clamped_fraction(&self) -> f64 {
        self.fraction.clamp(0.0, 1.0)
    }
}

/// Rows for every criterion, population included, in input order.
pub fn progress_rows(criteria: &CriteriaScore) -> Vec<ProgressRow> {
    criteria
        .iter()
        .map(|(key, score)| ProgressRow {
            key: key.to_string(),
            label: criterion_label(key).to_string(),
            percent_text: percent_text(score * 100.0),
            fraction: score,
        })
        .collect()
}

/// One decimal digit, ties rounded away from zero (`0.25` → `"0.3"`).
///
/// `{:.1}` alone rounds exact ties to even.
fn percent_text(percent: f64) -> String {
    format!("{:.1}", (percent * 10.0).round() / 10.0)
}

/// [`progress_rows`] over an untyped `criteria` value.
pub fn try_progress_rows(criteria: Option<&JsonValue>) -> PayloadResult<Vec<ProgressRow>> {
    let criteria = CriteriaScore::from_value(criteria)?;
    Ok(progress_rows(&criteria))
}
