//! Everything the presentation layer needs from one successful response.

use serde::Serialize;

use countryguide_core::{PayloadResult, RecommendationResponse};

use crate::listing::{BestMatchBanner, RecommendationCard, best_match_banner, recommendation_cards};
use crate::progress::{ProgressRow, progress_rows};
use crate::radar::{RadarPoint, radar_series};

/// Original response plus its derived chart and list shapes.
///
/// Built once per successful call; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    pub response: RecommendationResponse,
    pub radar: Vec<RadarPoint>,
    pub progress: Vec<ProgressRow>,
    pub cards: Vec<RecommendationCard>,
    pub best_match: Option<BestMatchBanner>,
}

impl RecommendationView {
    pub fn build(response: RecommendationResponse) -> Self {
        let radar = radar_series(&response.criteria);
        let progress = progress_rows(&response.criteria);
        let cards = recommendation_cards(&response.recommendations);
        let best_match = best_match_banner(response.best_match.as_ref());

        tracing::debug!(
            criteria = response.criteria.len(),
            radar_axes = radar.len(),
            recommendations = cards.len(),
            has_best_match = best_match.is_some(),
            "built recommendation view"
        );

        Self {
            response,
            radar,
            progress,
            cards,
            best_match,
        }
    }

    /// Decode, validate and build in one step.
    pub fn from_json(body: &str) -> PayloadResult<Self> {
        RecommendationResponse::from_json(body).map(Self::build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use countryguide_core::PayloadError;
    use serde_json::json;

    #[test]
    fn builds_every_shape_from_one_response() {
        let body = json!({
            "criteria": {
                "education_index": 0.9,
                "political_stability_index": 0.8,
                "population": 50000000
            },
            "recommendations": [{
                "name": "Finland",
                "score": 92,
                "region": "Europe",
                "cluster": 1,
                "description": "..."
            }]
        })
        .to_string();

        let view = RecommendationView::from_json(&body).unwrap();

        let labels: Vec<_> = view.radar.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Education", "Political Stability"]);
        assert_eq!(view.progress.len(), 3);
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].location, "Europe");
        assert!(view.best_match.is_none());
        assert_eq!(view.response.recommendations[0].name, "Finland");
    }

    #[test]
    fn build_is_deterministic() {
        let body = r#"{"criteria": {"foo_index": 0.42}, "best_match": {"name": "Chile", "cluster": 3}}"#;
        let a = RecommendationView::from_json(body).unwrap();
        let b = RecommendationView::from_json(body).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.radar[0].label, "foo_index");
        assert_eq!(a.progress[0].label, "foo_index");
        assert_eq!(a.best_match.unwrap().cluster_label, "Cluster #3");
    }

    #[test]
    fn decode_failures_surface_as_invalid_payload() {
        assert!(matches!(
            RecommendationView::from_json(r#"{"criteria": "high"}"#),
            Err(PayloadError::InvalidPayload(_))
        ));
    }
}
