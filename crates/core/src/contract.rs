//! Request/response contract of `POST /api/v1/recommend`.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::criteria::CriteriaScore;
use crate::error::{PayloadError, PayloadResult};
use crate::query::Query;

/// Outbound payload: `{ "text": "<query>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    text: String,
}

impl RecommendationRequest {
    pub fn new(query: &Query) -> Self {
        Self {
            text: query.as_str().to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The single top-ranked country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestMatch {
    pub name: String,
    pub cluster: i64,
}

/// Capital(s) of a country; the service sends either a string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Capital {
    One(String),
    Many(Vec<String>),
}

impl Capital {
    /// The capital to display: the single value, or the first of the list.
    pub fn primary(&self) -> Option<&str> {
        match self {
            Capital::One(name) => Some(name.as_str()),
            Capital::Many(names) => names.first().map(String::as_str),
        }
    }
}

/// One ranked country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationEntry {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    /// 0–100 similarity score.
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub cluster: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<Capital>,
}

impl RecommendationEntry {
    /// Subregion when present and non-empty, otherwise region.
    pub fn location(&self) -> &str {
        match self.subregion.as_deref() {
            Some(sub) if !sub.is_empty() => sub,
            _ => &self.region,
        }
    }
}

/// Full response body of the recommendation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub criteria: CriteriaScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_match: Option<BestMatch>,
    /// Ranked best first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<RecommendationEntry>,
}

impl RecommendationResponse {
    /// Decode a response body and apply the basic shape checks.
    pub fn from_json(body: &str) -> PayloadResult<Self> {
        let response: Self = serde_json::from_str(body)?;
        response.validate()?;
        Ok(response)
    }

    /// Structural checks that serde cannot express.
    ///
    /// Recommendation names must be unique within one response.
    pub fn validate(&self) -> PayloadResult<()> {
        let mut seen = HashSet::with_capacity(self.recommendations.len());
        for entry in &self.recommendations {
            if !seen.insert(entry.name.as_str()) {
                return Err(PayloadError::invalid(format!(
                    "duplicate recommendation '{}'",
                    entry.name
                )));
            }
        }
        Ok(())
    }

    /// Highest-ranked recommendation, if any.
    pub fn top(&self) -> Option<&RecommendationEntry> {
        self.recommendations.first()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn finland() -> serde_json::Value {
        json!({
            "name": "Finland",
            "region": "Europe",
            "subregion": "Northern Europe",
            "score": 92,
            "description": "Nordic country with strong education.",
            "cluster": 1,
            "capital": ["Helsinki"]
        })
    }

    #[test]
    fn request_serializes_as_text_object() {
        let request = RecommendationRequest::new(&Query::new("safe and sunny"));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"text": "safe and sunny"})
        );
        assert_eq!(request.text(), "safe and sunny");
    }

    #[test]
    fn decodes_full_response() {
        let body = json!({
            "criteria": {"education_index": 0.9, "population": 5500000},
            "best_match": {"name": "Finland", "cluster": 1},
            "recommendations": [finland()]
        })
        .to_string();

        let response = RecommendationResponse::from_json(&body).unwrap();
        assert_eq!(response.criteria.len(), 2);
        assert_eq!(
            response.best_match,
            Some(BestMatch {
                name: "Finland".to_string(),
                cluster: 1
            })
        );
        let top = response.top().unwrap();
        assert_eq!(top.score, 92.0);
        assert_eq!(top.location(), "Northern Europe");
        assert_eq!(top.capital.as_ref().and_then(Capital::primary), Some("Helsinki"));
    }

    #[test]
    fn best_match_and_recommendations_are_optional() {
        let response = RecommendationResponse::from_json(r#"{"criteria": {}}"#).unwrap();
        assert!(response.best_match.is_none());
        assert!(response.recommendations.is_empty());
        assert!(response.top().is_none());

        let response = RecommendationResponse::from_json(
            r#"{"criteria": {}, "best_match": null, "recommendations": null}"#,
        )
        .unwrap();
        assert!(response.best_match.is_none());
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn missing_or_malformed_criteria_is_invalid() {
        let err = RecommendationResponse::from_json(r#"{"recommendations": []}"#).unwrap_err();
        assert!(matches!(err, PayloadError::InvalidPayload(_)));

        let err = RecommendationResponse::from_json(r#"{"criteria": [0.5]}"#).unwrap_err();
        assert!(matches!(err, PayloadError::InvalidPayload(_)));

        let err = RecommendationResponse::from_json("not json").unwrap_err();
        assert!(matches!(err, PayloadError::InvalidPayload(_)));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let body = json!({
            "criteria": {"education_index": 0.5},
            "recommendations": [finland(), finland()]
        })
        .to_string();

        match RecommendationResponse::from_json(&body) {
            Err(PayloadError::InvalidPayload(msg)) if msg.contains("Finland") => {}
            other => panic!("expected duplicate rejection, got {other:?}"),
        }
    }

    #[test]
    fn null_metadata_reads_as_empty() {
        let entry: RecommendationEntry = serde_json::from_value(json!({
            "name": "Nauru",
            "region": null,
            "subregion": null,
            "score": 41.5,
            "description": null,
            "cluster": 3,
            "capital": null
        }))
        .unwrap();

        assert_eq!(entry.region, "");
        assert_eq!(entry.description, "");
        assert!(entry.capital.is_none());
        assert_eq!(entry.location(), "");
    }

    #[test]
    fn empty_subregion_falls_back_to_region() {
        let mut entry: RecommendationEntry = serde_json::from_value(finland()).unwrap();
        entry.subregion = Some(String::new());
        assert_eq!(entry.location(), "Europe");
        entry.subregion = None;
        assert_eq!(entry.location(), "Europe");
    }

    #[test]
    fn capital_accepts_string_or_list() {
        let one: Capital = serde_json::from_value(json!("Canberra")).unwrap();
        assert_eq!(one.primary(), Some("Canberra"));

        let many: Capital = serde_json::from_value(json!(["Pretoria", "Cape Town"])).unwrap();
        assert_eq!(many.primary(), Some("Pretoria"));

        let none: Capital = serde_json::from_value(json!([])).unwrap();
        assert_eq!(none.primary(), None);
    }
}
