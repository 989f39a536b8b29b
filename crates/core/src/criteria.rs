//! Criterion keys and the per-criterion score map returned by the service.
//!
//! ## Ordering
//!
//! `CriteriaScore` keeps entries exactly as they appear on the wire: insertion
//! order is preserved and repeated keys are kept. Chart and list views rely on
//! that order, so nothing in this module sorts or deduplicates.
//!
//! ## Scale
//!
//! Every criterion except [`Criterion::Population`] carries a normalized score
//! (conventionally in `[0, 1]`). Population is a raw magnitude and is excluded
//! from score charts by the transform layer.

use core::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::error::{PayloadError, PayloadResult};

/// Known criterion keys.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Criterion {
    Education,
    Wealth,
    Happiness,
    PoliticalStability,
    Healthcare,
    LifeExpectancy,
    InternetPenetration,
    GdpPerCapita,
    Population,
}

impl Criterion {
    pub const ALL: [Criterion; 9] = [
        Criterion::Education,
        Criterion::Wealth,
        Criterion::Happiness,
        Criterion::PoliticalStability,
        Criterion::Healthcare,
        Criterion::LifeExpectancy,
        Criterion::InternetPenetration,
        Criterion::GdpPerCapita,
        Criterion::Population,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "education_index" => Some(Criterion::Education),
            "wealth_index" => Some(Criterion::Wealth),
            "happiness_index" => Some(Criterion::Happiness),
            "political_stability_index" => Some(Criterion::PoliticalStability),
            "healthcare_quality_index" => Some(Criterion::Healthcare),
            "life_expectancy" => Some(Criterion::LifeExpectancy),
            "internet_penetration" => Some(Criterion::InternetPenetration),
            "gdp_per_capita" => Some(Criterion::GdpPerCapita),
            "population" => Some(Criterion::Population),
            _ => None,
        }
    }

    /// Wire key as sent by the service.
    pub fn key(&self) -> &'static str {
        match self {
            Criterion::Education => "education_index",
            Criterion::Wealth => "wealth_index",
            Criterion::Happiness => "happiness_index",
            Criterion::PoliticalStability => "political_stability_index",
            Criterion::Healthcare => "healthcare_quality_index",
            Criterion::LifeExpectancy => "life_expectancy",
            Criterion::InternetPenetration => "internet_penetration",
            Criterion::GdpPerCapita => "gdp_per_capita",
            Criterion::Population => "population",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::Education => "Education",
            Criterion::Wealth => "Wealth",
            Criterion::Happiness => "Happiness",
            Criterion::PoliticalStability => "Political Stability",
            Criterion::Healthcare => "Healthcare",
            Criterion::LifeExpectancy => "Life Expectancy",
            Criterion::InternetPenetration => "Internet",
            Criterion::GdpPerCapita => "GDP per Capita",
            Criterion::Population => "Population",
        }
    }

    /// Whether the value is a normalized score (everything but population).
    pub fn is_normalized_score(&self) -> bool {
        !matches!(self, Criterion::Population)
    }
}

/// Label for a wire key; unknown keys are returned unchanged.
pub fn criterion_label(key: &str) -> &str {
    Criterion::from_key(key).map_or(key, |c| c.label())
}

/// Ordered criterion → value pairs, as received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriteriaScore {
    entries: Vec<(String, f64)>,
}

impl CriteriaScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end (no dedup).
    pub fn push(&mut self, key: impl Into<String>, value: f64) {
        self.entries.push((key.into(), value));
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.push(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Build from an untyped JSON value.
    ///
    /// Fails when the value is absent, is not an object, or holds a
    /// non-numeric value. Key order follows the object's order.
    pub fn from_value(value: Option<&JsonValue>) -> PayloadResult<Self> {
        let map = match value {
            None | Some(JsonValue::Null) => {
                return Err(PayloadError::invalid("criteria is missing"));
            }
            Some(JsonValue::Object(map)) => map,
            Some(_) => return Err(PayloadError::invalid("criteria must be a mapping")),
        };

        let mut criteria = Self::new();
        for (key, raw) in map {
            let value = raw.as_f64().ok_or_else(|| {
                PayloadError::invalid(format!("criterion '{key}' is not a number"))
            })?;
            criteria.push(key.clone(), value);
        }
        Ok(criteria)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for CriteriaScore {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Serialize for CriteriaScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct CriteriaVisitor;

impl<'de> Visitor<'de> for CriteriaVisitor {
    type Value = CriteriaScore;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of criterion keys to numeric values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut criteria = CriteriaScore {
            entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((key, value)) = access.next_entry::<String, f64>()? {
            criteria.entries.push((key, value));
        }
        Ok(criteria)
    }
}

impl<'de> Deserialize<'de> for CriteriaScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CriteriaVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn every_known_key_round_trips_through_the_table() {
        for c in Criterion::ALL {
            assert_eq!(Criterion::from_key(c.key()), Some(c));
        }
        assert_eq!(criterion_label("political_stability_index"), "Political Stability");
        assert_eq!(criterion_label("gdp_per_capita"), "GDP per Capita");
        assert_eq!(criterion_label("foo_index"), "foo_index");
    }

    #[test]
    fn only_population_is_a_raw_magnitude() {
        let raw: Vec<_> = Criterion::ALL
            .iter()
            .filter(|c| !c.is_normalized_score())
            .collect();
        assert_eq!(raw, vec![&Criterion::Population]);
    }

    #[test]
    fn deserialize_keeps_wire_order_and_duplicates() {
        let body = r#"{"wealth_index": 0.5, "education_index": 0.9, "wealth_index": 0.7, "population": 1200}"#;
        let criteria: CriteriaScore = serde_json::from_str(body).unwrap();

        let keys: Vec<_> = criteria.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["wealth_index", "education_index", "wealth_index", "population"]
        );
        assert_eq!(criteria.get("wealth_index"), Some(0.5));
        assert_eq!(criteria.get("population"), Some(1200.0));
    }

    #[test]
    fn deserialize_rejects_non_mapping_and_non_numeric() {
        assert!(serde_json::from_str::<CriteriaScore>("[1, 2]").is_err());
        assert!(serde_json::from_str::<CriteriaScore>(r#"{"education_index": "high"}"#).is_err());
        assert!(serde_json::from_str::<CriteriaScore>(r#"{"education_index": null}"#).is_err());
    }

    #[test]
    fn from_value_requires_a_mapping() {
        assert_eq!(
            CriteriaScore::from_value(None),
            Err(PayloadError::invalid("criteria is missing"))
        );
        assert!(CriteriaScore::from_value(Some(&json!(null))).is_err());
        assert_eq!(
            CriteriaScore::from_value(Some(&json!([0.1, 0.2]))),
            Err(PayloadError::invalid("criteria must be a mapping"))
        );
        assert!(CriteriaScore::from_value(Some(&json!({"education_index": true}))).is_err());
    }

    #[test]
    fn from_value_follows_object_order() {
        let value = json!({"population": 5.0, "happiness_index": 0.25, "education_index": 1});
        let criteria = CriteriaScore::from_value(Some(&value)).unwrap();
        let collected: Vec<_> = criteria.iter().collect();
        assert_eq!(
            collected,
            vec![
                ("population", 5.0),
                ("happiness_index", 0.25),
                ("education_index", 1.0)
            ]
        );
    }

    #[test]
    fn serialize_writes_entries_in_order() {
        let criteria = CriteriaScore::new()
            .with("life_expectancy", 0.4)
            .with("education_index", 0.9);
        let text = serde_json::to_string(&criteria).unwrap();
        assert_eq!(text, r#"{"life_expectancy":0.4,"education_index":0.9}"#);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: labels never panic and unknown keys pass through verbatim.
        #[test]
        fn unknown_keys_label_as_themselves(key in "[a-z_]{1,24}") {
            let label = criterion_label(&key);
            match Criterion::from_key(&key) {
                Some(c) => prop_assert_eq!(label, c.label()),
                None => prop_assert_eq!(label, key.as_str()),
            }
        }
    }
}
