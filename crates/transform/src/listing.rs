//! List-ready shapes: ranked cards and the best-match banner.

use serde::{Deserialize, Serialize};

use countryguide_core::{BestMatch, Capital, RecommendationEntry};

/// Display card for one recommended country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationCard {
    /// 1-based rank, response order.
    pub rank: usize,
    pub name: String,
    pub location: String,
    pub score_label: String,
    pub description: String,
    pub cluster_label: String,
    pub capital: Option<String>,
}

/// Hero banner for the single best match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestMatchBanner {
    pub name: String,
    pub cluster_label: String,
}

pub fn recommendation_cards(entries: &[RecommendationEntry]) -> Vec<RecommendationCard> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| RecommendationCard {
            rank: idx + 1,
            name: entry.name.clone(),
            location: entry.location().to_string(),
            score_label: score_label(entry.score),
            description: entry.description.clone(),
            cluster_label: cluster_label(entry.cluster),
            capital: entry
                .capital
                .as_ref()
                .and_then(Capital::primary)
                .map(str::to_string),
        })
        .collect()
}

pub fn best_match_banner(best_match: Option<&BestMatch>) -> Option<BestMatchBanner> {
    best_match.map(|m| BestMatchBanner {
        name: m.name.clone(),
        cluster_label: cluster_label(m.cluster),
    })
}

/// `92` → `"92%"`, `87.35` → `"87.35%"`.
pub fn score_label(score: f64) -> String {
    format!("{score}%")
}

pub fn cluster_label(cluster: i64) -> String {
    format!("Cluster #{cluster}")
}
