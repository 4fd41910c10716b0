use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recommended fragrance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationItem {
    pub name: String,
    pub brand: String,
    pub description: String,
    pub top_notes: Vec<String>,
    pub heart_notes: Vec<String>,
    pub base_notes: Vec<String>,
    /// Why this fragrance suits the request
    pub match_reason: String,
    /// e.g. "$60-80"
    pub price_range: String,
    /// e.g. "6-8 hours"
    pub longevity: String,
    /// e.g. "Moderate"
    pub projection: String,
}

/// Recommendations before they are stamped with a generation time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    pub recommendations: Vec<RecommendationItem>,
    pub analysis: String,
    pub tips: String,
}

impl Recommendations {
    /// Finalizes the recommendations at `timestamp`
    pub fn stamped(self, timestamp: DateTime<Utc>) -> RecommendationResult {
        RecommendationResult {
            recommendations: self.recommendations,
            analysis: self.analysis,
            tips: self.tips,
            timestamp,
        }
    }
}

/// Response body of a fragrance match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub recommendations: Vec<RecommendationItem>,
    pub analysis: String,
    pub tips: String,
    /// Serialized as RFC 3339 / ISO-8601
    pub timestamp: DateTime<Utc>,
}
