use crate::{
    models::{RecommendationItem, Recommendations},
    services::fallback,
};
use serde_json::{Map, Value};

pub const DEFAULT_NAME: &str = "Unknown Fragrance";
pub const DEFAULT_BRAND: &str = "Unknown Brand";
pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_MATCH_REASON: &str = "Good match for your preferences";
pub const DEFAULT_PRICE_RANGE: &str = "$50-100";
pub const DEFAULT_LONGEVITY: &str = "4-6 hours";
pub const DEFAULT_PROJECTION: &str = "Moderate";
pub const DEFAULT_ANALYSIS: &str = "Analysis not available";
pub const DEFAULT_TIPS: &str = "Test fragrances on your skin before purchasing";

/// Why raw model text could not be turned into recommendations
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("No JSON found in response")]
    NoJson,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid recommendations structure")]
    MissingRecommendations,
}

/// Turns raw model text into recommendations.
///
/// Never fails: text that cannot be located, decoded or shaped as
/// `{"recommendations": [...]}` yields the fallback catalog in full.
pub fn parse_response(raw: &str) -> Recommendations {
    match try_parse(raw) {
        Ok(recommendations) => recommendations,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse model response, using fallback");
            fallback::fallback_recommendations()
        }
    }
}

/// Locate, decode, validate, then coerce. Only the first three steps can fail.
pub fn try_parse(raw: &str) -> Result<Recommendations, ParseError> {
    let json = extract_json_object(raw).ok_or(ParseError::NoJson)?;

    let parsed: Value =
        serde_json::from_str(json).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let items = parsed
        .get("recommendations")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingRecommendations)?;

    Ok(Recommendations {
        recommendations: items.iter().map(coerce_item).collect(),
        analysis: string_or(&parsed, "analysis", DEFAULT_ANALYSIS),
        tips: string_or(&parsed, "tips", DEFAULT_TIPS),
    })
}

/// Returns the first balanced `{...}` span of `raw`.
///
/// Braces inside JSON string literals are ignored. `None` when no `{` exists or
/// the first one is never closed.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in raw[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + idx + ch.len_utf8();
                    return Some(&raw[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

fn coerce_item(value: &Value) -> RecommendationItem {
    let empty = Map::new();
    let fields = value.as_object().unwrap_or(&empty);

    RecommendationItem {
        name: field_or(fields, "name", DEFAULT_NAME),
        brand: field_or(fields, "brand", DEFAULT_BRAND),
        description: field_or(fields, "description", DEFAULT_DESCRIPTION),
        top_notes: notes(fields, "topNotes"),
        heart_notes: notes(fields, "heartNotes"),
        base_notes: notes(fields, "baseNotes"),
        match_reason: field_or(fields, "matchReason", DEFAULT_MATCH_REASON),
        price_range: field_or(fields, "priceRange", DEFAULT_PRICE_RANGE),
        longevity: field_or(fields, "longevity", DEFAULT_LONGEVITY),
        projection: field_or(fields, "projection", DEFAULT_PROJECTION),
    }
}

fn string_or(value: &Value, key: &str, default: &str) -> String {
    match value.as_object() {
        Some(fields) => field_or(fields, key, default),
        None => default.to_string(),
    }
}

/// Non-empty string value of `key`, or `default`
fn field_or(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// String elements of the array at `key`; anything else is an empty list
fn notes(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|notes| {
            notes
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
