use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const MIN_NOTES: usize = 1;
pub const MAX_NOTES: usize = 10;

/// How strongly the fragrance should come across
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Light,
    Moderate,
    Strong,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Light => "light",
            Intensity::Moderate => "moderate",
            Intensity::Strong => "strong",
        }
    }
}

/// When the fragrance will be worn
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Occasion {
    Daily,
    Evening,
    Special,
    Work,
    Casual,
}

impl Occasion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Daily => "daily",
            Occasion::Evening => "evening",
            Occasion::Special => "special",
            Occasion::Work => "work",
            Occasion::Casual => "casual",
        }
    }
}

/// Preferred season for the fragrance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    AllYear,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
            Season::AllYear => "all_year",
        }
    }
}

impl Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Occasion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's fragrance request, as received from the client
///
/// Field names follow the public JSON contract (`preferredNotes`, ...).
/// Unknown fields are rejected at deserialization time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PreferenceSpec {
    /// Free-text description of taste and personality
    pub preferences: String,
    /// Preferred notes, in the order the user listed them
    pub preferred_notes: Vec<String>,
    pub intensity: Intensity,
    pub occasion: Occasion,
    pub season: Season,
    /// Budget range in USD, e.g. "50-150"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// Gender preference, e.g. "unisex"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl PreferenceSpec {
    /// Checks the bounds the HTTP layer enforces before a request reaches the core.
    ///
    /// Returns every violated rule, not only the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut violations = Vec::new();

        let description_len = self.preferences.chars().count();
        if description_len < DESCRIPTION_MIN_CHARS {
            violations.push(format!(
                "Description must be at least {} characters long",
                DESCRIPTION_MIN_CHARS
            ));
        }
        if description_len > DESCRIPTION_MAX_CHARS {
            violations.push(format!(
                "Description must not exceed {} characters",
                DESCRIPTION_MAX_CHARS
            ));
        }

        if self.preferred_notes.len() < MIN_NOTES {
            violations.push("At least one preferred note is required".to_string());
        }
        if self.preferred_notes.len() > MAX_NOTES {
            violations.push(format!(
                "Maximum {} preferred notes allowed",
                MAX_NOTES
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Short, char-boundary safe preview of the description for log lines
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.preferences.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}
