use crate::models::PreferenceSpec;

/// Rendered in place of an optional field the user left out
pub const NOT_SPECIFIED: &str = "Not specified";

/// System instruction sent alongside every prompt
pub const SYSTEM_INSTRUCTION: &str =
    "You are an expert perfumer and fragrance consultant. Always respond with valid JSON.";

const OUTPUT_SCHEMA: &str = r#"{
  "recommendations": [
    {
      "name": "Fragrance Name",
      "brand": "Brand Name",
      "description": "Detailed description of the fragrance",
      "topNotes": ["note1", "note2", "note3"],
      "heartNotes": ["note1", "note2", "note3"],
      "baseNotes": ["note1", "note2", "note3"],
      "matchReason": "Explanation of why this matches the user's preferences",
      "priceRange": "$X-Y",
      "longevity": "X-Y hours",
      "projection": "Light/Moderate/Strong"
    }
  ],
  "analysis": "Overall analysis of the user's fragrance preferences and style",
  "tips": "Additional tips for fragrance selection and wearing"
}"#;

const GUIDELINES: &[&str] = &[
    "Recommend real, well-known fragrances from established brands",
    "Ensure the fragrances match the specified intensity, occasion, and season",
    "Include specific fragrance notes that align with the user's preferences",
    "Provide realistic price ranges",
    "Give practical advice in the tips section",
    "Make sure the matchReason clearly explains why each fragrance suits the user",
];

/// Renders a preference spec into the user message for the model.
///
/// Pure and deterministic. Every field is rendered on its own labelled line,
/// blank optional fields included, followed by the JSON shape the response
/// parser expects and the guidelines the model must follow.
pub fn build_prompt(spec: &PreferenceSpec) -> String {
    let mut prompt = String::from(
        "You are an expert perfumer and fragrance consultant. Based on the following user \
         preferences, recommend 3 specific fragrances that would be perfect matches.\n\n",
    );

    prompt.push_str("User Preferences:\n");
    prompt.push_str(&format!("- Description: {}\n", spec.preferences));
    prompt.push_str(&format!(
        "- Preferred Notes: {}\n",
        spec.preferred_notes.join(", ")
    ));
    prompt.push_str(&format!("- Intensity: {}\n", spec.intensity));
    prompt.push_str(&format!("- Occasion: {}\n", spec.occasion));
    prompt.push_str(&format!("- Season: {}\n", spec.season));
    prompt.push_str(&format!("- Budget: {}\n", or_not_specified(&spec.budget)));
    prompt.push_str(&format!(
        "- Gender Preference: {}\n",
        or_not_specified(&spec.gender)
    ));

    prompt.push_str("\nPlease provide your response in the following JSON format:\n");
    prompt.push_str(OUTPUT_SCHEMA);

    prompt.push_str("\n\nImportant guidelines:\n");
    let guidelines: Vec<String> = GUIDELINES.iter().map(|g| format!("- {}", g)).collect();
    prompt.push_str(&guidelines.join("\n"));

    prompt
}

fn or_not_specified(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}
