use crate::models::{RecommendationItem, Recommendations};

#[allow(clippy::too_many_arguments)]
fn item(
    name: &str,
    brand: &str,
    description: &str,
    notes: [&[&str]; 3],
    match_reason: &str,
    price_range: &str,
    longevity: &str,
    projection: &str,
) -> RecommendationItem {
    let [top, heart, base] = notes.map(|n| n.iter().map(|s| s.to_string()).collect::<Vec<_>>());

    RecommendationItem {
        name: name.to_string(),
        brand: brand.to_string(),
        description: description.to_string(),
        top_notes: top,
        heart_notes: heart,
        base_notes: base,
        match_reason: match_reason.to_string(),
        price_range: price_range.to_string(),
        longevity: longevity.to_string(),
        projection: projection.to_string(),
    }
}

/// Hand-curated recommendations served when the model's answer is unusable.
///
/// Constant: three well-known fragrances plus generic analysis and tips.
/// Carries no timestamp; callers stamp it like any other result.
pub fn fallback_recommendations() -> Recommendations {
    Recommendations {
        recommendations: vec![
            item(
                "Acqua di Gio",
                "Giorgio Armani",
                "A fresh aquatic fragrance perfect for everyday wear",
                [
                    &["bergamot", "lemon", "lime"],
                    &["jasmine", "rose", "freesia"],
                    &["white musk", "cedar", "patchouli"],
                ],
                "A versatile fragrance suitable for most preferences",
                "$60-80",
                "6-8 hours",
                "Moderate",
            ),
            item(
                "Light Blue",
                "Dolce & Gabbana",
                "A Mediterranean-inspired fragrance with citrus notes",
                [
                    &["sicilian lemon", "apple", "bluebell"],
                    &["bamboo", "jasmine", "white rose"],
                    &["cedarwood", "amber", "musk"],
                ],
                "Fresh and light, perfect for daily wear",
                "$50-70",
                "5-7 hours",
                "Light to Moderate",
            ),
            item(
                "Black Opium",
                "Yves Saint Laurent",
                "A modern take on oriental fragrances with coffee notes",
                [
                    &["pink pepper", "orange blossom", "pear"],
                    &["coffee", "jasmine", "bitter almond"],
                    &["vanilla", "patchouli", "cedarwood"],
                ],
                "Sophisticated and alluring for evening wear",
                "$80-120",
                "8-10 hours",
                "Strong",
            ),
        ],
        analysis: "These are popular, well-reviewed fragrances suitable for various preferences \
                   and occasions."
            .to_string(),
        tips: "Always test fragrances on your skin and allow them to develop for at least 30 \
               minutes before making a decision."
            .to_string(),
    }
}
