use super::model::{AgeGroup, RawRecord, SurveyRecord};

// ---------------------------------------------------------------------------
// Field normalization: RawRecord → SurveyRecord
// ---------------------------------------------------------------------------

/// Map a free-text age range onto its bucket. Total: unrecognised text,
/// including empty or whitespace-only input, maps to `Unknown`.
pub fn map_age_group(raw: &str) -> AgeGroup {
    match raw.trim() {
        "6 to 12" => AgeGroup::From6To12,
        "12 to 20" => AgeGroup::From12To20,
        "20 to 35" => AgeGroup::From20To35,
        "35 to 60" => AgeGroup::From35To60,
        "60 and above" => AgeGroup::Over60,
        _ => AgeGroup::Unknown,
    }
}

/// Parse a rating cell. Anything non-numeric is absent, never zero.
pub fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Cell texts read as missing values. Matching is exact: a whitespace-only
/// cell is present.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A missing-value token is `None`; anything else is kept verbatim.
fn present(raw: String) -> Option<String> {
    if NA_TOKENS.contains(&raw.as_str()) {
        None
    } else {
        Some(raw)
    }
}

/// Normalize one row. Malformed fields degrade to sentinels.
pub fn normalize(raw: RawRecord) -> SurveyRecord {
    SurveyRecord {
        age_group: map_age_group(&raw.age),
        raw_age: raw.age.trim().to_string(),
        gender: raw.gender.trim().to_string(),
        subscription_plan: raw.subscription_plan.trim().to_string(),
        rating: parse_rating(&raw.rating),
        usage_period: present(raw.usage_period),
        preferred_plan: present(raw.preferred_plan),
        influential_mood: present(raw.influential_mood),
        listening_frequency: present(raw.listening_frequency),
    }
}
