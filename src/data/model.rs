use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Column names expected in the source table
// ---------------------------------------------------------------------------

/// Header given to the first column regardless of its original text.
pub const AGE_COLUMN: &str = "Age";
pub const GENDER_COLUMN: &str = "Gender";
pub const SUBSCRIPTION_PLAN_COLUMN: &str = "spotify_subscription_plan";
pub const RATING_COLUMN: &str = "music_recc_rating";
pub const USAGE_PERIOD_COLUMN: &str = "spotify_usage_period";
pub const PREFERRED_PLAN_COLUMN: &str = "preffered_premium_plan";
pub const MOOD_COLUMN: &str = "music_Influencial_mood";
pub const FREQUENCY_COLUMN: &str = "music_lis_frequency";

/// Every column the dashboard reads, in the order of [`RawRecord`]'s fields.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    AGE_COLUMN,
    GENDER_COLUMN,
    SUBSCRIPTION_PLAN_COLUMN,
    RATING_COLUMN,
    USAGE_PERIOD_COLUMN,
    PREFERRED_PLAN_COLUMN,
    MOOD_COLUMN,
    FREQUENCY_COLUMN,
];

// ---------------------------------------------------------------------------
// AgeGroup – canonical age bucket
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeGroup {
    #[serde(rename = "6-12")]
    From6To12,
    #[serde(rename = "12-20")]
    From12To20,
    #[serde(rename = "20-35")]
    From20To35,
    #[serde(rename = "35-60")]
    From35To60,
    #[serde(rename = "60+")]
    Over60,
    Unknown,
}

impl AgeGroup {
    /// Buckets offered by the age filter, in display order.
    pub const KNOWN: [AgeGroup; 5] = [
        AgeGroup::From6To12,
        AgeGroup::From12To20,
        AgeGroup::From20To35,
        AgeGroup::From35To60,
        AgeGroup::Over60,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::From6To12 => "6-12",
            AgeGroup::From12To20 => "12-20",
            AgeGroup::From20To35 => "20-35",
            AgeGroup::From35To60 => "35-60",
            AgeGroup::Over60 => "60+",
            AgeGroup::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Ordered vocabularies for the bar view
// ---------------------------------------------------------------------------

/// How long a respondent has used the service. Variant order is axis order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum UsagePeriod {
    #[serde(rename = "Less than 6 months")]
    LessThan6Months,
    #[serde(rename = "6 months to 1 year")]
    SixMonthsTo1Year,
    #[serde(rename = "1 year to 2 years")]
    OneTo2Years,
    #[serde(rename = "More than 2 years")]
    MoreThan2Years,
}

impl UsagePeriod {
    pub const ALL: [UsagePeriod; 4] = [
        UsagePeriod::LessThan6Months,
        UsagePeriod::SixMonthsTo1Year,
        UsagePeriod::OneTo2Years,
        UsagePeriod::MoreThan2Years,
    ];

    pub fn label(self) -> &'static str {
        match self {
            UsagePeriod::LessThan6Months => "Less than 6 months",
            UsagePeriod::SixMonthsTo1Year => "6 months to 1 year",
            UsagePeriod::OneTo2Years => "1 year to 2 years",
            UsagePeriod::MoreThan2Years => "More than 2 years",
        }
    }

    /// Exact match against the vocabulary; anything else is unmatched.
    pub fn coerce(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == raw)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for UsagePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Premium plan a respondent would pick. Variant order is legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PremiumPlan {
    #[serde(rename = "Student Plan-Rs 59/month")]
    Student,
    #[serde(rename = "Individual Plan- Rs 119/ month")]
    Individual,
    #[serde(rename = "Duo plan- Rs 149/month")]
    Duo,
    #[serde(rename = "Family Plan-Rs 179/month")]
    Family,
}

impl PremiumPlan {
    pub const ALL: [PremiumPlan; 4] = [
        PremiumPlan::Student,
        PremiumPlan::Individual,
        PremiumPlan::Duo,
        PremiumPlan::Family,
    ];

    /// Labels are matched verbatim, including the irregular spacing of the
    /// survey's answer options.
    pub fn label(self) -> &'static str {
        match self {
            PremiumPlan::Student => "Student Plan-Rs 59/month",
            PremiumPlan::Individual => "Individual Plan- Rs 119/ month",
            PremiumPlan::Duo => "Duo plan- Rs 149/month",
            PremiumPlan::Family => "Family Plan-Rs 179/month",
        }
    }

    pub fn coerce(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == raw)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PremiumPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one row as read from disk
// ---------------------------------------------------------------------------

/// Cell text for the required columns, before any normalization.
/// Empty cells are empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub age: String,
    pub gender: String,
    pub subscription_plan: String,
    pub rating: String,
    pub usage_period: String,
    pub preferred_plan: String,
    pub influential_mood: String,
    pub listening_frequency: String,
}

impl RawRecord {
    /// Build a record from cells listed in [`REQUIRED_COLUMNS`] order.
    pub fn from_cells(cells: [String; 8]) -> Self {
        let [age, gender, subscription_plan, rating, usage_period, preferred_plan, influential_mood, listening_frequency] =
            cells;
        RawRecord {
            age,
            gender,
            subscription_plan,
            rating,
            usage_period,
            preferred_plan,
            influential_mood,
            listening_frequency,
        }
    }
}

// ---------------------------------------------------------------------------
// SurveyRecord – one normalized respondent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyRecord {
    pub age_group: AgeGroup,
    /// Trimmed age text as answered.
    pub raw_age: String,
    pub gender: String,
    pub subscription_plan: String,
    /// `None` when the answer was not numeric.
    pub rating: Option<f64>,
    pub usage_period: Option<String>,
    pub preferred_plan: Option<String>,
    /// Comma-delimited, expanded by the bubble view.
    pub influential_mood: Option<String>,
    /// Comma-delimited, expanded by the bubble view.
    pub listening_frequency: Option<String>,
}

// ---------------------------------------------------------------------------
// SurveyTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The normalized dataset. Built once; there is no mutation API.
#[derive(Debug, Clone, Default)]
pub struct SurveyTable {
    records: Vec<SurveyRecord>,
}

impl SurveyTable {
    pub fn from_records(records: Vec<SurveyRecord>) -> Self {
        SurveyTable { records }
    }

    pub fn records(&self) -> &[SurveyRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&SurveyRecord> {
        self.records.get(index)
    }

    /// Number of respondents.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
