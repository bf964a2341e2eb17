use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::model::{AgeGroup, SurveyRecord, SurveyTable};

// ---------------------------------------------------------------------------
// Filter dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgeFilter {
    #[default]
    All,
    Only(AgeGroup),
}

impl AgeFilter {
    pub fn options() -> impl Iterator<Item = AgeFilter> {
        std::iter::once(AgeFilter::All).chain(AgeGroup::KNOWN.into_iter().map(AgeFilter::Only))
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeFilter::All => "All",
            AgeFilter::Only(group) => group.label(),
        }
    }

    fn accepts(self, record: &SurveyRecord) -> bool {
        match self {
            AgeFilter::All => true,
            AgeFilter::Only(group) => record.age_group == group,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenderFilter {
    #[default]
    All,
    Female,
    Male,
    Others,
}

impl GenderFilter {
    pub const OPTIONS: [GenderFilter; 4] = [
        GenderFilter::All,
        GenderFilter::Female,
        GenderFilter::Male,
        GenderFilter::Others,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GenderFilter::All => "All",
            GenderFilter::Female => "Female",
            GenderFilter::Male => "Male",
            GenderFilter::Others => "Others",
        }
    }

    /// Exact, case-sensitive comparison against the trimmed gender field.
    fn accepts(self, record: &SurveyRecord) -> bool {
        self == GenderFilter::All || record.gender == self.label()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanFilter {
    #[default]
    All,
    Free,
    Premium,
}

impl PlanFilter {
    pub const OPTIONS: [PlanFilter; 3] = [PlanFilter::All, PlanFilter::Free, PlanFilter::Premium];

    pub fn label(self) -> &'static str {
        match self {
            PlanFilter::All => "All",
            PlanFilter::Free => "Free",
            PlanFilter::Premium => "Premium",
        }
    }

    /// Case-insensitive substring test, so "Premium" matches
    /// "Premium (paid subscription)".
    fn accepts(self, record: &SurveyRecord) -> bool {
        match self {
            PlanFilter::All => true,
            other => record
                .subscription_plan
                .to_lowercase()
                .contains(&other.label().to_lowercase()),
        }
    }
}

macro_rules! impl_filter_parse {
    ($ty:ty, $options:expr) => {
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $options
                    .find(|opt| opt.label().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| {
                        let valid: Vec<&str> = $options.map(|o| o.label()).collect();
                        format!("'{s}' is not one of {}", valid.join(", "))
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

impl_filter_parse!(AgeFilter, AgeFilter::options());
impl_filter_parse!(GenderFilter, GenderFilter::OPTIONS.into_iter());
impl_filter_parse!(PlanFilter, PlanFilter::OPTIONS.into_iter());

// ---------------------------------------------------------------------------
// FilterSelection – the four widget values
// ---------------------------------------------------------------------------

/// Ratings a respondent can give the recommendation system.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub age: AgeFilter,
    pub gender: GenderFilter,
    pub plan: PlanFilter,
    /// Selected ratings. Empty means nothing selected → no records pass.
    pub ratings: BTreeSet<u8>,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            age: AgeFilter::All,
            gender: GenderFilter::All,
            plan: PlanFilter::All,
            ratings: RATING_RANGE.collect(),
        }
    }
}

impl FilterSelection {
    /// Whether a single record passes every dimension.
    pub fn accepts(&self, record: &SurveyRecord) -> bool {
        self.age.accepts(record)
            && self.gender.accepts(record)
            && self.plan.accepts(record)
            && self.accepts_rating(record.rating)
    }

    /// Absent and non-integer ratings never match a selected rating.
    fn accepts_rating(&self, rating: Option<f64>) -> bool {
        let Some(value) = rating else {
            return false;
        };
        if value.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&value) {
            return false;
        }
        self.ratings.contains(&(value as u8))
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of records that pass all active filters, in table order.
pub fn filtered_indices(table: &SurveyTable, selection: &FilterSelection) -> Vec<usize> {
    if selection.ratings.is_empty() {
        // Nothing selected for ratings → hide everything
        return Vec::new();
    }
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.accepts(rec))
        .map(|(i, _)| i)
        .collect()
}

/// A read-only, order-preserving subset of a [`SurveyTable`].
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    table: &'a SurveyTable,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn new(table: &'a SurveyTable, selection: &FilterSelection) -> Self {
        Self {
            table,
            indices: filtered_indices(table, selection),
        }
    }

    /// A view over every record.
    #[cfg(test)]
    pub fn all(table: &'a SurveyTable) -> Self {
        Self {
            table,
            indices: (0..table.len()).collect(),
        }
    }

    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SurveyRecord> + '_ {
        let table = self.table;
        self.indices.iter().filter_map(move |&i| table.get(i))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
