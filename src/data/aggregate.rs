use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::FilteredView;
use super::model::{PremiumPlan, UsagePeriod};

// ---------------------------------------------------------------------------
// Bar view: usage period × preferred plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub usage_period: UsagePeriod,
    pub preferred_plan: PremiumPlan,
    pub count: usize,
    /// Share of all counted respondents in this view, rounded to 2 decimals.
    pub percentage: f64,
}

/// Count respondents per (usage period, preferred plan) pair.
///
/// Rows missing either field, or holding a value outside the fixed
/// vocabularies, are left out entirely. Only observed pairs are returned,
/// ordered by usage period and then by plan.
pub fn usage_plan_counts(view: &FilteredView<'_>) -> Vec<AggregateRow> {
    if view.is_empty() {
        return Vec::new();
    }
    let mut counts: BTreeMap<(UsagePeriod, PremiumPlan), usize> = BTreeMap::new();
    let mut dropped = 0usize;

    for rec in view.iter() {
        let (Some(usage), Some(plan)) = (&rec.usage_period, &rec.preferred_plan) else {
            continue;
        };
        match (UsagePeriod::coerce(usage), PremiumPlan::coerce(plan)) {
            (Some(usage), Some(plan)) => *counts.entry((usage, plan)).or_default() += 1,
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        log::debug!("{dropped} respondents outside the usage/plan vocabularies");
    }

    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|((usage_period, preferred_plan), count)| AggregateRow {
            usage_period,
            preferred_plan,
            count,
            percentage: round2(count as f64 / total as f64 * 100.0),
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Bubble view: influential mood × listening frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodFrequencyRow {
    pub mood: String,
    pub frequency: String,
    pub count: usize,
}

/// Upper-case a cased letter that follows an uncased character, lower-case
/// every other cased letter: `"while TRAVELING"` → `"While Traveling"`,
/// `"rock'n'roll"` → `"Rock'N'Roll"`. Uncased letters such as CJK ideographs
/// pass through and start a new word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for ch in s.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if !cased {
            out.push(ch);
        } else if prev_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_cased = cased;
    }
    out
}

fn split_multi_value(raw: &str) -> Vec<String> {
    raw.split(',').map(|part| title_case(part.trim())).collect()
}

/// Expand every qualifying record into the cross product of its mood and
/// frequency sub-values. Two moods and three frequencies give six pairs.
pub fn expand_mood_frequency(view: &FilteredView<'_>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for rec in view.iter() {
        let (Some(moods), Some(freqs)) = (&rec.influential_mood, &rec.listening_frequency) else {
            continue;
        };
        let freqs = split_multi_value(freqs);
        for mood in split_multi_value(moods) {
            for freq in &freqs {
                pairs.push((mood.clone(), freq.clone()));
            }
        }
    }
    pairs
}

/// Count expanded (mood, frequency) pairs, sorted by mood then frequency.
pub fn mood_frequency_counts(view: &FilteredView<'_>) -> Vec<MoodFrequencyRow> {
    let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
    for pair in expand_mood_frequency(view) {
        *counts.entry(pair).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((mood, frequency), count)| MoodFrequencyRow {
            mood,
            frequency,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::FilterSelection;
    use crate::data::model::{RawRecord, SurveyTable};
    use crate::data::normalize::normalize;

    fn raw(usage: &str, plan: &str, mood: &str, freq: &str) -> RawRecord {
        RawRecord {
            age: "20 to 35".into(),
            gender: "Female".into(),
            subscription_plan: "Free (ad-supported)".into(),
            rating: "4".into(),
            usage_period: usage.into(),
            preferred_plan: plan.into(),
            influential_mood: mood.into(),
            listening_frequency: freq.into(),
        }
    }

    fn table(rows: Vec<RawRecord>) -> SurveyTable {
        SurveyTable::from_records(rows.into_iter().map(normalize).collect())
    }

    #[test]
    fn bar_view_drops_missing_and_unknown_categories() {
        let t = table(vec![
            raw("Less than 6 months", "Student Plan-Rs 59/month", "", ""),
            raw("Less than 6 months", "Student Plan-Rs 59/month", "", ""),
            raw("More than 2 years", "Family Plan-Rs 179/month", "", ""),
            raw("", "Family Plan-Rs 179/month", "", ""),
            raw("More than 2 years", "", "", ""),
            raw("Forever", "Family Plan-Rs 179/month", "", ""),
            raw("More than 2 years", "None", "", ""),
            raw("6 months to 1 year", "Individual Plan- Rs 119/ month", "", ""),
        ]);
        let rows = usage_plan_counts(&FilteredView::all(&t));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].usage_period, UsagePeriod::LessThan6Months);
        assert_eq!(rows[0].preferred_plan, PremiumPlan::Student);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].percentage, 50.0);
        assert_eq!(rows[1].usage_period, UsagePeriod::SixMonthsTo1Year);
        assert_eq!(rows[1].percentage, 25.0);
        assert_eq!(rows[2].usage_period, UsagePeriod::MoreThan2Years);
        assert_eq!(rows[2].preferred_plan, PremiumPlan::Family);
    }

    #[test]
    fn bar_percentages_sum_to_hundred() {
        let t = table(vec![
            raw("Less than 6 months", "Student Plan-Rs 59/month", "", ""),
            raw("6 months to 1 year", "Duo plan- Rs 149/month", "", ""),
            raw("1 year to 2 years", "Family Plan-Rs 179/month", "", ""),
            raw("1 year to 2 years", "Family Plan-Rs 179/month", "", ""),
            raw("More than 2 years", "Individual Plan- Rs 119/ month", "", ""),
            raw("More than 2 years", "Student Plan-Rs 59/month", "", ""),
        ]);
        let rows = usage_plan_counts(&FilteredView::all(&t));
        let sum: f64 = rows.iter().map(|r| r.percentage).sum();
        assert!((sum - 100.0).abs() < 0.05, "sum was {sum}");
        assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), 6);
        assert_eq!(rows[0].percentage, 16.67);
    }

    #[test]
    fn empty_view_gives_empty_aggregates() {
        let t = table(vec![raw("Less than 6 months", "Student Plan-Rs 59/month", "Happy", "Daily")]);
        let sel = FilterSelection {
            ratings: BTreeSet::new(),
            ..FilterSelection::default()
        };
        let view = FilteredView::new(&t, &sel);
        assert!(usage_plan_counts(&view).is_empty());
        assert!(mood_frequency_counts(&view).is_empty());
    }

    #[test]
    fn title_case_follows_letter_boundaries() {
        assert_eq!(title_case("while traveling"), "While Traveling");
        assert_eq!(title_case("SOCIAL gatherings"), "Social Gatherings");
        assert_eq!(title_case("relaxation and stress relief"), "Relaxation And Stress Relief");
        assert_eq!(title_case("leisure time"), "Leisure Time");
        assert_eq!(title_case("don't stop"), "Don'T Stop");
        assert_eq!(title_case("work-out"), "Work-Out");
        assert_eq!(title_case("2pm"), "2Pm");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_treats_uncased_letters_as_boundaries() {
        assert_eq!(title_case("日a"), "日A");
        assert_eq!(title_case("音楽 night"), "音楽 Night");
        assert_eq!(title_case("ÉTÉ"), "Été");
    }

    #[test]
    fn missing_value_tokens_skip_bubble_rows() {
        let t = table(vec![
            raw("", "", "None", "Daily"),
            raw("", "", "NA", "Daily"),
            raw("", "", "  ", "Daily"),
            raw("", "", "Happy", "n/a"),
        ]);
        let rows = mood_frequency_counts(&FilteredView::all(&t));
        assert_eq!(
            rows,
            vec![MoodFrequencyRow {
                mood: String::new(),
                frequency: "Daily".to_string(),
                count: 1,
            }]
        );
    }

    #[test]
    fn bubble_expansion_is_cartesian_per_record() {
        let t = table(vec![
            raw("", "", "Happy, Sad", "Daily, at night,  office"),
            raw("", "", "relaxation", "Daily"),
            raw("", "", "", "Daily"),
            raw("", "", "Happy", ""),
        ]);
        let view = FilteredView::all(&t);
        let pairs = expand_mood_frequency(&view);
        // 2×3 + 1×1; the last two records lack one of the fields.
        assert_eq!(pairs.len(), 7);
        assert_eq!(pairs[0], ("Happy".to_string(), "Daily".to_string()));
        assert_eq!(pairs[2], ("Happy".to_string(), "Office".to_string()));
        assert_eq!(pairs[3], ("Sad".to_string(), "Daily".to_string()));

        let rows = mood_frequency_counts(&view);
        assert_eq!(rows.iter().map(|r| r.count).sum::<usize>(), pairs.len());
        let happy_daily = rows
            .iter()
            .find(|r| r.mood == "Happy" && r.frequency == "Daily")
            .unwrap();
        assert_eq!(happy_daily.count, 1);
        let keys: Vec<(&str, &str)> = rows.iter().map(|r| (r.mood.as_str(), r.frequency.as_str())).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn trailing_comma_yields_empty_sub_value() {
        let t = table(vec![raw("", "", "Happy,", "Daily")]);
        let rows = mood_frequency_counts(&FilteredView::all(&t));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mood, "");
        assert_eq!(rows[1].mood, "Happy");
    }

    #[test]
    fn aggregation_is_idempotent() {
        let t = table(vec![
            raw("Less than 6 months", "Duo plan- Rs 149/month", "Happy, Sad", "Daily"),
            raw("More than 2 years", "Student Plan-Rs 59/month", "Sad", "Night, Daily"),
        ]);
        let sel = FilterSelection::default();
        let first = FilteredView::new(&t, &sel);
        let second = FilteredView::new(&t, &sel);
        assert_eq!(first.indices(), second.indices());
        assert_eq!(usage_plan_counts(&first), usage_plan_counts(&second));
        assert_eq!(mood_frequency_counts(&first), mood_frequency_counts(&second));
    }
}
