use std::collections::BTreeSet;

use crate::data::aggregate::{AggregateRow, MoodFrequencyRow};
use crate::data::model::{PremiumPlan, UsagePeriod};

use super::spec::{
    Axis, AxisScale, Bar, BarMode, BarSeries, BubblePoint, ChartSpec, ColorScale, Layout, Marks,
    Title,
};

/// Series colors, indexed by [`PremiumPlan::index`].
pub const PLAN_COLORS: [&str; 4] = ["#1DB954", "#191414", "#3C3C3C", "#B3B3B3"];

/// Near-black to green.
pub const COUNT_SCALE: [&str; 2] = ["#191414", "#1DB954"];

pub const BUBBLE_SIZE_MAX: f32 = 60.0;

const TITLE_FONT_SIZE: f32 = 20.0;

// ---------------------------------------------------------------------------
// Bar chart: preferred plan by tenure
// ---------------------------------------------------------------------------

pub fn bar_chart(rows: &[AggregateRow]) -> ChartSpec {
    let series = PremiumPlan::ALL
        .into_iter()
        .filter_map(|plan| {
            let bars: Vec<Bar> = rows
                .iter()
                .filter(|r| r.preferred_plan == plan)
                .map(|r| Bar {
                    category: r.usage_period.index(),
                    value: r.count as f64,
                    label: r.count.to_string(),
                    hover: format!(
                        "{}\n{}\nUsers: {}\nPercentage: {:.2}%",
                        r.usage_period, plan, r.count, r.percentage
                    ),
                })
                .collect();
            (!bars.is_empty()).then(|| BarSeries {
                name: plan.label().to_string(),
                color: PLAN_COLORS[plan.index()].to_string(),
                bars,
            })
        })
        .collect();

    ChartSpec {
        title: Title::centered("Preferred Spotify Premium Plans by User Tenure", TITLE_FONT_SIZE),
        x_axis: Axis {
            title: "Usage Period".to_string(),
            scale: AxisScale::Categorical {
                categories: UsagePeriod::ALL.iter().map(|p| p.label().to_string()).collect(),
            },
        },
        y_axis: Axis {
            title: "Number of Users".to_string(),
            scale: AxisScale::Linear,
        },
        marks: Marks::Bars {
            mode: BarMode::Group,
            legend_title: "Preferred Premium Plan".to_string(),
            series,
        },
        layout: Layout {
            height: 500.0,
            plot_background: "#F9F9F9".to_string(),
            paper_background: "#F9F9F9".to_string(),
            font_color: "#3C3C3C".to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// Bubble chart: influential moods by listening context
// ---------------------------------------------------------------------------

pub fn bubble_chart(rows: &[MoodFrequencyRow]) -> ChartSpec {
    let frequencies: Vec<String> = rows
        .iter()
        .map(|r| r.frequency.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let moods: Vec<String> = rows
        .iter()
        .map(|r| r.mood.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let min = rows.iter().map(|r| r.count).min().unwrap_or(0) as f64;
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0) as f64;

    let points = rows
        .iter()
        .filter_map(|r| {
            let x = frequencies.binary_search(&r.frequency).ok()?;
            let y = moods.binary_search(&r.mood).ok()?;
            Some(BubblePoint {
                x,
                y,
                value: r.count as f64,
                size: bubble_size(r.count as f64, max),
                hover: format!(
                    "Listening Frequency: {}\nInfluential Mood: {}\nUser Count: {}",
                    r.frequency, r.mood, r.count
                ),
            })
        })
        .collect();

    ChartSpec {
        title: Title::centered("Influential Moods Across Listening Contexts", TITLE_FONT_SIZE),
        x_axis: Axis {
            title: "Listening Frequency".to_string(),
            scale: AxisScale::Categorical {
                categories: frequencies,
            },
        },
        y_axis: Axis {
            title: "Influential Mood".to_string(),
            scale: AxisScale::Categorical { categories: moods },
        },
        marks: Marks::Bubbles {
            size_max: BUBBLE_SIZE_MAX,
            color_scale: ColorScale {
                title: "User Count".to_string(),
                stops: COUNT_SCALE.iter().map(|c| c.to_string()).collect(),
                min,
                max,
            },
            points,
        },
        layout: Layout {
            height: 650.0,
            plot_background: "white".to_string(),
            paper_background: "white".to_string(),
            font_color: "#333333".to_string(),
        },
    }
}

/// Area-proportional sizing: the largest count gets `BUBBLE_SIZE_MAX`.
fn bubble_size(count: f64, max: f64) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    BUBBLE_SIZE_MAX * (count / max).sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar_row(usage: UsagePeriod, plan: PremiumPlan, count: usize, pct: f64) -> AggregateRow {
        AggregateRow {
            usage_period: usage,
            preferred_plan: plan,
            count,
            percentage: pct,
        }
    }

    fn mood_row(mood: &str, freq: &str, count: usize) -> MoodFrequencyRow {
        MoodFrequencyRow {
            mood: mood.to_string(),
            frequency: freq.to_string(),
            count,
        }
    }

    #[test]
    fn bar_series_follow_plan_order_and_colors() {
        let rows = vec![
            bar_row(UsagePeriod::LessThan6Months, PremiumPlan::Family, 1, 25.0),
            bar_row(UsagePeriod::MoreThan2Years, PremiumPlan::Student, 3, 75.0),
        ];
        let spec = bar_chart(&rows);
        let Marks::Bars { mode, series, .. } = &spec.marks else {
            panic!("expected bars");
        };
        assert_eq!(*mode, BarMode::Group);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "Student Plan-Rs 59/month");
        assert_eq!(series[0].color, "#1DB954");
        assert_eq!(series[0].bars[0].category, 3);
        assert_eq!(series[0].bars[0].label, "3");
        assert!(series[0].bars[0].hover.contains("75.00%"));
        assert_eq!(series[1].name, "Family Plan-Rs 179/month");
        assert_eq!(series[1].color, "#B3B3B3");
        assert_eq!(spec.x_axis.scale.categories().len(), 4);
        assert_eq!(spec.x_axis.scale.categories()[0], "Less than 6 months");
        assert_eq!(spec.title.text, "Preferred Spotify Premium Plans by User Tenure");
        assert_eq!(spec.title.x, 0.5);
        assert_eq!(spec.x_axis.title, "Usage Period");
        assert_eq!(spec.y_axis.title, "Number of Users");
    }

    #[test]
    fn bubble_encodings_scale_with_count() {
        let rows = vec![
            mood_row("Happy", "Daily", 4),
            mood_row("Sad", "Daily", 1),
            mood_row("Sad", "Night", 2),
        ];
        let spec = bubble_chart(&rows);
        assert_eq!(spec.x_axis.scale.categories(), ["Daily", "Night"]);
        assert_eq!(spec.y_axis.scale.categories(), ["Happy", "Sad"]);
        let Marks::Bubbles {
            size_max,
            color_scale,
            points,
        } = &spec.marks
        else {
            panic!("expected bubbles");
        };
        assert_eq!(*size_max, 60.0);
        assert_eq!(color_scale.title, "User Count");
        assert_eq!(color_scale.stops, ["#191414", "#1DB954"]);
        assert_eq!((color_scale.min, color_scale.max), (1.0, 4.0));
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].size, 60.0);
        assert_eq!(points[1].size, 30.0);
        assert_eq!((points[2].x, points[2].y), (1, 1));
        assert_eq!(color_scale.fraction(4.0), 1.0);
        assert_eq!(color_scale.fraction(1.0), 0.0);
        assert_eq!(spec.x_axis.title, "Listening Frequency");
        assert_eq!(spec.y_axis.title, "Influential Mood");
    }

    #[test]
    fn empty_aggregates_give_empty_specs() {
        let bar = bar_chart(&[]);
        assert!(bar.marks.is_empty());
        let Marks::Bars { series, .. } = &bar.marks else {
            panic!("expected bars");
        };
        assert!(series.is_empty());

        let bubble = bubble_chart(&[]);
        assert!(bubble.marks.is_empty());
        assert!(bubble.x_axis.scale.categories().is_empty());
        assert_eq!(bubble.title.text, "Influential Moods Across Listening Contexts");
    }
}
