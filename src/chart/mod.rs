//! Chart layer: turns aggregate views into declarative [`ChartSpec`]s.
//!
//! [`render`] is the whole filter → aggregate → chart pipeline and is
//! a pure function of the table and the selection; the UI calls it on every
//! filter change and the headless export calls it once.

pub mod builder;
pub mod spec;

use serde::Serialize;

use crate::data::aggregate::{mood_frequency_counts, usage_plan_counts, AggregateRow};
use crate::data::filter::{FilterSelection, FilteredView};
use crate::data::model::SurveyTable;

pub use spec::ChartSpec;

/// Both rendered charts plus the figures shown alongside them.
#[derive(Debug, Clone)]
pub struct Charts {
    pub bar: ChartSpec,
    pub bubble: ChartSpec,
    /// Rows behind the bar chart, listed in the summary table.
    pub bar_rows: Vec<AggregateRow>,
    pub selected: usize,
}

/// Run the full pipeline, filtering and aggregating once.
pub fn render(table: &SurveyTable, selection: &FilterSelection) -> Charts {
    let view = FilteredView::new(table, selection);
    let bar_rows = usage_plan_counts(&view);
    let bubble_rows = mood_frequency_counts(&view);
    log::debug!(
        "{} of {} respondents selected → {} bar rows, {} bubble rows",
        view.len(),
        table.len(),
        bar_rows.len(),
        bubble_rows.len()
    );
    Charts {
        bar: builder::bar_chart(&bar_rows),
        bubble: builder::bubble_chart(&bubble_rows),
        bar_rows,
        selected: view.len(),
    }
}

/// Both charts plus the selection that produced them, as written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct ChartExport<'a> {
    pub selection: &'a FilterSelection,
    pub bar: &'a ChartSpec,
    pub bubble: &'a ChartSpec,
}

/// Serialize both charts as pretty-printed JSON.
pub fn write_export<W: std::io::Write>(
    writer: W,
    selection: &FilterSelection,
    bar: &ChartSpec,
    bubble: &ChartSpec,
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(
        writer,
        &ChartExport {
            selection,
            bar,
            bubble,
        },
    )
}
