use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::chart::{self, Charts};
use crate::data::filter::{FilterSelection, RATING_RANGE};
use crate::data::model::SurveyTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded survey table (None until user loads a file). Never mutated.
    pub table: Option<Arc<SurveyTable>>,

    /// Current widget values.
    pub selection: FilterSelection,

    /// Charts for the current selection (cached until the selection changes).
    pub charts: Option<Charts>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded table, keep the current filters and re-render.
    pub fn set_table(&mut self, table: SurveyTable) {
        self.table = Some(Arc::new(table));
        self.status_message = None;
        self.refresh();
    }

    /// Load a file and ingest it, or leave the previous table in place and
    /// show the error.
    pub fn open(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(table) => {
                if table.is_empty() {
                    log::warn!("{} holds no respondents", path.display());
                } else {
                    log::info!("Loaded {} respondents from {}", table.len(), path.display());
                }
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute both charts after a filter change.
    pub fn refresh(&mut self) {
        let Some(table) = &self.table else {
            self.charts = None;
            return;
        };
        self.charts = Some(chart::render(table, &self.selection));
    }

    /// Write the current charts and selection as JSON.
    pub fn export(&self, path: &Path) -> Result<()> {
        let charts = self.charts.as_ref().context("no dataset loaded")?;
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        chart::write_export(&mut writer, &self.selection, &charts.bar, &charts.bubble)
            .context("writing chart JSON")?;
        writer.flush().context("flushing chart JSON")?;
        log::info!("Exported charts for {} respondents to {}", charts.selected, path.display());
        Ok(())
    }

    /// Toggle a single rating in the rating filter.
    pub fn toggle_rating(&mut self, rating: u8) {
        if !self.selection.ratings.remove(&rating) {
            self.selection.ratings.insert(rating);
        }
        self.refresh();
    }

    /// Select every rating.
    pub fn select_all_ratings(&mut self) {
        self.selection.ratings = RATING_RANGE.collect();
        self.refresh();
    }

    /// Deselect every rating; all respondents are then hidden.
    pub fn select_no_ratings(&mut self) {
        self.selection.ratings.clear();
        self.refresh();
    }

    /// Number of respondents in the loaded table.
    pub fn total(&self) -> usize {
        self.table.as_ref().map_or(0, |t| t.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::GenderFilter;
    use crate::data::model::RawRecord;
    use crate::data::normalize::normalize;

    fn table() -> SurveyTable {
        let rec = |gender: &str, rating: &str| {
            normalize(RawRecord {
                age: "20 to 35".into(),
                gender: gender.into(),
                subscription_plan: "Free".into(),
                rating: rating.into(),
                usage_period: "Less than 6 months".into(),
                preferred_plan: "Student Plan-Rs 59/month".into(),
                influential_mood: "Happy".into(),
                listening_frequency: "Daily".into(),
            })
        };
        SurveyTable::from_records(vec![rec("Female", "5"), rec("Male", "2"), rec("Male", "5")])
    }

    #[test]
    fn refresh_tracks_selection() {
        let mut state = AppState::default();
        assert!(state.charts.is_none());

        state.set_table(table());
        assert_eq!(state.charts.as_ref().map(|c| c.selected), Some(3));

        state.selection.gender = GenderFilter::Male;
        state.refresh();
        assert_eq!(state.charts.as_ref().map(|c| c.selected), Some(2));

        state.toggle_rating(2);
        let charts = state.charts.as_ref().unwrap();
        assert_eq!(charts.selected, 1);
        assert_eq!(charts.bar_rows[0].count, 1);
        assert_eq!(charts.bar_rows[0].percentage, 100.0);
    }

    #[test]
    fn refresh_caches_one_pipeline_run() {
        let mut state = AppState::default();
        state.set_table(table());
        state.selection.gender = GenderFilter::Male;
        state.refresh();

        let charts = state.charts.as_ref().unwrap();
        let fresh = chart::render(&table(), &state.selection);
        assert_eq!(charts.bar, fresh.bar);
        assert_eq!(charts.bubble, fresh.bubble);
        assert_eq!(charts.selected, 2);
        assert_eq!(charts.bar_rows.len(), 1);
        assert_eq!(charts.bar_rows[0].count, 2);
    }

    #[test]
    fn header_only_file_loads_an_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(
            &path,
            "Age,Gender,spotify_usage_period,spotify_subscription_plan,preffered_premium_plan,\
             music_Influencial_mood,music_lis_frequency,music_recc_rating\n",
        )
        .unwrap();

        let mut state = AppState::default();
        state.open(&path);
        assert_eq!(state.total(), 0);
        assert!(state.status_message.is_none());
        assert_eq!(state.charts.as_ref().map(|c| c.selected), Some(0));
    }

    #[test]
    fn clearing_ratings_empties_the_charts() {
        let mut state = AppState::default();
        state.set_table(table());
        state.select_no_ratings();
        let charts = state.charts.as_ref().unwrap();
        assert_eq!(charts.selected, 0);
        assert!(charts.bar.marks.is_empty());
        assert!(charts.bubble.marks.is_empty());

        state.select_all_ratings();
        assert_eq!(state.charts.as_ref().unwrap().selected, 3);
        assert_eq!(state.total(), 3);
    }

    #[test]
    fn export_requires_a_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts.json");

        let mut state = AppState::default();
        assert!(state.export(&path).is_err());

        state.set_table(table());
        state.export(&path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["bar"]["marks"]["series"][0]["bars"][0]["label"], "3");
    }

    #[test]
    fn failed_open_keeps_previous_table() {
        let mut state = AppState::default();
        state.set_table(table());
        state.open(Path::new("/nonexistent/survey.csv"));
        assert_eq!(state.total(), 3);
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error"));
    }
}
