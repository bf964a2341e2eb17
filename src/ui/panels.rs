use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{AgeFilter, GenderFilter, PlanFilter, RATING_RANGE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Select Age Range:");
            egui::ComboBox::from_id_salt("age_filter")
                .selected_text(state.selection.age.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for opt in AgeFilter::options() {
                        changed |= ui
                            .selectable_value(&mut state.selection.age, opt, opt.label())
                            .changed();
                    }
                });
            ui.add_space(6.0);

            ui.strong("Select Gender:");
            egui::ComboBox::from_id_salt("gender_filter")
                .selected_text(state.selection.gender.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for opt in GenderFilter::OPTIONS {
                        changed |= ui
                            .selectable_value(&mut state.selection.gender, opt, opt.label())
                            .changed();
                    }
                });
            ui.add_space(6.0);

            ui.strong("Subscription Plan:");
            egui::ComboBox::from_id_salt("plan_filter")
                .selected_text(state.selection.plan.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for opt in PlanFilter::OPTIONS {
                        changed |= ui
                            .selectable_value(&mut state.selection.plan, opt, opt.label())
                            .changed();
                    }
                });
            ui.add_space(6.0);

            ui.strong("Music Recommendation System Rating:");
            ui.horizontal(|ui: &mut Ui| {
                for rating in RATING_RANGE {
                    let mut checked = state.selection.ratings.contains(&rating);
                    if ui.checkbox(&mut checked, rating.to_string()).changed() {
                        // toggle_rating refreshes on its own
                        state.toggle_rating(rating);
                    }
                }
            });
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_ratings();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_ratings();
                }
            });
            if state.selection.ratings.is_empty() {
                ui.label(RichText::new("No rating selected: every respondent is hidden.").weak());
            }
        });

    if changed {
        state.refresh();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.charts.is_some(), egui::Button::new("Export charts…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(charts) = &state.charts {
            ui.label(format!(
                "{} respondents loaded, {} selected",
                state.total(),
                charts.selected
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .add_filter("JSON", &["json"])
        .set_file_name("charts.json")
        .save_file();

    if let Some(path) = file {
        match state.export(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
