use eframe::egui::{self, Align2, Color32, RichText, ScrollArea, Sense, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoint, Points, Text};

use crate::chart::spec::{ChartSpec, ColorScale, Marks, TextAnchor};
use crate::color::{parse_color, sample_scale};
use crate::data::aggregate::AggregateRow;
use crate::state::AppState;

/// Fraction of a category slot taken by a group of bars.
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Chart panels (central panel)
// ---------------------------------------------------------------------------

/// Render both charts and the plan summary table in the central panel.
pub fn chart_panels(ui: &mut Ui, state: &AppState) {
    let Some(charts) = &state.charts else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a survey file to view charts  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            chart_frame(ui, &charts.bar, bar_plot);
            ui.add_space(12.0);
            chart_frame(ui, &charts.bubble, bubble_plot);
            ui.add_space(12.0);

            egui::CollapsingHeader::new(RichText::new("Plan preference by tenure").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| summary_table(ui, &charts.bar_rows));
        });
}

/// Paper background, title, then the plot itself.
fn chart_frame(ui: &mut Ui, spec: &ChartSpec, plot: fn(&mut Ui, &ChartSpec)) {
    let paper = parse_color(&spec.layout.paper_background, Color32::WHITE);
    let font = parse_color(&spec.layout.font_color, Color32::DARK_GRAY);

    egui::Frame::default()
        .fill(paper)
        .inner_margin(8.0)
        .show(ui, |ui: &mut Ui| {
            let title = RichText::new(&spec.title.text)
                .size(spec.title.font_size)
                .color(font);
            match spec.title.anchor {
                TextAnchor::Center => {
                    ui.vertical_centered(|ui: &mut Ui| ui.label(title));
                }
            }

            if spec.marks.is_empty() {
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.label(RichText::new("No respondents match the current filters.").color(font));
                });
            }
            plot(ui, spec);
        });
}

/// Label for a categorical axis mark; non-integer marks stay blank.
fn category_label(categories: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Grouped bar chart
// ---------------------------------------------------------------------------

fn bar_plot(ui: &mut Ui, spec: &ChartSpec) {
    let Marks::Bars {
        legend_title,
        series,
        ..
    } = &spec.marks
    else {
        return;
    };
    let font = parse_color(&spec.layout.font_color, Color32::DARK_GRAY);
    let categories = spec.x_axis.scale.categories().to_vec();
    let n_categories = categories.len().max(1) as f64;

    let n_series = series.len().max(1) as f64;
    let bar_width = GROUP_WIDTH / n_series;

    ui.label(RichText::new(legend_title).small().color(font));

    Plot::new("bar_chart")
        .height(spec.layout.height)
        .legend(Legend::default())
        .x_axis_label(spec.x_axis.title.as_str())
        .y_axis_label(spec.y_axis.title.as_str())
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&categories, mark.value))
        .include_x(-0.5)
        .include_x(n_categories - 0.5)
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, s) in series.iter().enumerate() {
                // Centre the group on the category position.
                let offset = (i as f64 - (n_series - 1.0) / 2.0) * bar_width;
                let color = parse_color(&s.color, Color32::GRAY);

                let bars: Vec<Bar> = s
                    .bars
                    .iter()
                    .map(|b| {
                        Bar::new(b.category as f64 + offset, b.value)
                            .width(bar_width * 0.95)
                            .name(&b.hover)
                            .fill(color)
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(&s.name)
                        .color(color)
                        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| bar.name.clone())),
                );

                for b in &s.bars {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(b.category as f64 + offset, b.value),
                            RichText::new(&b.label).color(font),
                        )
                        .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Bubble chart
// ---------------------------------------------------------------------------

fn bubble_plot(ui: &mut Ui, spec: &ChartSpec) {
    let Marks::Bubbles {
        color_scale,
        points,
        ..
    } = &spec.marks
    else {
        return;
    };
    let font = parse_color(&spec.layout.font_color, Color32::DARK_GRAY);
    let x_categories = spec.x_axis.scale.categories().to_vec();
    let y_categories = spec.y_axis.scale.categories().to_vec();
    let x_max = x_categories.len().max(1) as f64 - 0.5;
    let y_max = y_categories.len().max(1) as f64 - 0.5;

    color_bar(ui, color_scale, font);

    Plot::new("bubble_chart")
        .height(spec.layout.height)
        .x_axis_label(spec.x_axis.title.as_str())
        .y_axis_label(spec.y_axis.title.as_str())
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&x_categories, mark.value))
        .y_axis_formatter(move |mark: GridMark, _range| category_label(&y_categories, mark.value))
        .include_x(-0.5)
        .include_x(x_max)
        .include_y(-0.5)
        .include_y(y_max)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for p in points {
                plot_ui.points(
                    Points::new(vec![[p.x as f64, p.y as f64]])
                        .radius(p.size / 2.0)
                        .color(sample_scale(color_scale, p.value))
                        .name(&p.hover),
                );
            }
        });
}

/// Horizontal gradient strip with the scale title and its min/max values.
fn color_bar(ui: &mut Ui, scale: &ColorScale, font: Color32) {
    const SEGMENTS: usize = 32;

    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(&scale.title).size(14.0).color(font));
        ui.label(RichText::new(format!("{}", scale.min)).color(font));

        let (rect, _) = ui.allocate_exact_size(egui::vec2(160.0, 12.0), Sense::hover());
        let painter = ui.painter_at(rect);
        let step = rect.width() / SEGMENTS as f32;
        for i in 0..SEGMENTS {
            let t = (i as f64 + 0.5) / SEGMENTS as f64;
            let value = scale.min + t * (scale.max - scale.min);
            let seg = egui::Rect::from_min_size(
                rect.min + egui::vec2(i as f32 * step, 0.0),
                egui::vec2(step + 0.5, rect.height()),
            );
            painter.rect_filled(seg, 0.0, sample_scale(scale, value));
        }

        ui.label(RichText::new(format!("{}", scale.max)).color(font));
    });
}

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

fn summary_table(ui: &mut Ui, rows: &[AggregateRow]) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(200.0))
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Usage Period", "Preferred Plan", "Users", "Share"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for r in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(r.usage_period.label());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.preferred_plan.label());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(r.count.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}%", r.percentage));
                    });
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_marks() {
        let cats = vec!["Daily".to_string(), "Night".to_string()];
        assert_eq!(category_label(&cats, 0.0), "Daily");
        assert_eq!(category_label(&cats, 1.0), "Night");
        assert_eq!(category_label(&cats, 0.5), "");
        assert_eq!(category_label(&cats, -1.0), "");
        assert_eq!(category_label(&cats, 2.0), "");
    }
}
