//! Chart Viewer Widget
//! Central panel: top-ten overview chart, summary header, reference-date
//! snapshot and one line chart per metric for the selected country.

use crate::charts::{ChartPlotter, CountrySeries};
use crate::data::Metric;
use crate::gui::control_panel::{fmt_count, fmt_rate};
use crate::stats::CountrySelection;
use chrono::NaiveDate;
use egui::{Color32, RichText, ScrollArea};

const CHART_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 260.0;
const OVERVIEW_HEIGHT: f32 = 320.0;
const CARD_MIN_WIDTH: f32 = 420.0;

/// Scrollable detail area: the overview lines are set once per load, the
/// per-country cards follow the selection. Charts wrap into columns based on
/// the available width.
#[derive(Default)]
pub struct ChartViewer {
    overview: Vec<CountrySeries>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.overview.clear();
    }

    /// Set the top-ranked series shown on the overview chart.
    pub fn set_overview(&mut self, overview: Vec<CountrySeries>) {
        self.overview = overview;
    }

    pub fn show(
        &self,
        ui: &mut egui::Ui,
        selection: Option<&CountrySelection>,
        reference_date: Option<NaiveDate>,
    ) {
        let Some(selection) = selection else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if !self.overview.is_empty() {
                    self.draw_overview_card(ui);
                    ui.add_space(CHART_SPACING);
                }

                Self::draw_header(ui, selection, reference_date);
                ui.add_space(CHART_SPACING);

                // Metric cards wrap into as many columns as fit.
                let avail_width = ui.available_width();
                let num_columns =
                    ((avail_width / (CARD_MIN_WIDTH + CHART_SPACING)).floor() as usize).max(1);
                let card_width = (avail_width - num_columns as f32 * CHART_SPACING)
                    / num_columns as f32;

                for row in Metric::ALL.chunks(num_columns) {
                    ui.horizontal(|ui| {
                        for &metric in row {
                            Self::draw_metric_card(ui, selection, metric, card_width);
                            ui.add_space(CHART_SPACING);
                        }
                    });
                    ui.add_space(CHART_SPACING);
                }
            });
    }

    fn draw_overview_card(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width() - 20.0);
                ui.label(
                    RichText::new("Top Ten Countries - Total Cases")
                        .size(16.0)
                        .strong()
                        .color(Color32::from_rgb(100, 149, 237)),
                );
                ui.add_space(6.0);
                ChartPlotter::draw_overview_chart(
                    ui,
                    &self.overview,
                    Metric::TotalCases,
                    OVERVIEW_HEIGHT,
                );
            });
    }

    fn draw_header(
        ui: &mut egui::Ui,
        selection: &CountrySelection,
        reference_date: Option<NaiveDate>,
    ) {
        let summary = &selection.summary;

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(&summary.country)
                        .size(20.0)
                        .strong()
                        .color(Color32::from_rgb(100, 149, 237)),
                );
                ui.add_space(6.0);

                egui::Grid::new("country_summary")
                    .min_col_width(120.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Max total cases").size(12.0));
                        ui.label(RichText::new(fmt_count(summary.total_cases)).size(12.0));
                        ui.label(RichText::new("Cases / million").size(12.0));
                        ui.label(RichText::new(fmt_rate(summary.cases_per_million())).size(12.0));
                        ui.end_row();

                        ui.label(RichText::new("Max total deaths").size(12.0));
                        ui.label(RichText::new(fmt_count(summary.total_deaths)).size(12.0));
                        ui.label(RichText::new("Deaths / million").size(12.0));
                        ui.label(RichText::new(fmt_rate(summary.deaths_per_million())).size(12.0));
                        ui.end_row();
                    });

                if let Some(reference) = &selection.reference {
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(format!("On {}", reference.date.format("%Y-%m-%d")))
                            .size(12.0)
                            .strong(),
                    );
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!(
                                "cases {} (+{})",
                                fmt_count(reference.total_cases),
                                fmt_count(reference.new_cases)
                            ))
                            .size(12.0),
                        );
                        ui.add_space(12.0);
                        ui.label(
                            RichText::new(format!(
                                "deaths {} (+{})",
                                fmt_count(reference.total_deaths),
                                fmt_count(reference.new_deaths)
                            ))
                            .size(12.0),
                        );
                    });
                } else if let Some(date) = reference_date {
                    // Missing snapshot row: say so instead of dropping the
                    // section silently.
                    if let Err(e) = selection.snapshot_on(date) {
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new(e.to_string())
                                .size(12.0)
                                .italics()
                                .color(Color32::GRAY),
                        );
                    }
                }
            });
    }

    fn draw_metric_card(
        ui: &mut egui::Ui,
        selection: &CountrySelection,
        metric: Metric,
        width: f32,
    ) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ChartPlotter::metric_color(metric)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(width - 20.0);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(metric.label())
                            .size(14.0)
                            .strong()
                            .color(ChartPlotter::metric_color(metric)),
                    );
                    ui.add_space(6.0);
                    ChartPlotter::draw_metric_chart(ui, selection, metric, CHART_HEIGHT);
                });
            });
    }
}
