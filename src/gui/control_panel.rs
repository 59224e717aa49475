//! Control Panel Widget
//! Left side panel: data source, worldwide banner, country picker, top ten.

use crate::stats::{CountrySummary, WorldwideDelta, WorldwideTotals};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Render an unknown aggregate as a placeholder instead of zero.
pub fn fmt_count(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.0}"))
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn fmt_rate(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Actions the panel hands back to the app.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    None,
    BrowseCsv,
    SelectCountry(String),
    SelectRank(usize),
}

/// Left side control panel with file selection and the ranking views.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    /// Dropdown entries, in ranked order.
    pub countries: Vec<String>,
    pub top_ten: Vec<CountrySummary>,
    pub worldwide: Option<WorldwideTotals>,
    pub delta: Option<WorldwideDelta>,
    pub selected_country: String,
    pub status: String,
    pub is_loading: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            countries: Vec::new(),
            top_ten: Vec::new(),
            worldwide: None,
            delta: None,
            selected_country: String::new(),
            status: "Ready".to_string(),
            is_loading: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the ranking views after a successful load.
    pub fn set_results(
        &mut self,
        countries: Vec<String>,
        top_ten: Vec<CountrySummary>,
        worldwide: WorldwideTotals,
        delta: Option<WorldwideDelta>,
    ) {
        self.countries = countries;
        self.top_ten = top_ten;
        self.worldwide = Some(worldwide);
        self.delta = delta;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> PanelAction {
        let mut action = PanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🦠 COVID Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("A country-wise view")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = PanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Worldwide banner =====
        if let Some(worldwide) = &self.worldwide {
            ui.label(RichText::new("🌍 Worldwide").size(14.0).strong());
            ui.add_space(5.0);

            egui::Grid::new("worldwide_totals")
                .striped(true)
                .min_col_width(110.0)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Total cases").size(12.0));
                    ui.label(RichText::new(fmt_count(Some(worldwide.total_cases))).size(12.0));
                    ui.end_row();
                    ui.label(RichText::new("Total deaths").size(12.0));
                    ui.label(RichText::new(fmt_count(Some(worldwide.total_deaths))).size(12.0));
                    ui.end_row();
                    ui.label(RichText::new("Cases / million").size(12.0));
                    ui.label(RichText::new(fmt_rate(worldwide.cases_per_million)).size(12.0));
                    ui.end_row();
                    ui.label(RichText::new("Deaths / million").size(12.0));
                    ui.label(RichText::new(fmt_rate(worldwide.deaths_per_million)).size(12.0));
                    ui.end_row();

                    // past-24-hrs movement on the configured reference date
                    if let Some(delta) = &self.delta {
                        let percent =
                            |p: Option<f64>| p.map(|v| format!(" ({v:.3}%)")).unwrap_or_default();

                        ui.label(
                            RichText::new(format!("New cases {}", delta.date.format("%m-%d")))
                                .size(12.0),
                        );
                        ui.label(
                            RichText::new(format!(
                                "+{}{}",
                                fmt_count(Some(delta.new_cases)),
                                percent(delta.cases_percent(worldwide))
                            ))
                            .size(12.0),
                        );
                        ui.end_row();

                        ui.label(
                            RichText::new(format!("New deaths {}", delta.date.format("%m-%d")))
                                .size(12.0),
                        );
                        ui.label(
                            RichText::new(format!(
                                "+{}{}",
                                fmt_count(Some(delta.new_deaths)),
                                percent(delta.deaths_percent(worldwide))
                            ))
                            .size(12.0),
                        );
                        ui.end_row();
                    }
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);
        }

        // ===== Country picker =====
        if !self.countries.is_empty() {
            ui.label(RichText::new("🔎 Country").size(14.0).strong());
            ui.add_space(5.0);

            ComboBox::from_id_salt("country_picker")
                .width(220.0)
                .selected_text(&self.selected_country)
                .show_ui(ui, |ui| {
                    for country in &self.countries {
                        if ui
                            .selectable_label(&self.selected_country == country, country)
                            .clicked()
                        {
                            action = PanelAction::SelectCountry(country.clone());
                        }
                    }
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);
        }

        // ===== Top ten table =====
        if !self.top_ten.is_empty() {
            ui.label(RichText::new("🏆 Top Ten by Cases").size(14.0).strong());
            ui.add_space(5.0);

            egui::Grid::new("top_ten_table")
                .striped(true)
                .min_col_width(40.0)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("#").strong().size(11.0));
                    ui.label(RichText::new("Country").strong().size(11.0));
                    ui.label(RichText::new("Max Cases").strong().size(11.0));
                    ui.end_row();

                    for (i, summary) in self.top_ten.iter().enumerate() {
                        let is_selected = summary.country == self.selected_country;
                        ui.label(RichText::new(format!("{}", i + 1)).size(11.0));
                        if ui
                            .selectable_label(is_selected, RichText::new(&summary.country).size(11.0))
                            .clicked()
                        {
                            action = PanelAction::SelectRank(i);
                        }
                        ui.label(RichText::new(fmt_count(summary.total_cases)).size(11.0));
                        ui.end_row();
                    }
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);
        }

        // ===== Status =====
        ui.horizontal(|ui| {
            if self.is_loading {
                ui.spinner();
            }
            let status_color = if self.status.contains("Error") {
                Color32::from_rgb(220, 53, 69)
            } else if self.status.contains("Loaded") {
                Color32::from_rgb(40, 167, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }
}
