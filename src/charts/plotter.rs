//! Chart Plotter Module
//! Time-series line charts for the detail view, drawn with egui_plot.

use crate::data::{date_from_days, date_to_days, Metric};
use crate::stats::CountrySelection;
use chrono::NaiveDate;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

/// One color per metric, in `Metric::ALL` order.
pub const METRIC_PALETTE: [Color32; 4] = [
    Color32::from_rgb(52, 152, 219),  // total cases - blue
    Color32::from_rgb(243, 156, 18),  // new cases - orange
    Color32::from_rgb(231, 76, 60),   // total deaths - red
    Color32::from_rgb(155, 89, 182),  // new deaths - purple
];

/// Blue shades for the top-ten overview lines, lightest for rank one.
pub const OVERVIEW_PALETTE: [Color32; 10] = [
    Color32::from_rgb(0xe3, 0xf2, 0xfd),
    Color32::from_rgb(0xbb, 0xde, 0xfb),
    Color32::from_rgb(0x90, 0xca, 0xf9),
    Color32::from_rgb(0x64, 0xb5, 0xf6),
    Color32::from_rgb(0x42, 0xa5, 0xf5),
    Color32::from_rgb(0x21, 0x96, 0xf3),
    Color32::from_rgb(0x1e, 0x88, 0xe5),
    Color32::from_rgb(0x19, 0x76, 0xd2),
    Color32::from_rgb(0x15, 0x65, 0xc0),
    Color32::from_rgb(0x0d, 0x47, 0xa1),
];

/// One country's line on the multi-country overview chart.
#[derive(Debug, Clone)]
pub struct CountrySeries {
    pub country: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Creates per-country metric charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn metric_color(metric: Metric) -> Color32 {
        let idx = Metric::ALL
            .iter()
            .position(|m| *m == metric)
            .unwrap_or_default();
        METRIC_PALETTE[idx % METRIC_PALETTE.len()]
    }

    /// Draw the overview chart: one line per ranked country, legend inside
    /// the plot like the per-country charts.
    pub fn draw_overview_chart(
        ui: &mut egui::Ui,
        series: &[CountrySeries],
        metric: Metric,
        height: f32,
    ) {
        Plot::new(format!("overview_{}", metric.key()))
            .height(height)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_formatter(|mark, _range| {
                date_from_days(mark.value.round() as i32)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .y_axis_label(metric.label())
            .show(ui, |plot_ui| {
                for (rank, country_series) in series.iter().enumerate() {
                    let points: Vec<[f64; 2]> = country_series
                        .points
                        .iter()
                        .map(|&(date, value)| [date_to_days(date) as f64, value])
                        .collect();
                    if points.is_empty() {
                        continue;
                    }
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(OVERVIEW_PALETTE[rank % OVERVIEW_PALETTE.len()])
                            .width(1.5)
                            .name(&country_series.country),
                    );
                }
            });
    }

    /// Draw one metric's series as a markers+lines chart with a date axis.
    /// Falls back to a placeholder label when the metric is all-null.
    pub fn draw_metric_chart(
        ui: &mut egui::Ui,
        selection: &CountrySelection,
        metric: Metric,
        height: f32,
    ) {
        let points: Vec<[f64; 2]> = selection
            .series(metric)
            .map(|(date, value)| [date_to_days(date) as f64, value])
            .collect();

        if points.is_empty() {
            ui.add_sized(
                [ui.available_width(), height],
                egui::Label::new(
                    RichText::new(format!("No {} data", metric.label())).color(Color32::GRAY),
                ),
            );
            return;
        }

        let color = Self::metric_color(metric);

        Plot::new(format!("{}_{}", metric.key(), selection.summary.country))
            .height(height)
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| {
                date_from_days(mark.value.round() as i32)
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .y_axis_label(metric.label())
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(color)
                        .width(1.5)
                        .name(metric.label()),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(2.0)
                        .color(color),
                );
            });
    }
}
