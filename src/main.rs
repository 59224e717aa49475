//! Coviz - COVID-19 Country Dashboard
//!
//! Loads a per-country daily metrics CSV, aggregates it once, and drives
//! interactive per-country charts from the user's selection.

mod charts;
mod config;
mod context;
mod data;
mod gui;
mod stats;

use config::DashboardConfig;
use eframe::egui;
use gui::DashboardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 650.0])
            .with_title("Coviz"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Coviz",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
}
