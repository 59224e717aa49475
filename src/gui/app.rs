//! Dashboard Main Application
//! Left control panel + central chart area. The CSV load and the aggregation
//! pipeline run on a background thread reporting over a channel.

use crate::charts::CountrySeries;
use crate::config::DashboardConfig;
use crate::context::DashboardContext;
use crate::data::{DatasetLoader, Metric};
use crate::gui::{ChartViewer, ControlPanel, PanelAction};
use crate::stats::{CountrySelection, SelectionRef};
use chrono::NaiveDate;
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

const TOP_N: usize = 10;

/// Pipeline result from the background thread
enum LoadResult {
    Progress(String),
    Complete(Box<DashboardContext>),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    /// Built once per load; read-only afterwards.
    context: Option<Arc<DashboardContext>>,
    /// Session-scoped selection state, recomputed per interaction.
    selection: Option<CountrySelection>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            config,
            context: None,
            selection: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        if let Some(path) = app.config.csv_path.clone() {
            app.start_load(path);
        }
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Kick off the load + aggregation pipeline in a background thread
    fn start_load(&mut self, path: PathBuf) {
        self.context = None;
        self.selection = None;
        self.chart_viewer.clear();
        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.control_panel.is_loading = true;
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let reference_date = self.config.reference_date;

        thread::spawn(move || {
            Self::run_pipeline(tx, path, reference_date);
        });
    }

    /// Run the pipeline (called from the background thread)
    fn run_pipeline(tx: Sender<LoadResult>, path: PathBuf, reference_date: Option<NaiveDate>) {
        let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

        let dataset = match DatasetLoader::load_and_clean(&path) {
            Ok(dataset) => dataset,
            Err(e) => {
                let _ = tx.send(LoadResult::Error(e.to_string()));
                return;
            }
        };

        let _ = tx.send(LoadResult::Progress("Aggregating countries...".to_string()));
        let context = DashboardContext::build(dataset, reference_date);
        let _ = tx.send(LoadResult::Complete(Box::new(context)));
    }

    /// Check for pipeline results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete(context) => {
                        self.finish_load(Arc::new(*context));
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.control_panel.set_status(&format!("Error: {}", error));
                        self.control_panel.is_loading = false;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn finish_load(&mut self, context: Arc<DashboardContext>) {
        let countries: Vec<String> = context
            .ranked()
            .iter()
            .map(|s| s.country.clone())
            .collect();
        self.control_panel.set_results(
            countries,
            context.top(TOP_N).to_vec(),
            context.worldwide().clone(),
            context.worldwide_delta().cloned(),
        );
        self.chart_viewer.set_overview(
            context
                .top_series(TOP_N, Metric::TotalCases)
                .into_iter()
                .map(|(country, points)| CountrySeries { country, points })
                .collect(),
        );
        if context.dataset().is_empty() {
            self.control_panel
                .set_status("Loaded 0 rows: nothing survived cleaning");
        } else {
            self.control_panel.set_status(&format!(
                "Loaded {} rows across {} countries",
                context.dataset().len(),
                context.dataset().countries().len()
            ));
        }
        self.control_panel.is_loading = false;
        self.is_loading = false;

        // Default selection: configured country, else top ranked.
        let default_ref = self
            .config
            .default_country
            .clone()
            .map(SelectionRef::Name)
            .unwrap_or_default();
        self.context = Some(context);
        self.apply_selection(default_ref);
    }

    /// Recompute the selection; invalid references resolve to top ranked.
    fn apply_selection(&mut self, reference: SelectionRef) {
        if let Some(context) = &self.context {
            self.selection = context.select(&reference);
            if let Some(selection) = &self.selection {
                self.control_panel.selected_country = selection.summary.country.clone();
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - controls and rankings
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        PanelAction::BrowseCsv => self.handle_browse_csv(),
                        PanelAction::SelectCountry(name) => {
                            self.apply_selection(SelectionRef::Name(name))
                        }
                        PanelAction::SelectRank(rank) => {
                            self.apply_selection(SelectionRef::Rank(rank))
                        }
                        PanelAction::None => {}
                    }
                });
            });

        // Central panel - overview and per-country charts
        let reference_date = self.context.as_ref().and_then(|c| c.reference_date());
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, self.selection.as_ref(), reference_date);
        });
    }
}
