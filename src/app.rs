use std::sync::mpsc::{self, Receiver};

use eframe::egui;

use crate::config::GatewayConfig;
use crate::export::{self, ExportError};
use crate::gateway::{Gateway, GatewayEvent};
use crate::selection::ChartKind;
use crate::state::{AppState, FetchState};
use crate::ui::{chart, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ChartLabApp {
    pub state: AppState,
    gateway: Gateway,
    events: Receiver<GatewayEvent>,
    /// Screen rect the chart occupied last frame; export crops to it.
    chart_rect: Option<egui::Rect>,
    /// Chart kind awaiting a viewport screenshot for export.
    pending_export: Option<ChartKind>,
}

impl ChartLabApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let config = GatewayConfig::from_env();
        log::info!("backend base URL: {}", config.base_url);

        let (tx, rx) = mpsc::channel();
        let gateway = Gateway::new(&config, tx, cc.egui_ctx.clone())?;

        let mut state = AppState::default();
        state.summary = FetchState::Loading;
        gateway.fetch_summary();

        Ok(Self {
            state,
            gateway,
            events: rx,
            chart_rect: None,
            pending_export: None,
        })
    }

    /// Apply every gateway response that arrived since the last frame.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                GatewayEvent::Summary(outcome) => self.state.apply_summary(outcome),
                GatewayEvent::Plot { seq, outcome } => self.state.apply_plot(seq, outcome),
                GatewayEvent::Upload(outcome) => match outcome {
                    Ok(name) => {
                        log::info!("upload stored as {name}");
                        self.state.upload = FetchState::Success(name);
                        // The backend now serves a new dataset; refetch.
                        self.state.summary = FetchState::Loading;
                        self.gateway.fetch_summary();
                    }
                    Err(e) => {
                        log::error!("upload failed: {e}");
                        self.state.upload = FetchState::Error(e);
                    }
                },
            }
        }
    }

    /// Kick off an export: the actual pixels arrive as a screenshot event on
    /// a later frame.
    fn request_export(&mut self, ctx: &egui::Context) {
        if self.state.chart.is_none() {
            // The button is disabled without a chart, but the precondition
            // is still reported rather than silently ignored.
            self.state.status_message = Some(ExportError::NoChart.to_string());
            return;
        }
        let kind = self
            .state
            .selection
            .chart_kind()
            .or(self.state.plot.request.as_ref().map(|r| r.chart_kind));
        let Some(kind) = kind else {
            self.state.status_message = Some(ExportError::NoChart.to_string());
            return;
        };

        self.pending_export = Some(kind);
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }

    /// Complete a pending export once the screenshot shows up.
    fn finish_export(&mut self, ctx: &egui::Context) {
        let Some(kind) = self.pending_export else {
            return;
        };
        let screenshot = ctx.input(|i| {
            i.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = screenshot else {
            return;
        };
        self.pending_export = None;

        let Some(rect) = self.chart_rect else {
            self.state.status_message = Some(ExportError::NoChart.to_string());
            return;
        };

        let result = export::encode_chart_png(&image, rect, ctx.pixels_per_point())
            .and_then(|bytes| export::save_png(&bytes, kind));
        match result {
            Ok(Some(path)) => {
                log::info!("exported chart to {}", path.display());
                self.state.status_message = Some(format!("Exported {}", path.display()));
            }
            Ok(None) => {
                self.state.status_message = Some("Export cancelled".to_string());
            }
            Err(e) => {
                log::error!("export failed: {e:#}");
                self.state.status_message = Some(format!("Export failed: {e:#}"));
            }
        }
    }
}

impl eframe::App for ChartLabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.finish_export(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &self.gateway);
        });

        // ---- Left side panel: plot configuration ----
        let mut export_clicked = false;
        egui::SidePanel::left("plot_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                export_clicked = panels::side_panel(ui, &mut self.state, &self.gateway);
            });
        if export_clicked {
            self.request_export(ctx);
        }

        // ---- Central panel: sample table above, chart below ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let table_height = ui.available_height() * 0.45;
            ui.allocate_ui(egui::vec2(ui.available_width(), table_height), |ui| {
                panels::dataset_table(ui, &mut self.state);
            });
            ui.separator();

            self.chart_rect = None;
            match (&self.state.chart, &self.state.render_error) {
                (Some(desc), _) => {
                    ui.vertical_centered(|ui| {
                        ui.strong(desc.options.axis_title.clone());
                    });
                    self.chart_rect = Some(chart::chart_panel(ui, desc));
                }
                (None, Some(e)) => {
                    // Rendering failed; the rest of the UI stays usable.
                    ui.centered_and_justified(|ui| {
                        ui.label(format!("{e}"));
                    });
                }
                (None, None) => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Select two columns and a chart type, then Submit.");
                    });
                }
            }
        });
    }
}
