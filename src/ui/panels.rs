use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::humanize;
use crate::data::{request, upload};
use crate::gateway::Gateway;
use crate::selection::ChartKind;
use crate::state::{AppState, FetchState};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, gateway: &Gateway) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Upload Dataset…").clicked() {
                upload_dialog(state, gateway);
                ui.close_menu();
            }
            if ui.button("Refresh Summary").clicked() {
                state.summary = FetchState::Loading;
                gateway.fetch_summary();
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.summary {
            FetchState::Loading => {
                ui.spinner();
                ui.label("Loading dataset…");
            }
            FetchState::Success(summary) => {
                ui.label(format!(
                    "{} sample rows, {} columns",
                    summary.len(),
                    summary.column_names.len()
                ));
            }
            _ => {}
        }

        ui.separator();

        match &state.upload {
            FetchState::Loading => {
                ui.spinner();
                ui.label("Uploading…");
            }
            FetchState::Success(name) => {
                ui.label(format!("Uploaded as {name}"));
            }
            FetchState::Error(e) => {
                ui.label(RichText::new(format!("Upload failed: {e}")).color(Color32::RED));
            }
            FetchState::Idle => {}
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::LIGHT_YELLOW));
        }
    });
}

/// Pick a CSV, check it locally, and hand it to the gateway.
fn upload_dialog(state: &mut AppState, gateway: &Gateway) {
    let file = rfd::FileDialog::new()
        .set_title("Upload dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    let Some(path) = file else {
        return;
    };

    match upload::validate_csv(&path) {
        Ok(()) => {
            state.upload = FetchState::Loading;
            state.status_message = None;
            gateway.upload(path);
        }
        Err(e) => {
            log::warn!("rejected upload candidate: {e:#}");
            state.status_message = Some(format!("Cannot upload: {e:#}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Left side panel – plot configuration
// ---------------------------------------------------------------------------

/// Render the selection panel. Returns `true` when the user asked to export
/// the current chart.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, gateway: &Gateway) -> bool {
    let mut export_clicked = false;

    ui.heading("Plot");
    ui.separator();

    // ---- Selected columns (insertion order, click to remove) ----
    ui.strong("Selected columns");
    if state.selection.columns().is_empty() {
        ui.label("Click column headers in the table to select them.");
    } else {
        let columns: Vec<String> = state.selection.columns().to_vec();
        ui.horizontal_wrapped(|ui: &mut Ui| {
            for col in &columns {
                if ui
                    .button(format!("{} ✕", humanize(col)))
                    .on_hover_text("Click to remove")
                    .clicked()
                {
                    state.selection.remove_column(col);
                }
            }
        });
    }
    ui.separator();

    // ---- Chart kind ----
    ui.strong("Chart type");
    let current = state.selection.chart_kind();
    egui::ComboBox::from_id_salt("chart_kind")
        .selected_text(current.map(ChartKind::label).unwrap_or("Select chart type"))
        .show_ui(ui, |ui: &mut Ui| {
            for kind in ChartKind::ALL {
                if ui
                    .selectable_label(current == Some(kind), kind.label())
                    .clicked()
                {
                    match state.selection.set_chart_kind(kind) {
                        Ok(()) => state.selection_error = None,
                        Err(e) => state.selection_error = Some(e),
                    }
                }
            }
        });
    if let Some(e) = &state.selection_error {
        ui.label(RichText::new(e.to_string()).color(Color32::RED));
    }
    ui.separator();

    // ---- Submit ----
    if ui.button("Submit").clicked() {
        submit(state, gateway);
    }
    if let Some(e) = &state.build_error {
        ui.label(RichText::new(e.to_string()).color(Color32::RED));
    }

    match &state.plot.fetch {
        FetchState::Loading => {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label("Computing plot…");
            });
        }
        FetchState::Error(e) => {
            ui.label(RichText::new(format!("{e}")).color(Color32::RED));
            ui.label("Adjust the selection or submit again.");
        }
        _ => {}
    }
    ui.separator();

    // ---- Export ----
    if ui
        .add_enabled(state.chart.is_some(), egui::Button::new("Export as PNG"))
        .clicked()
    {
        export_clicked = true;
    }

    export_clicked
}

/// Validate the selection and dispatch a tagged plot fetch.
fn submit(state: &mut AppState, gateway: &Gateway) {
    state.build_error = None;
    match request::build(&state.selection) {
        Ok(req) => {
            // Re-submitting the identical request while it is in flight
            // would only race itself.
            if state.plot.fetch.is_loading() && state.plot.request.as_ref() == Some(&req) {
                log::debug!("ignoring duplicate in-flight submission");
                return;
            }
            let seq = state.plot.begin(req.clone());
            gateway.fetch_plot(seq, req);
        }
        Err(e) => state.build_error = Some(e),
    }
}

// ---------------------------------------------------------------------------
// Dataset table (central panel)
// ---------------------------------------------------------------------------

/// Render the sample rows. Column headers toggle selection on.
pub fn dataset_table(ui: &mut Ui, state: &mut AppState) {
    let AppState {
        summary, selection, ..
    } = state;

    let summary = match summary {
        FetchState::Success(s) => s,
        FetchState::Loading => {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label("Data is being fetched, please wait…");
            });
            return;
        }
        FetchState::Error(e) => {
            ui.label(RichText::new(format!("{e}")).color(Color32::RED));
            ui.label("Use File → Refresh Summary to retry.");
            return;
        }
        FetchState::Idle => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    if summary.is_empty() {
        ui.label("The dataset sample is empty. Upload a dataset first.");
        return;
    }

    let columns = summary.column_names.clone();
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().at_least(70.0), columns.len())
        .header(24.0, |mut header| {
            for col in &columns {
                header.col(|ui: &mut Ui| {
                    let picked = selection.contains(col);
                    if ui
                        .selectable_label(picked, RichText::new(humanize(col)).strong())
                        .clicked()
                    {
                        selection.add_column(col);
                    }
                });
            }
        })
        .body(|mut body| {
            for row_data in &summary.rows {
                body.row(20.0, |mut row| {
                    for col in &columns {
                        row.col(|ui: &mut Ui| {
                            let text = row_data
                                .get(col)
                                .map(|v| v.to_string())
                                .unwrap_or_default();
                            ui.label(text);
                        });
                    }
                });
            }
        });
}
