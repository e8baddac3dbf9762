mod app;
mod color;
mod config;
mod data;
mod describe;
mod export;
mod gateway;
mod selection;
mod state;
mod ui;

use app::ChartLabApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ChartLab – Dataset Explorer",
        options,
        Box::new(|cc| Ok(Box::new(ChartLabApp::new(cc)?))),
    )
}
