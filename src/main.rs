#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use sketchpad::{SketchpadApp, SketchpadConfig};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = SketchpadConfig::load();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 440.0])
            .with_min_inner_size([300.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sketchpad",
        native_options,
        Box::new(|cc| Ok(Box::new(SketchpadApp::new(cc, config)))),
    )
}
