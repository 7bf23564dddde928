// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::ViewportBuilder;
use goldcross::{config::options::AppOptions, gui, log};

fn main() {
    let _log = log::init(&log::LogOptions::default());

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([460.0, 280.0])
            .with_min_inner_size([360.0, 240.0]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, AppOptions::from_env()) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
