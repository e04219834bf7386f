//! GUI entry point for Form Checker

mod analyze_panel;
mod app;
mod settings_panel;

use app::FormCheckerApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "סוכן ניתוח טכניקת אימון",
        options,
        Box::new(|cc| Ok(Box::new(FormCheckerApp::new(cc)))),
    )
}
