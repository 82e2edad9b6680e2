//! Application entry point wiring egui/eframe to launch the contact form window.

use crate::config::AppConfig;
use crate::ui::ContactApp;
use eframe::egui;
use egui_phosphor::Variant;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: AppConfig) -> eframe::Result<()> {
    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Contact",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            let app = ContactApp::new(&config, cc.egui_ctx.clone())?;
            Ok(Box::new(app))
        }),
    )
}
