//! Application entry point for the Game of Life viewer.
//!
//! This binary sets up eframe/egui and delegates all interactive
//! logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use eframe::egui;
use viewer::Viewer;

/// Starts the native eframe application.
///
/// Logging is routed through `env_logger`, so `RUST_LOG` controls the
/// output of the simulation core and the viewer alike. All UI state and
/// rendering are handled by [`Viewer`].
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([920.0, 780.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Toroidal Game of Life",
        options,
        Box::new(|_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(Viewer::new()))
        }),
    )
}
