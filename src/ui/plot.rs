use eframe::egui::load::Bytes;
use eframe::egui::{self, ScrollArea, Ui};

// ---------------------------------------------------------------------------
// Saved figure (central panel)
// ---------------------------------------------------------------------------

/// Render a saved figure scaled to the available space.
pub fn image_view(ui: &mut Ui, uri: &str, bytes: &Bytes) {
    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.add(
                    egui::Image::from_bytes(uri.to_string(), bytes.clone())
                        .maintain_aspect_ratio(true)
                        .shrink_to_fit(),
                );
            });
        });
}
