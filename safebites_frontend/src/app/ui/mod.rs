pub mod dialogs;
pub mod home;
pub mod how_it_works;
pub mod results;
pub mod upload;

use eframe::egui::{self, Color32, RichText};

pub(crate) const ACCENT: Color32 = Color32::from_rgb(0x8B, 0x5C, 0xF6);
pub(crate) const DEEP_PURPLE: Color32 = Color32::from_rgb(0x6B, 0x21, 0xA8);

/// Full-width call to action used across screens.
pub(crate) fn primary_button(ui: &mut egui::Ui, label: &str, enabled: bool) -> bool {
    let button = egui::Button::new(RichText::new(label).strong().color(Color32::WHITE))
        .fill(ACCENT)
        .min_size(egui::vec2(ui.available_width(), 40.0));
    ui.add_enabled(enabled, button).clicked()
}

pub(crate) fn section_title(ui: &mut egui::Ui, text: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(text).heading().color(DEEP_PURPLE));
    ui.add_space(6.0);
}
