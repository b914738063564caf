use eframe::egui::{self, RichText};

use crate::app::SafeBitesApp;
use crate::navigation::Route;

use super::primary_button;

impl SafeBitesApp {
    pub(crate) fn render_home(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(RichText::new("🍴 SafeBites").size(32.0).strong());
            ui.add_space(40.0);
            ui.label(RichText::new("Welcome!!").size(18.0));
            ui.label(RichText::new("Know Your Food With Ease").size(26.0).strong());
            ui.add_space(60.0);
        });
        if primary_button(ui, "Get Started →", true) {
            self.navigate(Route::HowItWorks);
        }
    }
}
