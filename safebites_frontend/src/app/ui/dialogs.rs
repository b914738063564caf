use eframe::egui::{self, Align2, Color32, Context};

use crate::app::SafeBitesApp;

impl SafeBitesApp {
    pub(crate) fn render_alert(&mut self, ctx: &Context) {
        let Some(alert) = &self.alert else {
            return;
        };

        let mut dismiss = false;
        egui::Window::new(alert.title())
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.colored_label(Color32::LIGHT_RED, alert.message());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismiss = true;
                }
            });

        if dismiss {
            self.alert = None;
        }
    }
}
