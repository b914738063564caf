use eframe::egui::{self, RichText};

use crate::app::SafeBitesApp;
use crate::navigation::Route;

use super::{primary_button, section_title};

const STEPS: [&str; 4] = [
    "Scan any food label with your camera",
    "Identify hidden ingredients and allergens",
    "Learn about health impacts and alternatives",
    "Make informed decisions about your diet",
];

const BENEFITS: [&str; 4] = [
    "Identify potentially harmful additives and preservatives",
    "Avoid ingredients that trigger your specific allergies or sensitivities",
    "Follow dietary recommendations from your healthcare provider",
    "Track your nutrition patterns over time with detailed insights",
];

impl SafeBitesApp {
    pub(crate) fn render_how_it_works(&mut self, ui: &mut egui::Ui) {
        let mut start = false;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Discover What's Really In Your Food")
                        .size(22.0)
                        .strong(),
                );
            });

            section_title(ui, "How SafeBites Works");
            for (index, step) in STEPS.iter().enumerate() {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(format!("Step {}", index + 1)).strong());
                    ui.label(*step);
                });
            }

            section_title(ui, "Why Scan Food Labels?");
            ui.group(|ui| {
                ui.label(
                    "Food labels often contain hidden ingredients that can affect your health, \
                     trigger allergies, or impact dietary goals. SafeBites empowers you to \
                     understand exactly what's in your food and make choices aligned with your \
                     health needs.",
                );
            });

            section_title(ui, "Benefits of Using SafeBites");
            for benefit in BENEFITS {
                ui.label(format!("✔ {benefit}"));
            }

            ui.add_space(20.0);
            start = primary_button(ui, "Start Scanning Now →", true);
        });
        if start {
            self.navigate(Route::Upload);
        }
    }
}
