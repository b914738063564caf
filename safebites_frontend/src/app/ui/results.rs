use eframe::egui::{self, Color32, RichText};

use crate::app::state::ViewState;
use crate::app::SafeBitesApp;
use crate::navigation::Route;
use crate::report::{ResultsReport, Tone, NO_RESULTS_MESSAGE};

use super::{primary_button, section_title, DEEP_PURPLE};

fn tone_color(tone: Tone) -> Color32 {
    match tone {
        Tone::Good => Color32::from_rgb(0x16, 0xA3, 0x4A),
        Tone::Bad => Color32::from_rgb(0xEF, 0x44, 0x44),
        Tone::Neutral => Color32::GRAY,
    }
}

fn render_report(ui: &mut egui::Ui, report: &ResultsReport) {
    egui::Frame::none()
        .fill(tone_color(report.verdict.tone))
        .rounding(12.0)
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                RichText::new(format!("Safety verdict: {}", report.verdict.label))
                    .strong()
                    .color(Color32::WHITE),
            );
        });

    section_title(ui, "Detected Additives");
    match report.empty_message() {
        Some(message) => {
            ui.label(RichText::new(format!("✅ {message}")).color(tone_color(Tone::Good)));
        }
        None => {
            for card in &report.cards {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(&card.name).size(18.0).strong());
                    ui.label(format!("Detected Level: {}", card.detected_level));
                    ui.label(format!("Max Allowed: {}", card.max_level));
                });
            }
        }
    }

    section_title(ui, "Analysis Summary");
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        for line in &report.summary {
            ui.label(line);
        }
    });
}

impl SafeBitesApp {
    pub(crate) fn render_results(&mut self, ui: &mut egui::Ui) {
        let ViewState::Results(screen) = &self.view else {
            return;
        };
        let report = screen.result().map(ResultsReport::from_result);

        let mut upload_another = false;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Analysis Results")
                        .size(28.0)
                        .strong()
                        .color(DEEP_PURPLE),
                );
            });
            ui.add_space(12.0);

            match &report {
                Some(report) => render_report(ui, report),
                None => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.colored_label(tone_color(Tone::Bad), NO_RESULTS_MESSAGE);
                    });
                }
            }

            ui.add_space(20.0);
            upload_another = primary_button(ui, "📤 Upload Another Label", true);
        });

        if upload_another {
            self.navigate(Route::Upload);
        }
    }
}
