use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use eframe::egui::{self, Color32, RichText};

use crate::app::SafeBitesApp;
use crate::image_ref::ImageRef;

use super::primary_button;

const PREVIEW_HEIGHT: f32 = 220.0;

fn preview(image: &ImageRef) -> egui::Image<'static> {
    match image {
        ImageRef::File(file) => egui::Image::new(format!("file://{}", file.path().display())),
        ImageRef::DataUri(data) => {
            let mut hasher = DefaultHasher::new();
            data.payload().hash(&mut hasher);
            let uri = format!("bytes://preview-{:x}.{}", hasher.finish(), data.subtype());
            egui::Image::from_bytes(uri, data.bytes().to_vec())
        }
    }
}

impl SafeBitesApp {
    pub(crate) fn render_upload(&mut self, ui: &mut egui::Ui) {
        let mut pick = false;
        let mut submit = false;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Upload a Label").size(26.0).strong());
                ui.label(
                    RichText::new("Choose a food label image to analyze its ingredients")
                        .color(Color32::GRAY),
                );
            });
            ui.add_space(24.0);

            let choose = egui::Button::new(RichText::new("🖼 Choose Image").color(Color32::WHITE))
                .fill(Color32::from_rgb(0xFF, 0x8C, 0x00))
                .min_size(egui::vec2(ui.available_width(), 40.0));
            if ui.add_enabled(!self.upload.picking, choose).clicked() {
                pick = true;
            }

            if let Some(image) = &self.upload.image {
                ui.add_space(16.0);
                ui.add(
                    preview(image)
                        .max_height(PREVIEW_HEIGHT)
                        .max_width(ui.available_width())
                        .maintain_aspect_ratio(true)
                        .rounding(12.0),
                );
                ui.label(
                    RichText::new(format!("{} · {}", image.file_name(), image.content_type()))
                        .small()
                        .color(Color32::GRAY),
                );
            }

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if self.upload.submitting() {
                    ui.add(egui::Spinner::new());
                    ui.label("Analyzing ingredients...");
                }
            });
            submit = primary_button(ui, "✔ Submit & View Results", self.upload.can_submit());
        });

        if pick {
            self.spawn_pick_image();
        }
        if submit {
            self.spawn_submit();
        }
    }
}
