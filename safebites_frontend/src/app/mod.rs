use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui::{self, Context};
use log::{error, info};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::navigation::{ResultsScreen, Route};

mod messages;
mod state;
mod tasks;
mod ui;

use messages::AppMessage;
use state::{Alert, UploadState, ViewState};

pub struct SafeBitesApp {
    api: ApiClient,
    tx: Sender<AppMessage>,
    rx: Receiver<AppMessage>,
    view: ViewState,
    upload: UploadState,
    next_submission: u64,
    alert: Option<Alert>,
}

impl SafeBitesApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        let config = ClientConfig::from_env().unwrap_or_else(|err| {
            error!("ignoring invalid endpoint configuration: {err:#}");
            ClientConfig::default()
        });
        let api = ApiClient::new(&config)?;
        Ok(Self::with_client(api))
    }

    pub fn with_client(api: ApiClient) -> Self {
        info!("analysis endpoint: {}", api.endpoint());
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            tx,
            rx,
            view: ViewState::Home,
            upload: UploadState::default(),
            next_submission: 0,
            alert: None,
        }
    }

    /// Swaps the visible screen. Results are deserialized here, once, on mount.
    pub fn navigate(&mut self, route: Route) {
        info!("navigating from {} to {}", self.view.name(), route.title());
        self.view = match route {
            Route::Home => ViewState::Home,
            Route::HowItWorks => ViewState::HowItWorks,
            Route::Upload => {
                self.upload = UploadState::default();
                ViewState::Upload
            }
            Route::Results(params) => ViewState::Results(ResultsScreen::from_params(&params)),
        };
    }

    fn spawn_pick_image(&mut self) {
        if self.upload.picking {
            return;
        }
        self.upload.picking = true;
        tasks::pick_image(self.tx.clone());
    }

    fn spawn_submit(&mut self) {
        if !self.upload.can_submit() {
            return;
        }
        let Some(image) = self.upload.image.clone() else {
            return;
        };
        self.next_submission += 1;
        let submission = self.next_submission;
        self.upload.in_flight = Some(submission);
        tasks::submit_image(self.api.clone(), self.tx.clone(), submission, image);
    }

    fn process_messages(&mut self) {
        messages::process_messages(self);
    }
}

impl eframe::App for SafeBitesApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if !matches!(self.view, ViewState::Home) && ui.button("⌂ Home").clicked() {
                    self.navigate(Route::Home);
                }
                ui.label(egui::RichText::new("🍴 SafeBites").strong());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            ViewState::Home => self.render_home(ui),
            ViewState::HowItWorks => self.render_how_it_works(ui),
            ViewState::Upload => self.render_upload(ui),
            ViewState::Results(_) => self.render_results(ui),
        });

        self.render_alert(ctx);

        // Keep polling while a worker thread may still report back.
        if self.upload.submitting() || self.upload.picking {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
