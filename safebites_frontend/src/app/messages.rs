use log::{debug, error, info};

use crate::api::UploadError;
use crate::image_ref::{ImageRef, ImageRefError};
use crate::navigation::{NavParams, Route};

use super::state::{Alert, ViewState};
use super::SafeBitesApp;

pub enum AppMessage {
    /// `Ok(None)` means the picker was dismissed.
    ImagePicked(Result<Option<ImageRef>, ImageRefError>),
    UploadFinished {
        submission: u64,
        result: Result<serde_json::Value, UploadError>,
    },
}

pub fn process_messages(app: &mut SafeBitesApp) {
    while let Ok(message) = app.rx.try_recv() {
        handle_message(app, message);
    }
}

pub(super) fn handle_message(app: &mut SafeBitesApp, message: AppMessage) {
    match message {
        AppMessage::ImagePicked(result) => {
            app.upload.picking = false;
            match result {
                Ok(Some(image)) => {
                    info!("selected image {image}");
                    app.upload.image = Some(image);
                }
                Ok(None) => debug!("image picker dismissed"),
                Err(ImageRefError::PermissionDenied(path)) => {
                    error!("no permission to read {}", path.display());
                    app.alert = Some(Alert::PermissionDenied);
                }
                Err(err) => {
                    error!("picked image is unusable: {err}");
                    app.alert = Some(Alert::UnreadableImage(err.to_string()));
                }
            }
        }
        AppMessage::UploadFinished { submission, result } => {
            let waiting = matches!(app.view, ViewState::Upload)
                && app.upload.in_flight == Some(submission);
            if !waiting {
                debug!("dropping result of abandoned submission {submission}");
                return;
            }
            app.upload.in_flight = None;
            match result {
                Ok(body) => app.navigate(Route::Results(NavParams::with_results(&body))),
                Err(err) => {
                    error!("{err}");
                    app.alert = Some(if err.is_permission_denied() {
                        Alert::PermissionDenied
                    } else {
                        Alert::UploadFailed
                    });
                }
            }
        }
    }
}
