use crate::image_ref::ImageRef;
use crate::navigation::ResultsScreen;

pub enum ViewState {
    Home,
    HowItWorks,
    Upload,
    Results(ResultsScreen),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Home => "home",
            ViewState::HowItWorks => "how_it_works",
            ViewState::Upload => "upload",
            ViewState::Results(_) => "results",
        }
    }
}

/// Transient state of the upload screen. Replaced whenever the screen is entered.
#[derive(Default)]
pub struct UploadState {
    pub image: Option<ImageRef>,
    pub picking: bool,
    /// Sequence number of the submission this screen is waiting on.
    pub in_flight: Option<u64>,
}

impl UploadState {
    pub fn submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.image.is_some() && !self.submitting()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    PermissionDenied,
    UnreadableImage(String),
    UploadFailed,
}

impl Alert {
    pub fn title(&self) -> &'static str {
        match self {
            Alert::PermissionDenied => "Permission required",
            Alert::UnreadableImage(_) => "Cannot use this image",
            Alert::UploadFailed => "Upload failed",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Alert::PermissionDenied => "Permission to access gallery is required!".to_string(),
            Alert::UnreadableImage(detail) => format!("The selected image could not be read: {detail}"),
            Alert::UploadFailed => "Upload failed. Please try again.".to_string(),
        }
    }
}
