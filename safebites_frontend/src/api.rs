use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::{sanitize_endpoint, ClientConfig};
use crate::image_ref::{ImageRef, ImageRefError};

pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload failed: could not prepare image: {0}")]
    Image(#[from] ImageRefError),
    #[error("upload failed: server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("upload failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upload failed: response was not JSON: {0}")]
    MalformedResponse(String),
}

impl UploadError {
    /// Permission errors get their own alert; everything else is generic.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, UploadError::Image(ImageRefError::PermissionDenied(_)))
    }
}

/// Talks to the label analysis service. One request per call, no retries.
#[derive(Clone)]
pub struct ApiClient {
    endpoint: String,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = sanitize_endpoint(config.endpoint.clone())?;
        // The request is awaited to completion; no timeout.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Uploads the image as the `image` multipart field and returns the body untouched.
    pub fn extract(&self, image: &ImageRef) -> Result<serde_json::Value, UploadError> {
        let upload = image.to_upload()?;
        info!(
            "uploading {} ({}, {} bytes) to {}",
            upload.file_name,
            upload.content_type,
            upload.bytes.len(),
            self.endpoint
        );

        let part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .map_err(UploadError::Transport)?;
        let form = multipart::Form::new().part(IMAGE_FIELD, part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .map_err(UploadError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!("analysis service rejected upload with {status}");
            return Err(UploadError::Status { status, body });
        }

        let text = response.text().map_err(UploadError::Transport)?;
        serde_json::from_str(&text).map_err(|err| UploadError::MalformedResponse(err.to_string()))
    }
}
