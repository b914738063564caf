use std::fmt::Write as _;
use std::io::Read;

use anyhow::{bail, Context, Result};
use safebites_frontend::api::ApiClient;
use safebites_frontend::config::ClientConfig;
use safebites_frontend::image_ref::{DataUriImageRef, ImageRef};
use safebites_frontend::navigation::{NavParams, ResultsScreen, RESULTS_PARAM};
use safebites_frontend::report::{ResultsReport, NO_RESULTS_MESSAGE};
use tracing::{info, warn};

/// `-` reads raw image bytes from stdin and sends them inline.
pub const STDIN_MARKER: &str = "-";

pub fn resolve_image(raw: &str, subtype: &str, mut stdin: impl Read) -> Result<ImageRef> {
    if raw == STDIN_MARKER {
        let mut bytes = Vec::new();
        stdin
            .read_to_end(&mut bytes)
            .context("failed to read image from stdin")?;
        if bytes.is_empty() {
            bail!("no image data on stdin");
        }
        return Ok(ImageRef::DataUri(DataUriImageRef::from_bytes(subtype, bytes)));
    }
    ImageRef::parse(raw).with_context(|| format!("invalid image reference {raw:?}"))
}

pub fn client_config(endpoint: Option<&str>) -> Result<ClientConfig> {
    match endpoint {
        Some(endpoint) => ClientConfig::with_endpoint(endpoint),
        None => ClientConfig::from_env(),
    }
}

/// Submits once and returns what should be printed to stdout.
pub fn scan(client: &ApiClient, image: &ImageRef, raw_json: bool) -> Result<String> {
    info!(endpoint = client.endpoint(), image = %image, "submitting label");
    let body = client.extract(image)?;
    let params = NavParams::with_results(&body);

    match ResultsScreen::from_params(&params) {
        ResultsScreen::Loaded(result) => {
            info!(
                additives = result.detected_additives.len(),
                verdict = %result.can_consume,
                "analysis received"
            );
            if raw_json {
                Ok(params.get(RESULTS_PARAM).unwrap_or_default().to_string())
            } else {
                Ok(ResultsReport::from_result(&result).render_text())
            }
        }
        ResultsScreen::NoResults(err) => {
            warn!(error = %err, "server response is not a usable analysis");
            bail!("{NO_RESULTS_MESSAGE} ({err})")
        }
    }
}

pub fn inspect(image: &ImageRef) -> Result<String> {
    let upload = image.to_upload()?;
    let mut out = String::new();
    let _ = writeln!(out, "source:       {image}");
    let _ = writeln!(out, "file name:    {}", upload.file_name);
    let _ = writeln!(out, "content type: {}", upload.content_type);
    let _ = writeln!(out, "size:         {} bytes", upload.bytes.len());
    match upload.dimensions() {
        Some((width, height)) => {
            let _ = writeln!(out, "dimensions:   {width}x{height}");
        }
        None => {
            let _ = writeln!(out, "dimensions:   unknown");
        }
    }
    Ok(out)
}
