use std::collections::BTreeMap;

use crate::models::{AnalysisResult, ResultError};

pub const RESULTS_PARAM: &str = "results";

/// String-keyed parameters passed along with a route change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavParams(BTreeMap<String, String>);

impl NavParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the server body unchanged under `results`.
    pub fn with_results(body: &serde_json::Value) -> Self {
        let mut params = Self::new();
        params.insert(RESULTS_PARAM, body.to_string());
        params
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    HowItWorks,
    Upload,
    Results(NavParams),
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "SafeBites",
            Route::HowItWorks => "How It Works",
            Route::Upload => "Upload a Label",
            Route::Results(_) => "Analysis Results",
        }
    }
}

/// What the results screen shows once it has read its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsScreen {
    Loaded(AnalysisResult),
    NoResults(ResultError),
}

impl ResultsScreen {
    pub fn from_params(params: &NavParams) -> Self {
        match parse_results(params) {
            Ok(result) => ResultsScreen::Loaded(result),
            Err(err) => {
                log::warn!("results screen has nothing to show: {err}");
                ResultsScreen::NoResults(err)
            }
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            ResultsScreen::Loaded(result) => Some(result),
            ResultsScreen::NoResults(_) => None,
        }
    }
}

fn parse_results(params: &NavParams) -> Result<AnalysisResult, ResultError> {
    let raw = params.get(RESULTS_PARAM).ok_or(ResultError::Missing)?;
    if raw.trim().is_empty() {
        return Err(ResultError::Missing);
    }
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|err| ResultError::InvalidJson(err.to_string()))?;
    AnalysisResult::from_value(value)
}
