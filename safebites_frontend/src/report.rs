use std::fmt::Write as _;

use crate::models::{AnalysisResult, SafetyVerdict};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_ADDITIVES_MESSAGE: &str = "No harmful additives found!";
pub const NO_RESULTS_MESSAGE: &str = "No results to display.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditiveCard {
    pub name: String,
    pub detected_level: String,
    pub max_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyIndicator {
    pub label: String,
    pub tone: Tone,
}

impl From<&SafetyVerdict> for SafetyIndicator {
    fn from(verdict: &SafetyVerdict) -> Self {
        let tone = match verdict {
            SafetyVerdict::Safe => Tone::Good,
            SafetyVerdict::Unsafe => Tone::Bad,
            SafetyVerdict::Other(_) => Tone::Neutral,
        };
        let label = match verdict.as_str() {
            "" => "unknown".to_string(),
            other => other.to_string(),
        };
        Self { label, tone }
    }
}

/// Everything the results screen draws, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsReport {
    pub cards: Vec<AdditiveCard>,
    pub summary: Vec<String>,
    pub verdict: SafetyIndicator,
}

impl ResultsReport {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let cards = result
            .detected_additives
            .iter()
            .map(|item| AdditiveCard {
                name: item.additive.clone(),
                detected_level: level_or_na(item.detected_level.as_deref()),
                max_level: level_or_na(item.max_level.as_deref()),
            })
            .collect();

        let analysis = &result.analysis;
        let summary = vec![
            format!("Total Additives: {}", analysis.count),
            format!("GMP Additives: {}", analysis.gmp_count),
            format!("Average Level: {}", summary_level(analysis.avg_level)),
            format!("Max Level: {}", summary_level(analysis.max_level)),
        ];

        Self {
            cards,
            summary,
            verdict: SafetyIndicator::from(&result.can_consume),
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.cards.is_empty().then_some(NO_ADDITIVES_MESSAGE)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Analysis Results");
        let _ = writeln!(out, "Safety: {}", self.verdict.label);
        let _ = writeln!(out);
        let _ = writeln!(out, "Detected Additives");
        match self.empty_message() {
            Some(message) => {
                let _ = writeln!(out, "  {message}");
            }
            None => {
                for card in &self.cards {
                    let _ = writeln!(out, "  - {}", card.name);
                    let _ = writeln!(out, "      Detected Level: {}", card.detected_level);
                    let _ = writeln!(out, "      Max Allowed: {}", card.max_level);
                }
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Analysis Summary");
        for line in &self.summary {
            let _ = writeln!(out, "  {line}");
        }
        out
    }
}

fn summary_level(level: Option<f64>) -> String {
    level
        .map(|level| format!("{level:.2}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn level_or_na(level: Option<&str>) -> String {
    match level.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
