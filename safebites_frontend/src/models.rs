use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisResult {
    #[serde(default)]
    pub analysis: AnalysisSummary,
    #[serde(default)]
    pub detected_additives: Vec<DetectedAdditive>,
    #[serde(default)]
    pub can_consume: SafetyVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisSummary {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub gmp_count: i64,
    #[serde(default)]
    pub avg_level: Option<f64>,
    #[serde(default)]
    pub max_level: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedAdditive {
    pub additive: String,
    #[serde(default, deserialize_with = "level_text")]
    pub detected_level: Option<String>,
    #[serde(default, deserialize_with = "level_text")]
    pub max_level: Option<String>,
}

/// The service reports levels as strings, but numbers and nulls show up too.
fn level_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a level string or number, got {other}"
            )))
        }
    })
}

/// `can_consume` from the service. Only used to pick a colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyVerdict {
    Safe,
    Unsafe,
    Other(String),
}

impl Default for SafetyVerdict {
    fn default() -> Self {
        SafetyVerdict::Other(String::new())
    }
}

impl SafetyVerdict {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "safe" => SafetyVerdict::Safe,
            "unsafe" => SafetyVerdict::Unsafe,
            _ => SafetyVerdict::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SafetyVerdict::Safe => "safe",
            SafetyVerdict::Unsafe => "unsafe",
            SafetyVerdict::Other(raw) => raw,
        }
    }
}

impl fmt::Display for SafetyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SafetyVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SafetyVerdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(SafetyVerdict::parse).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResultError {
    #[error("no results parameter")]
    Missing,
    #[error("results parameter is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("results do not match the analysis shape: {0}")]
    Shape(String),
    #[error("invalid analysis result: {0}")]
    Invalid(String),
}

impl AnalysisResult {
    /// Checks what the results screen relies on; the server is otherwise trusted.
    pub fn validate(&self) -> Result<(), ResultError> {
        let summary = &self.analysis;
        if summary.count < 0 {
            return Err(ResultError::Invalid(format!(
                "analysis.count is negative ({})",
                summary.count
            )));
        }
        if summary.gmp_count < 0 {
            return Err(ResultError::Invalid(format!(
                "analysis.gmp_count is negative ({})",
                summary.gmp_count
            )));
        }
        let levels = [summary.avg_level, summary.max_level];
        if levels.iter().flatten().any(|level| !level.is_finite()) {
            return Err(ResultError::Invalid("analysis levels must be finite".into()));
        }
        if let Some(index) = self
            .detected_additives
            .iter()
            .position(|item| item.additive.trim().is_empty())
        {
            return Err(ResultError::Invalid(format!(
                "detected_additives[{index}] has no name"
            )));
        }
        Ok(())
    }

    /// Converts the raw server JSON, then validates it.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ResultError> {
        let result: AnalysisResult =
            serde_json::from_value(value).map_err(|err| ResultError::Shape(err.to_string()))?;
        result.validate()?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deserializes_service_payload() {
        let result = AnalysisResult::from_value(json!({
            "analysis": {"count": 2, "gmp_count": 1, "avg_level": 1.5, "max_level": 3},
            "detected_additives": [
                {"additive": "Sodium Benzoate", "detected_level": "2.1", "max_level": "3.0"},
                {"additive": "Citric Acid", "detected_level": null, "max_level": "GMP"}
            ],
            "can_consume": "unsafe"
        }))
        .unwrap();

        assert_eq!(result.analysis.count, 2);
        assert_eq!(result.analysis.max_level, Some(3.0));
        assert_eq!(result.detected_additives.len(), 2);
        assert_eq!(result.detected_additives[1].detected_level, None);
        assert_eq!(result.can_consume, SafetyVerdict::Unsafe);
    }

    #[test]
    fn numeric_levels_become_text() {
        let additive: DetectedAdditive = serde_json::from_value(json!({
            "additive": "E211", "detected_level": 2.5, "max_level": 150
        }))
        .unwrap();
        assert_eq!(additive.detected_level.as_deref(), Some("2.5"));
        assert_eq!(additive.max_level.as_deref(), Some("150"));
    }

    #[test]
    fn missing_sections_default() {
        let result = AnalysisResult::from_value(json!({"can_consume": "safe"})).unwrap();
        assert_eq!(result.analysis, AnalysisSummary::default());
        assert!(result.detected_additives.is_empty());
        assert_eq!(result.can_consume, SafetyVerdict::Safe);
    }

    #[test]
    fn additive_count_is_not_cross_checked() {
        let result = AnalysisResult::from_value(json!({
            "analysis": {"count": 5, "gmp_count": 0, "avg_level": 0, "max_level": 0},
            "detected_additives": [],
            "can_consume": "safe"
        }));
        assert!(result.is_ok());
    }

    #[test]
    fn verdict_parsing() {
        assert_eq!(SafetyVerdict::parse(" SAFE "), SafetyVerdict::Safe);
        assert_eq!(SafetyVerdict::parse("Unsafe"), SafetyVerdict::Unsafe);
        assert_eq!(SafetyVerdict::parse(""), SafetyVerdict::default());
        assert_eq!(SafetyVerdict::default(), SafetyVerdict::Other(String::new()));
        assert_eq!(
            SafetyVerdict::parse("limit intake"),
            SafetyVerdict::Other("limit intake".into())
        );
        assert_eq!(serde_json::to_value(SafetyVerdict::Unsafe).unwrap(), json!("unsafe"));
    }

    #[test]
    fn null_summary_levels_are_accepted() {
        let result = AnalysisResult::from_value(json!({
            "analysis": {"count": 0, "gmp_count": 0, "avg_level": null, "max_level": null},
            "detected_additives": [],
            "can_consume": "safe"
        }))
        .unwrap();
        assert_eq!(result.analysis.avg_level, None);
        assert_eq!(result.analysis.max_level, None);
        assert_eq!(result.can_consume, SafetyVerdict::Safe);
    }

    #[test]
    fn rejects_negative_counts() {
        let err = AnalysisResult::from_value(json!({
            "analysis": {"count": -1, "gmp_count": 0, "avg_level": 0, "max_level": 0}
        }))
        .unwrap_err();
        assert!(matches!(err, ResultError::Invalid(_)));
    }

    #[test]
    fn rejects_unnamed_additive() {
        let err = AnalysisResult::from_value(json!({
            "detected_additives": [{"additive": "  ", "max_level": "1"}]
        }))
        .unwrap_err();
        assert_eq!(err, ResultError::Invalid("detected_additives[0] has no name".into()));
    }

    #[test]
    fn rejects_wrong_shape() {
        let err = AnalysisResult::from_value(json!({"detected_additives": "none"})).unwrap_err();
        assert!(matches!(err, ResultError::Shape(_)));
        let err = AnalysisResult::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, ResultError::Shape(_)));
    }
}
