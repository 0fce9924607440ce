use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::LoaderError;

pub const MODEL_SUMMARY_SCHEMA_VERSION: u32 = 1;

/// Serialized fitted regression model, as exported by the training job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,
    pub model_type: String,
    #[serde(default)]
    pub hyperparameters: BTreeMap<String, Value>,
    #[serde(default)]
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub intercept: Option<f64>,
}

/// Serialized feature scaler that was fitted alongside the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub schema_version: u32,
    pub scaler_type: String,
}

/// What the chat core knows about a loaded model. Built once at load time so
/// nothing downstream depends on the artifact layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub schema_version: u32,
    pub model_type: String,
    pub scaler_name: String,
    pub hyperparameters: BTreeMap<String, String>,
    /// Empty for model types without linear coefficients.
    pub feature_coefficients: BTreeMap<String, f64>,
    pub intercept: Option<f64>,
}

impl ModelSummary {
    /// Descriptive text embedded in the explainer prompt.
    pub fn describe(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "Model type: {}", self.model_type);
        let _ = writeln!(text, "Feature scaler: {}", self.scaler_name);

        if self.hyperparameters.is_empty() {
            text.push_str("Hyperparameters: none recorded\n");
        } else {
            text.push_str("Hyperparameters:\n");
            for (name, value) in &self.hyperparameters {
                let _ = writeln!(text, "- {name}: {value}");
            }
        }

        if self.feature_coefficients.is_empty() {
            text.push_str("Feature coefficients: not available for this model type\n");
        } else {
            text.push_str("Feature coefficients:\n");
            for (feature, coefficient) in &self.feature_coefficients {
                let _ = writeln!(text, "- {feature}: {coefficient}");
            }
        }

        if let Some(intercept) = self.intercept {
            let _ = writeln!(text, "Intercept: {intercept}");
        }

        text
    }
}

pub fn load_model_summary(
    model_bytes: &[u8],
    scaler_bytes: &[u8],
) -> Result<ModelSummary, LoaderError> {
    let model: ModelArtifact = decode_artifact("model", serde_json::from_slice(model_bytes))?;
    let scaler: ScalerArtifact = decode_artifact("scaler", serde_json::from_slice(scaler_bytes))?;
    summarize(model, scaler)
}

pub fn load_model_summary_from_values(
    model: Value,
    scaler: Value,
) -> Result<ModelSummary, LoaderError> {
    let model: ModelArtifact = decode_artifact("model", serde_json::from_value(model))?;
    let scaler: ScalerArtifact = decode_artifact("scaler", serde_json::from_value(scaler))?;
    summarize(model, scaler)
}

fn decode_artifact<T: DeserializeOwned>(
    artifact: &'static str,
    decoded: Result<T, serde_json::Error>,
) -> Result<T, LoaderError> {
    decoded.map_err(|err| LoaderError::InvalidArtifact {
        artifact,
        reason: err.to_string(),
    })
}

fn summarize(model: ModelArtifact, scaler: ScalerArtifact) -> Result<ModelSummary, LoaderError> {
    if model.schema_version != MODEL_SUMMARY_SCHEMA_VERSION {
        return Err(LoaderError::UnsupportedSchemaVersion {
            artifact: "model",
            found: model.schema_version,
        });
    }
    if scaler.schema_version != MODEL_SUMMARY_SCHEMA_VERSION {
        return Err(LoaderError::UnsupportedSchemaVersion {
            artifact: "scaler",
            found: scaler.schema_version,
        });
    }

    if !model.feature_names.is_empty() && model.feature_names.len() != model.coefficients.len() {
        return Err(LoaderError::FeatureCountMismatch {
            coefficients: model.coefficients.len(),
            features: model.feature_names.len(),
        });
    }

    let feature_coefficients = model
        .coefficients
        .iter()
        .enumerate()
        .map(|(index, coefficient)| {
            let name = model
                .feature_names
                .get(index)
                .cloned()
                .unwrap_or_else(|| format!("x{index}"));
            (name, *coefficient)
        })
        .collect();

    let hyperparameters = model
        .hyperparameters
        .into_iter()
        .map(|(name, value)| (name, render_hyperparameter(value)))
        .collect();

    Ok(ModelSummary {
        schema_version: MODEL_SUMMARY_SCHEMA_VERSION,
        model_type: model.model_type.trim().to_string(),
        scaler_name: scaler.scaler_type.trim().to_string(),
        hyperparameters,
        feature_coefficients,
        intercept: model.intercept,
    })
}

fn render_hyperparameter(value: Value) -> String {
    match value {
        Value::String(raw) => raw,
        Value::Null => "none".to_string(),
        other => other.to_string(),
    }
}
