pub mod model;
pub mod pdf;

use thiserror::Error;

pub use model::{
    MODEL_SUMMARY_SCHEMA_VERSION, ModelArtifact, ModelSummary, ScalerArtifact, load_model_summary,
    load_model_summary_from_values,
};
pub use pdf::extract_text;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("pdf could not be parsed: {0}")]
    InvalidPdf(String),
    #[error("pdf text extraction failed on page {page}: {reason}")]
    PageExtraction { page: u32, reason: String },
    #[error("{artifact} artifact could not be deserialized: {reason}")]
    InvalidArtifact {
        artifact: &'static str,
        reason: String,
    },
    #[error("{artifact} artifact uses unsupported schema version {found}")]
    UnsupportedSchemaVersion { artifact: &'static str, found: u32 },
    #[error("model artifact has {coefficients} coefficients but {features} feature names")]
    FeatureCountMismatch { coefficients: usize, features: usize },
}
