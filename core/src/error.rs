//! Error taxonomy for collection generation.
//!
//! Two tiers: every variant here is terminal (the run stops, nothing is
//! retried or rolled back). The one recoverable per-item condition — a data
//! row whose asset file is absent from the asset directory — is not an error
//! at all; it is logged and reported through
//! [`GenerateSummary`](crate::generator::GenerateSummary).

use std::path::PathBuf;
use thiserror::Error;

/// Generator result type alias.
pub type Result<T> = std::result::Result<T, GenerateError>;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("metadata csv file does not exist: {path}")]
    CsvMissing { path: PathBuf },

    /// The CSV parsed but holds no data rows below the header.
    #[error("metadata csv file is empty: {path}")]
    CsvEmpty { path: PathBuf },

    #[error("failed to read metadata csv {path}: {source}")]
    CsvParse { path: PathBuf, source: csv::Error },

    #[error("metadata template file does not exist: {path}")]
    TemplateMissing { path: PathBuf },

    #[error("failed to parse metadata template {path}: {source}")]
    TemplateParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The template parsed as JSON but lacks a field the generator must
    /// overwrite (e.g. a string `name`, or `properties.files[0]`).
    #[error("metadata template is malformed: {reason}")]
    TemplateShape { reason: String },

    #[error("asset directory does not exist: {path}")]
    AssetDirMissing { path: PathBuf },

    /// The user declined to reuse an existing target directory.
    #[error("aborted: target directory left untouched")]
    Aborted,

    #[error("failed to read confirmation reply: {source}")]
    Prompt { source: std::io::Error },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize metadata JSON: {source}")]
    JsonSerialize { source: serde_json::Error },
}
