use thiserror::Error;

/// Failures that abort a report request. Missing assets (logo, signatures,
/// photos) are not part of this taxonomy: they degrade to placeholders at
/// the point of use and are only logged.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("report generation failed: {0}")]
    Composition(String),

    #[error("pdf encoding failed: {0}")]
    Encode(String),

    #[error("order store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("order snapshot is not valid json: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("email dispatch failed: {0}")]
    Mail(String),
}
