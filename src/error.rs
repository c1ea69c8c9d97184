//! Error handling for the resume screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("History storage error: {0}")]
    Storage(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

impl ScreenerError {
    /// True when the document itself could not be turned into text.
    ///
    /// Callers branch on this instead of treating the upload as an
    /// ineligible resume with no skills.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            ScreenerError::Extraction(_) | ScreenerError::UnsupportedFormat(_)
        )
    }
}

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ScreenerError {
    fn from(err: anyhow::Error) -> Self {
        ScreenerError::Storage(format!("{:#}", err))
    }
}

/// Convert askama rendering errors to our custom error type
impl From<askama::Error> for ScreenerError {
    fn from(err: askama::Error) -> Self {
        ScreenerError::OutputFormatting(err.to_string())
    }
}
