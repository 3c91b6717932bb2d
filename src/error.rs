use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TermAuditError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "Configuration file '{}' not found, please create one based on config.default.txt",
        .0.display()
    )]
    ConfigNotFound(PathBuf),

    #[error("Missing required settings in {}:{}", .path.display(), format_keys(.keys))]
    MissingSettings { path: PathBuf, keys: Vec<String> },

    #[error("Directory '{}' does not exist or is not a directory", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("Failed to process file '{path}': {source}")]
    FileProcessing {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("An unexpected error occurred: {0}")]
    Other(String),
}

impl TermAuditError {
    /// Configuration problems are reported before any scanning happens.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            TermAuditError::ConfigNotFound(_)
                | TermAuditError::MissingSettings { .. }
                | TermAuditError::InvalidDirectory(_)
        )
    }
}

fn format_keys(keys: &[String]) -> String {
    keys.iter().map(|k| format!("\n  - {k}")).collect()
}

pub type Result<T> = std::result::Result<T, TermAuditError>;
