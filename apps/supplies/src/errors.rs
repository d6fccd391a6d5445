use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type.
/// Every fallible step of a report run returns `Result<T, AppError>`; `main` wraps it in `anyhow`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot read inventory file {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Inventory parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unknown group: '{0}' has no rows in the inventory")]
    UnknownGroup(String),

    #[error("Invalid layout configuration: {0}")]
    InvalidLayout(String),

    #[error("Unknown report: '{0}'")]
    UnknownReport(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Cannot write {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    /// Short machine-friendly code, used as a structured field when logging failures.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InputRead { .. } => "INPUT_READ",
            AppError::Parse { .. } => "PARSE_ERROR",
            AppError::UnknownGroup(_) => "UNKNOWN_GROUP",
            AppError::InvalidLayout(_) => "INVALID_LAYOUT",
            AppError::UnknownReport(_) => "UNKNOWN_REPORT",
            AppError::Catalog(_) => "CATALOG_ERROR",
            AppError::Output { .. } => "OUTPUT_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_group_message_names_group() {
        let err = AppError::UnknownGroup("tall cabinet".to_string());
        assert!(err.to_string().contains("'tall cabinet'"));
        assert_eq!(err.code(), "UNKNOWN_GROUP");
    }

    #[test]
    fn test_parse_error_message_has_line() {
        let err = AppError::Parse {
            line: 7,
            message: "bad order".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Inventory parse error at line 7: bad order"
        );
    }
}
