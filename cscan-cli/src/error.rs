//! Error handling module for the cscan CLI.
//!
//! Scanning itself never fails; everything here is about the world around
//! it: configuration, files on disk and command-line arguments.

use cscan_lex::RulesError;
use thiserror::Error;

/// Main error type for the cscan CLI application.
#[derive(Error, Debug)]
pub enum CscanError {
    /// Error when the configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when a custom language defines an invalid rule set.
    #[error("Invalid rules for language `{language}`: {source}")]
    Rules {
        /// Name of the language as written in the configuration
        language: String,
        /// What the rules builder rejected
        #[source]
        source: RulesError,
    },

    /// Error when file operations fail.
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// Error when input validation fails.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error when a command execution fails.
    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CscanError {
    /// Attach a language name to a rules error.
    pub fn rules(language: impl Into<String>, source: RulesError) -> Self {
        Self::Rules {
            language: language.into(),
            source,
        }
    }
}

/// Result type alias using CscanError.
pub type Result<T> = std::result::Result<T, CscanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CscanError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_rules_error_display() {
        let err = CscanError::rules("cobol", RulesError::NoOpeners);
        assert!(err.to_string().starts_with("Invalid rules for language `cobol`: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_file_operation_error_display() {
        let err = CscanError::FileOperation("permission denied".to_string());
        assert_eq!(err.to_string(), "File operation failed: permission denied");
    }

    #[test]
    fn test_validation_error_display() {
        let err = CscanError::Validation("unknown policy".to_string());
        assert_eq!(err.to_string(), "Validation error: unknown policy");
    }

    #[test]
    fn test_command_execution_error_display() {
        let err = CscanError::CommandExecution("2 file(s) failed".to_string());
        assert_eq!(err.to_string(), "Command execution failed: 2 file(s) failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CscanError = io_err.into();
        assert!(matches!(err, CscanError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: CscanError = json_err.into();
        assert!(matches!(err, CscanError::Json(_)));
    }
}
