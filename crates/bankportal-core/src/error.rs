//! Error types for bankportal-core
//!
//! Error codes, severities and detailed messages with suggestions for the
//! ledger state container.

use bankportal_source::SourceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The initial record fetch failed
    SourceError,
    /// Unknown transaction or form kind
    InvalidKind,
    /// Page index outside the available pages
    PageOutOfRange,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::SourceError => write!(f, "SOURCE_ERROR"),
            ErrorCode::InvalidKind => write!(f, "INVALID_KIND"),
            ErrorCode::PageOutOfRange => write!(f, "PAGE_OUT_OF_RANGE"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl ErrorSeverity {
    /// Log level errors of this severity are reported at
    pub fn level(self) -> log::Level {
        match self {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error => log::Level::Error,
        }
    }
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for bankportal-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Failed to load transactions: {message}")]
    SourceError { message: String },

    #[error("Unknown transaction kind: {kind}")]
    InvalidKind { kind: String },

    #[error("Page {page} out of range ({page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::SourceError { .. } => ErrorCode::SourceError,
            CoreError::InvalidKind { .. } => ErrorCode::InvalidKind,
            CoreError::PageOutOfRange { .. } => ErrorCode::PageOutOfRange,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::SourceError { .. } => ErrorSeverity::Error,
            CoreError::InvalidKind { .. } => ErrorSeverity::Warning,
            CoreError::PageOutOfRange { .. } => ErrorSeverity::Info,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::SourceError { message } => details
                .with_detail(serde_json::json!({ "source_message": message }))
                .with_suggestion("Check that the data file exists and holds a JSON array.".to_string())
                .with_suggestion("Reload the page to try again.".to_string()),
            CoreError::InvalidKind { .. } => details.with_suggestion(
                "Use one of: deposit, withdraw, transfer.".to_string(),
            ),
            CoreError::PageOutOfRange { page_count, .. } => {
                let suggestion = if *page_count == 0 {
                    "The ledger is empty; only page 0 exists.".to_string()
                } else {
                    format!("Use a page index between 0 and {}.", page_count - 1)
                };
                details.with_suggestion(suggestion)
            }
        }
    }
}

impl From<SourceError> for CoreError {
    fn from(error: SourceError) -> Self {
        CoreError::SourceError {
            message: error.to_string(),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: String) -> Self {
        Self {
            operation,
            data: serde_json::json!({}),
        }
    }

    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        log::log!(
            target: "bankportal::error",
            error.severity().level(),
            "{} [{}] {} - Operation: {} - Data: {}",
            error.severity().to_string().to_uppercase(),
            error.code(),
            error,
            context.operation,
            context.data
        );
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "bankportal::error",
            "WARNING: {} - Operation: {} - Data: {}",
            message,
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::SourceError.to_string(), "SOURCE_ERROR");
        assert_eq!(ErrorCode::InvalidKind.to_string(), "INVALID_KIND");
        assert_eq!(ErrorCode::PageOutOfRange.to_string(), "PAGE_OUT_OF_RANGE");
    }

    #[test]
    fn test_error_code_serializes_screaming() {
        let json = serde_json::to_string(&ErrorCode::PageOutOfRange).unwrap();
        assert_eq!(json, "\"PAGE_OUT_OF_RANGE\"");
    }

    #[test]
    fn test_core_error_code_and_severity() {
        let error = CoreError::InvalidKind { kind: "loan".to_string() };
        assert_eq!(error.code(), ErrorCode::InvalidKind);
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let error = CoreError::SourceError { message: "boom".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert_eq!(error.severity().level(), log::Level::Error);
        assert_eq!(ErrorSeverity::Info.level(), log::Level::Info);
    }

    #[test]
    fn test_from_source_error() {
        let source = SourceError::MalformedJson {
            location: "data.json".to_string(),
            message: "EOF".to_string(),
        };
        let error = CoreError::from(source);
        assert_eq!(error.code(), ErrorCode::SourceError);
        assert!(error.to_string().contains("data.json"));
    }

    #[test]
    fn test_error_details_page_out_of_range() {
        let details = CoreError::PageOutOfRange { page: 7, page_count: 3 }.to_details();
        assert_eq!(details.code, ErrorCode::PageOutOfRange);
        assert!(details.message.contains("Page 7"));
        assert_eq!(details.suggestions, vec!["Use a page index between 0 and 2.".to_string()]);

        let empty = CoreError::PageOutOfRange { page: 1, page_count: 0 }.to_details();
        assert!(empty.suggestions[0].contains("empty"));
    }

    #[test]
    fn test_error_details_display() {
        let details = CoreError::SourceError { message: "missing".to_string() }.to_details();
        let text = details.to_string();
        assert!(text.starts_with("[SOURCE_ERROR]"));
        assert!(text.contains("Suggestions:"));
        assert!(details.details.is_some());
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("load".to_string())
            .with_data("source", serde_json::json!("file data.json"));
        assert_eq!(context.operation, "load");
        assert_eq!(context.data["source"], "file data.json");
    }
}
