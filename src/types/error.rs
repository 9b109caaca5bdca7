//! Unified Error Type System
//!
//! Stage-scoped error types for the generate → publish run.
//!
//! ## Error Kinds
//!
//! - **GenerationError**: the generation endpoint failed or its output was unusable
//! - **PublishError**: the CMS rejected the item or never answered
//! - **AppError**: the two stage errors plus configuration and local I/O
//!
//! Every kind maps onto a distinct process exit code so wrapping scripts
//! can tell a bad config from a rejected post.

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Coarse error categories, one per exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing secrets, unreadable config files, invalid values
    Config,
    /// Anything that went wrong before a post existed
    Generation,
    /// The CMS call failed
    Publish,
    /// Local I/O or serialization failures
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config => write!(f, "CONFIG"),
            Self::Generation => write!(f, "GENERATION"),
            Self::Publish => write!(f, "PUBLISH"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

impl ErrorCategory {
    /// Process exit code for this category.
    ///
    /// `2` is left to clap for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::Config => 3,
            Self::Generation => 4,
            Self::Publish => 5,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structured validation error for generated posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// What validation failed
    pub kind: ValidationErrorKind,
    /// Post field that failed validation
    pub field: Option<String>,
    /// Detailed message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Validation failed for '{}': {}", field, self.message)
        } else {
            write!(f, "Validation failed: {}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: None,
            message: message.into(),
        }
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Required field is empty or whitespace
    pub fn missing(field: &str) -> Self {
        Self::new(ValidationErrorKind::MissingField, "value is empty").with_field(field)
    }
}

/// Validation error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Required field missing or blank
    MissingField,
    /// Markup is not a well-formed fragment of allowed tags
    Markup,
    /// Markdown syntax where HTML was required
    Markdown,
}

// =============================================================================
// Stage Errors
// =============================================================================

/// Errors raised while producing a post
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    Request(String),

    /// Non-success status; `body` is the remote error text
    #[error("Generation endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode generation response: {0}")]
    Decode(String),

    #[error("Generation response contained no candidate text")]
    MissingText,

    #[error("Generated text is not a valid post object: {0}")]
    Parse(String),

    #[error("Generated post rejected: {0}")]
    InvalidPost(#[from] ValidationError),

    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },
}

/// Errors raised while creating the CMS item
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Publish request failed: {0}")]
    Request(String),

    /// Non-success status; `body` is the CMS response text
    #[error("CMS returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },
}

/// Error types that can represent an elapsed deadline
pub trait TimeoutError {
    fn timeout(operation: &str, duration: Duration) -> Self;
}

impl TimeoutError for GenerationError {
    fn timeout(operation: &str, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.to_string(),
            duration,
        }
    }
}

impl TimeoutError for PublishError {
    fn timeout(operation: &str, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.to_string(),
            duration,
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Publish failed: {0}")]
    Publish(#[from] PublishError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Config,
            Self::Generation(_) => ErrorCategory::Generation,
            Self::Publish(_) => ErrorCategory::Publish,
            Self::Io(_) | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Config.to_string(), "CONFIG");
        assert_eq!(ErrorCategory::Generation.to_string(), "GENERATION");
        assert_eq!(ErrorCategory::Publish.to_string(), "PUBLISH");
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            ErrorCategory::Internal.exit_code(),
            ErrorCategory::Config.exit_code(),
            ErrorCategory::Generation.exit_code(),
            ErrorCategory::Publish.exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            assert_ne!(*a, 2);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_app_error_routing() {
        let err = AppError::from(GenerationError::MissingText);
        assert_eq!(err.category(), ErrorCategory::Generation);
        assert_eq!(err.exit_code(), 4);

        let err = AppError::from(PublishError::Status {
            status: 422,
            body: "bad slug".to_string(),
        });
        assert_eq!(err.category(), ErrorCategory::Publish);
        assert_eq!(err.exit_code(), 5);

        let err = AppError::Config("GEMINI_API_KEY is not set".to_string());
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_status_error_keeps_body() {
        let err = PublishError::Status {
            status: 422,
            body: r#"{"message":"Validation Error"}"#.to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("422"));
        assert!(text.contains("Validation Error"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::missing("title");
        assert_eq!(err.to_string(), "Validation failed for 'title': value is empty");

        let err = ValidationError::new(ValidationErrorKind::Markup, "unclosed <p>");
        assert_eq!(err.to_string(), "Validation failed: unclosed <p>");
    }

    #[test]
    fn test_timeout_constructor() {
        let err = GenerationError::timeout("generateContent", Duration::from_secs(60));
        assert!(matches!(err, GenerationError::Timeout { .. }));
        assert!(err.to_string().contains("generateContent"));
    }
}
