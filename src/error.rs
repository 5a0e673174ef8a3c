// src/error.rs

//! Unified error handling for the link resolver.

use std::fmt;

use thiserror::Error;

/// Result type alias for resolver operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// No platform signature matched the URL
    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),

    /// Missing or invalid credential or configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fetched content did not contain the expected structure
    #[error("No media found for {context}: {message}")]
    Extraction { context: String, message: String },

    /// A short link redirected somewhere unexpected
    #[error("Invalid URL after redirect: {url}")]
    AmbiguousRedirect { url: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Coarse classification of an [`AppError`], used by callers to decide
/// whether to retry, pass the URL through, or report the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedUrl,
    Configuration,
    Upstream,
    ExtractionMiss,
    AmbiguousRedirect,
    Internal,
}

impl AppError {
    /// Create an unsupported URL error.
    pub fn unsupported(url: impl Into<String>) -> Self {
        Self::UnsupportedUrl(url.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an extraction miss with context.
    pub fn extraction(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extraction {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedUrl(_) => ErrorKind::UnsupportedUrl,
            Self::Config(_) | Self::Validation(_) | Self::Toml(_) => ErrorKind::Configuration,
            Self::Http(_) | Self::Status { .. } | Self::Json(_) => ErrorKind::Upstream,
            Self::Extraction { .. } => ErrorKind::ExtractionMiss,
            Self::AmbiguousRedirect { .. } => ErrorKind::AmbiguousRedirect,
            Self::Io(_) | Self::Url(_) | Self::Selector { .. } => ErrorKind::Internal,
        }
    }

    /// Upstream failures may succeed on a later attempt; everything else
    /// needs a different input or operator action.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Upstream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            AppError::unsupported("https://example.com").kind(),
            ErrorKind::UnsupportedUrl
        );
        assert_eq!(AppError::config("no key").kind(), ErrorKind::Configuration);
        assert_eq!(
            AppError::extraction("facebook", "nothing").kind(),
            ErrorKind::ExtractionMiss
        );
        assert_eq!(
            AppError::AmbiguousRedirect {
                url: "https://flickr.com".into()
            }
            .kind(),
            ErrorKind::AmbiguousRedirect
        );
    }

    #[test]
    fn test_only_upstream_is_retryable() {
        let status = AppError::Status {
            url: "https://api.imgur.com".into(),
            status: 503,
        };
        assert!(status.is_retryable());
        assert!(!AppError::config("missing key").is_retryable());
        assert!(!AppError::unsupported("x").is_retryable());
    }

    #[test]
    fn test_display_messages() {
        let err = AppError::AmbiguousRedirect {
            url: "https://www.flickr.com/".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid URL after redirect: https://www.flickr.com/"
        );
    }
}
