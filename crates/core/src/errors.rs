//! Core error types for the ETF Helper application.
//!
//! This module defines transport-agnostic error types. HTTP status codes
//! are assigned by the server's boundary adapter, never here.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default message for [`Error::NotFound`].
pub const NOT_FOUND_MESSAGE: &str = "리소스를 찾을 수 없습니다";
/// Default message for [`Error::BadRequest`].
pub const BAD_REQUEST_MESSAGE: &str = "잘못된 요청입니다";
/// Default message for [`Error::Validation`].
pub const VALIDATION_MESSAGE: &str = "유효성 검사에 실패했습니다";

/// Root error type for the application.
///
/// Each variant carries a human-readable message (defaulted to the
/// localized text above, overridable at construction) and maps to a
/// stable machine-readable code via [`Error::code`].
#[derive(Error, Debug)]
pub enum Error {
    /// The requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request was structurally valid but cannot be served.
    #[error("{0}")]
    BadRequest(String),

    /// Request parameter validation failed, optionally with
    /// field-level details.
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Anything the taxonomy does not name. The message is logged by the
    /// boundary adapter and never serialized to clients.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn not_found() -> Self {
        Error::NotFound(NOT_FOUND_MESSAGE.to_string())
    }

    pub fn not_found_with(message: impl Into<String>) -> Self {
        Error::NotFound(message.into())
    }

    pub fn bad_request() -> Self {
        Error::BadRequest(BAD_REQUEST_MESSAGE.to_string())
    }

    pub fn bad_request_with(message: impl Into<String>) -> Self {
        Error::BadRequest(message.into())
    }

    pub fn validation() -> Self {
        Error::Validation {
            message: VALIDATION_MESSAGE.to_string(),
            details: None,
        }
    }

    pub fn validation_with(details: serde_json::Value) -> Self {
        Error::Validation {
            message: VALIDATION_MESSAGE.to_string(),
            details: Some(details),
        }
    }

    /// Stable machine-readable code for the error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NOT_FOUND",
            Error::BadRequest(_) => "BAD_REQUEST",
            Error::Validation { .. } => "VALIDATION_ERROR",
            Error::Unexpected(_) => "INTERNAL_ERROR",
        }
    }

    /// Field-level details, present only on validation errors.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Error::Validation { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}
