//! Standard response envelope for all API payloads.
//!
//! Every endpoint returns an [`ApiResponse`]: `{success, data, meta?}` on
//! success, `{success: false, error: {code, message, details?}}` on
//! failure. Field names are part of the wire contract and stay snake_case.

use serde::{Deserialize, Serialize};

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    /// Builds pagination metadata. `limit` must be >= 1, which query
    /// validation guarantees upstream.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = (total + limit as u64 - 1) / limit as u64;
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// Structured error payload for failed responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// The uniform `{success, data|error, meta?}` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: None,
        }
    }

    /// Success envelope with pagination metadata.
    pub fn paginated(data: T, page: u32, limit: u32, total: u64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: Some(PaginationMeta::new(page, limit, total)),
        }
    }
}

impl ApiResponse<()> {
    /// Failure envelope. `data` and `meta` are absent.
    pub fn failure(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorDetail {
                code: code.into(),
                message: message.into(),
                details,
            }),
            meta: None,
        }
    }
}
