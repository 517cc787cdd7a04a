//! Error-to-HTTP boundary adapter.
//!
//! Handlers return [`ApiResult`]; any raised [`etf_helper_core::Error`]
//! is serialized here into the standard error envelope with the matching
//! status code. Internal representations never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use etf_helper_core::{response::ApiResponse, Error as CoreError};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(CoreError::Unexpected(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            CoreError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("internal error: {}", self.0);
            ApiResponse::failure(self.0.code(), "내부 서버 오류가 발생했습니다", None)
        } else {
            ApiResponse::failure(
                self.0.code(),
                self.0.to_string(),
                self.0.details().cloned(),
            )
        };

        (status, Json(body)).into_response()
    }
}
