use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bo_derive::api_model;
use std::borrow::Cow;

/// JSON body returned for failed requests.
#[api_model]
pub struct ErrorBody {
    /// Human-readable failure description
    pub message: String,
}

/// An error that is ready to leave the process as an HTTP response.
///
/// Slices map their own error enums into this type at the handler boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: Cow<'static, str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        }
        (self.status, Json(ErrorBody { message: self.message.into_owned() })).into_response()
    }
}
