//! HTTP error responses.
//!
//! Bodies are `{"detail": "..."}` so existing clients can show the message
//! unchanged.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use grammarkey::{GenerateError, TreeError};

/// `Json<T>` whose rejections come back as 400 `{"detail"}` bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

pub fn err(msg: impl Into<String>) -> ApiError {
    ApiError { status: StatusCode::BAD_REQUEST, detail: msg.into() }
}

pub fn err500(msg: impl Into<String>) -> ApiError {
    ApiError { status: StatusCode::INTERNAL_SERVER_ERROR, detail: msg.into() }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: &self.detail })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        err(rejection.body_text())
    }
}

impl From<GenerateError> for ApiError {
    fn from(e: GenerateError) -> Self {
        err(e.to_string())
    }
}

impl From<TreeError> for ApiError {
    fn from(e: TreeError) -> Self {
        err(e.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        tracing::error!(error = %e, "blocking task failed");
        err500("internal error")
    }
}
