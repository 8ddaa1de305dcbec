//! API error taxonomy and its mapping onto HTTP responses.
//!
//! # Responsibility
//! - Translate service failures and extractor rejections into JSON error
//!   bodies with the matching status code.
//!
//! # Invariants
//! - Store failure details are logged, never echoed to clients.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use reminder_core::{InvalidParam, ReminderId, ReminderServiceError};
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const BAD_REQUEST_TITLE: &str = "Bad Request";
pub const BAD_REQUEST_DETAIL: &str = "request is invalid. please retry with a correct request.";
pub const NOT_FOUND_TITLE: &str = "Resource Not Found";
pub const INTERNAL_ERROR_TITLE: &str = "Internal Server Error";
pub const INTERNAL_ERROR_DETAIL: &str = "internal server error is occurred.";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(Vec<InvalidParam>),
    NotFound(ReminderId),
    Internal(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(params) => write!(f, "bad request ({} invalid params)", params.len()),
            Self::NotFound(id) => write!(f, "reminder (id = {id}) is not found."),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ReminderServiceError> for ApiError {
    fn from(value: ReminderServiceError) -> Self {
        match value {
            ReminderServiceError::ValidationFailed(params) => Self::BadRequest(params),
            ReminderServiceError::NotFound(id) => Self::NotFound(id),
            ReminderServiceError::StoreFailure(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(vec![InvalidParam::new("body", value.body_text())])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(vec![InvalidParam::new("query", value.body_text())])
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::BadRequest(vec![InvalidParam::new("id", value.body_text())])
    }
}

/// 400 body listing every invalid parameter.
#[derive(Debug, Serialize)]
pub struct BadRequestError {
    pub title: &'static str,
    pub detail: &'static str,
    #[serde(rename = "invalid-params")]
    pub invalid_params: Vec<InvalidParam>,
}

/// 404 and 500 body.
#[derive(Debug, Serialize)]
pub struct ProblemError {
    pub title: &'static str,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(invalid_params) => {
                let names = invalid_params
                    .iter()
                    .map(|param| param.name.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                warn!("event=http_error module=api status=400 invalid_params={names}");
                let body = BadRequestError {
                    title: BAD_REQUEST_TITLE,
                    detail: BAD_REQUEST_DETAIL,
                    invalid_params,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::NotFound(id) => {
                let body = ProblemError {
                    title: NOT_FOUND_TITLE,
                    detail: format!("reminder (id = {id}) is not found."),
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
            Self::Internal(message) => {
                error!("event=http_error module=api status=500 error={message}");
                let body = ProblemError {
                    title: INTERNAL_ERROR_TITLE,
                    detail: INTERNAL_ERROR_DETAIL.to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
