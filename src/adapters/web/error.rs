//! HTTP error responses for the JSON API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::error::CointrendError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }
}

impl From<CointrendError> for ApiError {
    fn from(err: CointrendError) -> Self {
        let status = match &err {
            CointrendError::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            CointrendError::MarketData { .. } | CointrendError::InsufficientData { .. } => {
                StatusCode::BAD_GATEWAY
            }
            CointrendError::ConfigParse { .. }
            | CointrendError::ConfigMissing { .. }
            | CointrendError::ConfigInvalid { .. }
            | CointrendError::State { .. }
            | CointrendError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                detail: &self.detail,
            }),
        )
            .into_response()
    }
}
