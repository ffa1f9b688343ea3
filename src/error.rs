use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::envelope::DecodeError;
use crate::fetcher::FetchError;
use crate::normalize::NormalizeError;

#[derive(Debug)]
pub enum ApiError {
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response(),
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(value: FetchError) -> Self {
        error!("Activity search request failed: {value}");
        ApiError::Internal("Failed to fetch activities".into())
    }
}

impl From<NormalizeError> for ApiError {
    fn from(value: NormalizeError) -> Self {
        match &value {
            NormalizeError::Decode(DecodeError::Parse(_)) => {
                error!("Activity search returned a non-JSON body: {value}")
            }
            NormalizeError::Decode(DecodeError::Structure(_)) => {
                error!("Activity search returned an unexpected envelope: {value}")
            }
            NormalizeError::Format { .. } => error!("Activity has a malformed date: {value}"),
        }
        ApiError::Internal("Failed to read activities".into())
    }
}

impl From<askama::Error> for ApiError {
    fn from(value: askama::Error) -> Self {
        error!("Template rendering failed: {value}");
        ApiError::Internal("Failed to render page".into())
    }
}
