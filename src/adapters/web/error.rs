//! HTTP error responses for web adapter.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::domain::error::TradewatchError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<TradewatchError> for WebError {
    fn from(err: TradewatchError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16(),
        }));
        (self.status, body).into_response()
    }
}

pub fn status_from_error(err: &TradewatchError) -> StatusCode {
    match err {
        TradewatchError::TradeNotFound { .. } => StatusCode::NOT_FOUND,
        TradewatchError::ConfigMissing { .. }
        | TradewatchError::ConfigInvalid { .. }
        | TradewatchError::ConfigParse { .. }
        | TradewatchError::DataSource { .. }
        | TradewatchError::InvalidRecord { .. }
        | TradewatchError::DuplicateTradeId { .. }
        | TradewatchError::Json(_)
        | TradewatchError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
