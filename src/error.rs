use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::calc::CalcError;
use crate::ingest::Rejection;
use crate::store::StoreError;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Calculation(#[from] CalcError),

    #[error("upload rejected: {} invalid row(s)", .0.len())]
    InvalidUpload(Vec<String>),

    #[error("upload rejected: file could not be read")]
    UnreadableUpload(Vec<String>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::Unreadable(errors) => AppError::UnreadableUpload(errors),
            Rejection::InvalidRows(errors) => AppError::InvalidUpload(errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Calculation(CalcError::PolicyNotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::InvalidUpload(_) | AppError::UnreadableUpload(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::InvalidUpload(errors) | AppError::UnreadableUpload(errors) => json!({
                "message": self.to_string(),
                "errors": errors,
            }),
            // the sqlx cause stays in the log
            AppError::Store(e) => {
                tracing::error!(error = %e, table = %e.table, op = %e.op, "Storage failure");
                json!({ "message": e.operation_message() })
            }
            _ => json!({ "message": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
