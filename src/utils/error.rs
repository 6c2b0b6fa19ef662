use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

use crate::models::ErrorResponse;

/// MongoDB duplicate key error code
const DUPLICATE_KEY: i32 = 11000;

/// Unique index on `phoneNumber`, as named by MongoDB
const PHONE_NUMBER_INDEX: &str = "phoneNumber_1";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn user_not_found() -> Self {
        AppError::NotFound("User not found".to_string())
    }

    pub fn invalid_phone_number() -> Self {
        AppError::NotFound("Invalid phone number".to_string())
    }

    pub fn bad_request() -> Self {
        AppError::BadRequest("Bad request".to_string())
    }

    pub fn phone_number_taken() -> Self {
        AppError::Conflict("Phone number already registered".to_string())
    }

    /// Index named by a MongoDB unique index violation, e.g. `phoneNumber_1`
    pub fn duplicate_key_index(&self) -> Option<&str> {
        match self {
            AppError::Database(e) => match e.kind.as_ref() {
                ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY => {
                    Some(duplicate_index_name(&we.message).unwrap_or(""))
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Insert failures: a taken phone number is the caller's conflict, a
    /// collision on any other unique index is a server fault.
    pub fn on_insert(self) -> Self {
        let index = self.duplicate_key_index().map(str::to_string);
        match index {
            Some(index) if index == PHONE_NUMBER_INDEX => AppError::phone_number_taken(),
            Some(index) => AppError::Internal(format!("Duplicate key on index '{}'", index)),
            None => self,
        }
    }
}

/// `E11000 duplicate key error collection: db.users index: phoneNumber_1 dup key: ...`
fn duplicate_index_name(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("index: ")?;
    rest.split_whitespace().next()
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let msg = if status.is_server_error() {
            log::error!("❌ {}", self);
            "Internal server error".to_string()
        } else {
            log::warn!("⚠️  {} - {}", status.as_u16(), self);
            self.to_string()
        };

        HttpResponse::build(status).json(ErrorResponse { msg })
    }
}
