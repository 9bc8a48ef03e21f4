use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

use crate::parser::DecodeError;
use crate::store::StoreError;

/// Failures surfaced by the HTTP handlers.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    InvalidPayload(String),

    #[display(fmt = "city name is required")]
    MissingCityName,

    #[display(fmt = "city not found: {}", _0)]
    CityNotFound(String),

    #[display(fmt = "no salary data on file")]
    NoSalaryData,

    #[display(fmt = "{}", _0)]
    Decode(DecodeError),

    #[display(fmt = "{}", _0)]
    Store(StoreError),
}

impl std::error::Error for AppError {}

impl From<DecodeError> for AppError {
    fn from(e: DecodeError) -> Self {
        AppError::Decode(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl AppError {
    /// Text placed in the `error` field of the response body.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Store(e) => e.public_message(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Store(e) = self {
            error!(error = %e, "Store operation failed");
        }

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.client_message(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreOp, Table};

    #[test]
    fn lookup_failures_are_bad_requests() {
        assert_eq!(
            AppError::CityNotFound("佛山".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NoSalaryData.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::MissingCityName.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_hide_the_reason() {
        let err = AppError::from(StoreError::new(
            StoreOp::Replace,
            Table::Results,
            "Deadlock found when trying to get lock",
        ));

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "failed to replace results");
    }
}
