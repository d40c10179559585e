use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use database::error::StoreError;
use log::error;
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

/// Failure taxonomy surfaced by the HTTP layer.
///
/// Every handler funnels into this type, so no failure leaves the process
/// as an unhandled crash and every response body carries a stable
/// machine-checkable `code` next to the human-readable message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Precondition(String),

    #[error("forbidden")]
    Forbidden,

    #[error("storage backend unavailable")]
    StoreUnavailable,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Precondition(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Validation(_) => "validation_failure",
            Self::Precondition(_) => "precondition_failure",
            Self::Forbidden => "forbidden",
            Self::StoreUnavailable => "store_unavailable",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity } => Self::NotFound(entity.to_owned()),
            StoreError::Validation { .. } => Self::Validation(err.to_string()),
            StoreError::DuplicateKey { .. } => {
                // Upserts recover duplicates internally; one reaching a read
                // path means the store itself is misbehaving.
                error!("unexpected duplicate-key on a read path: {err}");
                Self::StoreUnavailable
            }
            StoreError::Db(db_err) => {
                error!("database error: {db_err}");
                Self::StoreUnavailable
            }
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        error!("database error: {err}");
        Self::StoreUnavailable
    }
}

#[cfg(test)]
mod test {
    use super::ApiError;
    use axum::http::StatusCode;
    use database::error::StoreError;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::NotFound("unit".to_owned()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Precondition("select a college first".to_owned()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::StoreUnavailable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ApiError::NotFound("unit".to_owned()).code(), "not_found");
        assert_eq!(
            ApiError::Validation("x".to_owned()).code(),
            "validation_failure"
        );
        assert_eq!(
            ApiError::Precondition("x".to_owned()).code(),
            "precondition_failure"
        );
        assert_eq!(ApiError::StoreUnavailable.code(), "store_unavailable");
    }

    #[test]
    fn test_store_not_found_keeps_entity_detail() {
        let err = ApiError::from(StoreError::NotFound { entity: "college" });
        assert_eq!(err.to_string(), "college not found");
    }

    #[test]
    fn test_duplicate_key_never_maps_to_a_client_error() {
        let err = ApiError::from(StoreError::DuplicateKey {
            entity: "semester",
            parent: "course-1".to_owned(),
            key: "6".to_owned(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
