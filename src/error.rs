use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::api::response::json_with_code;
use crate::usecase::UsecaseError;

/// Boundary error; each variant is one status bucket and carries the message
/// sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_id() -> Self {
        ApiError::BadRequest("invalid id".to_string())
    }

    /// Maps a use case failure for the employee `id` the request targeted.
    pub fn from_usecase(err: UsecaseError, id: Option<u64>) -> Self {
        match err {
            UsecaseError::Validation(_)
            | UsecaseError::InvalidDate
            | UsecaseError::DuplicateEmail
            | UsecaseError::InvalidPagination => ApiError::BadRequest(err.to_string()),
            _ if err.is_not_found() => match id {
                Some(id) => ApiError::NotFound(format!("employee with id {id} not found")),
                None => ApiError::NotFound(err.to_string()),
            },
            UsecaseError::Repository(e) => {
                error!(error = %e, employee_id = ?id, "repository failure");
                ApiError::Internal("internal server error".to_string())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        json_with_code::<()>(self.status_code(), self.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryError;
    use crate::utils::validator::ValidationError;

    #[test]
    fn client_errors_keep_their_message() {
        let err = ApiError::from_usecase(UsecaseError::DuplicateEmail, None);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "duplicate email");

        let err = ApiError::from_usecase(ValidationError::EmptyName.into(), Some(3));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "empty name field");
    }

    #[test]
    fn not_found_names_the_employee() {
        let err = ApiError::from_usecase(RepositoryError::NotFound.into(), Some(12));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "employee with id 12 not found");
    }

    #[test]
    fn storage_failures_are_internal_and_opaque() {
        let err = ApiError::from_usecase(
            RepositoryError::Database(sqlx::Error::PoolTimedOut).into(),
            Some(1),
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "internal server error");
    }
}
