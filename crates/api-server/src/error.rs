use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use domain::DomainError;
use serde::Serialize;
use tracing::error;

/// Domain failure on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::ContentNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Unauthenticated => StatusCode::UNAUTHORIZED,
            DomainError::Unauthorized(_) => StatusCode::FORBIDDEN,
            DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
            DomainError::UsernameAlreadyExists(_) | DomainError::EmailAlreadyExists(_) => {
                StatusCode::CONFLICT
            }
            DomainError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self.0 {
            DomainError::RepositoryError(detail) => {
                error!(error = %detail, "Repository failure");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(ErrorBody {
                code: status.as_u16(),
                message,
            }),
        )
            .into_response()
    }
}
