use crate::helpers::{ErrorResponse, FieldMessage};
use crate::repository::RepositoryError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Domain failures surfaced by every service. The HTTP mapping lives in the
/// `ResponseError` impl below; the error handler middleware adds the path.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    /// A write or delete would break a foreign key or uniqueness constraint.
    #[error("{0}")]
    Integrity(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Validation failed")]
    Validation(Vec<FieldMessage>),
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_field(field_name: &str, message: &str) -> Self {
        Self::Validation(vec![FieldMessage::new(field_name, message)])
    }

    /// Label used in the `error` field of the response body.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Resource not found",
            Self::Integrity(_) => "Database exception",
            Self::BadRequest(_) => "Bad request",
            Self::Validation(_) => "Validation exception",
            Self::Internal(_) => "Internal server error",
        }
    }

    pub fn to_body(&self) -> ErrorResponse {
        let body = ErrorResponse::build(self.status_code(), self.label())
            .set_message(&self.to_string());

        match self {
            Self::Validation(field_messages) => body.set_field_messages(field_messages.clone()),
            _ => body,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Integrity(details) => {
                tracing::warn!("Integrity violation: {}", details);
                Self::Integrity("Integrity violation".to_string())
            }
            RepositoryError::InvalidSort(property) => Self::invalid_field(
                "sort",
                &format!("Unknown sort property: {}", property),
            ),
            RepositoryError::Database(err) => {
                tracing::error!("Database failure: {:?}", err);
                Self::Internal("Unexpected database error".to_string())
            }
        }
    }
}

impl From<serde_valid::validation::Errors> for ServiceError {
    fn from(errors: serde_valid::validation::Errors) -> Self {
        Self::Validation(FieldMessage::from_validation(&errors))
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Integrity(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_body())
    }
}
