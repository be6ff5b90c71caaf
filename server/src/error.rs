use crate::api::ErrorResponse;
use crate::repo::is_unique_violation;
use crate::repo::recipes::WriteError;
use crate::repo::subscriptions::SubscribeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pantry_core::{RecipeValidationError, SubscriptionError};
use thiserror::Error;

/// Failure of a request handler, rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(diesel::result::Error),

    #[error("Database connection failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl ApiError {
    pub fn not_found(what: &str) -> Self {
        Self::NotFound(format!("{what} not found"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Database(_) | Self::Pool(_) => {
                tracing::error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Not found".to_string()),
            ref e if is_unique_violation(e) => Self::Conflict("Resource already exists".to_string()),
            e => Self::Database(e),
        }
    }
}

impl From<RecipeValidationError> for ApiError {
    fn from(err: RecipeValidationError) -> Self {
        tracing::debug!(kind = err.kind(), "rejected recipe payload");
        Self::BadRequest(err.to_string())
    }
}

impl From<SubscriptionError> for ApiError {
    fn from(err: SubscriptionError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<WriteError> for ApiError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Invalid(e) => e.into(),
            e @ (WriteError::UnknownTags(_) | WriteError::UnknownIngredients(_)) => {
                Self::BadRequest(e.to_string())
            }
            WriteError::RecipeNotFound => Self::not_found("Recipe"),
            WriteError::Database(e) => e.into(),
        }
    }
}

impl From<SubscribeError> for ApiError {
    fn from(err: SubscribeError) -> Self {
        match err {
            SubscribeError::Invalid(e) => e.into(),
            SubscribeError::AuthorNotFound => Self::not_found("User"),
            e @ SubscribeError::AlreadySubscribed(_) => Self::Conflict(e.to_string()),
            SubscribeError::Database(e) => e.into(),
        }
    }
}
