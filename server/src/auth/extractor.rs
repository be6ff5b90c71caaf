use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::models::User;
use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use thiserror::Error;

use super::db::get_user_from_token;

/// The user behind a valid bearer token.
///
/// Handlers that take `AuthUser` reject anonymous requests with 401. Use
/// `Option<AuthUser>` where anonymous viewers are allowed; a malformed or
/// expired token is still rejected.
pub struct AuthUser(pub User);

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingHeader,
    #[error("Invalid Authorization header")]
    InvalidHeader,
    #[error("Invalid Authorization header format")]
    InvalidFormat,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Session lookup failed: {0}")]
    Lookup(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::Lookup(e) => {
                tracing::error!(error = %e, "session lookup failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            other => (StatusCode::UNAUTHORIZED, other.to_string()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AuthError> {
    let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| AuthError::InvalidHeader)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)?;
    Ok(Some(token))
}

fn authenticate(pool: &DbPool, token: &str) -> Result<User, AuthError> {
    let mut conn = pool.get().map_err(|e| AuthError::Lookup(e.to_string()))?;
    get_user_from_token(&mut conn, token)
        .map_err(|e| AuthError::Lookup(e.to_string()))?
        .ok_or(AuthError::InvalidToken)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<DbPool>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or(AuthError::MissingHeader)?;
        let pool = Arc::<DbPool>::from_ref(state);
        Ok(AuthUser(authenticate(&pool, token)?))
    }
}

impl<S> OptionalFromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<DbPool>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let Some(token) = bearer_token(parts)? else {
            return Ok(None);
        };
        let pool = Arc::<DbPool>::from_ref(state);
        Ok(Some(AuthUser(authenticate(&pool, token)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/users/me");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts(None)).unwrap(), None);
        assert_eq!(bearer_token(&parts(Some("Bearer abc"))).unwrap(), Some("abc"));
        assert!(matches!(
            bearer_token(&parts(Some("Token abc"))),
            Err(AuthError::InvalidFormat)
        ));
    }

    #[test]
    fn test_rejections_are_401() {
        for err in [
            AuthError::MissingHeader,
            AuthError::InvalidHeader,
            AuthError::InvalidFormat,
            AuthError::InvalidToken,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
        }
        assert_eq!(
            AuthError::Lookup("down".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
