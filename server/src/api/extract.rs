use crate::error::ApiError;
use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

/// JSON request body whose rejections use the API's `{"error": ...}` shape.
///
/// Syntax errors, missing fields, wrong types and a missing JSON content type
/// all become 400 responses.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}
