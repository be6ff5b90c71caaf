use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::repo::recipes;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

pub fn short_url(public_url: &str, recipe_id: i32) -> String {
    format!("{}/s/{}", public_url, pantry_core::short_link::encode(recipe_id))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/get-link",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Short link to the recipe", body = ShortLinkResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ShortLinkResponse>, ApiError> {
    let mut conn = state.pool.get()?;

    if recipes::get_recipe(&mut conn, id)?.is_none() {
        return Err(ApiError::not_found("Recipe"));
    }

    Ok(Json(ShortLinkResponse {
        short_link: short_url(&state.public_url, id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url() {
        assert_eq!(short_url("https://pantry.example", 36), "https://pantry.example/s/10");
        assert_eq!(
            serde_json::to_value(ShortLinkResponse {
                short_link: "x".to_string()
            })
            .unwrap(),
            serde_json::json!({"short-link": "x"})
        );
    }
}
