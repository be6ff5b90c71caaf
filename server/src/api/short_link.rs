use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::repo::recipes;
use crate::AppState;
use axum::{
    extract::{Path, State},
    response::Redirect,
    routing::get,
    Router,
};
use pantry_core::short_link;
use utoipa::OpenApi;

/// Follow a short link to the recipe page.
#[utoipa::path(
    get,
    path = "/s/{code}",
    tag = "recipes",
    params(("code" = String, Path, description = "Base-36 recipe code")),
    responses(
        (status = 307, description = "Redirect to the recipe page"),
        (status = 404, description = "Unknown code", body = ErrorResponse)
    )
)]
pub async fn follow_short_link(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Redirect, ApiError> {
    let recipe_id = short_link::decode(&code).map_err(|e| {
        tracing::debug!(error = %e, "rejected short link");
        ApiError::not_found("Recipe")
    })?;

    let mut conn = state.pool.get()?;
    if recipes::get_recipe(&mut conn, recipe_id)?.is_none() {
        return Err(ApiError::not_found("Recipe"));
    }

    Ok(Redirect::temporary(&format!("/recipes/{recipe_id}")))
}

/// Returns the router for short links (mounted at /s)
pub fn router() -> Router<AppState> {
    Router::new().route("/{code}", get(follow_short_link))
}

#[derive(OpenApi)]
#[openapi(paths(follow_short_link))]
pub struct ApiDoc;
