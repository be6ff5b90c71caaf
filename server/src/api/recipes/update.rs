use super::{authored_recipe, render_recipe, RecipePayload, RecipeResponse};
use crate::api::extract::JsonBody;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repo::recipes;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

/// Replace a recipe's contents. Tags and ingredients are swapped wholesale.
#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = RecipePayload,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Invalid recipe", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(payload): JsonBody<RecipePayload>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let mut conn = state.pool.get()?;

    authored_recipe(&mut conn, id, &user)?;
    recipes::update_recipe(&mut conn, id, &payload.into())?;

    Ok(Json(render_recipe(&mut conn, id, Some(&user))?))
}
