use super::{render_recipe, RecipePayload, RecipeResponse};
use crate::api::extract::JsonBody;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repo::recipes;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipePayload,
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid recipe", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RecipePayload>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let mut conn = state.pool.get()?;

    let recipe_id = recipes::create_recipe(&mut conn, user.id, &payload.into())?;
    let response = render_recipe(&mut conn, recipe_id, Some(&user))?;

    Ok((StatusCode::CREATED, Json(response)))
}
