use super::authored_recipe;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repo::recipes;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let mut conn = state.pool.get()?;

    authored_recipe(&mut conn, id, &user)?;
    if !recipes::delete_recipe(&mut conn, id)? {
        return Err(ApiError::not_found("Recipe"));
    }

    tracing::info!(recipe_id = id, user_id = %user.id, "deleted recipe");
    Ok(StatusCode::NO_CONTENT)
}
