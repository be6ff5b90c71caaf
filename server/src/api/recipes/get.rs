use super::{render_recipe, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe with tags, author and ingredients", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    viewer: Option<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let mut conn = state.pool.get()?;
    let viewer = viewer.map(|AuthUser(user)| user);

    Ok(Json(render_recipe(&mut conn, id, viewer.as_ref())?))
}
