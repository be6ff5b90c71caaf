use super::{render_recipes, RecipeResponse};
use crate::api::{PageParams, PaginationMetadata};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repo::recipes;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
    pub pagination: PaginationMetadata,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(PageParams),
    responses(
        (status = 200, description = "Recipes, newest first", body = ListRecipesResponse)
    )
)]
pub async fn list_recipes(
    viewer: Option<AuthUser>,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<ListRecipesResponse>, ApiError> {
    let (limit, offset) = params.resolve();
    let viewer = viewer.map(|AuthUser(user)| user);
    let mut conn = state.pool.get()?;

    let (page, total) = recipes::list_recipes(&mut conn, limit, offset)?;
    let aggregates = recipes::load_aggregates(&mut conn, page)?;
    let recipes = render_recipes(&mut conn, aggregates, viewer.as_ref())?;

    Ok(Json(ListRecipesResponse {
        recipes,
        pagination: PaginationMetadata {
            total,
            limit,
            offset,
        },
    }))
}
