use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::models::Ingredient;
use crate::repo;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, OpenApi};

#[derive(Debug, Deserialize, IntoParams)]
pub struct IngredientSearch {
    /// Case-insensitive prefix of the ingredient name
    pub name: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(IngredientSearch),
    responses(
        (status = 200, description = "Ingredients ordered by name", body = Vec<Ingredient>)
    )
)]
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(search): Query<IngredientSearch>,
) -> Result<Json<Vec<Ingredient>>, ApiError> {
    let mut conn = state.pool.get()?;
    let found = repo::ingredients::list_ingredients(&mut conn, search.name.as_deref())?;
    Ok(Json(found))
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 200, description = "Ingredient", body = Ingredient),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Ingredient>, ApiError> {
    let mut conn = state.pool.get()?;
    repo::ingredients::get_ingredient(&mut conn, id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Ingredient"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ingredients))
        .route("/{id}", get(get_ingredient))
}

#[derive(OpenApi)]
#[openapi(paths(list_ingredients, get_ingredient), components(schemas(Ingredient)))]
pub struct ApiDoc;
