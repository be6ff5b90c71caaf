//! Favorites and shopping cart membership.

use super::RecipeShort;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::User;
use crate::repo::lists::RecipeList;
use crate::repo::recipes;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

fn add(
    state: &AppState,
    user: &User,
    recipe_id: i32,
    list: RecipeList,
) -> Result<(StatusCode, Json<RecipeShort>), ApiError> {
    let mut conn = state.pool.get()?;

    let recipe =
        recipes::get_recipe(&mut conn, recipe_id)?.ok_or_else(|| ApiError::not_found("Recipe"))?;

    if !list.add(&mut conn, user.id, recipe_id)? {
        return Err(ApiError::Conflict(list.already_present_message().to_string()));
    }

    Ok((StatusCode::CREATED, Json(RecipeShort::from(&recipe))))
}

fn remove(
    state: &AppState,
    user: &User,
    recipe_id: i32,
    list: RecipeList,
) -> Result<StatusCode, ApiError> {
    let mut conn = state.pool.get()?;

    if recipes::get_recipe(&mut conn, recipe_id)?.is_none() {
        return Err(ApiError::not_found("Recipe"));
    }

    if !list.remove(&mut conn, user.id, recipe_id)? {
        return Err(ApiError::NotFound(list.not_present_message().to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite",
    tag = "favorites",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Added to favorites", body = RecipeShort),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Already in favorites", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_favorite(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeShort>), ApiError> {
    add(&state, &user, id, RecipeList::Favorites)
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/favorite",
    tag = "favorites",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Removed from favorites"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found or not a favorite", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_favorite(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    remove(&state, &user, id, RecipeList::Favorites)
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/shopping_cart",
    tag = "shopping_cart",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Added to the shopping cart", body = RecipeShort),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Already in the shopping cart", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_to_shopping_cart(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<RecipeShort>), ApiError> {
    add(&state, &user, id, RecipeList::ShoppingCart)
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/shopping_cart",
    tag = "shopping_cart",
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Removed from the shopping cart"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found or not in the cart", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn remove_from_shopping_cart(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    remove(&state, &user, id, RecipeList::ShoppingCart)
}
