pub mod create;
pub mod delete;
pub mod download;
pub mod get;
pub mod link;
pub mod list;
pub mod lists;
pub mod update;

use crate::api::users::UserResponse;
use crate::error::ApiError;
use crate::models::{Recipe, Tag, User};
use crate::repo::lists::RecipeList;
use crate::repo::recipes::RecipeAggregate;
use crate::repo::{recipes as recipe_repo, subscriptions};
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pantry_core::{IngredientAmount, RecipeDraft};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route(
            "/download_shopping_cart",
            get(download::download_shopping_cart),
        )
        .route(
            "/{id}",
            get(get::get_recipe)
                .patch(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route(
            "/{id}/favorite",
            post(lists::add_favorite).delete(lists::remove_favorite),
        )
        .route(
            "/{id}/shopping_cart",
            post(lists::add_to_shopping_cart).delete(lists::remove_from_shopping_cart),
        )
        .route("/{id}/get-link", get(link::get_link))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        lists::add_favorite,
        lists::remove_favorite,
        lists::add_to_shopping_cart,
        lists::remove_from_shopping_cart,
        download::download_shopping_cart,
        link::get_link,
    ),
    components(schemas(
        RecipePayload,
        IngredientAmountPayload,
        RecipeResponse,
        RecipeIngredientResponse,
        RecipeShort,
        list::ListRecipesResponse,
        link::ShortLinkResponse,
    ))
)]
pub struct ApiDoc;

/// Body of recipe create and update requests.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipePayload {
    pub name: String,
    /// Reference to an already-stored image
    pub image: String,
    pub text: String,
    /// Minutes
    pub cooking_time: i32,
    /// Tag ids
    pub tags: Vec<i32>,
    pub ingredients: Vec<IngredientAmountPayload>,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct IngredientAmountPayload {
    pub id: i32,
    pub amount: i32,
}

impl From<RecipePayload> for RecipeDraft {
    fn from(payload: RecipePayload) -> Self {
        RecipeDraft {
            name: payload.name,
            image: payload.image,
            text: payload.text,
            cooking_time: payload.cooking_time,
            tags: payload.tags,
            ingredients: payload
                .ingredients
                .into_iter()
                .map(|i| IngredientAmount {
                    id: i.id,
                    amount: i.amount,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeIngredientResponse {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Full recipe as seen by the current viewer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub tags: Vec<Tag>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created_at: DateTime<Utc>,
}

/// Compact recipe used in list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeShort {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<&Recipe> for RecipeShort {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// Turn aggregates into responses, resolving the viewer flags for the whole batch at once.
pub fn render_recipes(
    conn: &mut PgConnection,
    aggregates: Vec<RecipeAggregate>,
    viewer: Option<&User>,
) -> QueryResult<Vec<RecipeResponse>> {
    let mut favorited: HashSet<i32> = HashSet::new();
    let mut in_cart: HashSet<i32> = HashSet::new();
    let mut followed: HashSet<Uuid> = HashSet::new();

    if let Some(user) = viewer {
        let recipe_ids: Vec<i32> = aggregates.iter().map(|a| a.recipe.id).collect();
        let author_ids: Vec<Uuid> = aggregates.iter().map(|a| a.author.id).collect();
        favorited = RecipeList::Favorites.recipe_ids_among(conn, user.id, &recipe_ids)?;
        in_cart = RecipeList::ShoppingCart.recipe_ids_among(conn, user.id, &recipe_ids)?;
        followed = subscriptions::followed_among(conn, user.id, &author_ids)?;
    }

    Ok(aggregates
        .into_iter()
        .map(|a| RecipeResponse {
            id: a.recipe.id,
            tags: a.tags,
            author: UserResponse::new(&a.author, followed.contains(&a.author.id)),
            ingredients: a
                .ingredients
                .into_iter()
                .map(|i| RecipeIngredientResponse {
                    id: i.id,
                    name: i.name,
                    measurement_unit: i.measurement_unit,
                    amount: i.amount,
                })
                .collect(),
            is_favorited: favorited.contains(&a.recipe.id),
            is_in_shopping_cart: in_cart.contains(&a.recipe.id),
            name: a.recipe.name,
            image: a.recipe.image,
            text: a.recipe.text,
            cooking_time: a.recipe.cooking_time,
            created_at: a.recipe.created_at,
        })
        .collect())
}

/// Load one recipe and render it for the viewer.
pub fn render_recipe(
    conn: &mut PgConnection,
    recipe_id: i32,
    viewer: Option<&User>,
) -> Result<RecipeResponse, ApiError> {
    let aggregate =
        recipe_repo::load_aggregate(conn, recipe_id)?.ok_or_else(|| ApiError::not_found("Recipe"))?;
    render_recipes(conn, vec![aggregate], viewer)?
        .pop()
        .ok_or_else(|| ApiError::not_found("Recipe"))
}

/// The recipe, provided `user` wrote it.
pub fn authored_recipe(
    conn: &mut PgConnection,
    recipe_id: i32,
    user: &User,
) -> Result<Recipe, ApiError> {
    let recipe =
        recipe_repo::get_recipe(conn, recipe_id)?.ok_or_else(|| ApiError::not_found("Recipe"))?;

    if recipe.author_id != user.id {
        return Err(ApiError::Forbidden(
            "Only the author can change this recipe".to_string(),
        ));
    }

    Ok(recipe)
}
