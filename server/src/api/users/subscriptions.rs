use super::{AuthorWithRecipes, ListSubscriptionsResponse, UserResponse};
use crate::api::recipes::RecipeShort;
use crate::api::{resolve_page, ErrorResponse, PaginationMetadata};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::User;
use crate::repo::{recipes, subscriptions, users};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SubscriptionsParams {
    /// Number of authors to return (default: 20, max: 100)
    pub limit: Option<i64>,
    /// Number of authors to skip (default: 0)
    pub offset: Option<i64>,
    /// Maximum number of recipes listed per author
    pub recipes_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RecipesLimit {
    /// Maximum number of recipes listed for the author
    pub recipes_limit: Option<usize>,
}

/// Attach each author's recipes (newest first) and recipe count.
fn with_recipes(
    conn: &mut PgConnection,
    authors: Vec<User>,
    recipes_limit: Option<usize>,
) -> QueryResult<Vec<AuthorWithRecipes>> {
    let ids: Vec<Uuid> = authors.iter().map(|a| a.id).collect();
    let mut by_author = recipes::recipes_by_authors(conn, &ids)?;
    let counts = users::recipe_counts(conn, &ids)?;

    Ok(authors
        .into_iter()
        .map(|author| {
            let mut written = by_author.remove(&author.id).unwrap_or_default();
            if let Some(limit) = recipes_limit {
                written.truncate(limit);
            }
            AuthorWithRecipes {
                recipes: written.iter().map(RecipeShort::from).collect(),
                recipes_count: counts.get(&author.id).copied().unwrap_or(0),
                user: UserResponse::new(&author, true),
            }
        })
        .collect())
}

#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    tag = "subscriptions",
    params(SubscriptionsParams),
    responses(
        (status = 200, description = "Authors the user follows", body = ListSubscriptionsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_subscriptions(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SubscriptionsParams>,
) -> Result<Json<ListSubscriptionsResponse>, ApiError> {
    let (limit, offset) = resolve_page(params.limit, params.offset);
    let mut conn = state.pool.get()?;

    let (authors, total) = subscriptions::list_followed(&mut conn, user.id, limit, offset)?;
    let authors = with_recipes(&mut conn, authors, params.recipes_limit)?;

    Ok(Json(ListSubscriptionsResponse {
        authors,
        pagination: PaginationMetadata {
            total,
            limit,
            offset,
        },
    }))
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe",
    tag = "subscriptions",
    params(
        ("id" = Uuid, Path, description = "Author ID"),
        RecipesLimit
    ),
    responses(
        (status = 201, description = "Subscribed", body = AuthorWithRecipes),
        (status = 400, description = "Cannot subscribe to yourself", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Already subscribed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn subscribe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
    Query(params): Query<RecipesLimit>,
) -> Result<(StatusCode, Json<AuthorWithRecipes>), ApiError> {
    let mut conn = state.pool.get()?;

    let author = subscriptions::subscribe(&mut conn, user.id, author_id)?;
    tracing::info!(user_id = %user.id, %author_id, "subscribed");

    let mut rendered = with_recipes(&mut conn, vec![author], params.recipes_limit)?;
    let response = rendered.pop().ok_or_else(|| ApiError::not_found("User"))?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    tag = "subscriptions",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Not subscribed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn unsubscribe(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(author_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut conn = state.pool.get()?;

    if !subscriptions::unsubscribe(&mut conn, user.id, author_id)? {
        return Err(ApiError::NotFound("Not subscribed to this user".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
