use super::{ListUsersResponse, UserResponse};
use crate::api::{ErrorResponse, PageParams, PaginationMetadata};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repo::{subscriptions, users};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::collections::HashSet;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(PageParams),
    responses(
        (status = 200, description = "Users ordered by username", body = ListUsersResponse)
    )
)]
pub async fn list_users(
    viewer: Option<AuthUser>,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    let (limit, offset) = params.resolve();
    let mut conn = state.pool.get()?;

    let (page, total) = users::list_users(&mut conn, limit, offset)?;

    let followed = match viewer {
        Some(AuthUser(viewer)) => {
            let ids: Vec<Uuid> = page.iter().map(|u| u.id).collect();
            subscriptions::followed_among(&mut conn, viewer.id, &ids)?
        }
        None => HashSet::new(),
    };

    Ok(Json(ListUsersResponse {
        users: page
            .iter()
            .map(|u| UserResponse::new(u, followed.contains(&u.id)))
            .collect(),
        pagination: PaginationMetadata {
            total,
            limit,
            offset,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::new(&user, false))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    viewer: Option<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let mut conn = state.pool.get()?;

    let user = users::get_user(&mut conn, id)?.ok_or_else(|| ApiError::not_found("User"))?;

    let is_subscribed = match viewer {
        Some(AuthUser(viewer)) => {
            subscriptions::followed_among(&mut conn, viewer.id, &[id])?.contains(&id)
        }
        None => false,
    };

    Ok(Json(UserResponse::new(&user, is_subscribed)))
}
