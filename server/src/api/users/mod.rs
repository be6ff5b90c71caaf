pub mod get;
pub mod subscriptions;

use crate::api::recipes::RecipeShort;
use crate::api::PaginationMetadata;
use crate::models::User;
use crate::AppState;
use axum::routing::{get as get_route, post};
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: Option<String>,
    /// Whether the current viewer follows this user
    pub is_subscribed: bool,
}

impl UserResponse {
    pub fn new(user: &User, is_subscribed: bool) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            avatar: user.avatar.clone(),
            is_subscribed,
        }
    }
}

/// An author together with (some of) their recipes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorWithRecipes {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeShort>,
    pub recipes_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListUsersResponse {
    pub users: Vec<UserResponse>,
    pub pagination: PaginationMetadata,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListSubscriptionsResponse {
    pub authors: Vec<AuthorWithRecipes>,
    pub pagination: PaginationMetadata,
}

/// Returns the router for /api/users endpoints (mounted at /api/users)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get_route(get::list_users))
        .route("/me", get_route(get::me))
        .route(
            "/subscriptions",
            get_route(subscriptions::list_subscriptions),
        )
        .route("/{id}", get_route(get::get_user))
        .route(
            "/{id}/subscribe",
            post(subscriptions::subscribe).delete(subscriptions::unsubscribe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        get::list_users,
        get::me,
        get::get_user,
        subscriptions::list_subscriptions,
        subscriptions::subscribe,
        subscriptions::unsubscribe,
    ),
    components(schemas(
        UserResponse,
        AuthorWithRecipes,
        ListUsersResponse,
        ListSubscriptionsResponse,
    ))
)]
pub struct ApiDoc;
