use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::repo::shopping_list::cart_recipes;
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use chrono::Local;
use pantry_core::ShoppingList;

pub const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Plain-text shopping list for everything in the user's cart.
#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart",
    tag = "shopping_cart",
    responses(
        (status = 200, description = "Shopping list attachment", body = String, content_type = "text/plain"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn download_shopping_cart(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = state.pool.get()?;

    let cart = cart_recipes(&mut conn, user.id)?;
    let list = ShoppingList::aggregate(&cart);
    tracing::debug!(
        user_id = %user.id,
        recipes = list.recipes.len(),
        products = list.products.len(),
        "rendering shopping list"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
            ),
        ],
        list.render(Local::now().naive_local()),
    ))
}
