use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::models::Tag;
use crate::repo;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "tags",
    responses(
        (status = 200, description = "All tags ordered by name", body = Vec<Tag>)
    )
)]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    let mut conn = state.pool.get()?;
    Ok(Json(repo::tags::list_tags(&mut conn)?))
}

#[utoipa::path(
    get,
    path = "/api/tags/{id}",
    tag = "tags",
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag", body = Tag),
        (status = 404, description = "Tag not found", body = ErrorResponse)
    )
)]
pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Tag>, ApiError> {
    let mut conn = state.pool.get()?;
    repo::tags::get_tag(&mut conn, id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Tag"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags))
        .route("/{id}", get(get_tag))
}

#[derive(OpenApi)]
#[openapi(paths(list_tags, get_tag), components(schemas(Tag)))]
pub struct ApiDoc;
