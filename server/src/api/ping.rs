use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::AppState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/ping",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = PingResponse)
    )
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(ping))
}

#[derive(OpenApi)]
#[openapi(paths(ping), components(schemas(PingResponse)))]
pub struct ApiDoc;
