pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repo;
pub mod schema;
pub mod telemetry;

use axum::extract::{FromRef, MatchedPath};
use axum::http::Request;
use axum::Router;
use db::DbPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<DbPool>,
    /// Base URL for short links, without a trailing slash
    pub public_url: Arc<str>,
}

impl AppState {
    pub fn new(pool: DbPool, public_url: &str) -> Self {
        Self {
            pool: Arc::new(pool),
            public_url: Arc::from(public_url.trim_end_matches('/')),
        }
    }
}

impl FromRef<AppState> for Arc<DbPool> {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

/// Build the full HTTP application.
pub fn app(state: AppState) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .nest("/api/ping", api::ping::router())
        .nest("/api/tags", api::tags::router())
        .nest("/api/ingredients", api::ingredients::router())
        .nest("/api/recipes", api::recipes::router())
        .nest("/api/users", api::users::router())
        .nest("/s", api::short_link::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    // Ping checks would drown out everything else.
                    if matched_path == "/api/ping" {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{create_ingredient, create_tag, test_pool, unique};
    use crate::models::NewUser;
    use crate::schema::{ingredients, tags, users};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, HeaderMap, Method, StatusCode};
    use diesel::prelude::*;
    use diesel::r2d2::{ConnectionManager, Pool};
    use pantry_core::{IngredientAmount, RecipeDraft};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    /// State whose pool never connects; only routes that fail before touching
    /// the database can be exercised with it.
    fn offline_app() -> Router {
        let manager = ConnectionManager::<PgConnection>::new("postgres://nobody@127.0.0.1:1/none");
        let pool = Pool::builder()
            .connection_timeout(Duration::from_millis(50))
            .build_unchecked(manager);
        app(AppState::new(pool, "http://localhost:3000/"))
    }

    async fn send(method: Method, uri: &str, token: Option<&str>) -> (StatusCode, String) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, token);
        }
        let response = offline_app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_ping() {
        let (status, body) = send(Method::GET, "/api/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"message":"pong"}"#);
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        for (method, uri) in [
            (Method::GET, "/api/users/me"),
            (Method::GET, "/api/users/subscriptions"),
            (Method::GET, "/api/recipes/download_shopping_cart"),
            (Method::POST, "/api/recipes/1/favorite"),
            (Method::DELETE, "/api/recipes/1/shopping_cart"),
            (Method::DELETE, "/api/recipes/1"),
        ] {
            let (status, body) = send(method.clone(), uri, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body, r#"{"error":"Missing Authorization header"}"#);
        }
    }

    #[tokio::test]
    async fn test_malformed_authorization_header() {
        let (status, body) = send(Method::GET, "/api/users/me", Some("Basic abc")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, r#"{"error":"Invalid Authorization header format"}"#);
    }

    #[tokio::test]
    async fn test_invalid_short_code_is_404() {
        let (status, body) = send(Method::GET, "/s/not-a-code!", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Recipe not found"}"#);
    }

    #[tokio::test]
    async fn test_database_outage_is_500() {
        let (status, body) = send(Method::GET, "/api/tags", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Internal server error"}"#);
    }

    /// Router over the test database. Rows created through the helpers are
    /// deleted on drop.
    struct Online {
        app: Router,
        pool: Arc<DbPool>,
        users: Vec<Uuid>,
        tags: Vec<i32>,
        ingredients: Vec<i32>,
    }

    impl Online {
        fn start() -> Option<Self> {
            let state = AppState::new(test_pool()?, "http://localhost:3000");
            Some(Self {
                app: app(state.clone()),
                pool: state.pool,
                users: Vec::new(),
                tags: Vec::new(),
                ingredients: Vec::new(),
            })
        }

        /// A user and the `Authorization` header value for a fresh session.
        fn user(&mut self, name: &str) -> (Uuid, String) {
            let mut conn = self.pool.get().unwrap();
            let username = unique(name);
            let email = format!("{username}@example.com");
            let user = repo::users::create_user(
                &mut conn,
                &NewUser {
                    email: &email,
                    username: &username,
                    first_name: "Test",
                    last_name: "User",
                },
            )
            .unwrap();
            let token = auth::create_session(&mut conn, user.id).unwrap();
            self.users.push(user.id);
            (user.id, format!("Bearer {token}"))
        }

        /// A recipe by `author` with one fresh tag and one fresh ingredient.
        fn recipe(&mut self, author: Uuid) -> (i32, RecipeDraft) {
            let mut conn = self.pool.get().unwrap();
            let tag = create_tag(&mut conn, "supper");
            let carrot = create_ingredient(&mut conn, &unique("carrot"), "g");
            self.tags.push(tag.id);
            self.ingredients.push(carrot.id);

            let draft = RecipeDraft {
                name: "Carrot soup".to_string(),
                image: "soup.png".to_string(),
                text: "Simmer until soft".to_string(),
                cooking_time: 25,
                tags: vec![tag.id],
                ingredients: vec![IngredientAmount {
                    id: carrot.id,
                    amount: 300,
                }],
            };
            let id = repo::recipes::create_recipe(&mut conn, author, &draft).unwrap();
            (id, draft)
        }

        async fn request(
            &self,
            method: Method,
            uri: &str,
            token: &str,
            body: Option<Value>,
        ) -> (StatusCode, HeaderMap, Value) {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, token);
            let request = match body {
                Some(body) => request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())),
                None => request.body(Body::empty()),
            };
            let response = self.app.clone().oneshot(request.unwrap()).await.unwrap();

            let status = response.status();
            let headers = response.headers().clone();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body = serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
            (status, headers, body)
        }
    }

    impl Drop for Online {
        fn drop(&mut self) {
            let Ok(mut conn) = self.pool.get() else {
                return;
            };
            // Recipes, sessions and list entries cascade from users.
            let _ = diesel::delete(users::table.filter(users::id.eq_any(self.users.clone())))
                .execute(&mut conn);
            let _ = diesel::delete(tags::table.filter(tags::id.eq_any(self.tags.clone())))
                .execute(&mut conn);
            let _ = diesel::delete(
                ingredients::table.filter(ingredients::id.eq_any(self.ingredients.clone())),
            )
            .execute(&mut conn);
        }
    }

    fn payload(draft: &RecipeDraft) -> Value {
        json!({
            "name": draft.name,
            "image": draft.image,
            "text": draft.text,
            "cooking_time": draft.cooking_time,
            "tags": draft.tags,
            "ingredients": draft
                .ingredients
                .iter()
                .map(|i| json!({"id": i.id, "amount": i.amount}))
                .collect::<Vec<_>>(),
        })
    }

    #[tokio::test]
    async fn test_recipe_body_without_ingredients_is_400() {
        let Some(mut online) = Online::start() else {
            return;
        };
        let (author, token) = online.user("cook");
        let (_, draft) = online.recipe(author);

        let mut body = payload(&draft);
        body.as_object_mut().unwrap().remove("ingredients");
        let (status, headers, body) = online
            .request(Method::POST, "/api/recipes", &token, Some(body))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("ingredients"), "{message}");
    }

    #[tokio::test]
    async fn test_only_author_may_change_recipe() {
        let Some(mut online) = Online::start() else {
            return;
        };
        let (author, author_token) = online.user("cook");
        let (_, stranger_token) = online.user("stranger");
        let (id, draft) = online.recipe(author);
        let uri = format!("/api/recipes/{id}");
        let forbidden = json!({"error": "Only the author can change this recipe"});

        let (status, _, body) = online
            .request(Method::PATCH, &uri, &stranger_token, Some(payload(&draft)))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, forbidden);

        let (status, _, body) = online
            .request(Method::DELETE, &uri, &stranger_token, None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, forbidden);

        let (status, _, _) = online.request(Method::DELETE, &uri, &author_token, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _, _) = online.request(Method::GET, &uri, &author_token, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_favorite_and_cart_add_then_remove() {
        let Some(mut online) = Online::start() else {
            return;
        };
        let (author, _) = online.user("cook");
        let (_, token) = online.user("reader");
        let (id, _) = online.recipe(author);

        for (list, already, absent) in [
            (
                "favorite",
                "Recipe is already in favorites",
                "Recipe is not in favorites",
            ),
            (
                "shopping_cart",
                "Recipe is already in the shopping cart",
                "Recipe is not in the shopping cart",
            ),
        ] {
            let uri = format!("/api/recipes/{id}/{list}");

            let (status, _, body) = online.request(Method::POST, &uri, &token, None).await;
            assert_eq!(status, StatusCode::CREATED, "{list}");
            assert_eq!(
                body,
                json!({"id": id, "name": "Carrot soup", "image": "soup.png", "cooking_time": 25})
            );

            let (status, _, body) = online.request(Method::POST, &uri, &token, None).await;
            assert_eq!(status, StatusCode::CONFLICT, "{list}");
            assert_eq!(body, json!({ "error": already }));

            let (status, _, _) = online.request(Method::DELETE, &uri, &token, None).await;
            assert_eq!(status, StatusCode::NO_CONTENT, "{list}");

            let (status, _, body) = online.request(Method::DELETE, &uri, &token, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{list}");
            assert_eq!(body, json!({ "error": absent }));
        }
    }

    #[tokio::test]
    async fn test_subscribe_to_self_is_400() {
        let Some(mut online) = Online::start() else {
            return;
        };
        let (me, token) = online.user("loner");

        let (status, _, body) = online
            .request(Method::POST, &format!("/api/users/{me}/subscribe"), &token, None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Cannot subscribe to yourself"}));
    }

    #[tokio::test]
    async fn test_shopping_list_download_is_attachment() {
        let Some(mut online) = Online::start() else {
            return;
        };
        let (author, _) = online.user("cook");
        let (_, token) = online.user("shopper");
        let (id, _) = online.recipe(author);

        let uri = format!("/api/recipes/{id}/shopping_cart");
        let (status, _, _) = online.request(Method::POST, &uri, &token, None).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, headers, body) = online
            .request(Method::GET, "/api/recipes/download_shopping_cart", &token, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"shopping_list.txt\""
        );
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
        let text = body.as_str().unwrap();
        assert!(text.contains("300 g"), "{text}");
        assert!(text.contains("Carrot soup"), "{text}");
    }
}
