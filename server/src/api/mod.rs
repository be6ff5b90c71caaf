pub mod extract;
pub mod ingredients;
pub mod ping;
pub mod recipes;
pub mod short_link;
pub mod tags;
pub mod users;

use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{IntoParams, OpenApi, ToSchema};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMetadata {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PageParams {
    /// Number of items to return (default: 20, max: 100)
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0)
    pub offset: Option<i64>,
}

impl PageParams {
    /// Effective (limit, offset) after defaults and clamping.
    pub fn resolve(&self) -> (i64, i64) {
        resolve_page(self.limit, self.offset)
    }
}

pub fn resolve_page(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    (
        limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        offset.unwrap_or(0).max(0),
    )
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse, PaginationMetadata)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        ping::ApiDoc::openapi(),
        tags::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        short_link::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_and_clamping() {
        assert_eq!(resolve_page(None, None), (20, 0));
        assert_eq!(resolve_page(Some(0), Some(-5)), (1, 0));
        assert_eq!(resolve_page(Some(1000), Some(40)), (100, 40));
    }

    #[test]
    fn test_openapi_lists_every_module() {
        let spec = openapi();
        for path in [
            "/api/ping",
            "/api/tags",
            "/api/ingredients/{id}",
            "/api/recipes",
            "/api/recipes/{id}/favorite",
            "/api/recipes/download_shopping_cart",
            "/api/users/{id}/subscribe",
            "/s/{code}",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
