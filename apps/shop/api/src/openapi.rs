use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::PageMeta)
    ),
    info(
        title = "Shop API",
        version = "0.1.0",
        description = "Marketplace API: users, products, seller bank accounts, purchases and image uploads"
    ),
    servers(
        (url = "/v1", description = "API base path")
    ),
    nest(
        (path = "/user", api = domain_users::handlers::ApiDoc),
        (path = "/product", api = domain_products::handlers::ApiDoc),
        (path = "/bank", api = domain_banks::handlers::ApiDoc),
        (path = "/image", api = domain_images::handlers::ApiDoc),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected operations
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_domain() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/user/register",
            "/user/login",
            "/product",
            "/product/{id}",
            "/product/{id}/stock",
            "/product/{id}/buy",
            "/bank/account",
            "/bank/account/{id}",
            "/image",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}: {paths:?}");
        }
    }

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
