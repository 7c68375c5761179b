//! OpenAPI documentation for the inventory REST API at `/api/*`.
//!
//! The document is served by Scalar at `/docs`.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "invctl",
        description = "Inventory control: products, users, providers and serialised stock"
    ),
    servers(
        (url = "/api", description = "Inventory API server")
    ),
    paths(
        api::handlers::products::create_product,
        api::handlers::products::list_products,
        api::handlers::products::get_product,
        api::handlers::products::update_product,
        api::handlers::products::delete_product,
        api::handlers::users::create_user,
        api::handlers::users::list_users,
        api::handlers::users::get_user,
        api::handlers::users::update_user,
        api::handlers::users::delete_user,
        api::handlers::providers::create_provider,
        api::handlers::providers::list_providers,
        api::handlers::providers::get_provider,
        api::handlers::providers::update_provider,
        api::handlers::providers::delete_provider,
        api::handlers::stocks::create_stock,
        api::handlers::stocks::list_stocks,
        api::handlers::stocks::get_stock,
        api::handlers::stocks::list_stocks_by_product,
        api::handlers::stocks::get_stock_by_serial,
        api::handlers::stocks::update_stock,
        api::handlers::stocks::delete_stock,
    ),
    components(
        schemas(
            api::models::products::ProductRequest,
            api::models::products::ProductResponse,
            api::models::users::UserCreate,
            api::models::users::UserUpdate,
            api::models::users::UserResponse,
            api::models::providers::ProviderRequest,
            api::models::providers::ProviderResponse,
            api::models::stocks::StockCreate,
            api::models::stocks::StockUpdate,
            api::models::stocks::StockResponse,
        )
    ),
    tags(
        (name = "products", description = "Catalogue products"),
        (name = "users", description = "User accounts"),
        (name = "providers", description = "Suppliers stock is bought from"),
        (name = "stocks", description = "Serialised stock items"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/products",
            "/products/{id}",
            "/users",
            "/users/{id}",
            "/providers",
            "/providers/{id}",
            "/stocks",
            "/stocks/{id}",
            "/stocks/product/{product_id}",
            "/stocks/serial/{serial}",
        ] {
            assert!(paths.contains(&path), "missing {path}");
        }
    }

    #[test]
    fn test_user_schemas_have_no_password_in_responses() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let user = &doc["components"]["schemas"]["UserResponse"]["properties"];
        assert!(user.get("email").is_some());
        assert!(user.get("password").is_none());
    }
}
