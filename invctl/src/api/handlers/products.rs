use crate::{
    AppState,
    api::models::products::{ProductRequest, ProductResponse},
    errors::Result,
    types::ProductId,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    summary = "Create product",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ProductResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "A product with this code already exists"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_product(
    State(state): State<AppState>,
    body: std::result::Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let Json(request) = body?;
    let product = state.products.create_product(request.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    summary = "List products",
    responses(
        (status = 200, description = "All products, ordered by ID", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>> {
    let products = state.products.get_all_products().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    summary = "Get product",
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Product ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_product(State(state): State<AppState>, Path(id): Path<ProductId>) -> Result<Json<ProductResponse>> {
    let product = state.products.get_product(id).await?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    summary = "Update product",
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = ProductResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "A product with this code already exists"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Product ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    body: std::result::Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>> {
    let Json(request) = body?;
    let product = state.products.update_product(id, request.try_into()?).await?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    summary = "Delete product",
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, description = "Product still has stock"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Product ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_product(State(state): State<AppState>, Path(id): Path<ProductId>) -> Result<StatusCode> {
    state.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::models::products::ProductResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn test_product_crud() {
        let app = create_test_app().await;

        let response = app
            .post("/api/products")
            .json(&json!({"name": "Laptop", "code": "LT-1", "image_url": "https://img.example.com/lt.png"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: ProductResponse = response.json();
        assert_eq!(created.code, "LT-1");

        let response = app
            .put(&format!("/api/products/{}", created.id))
            .json(&json!({"name": "Laptop Pro", "code": "LT-1"}))
            .await;
        response.assert_status_ok();
        let updated: ProductResponse = response.json();
        assert_eq!(updated.name, "Laptop Pro");
        assert_eq!(updated.image_url, "");
        assert_eq!(updated.created_at, created.created_at);

        let listed: Vec<ProductResponse> = app.get("/api/products").await.json();
        assert_eq!(listed.len(), 1);

        app.delete(&format!("/api/products/{}", created.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        app.get(&format!("/api/products/{}", created.id))
            .await
            .assert_status_not_found();
    }

    #[test_log::test(tokio::test)]
    async fn test_duplicate_code_is_conflict() {
        let app = create_test_app().await;
        create_test_product(&app, "LT-1").await;

        let response = app
            .post("/api/products")
            .json(&json!({"name": "Other laptop", "code": "LT-1"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        response.assert_text("product with code LT-1 already exists");
    }

    #[test_log::test(tokio::test)]
    async fn test_malformed_body_is_bad_request() {
        let app = create_test_app().await;

        let response = app
            .post("/api/products")
            .content_type("application/json")
            .bytes("{not json".into())
            .await;
        response.assert_status_bad_request();
        response.assert_text("Invalid request body");

        app.post("/api/products")
            .json(&json!({"name": "", "code": "LT-1"}))
            .await
            .assert_status_bad_request();
    }

    #[test_log::test(tokio::test)]
    async fn test_product_with_stock_cannot_be_deleted() {
        let app = create_test_app().await;
        let fixture = create_stock_fixture(&app).await;
        create_test_stock(&app, &fixture, "SN-1").await;

        app.delete(&format!("/api/products/{}", fixture.product_id))
            .await
            .assert_status_bad_request();
        app.get(&format!("/api/products/{}", fixture.product_id))
            .await
            .assert_status_ok();
    }
}
