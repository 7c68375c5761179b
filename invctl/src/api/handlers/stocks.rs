use crate::{
    AppState,
    api::models::stocks::{StockCreate, StockResponse, StockUpdate},
    errors::Result,
    types::{ProductId, StockId},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

#[utoipa::path(
    post,
    path = "/stocks",
    tag = "stocks",
    summary = "Register stock item",
    request_body = StockCreate,
    responses(
        (status = 201, description = "Stock item registered", body = StockResponse),
        (status = 400, description = "Invalid request, or the product, provider or user does not exist"),
        (status = 409, description = "A stock item with this serial already exists"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_stock(
    State(state): State<AppState>,
    body: std::result::Result<Json<StockCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<StockResponse>)> {
    let Json(request) = body?;
    let stock = state.stocks.create_stock(request.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(stock.into())))
}

#[utoipa::path(
    get,
    path = "/stocks",
    tag = "stocks",
    summary = "List stock",
    responses(
        (status = 200, description = "All stock items, ordered by ID", body = Vec<StockResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_stocks(State(state): State<AppState>) -> Result<Json<Vec<StockResponse>>> {
    let stocks = state.stocks.get_all_stocks().await?;
    Ok(Json(stocks.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/stocks/{id}",
    tag = "stocks",
    summary = "Get stock item",
    responses(
        (status = 200, description = "Stock item details", body = StockResponse),
        (status = 404, description = "Stock item not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Stock item ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_stock(State(state): State<AppState>, Path(id): Path<StockId>) -> Result<Json<StockResponse>> {
    let stock = state.stocks.get_stock(id).await?;
    Ok(Json(stock.into()))
}

#[utoipa::path(
    get,
    path = "/stocks/product/{product_id}",
    tag = "stocks",
    summary = "List stock for a product",
    responses(
        (status = 200, description = "Stock items of the product, ordered by ID", body = Vec<StockResponse>),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("product_id" = i64, Path, description = "Product ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_stocks_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Vec<StockResponse>>> {
    let stocks = state.stocks.get_stocks_by_product_id(product_id).await?;
    Ok(Json(stocks.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/stocks/serial/{serial}",
    tag = "stocks",
    summary = "Get stock item by serial",
    responses(
        (status = 200, description = "Stock item details", body = StockResponse),
        (status = 404, description = "Stock item not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("serial" = String, Path, description = "Serial number")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_stock_by_serial(State(state): State<AppState>, Path(serial): Path<String>) -> Result<Json<StockResponse>> {
    let stock = state.stocks.get_stock_by_serial(&serial).await?;
    Ok(Json(stock.into()))
}

#[utoipa::path(
    put,
    path = "/stocks/{id}",
    tag = "stocks",
    summary = "Update stock item",
    request_body = StockUpdate,
    responses(
        (status = 200, description = "Stock item updated", body = StockResponse),
        (status = 400, description = "Invalid request, or the product, provider or user does not exist"),
        (status = 404, description = "Stock item not found"),
        (status = 409, description = "A stock item with this serial already exists"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Stock item ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<StockId>,
    body: std::result::Result<Json<StockUpdate>, JsonRejection>,
) -> Result<Json<StockResponse>> {
    let Json(request) = body?;
    let stock = state.stocks.update_stock(id, request.try_into()?).await?;
    Ok(Json(stock.into()))
}

#[utoipa::path(
    delete,
    path = "/stocks/{id}",
    tag = "stocks",
    summary = "Delete stock item",
    responses(
        (status = 204, description = "Stock item deleted"),
        (status = 404, description = "Stock item not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Stock item ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_stock(State(state): State<AppState>, Path(id): Path<StockId>) -> Result<StatusCode> {
    state.stocks.delete_stock(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::models::stocks::StockResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    #[test_log::test(tokio::test)]
    async fn test_register_stock_returns_hydrated_item() {
        let app = create_test_app().await;
        let fixture = create_stock_fixture(&app).await;

        let response = app
            .post("/api/stocks")
            .json(&json!({
                "product_id": fixture.product_id,
                "serial": "SN-001",
                "batch": "B1",
                "purchase_date": "2024-01-31",
                "provider_id": fixture.provider_id,
                "created_by_user_id": fixture.creator_id,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        assert_eq!(body["id"], 1);
        assert_eq!(body["serial"], "SN-001");
        assert_eq!(body["purchase_date"], "2024-01-31");
        assert_eq!(body["product"]["code"], "LT-1");
        assert_eq!(body["provider"]["email"], "sales@acme.example.com");
        assert_eq!(body["created_by_user"]["id"], fixture.creator_id);
        assert_eq!(body["updated_by_user"]["id"], fixture.creator_id);
        assert!(body["created_by_user"].get("password").is_none());
        assert_eq!(body["created_at"], body["updated_at"]);

        let response = app
            .post("/api/stocks")
            .json(&json!({
                "product_id": fixture.product_id,
                "serial": "SN-001",
                "provider_id": fixture.provider_id,
                "created_by_user_id": fixture.creator_id,
            }))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        response.assert_text("stock with serial SN-001 already exists");
    }

    #[test_log::test(tokio::test)]
    async fn test_update_keeps_creator_and_records_updater() {
        let app = create_test_app().await;
        let fixture = create_stock_fixture(&app).await;
        let created = create_test_stock(&app, &fixture, "SN-1").await;

        let response = app
            .put(&format!("/api/stocks/{}", created.id))
            .json(&json!({
                "product_id": fixture.product_id,
                "serial": "SN-1",
                "batch": "B2",
                "purchase_date": "2024-02-29",
                "provider_id": fixture.provider_id,
                "updated_by_user_id": fixture.editor_id,
            }))
            .await;
        response.assert_status_ok();

        let updated: StockResponse = response.json();
        assert_eq!(updated.batch, "B2");
        assert_eq!(updated.purchase_date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(updated.created_by_user.id, fixture.creator_id);
        assert_eq!(updated.updated_by_user.id, fixture.editor_id);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test_log::test(tokio::test)]
    async fn test_lookups_by_product_and_serial() {
        let app = create_test_app().await;
        let fixture = create_stock_fixture(&app).await;
        let first = create_test_stock(&app, &fixture, "SN-A").await;
        let second = create_test_stock(&app, &fixture, "SN-B").await;

        let listed: Vec<StockResponse> = app
            .get(&format!("/api/stocks/product/{}", fixture.product_id))
            .await
            .json();
        assert_eq!(listed.iter().map(|s| s.id).collect::<Vec<_>>(), vec![first.id, second.id]);

        let other_product: Vec<StockResponse> = app.get("/api/stocks/product/999").await.json();
        assert!(other_product.is_empty());

        let by_serial: StockResponse = app.get("/api/stocks/serial/SN-B").await.json();
        assert_eq!(by_serial.id, second.id);

        let response = app.get("/api/stocks/serial/SN-Z").await;
        response.assert_status_not_found();
        response.assert_text("stock with serial SN-Z not found");
    }

    #[test_log::test(tokio::test)]
    async fn test_dangling_references_are_bad_requests() {
        let app = create_test_app().await;
        let fixture = create_stock_fixture(&app).await;

        let response = app
            .post("/api/stocks")
            .json(&json!({
                "product_id": fixture.product_id,
                "serial": "SN-1",
                "provider_id": 999,
                "created_by_user_id": fixture.creator_id,
            }))
            .await;
        response.assert_status_bad_request();
        response.assert_text("Referenced provider does not exist or is still in use");
        app.get("/api/stocks").await.assert_json(&json!([]));
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_stock_requests() {
        let app = create_test_app().await;
        let fixture = create_stock_fixture(&app).await;

        let response = app
            .post("/api/stocks")
            .json(&json!({
                "product_id": fixture.product_id,
                "serial": "SN-1",
                "purchase_date": "31-01-2024",
                "provider_id": fixture.provider_id,
                "created_by_user_id": fixture.creator_id,
            }))
            .await;
        response.assert_status_bad_request();
        response.assert_text("Invalid purchase date format");

        let response = app
            .post("/api/stocks")
            .json(&json!({"product_id": "one", "serial": "SN-1"}))
            .await;
        response.assert_status_bad_request();
        response.assert_text("Invalid request body");
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_stock_twice() {
        let app = create_test_app().await;
        let fixture = create_stock_fixture(&app).await;
        let created = create_test_stock(&app, &fixture, "SN-1").await;

        app.delete(&format!("/api/stocks/{}", created.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let response = app.delete(&format!("/api/stocks/{}", created.id)).await;
        response.assert_status_not_found();
        response.assert_text(format!("stock with ID {} not found", created.id));
    }
}
