use crate::{
    AppState,
    api::models::providers::{ProviderRequest, ProviderResponse},
    errors::Result,
    types::ProviderId,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

#[utoipa::path(
    post,
    path = "/providers",
    tag = "providers",
    summary = "Create provider",
    request_body = ProviderRequest,
    responses(
        (status = 201, description = "Provider created successfully", body = ProviderResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "A provider with this email already exists"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_provider(
    State(state): State<AppState>,
    body: std::result::Result<Json<ProviderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProviderResponse>)> {
    let Json(request) = body?;
    let provider = state.providers.create_provider(request.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(provider.into())))
}

#[utoipa::path(
    get,
    path = "/providers",
    tag = "providers",
    summary = "List providers",
    responses(
        (status = 200, description = "All providers, ordered by ID", body = Vec<ProviderResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_providers(State(state): State<AppState>) -> Result<Json<Vec<ProviderResponse>>> {
    let providers = state.providers.get_all_providers().await?;
    Ok(Json(providers.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/providers/{id}",
    tag = "providers",
    summary = "Get provider",
    responses(
        (status = 200, description = "Provider details", body = ProviderResponse),
        (status = 404, description = "Provider not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Provider ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_provider(State(state): State<AppState>, Path(id): Path<ProviderId>) -> Result<Json<ProviderResponse>> {
    let provider = state.providers.get_provider(id).await?;
    Ok(Json(provider.into()))
}

#[utoipa::path(
    put,
    path = "/providers/{id}",
    tag = "providers",
    summary = "Update provider",
    request_body = ProviderRequest,
    responses(
        (status = 200, description = "Provider updated successfully", body = ProviderResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Provider not found"),
        (status = 409, description = "A provider with this email already exists"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Provider ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_provider(
    State(state): State<AppState>,
    Path(id): Path<ProviderId>,
    body: std::result::Result<Json<ProviderRequest>, JsonRejection>,
) -> Result<Json<ProviderResponse>> {
    let Json(request) = body?;
    let provider = state.providers.update_provider(id, request.try_into()?).await?;
    Ok(Json(provider.into()))
}

#[utoipa::path(
    delete,
    path = "/providers/{id}",
    tag = "providers",
    summary = "Delete provider",
    responses(
        (status = 204, description = "Provider deleted successfully"),
        (status = 400, description = "Provider still supplies stock"),
        (status = 404, description = "Provider not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "Provider ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_provider(State(state): State<AppState>, Path(id): Path<ProviderId>) -> Result<StatusCode> {
    state.providers.delete_provider(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::models::providers::ProviderResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test_log::test(tokio::test)]
    async fn test_provider_crud() {
        let app = create_test_app().await;
        let created = create_test_provider(&app, "sales@acme.example.com").await;

        let response = app
            .put(&format!("/api/providers/{}", created.id))
            .json(&json!({"name": "Acme Ltd", "email": "sales@acme.example.com", "phone": "555-0100"}))
            .await;
        response.assert_status_ok();
        let updated: ProviderResponse = response.json();
        assert_eq!(updated.name, "Acme Ltd");
        assert_eq!(updated.phone, "555-0100");

        let fetched: ProviderResponse = app.get(&format!("/api/providers/{}", created.id)).await.json();
        assert_eq!(fetched.name, "Acme Ltd");

        app.delete(&format!("/api/providers/{}", created.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let listed: Vec<ProviderResponse> = app.get("/api/providers").await.json();
        assert!(listed.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_provider_email_is_required() {
        let app = create_test_app().await;

        let response = app.post("/api/providers").json(&json!({"name": "Acme"})).await;
        response.assert_status_bad_request();
        response.assert_text("email is required");
    }

    #[test_log::test(tokio::test)]
    async fn test_update_missing_provider_is_not_found() {
        let app = create_test_app().await;

        app.put("/api/providers/42")
            .json(&json!({"name": "Acme", "email": "sales@acme.example.com"}))
            .await
            .assert_status_not_found();
    }
}
