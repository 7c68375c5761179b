use crate::{
    AppState,
    api::models::users::{UserCreate, UserResponse, UserUpdate},
    errors::Result,
    types::UserId,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    summary = "Create user",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "A user with this email already exists"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    body: std::result::Result<Json<UserCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let Json(request) = body?;
    let user = state.users.create_user(request.try_into()?).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    summary = "List users",
    responses(
        (status = 200, description = "All users, ordered by ID", body = Vec<UserResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.users.get_all_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    summary = "Get user",
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "User ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<UserId>) -> Result<Json<UserResponse>> {
    let user = state.users.get_user(id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    summary = "Update user",
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "User not found"),
        (status = 409, description = "A user with this email already exists"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "User ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    body: std::result::Result<Json<UserUpdate>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    let Json(request) = body?;
    let user = state.users.update_user(id, request.try_into()?).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    summary = "Delete user",
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 400, description = "User is still recorded on stock"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("id" = i64, Path, description = "User ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<UserId>) -> Result<StatusCode> {
    state.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::api::models::users::UserResponse;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[test_log::test(tokio::test)]
    async fn test_password_is_never_returned() {
        let app = create_test_app().await;

        let response = app
            .post("/api/users")
            .json(&json!({"name": "Grace", "email": "grace@example.com", "role": "admin", "password": "cobol"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        assert!(created.get("password").is_none());

        let listed: Value = app.get("/api/users").await.json();
        assert!(listed[0].get("password").is_none());
        assert_eq!(listed[0]["email"], "grace@example.com");
    }

    #[test_log::test(tokio::test)]
    async fn test_duplicate_email_is_conflict() {
        let app = create_test_app().await;
        create_test_user(&app, "grace@example.com").await;

        let response = app
            .post("/api/users")
            .json(&json!({"name": "Other", "email": "grace@example.com", "password": "pw"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        response.assert_text("user with email grace@example.com already exists");
    }

    #[test_log::test(tokio::test)]
    async fn test_update_and_delete_user() {
        let app = create_test_app().await;
        let user = create_test_user(&app, "grace@example.com").await;

        let response = app
            .put(&format!("/api/users/{}", user.id))
            .json(&json!({"name": "Rear Admiral Hopper", "email": "grace@navy.example.com", "role": "admin"}))
            .await;
        response.assert_status_ok();
        let updated: UserResponse = response.json();
        assert_eq!(updated.email, "grace@navy.example.com");

        app.delete(&format!("/api/users/{}", user.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        let response = app.delete(&format!("/api/users/{}", user.id)).await;
        response.assert_status_not_found();
        response.assert_text(format!("user with ID {} not found", user.id));
    }

    #[test_log::test(tokio::test)]
    async fn test_non_numeric_id_is_bad_request() {
        let app = create_test_app().await;
        app.get("/api/users/abc").await.assert_status_bad_request();
    }
}
