//! API request/response models for users.

use crate::api::models::require;
use crate::db::models::users::{User, UserSummary};
use crate::errors::Error;
use crate::types::UserId;
use crate::usecases::users::{NewUser, UserChanges};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserCreate {
    #[schema(example = "Grace Hopper")]
    pub name: String,
    /// Login email (must be unique)
    #[schema(example = "grace@example.com")]
    pub email: String,
    #[schema(example = "clerk")]
    pub role: String,
    pub password: String,
}

/// Request body for updating a user. An empty or missing password keeps the current one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
}

impl TryFrom<UserCreate> for NewUser {
    type Error = Error;

    fn try_from(request: UserCreate) -> Result<Self, Self::Error> {
        require(&request.name, "name")?;
        require(&request.email, "email")?;
        require(&request.password, "password")?;
        Ok(NewUser {
            name: request.name,
            email: request.email,
            role: request.role,
            password: request.password,
        })
    }
}

impl TryFrom<UserUpdate> for UserChanges {
    type Error = Error;

    fn try_from(request: UserUpdate) -> Result<Self, Self::Error> {
        require(&request.name, "name")?;
        require(&request.email, "email")?;
        Ok(UserChanges {
            name: request.name,
            email: request.email,
            role: request.role,
            password: request.password,
        })
    }
}

/// A user as returned by the API. There is no password field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserSummary::from(&user).into()
    }
}

impl From<UserSummary> for UserResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_required_on_create_only() {
        let create = UserCreate {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(
            NewUser::try_from(create).unwrap_err().user_message(),
            "password is required"
        );

        let update = UserUpdate {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(UserChanges::try_from(update).unwrap().password, "");
    }

    #[test]
    fn test_response_has_no_password() {
        let now = Utc::now();
        let user = User {
            id: 1,
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            role: "admin".to_string(),
            password: "cobol".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "grace@example.com");
    }
}
