use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `users` table. Carries the bcrypt hash, so it is never serialized.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub usuario: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_never_exposes_the_hash() {
        let now = Utc::now();
        let user = User {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@tienda.test".to_string(),
            password: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
            is_admin: true,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(AuthResponse {
            usuario: user.into(),
        })
        .unwrap();

        let usuario = json["usuario"].as_object().unwrap();
        assert!(!usuario.contains_key("password"));
        assert_eq!(usuario["isAdmin"], true);
        assert_eq!(usuario["email"], "ana@tienda.test");
    }

    #[test]
    fn update_request_reads_camel_case() {
        let req: UpdateUserRequest =
            serde_json::from_str(r#"{"isAdmin": false, "name": "Luis"}"#).unwrap();
        assert_eq!(req.is_admin, Some(false));
        assert_eq!(req.name.as_deref(), Some("Luis"));
        assert!(req.email.is_none());
    }
}
