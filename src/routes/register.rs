use axum::{Json, extract::State, http::StatusCode};

use super::required;
use crate::{
    AppState,
    error::{AppError, Result},
    models::{AuthResponse, RegisterRequest},
    queries::user_queries,
    utils::password,
};

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let (name, email, plain_password) = required_fields(payload)?;

    if user_queries::find_by_email(&state.db, &email)
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = password::hash_password(&plain_password).await?;

    // Not atomic with the insert: two concurrent first sign-ups can both become admin.
    let existing_users = user_queries::count_users(&state.db).await?;
    let is_admin = grants_admin(existing_users);

    let user =
        user_queries::create_user(&state.db, &name, &email, &password_hash, is_admin).await?;

    tracing::info!("Registered user {} (admin: {})", user.id, user.is_admin);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            usuario: user.into(),
        }),
    ))
}

/// The very first account of the shop administers it.
pub fn grants_admin(existing_users: i64) -> bool {
    existing_users == 0
}

fn required_fields(payload: RegisterRequest) -> Result<(String, String, String)> {
    Ok((
        required(payload.name, "name")?,
        required(payload.email, "email")?,
        required(payload.password, "password")?,
    ))
}
