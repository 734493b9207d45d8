use axum::{Json, extract::State};

use super::required;
use crate::{
    AppState,
    error::{AppError, Result},
    models::{AuthResponse, LoginRequest},
    queries::user_queries,
    utils::password,
};

pub async fn login_user(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let email = required(payload.email, "email")?;
    let plain_password = required(payload.password, "password")?;

    let user = user_queries::find_by_email(&state.db, &email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(&plain_password, &user.password).await? {
        return Err(AppError::InvalidCredentials);
    }

    Ok(Json(AuthResponse {
        usuario: user.into(),
    }))
}
