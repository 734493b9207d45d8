use axum::{Json, extract::State};
use serde::Serialize;

use crate::{AppState, database, error::Result};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: None,
    })
}

/// Fails with a database error (500) when the pool cannot run a query.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<HealthStatus>> {
    database::check_health(&state.db).await?;

    Ok(Json(HealthStatus {
        status: "ready",
        version: env!("CARGO_PKG_VERSION"),
        database: Some("connected"),
    }))
}
