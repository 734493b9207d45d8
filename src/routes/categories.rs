use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Category, CategoryRequest, Product},
    queries::{category_queries, product_queries},
};

pub async fn get_all_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = category_queries::get_all(&state.db).await?;

    Ok(Json(categories))
}

/// Products filed under the category; an unknown id just yields an empty list.
pub async fn get_category_products(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Product>>> {
    let products = product_queries::get_by_category(&state.db, id).await?;

    Ok(Json(products))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    let name = payload
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("name is required".to_string()))?;

    let category = category_queries::create_category(&state.db, &name).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<Category>> {
    if payload.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    let category = category_queries::update_category(&state.db, id, payload.name.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound("Categoría no encontrada".to_string()))?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    category_queries::delete_category(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
