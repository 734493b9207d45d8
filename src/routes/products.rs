use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{Product, ProductRequest, ProductWithCategory},
    queries::{category_queries, product_queries},
};

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductWithCategory>>> {
    let products = product_queries::get_all(&state.db).await?;

    let mut category_ids: Vec<i32> = products.iter().filter_map(|p| p.category_id).collect();
    category_ids.sort_unstable();
    category_ids.dedup();

    let categories = category_queries::find_by_ids(&state.db, &category_ids).await?;

    let response = products
        .into_iter()
        .map(|product| ProductWithCategory {
            category: product
                .category_id
                .and_then(|id| categories.get(&id).cloned()),
            product,
        })
        .collect();

    Ok(Json(response))
}

pub async fn dashboard_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = product_queries::get_all(&state.db).await?;

    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductWithCategory>> {
    let product = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Producto no encontrado".to_string()))?;

    let category = match product.category_id {
        Some(category_id) => category_queries::find_by_id(&state.db, category_id).await?,
        None => None,
    };

    Ok(Json(ProductWithCategory { product, category }))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    if payload.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
        return Err(AppError::BadRequest("name is required".to_string()));
    }

    if payload.price.is_none() {
        return Err(AppError::BadRequest("price is required".to_string()));
    }

    let product = product_queries::create_product(&state.db, &payload).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<Product>> {
    let product = product_queries::update_product(&state.db, id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Producto no encontrado".to_string()))?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    product_queries::delete_product(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
