use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{AddCartItemRequest, CartItem, CartItemWithProduct, UpdateCartItemRequest},
    queries::{cart_queries, product_queries},
};

pub async fn get_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<CartItemWithProduct>>> {
    let items = cart_queries::get_by_user(&state.db, user_id).await?;

    let mut product_ids: Vec<i32> = items.iter().map(|item| item.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();

    let products = product_queries::find_by_ids(&state.db, &product_ids).await?;

    let response = items
        .into_iter()
        .map(|item| CartItemWithProduct {
            product: products.get(&item.product_id).cloned(),
            item,
        })
        .collect();

    Ok(Json(response))
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(payload): Json<AddCartItemRequest>,
) -> Result<(StatusCode, Json<CartItem>)> {
    let product_id = payload
        .product_id
        .ok_or_else(|| AppError::BadRequest("productId is required".to_string()))?;

    let item = cart_queries::add_item(
        &state.db,
        user_id,
        product_id,
        payload.quantity.unwrap_or(1),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Responds with `null` when the user has no row for that product.
pub async fn update_cart_item(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateCartItemRequest>,
) -> Result<Json<Option<CartItem>>> {
    let product_id = payload
        .product_id
        .ok_or_else(|| AppError::BadRequest("productId is required".to_string()))?;
    let quantity = payload
        .quantity
        .ok_or_else(|| AppError::BadRequest("quantity is required".to_string()))?;

    let matched = cart_queries::update_quantity(&state.db, user_id, product_id, quantity).await?;
    if matched == 0 {
        return Ok(Json(None));
    }

    let item = cart_queries::find_item(&state.db, user_id, product_id).await?;

    Ok(Json(item))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path((user_id, product_id)): Path<(i32, i32)>,
) -> Result<StatusCode> {
    cart_queries::delete_item(&state.db, user_id, product_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_cart(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<StatusCode> {
    let removed = cart_queries::clear_cart(&state.db, user_id).await?;
    tracing::debug!("Cleared {} cart rows for user {}", removed, user_id);

    Ok(StatusCode::NO_CONTENT)
}
