use sqlx::PgPool;

use crate::{error::Result, models::CartItem};

pub async fn get_by_user(pool: &PgPool, user_id: i32) -> Result<Vec<CartItem>> {
    let items = sqlx::query_as::<_, CartItem>(
        "SELECT * FROM cart_items WHERE user_id = $1 ORDER BY id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Always inserts; the same product added twice yields two rows.
pub async fn add_item(
    pool: &PgPool,
    user_id: i32,
    product_id: i32,
    quantity: i32,
) -> Result<CartItem> {
    let item = sqlx::query_as::<_, CartItem>(
        "INSERT INTO cart_items (user_id, product_id, quantity)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_one(pool)
    .await?;

    Ok(item)
}

/// Updates every row for the pair and returns how many matched.
pub async fn update_quantity(
    pool: &PgPool,
    user_id: i32,
    product_id: i32,
    quantity: i32,
) -> Result<u64> {
    let result = sqlx::query(
        "UPDATE cart_items
         SET quantity = $1, updated_at = NOW()
         WHERE user_id = $2 AND product_id = $3",
    )
    .bind(quantity)
    .bind(user_id)
    .bind(product_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn find_item(pool: &PgPool, user_id: i32, product_id: i32) -> Result<Option<CartItem>> {
    let item = sqlx::query_as::<_, CartItem>(
        "SELECT * FROM cart_items
         WHERE user_id = $1 AND product_id = $2
         ORDER BY id ASC
         LIMIT 1",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}

pub async fn delete_item(pool: &PgPool, user_id: i32, product_id: i32) -> Result<()> {
    sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn clear_cart(pool: &PgPool, user_id: i32) -> Result<u64> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
