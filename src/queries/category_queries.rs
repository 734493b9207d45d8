use std::collections::HashMap;

use sqlx::PgPool;

use crate::{error::Result, models::Category};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Alphabetical, as the catalog filter shows them
pub async fn get_all(pool: &PgPool) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}

/// Get categories for a set of ids, keyed by id
pub async fn find_by_ids(pool: &PgPool, ids: &[i32]) -> Result<HashMap<i32, Category>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let categories =
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(pool)
            .await?;

    let category_map = categories
        .into_iter()
        .map(|category| (category.id, category))
        .collect();

    Ok(category_map)
}

pub async fn create_category(pool: &PgPool, name: &str) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name) VALUES ($1) RETURNING *",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(category)
}

/// Rename a category; no name means only the timestamp moves
pub async fn update_category(
    pool: &PgPool,
    id: i32,
    name: Option<&str>,
) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "UPDATE categories
         SET name = COALESCE($1, name), updated_at = NOW()
         WHERE id = $2
         RETURNING *",
    )
    .bind(name)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

/// Products keep their `category_id`; nothing cascades
pub async fn delete_category(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
