use std::collections::HashMap;

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::Result,
    models::{Product, ProductRequest},
};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn get_all(pool: &PgPool) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id ASC")
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn get_by_category(pool: &PgPool, category_id: i32) -> Result<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT * FROM products WHERE category_id = $1 ORDER BY id ASC",
    )
    .bind(category_id)
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn find_by_ids(pool: &PgPool, ids: &[i32]) -> Result<HashMap<i32, Product>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;

    Ok(products
        .into_iter()
        .map(|product| (product.id, product))
        .collect())
}

/// Caller checks that `name` and `price` are present.
pub async fn create_product(pool: &PgPool, req: &ProductRequest) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, price, description, image, stock, category_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(&req.name)
    .bind(req.price)
    .bind(req.description.clone().flatten())
    .bind(req.image.clone().flatten())
    .bind(req.stock.unwrap_or(0))
    .bind(req.category_id.flatten())
    .fetch_one(pool)
    .await?;

    Ok(product)
}

pub fn build_product_update(id: i32, req: &ProductRequest) -> QueryBuilder<'static, Postgres> {
    let mut query_builder =
        QueryBuilder::<Postgres>::new("UPDATE products SET updated_at = NOW()");

    if let Some(name) = &req.name {
        query_builder.push(", name = ").push_bind(name.clone());
    }

    if let Some(price) = req.price {
        query_builder.push(", price = ").push_bind(price);
    }

    if let Some(description) = &req.description {
        query_builder.push(", description = ").push_bind(description.clone());
    }

    if let Some(image) = &req.image {
        query_builder.push(", image = ").push_bind(image.clone());
    }

    if let Some(stock) = req.stock {
        query_builder.push(", stock = ").push_bind(stock);
    }

    // Some(None) binds NULL and clears the column.
    if let Some(category_id) = req.category_id {
        query_builder.push(", category_id = ").push_bind(category_id);
    }

    query_builder.push(" WHERE id = ").push_bind(id);
    query_builder.push(" RETURNING *");

    query_builder
}

pub async fn update_product(
    pool: &PgPool,
    id: i32,
    req: &ProductRequest,
) -> Result<Option<Product>> {
    let mut query_builder = build_product_update(id, req);

    let product = query_builder
        .build_query_as::<Product>()
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn empty_update_only_touches_timestamp() {
        let query_builder = build_product_update(9, &ProductRequest::default());

        assert_eq!(
            query_builder.sql(),
            "UPDATE products SET updated_at = NOW() WHERE id = $1 RETURNING *"
        );
    }

    #[test]
    fn partial_update_binds_in_column_order() {
        let req = ProductRequest {
            price: Some(Decimal::new(1999, 2)),
            stock: Some(3),
            category_id: Some(Some(2)),
            ..Default::default()
        };

        let query_builder = build_product_update(9, &req);

        assert_eq!(
            query_builder.sql(),
            "UPDATE products SET updated_at = NOW(), price = $1, stock = $2, category_id = $3 \
             WHERE id = $4 RETURNING *"
        );
    }

    #[test]
    fn explicit_nulls_are_written() {
        let req = ProductRequest {
            description: Some(None),
            category_id: Some(None),
            ..Default::default()
        };

        let query_builder = build_product_update(9, &req);

        assert_eq!(
            query_builder.sql(),
            "UPDATE products SET updated_at = NOW(), description = $1, category_id = $2 \
             WHERE id = $3 RETURNING *"
        );
    }
}
