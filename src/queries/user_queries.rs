use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, Result},
    models::{UpdateUserRequest, User},
};

pub async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
    is_admin: bool,
) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password, is_admin) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(is_admin)
    .fetch_one(pool)
    .await
    .map_err(AppError::from_user_write)?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

pub async fn get_all(pool: &PgPool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id ASC")
        .fetch_all(pool)
        .await?;

    Ok(users)
}

pub async fn count_users(pool: &PgPool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// `password_hash` replaces `req.password`, which must already be hashed by the caller.
pub fn build_user_update(
    id: i32,
    req: &UpdateUserRequest,
    password_hash: Option<String>,
) -> QueryBuilder<'static, Postgres> {
    let mut query_builder = QueryBuilder::<Postgres>::new("UPDATE users SET updated_at = NOW()");

    if let Some(name) = &req.name {
        query_builder.push(", name = ").push_bind(name.clone());
    }

    if let Some(email) = &req.email {
        query_builder.push(", email = ").push_bind(email.clone());
    }

    if let Some(hash) = password_hash {
        query_builder.push(", password = ").push_bind(hash);
    }

    if let Some(is_admin) = req.is_admin {
        query_builder.push(", is_admin = ").push_bind(is_admin);
    }

    query_builder.push(" WHERE id = ").push_bind(id);
    query_builder.push(" RETURNING *");

    query_builder
}

pub async fn update_user(
    pool: &PgPool,
    id: i32,
    req: &UpdateUserRequest,
    password_hash: Option<String>,
) -> Result<Option<User>> {
    let mut query_builder = build_user_update(id, req, password_hash);

    let user = query_builder
        .build_query_as::<User>()
        .fetch_optional(pool)
        .await
        .map_err(AppError::from_user_write)?;

    Ok(user)
}

pub async fn delete_user(pool: &PgPool, id: i32) -> Result<()> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_sets_only_provided_columns() {
        let req = UpdateUserRequest {
            email: Some("nuevo@tienda.test".to_string()),
            is_admin: Some(true),
            ..Default::default()
        };

        let query_builder = build_user_update(4, &req, None);

        assert_eq!(
            query_builder.sql(),
            "UPDATE users SET updated_at = NOW(), email = $1, is_admin = $2 WHERE id = $3 RETURNING *"
        );
    }

    #[test]
    fn hashed_password_replaces_the_plain_one() {
        let req = UpdateUserRequest {
            password: Some("plain".to_string()),
            ..Default::default()
        };

        let query_builder = build_user_update(1, &req, Some("$2b$10$hash".to_string()));

        assert_eq!(
            query_builder.sql(),
            "UPDATE users SET updated_at = NOW(), password = $1 WHERE id = $2 RETURNING *"
        );
    }
}
