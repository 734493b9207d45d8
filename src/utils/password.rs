use crate::error::{AppError, Result};

/// bcrypt work factor, matches the hashes already stored by the previous backend.
pub const HASH_COST: u32 = 10;

pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::hash(password, HASH_COST))
        .await
        .map_err(|e| AppError::InternalError(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_owned();
    let hash = hash.to_owned();

    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("secreto123").await.unwrap();

        assert_ne!(hash, "secreto123");
        assert!(hash.starts_with("$2"));
        assert!(verify_password("secreto123", &hash).await.unwrap());
        assert!(!verify_password("otra", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let first = hash_password("igual").await.unwrap();
        let second = hash_password("igual").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_hash_is_an_internal_error() {
        let err = verify_password("x", "not-a-bcrypt-hash").await.unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
    }
}
