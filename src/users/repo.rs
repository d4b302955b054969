use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::ApiError;

/// Stored user row. Deliberately not `Serialize`: the hash must never reach a
/// response body, so handlers build DTOs instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_hash: String,
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, first_name, last_name, email_address, password_hash, created_at, updated_at
        FROM users
        WHERE email_address = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn find_by_id(db: &PgPool, id: i32) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, first_name, last_name, email_address, password_hash, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

/// Insert relies on the unique index as the authority of last resort: two
/// concurrent creates with the same address race at the store, and the loser
/// surfaces here as `ApiError::UniqueEmail`.
pub async fn create(db: &PgPool, new: &NewUser) -> Result<User, ApiError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (first_name, last_name, email_address, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING id, first_name, last_name, email_address, password_hash, created_at, updated_at
        "#,
    )
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email_address)
    .bind(&new.password_hash)
    .fetch_one(db)
    .await
    .map_err(|e| ApiError::from_insert(e, &new.email_address))?;
    Ok(user)
}
