//! PostgreSQL admin repository

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use super::AdminStore;
use crate::models::AdminUser;

/// Admin repository
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new admin repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the account, or replace its password digest if it exists
    pub async fn upsert(&self, username: &str, password_hash: &str) -> DatabaseResult<AdminUser> {
        info!("Upserting admin account: {}", username);

        let admin = sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_user (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO UPDATE
            SET password_hash = EXCLUDED.password_hash, updated_at = NOW()
            RETURNING id, username, password_hash, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(admin)
    }
}

#[async_trait]
impl AdminStore for AdminRepository {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<AdminUser>> {
        let admin = sqlx::query_as::<_, AdminUser>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM admin_user
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }
}
