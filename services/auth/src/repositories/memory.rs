//! In-memory admin store for tests and local runs without PostgreSQL

use async_trait::async_trait;
use chrono::Utc;
use common::error::DatabaseResult;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::AdminStore;
use crate::{error::AuthResult, models::AdminUser, password::hash_password};

#[derive(Clone, Default)]
pub struct MemoryAdminStore {
    admins: Arc<Mutex<Vec<AdminUser>>>,
}

impl MemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account, hashing `password` the same way the real store does
    pub async fn insert(&self, username: &str, password: &str) -> AuthResult<AdminUser> {
        let password_hash = hash_password(password)?;
        let mut admins = self.admins.lock().await;
        let now = Utc::now();

        let admin = AdminUser {
            id: admins.len() as i32 + 1,
            username: username.to_string(),
            password_hash,
            created_at: now,
            updated_at: now,
        };
        admins.push(admin.clone());

        Ok(admin)
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<AdminUser>> {
        let admins = self.admins.lock().await;
        Ok(admins.iter().find(|a| a.username == username).cloned())
    }
}
