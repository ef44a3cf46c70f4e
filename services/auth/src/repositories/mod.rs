//! Admin account storage

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::AdminUser;

pub mod admin;
pub mod memory;

pub use admin::AdminRepository;
pub use memory::MemoryAdminStore;

/// Read access to admin accounts, keyed by exact username
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Find an admin by username (case-sensitive)
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<AdminUser>>;
}
