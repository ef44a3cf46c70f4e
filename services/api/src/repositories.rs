//! Repositories for database operations
//!
//! The gallery and event stores sit behind traits so the services can run
//! against PostgreSQL in production and [`memory::MemoryStore`] in tests.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::kegiatan::{Kegiatan, KegiatanFoto, KegiatanInput, PhotoInput, SortOrderEntry};

pub mod content;
pub mod kegiatan;
pub mod memory;
pub mod photo;

pub use content::{BannerRepository, PembinaRepository, QrCodeRepository, StrukturRepository};
pub use kegiatan::KegiatanRepository;
pub use photo::PhotoRepository;

/// Photo storage for event galleries
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Photos of one event ordered by sort_order, then created_at, then id
    async fn list_by_kegiatan(&self, kegiatan_id: i32) -> DatabaseResult<Vec<KegiatanFoto>>;

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<KegiatanFoto>>;

    /// Insert a photo; fails with `NotFound` if the event does not exist
    async fn create(&self, kegiatan_id: i32, input: &PhotoInput) -> DatabaseResult<KegiatanFoto>;

    /// Replace image, caption and sort order
    async fn update(&self, id: i32, input: &PhotoInput) -> DatabaseResult<KegiatanFoto>;

    async fn delete(&self, id: i32) -> DatabaseResult<()>;

    /// Apply every entry or none of them. The first unknown id aborts the
    /// batch with `NotFound`.
    async fn update_sort_orders(&self, entries: &[SortOrderEntry]) -> DatabaseResult<()>;
}

/// Event storage. Reads embed each event's ordered photos.
#[async_trait]
pub trait KegiatanStore: Send + Sync {
    async fn list(&self) -> DatabaseResult<Vec<Kegiatan>>;

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Kegiatan>>;

    async fn create(&self, input: &KegiatanInput) -> DatabaseResult<Kegiatan>;

    async fn update(&self, id: i32, input: &KegiatanInput) -> DatabaseResult<Kegiatan>;

    /// Delete the event together with all of its photos, atomically.
    /// Returns the number of photos removed.
    async fn delete(&self, id: i32) -> DatabaseResult<u64>;
}
