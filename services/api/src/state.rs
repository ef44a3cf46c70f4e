//! Application state shared across handlers

use auth::AuthService;
use sqlx::PgPool;
use std::sync::Arc;

use crate::{
    gallery::GalleryService,
    repositories::{
        BannerRepository, KegiatanRepository, KegiatanStore, PembinaRepository, PhotoRepository,
        PhotoStore, QrCodeRepository, StrukturRepository,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub gallery: GalleryService,
    pub kegiatan: Arc<dyn KegiatanStore>,
    pub banners: BannerRepository,
    pub struktur: StrukturRepository,
    pub pembina: PembinaRepository,
    pub qrcodes: QrCodeRepository,
}

impl AppState {
    /// Wire every store to PostgreSQL
    pub fn new(pool: PgPool, auth: AuthService) -> Self {
        Self::with_stores(
            pool.clone(),
            auth,
            Arc::new(PhotoRepository::new(pool.clone())),
            Arc::new(KegiatanRepository::new(pool)),
        )
    }

    /// Use the given event and photo stores; the remaining content
    /// repositories still go through `pool`
    pub fn with_stores(
        pool: PgPool,
        auth: AuthService,
        photos: Arc<dyn PhotoStore>,
        kegiatan: Arc<dyn KegiatanStore>,
    ) -> Self {
        Self {
            banners: BannerRepository::new(pool.clone()),
            struktur: StrukturRepository::new(pool.clone()),
            pembina: PembinaRepository::new(pool.clone()),
            qrcodes: QrCodeRepository::new(pool),
            auth,
            gallery: GalleryService::new(photos),
            kegiatan,
        }
    }
}
