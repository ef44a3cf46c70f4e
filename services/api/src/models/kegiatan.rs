//! Event (kegiatan) and gallery photo models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Validate;

/// A published activity with its ordered photo gallery
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Kegiatan {
    pub id: i32,
    pub judul: String,
    pub deskripsi: String,
    pub cover: String,
    pub tanggal: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fotos: Vec<KegiatanFoto>,
}

/// Create/update payload for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KegiatanInput {
    #[serde(default)]
    pub judul: String,
    #[serde(default)]
    pub deskripsi: String,
    #[serde(default)]
    pub cover: String,
    pub tanggal: DateTime<Utc>,
}

impl Validate for KegiatanInput {
    fn validate(&self) -> Result<(), String> {
        if self.judul.trim().is_empty() {
            return Err("Judul is required".to_string());
        }
        Ok(())
    }
}

/// One gallery photo. `sort_order` is a display hint: ties fall back to
/// creation time, and values need not be unique or contiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct KegiatanFoto {
    pub id: i32,
    pub kegiatan_id: i32,
    pub image_url: String,
    pub caption: String,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update payload for a photo; all three fields are replaced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoInput {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub sort_order: i32,
}

impl Validate for PhotoInput {
    fn validate(&self) -> Result<(), String> {
        if self.image_url.trim().is_empty() {
            return Err("image_url is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrderEntry {
    pub id: i32,
    pub sort_order: i32,
}

/// Body of `PUT /api/admin/photos/sort-order`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortOrderRequest {
    pub photos: Vec<SortOrderEntry>,
}
