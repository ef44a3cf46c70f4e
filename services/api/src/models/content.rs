//! Site content entities: banners, organisation structure, advisors, QR codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Validate;

/// At most this many advisor (pembina) profiles may exist
pub const MAX_PEMBINA: i64 = 2;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Banner {
    pub id: i32,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerInput {
    #[serde(default)]
    pub image_url: String,
}

/// Member of the organisation structure
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Struktur {
    pub id: i32,
    pub nama: String,
    pub jabatan: String,
    pub prodi: String,
    pub angkatan: String,
    pub nra: String,
    pub foto_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrukturInput {
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub jabatan: String,
    #[serde(default)]
    pub prodi: String,
    #[serde(default)]
    pub angkatan: String,
    #[serde(default)]
    pub nra: String,
    #[serde(default)]
    pub foto_url: String,
}

/// Advisor profile
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Pembina {
    pub id: i32,
    pub nama: String,
    pub jabatan: String,
    pub nip: String,
    pub foto_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PembinaInput {
    #[serde(default)]
    pub nama: String,
    #[serde(default)]
    pub jabatan: String,
    #[serde(default)]
    pub nip: String,
    #[serde(default)]
    pub foto_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QrCode {
    pub id: i32,
    pub image_url: String,
    pub keterangan: String,
    pub enable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrCodeInput {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub keterangan: String,
    #[serde(default)]
    pub enable: bool,
}

fn required(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    Ok(())
}

impl Validate for BannerInput {
    fn validate(&self) -> Result<(), String> {
        required(&self.image_url, "image_url")
    }
}

impl Validate for StrukturInput {
    fn validate(&self) -> Result<(), String> {
        required(&self.nama, "nama")?;
        required(&self.jabatan, "jabatan")
    }
}

impl Validate for PembinaInput {
    fn validate(&self) -> Result<(), String> {
        required(&self.nama, "nama")
    }
}

impl Validate for QrCodeInput {
    fn validate(&self) -> Result<(), String> {
        required(&self.image_url, "image_url")
    }
}
