//! PostgreSQL repositories for banners, struktur, pembina and QR codes

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;

use crate::models::content::{
    Banner, BannerInput, Pembina, PembinaInput, QrCode, QrCodeInput, Struktur, StrukturInput,
};

fn not_found(entity: &str, id: i32) -> DatabaseError {
    DatabaseError::NotFound(format!("{} {}", entity, id))
}

/// Delete a row by id from `table`
async fn delete_row(pool: &PgPool, table: &str, entity: &str, id: i32) -> DatabaseResult<()> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(entity, id));
    }
    Ok(())
}

/// Banner repository
#[derive(Clone)]
pub struct BannerRepository {
    pool: PgPool,
}

impl BannerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Newest first
    pub async fn get_all(&self) -> DatabaseResult<Vec<Banner>> {
        let banners = sqlx::query_as::<_, Banner>(
            "SELECT id, image_url, created_at, updated_at FROM banners ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(banners)
    }

    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Banner>> {
        let banner = sqlx::query_as::<_, Banner>(
            "SELECT id, image_url, created_at, updated_at FROM banners WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(banner)
    }

    pub async fn create(&self, input: &BannerInput) -> DatabaseResult<Banner> {
        let banner = sqlx::query_as::<_, Banner>(
            r#"
            INSERT INTO banners (image_url)
            VALUES ($1)
            RETURNING id, image_url, created_at, updated_at
            "#,
        )
        .bind(&input.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(banner)
    }

    pub async fn update(&self, id: i32, input: &BannerInput) -> DatabaseResult<Banner> {
        sqlx::query_as::<_, Banner>(
            r#"
            UPDATE banners SET image_url = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, image_url, created_at, updated_at
            "#,
        )
        .bind(&input.image_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("Banner", id))
    }

    pub async fn delete(&self, id: i32) -> DatabaseResult<()> {
        delete_row(&self.pool, "banners", "Banner", id).await
    }
}

/// Organisation structure repository
#[derive(Clone)]
pub struct StrukturRepository {
    pool: PgPool,
}

impl StrukturRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Oldest first, which is the order members are entered in
    pub async fn get_all(&self) -> DatabaseResult<Vec<Struktur>> {
        let rows = sqlx::query_as::<_, Struktur>(
            r#"
            SELECT id, nama, jabatan, prodi, angkatan, nra, foto_url, created_at, updated_at
            FROM struktur
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Struktur>> {
        let row = sqlx::query_as::<_, Struktur>(
            r#"
            SELECT id, nama, jabatan, prodi, angkatan, nra, foto_url, created_at, updated_at
            FROM struktur
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create(&self, input: &StrukturInput) -> DatabaseResult<Struktur> {
        let row = sqlx::query_as::<_, Struktur>(
            r#"
            INSERT INTO struktur (nama, jabatan, prodi, angkatan, nra, foto_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, nama, jabatan, prodi, angkatan, nra, foto_url, created_at, updated_at
            "#,
        )
        .bind(&input.nama)
        .bind(&input.jabatan)
        .bind(&input.prodi)
        .bind(&input.angkatan)
        .bind(&input.nra)
        .bind(&input.foto_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: i32, input: &StrukturInput) -> DatabaseResult<Struktur> {
        sqlx::query_as::<_, Struktur>(
            r#"
            UPDATE struktur
            SET nama = $1, jabatan = $2, prodi = $3, angkatan = $4, nra = $5, foto_url = $6,
                updated_at = NOW()
            WHERE id = $7
            RETURNING id, nama, jabatan, prodi, angkatan, nra, foto_url, created_at, updated_at
            "#,
        )
        .bind(&input.nama)
        .bind(&input.jabatan)
        .bind(&input.prodi)
        .bind(&input.angkatan)
        .bind(&input.nra)
        .bind(&input.foto_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("Struktur", id))
    }

    pub async fn delete(&self, id: i32) -> DatabaseResult<()> {
        delete_row(&self.pool, "struktur", "Struktur", id).await
    }
}

/// Advisor repository
#[derive(Clone)]
pub struct PembinaRepository {
    pool: PgPool,
}

impl PembinaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> DatabaseResult<Vec<Pembina>> {
        let rows = sqlx::query_as::<_, Pembina>(
            r#"
            SELECT id, nama, jabatan, nip, foto_url, created_at, updated_at
            FROM pembina
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Pembina>> {
        let row = sqlx::query_as::<_, Pembina>(
            r#"
            SELECT id, nama, jabatan, nip, foto_url, created_at, updated_at
            FROM pembina
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Insert unless `limit` advisors already exist. `None` means the cap
    /// was hit. Concurrent inserts are serialized by a table lock held for
    /// the count and the insert.
    pub async fn create_capped(
        &self,
        input: &PembinaInput,
        limit: i64,
    ) -> DatabaseResult<Option<Pembina>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("LOCK TABLE pembina IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pembina")
            .fetch_one(&mut *tx)
            .await?;
        if count >= limit {
            return Ok(None);
        }

        let row = sqlx::query_as::<_, Pembina>(
            r#"
            INSERT INTO pembina (nama, jabatan, nip, foto_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, nama, jabatan, nip, foto_url, created_at, updated_at
            "#,
        )
        .bind(&input.nama)
        .bind(&input.jabatan)
        .bind(&input.nip)
        .bind(&input.foto_url)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    pub async fn update(&self, id: i32, input: &PembinaInput) -> DatabaseResult<Pembina> {
        sqlx::query_as::<_, Pembina>(
            r#"
            UPDATE pembina
            SET nama = $1, jabatan = $2, nip = $3, foto_url = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING id, nama, jabatan, nip, foto_url, created_at, updated_at
            "#,
        )
        .bind(&input.nama)
        .bind(&input.jabatan)
        .bind(&input.nip)
        .bind(&input.foto_url)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("Pembina", id))
    }

    pub async fn delete(&self, id: i32) -> DatabaseResult<()> {
        delete_row(&self.pool, "pembina", "Pembina", id).await
    }
}

/// QR code repository
#[derive(Clone)]
pub struct QrCodeRepository {
    pool: PgPool,
}

impl QrCodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> DatabaseResult<Vec<QrCode>> {
        let rows = sqlx::query_as::<_, QrCode>(
            r#"
            SELECT id, image_url, keterangan, enable, created_at, updated_at
            FROM qr_code
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Codes currently shown on the public site
    pub async fn get_enabled(&self) -> DatabaseResult<Vec<QrCode>> {
        let rows = sqlx::query_as::<_, QrCode>(
            r#"
            SELECT id, image_url, keterangan, enable, created_at, updated_at
            FROM qr_code
            WHERE enable = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<QrCode>> {
        let row = sqlx::query_as::<_, QrCode>(
            r#"
            SELECT id, image_url, keterangan, enable, created_at, updated_at
            FROM qr_code
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create(&self, input: &QrCodeInput) -> DatabaseResult<QrCode> {
        let row = sqlx::query_as::<_, QrCode>(
            r#"
            INSERT INTO qr_code (image_url, keterangan, enable)
            VALUES ($1, $2, $3)
            RETURNING id, image_url, keterangan, enable, created_at, updated_at
            "#,
        )
        .bind(&input.image_url)
        .bind(&input.keterangan)
        .bind(input.enable)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: i32, input: &QrCodeInput) -> DatabaseResult<QrCode> {
        sqlx::query_as::<_, QrCode>(
            r#"
            UPDATE qr_code
            SET image_url = $1, keterangan = $2, enable = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, image_url, keterangan, enable, created_at, updated_at
            "#,
        )
        .bind(&input.image_url)
        .bind(&input.keterangan)
        .bind(input.enable)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("QR code", id))
    }

    /// Flip `enable` and return the new state
    pub async fn toggle(&self, id: i32) -> DatabaseResult<QrCode> {
        sqlx::query_as::<_, QrCode>(
            r#"
            UPDATE qr_code SET enable = NOT enable, updated_at = NOW()
            WHERE id = $1
            RETURNING id, image_url, keterangan, enable, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("QR code", id))
    }

    pub async fn delete(&self, id: i32) -> DatabaseResult<()> {
        delete_row(&self.pool, "qr_code", "QR code", id).await
    }
}
