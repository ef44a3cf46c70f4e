//! PostgreSQL event (kegiatan) repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use std::collections::HashMap;

use super::KegiatanStore;
use crate::models::kegiatan::{Kegiatan, KegiatanFoto, KegiatanInput};

const SELECT_PHOTOS: &str = r#"
    SELECT id, kegiatan_id, photo_url AS image_url, caption, sort_order, created_at, updated_at
    FROM kegiatan_photos
    WHERE kegiatan_id = ANY($1)
    ORDER BY kegiatan_id, sort_order ASC, created_at ASC, id ASC
"#;

/// Event repository for database operations
#[derive(Clone)]
pub struct KegiatanRepository {
    pool: PgPool,
}

impl KegiatanRepository {
    /// Create a new event repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach each event's photos with one query instead of one per event
    async fn attach_photos(&self, kegiatan: &mut [Kegiatan]) -> DatabaseResult<()> {
        let ids: Vec<i32> = kegiatan.iter().map(|k| k.id).collect();
        if ids.is_empty() {
            return Ok(());
        }

        let photos = sqlx::query_as::<_, KegiatanFoto>(SELECT_PHOTOS)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

        let mut by_event: HashMap<i32, Vec<KegiatanFoto>> = HashMap::new();
        for photo in photos {
            by_event.entry(photo.kegiatan_id).or_default().push(photo);
        }

        for k in kegiatan.iter_mut() {
            k.fotos = by_event.remove(&k.id).unwrap_or_default();
        }

        Ok(())
    }
}

#[async_trait]
impl KegiatanStore for KegiatanRepository {
    async fn list(&self) -> DatabaseResult<Vec<Kegiatan>> {
        let mut kegiatan = sqlx::query_as::<_, Kegiatan>(
            r#"
            SELECT id, judul, deskripsi, cover, tanggal, created_at, updated_at
            FROM kegiatan
            ORDER BY tanggal DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        self.attach_photos(&mut kegiatan).await?;
        Ok(kegiatan)
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Kegiatan>> {
        let kegiatan = sqlx::query_as::<_, Kegiatan>(
            r#"
            SELECT id, judul, deskripsi, cover, tanggal, created_at, updated_at
            FROM kegiatan
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(kegiatan) = kegiatan else {
            return Ok(None);
        };

        let mut found = [kegiatan];
        self.attach_photos(&mut found).await?;
        let [kegiatan] = found;
        Ok(Some(kegiatan))
    }

    async fn create(&self, input: &KegiatanInput) -> DatabaseResult<Kegiatan> {
        let kegiatan = sqlx::query_as::<_, Kegiatan>(
            r#"
            INSERT INTO kegiatan (judul, deskripsi, cover, tanggal)
            VALUES ($1, $2, $3, $4)
            RETURNING id, judul, deskripsi, cover, tanggal, created_at, updated_at
            "#,
        )
        .bind(&input.judul)
        .bind(&input.deskripsi)
        .bind(&input.cover)
        .bind(input.tanggal)
        .fetch_one(&self.pool)
        .await?;

        Ok(kegiatan)
    }

    async fn update(&self, id: i32, input: &KegiatanInput) -> DatabaseResult<Kegiatan> {
        let kegiatan = sqlx::query_as::<_, Kegiatan>(
            r#"
            UPDATE kegiatan
            SET judul = $1, deskripsi = $2, cover = $3, tanggal = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING id, judul, deskripsi, cover, tanggal, created_at, updated_at
            "#,
        )
        .bind(&input.judul)
        .bind(&input.deskripsi)
        .bind(&input.cover)
        .bind(input.tanggal)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("Kegiatan {}", id)))?;

        let mut found = [kegiatan];
        self.attach_photos(&mut found).await?;
        let [kegiatan] = found;
        Ok(kegiatan)
    }

    async fn delete(&self, id: i32) -> DatabaseResult<u64> {
        let mut tx = self.pool.begin().await?;

        // Lock the event row so no photo can be attached mid-delete
        let locked: Option<i32> =
            sqlx::query_scalar("SELECT id FROM kegiatan WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(DatabaseError::NotFound(format!("Kegiatan {}", id)));
        }

        let photos = sqlx::query("DELETE FROM kegiatan_photos WHERE kegiatan_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM kegiatan WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(photos)
    }
}
