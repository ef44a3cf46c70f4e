//! PostgreSQL gallery photo repository

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;

use super::PhotoStore;
use crate::models::kegiatan::{KegiatanFoto, PhotoInput, SortOrderEntry};

/// Photo repository for database operations
#[derive(Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    /// Create a new photo repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoStore for PhotoRepository {
    async fn list_by_kegiatan(&self, kegiatan_id: i32) -> DatabaseResult<Vec<KegiatanFoto>> {
        let photos = sqlx::query_as::<_, KegiatanFoto>(
            r#"
            SELECT id, kegiatan_id, photo_url AS image_url, caption, sort_order, created_at, updated_at
            FROM kegiatan_photos
            WHERE kegiatan_id = $1
            ORDER BY sort_order ASC, created_at ASC, id ASC
            "#,
        )
        .bind(kegiatan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(photos)
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<KegiatanFoto>> {
        let photo = sqlx::query_as::<_, KegiatanFoto>(
            r#"
            SELECT id, kegiatan_id, photo_url AS image_url, caption, sort_order, created_at, updated_at
            FROM kegiatan_photos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(photo)
    }

    async fn create(&self, kegiatan_id: i32, input: &PhotoInput) -> DatabaseResult<KegiatanFoto> {
        sqlx::query_as::<_, KegiatanFoto>(
            r#"
            INSERT INTO kegiatan_photos (kegiatan_id, photo_url, caption, sort_order)
            VALUES ($1, $2, $3, $4)
            RETURNING id, kegiatan_id, photo_url AS image_url, caption, sort_order, created_at, updated_at
            "#,
        )
        .bind(kegiatan_id)
        .bind(&input.image_url)
        .bind(&input.caption)
        .bind(input.sort_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                DatabaseError::NotFound(format!("Kegiatan {}", kegiatan_id))
            }
            other => DatabaseError::Query(other),
        })
    }

    async fn update(&self, id: i32, input: &PhotoInput) -> DatabaseResult<KegiatanFoto> {
        sqlx::query_as::<_, KegiatanFoto>(
            r#"
            UPDATE kegiatan_photos
            SET photo_url = $1, caption = $2, sort_order = $3, updated_at = NOW()
            WHERE id = $4
            RETURNING id, kegiatan_id, photo_url AS image_url, caption, sort_order, created_at, updated_at
            "#,
        )
        .bind(&input.image_url)
        .bind(&input.caption)
        .bind(input.sort_order)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("Photo {}", id)))
    }

    async fn delete(&self, id: i32) -> DatabaseResult<()> {
        let result = sqlx::query("DELETE FROM kegiatan_photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Photo {}", id)));
        }

        Ok(())
    }

    async fn update_sort_orders(&self, entries: &[SortOrderEntry]) -> DatabaseResult<()> {
        let mut tx = self.pool.begin().await?;

        for entry in entries {
            let result = sqlx::query(
                r#"
                UPDATE kegiatan_photos
                SET sort_order = $1, updated_at = NOW()
                WHERE id = $2
                "#,
            )
            .bind(entry.sort_order)
            .bind(entry.id)
            .execute(&mut *tx)
            .await?;

            // Dropping the transaction here rolls back the earlier entries
            if result.rows_affected() == 0 {
                return Err(DatabaseError::NotFound(format!("Photo {}", entry.id)));
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
