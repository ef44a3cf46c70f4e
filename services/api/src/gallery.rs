//! Gallery ordering service for event photos

use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    error::{ApiError, ApiResult},
    models::{
        Validate,
        kegiatan::{KegiatanFoto, PhotoInput, SortOrderEntry},
    },
    repositories::PhotoStore,
};

/// Photo operations shared across request handlers
#[derive(Clone)]
pub struct GalleryService {
    photos: Arc<dyn PhotoStore>,
}

impl GalleryService {
    pub fn new(photos: Arc<dyn PhotoStore>) -> Self {
        Self { photos }
    }

    /// Photos of an event in display order. An event with no photos, or one
    /// that does not exist, yields an empty list.
    pub async fn list_by_event(&self, kegiatan_id: i32) -> ApiResult<Vec<KegiatanFoto>> {
        let photos = self.photos.list_by_kegiatan(kegiatan_id).await?;
        debug!("Listed {} photos for kegiatan {}", photos.len(), kegiatan_id);
        Ok(photos)
    }

    pub async fn get(&self, id: i32) -> ApiResult<KegiatanFoto> {
        self.photos
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Photo {} not found", id)))
    }

    /// Add a photo at the caller-supplied position
    pub async fn create(&self, kegiatan_id: i32, input: &PhotoInput) -> ApiResult<KegiatanFoto> {
        input.validate().map_err(ApiError::Validation)?;

        let photo = self.photos.create(kegiatan_id, input).await?;
        info!("Added photo {} to kegiatan {}", photo.id, kegiatan_id);
        Ok(photo)
    }

    /// Replace image, caption and position
    pub async fn update(&self, id: i32, input: &PhotoInput) -> ApiResult<KegiatanFoto> {
        input.validate().map_err(ApiError::Validation)?;

        let photo = self.photos.update(id, input).await?;
        info!("Updated photo {}", id);
        Ok(photo)
    }

    pub async fn delete(&self, id: i32) -> ApiResult<()> {
        self.photos.delete(id).await?;
        info!("Deleted photo {}", id);
        Ok(())
    }

    /// Apply a batch of position changes. Either every entry is written or
    /// none is. Ids may span events and positions may repeat.
    pub async fn reorder(&self, entries: &[SortOrderEntry]) -> ApiResult<()> {
        self.photos.update_sort_orders(entries).await?;
        info!("Reordered {} photos", entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::kegiatan::KegiatanInput,
        repositories::{KegiatanStore, memory::MemoryStore},
    };
    use chrono::Utc;

    async fn setup() -> (GalleryService, i32) {
        let store = MemoryStore::new();
        let kegiatan = KegiatanStore::create(
            &store,
            &KegiatanInput {
                judul: "Pendakian".to_string(),
                deskripsi: String::new(),
                cover: String::new(),
                tanggal: Utc::now(),
            },
        )
        .await
        .unwrap();

        (GalleryService::new(Arc::new(store)), kegiatan.id)
    }

    fn photo(url: &str, sort_order: i32) -> PhotoInput {
        PhotoInput {
            image_url: url.to_string(),
            caption: String::new(),
            sort_order,
        }
    }

    #[tokio::test]
    async fn listing_is_non_decreasing_by_position() {
        let (gallery, kid) = setup().await;
        for (url, pos) in [("a", 3), ("b", 1), ("c", 3), ("d", 0), ("e", 2)] {
            gallery.create(kid, &photo(url, pos)).await.unwrap();
        }

        let photos = gallery.list_by_event(kid).await.unwrap();
        assert_eq!(photos.len(), 5);
        for pair in photos.windows(2) {
            assert!(pair[0].sort_order <= pair[1].sort_order);
            if pair[0].sort_order == pair[1].sort_order {
                assert!(pair[0].created_at <= pair[1].created_at);
            }
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_image() {
        let (gallery, kid) = setup().await;
        let err = gallery.create(kid, &photo(" ", 0)).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(gallery.list_by_event(kid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_under_unknown_event_is_not_found() {
        let (gallery, _) = setup().await;
        let err = gallery.create(404, &photo("a.jpg", 0)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn reorder_is_reflected_in_listing() {
        let (gallery, kid) = setup().await;
        let one = gallery.create(kid, &photo("1.jpg", 0)).await.unwrap();
        let two = gallery.create(kid, &photo("2.jpg", 1)).await.unwrap();

        gallery
            .reorder(&[
                SortOrderEntry { id: one.id, sort_order: 5 },
                SortOrderEntry { id: two.id, sort_order: 3 },
            ])
            .await
            .unwrap();

        let ids: Vec<i32> = gallery
            .list_by_event(kid)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![two.id, one.id]);
    }

    #[tokio::test]
    async fn failed_reorder_leaves_positions_untouched() {
        let (gallery, kid) = setup().await;
        let one = gallery.create(kid, &photo("1.jpg", 0)).await.unwrap();

        let err = gallery
            .reorder(&[
                SortOrderEntry { id: one.id, sort_order: 5 },
                SortOrderEntry { id: 999, sort_order: 1 },
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        assert_eq!(gallery.get(one.id).await.unwrap().sort_order, 0);
    }

    #[tokio::test]
    async fn missing_photo_is_not_found() {
        let (gallery, _) = setup().await;
        assert!(matches!(gallery.get(5).await, Err(ApiError::NotFound(_))));
        assert!(matches!(
            gallery.update(5, &photo("x.jpg", 0)).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(gallery.delete(5).await, Err(ApiError::NotFound(_))));
    }
}
