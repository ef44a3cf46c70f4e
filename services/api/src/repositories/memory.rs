//! In-memory event and photo store for tests and local runs without PostgreSQL

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::{KegiatanStore, PhotoStore};
use crate::models::kegiatan::{Kegiatan, KegiatanFoto, KegiatanInput, PhotoInput, SortOrderEntry};

#[derive(Default)]
struct State {
    kegiatan: Vec<Kegiatan>,
    photos: Vec<KegiatanFoto>,
    next_kegiatan_id: i32,
    next_photo_id: i32,
}

impl State {
    fn photos_of(&self, kegiatan_id: i32) -> Vec<KegiatanFoto> {
        let mut photos: Vec<KegiatanFoto> = self
            .photos
            .iter()
            .filter(|p| p.kegiatan_id == kegiatan_id)
            .cloned()
            .collect();
        photos.sort_by(|a, b| {
            (a.sort_order, a.created_at, a.id).cmp(&(b.sort_order, b.created_at, b.id))
        });
        photos
    }

    fn with_photos(&self, kegiatan: &Kegiatan) -> Kegiatan {
        let mut kegiatan = kegiatan.clone();
        kegiatan.fotos = self.photos_of(kegiatan.id);
        kegiatan
    }
}

/// Shared in-memory backing for both [`KegiatanStore`] and [`PhotoStore`]
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PhotoStore for MemoryStore {
    async fn list_by_kegiatan(&self, kegiatan_id: i32) -> DatabaseResult<Vec<KegiatanFoto>> {
        Ok(self.state.lock().await.photos_of(kegiatan_id))
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<KegiatanFoto>> {
        let state = self.state.lock().await;
        Ok(state.photos.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, kegiatan_id: i32, input: &PhotoInput) -> DatabaseResult<KegiatanFoto> {
        let mut state = self.state.lock().await;
        if !state.kegiatan.iter().any(|k| k.id == kegiatan_id) {
            return Err(DatabaseError::NotFound(format!("Kegiatan {}", kegiatan_id)));
        }

        state.next_photo_id += 1;
        let now = Utc::now();
        let photo = KegiatanFoto {
            id: state.next_photo_id,
            kegiatan_id,
            image_url: input.image_url.clone(),
            caption: input.caption.clone(),
            sort_order: input.sort_order,
            created_at: now,
            updated_at: now,
        };
        state.photos.push(photo.clone());

        Ok(photo)
    }

    async fn update(&self, id: i32, input: &PhotoInput) -> DatabaseResult<KegiatanFoto> {
        let mut state = self.state.lock().await;
        let photo = state
            .photos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("Photo {}", id)))?;

        photo.image_url = input.image_url.clone();
        photo.caption = input.caption.clone();
        photo.sort_order = input.sort_order;
        photo.updated_at = Utc::now();

        Ok(photo.clone())
    }

    async fn delete(&self, id: i32) -> DatabaseResult<()> {
        let mut state = self.state.lock().await;
        let before = state.photos.len();
        state.photos.retain(|p| p.id != id);

        if state.photos.len() == before {
            return Err(DatabaseError::NotFound(format!("Photo {}", id)));
        }
        Ok(())
    }

    async fn update_sort_orders(&self, entries: &[SortOrderEntry]) -> DatabaseResult<()> {
        let mut state = self.state.lock().await;

        // Check every id before writing so a bad entry leaves nothing applied
        if let Some(missing) = entries
            .iter()
            .find(|e| !state.photos.iter().any(|p| p.id == e.id))
        {
            return Err(DatabaseError::NotFound(format!("Photo {}", missing.id)));
        }

        let now = Utc::now();
        for entry in entries {
            if let Some(photo) = state.photos.iter_mut().find(|p| p.id == entry.id) {
                photo.sort_order = entry.sort_order;
                photo.updated_at = now;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl KegiatanStore for MemoryStore {
    async fn list(&self) -> DatabaseResult<Vec<Kegiatan>> {
        let state = self.state.lock().await;
        let mut kegiatan: Vec<Kegiatan> =
            state.kegiatan.iter().map(|k| state.with_photos(k)).collect();
        kegiatan.sort_by(|a, b| (b.tanggal, b.id).cmp(&(a.tanggal, a.id)));
        Ok(kegiatan)
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Kegiatan>> {
        let state = self.state.lock().await;
        Ok(state
            .kegiatan
            .iter()
            .find(|k| k.id == id)
            .map(|k| state.with_photos(k)))
    }

    async fn create(&self, input: &KegiatanInput) -> DatabaseResult<Kegiatan> {
        let mut state = self.state.lock().await;
        state.next_kegiatan_id += 1;
        let now = Utc::now();

        let kegiatan = Kegiatan {
            id: state.next_kegiatan_id,
            judul: input.judul.clone(),
            deskripsi: input.deskripsi.clone(),
            cover: input.cover.clone(),
            tanggal: input.tanggal,
            created_at: now,
            updated_at: now,
            fotos: Vec::new(),
        };
        state.kegiatan.push(kegiatan.clone());

        Ok(kegiatan)
    }

    async fn update(&self, id: i32, input: &KegiatanInput) -> DatabaseResult<Kegiatan> {
        let mut state = self.state.lock().await;
        let kegiatan = state
            .kegiatan
            .iter_mut()
            .find(|k| k.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("Kegiatan {}", id)))?;

        kegiatan.judul = input.judul.clone();
        kegiatan.deskripsi = input.deskripsi.clone();
        kegiatan.cover = input.cover.clone();
        kegiatan.tanggal = input.tanggal;
        kegiatan.updated_at = Utc::now();

        let updated = kegiatan.clone();
        Ok(state.with_photos(&updated))
    }

    async fn delete(&self, id: i32) -> DatabaseResult<u64> {
        let mut state = self.state.lock().await;
        let before = state.kegiatan.len();
        state.kegiatan.retain(|k| k.id != id);
        if state.kegiatan.len() == before {
            return Err(DatabaseError::NotFound(format!("Kegiatan {}", id)));
        }

        let photos_before = state.photos.len();
        state.photos.retain(|p| p.kegiatan_id != id);
        Ok((photos_before - state.photos.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kegiatan_input(judul: &str) -> KegiatanInput {
        KegiatanInput {
            judul: judul.to_string(),
            deskripsi: String::new(),
            cover: String::new(),
            tanggal: Utc::now(),
        }
    }

    fn photo(url: &str, sort_order: i32) -> PhotoInput {
        PhotoInput {
            image_url: url.to_string(),
            caption: String::new(),
            sort_order,
        }
    }

    async fn seeded() -> (MemoryStore, i32) {
        let store = MemoryStore::new();
        let kegiatan = KegiatanStore::create(&store, &kegiatan_input("Diklat")).await.unwrap();
        (store, kegiatan.id)
    }

    #[tokio::test]
    async fn list_orders_by_position_then_creation() {
        let (store, kid) = seeded().await;
        let a = PhotoStore::create(&store, kid, &photo("a.jpg", 2)).await.unwrap();
        let b = PhotoStore::create(&store, kid, &photo("b.jpg", 0)).await.unwrap();
        let c = PhotoStore::create(&store, kid, &photo("c.jpg", 2)).await.unwrap();
        let d = PhotoStore::create(&store, kid, &photo("d.jpg", 1)).await.unwrap();

        let ids: Vec<i32> = store
            .list_by_kegiatan(kid)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![b.id, d.id, a.id, c.id]);
    }

    #[tokio::test]
    async fn unknown_event_lists_empty() {
        let store = MemoryStore::new();
        assert!(store.list_by_kegiatan(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_requires_existing_event() {
        let store = MemoryStore::new();
        let err = PhotoStore::create(&store, 7, &photo("a.jpg", 0)).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn create_then_delete_is_reflected_in_listing() {
        let (store, kid) = seeded().await;
        let first = PhotoStore::create(&store, kid, &photo("a.jpg", 1)).await.unwrap();
        let second = PhotoStore::create(&store, kid, &photo("b.jpg", 0)).await.unwrap();

        let listed = store.list_by_kegiatan(kid).await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);

        PhotoStore::delete(&store, second.id).await.unwrap();
        let listed = store.list_by_kegiatan(kid).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, first.id);

        let err = PhotoStore::delete(&store, second.id).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let (store, kid) = seeded().await;
        let created = PhotoStore::create(&store, kid, &photo("a.jpg", 0)).await.unwrap();

        let updated = PhotoStore::update(
            &store,
            created.id,
            &PhotoInput {
                image_url: "b.jpg".to_string(),
                caption: "Pembukaan".to_string(),
                sort_order: 4,
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.image_url, "b.jpg");
        assert_eq!(updated.caption, "Pembukaan");
        assert_eq!(updated.sort_order, 4);
        assert!(updated.updated_at >= created.updated_at);

        let err = PhotoStore::update(&store, 999, &photo("x.jpg", 0)).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn reorder_applies_every_entry() {
        let (store, kid) = seeded().await;
        let one = PhotoStore::create(&store, kid, &photo("a.jpg", 0)).await.unwrap();
        let two = PhotoStore::create(&store, kid, &photo("b.jpg", 1)).await.unwrap();

        store
            .update_sort_orders(&[
                SortOrderEntry { id: one.id, sort_order: 5 },
                SortOrderEntry { id: two.id, sort_order: 3 },
            ])
            .await
            .unwrap();

        let listed = store.list_by_kegiatan(kid).await.unwrap();
        assert_eq!((listed[0].id, listed[0].sort_order), (two.id, 3));
        assert_eq!((listed[1].id, listed[1].sort_order), (one.id, 5));
    }

    #[tokio::test]
    async fn reorder_with_unknown_id_changes_nothing() {
        let (store, kid) = seeded().await;
        let one = PhotoStore::create(&store, kid, &photo("a.jpg", 0)).await.unwrap();

        let err = store
            .update_sort_orders(&[
                SortOrderEntry { id: one.id, sort_order: 5 },
                SortOrderEntry { id: 999, sort_order: 1 },
            ])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Photo 999 not found");

        let listed = store.list_by_kegiatan(kid).await.unwrap();
        assert_eq!(listed[0].sort_order, 0);
    }

    #[tokio::test]
    async fn deleting_event_removes_its_photos() {
        let (store, kid) = seeded().await;
        let other = KegiatanStore::create(&store, &kegiatan_input("Rapat")).await.unwrap();
        for i in 0..3 {
            PhotoStore::create(&store, kid, &photo(&format!("{}.jpg", i), i)).await.unwrap();
        }
        PhotoStore::create(&store, other.id, &photo("keep.jpg", 0)).await.unwrap();

        let removed = KegiatanStore::delete(&store, kid).await.unwrap();
        assert_eq!(removed, 3);
        assert!(store.list_by_kegiatan(kid).await.unwrap().is_empty());
        assert_eq!(store.list_by_kegiatan(other.id).await.unwrap().len(), 1);
        assert!(KegiatanStore::find_by_id(&store, kid).await.unwrap().is_none());

        let err = KegiatanStore::delete(&store, kid).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[tokio::test]
    async fn event_reads_embed_ordered_photos() {
        let (store, kid) = seeded().await;
        let late = PhotoStore::create(&store, kid, &photo("late.jpg", 9)).await.unwrap();
        let early = PhotoStore::create(&store, kid, &photo("early.jpg", 1)).await.unwrap();

        let kegiatan = KegiatanStore::find_by_id(&store, kid).await.unwrap().unwrap();
        let ids: Vec<i32> = kegiatan.fotos.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }
}
