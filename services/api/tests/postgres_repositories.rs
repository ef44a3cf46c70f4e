//! PostgreSQL-backed repository tests
//!
//! These tests need a reachable PostgreSQL instance (`DATABASE_URL`) and are
//! ignored by default. Run them with `cargo test -- --ignored`. They share
//! tables, so each one runs serially.

use auth::{
    AuthService, JwtConfig, JwtService, jwt::DEFAULT_ACCESS_TOKEN_EXPIRY,
    repositories::MemoryAdminStore,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use common::{
    database::{DatabaseConfig, init_pool, run_migrations},
    error::DatabaseError,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use serial_test::serial;
use site_api::{
    AppConfig, AppState, create_router,
    models::{
        content::{MAX_PEMBINA, PembinaInput, QrCodeInput},
        kegiatan::{KegiatanInput, PhotoInput, SortOrderEntry},
    },
    repositories::{
        KegiatanRepository, KegiatanStore, PembinaRepository, PhotoRepository, PhotoStore,
        QrCodeRepository,
    },
};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;

type TestResult = Result<(), Box<dyn std::error::Error>>;

async fn pool() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_pool(&config).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

async fn event_with_photos(
    pool: &PgPool,
    count: usize,
) -> Result<(i32, Vec<i32>), Box<dyn std::error::Error>> {
    let events = KegiatanRepository::new(pool.clone());
    let photos = PhotoRepository::new(pool.clone());

    let event = KegiatanStore::create(
        &events,
        &KegiatanInput {
            judul: "Susur Sungai".to_string(),
            deskripsi: String::new(),
            cover: String::new(),
            tanggal: Utc::now(),
        },
    )
    .await?;

    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let photo = PhotoStore::create(
            &photos,
            event.id,
            &PhotoInput {
                image_url: format!("/uploads/{}.jpg", i),
                caption: String::new(),
                sort_order: i as i32,
            },
        )
        .await?;
        ids.push(photo.id);
    }

    Ok((event.id, ids))
}

fn pembina(nama: &str) -> PembinaInput {
    PembinaInput {
        nama: nama.to_string(),
        jabatan: "Pembina".to_string(),
        nip: String::new(),
        foto_url: String::new(),
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_reorder_with_unknown_id_rolls_back() -> TestResult {
    let pool = pool().await?;
    let (event_id, ids) = event_with_photos(&pool, 2).await?;
    let photos = PhotoRepository::new(pool.clone());
    let before = photos.list_by_kegiatan(event_id).await?;

    let result = photos
        .update_sort_orders(&[
            SortOrderEntry {
                id: ids[0],
                sort_order: 5,
            },
            SortOrderEntry {
                id: i32::MAX,
                sort_order: 1,
            },
        ])
        .await;
    assert!(matches!(result, Err(DatabaseError::NotFound(_))));

    let after = photos.list_by_kegiatan(event_id).await?;
    assert_eq!(before, after);
    assert_eq!(after[0].sort_order, 0);

    KegiatanStore::delete(&KegiatanRepository::new(pool), event_id).await?;
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_photo_for_missing_event_is_not_found() -> TestResult {
    let pool = pool().await?;
    let (event_id, _) = event_with_photos(&pool, 0).await?;
    KegiatanStore::delete(&KegiatanRepository::new(pool.clone()), event_id).await?;

    let result = PhotoStore::create(
        &PhotoRepository::new(pool),
        event_id,
        &PhotoInput {
            image_url: "/uploads/orphan.jpg".to_string(),
            caption: String::new(),
            sort_order: 0,
        },
    )
    .await;
    assert!(matches!(result, Err(DatabaseError::NotFound(_))));
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_event_delete_removes_its_photos() -> TestResult {
    let pool = pool().await?;
    let (event_id, ids) = event_with_photos(&pool, 3).await?;
    let events = KegiatanRepository::new(pool.clone());
    let photos = PhotoRepository::new(pool);

    assert_eq!(KegiatanStore::delete(&events, event_id).await?, 3);
    assert!(photos.list_by_kegiatan(event_id).await?.is_empty());
    for id in ids {
        assert!(PhotoStore::find_by_id(&photos, id).await?.is_none());
    }
    assert!(KegiatanStore::find_by_id(&events, event_id).await?.is_none());

    let again = KegiatanStore::delete(&events, event_id).await;
    assert!(matches!(again, Err(DatabaseError::NotFound(_))));
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_pembina_cap() -> TestResult {
    let pool = pool().await?;
    sqlx::query("DELETE FROM pembina").execute(&pool).await?;
    let repo = PembinaRepository::new(pool);

    assert!(repo.create_capped(&pembina("Pertama"), MAX_PEMBINA).await?.is_some());
    assert!(repo.create_capped(&pembina("Kedua"), MAX_PEMBINA).await?.is_some());
    assert!(repo.create_capped(&pembina("Ketiga"), MAX_PEMBINA).await?.is_none());
    assert_eq!(repo.get_all().await?.len(), 2);
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_concurrent_pembina_inserts_respect_cap() -> TestResult {
    let pool = pool().await?;
    sqlx::query("DELETE FROM pembina").execute(&pool).await?;
    let repo = PembinaRepository::new(pool);

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.create_capped(&pembina(&format!("Pembina {}", i)), MAX_PEMBINA)
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await??.is_some() {
            created += 1;
        }
    }

    assert_eq!(created, MAX_PEMBINA);
    assert_eq!(repo.get_all().await?.len() as i64, MAX_PEMBINA);
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_third_pembina_is_rejected_over_http() -> TestResult {
    let pool = pool().await?;
    sqlx::query("DELETE FROM pembina").execute(&pool).await?;

    let admins = MemoryAdminStore::new();
    admins.insert("admin", "admin123").await?;
    let jwt = JwtService::new(JwtConfig {
        secret: "postgres-test-secret-0123456789abcdef".to_string(),
        access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
    })?;
    let auth = AuthService::new(Arc::new(admins), jwt);
    let token = auth.authenticate("admin", "admin123").await?.token;
    let app = create_router(AppState::new(pool, auth), &AppConfig::default());

    let mut last = (StatusCode::OK, Value::Null);
    for nama in ["Pertama", "Kedua", "Ketiga"] {
        let request = Request::builder()
            .method("POST")
            .uri("/api/admin/pembina")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(json!({"nama": nama}).to_string()))?;
        let response = app.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        last = (status, serde_json::from_slice(&bytes)?);
        if nama != "Ketiga" {
            assert_eq!(status, StatusCode::CREATED);
        }
    }

    assert_eq!(last.0, StatusCode::CONFLICT);
    assert_eq!(last.1["success"], false);
    assert_eq!(last.1["message"], "maksimal 2 pembina sudah tercapai");
    Ok(())
}

#[tokio::test]
#[serial]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_qrcode_toggle_and_enabled_listing() -> TestResult {
    let pool = pool().await?;
    let repo = QrCodeRepository::new(pool);

    let code = repo
        .create(&QrCodeInput {
            image_url: "/uploads/qr-kas.png".to_string(),
            keterangan: "Kas".to_string(),
            enable: false,
        })
        .await?;
    assert!(!code.enable);
    assert!(repo.get_enabled().await?.iter().all(|c| c.id != code.id));

    let on = repo.toggle(code.id).await?;
    assert!(on.enable);
    assert!(repo.get_enabled().await?.iter().any(|c| c.id == code.id));

    let off = repo.toggle(code.id).await?;
    assert!(!off.enable);
    assert!(repo.get_enabled().await?.iter().all(|c| c.id != code.id));

    repo.delete(code.id).await?;
    let missing = repo.toggle(code.id).await;
    assert!(matches!(missing, Err(DatabaseError::NotFound(_))));
    Ok(())
}
