//! HTTP API for the Arshaka site
//!
//! Public read endpoints for events, their photo galleries and the site
//! content, plus the `/api/admin` surface guarded by bearer tokens issued by
//! the [`auth`] crate.

pub mod config;
pub mod error;
pub mod gallery;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;

pub use config::{AppConfig, RunMode};
pub use routes::create_router;
pub use state::AppState;
