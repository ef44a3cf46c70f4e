//! Credential gate models

pub mod admin;

pub use admin::{AdminSummary, AdminUser, LoginRequest, LoginResponse};
