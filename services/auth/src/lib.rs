//! Credential gate for the site admin API
//!
//! Verifies admin username/password pairs against Argon2 digests and issues
//! HS256-signed access tokens; the same service verifies tokens on every
//! protected request.

pub mod error;
pub mod jwt;
pub mod models;
pub mod password;
pub mod repositories;
pub mod service;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use jwt::{Claims, JwtConfig, JwtService};
pub use service::AuthService;
