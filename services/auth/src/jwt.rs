//! JWT service for admin access tokens
//!
//! Tokens are signed with HS256 using a secret injected at startup. They are
//! stateless: validity is decided by the signature and the `exp` claim only,
//! there is no revocation list.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    error::{AuthError, AuthResult},
    models::AdminUser,
};

/// Default token lifetime: 24 hours
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: u64 = 24 * 60 * 60;

/// Longest accepted token lifetime: one year
pub const MAX_ACCESS_TOKEN_EXPIRY: u64 = 365 * 24 * 60 * 60;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared HMAC secret
    pub secret: String,
    /// Access token expiration time in seconds (default: 24 hours)
    pub access_token_expiry: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: HMAC signing secret. Required unless `development` is
    ///   set, in which case a random per-process secret is generated.
    /// - `JWT_ACCESS_TOKEN_EXPIRY`: Access token expiry in seconds (default: 86400,
    ///   must be between 1 and [`MAX_ACCESS_TOKEN_EXPIRY`])
    pub fn from_env(development: bool) -> AuthResult<Self> {
        let secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if development => {
                warn!("JWT_SECRET not set, using a random secret; tokens will not survive a restart");
                generate_secret()
            }
            _ => {
                return Err(AuthError::Configuration(
                    "JWT_SECRET environment variable not set".to_string(),
                ));
            }
        };

        if secret.len() < 32 {
            warn!("JWT_SECRET is shorter than 32 bytes");
        }

        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRY);

        if access_token_expiry == 0 || access_token_expiry > MAX_ACCESS_TOKEN_EXPIRY {
            return Err(AuthError::Configuration(format!(
                "JWT_ACCESS_TOKEN_EXPIRY must be between 1 and {} seconds",
                MAX_ACCESS_TOKEN_EXPIRY
            )));
        }

        Ok(JwtConfig {
            secret,
            access_token_expiry,
        })
    }
}

/// 64 random alphanumeric characters
pub fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin account ID
    pub user_id: i32,
    /// Admin username
    pub username: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> AuthResult<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::Configuration("JWT secret is empty".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Ok(JwtService {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_token_expiry: config.access_token_expiry,
        })
    }

    /// Generate an access token for an admin account
    pub fn generate_access_token(&self, admin: &AdminUser) -> AuthResult<String> {
        let now = Utc::now().timestamp().max(0) as u64;
        self.sign(&self.claims_at(admin, now))
    }

    fn claims_at(&self, admin: &AdminUser, issued_at: u64) -> Claims {
        Claims {
            user_id: admin.id,
            username: admin.username.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.access_token_expiry),
        }
    }

    fn sign(&self, claims: &Claims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(AuthError::Token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> AuthResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }
}
