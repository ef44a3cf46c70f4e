//! Admin login and token verification

use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::{AuthError, AuthResult},
    jwt::{Claims, JwtService},
    models::{AdminSummary, LoginResponse},
    password,
    repositories::AdminStore,
};

/// Authentication service shared across request handlers
#[derive(Clone)]
pub struct AuthService {
    admins: Arc<dyn AdminStore>,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(admins: Arc<dyn AdminStore>, jwt_service: JwtService) -> Self {
        Self {
            admins,
            jwt_service,
        }
    }

    /// Check a username/password pair and issue an access token.
    ///
    /// Both inputs are expected to be non-empty; the HTTP layer rejects
    /// empty fields before calling this.
    pub async fn authenticate(&self, username: &str, password: &str) -> AuthResult<LoginResponse> {
        info!("Login attempt for admin: {}", username);

        let admin = self.admins.find_by_username(username).await?;
        let password = password.to_owned();

        let Some(admin) = admin else {
            tokio::task::spawn_blocking(move || password::verify_against_dummy(&password))
                .await
                .map_err(|e| AuthError::Hashing(e.to_string()))?;
            warn!("Login rejected for admin: {}", username);
            return Err(AuthError::InvalidCredentials);
        };

        let digest = admin.password_hash.clone();
        let verified =
            tokio::task::spawn_blocking(move || password::verify_password(&password, &digest))
                .await
                .map_err(|e| AuthError::Hashing(e.to_string()))??;

        if !verified {
            warn!("Login rejected for admin: {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt_service.generate_access_token(&admin)?;
        info!("Admin {} logged in", admin.username);

        Ok(LoginResponse {
            token,
            user: AdminSummary::from(&admin),
        })
    }

    /// Verify an access token and return its claims
    pub fn verify_token(&self, token: &str) -> AuthResult<Claims> {
        self.jwt_service.validate_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        jwt::{DEFAULT_ACCESS_TOKEN_EXPIRY, JwtConfig},
        repositories::MemoryAdminStore,
    };

    async fn service() -> AuthService {
        let store = MemoryAdminStore::new();
        store.insert("admin", "admin123").await.unwrap();

        let jwt_service = JwtService::new(JwtConfig {
            secret: "service-test-secret-service-test-secret".to_string(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
        })
        .unwrap();

        AuthService::new(Arc::new(store), jwt_service)
    }

    #[tokio::test]
    async fn test_valid_login_issues_24h_token() {
        let auth = service().await;

        let response = auth.authenticate("admin", "admin123").await.unwrap();
        assert_eq!(response.user.username, "admin");

        let claims = auth.verify_token(&response.token).unwrap();
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.user_id, response.user.id);
        assert_eq!(claims.exp, claims.iat + 24 * 60 * 60);
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_identical() {
        let auth = service().await;

        let wrong_password = auth.authenticate("admin", "nope").await.unwrap_err();
        let unknown_user = auth.authenticate("ghost", "admin123").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_username_is_case_sensitive() {
        let auth = service().await;

        assert!(matches!(
            auth.authenticate("ADMIN", "admin123").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
