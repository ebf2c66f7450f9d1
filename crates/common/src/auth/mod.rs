//! Authentication utilities
//!
//! Provides:
//! - JWT token generation and validation
//! - Password hashing (argon2)
//! - Bearer token extraction

use crate::db::models::UserRole;
use crate::errors::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated caller, decoded from a bearer token.
///
/// Inserted into request extensions by the API's auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Username
    pub username: String,

    /// Email
    pub email: String,

    /// Role
    pub role: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// JWT token manager
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager with the given secret
    pub fn new(secret: &str, expiration_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_secs: expiration_secs as i64,
        }
    }

    /// Generate a new token embedding the user's identity and role
    pub fn generate_token(
        &self,
        user_id: Uuid,
        username: &str,
        email: &str,
        role: UserRole,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expiration_secs);

        let claims = JwtClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            role: role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal {
                message: format!("Failed to generate token: {}", e),
            })
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims> {
        decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::ExpiredToken
                    }
                    _ => AppError::InvalidToken,
                }
            })
    }

    /// Decode a token into the authenticated caller
    pub fn current_user(&self, token: &str) -> Result<CurrentUser> {
        let claims = self.validate_token(token)?;

        let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;
        let role = UserRole::parse(&claims.role).ok_or(AppError::InvalidToken)?;

        Ok(CurrentUser {
            id,
            username: claims.username,
            email: claims.email,
            role,
        })
    }
}

/// Hash a password for storage
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AppError::Internal {
        message: format!("Stored password hash is malformed: {}", e),
    })?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Extract a bearer token from an Authorization header value
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("s3cret!").unwrap();
        assert!(verify_password("s3cret!", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer("abc.def.ghi"), None);
        assert_eq!(extract_bearer("Basic abc"), None);
    }

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test_secret", 3600);

        let user_id = Uuid::new_v4();
        let token = manager
            .generate_token(user_id, "ana", "ana@acme.com", UserRole::Quality)
            .unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "ana");
        assert_eq!(claims.email, "ana@acme.com");
        assert_eq!(claims.role, "qualidade");

        let user = manager.current_user(&token).unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.role, UserRole::Quality);
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = JwtManager::new("test_secret", 3600);

        // Expired two minutes ago, past the default validation leeway
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: Uuid::new_v4().to_string(),
            username: "ana".to_string(),
            email: "ana@acme.com".to_string(),
            role: "admin".to_string(),
            exp: now - 120,
            iat: now - 3720,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test_secret"),
        )
        .unwrap();

        assert!(matches!(
            manager.validate_token(&token),
            Err(AppError::ExpiredToken)
        ));
    }
}
