//! User service
//!
//! Handles registration, login and logout. Every login issues a fresh API key;
//! only its SHA-256 hash is stored.

use std::sync::Arc;

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::domain::entities::{NewUser, User, UserGroup, UserId};
use crate::domain::ports::UserRepository;
use crate::error::{AppError, DomainError};

type HmacSha256 = Hmac<Sha256>;

/// Message shown for any failed login, whichever half was wrong
pub const LOGIN_FAILED: &str = "nickname and password do not match";

/// Service for managing users
pub struct UserService<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    password_pepper: String,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, password_pepper: String) -> Self {
        Self {
            users,
            password_pepper,
        }
    }

    /// Register a new user
    ///
    /// Returns (user, api_key) - the key is only shown once
    pub async fn register(
        &self,
        nickname: &str,
        password: &str,
        public_nickname: Option<&str>,
    ) -> Result<(User, String), AppError> {
        self.create_user(nickname, password, public_nickname, UserGroup::User)
            .await
    }

    /// Create the configured admin account if it does not exist yet
    pub async fn ensure_admin(&self, nickname: &str, password: &str) -> Result<User, AppError> {
        if let Some(existing) = self.users.find_by_nickname(nickname.trim()).await? {
            return Ok(existing);
        }
        let (admin, _) = self
            .create_user(nickname, password, None, UserGroup::Admin)
            .await?;
        tracing::info!(user_id = %admin.id, nickname = %admin.nickname, "Admin account created");
        Ok(admin)
    }

    async fn create_user(
        &self,
        nickname: &str,
        password: &str,
        public_nickname: Option<&str>,
        group: UserGroup,
    ) -> Result<(User, String), AppError> {
        let nickname = nickname.trim();
        validate_credentials(nickname, password)?;

        if self.users.find_by_nickname(nickname).await?.is_some() {
            return Err(AppError::Domain(DomainError::AlreadyExists(format!(
                "User with nickname '{}' already exists",
                nickname
            ))));
        }

        let public_nickname = public_nickname
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(nickname);

        let api_key = generate_api_key();
        let new_user = NewUser {
            nickname: nickname.to_string(),
            public_nickname: public_nickname.to_string(),
            password_hash: hash_password(password, &self.password_pepper)?,
            api_key_hash: hash_api_key(&api_key),
            group,
        };

        let user = self.users.create(&new_user).await?;

        tracing::info!(user_id = %user.id, nickname = %user.nickname, "User registered");

        Ok((user, api_key))
    }

    /// Check credentials and issue a fresh API key
    pub async fn login(&self, nickname: &str, password: &str) -> Result<(User, String), AppError> {
        let nickname = nickname.trim();
        validate_credentials(nickname, password)?;

        let user = match self.users.find_by_nickname(nickname).await? {
            Some(user) if verify_password(password, &self.password_pepper, &user.password_hash) => {
                user
            }
            _ => {
                tracing::debug!(nickname = %nickname, "Login rejected");
                return Err(AppError::Domain(DomainError::Unauthorized(
                    LOGIN_FAILED.to_string(),
                )));
            }
        };

        let api_key = generate_api_key();
        self.users
            .update_api_key_hash(&user.id, Some(&hash_api_key(&api_key)))
            .await?;
        self.users.update_last_login(&user.id).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok((user, api_key))
    }

    /// Invalidate the user's API key
    pub async fn logout(&self, id: &UserId) -> Result<(), AppError> {
        self.users.update_api_key_hash(id, None).await?;
        tracing::info!(user_id = %id, "User logged out");
        Ok(())
    }

    /// Find a user by their API key hash
    pub async fn find_by_api_key(&self, api_key_hash: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_api_key_hash(api_key_hash).await?)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AppError> {
        Ok(self.users.find_by_id(id).await?)
    }
}

fn validate_credentials(nickname: &str, password: &str) -> Result<(), AppError> {
    if nickname.is_empty() {
        return Err(AppError::BadRequest("nickname must not be empty".to_string()));
    }
    if nickname.chars().count() > 50 {
        return Err(AppError::BadRequest(
            "nickname must be at most 50 characters".to_string(),
        ));
    }
    if password.is_empty() {
        return Err(AppError::BadRequest("password must not be empty".to_string()));
    }
    Ok(())
}

/// Generate a random API key
fn generate_api_key() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!("dr-{}", hex::encode(bytes))
}

/// Hash an API key for storage
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Hash a password as `salt$hex(HMAC-SHA256(pepper, salt || password))`
pub fn hash_password(password: &str, pepper: &str) -> Result<String, AppError> {
    let mut rng = rand::thread_rng();
    let salt_bytes: Vec<u8> = (0..16).map(|_| rng.gen()).collect();
    let salt = hex::encode(salt_bytes);

    let mut mac = HmacSha256::new_from_slice(pepper.as_bytes())
        .map_err(|e| AppError::Internal(format!("Invalid password pepper: {}", e)))?;
    mac.update(salt.as_bytes());
    mac.update(password.as_bytes());

    Ok(format!("{}${}", salt, hex::encode(mac.finalize().into_bytes())))
}

/// Check a password against a stored hash in constant time
pub fn verify_password(password: &str, pepper: &str, stored: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    let Ok(expected) = hex::decode(digest) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(pepper.as_bytes()) else {
        return false;
    };
    mac.update(salt.as_bytes());
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}
