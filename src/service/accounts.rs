use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;
use tracing::{info, warn};

use crate::db::{ContentStorage, DbUser};
use crate::error::SiteError;

/// Emails are matched trimmed and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn hash_password(password: &str) -> Result<String, SiteError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

/// `false` for a wrong password or an unparseable stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        warn!("stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Check login credentials against the user table.
pub async fn authenticate(
    storage: &ContentStorage,
    email: &str,
    password: &str,
) -> Result<DbUser, SiteError> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(SiteError::InvalidInput("missing credentials".to_string()));
    }

    match storage.find_user_by_email(&email).await? {
        Some(user) if verify_password(password, &user.password_hash) => Ok(user),
        _ => Err(SiteError::InvalidCredentials),
    }
}

/// Create the admin account if no user has this email yet. Existing users are never touched.
pub async fn seed_admin(
    storage: &ContentStorage,
    email: &str,
    password: &str,
) -> Result<bool, SiteError> {
    let email = normalize_email(email);
    if storage.find_user_by_email(&email).await?.is_some() {
        info!(email = %email, "admin user already present");
        return Ok(false);
    }
    let hash = hash_password(password)?;
    let created = storage.insert_user_if_absent(&email, &hash).await?;
    if created {
        info!(email = %email, "seeded admin user");
    }
    Ok(created)
}
