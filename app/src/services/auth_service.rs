// storefront/src/services/auth_service.rs

//! Argon2 password hashing and verification.

use crate::errors::AppError;
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use tracing::{debug, error, instrument};

/// Hashes a plain-text password into an Argon2 PHC string.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    error!("Password hashing failed: Password cannot be empty.");
    return Err(AppError::Config("Admin password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      AppError::Internal(format!("Password hashing process failed: {}", argon_err))
    })
}

/// Checks that `hash` is a well-formed PHC string.
pub fn validate_hash(hash: &str) -> Result<(), AppError> {
  PasswordHash::new(hash)
    .map(|_| ())
    .map_err(|e| AppError::Config(format!("Invalid ADMIN_PASSWORD_HASH: {}", e)))
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable or
/// the provided password is empty.
#[instrument(
  name = "auth_service::verify_password",
  skip(hashed_password, provided_password),
  err(Display),
  fields(hash_len = hashed_password.len())
)]
pub fn verify_password(hashed_password: &str, provided_password: &str) -> Result<bool, AppError> {
  if provided_password.is_empty() {
    return Err(AppError::Auth("Password is required.".to_string()));
  }

  let parsed_hash = PasswordHash::new(hashed_password).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: Passwords do not match.");
      Ok(false)
    }
    Err(other) => {
      error!(error = %other, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!("Password verification process failed: {}", other)))
    }
  }
}
