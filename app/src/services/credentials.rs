// storefront/src/services/credentials.rs

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::auth_service;
use tracing::{info, warn};

/// Decides whether a username/password pair grants admin access.
pub trait AdminAuthenticator: Send + Sync {
  fn authenticate(&self, username: &str, password: &str) -> bool;
}

/// The single admin account from configuration, checked against an Argon2 hash.
#[derive(Debug, Clone)]
pub struct ConfiguredAdmin {
  username: String,
  password_hash: String,
}

impl ConfiguredAdmin {
  pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      password_hash: password_hash.into(),
    }
  }

  /// Uses `ADMIN_PASSWORD_HASH` when present, otherwise hashes `ADMIN_PASSWORD`.
  pub fn from_config(config: &AppConfig) -> Result<Self> {
    let password_hash = match &config.admin_password_hash {
      Some(hash) => {
        auth_service::validate_hash(hash)?;
        hash.clone()
      }
      None => {
        info!("No ADMIN_PASSWORD_HASH configured; hashing ADMIN_PASSWORD at startup.");
        auth_service::hash_password(&config.admin_password)?
      }
    };
    Ok(Self::new(config.admin_username.clone(), password_hash))
  }
}

impl AdminAuthenticator for ConfiguredAdmin {
  fn authenticate(&self, username: &str, password: &str) -> bool {
    // Verify even on a username mismatch so both failures cost the same.
    let password_ok = match auth_service::verify_password(&self.password_hash, password) {
      Ok(matches) => matches,
      Err(e) => {
        warn!(error = %e, "Admin password verification failed.");
        false
      }
    };
    password_ok && username == self.username
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn configured_defaults_accept_only_the_configured_pair() {
    let admin = ConfiguredAdmin::from_config(&AppConfig::for_data_dir("unused")).unwrap();

    assert!(admin.authenticate("admin", "12345"));
    assert!(!admin.authenticate("admin", "wrong"));
    assert!(!admin.authenticate("root", "12345"));
    assert!(!admin.authenticate("admin", ""));
  }

  #[test]
  fn prehashed_password_is_used_verbatim() {
    let hash = auth_service::hash_password("hunter2").unwrap();
    let mut config = AppConfig::for_data_dir("unused");
    config.admin_password_hash = Some(hash);

    let admin = ConfiguredAdmin::from_config(&config).unwrap();
    assert!(admin.authenticate("admin", "hunter2"));
    assert!(!admin.authenticate("admin", "12345"));
  }

  #[test]
  fn malformed_configured_hash_is_rejected() {
    let mut config = AppConfig::for_data_dir("unused");
    config.admin_password_hash = Some("not-a-phc-string".to_string());
    assert!(ConfiguredAdmin::from_config(&config).is_err());
  }
}
