// storefront/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Minimum key length accepted by the cookie signing key.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub data_dir: PathBuf,

  pub admin_username: String,
  /// Plain password hashed at startup. Ignored when `admin_password_hash` is set.
  pub admin_password: String,
  /// Argon2 PHC string.
  pub admin_password_hash: Option<String>,

  pub session_secret: Option<Vec<u8>>,
  pub session_cookie_secure: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let data_dir = PathBuf::from(get_env("DATA_DIR").unwrap_or_else(|_| "data".to_string()));

    let admin_username = get_env("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let admin_password = get_env("ADMIN_PASSWORD").unwrap_or_else(|_| "12345".to_string());
    let admin_password_hash = get_env("ADMIN_PASSWORD_HASH").ok().filter(|h| !h.is_empty());

    let session_secret = match get_env("SESSION_SECRET") {
      Ok(secret) if secret.len() < MIN_SESSION_SECRET_LEN => {
        return Err(AppError::Config(format!(
          "SESSION_SECRET must be at least {} bytes long",
          MIN_SESSION_SECRET_LEN
        )));
      }
      Ok(secret) => Some(secret.into_bytes()),
      Err(_) => None,
    };
    let session_cookie_secure = get_env("SESSION_COOKIE_SECURE")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SESSION_COOKIE_SECURE value: {}", e)))?;

    tracing::info!(data_dir = %data_dir.display(), "Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      data_dir,
      admin_username,
      admin_password,
      admin_password_hash,
      session_secret,
      session_cookie_secure,
    })
  }

  /// Defaults with every file kept under `data_dir`.
  pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      data_dir: data_dir.into(),
      admin_username: "admin".to_string(),
      admin_password: "12345".to_string(),
      admin_password_hash: None,
      session_secret: None,
      session_cookie_secure: false,
    }
  }

  pub fn products_file(&self) -> PathBuf {
    self.data_dir.join("products.json")
  }

  pub fn orders_file(&self) -> PathBuf {
    self.data_dir.join("orders.jsonl")
  }

  pub fn audit_file(&self) -> PathBuf {
    self.data_dir.join("audit.log")
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
