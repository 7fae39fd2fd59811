// storefront/src/lib.rs

//! A small storefront: product catalog, session cart, checkout into an
//! append-only order ledger, and a password-gated admin panel. Multi-step
//! workflows run as `shopflow` pipelines.

pub mod config;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
pub mod web;

use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;

use crate::config::AppConfig;

/// Signing key for the session cookie. Without a configured secret a random
/// key is generated, which logs every visitor out on restart.
pub fn session_key(config: &AppConfig) -> Key {
  match &config.session_secret {
    Some(secret) => Key::from(secret.as_slice()),
    None => {
      tracing::warn!("SESSION_SECRET not set; generating an ephemeral session key.");
      Key::generate()
    }
  }
}

/// Cookie-backed session middleware carrying the cart, admin flag and flashes.
pub fn session_middleware(config: &AppConfig, key: Key) -> SessionMiddleware<CookieSessionStore> {
  SessionMiddleware::builder(CookieSessionStore::default(), key)
    .cookie_name("storefront_session".to_string())
    .cookie_content_security(CookieContentSecurity::Signed)
    .cookie_secure(config.session_cookie_secure)
    .build()
}
