// storefront/src/services/mod.rs

pub mod auth_service;
pub mod credentials;

pub use credentials::{AdminAuthenticator, ConfiguredAdmin};
