// storefront/src/state.rs
use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::pipelines;
use crate::services::{AdminAuthenticator, ConfiguredAdmin};
use crate::store::{AuditSink, FileAuditLog, JsonFileProductStore, JsonlOrderLedger, OrderLedger, ProductStore};
use shopflow::Shopflow;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The swappable pieces of `AppState`.
pub struct StateParts {
  pub products: Arc<dyn ProductStore>,
  pub orders: Arc<dyn OrderLedger>,
  pub audit: Arc<dyn AuditSink>,
  pub admin_auth: Arc<dyn AdminAuthenticator>,
}

impl StateParts {
  /// File-backed stores under `config.data_dir` and the configured admin account.
  pub fn from_config(config: &AppConfig) -> Result<Self> {
    Ok(Self {
      products: Arc::new(JsonFileProductStore::new(config.products_file())),
      orders: Arc::new(JsonlOrderLedger::new(config.orders_file())),
      audit: Arc::new(FileAuditLog::new(config.audit_file())),
      admin_auth: Arc::new(ConfiguredAdmin::from_config(config)?),
    })
  }
}

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub products: Arc<dyn ProductStore>,
  pub orders: Arc<dyn OrderLedger>,
  pub audit: Arc<dyn AuditSink>,
  pub admin_auth: Arc<dyn AdminAuthenticator>,
  pub flow: Arc<Shopflow<AppError>>,
  /// Held for the whole of every product-store mutation (checkout, admin save).
  pub catalog_writer: Arc<Mutex<()>>,
}

impl AppState {
  pub fn from_config(config: AppConfig) -> Result<Self> {
    let parts = StateParts::from_config(&config)?;
    Ok(Self::assemble(config, parts))
  }

  /// Builds the state and registers every workflow pipeline.
  pub fn assemble(config: AppConfig, parts: StateParts) -> Self {
    let state = Self {
      config: Arc::new(config),
      products: parts.products,
      orders: parts.orders,
      audit: parts.audit,
      admin_auth: parts.admin_auth,
      flow: Arc::new(Shopflow::new()),
      catalog_writer: Arc::new(Mutex::new(())),
    };
    pipelines::register_all_pipelines(&state.flow, &state);
    state
  }
}
