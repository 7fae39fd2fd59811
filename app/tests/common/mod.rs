// storefront/tests/common/mod.rs
#![allow(dead_code, unused_macros)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::test::TestRequest;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;
use storefront::config::AppConfig;
use storefront::errors::{AppError, Result};
use storefront::models::{Cart, Customer, Order};
use storefront::services::AdminAuthenticator;
use storefront::state::{AppState, StateParts};
use storefront::store::OrderLedger;
use tempfile::TempDir;

pub const SESSION_COOKIE: &str = "storefront_session";

static TRACING: Lazy<()> = Lazy::new(|| {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING);
}

pub fn test_config(dir: &TempDir) -> AppConfig {
  AppConfig::for_data_dir(dir.path())
}

/// File-backed state rooted in `dir`, admin credentials admin / 12345.
pub fn test_state(dir: &TempDir) -> AppState {
  setup_tracing();
  AppState::from_config(test_config(dir)).expect("test state should assemble")
}

pub fn state_with_ledger(dir: &TempDir, ledger: Arc<dyn OrderLedger>) -> AppState {
  setup_tracing();
  let config = test_config(dir);
  let mut parts = StateParts::from_config(&config).expect("state parts");
  parts.orders = ledger;
  AppState::assemble(config, parts)
}

pub fn state_with_admin(dir: &TempDir, admin_auth: Arc<dyn AdminAuthenticator>) -> AppState {
  setup_tracing();
  let config = test_config(dir);
  let mut parts = StateParts::from_config(&config).expect("state parts");
  parts.admin_auth = admin_auth;
  AppState::assemble(config, parts)
}

/// Authenticator whose check never completes.
pub struct PanickingAdmin;

impl AdminAuthenticator for PanickingAdmin {
  fn authenticate(&self, _username: &str, _password: &str) -> bool {
    panic!("credential backend unavailable")
  }
}

/// Ledger whose appends always fail.
pub struct FailingLedger;

#[async_trait]
impl OrderLedger for FailingLedger {
  async fn append(&self, _order: &Order) -> Result<()> {
    Err(AppError::Storage(std::io::Error::new(std::io::ErrorKind::Other, "disk full")))
  }

  async fn list(&self) -> Result<Vec<Order>> {
    Ok(Vec::new())
  }
}

pub fn customer() -> Customer {
  Customer {
    name: "Ada Lovelace".to_string(),
    email: "ada@example.com".to_string(),
    address: "12 Analytical Row".to_string(),
  }
}

pub fn cart_of(entries: &[(&str, u32)]) -> Cart {
  let mut cart = Cart::new();
  for (id, qty) in entries {
    cart.add(id, *qty);
  }
  cart
}

pub async fn stock_of(state: &AppState, product_id: &str) -> u32 {
  state
    .products
    .find(product_id)
    .await
    .map(|p| p.stock)
    .expect("product should exist")
}

pub fn audit_lines(dir: &Path) -> Vec<String> {
  std::fs::read_to_string(dir.join("audit.log"))
    .unwrap_or_default()
    .lines()
    .map(str::to_string)
    .collect()
}

/// Stock as persisted in `products.json`, bypassing the store.
pub fn stock_of_file(dir: &Path, product_id: &str) -> u32 {
  let raw = std::fs::read_to_string(dir.join("products.json")).expect("catalog file");
  let products: Vec<storefront::models::Product> = serde_json::from_str(&raw).expect("catalog json");
  products
    .into_iter()
    .find(|p| p.id == product_id)
    .map(|p| p.stock)
    .expect("product should exist")
}

pub fn ledger_lines(dir: &Path) -> Vec<String> {
  std::fs::read_to_string(dir.join("orders.jsonl"))
    .unwrap_or_default()
    .lines()
    .filter(|l| !l.trim().is_empty())
    .map(str::to_string)
    .collect()
}

/// Carries the session cookie from one test request to the next.
#[derive(Default)]
pub struct Browser {
  cookie: Option<Cookie<'static>>,
}

impl Browser {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_session(&self, req: TestRequest) -> TestRequest {
    match &self.cookie {
      Some(cookie) => req.cookie(cookie.clone()),
      None => req,
    }
  }

  pub fn remember<B>(&mut self, resp: &ServiceResponse<B>) {
    if let Some(cookie) = resp.response().cookies().find(|c| c.name() == SESSION_COOKIE) {
      self.cookie = Some(cookie.into_owned());
    }
  }
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
  resp
    .headers()
    .get(actix_web::http::header::LOCATION)
    .and_then(|v| v.to_str().ok())
    .map(str::to_string)
}

/// The full application wired for `actix_web::test`.
macro_rules! storefront_app {
  ($state:expr) => {{
    let state: storefront::state::AppState = $state;
    let config = (*state.config).clone();
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new(state))
        .wrap(storefront::session_middleware(&config, actix_web::cookie::Key::generate()))
        .configure(storefront::web::configure_app_routes),
    )
    .await
  }};
}
