// storefront/src/session.rs

//! Per-request view of the visitor's signed-cookie session: the cart, the
//! admin flag and queued flash messages.

use crate::errors::{AppError, Result};
use crate::models::Cart;
use actix_session::{Session, SessionExt};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};
use tracing::warn;

const CART_KEY: &str = "cart";
const ADMIN_KEY: &str = "is_admin";
const FLASH_KEY: &str = "_flashes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
  Success,
  Error,
  Info,
  Warning,
}

/// One-shot message shown by the next rendered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
  pub level: FlashLevel,
  pub message: String,
}

/// Extracted in every handler. Session decode failures degrade to defaults
/// (empty cart, not admin, no flashes) rather than failing the request.
pub struct Visitor {
  session: Session,
}

impl Visitor {
  pub fn new(session: Session) -> Self {
    Self { session }
  }

  pub fn cart(&self) -> Cart {
    match self.session.get::<Cart>(CART_KEY) {
      Ok(cart) => cart.unwrap_or_default(),
      Err(e) => {
        warn!(error = %e, "Discarding undecodable session cart.");
        Cart::new()
      }
    }
  }

  pub fn save_cart(&self, cart: &Cart) -> Result<()> {
    self
      .session
      .insert(CART_KEY, cart)
      .map_err(|e| AppError::Session(e.to_string()))
  }

  /// Item count shown in the navigation bar.
  pub fn cart_total(&self) -> u64 {
    self.cart().total()
  }

  pub fn is_admin(&self) -> bool {
    self.session.get::<bool>(ADMIN_KEY).ok().flatten().unwrap_or(false)
  }

  pub fn grant_admin(&self) -> Result<()> {
    self
      .session
      .insert(ADMIN_KEY, true)
      .map_err(|e| AppError::Session(e.to_string()))
  }

  pub fn revoke_admin(&self) {
    self.session.remove(ADMIN_KEY);
  }

  /// Queues a flash. A failure to store it is logged and otherwise ignored.
  pub fn flash(&self, level: FlashLevel, message: impl Into<String>) {
    let mut queued = self.queued_flashes();
    queued.push(Flash {
      level,
      message: message.into(),
    });
    if let Err(e) = self.session.insert(FLASH_KEY, &queued) {
      warn!(error = %e, "Could not queue flash message.");
    }
  }

  /// Returns and clears the queued flashes.
  pub fn take_flashes(&self) -> Vec<Flash> {
    let queued = self.queued_flashes();
    if !queued.is_empty() {
      self.session.remove(FLASH_KEY);
    }
    queued
  }

  fn queued_flashes(&self) -> Vec<Flash> {
    self.session.get::<Vec<Flash>>(FLASH_KEY).ok().flatten().unwrap_or_default()
  }
}

impl FromRequest for Visitor {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let visitor = Visitor::new(req.get_session());
    // A first-time visitor starts with an empty cart.
    if !matches!(visitor.session.get::<Cart>(CART_KEY), Ok(Some(_))) {
      if let Err(e) = visitor.save_cart(&Cart::new()) {
        warn!(error = %e, "Could not initialise session cart.");
      }
    }
    futures_util::future::ready(Ok(visitor))
  }
}
