// storefront/src/models/audit.rs

use chrono::{DateTime, Local};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditKind {
  AddToCart,
  Checkout,
  AdminLogin,
  AdminLogout,
  ProductAdd,
  ProductUpdate,
  ProductUpdateFailed,
}

impl AuditKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      AuditKind::AddToCart => "ADD_TO_CART",
      AuditKind::Checkout => "CHECKOUT",
      AuditKind::AdminLogin => "ADMIN_LOGIN",
      AuditKind::AdminLogout => "ADMIN_LOGOUT",
      AuditKind::ProductAdd => "PRODUCT_ADD",
      AuditKind::ProductUpdate => "PRODUCT_UPDATE",
      AuditKind::ProductUpdateFailed => "PRODUCT_UPDATE_FAILED",
    }
  }
}

impl fmt::Display for AuditKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
  pub timestamp: DateTime<Local>,
  pub kind: AuditKind,
  pub details: String,
}

impl AuditEvent {
  pub fn now(kind: AuditKind, details: impl Into<String>) -> Self {
    Self {
      timestamp: Local::now(),
      kind,
      details: details.into(),
    }
  }

  /// `<YYYY-MM-DD HH:MM:SS> - <EVENT_TYPE> - <details>`, without the newline.
  pub fn to_log_line(&self) -> String {
    format!("{} - {} - {}", self.timestamp.format("%Y-%m-%d %H:%M:%S"), self.kind, self.details)
  }
}
