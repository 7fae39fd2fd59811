// storefront/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use shopflow::FlowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Your cart is empty")]
  EmptyCart,

  #[error("Not enough stock for {product}")]
  InsufficientStock { product: String },

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Storage Error: {0}")]
  Storage(#[from] std::io::Error),

  #[error("Serialization Error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Session Error: {0}")]
  Session(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  /// Message safe to show to a visitor in a flash.
  pub fn user_message(&self) -> String {
    match self {
      AppError::Validation(m) | AppError::Auth(m) => m.clone(),
      AppError::EmptyCart | AppError::InsufficientStock { .. } => self.to_string(),
      _ => "Something went wrong, please try again".to_string(),
    }
  }
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<std::io::Error>() {
      Ok(io_err) => AppError::Storage(io_err),
      Err(err) => AppError::Internal(err.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::EmptyCart | AppError::InsufficientStock { .. } => {
        HttpResponse::Conflict().json(json!({"error": self.to_string()}))
      }
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::Storage(_) | AppError::Serialization(_) => {
        HttpResponse::InternalServerError().json(json!({"error": "Storage operation failed"}))
      }
      AppError::Session(m) => HttpResponse::InternalServerError().json(json!({"error": "Session error", "detail": m})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Workflow { source } => {
        tracing::error!(workflow_error_source = ?source, "Workflow error details");
        HttpResponse::InternalServerError().json(json!({"error": "Workflow processing error"}))
      }
      AppError::Internal(_) => HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred"})),
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stock_errors_name_the_product() {
    let err = AppError::InsufficientStock {
      product: "USB Mouse".to_string(),
    };
    assert_eq!(err.user_message(), "Not enough stock for USB Mouse");
  }

  #[test]
  fn storage_errors_are_not_shown_verbatim() {
    let err = AppError::Storage(std::io::Error::new(std::io::ErrorKind::Other, "/secret/path"));
    assert!(!err.user_message().contains("/secret/path"));
  }

  #[test]
  fn anyhow_wrapping_io_maps_to_storage() {
    let err: AppError = anyhow::Error::new(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")).into();
    assert!(matches!(err, AppError::Storage(_)));
  }
}
