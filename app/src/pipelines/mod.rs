// storefront/src/pipelines/mod.rs

//! Defines and registers every workflow pipeline of the storefront.

use crate::errors::AppError;
use crate::state::AppState;
use shopflow::Shopflow;
use std::sync::Arc;

pub mod common_steps;
pub mod contexts;

pub mod admin_pipeline;
pub mod cart_pipeline;
pub mod checkout_pipeline;

/// Called once while the application state is assembled.
pub fn register_all_pipelines(flow: &Arc<Shopflow<AppError>>, app_state: &AppState) {
  tracing::info!("Registering storefront pipelines...");

  cart_pipeline::register_add_to_cart_pipeline(flow, app_state);
  checkout_pipeline::register_checkout_pipeline(flow, app_state);
  admin_pipeline::register_admin_login_pipeline(flow, app_state);
  admin_pipeline::register_product_save_pipeline(flow, app_state);

  tracing::info!("All storefront pipelines registered.");
}
