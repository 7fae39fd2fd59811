// storefront/src/pipelines/cart_pipeline.rs

use crate::errors::{AppError, Result};
use crate::models::{AuditKind, Cart};
use crate::pipelines::common_steps;
use crate::pipelines::contexts::AddToCartCtxData;
use crate::state::AppState;
use shopflow::{ContextData, Pipeline, PipelineControl, PipelineResult, Shopflow};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
pub const QUANTITY_TOO_LARGE_MESSAGE: &str = "Quantity is too large";

pub fn register_add_to_cart_pipeline(flow: &Arc<Shopflow<AppError>>, _app_state: &AppState) {
  let mut p = Pipeline::<AddToCartCtxData, AppError>::new(&[
    ("validate_cart_input", false, None),
    ("lookup_product_name", false, None),
    ("add_to_session_cart", false, None),
    ("record_add_to_cart_audit", true, None),
  ]);

  // A blank id or non-positive quantity is ignored rather than rejected.
  p.on_root("validate_cart_input", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let (product_id, quantity) = {
        let guard = ctx_data.read();
        (guard.product_id.clone(), guard.quantity)
      };
      if product_id.trim().is_empty() || quantity <= 0 {
        debug!(%product_id, quantity, "Ignoring add-to-cart request.");
        return Ok::<_, AppError>(PipelineControl::Stop);
      }
      if quantity > i64::from(u32::MAX) {
        warn!(%product_id, quantity, "Add-to-cart quantity out of range.");
        return Err(AppError::Validation(QUANTITY_TOO_LARGE_MESSAGE.to_string()));
      }
      Ok(PipelineControl::Continue)
    })
  });

  p.on_root("lookup_product_name", lookup_product_name);

  p.on_root("add_to_session_cart", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let mut guard = ctx_data.write();
      let product_id = guard.product_id.clone();
      let quantity = u32::try_from(guard.quantity)
        .map_err(|_| AppError::Validation(QUANTITY_TOO_LARGE_MESSAGE.to_string()))?;
      guard.cart.add(&product_id, quantity);
      info!(%product_id, quantity, cart_total = guard.cart.total(), "Added to cart.");
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  p.on_root("record_add_to_cart_audit", |ctx_data: ContextData<AddToCartCtxData>| {
    Box::pin(async move {
      let (app_state, details) = {
        let guard = ctx_data.read();
        let name = guard.product_name.as_deref().unwrap_or(UNKNOWN_PRODUCT);
        (guard.app_state.clone(), format!("Product: {}, Qty: {}", name, guard.quantity))
      };
      common_steps::record_audit(&app_state, AuditKind::AddToCart, details).await;
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  flow.register_pipeline(p);
  info!("Add-to-cart pipeline registered.");
}

#[instrument(name = "cart_step::lookup_product_name", skip(ctx_data))]
async fn lookup_product_name(ctx_data: ContextData<AddToCartCtxData>) -> Result<PipelineControl> {
  let (app_state, product_id) = {
    let guard = ctx_data.read();
    (guard.app_state.clone(), guard.product_id.clone())
  };
  let name = app_state
    .products
    .find(&product_id)
    .await
    .map(|p| p.name)
    .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());
  ctx_data.write().product_name = Some(name);
  Ok(PipelineControl::Continue)
}

/// What the cart looks like after an add-to-cart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAddOutcome {
  Added { cart: Cart, product_name: String, quantity: i64 },
  /// Blank product id or non-positive quantity; the cart is unchanged.
  Ignored,
}

/// Adds `quantity` of `product_id` to `cart` and audits the addition. Product
/// ids the store does not know are still added, under an unknown name.
#[instrument(name = "cart::add_to_cart", skip(app_state, cart))]
pub async fn add_to_cart(app_state: &AppState, cart: Cart, product_id: &str, quantity: i64) -> Result<CartAddOutcome> {
  let ctx_data = ContextData::new(AddToCartCtxData {
    app_state: app_state.clone(),
    cart,
    product_id: product_id.to_string(),
    quantity,
    product_name: None,
  });

  match app_state.flow.run(ctx_data.clone()).await? {
    PipelineResult::Stopped => Ok(CartAddOutcome::Ignored),
    PipelineResult::Completed => {
      let guard = ctx_data.read();
      Ok(CartAddOutcome::Added {
        cart: guard.cart.clone(),
        product_name: guard.product_name.clone().unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
        quantity: guard.quantity,
      })
    }
  }
}
