// storefront/src/pipelines/checkout_pipeline.rs

use crate::errors::{AppError, Result};
use crate::models::{AuditKind, Cart, Customer, Order, OrderItem};
use crate::pipelines::common_steps;
use crate::pipelines::contexts::CheckoutCtxData;
use crate::state::AppState;
use shopflow::{ContextData, Pipeline, PipelineControl, PipelineResult, Shopflow};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill all required fields";
pub const ORDER_TOO_LARGE_MESSAGE: &str = "Order total is too large";

pub fn register_checkout_pipeline(flow: &Arc<Shopflow<AppError>>, _app_state: &AppState) {
  let mut p = Pipeline::<CheckoutCtxData, AppError>::new(&[
    ("validate_checkout_request", false, None),
    ("resolve_cart_products", false, None),
    ("price_order_items", false, None),
    ("commit_stock_decrement", false, None),
    ("append_order_record", false, None),
    ("record_checkout_audit", true, None),
    ("clear_cart", false, None),
  ]);

  p.on_root("validate_checkout_request", validate_checkout_request);
  p.on_root("resolve_cart_products", resolve_cart_products);

  p.on_root("price_order_items", price_order_items);

  p.on_root("commit_stock_decrement", commit_stock_decrement);
  p.on_root("append_order_record", append_order_record);

  p.on_root("record_checkout_audit", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      let (app_state, details) = {
        let guard = ctx_data.read();
        let details = guard
          .order
          .as_ref()
          .map(|order| format!("Order: {}, Total: {}", order.id, order.display_total()));
        (guard.app_state.clone(), details)
      };
      let Some(details) = details else {
        warn!("Checkout audit skipped: no order recorded.");
        return Ok::<_, AppError>(PipelineControl::Continue);
      };
      common_steps::record_audit(&app_state, AuditKind::Checkout, details).await;
      Ok(PipelineControl::Continue)
    })
  });

  p.on_root("clear_cart", |ctx_data: ContextData<CheckoutCtxData>| {
    Box::pin(async move {
      ctx_data.write().cart.clear();
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  flow.register_pipeline(p);
  info!("Checkout pipeline registered.");
}

#[instrument(name = "checkout_step::validate_checkout_request", skip(ctx_data))]
async fn validate_checkout_request(ctx_data: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let mut guard = ctx_data.write();
  if guard.cart.is_empty() {
    return Err(AppError::EmptyCart);
  }

  let customer = Customer {
    name: guard.customer.name.trim().to_string(),
    email: guard.customer.email.trim().to_string(),
    address: guard.customer.address.trim().to_string(),
  };
  if customer.name.is_empty() || customer.email.is_empty() || customer.address.is_empty() {
    return Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
  }
  guard.customer = customer;
  Ok(PipelineControl::Continue)
}

/// Matches every cart line to a product with enough stock.
#[instrument(name = "checkout_step::resolve_cart_products", skip(ctx_data))]
async fn resolve_cart_products(ctx_data: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let (app_state, cart) = {
    let guard = ctx_data.read();
    (guard.app_state.clone(), guard.cart.clone())
  };
  let catalog = app_state.products.list().await;

  let mut resolved_lines = Vec::with_capacity(cart.len());
  for (product_id, quantity) in cart.iter() {
    match catalog.iter().find(|p| p.id == product_id) {
      Some(product) if product.stock >= quantity => resolved_lines.push((product.clone(), quantity)),
      Some(product) => {
        warn!(%product_id, requested = quantity, available = product.stock, "Insufficient stock.");
        return Err(AppError::InsufficientStock {
          product: product.name.clone(),
        });
      }
      None => {
        warn!(%product_id, "Cart references an unknown product.");
        return Err(AppError::InsufficientStock {
          product: "unknown product".to_string(),
        });
      }
    }
  }

  let mut guard = ctx_data.write();
  guard.catalog_snapshot = catalog;
  guard.resolved_lines = resolved_lines;
  Ok(PipelineControl::Continue)
}

/// Prices every resolved line. Totals that do not fit in a `u64` reject the
/// order before any stock is touched.
#[instrument(name = "checkout_step::price_order_items", skip(ctx_data))]
async fn price_order_items(ctx_data: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let mut guard = ctx_data.write();
  let mut items = Vec::with_capacity(guard.resolved_lines.len());
  let mut order_total: u64 = 0;
  for (product, quantity) in &guard.resolved_lines {
    let line_total = product
      .price
      .checked_mul(u64::from(*quantity))
      .and_then(|total| order_total.checked_add(total).map(|sum| (total, sum)));
    let Some((total, sum)) = line_total else {
      warn!(product_id = %product.id, quantity, "Order total overflows.");
      return Err(AppError::Validation(ORDER_TOO_LARGE_MESSAGE.to_string()));
    };
    order_total = sum;
    items.push(OrderItem {
      product_id: product.id.clone(),
      name: product.name.clone(),
      price: product.price,
      quantity: *quantity,
      total,
    });
  }
  guard.items = items;
  Ok(PipelineControl::Continue)
}

#[instrument(name = "checkout_step::commit_stock_decrement", skip(ctx_data))]
async fn commit_stock_decrement(ctx_data: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let (app_state, updated) = {
    let guard = ctx_data.read();
    let mut updated = guard.catalog_snapshot.clone();
    for (product, quantity) in &guard.resolved_lines {
      if let Some(stored) = updated.iter_mut().find(|p| p.id == product.id) {
        stored.stock = stored.stock.saturating_sub(*quantity);
      }
    }
    (guard.app_state.clone(), updated)
  };

  app_state.products.replace_all(&updated).await?;
  Ok(PipelineControl::Continue)
}

/// Appends the order. When the ledger rejects it, the catalog is restored to
/// its pre-checkout snapshot before the error is returned.
#[instrument(name = "checkout_step::append_order_record", skip(ctx_data))]
async fn append_order_record(ctx_data: ContextData<CheckoutCtxData>) -> Result<PipelineControl> {
  let (app_state, order, snapshot) = {
    let guard = ctx_data.read();
    let order = Order::new(guard.customer.clone(), guard.items.clone());
    (guard.app_state.clone(), order, guard.catalog_snapshot.clone())
  };

  if let Err(append_err) = app_state.orders.append(&order).await {
    error!(order_id = %order.id, error = %append_err, "Order append failed, restoring stock.");
    if let Err(restore_err) = app_state.products.replace_all(&snapshot).await {
      error!(error = %restore_err, "Stock restore failed; catalog may be inconsistent.");
    }
    return Err(append_err);
  }

  info!(order_id = %order.id, total = order.total, "Order recorded.");
  ctx_data.write().order = Some(order);
  Ok(PipelineControl::Continue)
}

/// A completed checkout: the recorded order and the now-empty cart.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
  pub order: Order,
  pub cart: Cart,
}

/// Runs the checkout pipeline while holding the catalog writer lock, so two
/// checkouts can never both pass the stock check on the same units.
#[instrument(name = "checkout::place_order", skip_all, fields(cart_lines = cart.len()))]
pub async fn place_order(app_state: &AppState, cart: Cart, customer: Customer) -> Result<CheckoutReceipt> {
  let ctx_data = ContextData::new(CheckoutCtxData::new(app_state.clone(), cart, customer));

  let result = {
    let _writer = app_state.catalog_writer.lock().await;
    app_state.flow.run(ctx_data.clone()).await?
  };

  let guard = ctx_data.read();
  match (result, guard.order.clone()) {
    (PipelineResult::Completed, Some(order)) => Ok(CheckoutReceipt {
      order,
      cart: guard.cart.clone(),
    }),
    _ => Err(AppError::Internal("Checkout finished without an order record.".to_string())),
  }
}
