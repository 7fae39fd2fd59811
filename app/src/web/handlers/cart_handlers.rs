// storefront/src/web/handlers/cart_handlers.rs

use crate::models::Cart;
use crate::models::Product;
use crate::pipelines::cart_pipeline::{self, CartAddOutcome};
use crate::session::{FlashLevel, Visitor};
use crate::state::AppState;
use crate::web::views::{see_other, CartLineView, CartView, ProductView};
use crate::models::order::format_minor_units;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
  pub product_id: Option<String>,
  pub qty: Option<String>,
}

#[instrument(name = "handler::add_to_cart", skip(app_state, form, visitor), fields(product_id = ?form.product_id))]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  form: web::Form<AddToCartForm>,
  visitor: Visitor,
) -> HttpResponse {
  let AddToCartForm { product_id, qty } = form.into_inner();
  let quantity = match qty.as_deref().map(str::trim) {
    None => 1,
    Some(raw) => match raw.parse::<i64>() {
      Ok(q) => q,
      Err(_) => {
        warn!(qty = raw, "Unparseable quantity.");
        visitor.flash(FlashLevel::Error, "Error adding item to cart");
        return see_other("/");
      }
    },
  };
  let product_id = product_id.unwrap_or_default();

  match cart_pipeline::add_to_cart(&app_state, visitor.cart(), &product_id, quantity).await {
    Ok(CartAddOutcome::Added {
      cart,
      product_name,
      quantity,
    }) => match visitor.save_cart(&cart) {
      Ok(()) => visitor.flash(FlashLevel::Success, format!("Added {} x {} to cart", quantity, product_name)),
      Err(e) => {
        error!(error = %e, "Could not store cart in session.");
        visitor.flash(FlashLevel::Error, "Error adding item to cart");
      }
    },
    Ok(CartAddOutcome::Ignored) => {}
    Err(e) => {
      error!(error = %e, "Add-to-cart workflow failed.");
      visitor.flash(FlashLevel::Error, "Error adding item to cart");
    }
  }
  see_other("/")
}

/// Cart lines that still resolve to a product, with per-line and overall
/// money totals. Ids the store no longer knows are left out.
pub fn cart_lines(cart: &Cart, products: &[Product]) -> (Vec<CartLineView>, u64) {
  let mut total = 0u64;
  let lines = cart
    .iter()
    .filter_map(|(product_id, quantity)| {
      let product = products.iter().find(|p| p.id == product_id)?;
      let line_total = product.price.saturating_mul(u64::from(quantity));
      total = total.saturating_add(line_total);
      Some(CartLineView {
        product: ProductView::from(product),
        quantity,
        total: line_total,
      })
    })
    .collect();
  (lines, total)
}

#[instrument(name = "handler::view_cart", skip(app_state, visitor))]
pub async fn view_cart_handler(app_state: web::Data<AppState>, visitor: Visitor) -> HttpResponse {
  let cart = visitor.cart();
  let products = app_state.products.list().await;
  let (cart_items, total) = cart_lines(&cart, &products);

  HttpResponse::Ok().json(CartView {
    cart_items,
    total,
    total_display: format_minor_units(total),
    cart_total: cart.total(),
    flashes: visitor.take_flashes(),
  })
}

/// Applies `qty_<id>` fields to the cart lines of known products. A missing,
/// blank or non-positive quantity removes the line. Returns the names of the
/// removed products, or `None` when a quantity does not parse.
pub fn apply_quantity_updates(
  cart: &mut Cart,
  products: &[Product],
  fields: &HashMap<String, String>,
) -> Option<Vec<String>> {
  let mut updated = cart.clone();
  let mut removed = Vec::new();

  for product in products.iter().filter(|p| cart.contains(&p.id)) {
    let raw = fields
      .get(&format!("qty_{}", product.id))
      .map(|v| v.trim())
      .unwrap_or("");
    let qty = if raw.is_empty() { 0 } else { raw.parse::<i64>().ok()? };

    updated.set_quantity(&product.id, qty);
    if qty <= 0 {
      removed.push(product.name.clone());
    }
  }

  *cart = updated;
  Some(removed)
}

#[instrument(name = "handler::update_cart", skip_all)]
pub async fn update_cart_handler(
  app_state: web::Data<AppState>,
  form: web::Form<HashMap<String, String>>,
  visitor: Visitor,
) -> HttpResponse {
  let products = app_state.products.list().await;
  let mut cart = visitor.cart();

  let Some(removed) = apply_quantity_updates(&mut cart, &products, &form) else {
    warn!("Cart update carried an unparseable quantity.");
    visitor.flash(FlashLevel::Error, "Error updating cart");
    return see_other("/cart");
  };

  if let Err(e) = visitor.save_cart(&cart) {
    error!(error = %e, "Could not store cart in session.");
    visitor.flash(FlashLevel::Error, "Error updating cart");
    return see_other("/cart");
  }
  for name in removed {
    visitor.flash(FlashLevel::Info, format!("Removed {} from cart", name));
  }
  info!(cart_total = cart.total(), "Cart updated.");
  see_other("/cart")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cart_of(entries: &[(&str, u32)]) -> Cart {
    let mut cart = Cart::new();
    for (id, qty) in entries {
      cart.add(id, *qty);
    }
    cart
  }

  fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
  }

  #[test]
  fn cart_lines_price_known_products_only() {
    let products = Product::default_catalog();
    let cart = cart_of(&[("P-001", 2), ("P-003", 1), ("P-404", 5)]);

    let (lines, total) = cart_lines(&cart, &products);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].total, 1598);
    assert_eq!(total, 1598 + 199);
  }

  #[test]
  fn quantity_updates_overwrite_and_remove() {
    let products = Product::default_catalog();
    let mut cart = cart_of(&[("P-001", 2), ("P-002", 1), ("P-003", 4)]);

    let removed =
      apply_quantity_updates(&mut cart, &products, &fields(&[("qty_P-001", "5"), ("qty_P-002", "0")])).unwrap();

    assert_eq!(cart.quantity("P-001"), 5);
    assert!(!cart.contains("P-002"));
    assert!(!cart.contains("P-003"));
    assert_eq!(removed, vec!["USB Mouse".to_string(), "HDMI Cable".to_string()]);
  }

  #[test]
  fn unparseable_quantity_leaves_cart_untouched() {
    let products = Product::default_catalog();
    let mut cart = cart_of(&[("P-001", 2)]);

    assert!(apply_quantity_updates(&mut cart, &products, &fields(&[("qty_P-001", "two")])).is_none());
    assert_eq!(cart.quantity("P-001"), 2);
  }
}
