// storefront/src/web/handlers/checkout_handlers.rs

use crate::errors::AppError;
use crate::models::Customer;
use crate::pipelines::checkout_pipeline;
use crate::session::{FlashLevel, Visitor};
use crate::state::AppState;
use crate::web::views::{see_other, CheckoutFormView, CheckoutView};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

#[derive(Debug, Default, Deserialize)]
pub struct CheckoutForm {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub address: String,
}

fn render_checkout(visitor: &Visitor, form: CheckoutFormView) -> HttpResponse {
  HttpResponse::Ok().json(CheckoutView {
    form,
    cart_total: visitor.cart_total(),
    flashes: visitor.take_flashes(),
  })
}

#[instrument(name = "handler::checkout_page", skip(visitor))]
pub async fn checkout_page_handler(visitor: Visitor) -> HttpResponse {
  if visitor.cart().is_empty() {
    visitor.flash(FlashLevel::Warning, EMPTY_CART_MESSAGE);
    return see_other("/");
  }
  render_checkout(&visitor, CheckoutFormView::default())
}

#[instrument(name = "handler::checkout_submit", skip_all)]
pub async fn checkout_submit_handler(
  app_state: web::Data<AppState>,
  form: web::Form<CheckoutForm>,
  visitor: Visitor,
) -> HttpResponse {
  let cart = visitor.cart();
  if cart.is_empty() {
    visitor.flash(FlashLevel::Warning, EMPTY_CART_MESSAGE);
    return see_other("/");
  }

  let CheckoutForm { name, email, address } = form.into_inner();
  let customer = Customer {
    name: name.clone(),
    email: email.clone(),
    address: address.clone(),
  };

  match checkout_pipeline::place_order(&app_state, cart, customer).await {
    Ok(receipt) => {
      if let Err(e) = visitor.save_cart(&receipt.cart) {
        warn!(error = %e, order_id = %receipt.order.id, "Order placed but the session cart could not be cleared.");
      }
      info!(order_id = %receipt.order.id, total = receipt.order.total, "Checkout completed.");
      see_other(&format!("/order/{}", receipt.order.id))
    }
    Err(AppError::EmptyCart) => {
      visitor.flash(FlashLevel::Warning, EMPTY_CART_MESSAGE);
      see_other("/")
    }
    Err(e @ AppError::Validation(_)) => {
      visitor.flash(FlashLevel::Error, e.user_message());
      render_checkout(&visitor, CheckoutFormView { name, email, address })
    }
    Err(e @ AppError::InsufficientStock { .. }) => {
      visitor.flash(FlashLevel::Error, e.user_message());
      see_other("/cart")
    }
    Err(e) => {
      error!(error = %e, "Checkout failed.");
      visitor.flash(FlashLevel::Error, "Error during checkout");
      see_other("/cart")
    }
  }
}
