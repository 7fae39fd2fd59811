// storefront/src/web/views.rs

//! JSON view models rendered by the handlers. Every view carries the cart
//! item count for the navigation bar and the flashes drained for this render.

use crate::models::order::format_minor_units;
use crate::models::{Order, Product};
use crate::session::Flash;
use actix_web::http::header;
use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
  pub id: String,
  pub name: String,
  pub price: u64,
  pub price_display: String,
  pub stock: u32,
  pub category: String,
  pub image: String,
}

impl From<&Product> for ProductView {
  fn from(product: &Product) -> Self {
    Self {
      id: product.id.clone(),
      name: product.name.clone(),
      price: product.price,
      price_display: format_minor_units(product.price),
      stock: product.stock,
      category: product.category.clone(),
      image: product.display_image(),
    }
  }
}

#[derive(Debug, Serialize)]
pub struct CatalogView {
  pub products: Vec<ProductView>,
  pub categories: Vec<String>,
  pub search_query: String,
  pub category_filter: String,
  pub cart_total: u64,
  pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct CartLineView {
  pub product: ProductView,
  pub quantity: u32,
  pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct CartView {
  pub cart_items: Vec<CartLineView>,
  /// Monetary total in minor units.
  pub total: u64,
  pub total_display: String,
  /// Item count, as everywhere else.
  pub cart_total: u64,
  pub flashes: Vec<Flash>,
}

#[derive(Debug, Default, Serialize)]
pub struct CheckoutFormView {
  pub name: String,
  pub email: String,
  pub address: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutView {
  pub form: CheckoutFormView,
  pub cart_total: u64,
  pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct OrderSummaryView {
  pub order_id: String,
  pub order: Option<Order>,
  pub cart_total: u64,
  pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginView {
  pub cart_total: u64,
  pub flashes: Vec<Flash>,
}

#[derive(Debug, Serialize)]
pub struct AdminProductsView {
  pub products: Vec<ProductView>,
  pub cart_total: u64,
  pub flashes: Vec<Flash>,
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
  HttpResponse::SeeOther()
    .insert_header((header::LOCATION, location))
    .finish()
}
