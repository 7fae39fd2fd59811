// storefront/src/pipelines/contexts.rs

//! Data structs carried by each pipeline. Handlers receive them wrapped in
//! `shopflow::ContextData`.

use crate::models::{Cart, Customer, Order, OrderItem, Product, ProductDraft};
use crate::state::AppState;
use crate::store::Upserted;

#[derive(Clone)]
pub struct AddToCartCtxData {
  pub app_state: AppState,
  pub cart: Cart,
  pub product_id: String,
  pub quantity: i64,
  /// Resolved name, or "Unknown Product" for ids the store does not know.
  pub product_name: Option<String>,
}

#[derive(Clone)]
pub struct CheckoutCtxData {
  pub app_state: AppState,
  pub cart: Cart,
  pub customer: Customer,
  /// Catalog as loaded before any stock was decremented.
  pub catalog_snapshot: Vec<Product>,
  /// Cart lines matched to products, in cart order.
  pub resolved_lines: Vec<(Product, u32)>,
  pub items: Vec<OrderItem>,
  pub order: Option<Order>,
}

impl CheckoutCtxData {
  pub fn new(app_state: AppState, cart: Cart, customer: Customer) -> Self {
    Self {
      app_state,
      cart,
      customer,
      catalog_snapshot: Vec::new(),
      resolved_lines: Vec::new(),
      items: Vec::new(),
      order: None,
    }
  }
}

#[derive(Clone)]
pub struct AdminLoginCtxData {
  pub app_state: AppState,
  pub username: String,
  pub password: String,
  pub authenticated: bool,
}

/// Admin product form fields as submitted, before parsing.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
  pub id: Option<String>,
  pub name: String,
  pub price: String,
  pub stock: String,
  pub category: String,
  pub image: String,
}

#[derive(Clone)]
pub struct ProductSaveCtxData {
  pub app_state: AppState,
  pub is_admin: bool,
  pub form: ProductForm,
  pub draft: Option<ProductDraft>,
  pub outcome: Option<Upserted>,
}
