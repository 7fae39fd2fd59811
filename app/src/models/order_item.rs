// storefront/src/models/order_item.rs

use serde::{Deserialize, Serialize};

/// A priced order line. Name and price are copied from the product when the
/// order is placed and never follow later product edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
  pub product_id: String,
  pub name: String,
  pub price: u64,
  pub quantity: u32,
  pub total: u64,
}
