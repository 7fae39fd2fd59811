// storefront/src/models/order.rs

use super::OrderItem;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ORDER_ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
  pub name: String,
  pub email: String,
  pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  pub id: String,
  pub customer: Customer,
  pub items: Vec<OrderItem>,
  pub total: u64,
  #[serde(rename = "date")]
  pub timestamp: DateTime<Local>,
}

impl Order {
  pub fn new(customer: Customer, items: Vec<OrderItem>) -> Self {
    let total = items.iter().fold(0u64, |acc, i| acc.saturating_add(i.total));
    Self {
      id: generate_order_id(),
      customer,
      items,
      total,
      timestamp: Local::now(),
    }
  }

  /// `$12.34` style rendering of the total.
  pub fn display_total(&self) -> String {
    format_minor_units(self.total)
  }
}

/// First eight hex digits of a v4 UUID, upper-cased.
pub fn generate_order_id() -> String {
  Uuid::new_v4()
    .simple()
    .to_string()
    .chars()
    .take(ORDER_ID_LEN)
    .collect::<String>()
    .to_uppercase()
}

pub fn format_minor_units(amount: u64) -> String {
  format!("${}.{:02}", amount / 100, amount % 100)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn order_ids_are_short_uppercase_hex() {
    let id = generate_order_id();
    assert_eq!(id.len(), ORDER_ID_LEN);
    assert!(id.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
  }

  #[test]
  fn totals_render_with_two_decimals() {
    assert_eq!(format_minor_units(0), "$0.00");
    assert_eq!(format_minor_units(1997), "$19.97");
    assert_eq!(format_minor_units(5), "$0.05");
  }

  #[test]
  fn new_order_sums_line_totals() {
    let line = |total| OrderItem {
      product_id: "P-001".to_string(),
      name: "USB Keyboard".to_string(),
      price: total,
      quantity: 1,
      total,
    };
    let customer = Customer {
      name: "Ada".to_string(),
      email: "ada@example.com".to_string(),
      address: "1 Analytical St".to_string(),
    };
    let order = Order::new(customer, vec![line(799), line(399)]);
    assert_eq!(order.total, 1198);

    let json = serde_json::to_value(&order).unwrap();
    assert!(json.get("date").is_some());
  }
}
