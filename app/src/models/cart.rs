// storefront/src/models/cart.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A visitor's cart: product id to requested quantity. Every stored quantity
/// is positive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
  entries: BTreeMap<String, u32>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds `qty` units on top of whatever is already in the cart.
  pub fn add(&mut self, product_id: &str, qty: u32) {
    if qty == 0 {
      return;
    }
    let current = self.entries.entry(product_id.to_string()).or_insert(0);
    *current = current.saturating_add(qty);
  }

  /// Overwrites the quantity; zero or negative removes the entry.
  pub fn set_quantity(&mut self, product_id: &str, qty: i64) {
    if qty <= 0 {
      self.entries.remove(product_id);
    } else {
      let qty = u32::try_from(qty).unwrap_or(u32::MAX);
      self.entries.insert(product_id.to_string(), qty);
    }
  }

  pub fn quantity(&self, product_id: &str) -> u32 {
    self.entries.get(product_id).copied().unwrap_or(0)
  }

  pub fn contains(&self, product_id: &str) -> bool {
    self.entries.contains_key(product_id)
  }

  /// Number of units in the cart, summed across products. This is an item
  /// count, not a monetary amount.
  pub fn total(&self) -> u64 {
    self.entries.values().map(|&q| u64::from(q)).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
    self.entries.iter().map(|(id, &q)| (id.as_str(), q))
  }
}
