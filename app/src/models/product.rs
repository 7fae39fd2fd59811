// storefront/src/models/product.rs

use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.jpg";
const IMAGE_PREFIX: &str = "/static/images/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: String,
  pub name: String,
  /// Minor currency units.
  pub price: u64,
  pub stock: u32,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub image: String,
}

/// Editable product fields, as submitted by the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
  pub name: String,
  pub price: u64,
  pub stock: u32,
  pub category: String,
  pub image: String,
}

impl Product {
  pub fn from_draft(id: String, draft: ProductDraft) -> Self {
    Self {
      id,
      name: draft.name,
      price: draft.price,
      stock: draft.stock,
      category: draft.category,
      image: draft.image,
    }
  }

  pub fn apply(&mut self, draft: ProductDraft) {
    self.name = draft.name;
    self.price = draft.price;
    self.stock = draft.stock;
    self.category = draft.category;
    self.image = draft.image;
  }

  /// Image path as served to the browser: a placeholder when unset, and bare
  /// file names resolved under the static image directory.
  pub fn display_image(&self) -> String {
    if self.image.is_empty() {
      PLACEHOLDER_IMAGE.to_string()
    } else if self.image.starts_with("/static/") {
      self.image.clone()
    } else {
      format!("{}{}", IMAGE_PREFIX, self.image)
    }
  }

  /// Numeric part of a `P-NNN` id.
  pub fn sequence_number(&self) -> Option<u32> {
    self.id.strip_prefix("P-").and_then(|n| n.parse().ok())
  }

  pub fn default_catalog() -> Vec<Product> {
    let seed = |id: &str, name: &str, price: u64, stock: u32, category: &str, image: &str| Product {
      id: id.to_string(),
      name: name.to_string(),
      price,
      stock,
      category: category.to_string(),
      image: image.to_string(),
    };
    vec![
      seed("P-001", "USB Keyboard", 799, 12, "Peripherals", "/static/images/keyboard.jpg"),
      seed("P-002", "USB Mouse", 399, 20, "Peripherals", "/static/images/mouse.jpg"),
      seed("P-003", "HDMI Cable", 199, 30, "Cables", "/static/images/hdmi.jpg"),
    ]
  }
}

/// Next sequential id, one past the highest `P-NNN` in `products`.
pub fn next_product_id(products: &[Product]) -> String {
  let next = products.iter().filter_map(Product::sequence_number).max().unwrap_or(0) + 1;
  format!("P-{:03}", next)
}
