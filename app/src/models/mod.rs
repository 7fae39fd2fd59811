// storefront/src/models/mod.rs

//! Records persisted by the stores and carried in the session.

pub mod audit;
pub mod cart;
pub mod order;
pub mod order_item;
pub mod product;

pub use audit::{AuditEvent, AuditKind};
pub use cart::Cart;
pub use order::{Customer, Order};
pub use order_item::OrderItem;
pub use product::{Product, ProductDraft};
