// storefront/src/store/mod.rs

//! Durable storage: the product catalog, the order ledger and the audit log.
//! Each is a trait so the application state can be assembled from file-backed
//! implementations in production and substitutes in tests.

pub mod audit_log;
pub mod order_ledger;
pub mod product_store;

pub use audit_log::{AuditSink, FileAuditLog};
pub use order_ledger::{JsonlOrderLedger, OrderLedger};
pub use product_store::{JsonFileProductStore, ProductStore, Upserted};
