// storefront/tests/workflow_tests.rs

mod common;

use common::*;
use std::sync::Arc;
use storefront::errors::AppError;
use storefront::models::Customer;
use storefront::pipelines::admin_pipeline::{self, ProductSaveOutcome};
use storefront::pipelines::cart_pipeline::{self, CartAddOutcome};
use storefront::pipelines::checkout_pipeline;
use storefront::pipelines::contexts::ProductForm;
use storefront::store::Upserted;

fn product_form(id: Option<&str>, name: &str, price: &str, stock: &str) -> ProductForm {
  ProductForm {
    id: id.map(str::to_string),
    name: name.to_string(),
    price: price.to_string(),
    stock: stock.to_string(),
    category: "Peripherals".to_string(),
    image: "keyboard-v2.jpg".to_string(),
  }
}

#[tokio::test]
async fn adding_three_to_an_empty_cart_counts_three_items() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);

  let outcome = cart_pipeline::add_to_cart(&state, cart_of(&[]), "P-001", 3).await.unwrap();

  let CartAddOutcome::Added { cart, product_name, .. } = outcome else {
    panic!("expected the item to be added");
  };
  assert_eq!(cart.total(), 3);
  assert_eq!(product_name, "USB Keyboard");
  let audit = audit_lines(dir.path());
  assert_eq!(audit.len(), 1);
  assert!(audit[0].ends_with("ADD_TO_CART - Product: USB Keyboard, Qty: 3"));
}

#[tokio::test]
async fn unknown_products_are_added_under_a_placeholder_name() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);

  let outcome = cart_pipeline::add_to_cart(&state, cart_of(&[]), "P-777", 1).await.unwrap();

  assert!(matches!(outcome, CartAddOutcome::Added { ref product_name, .. } if product_name == "Unknown Product"));
  assert!(audit_lines(dir.path())[0].ends_with("Product: Unknown Product, Qty: 1"));
}

#[tokio::test]
async fn non_positive_quantities_are_ignored_without_audit() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);

  for qty in [0, -4] {
    let outcome = cart_pipeline::add_to_cart(&state, cart_of(&[("P-002", 1)]), "P-002", qty).await.unwrap();
    assert_eq!(outcome, CartAddOutcome::Ignored);
  }
  assert!(audit_lines(dir.path()).is_empty());
}

#[tokio::test]
async fn quantities_beyond_the_cart_range_are_rejected_without_audit() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);

  let err = cart_pipeline::add_to_cart(&state, cart_of(&[("P-002", 1)]), "P-002", 99_999_999_999)
    .await
    .unwrap_err();

  assert!(matches!(err, AppError::Validation(ref m) if m == cart_pipeline::QUANTITY_TOO_LARGE_MESSAGE));
  assert!(audit_lines(dir.path()).is_empty());
}

#[tokio::test]
async fn checkout_beyond_stock_is_rejected_and_stock_is_unchanged() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);

  let err = checkout_pipeline::place_order(&state, cart_of(&[("P-001", 13)]), customer())
    .await
    .unwrap_err();

  assert!(matches!(err, AppError::InsufficientStock { ref product } if product == "USB Keyboard"));
  assert_eq!(stock_of(&state, "P-001").await, 12);
  assert!(ledger_lines(dir.path()).is_empty());
}

#[tokio::test]
async fn successful_checkout_decrements_stock_records_order_and_empties_cart() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);

  let receipt = checkout_pipeline::place_order(&state, cart_of(&[("P-001", 2), ("P-003", 5)]), customer())
    .await
    .unwrap();

  assert_eq!(stock_of(&state, "P-001").await, 10);
  assert_eq!(stock_of(&state, "P-003").await, 25);
  assert_eq!(stock_of(&state, "P-002").await, 20);
  assert!(receipt.cart.is_empty());

  let ledger = ledger_lines(dir.path());
  assert_eq!(ledger.len(), 1);
  let recorded = state.orders.find(&receipt.order.id).await.unwrap().expect("order should be in the ledger");
  assert_eq!(recorded.items.iter().map(|i| i.total).sum::<u64>(), recorded.total);
  assert_eq!(recorded.total, 2 * 799 + 5 * 199);
  assert_eq!(recorded.id.len(), 8);

  let raw: serde_json::Value = serde_json::from_str(&ledger[0]).unwrap();
  assert!(raw.get("date").is_some());

  let audit = audit_lines(dir.path());
  assert!(audit
    .last()
    .unwrap()
    .ends_with(&format!("CHECKOUT - Order: {}, Total: $25.93", receipt.order.id)));
}

#[tokio::test]
async fn order_snapshot_survives_later_product_edits() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);

  let receipt = checkout_pipeline::place_order(&state, cart_of(&[("P-002", 1)]), customer())
    .await
    .unwrap();
  let saved = admin_pipeline::save_product(&state, true, product_form(Some("P-002"), "Gaming Mouse", "4999", "3"))
    .await
    .unwrap();
  assert!(matches!(saved, ProductSaveOutcome::Saved(Upserted::Updated(_))));

  let recorded = state.orders.find(&receipt.order.id).await.unwrap().unwrap();
  assert_eq!(recorded.items[0].name, "USB Mouse");
  assert_eq!(recorded.items[0].price, 399);
}

#[tokio::test]
async fn failing_ledger_restores_stock() {
  let dir = tempfile::tempdir().unwrap();
  let state = state_with_ledger(&dir, Arc::new(FailingLedger));

  let err = checkout_pipeline::place_order(&state, cart_of(&[("P-001", 4)]), customer())
    .await
    .unwrap_err();

  assert!(matches!(err, AppError::Storage(_)));
  assert_eq!(stock_of(&state, "P-001").await, 12);
  assert!(audit_lines(dir.path()).is_empty());
}

#[tokio::test]
async fn overflowing_order_totals_are_rejected_before_stock_moves() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);
  let max_price = u64::MAX.to_string();
  admin_pipeline::save_product(&state, true, product_form(None, "Gold Mouse", &max_price, "5"))
    .await
    .unwrap();
  admin_pipeline::save_product(&state, true, product_form(None, "Gold Pad", &max_price, "5"))
    .await
    .unwrap();

  let doubled = checkout_pipeline::place_order(&state, cart_of(&[("P-004", 2)]), customer())
    .await
    .unwrap_err();
  assert!(matches!(doubled, AppError::Validation(ref m) if m == checkout_pipeline::ORDER_TOO_LARGE_MESSAGE));

  let summed = checkout_pipeline::place_order(&state, cart_of(&[("P-004", 1), ("P-005", 1)]), customer())
    .await
    .unwrap_err();
  assert!(matches!(summed, AppError::Validation(_)));

  assert_eq!(stock_of(&state, "P-004").await, 5);
  assert_eq!(stock_of(&state, "P-005").await, 5);
  assert!(ledger_lines(dir.path()).is_empty());
}

#[tokio::test]
async fn checkout_requires_every_customer_field() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);
  let blank_address = Customer {
    address: "   ".to_string(),
    ..customer()
  };

  let err = checkout_pipeline::place_order(&state, cart_of(&[("P-003", 1)]), blank_address)
    .await
    .unwrap_err();

  assert!(matches!(err, AppError::Validation(_)));
  assert_eq!(stock_of(&state, "P-003").await, 30);
}

#[tokio::test]
async fn checkout_rejects_empty_and_unknown_carts() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);

  let empty = checkout_pipeline::place_order(&state, cart_of(&[]), customer()).await.unwrap_err();
  assert!(matches!(empty, AppError::EmptyCart));

  let unknown = checkout_pipeline::place_order(&state, cart_of(&[("P-404", 1)]), customer())
    .await
    .unwrap_err();
  assert_eq!(unknown.user_message(), "Not enough stock for unknown product");
}

#[tokio::test]
async fn concurrent_checkouts_cannot_oversell() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);

  let (first, second) = tokio::join!(
    checkout_pipeline::place_order(&state, cart_of(&[("P-001", 8)]), customer()),
    checkout_pipeline::place_order(&state, cart_of(&[("P-001", 8)]), customer()),
  );

  assert_eq!([first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(), 1);
  assert_eq!(stock_of(&state, "P-001").await, 4);
  assert_eq!(ledger_lines(dir.path()).len(), 1);
}

#[tokio::test]
async fn wrong_admin_credentials_are_refused_and_audited() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);

  assert!(!admin_pipeline::admin_login(&state, "admin", "letmein").await.unwrap());
  assert!(admin_pipeline::admin_login(&state, "admin", "12345").await.unwrap());

  let audit = audit_lines(dir.path());
  assert!(audit[0].ends_with("ADMIN_LOGIN - Failed attempt"));
  assert!(audit[1].ends_with("ADMIN_LOGIN - Success"));
}

#[tokio::test]
async fn broken_credential_checks_fail_the_login_and_are_audited() {
  let dir = tempfile::tempdir().unwrap();
  let state = state_with_admin(&dir, Arc::new(PanickingAdmin));

  let result = admin_pipeline::admin_login(&state, "admin", "12345").await;

  assert!(result.is_err());
  let audit = audit_lines(dir.path());
  assert_eq!(audit.len(), 1);
  assert!(audit[0].ends_with("ADMIN_LOGIN - Failed attempt"));
}

#[tokio::test]
async fn product_saves_require_admin_and_audit_each_outcome() {
  let dir = tempfile::tempdir().unwrap();
  let state = test_state(&dir);

  let refused = admin_pipeline::save_product(&state, false, product_form(None, "Webcam", "2599", "5"))
    .await
    .unwrap();
  assert_eq!(refused, ProductSaveOutcome::Unauthorized);
  assert_eq!(state.products.list().await.len(), 3);

  let created = admin_pipeline::save_product(&state, true, product_form(None, "Webcam", "2599", "5"))
    .await
    .unwrap();
  assert!(matches!(created, ProductSaveOutcome::Saved(Upserted::Created(ref p)) if p.id == "P-004"));

  let missing = admin_pipeline::save_product(&state, true, product_form(Some("P-900"), "Ghost", "1", "1"))
    .await
    .unwrap();
  assert_eq!(missing, ProductSaveOutcome::Saved(Upserted::Missing("P-900".to_string())));

  let invalid = admin_pipeline::save_product(&state, true, product_form(None, "Bad", "-3", "1")).await;
  assert!(matches!(invalid, Err(AppError::Validation(_))));

  let audit = audit_lines(dir.path());
  assert_eq!(audit.len(), 4);
  assert!(audit[0].ends_with("PRODUCT_UPDATE_FAILED - Product: Webcam, Reason: not authorized"));
  assert!(audit[1].ends_with("PRODUCT_ADD - Product: Webcam"));
  assert!(audit[2].ends_with("PRODUCT_UPDATE_FAILED - Product: P-900 not found"));
  assert!(audit[3].ends_with("PRODUCT_UPDATE_FAILED - Product: Bad, Reason: Price must be a non-negative whole number"));
}
