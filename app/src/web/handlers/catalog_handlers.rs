// storefront/src/web/handlers/catalog_handlers.rs

use crate::models::Product;
use crate::session::Visitor;
use crate::state::AppState;
use crate::web::views::{CatalogView, ProductView};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::instrument;

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
  #[serde(default)]
  pub q: String,
  #[serde(default)]
  pub category: String,
}

/// Case-insensitive name search, then exact category match. Empty criteria
/// match everything.
pub fn filter_products<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
  let needle = query.q.to_lowercase();
  products
    .iter()
    .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
    .filter(|p| query.category.is_empty() || p.category == query.category)
    .collect()
}

/// Sorted, de-duplicated categories across the whole catalog.
pub fn categories(products: &[Product]) -> Vec<String> {
  products
    .iter()
    .filter(|p| !p.category.is_empty())
    .map(|p| p.category.clone())
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

#[instrument(name = "handler::catalog", skip(app_state, visitor))]
pub async fn catalog_handler(
  app_state: web::Data<AppState>,
  query: web::Query<CatalogQuery>,
  visitor: Visitor,
) -> HttpResponse {
  let query = query.into_inner();
  let all_products = app_state.products.list().await;

  HttpResponse::Ok().json(CatalogView {
    products: filter_products(&all_products, &query).into_iter().map(ProductView::from).collect(),
    categories: categories(&all_products),
    search_query: query.q,
    category_filter: query.category,
    cart_total: visitor.cart_total(),
    flashes: visitor.take_flashes(),
  })
}
