// storefront/src/web/handlers/admin_handlers.rs

use crate::errors::AppError;
use crate::models::AuditKind;
use crate::pipelines::admin_pipeline::{self, ProductSaveOutcome};
use crate::pipelines::common_steps;
use crate::pipelines::contexts::ProductForm;
use crate::session::{FlashLevel, Visitor};
use crate::state::AppState;
use crate::store::Upserted;
use crate::web::views::{see_other, AdminLoginView, AdminProductsView, ProductView};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{error, info, instrument, warn};

const LOGIN_PATH: &str = "/admin/login";
const PRODUCTS_PATH: &str = "/admin/products";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
  #[serde(default)]
  pub username: String,
  #[serde(default)]
  pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductFormFields {
  #[serde(default)]
  pub id: String,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub price: String,
  #[serde(default)]
  pub stock: String,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub image: String,
}

impl From<ProductFormFields> for ProductForm {
  fn from(fields: ProductFormFields) -> Self {
    let id = fields.id.trim();
    Self {
      id: (!id.is_empty()).then(|| id.to_string()),
      name: fields.name,
      price: fields.price,
      stock: fields.stock,
      category: fields.category,
      image: fields.image,
    }
  }
}

fn render_login(visitor: &Visitor) -> HttpResponse {
  HttpResponse::Ok().json(AdminLoginView {
    cart_total: visitor.cart_total(),
    flashes: visitor.take_flashes(),
  })
}

#[instrument(name = "handler::admin_login_page", skip(visitor))]
pub async fn login_page_handler(visitor: Visitor) -> HttpResponse {
  render_login(&visitor)
}

#[instrument(name = "handler::admin_login_submit", skip_all, fields(username = %form.username))]
pub async fn login_submit_handler(
  app_state: web::Data<AppState>,
  form: web::Form<LoginForm>,
  visitor: Visitor,
) -> HttpResponse {
  match admin_pipeline::admin_login(&app_state, &form.username, &form.password).await {
    Ok(true) => match visitor.grant_admin() {
      Ok(()) => {
        info!("Admin logged in.");
        visitor.flash(FlashLevel::Success, "Login successful");
        see_other(PRODUCTS_PATH)
      }
      Err(e) => {
        error!(error = %e, "Could not store admin flag in session.");
        visitor.flash(FlashLevel::Error, "Login failed, please try again");
        render_login(&visitor)
      }
    },
    Ok(false) => {
      visitor.flash(FlashLevel::Error, "Invalid credentials");
      render_login(&visitor)
    }
    Err(e) => {
      error!(error = %e, "Admin login workflow failed.");
      visitor.flash(FlashLevel::Error, "Invalid credentials");
      render_login(&visitor)
    }
  }
}

#[instrument(name = "handler::admin_products", skip_all)]
pub async fn admin_products_handler(app_state: web::Data<AppState>, visitor: Visitor) -> HttpResponse {
  if !visitor.is_admin() {
    return see_other(LOGIN_PATH);
  }
  let products = app_state.products.list().await;

  HttpResponse::Ok().json(AdminProductsView {
    products: products.iter().map(ProductView::from).collect(),
    cart_total: visitor.cart_total(),
    flashes: visitor.take_flashes(),
  })
}

#[instrument(name = "handler::save_product", skip_all, fields(product_id = %form.id))]
pub async fn save_product_handler(
  app_state: web::Data<AppState>,
  form: web::Form<ProductFormFields>,
  visitor: Visitor,
) -> HttpResponse {
  let outcome = admin_pipeline::save_product(&app_state, visitor.is_admin(), form.into_inner().into()).await;

  match outcome {
    Ok(ProductSaveOutcome::Unauthorized) => return see_other(LOGIN_PATH),
    Ok(ProductSaveOutcome::Saved(Upserted::Created(_) | Upserted::Updated(_))) => {
      visitor.flash(FlashLevel::Success, "Product saved successfully");
    }
    Ok(ProductSaveOutcome::Saved(Upserted::Missing(id))) => {
      warn!(%id, "Update requested for an unknown product.");
      visitor.flash(FlashLevel::Error, format!("Product {} not found", id));
    }
    Err(e @ AppError::Validation(_)) => visitor.flash(FlashLevel::Error, e.user_message()),
    Err(e) => {
      error!(error = %e, "Product save failed.");
      visitor.flash(FlashLevel::Error, "Error saving product");
    }
  }
  see_other(PRODUCTS_PATH)
}

#[instrument(name = "handler::admin_logout", skip_all)]
pub async fn logout_handler(app_state: web::Data<AppState>, visitor: Visitor) -> HttpResponse {
  visitor.revoke_admin();
  common_steps::record_audit(&app_state, AuditKind::AdminLogout, "Success").await;
  visitor.flash(FlashLevel::Info, "Logged out successfully");
  see_other("/")
}
