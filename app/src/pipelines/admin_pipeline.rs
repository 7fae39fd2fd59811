// storefront/src/pipelines/admin_pipeline.rs

use crate::errors::{AppError, Result};
use crate::models::{AuditKind, ProductDraft};
use crate::pipelines::common_steps;
use crate::pipelines::contexts::{AdminLoginCtxData, ProductForm, ProductSaveCtxData};
use crate::state::AppState;
use crate::store::Upserted;
use shopflow::{ContextData, Pipeline, PipelineControl, PipelineResult, Shopflow};
use std::sync::Arc;
use tracing::{error, event, info, instrument, warn, Level};

pub fn register_admin_login_pipeline(flow: &Arc<Shopflow<AppError>>, _app_state: &AppState) {
  let mut p = Pipeline::<AdminLoginCtxData, AppError>::new(&[
    ("verify_admin_credentials", false, None),
    ("record_login_audit", false, None),
  ]);

  p.on_root("verify_admin_credentials", verify_admin_credentials);

  // Every attempt is audited, successful or not.
  p.on_root("record_login_audit", |ctx_data: ContextData<AdminLoginCtxData>| {
    Box::pin(async move {
      let (app_state, authenticated) = {
        let guard = ctx_data.read();
        (guard.app_state.clone(), guard.authenticated)
      };
      let details = if authenticated { "Success" } else { "Failed attempt" };
      common_steps::record_audit(&app_state, AuditKind::AdminLogin, details).await;
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  flow.register_pipeline(p);
  info!("Admin login pipeline registered.");
}

#[instrument(name = "admin_step::verify_admin_credentials", skip(ctx_data))]
async fn verify_admin_credentials(ctx_data: ContextData<AdminLoginCtxData>) -> Result<PipelineControl> {
  let (admin_auth, username, password) = {
    let guard = ctx_data.read();
    (guard.app_state.admin_auth.clone(), guard.username.clone(), guard.password.clone())
  };

  // Argon2 verification is CPU-bound; keep it off the async workers.
  let authenticated = tokio::task::spawn_blocking(move || admin_auth.authenticate(&username, &password))
    .await
    .map_err(|e| AppError::Internal(format!("Credential check did not complete: {}", e)))?;

  if authenticated {
    event!(Level::INFO, "Admin credentials accepted.");
  } else {
    warn!("Admin credentials rejected.");
  }
  ctx_data.write().authenticated = authenticated;
  Ok(PipelineControl::Continue)
}

/// Checks admin credentials and audits the attempt. Returns whether they
/// were accepted; setting the session flag is left to the caller. A check
/// that errors out is audited as a failed attempt before the error returns.
pub async fn admin_login(app_state: &AppState, username: &str, password: &str) -> Result<bool> {
  let ctx_data = ContextData::new(AdminLoginCtxData {
    app_state: app_state.clone(),
    username: username.to_string(),
    password: password.to_string(),
    authenticated: false,
  });
  if let Err(e) = app_state.flow.run(ctx_data.clone()).await {
    error!(error = %e, "Admin login pipeline failed.");
    common_steps::record_audit(app_state, AuditKind::AdminLogin, "Failed attempt").await;
    return Err(e);
  }
  let authenticated = ctx_data.read().authenticated;
  Ok(authenticated)
}

pub fn register_product_save_pipeline(flow: &Arc<Shopflow<AppError>>, _app_state: &AppState) {
  let mut p = Pipeline::<ProductSaveCtxData, AppError>::new(&[
    ("authorize_admin", false, None),
    ("validate_product_form", false, None),
    ("upsert_product", false, None),
    ("record_product_audit", true, None),
  ]);

  p.on_root("authorize_admin", |ctx_data: ContextData<ProductSaveCtxData>| {
    Box::pin(async move {
      if !ctx_data.read().is_admin {
        warn!("Product save attempted without admin rights.");
        return Ok::<_, AppError>(PipelineControl::Stop);
      }
      Ok(PipelineControl::Continue)
    })
  });

  p.on_root("validate_product_form", |ctx_data: ContextData<ProductSaveCtxData>| {
    Box::pin(async move {
      let parsed = parse_product_form(&ctx_data.read().form);
      match parsed {
        Ok(draft) => {
          ctx_data.write().draft = Some(draft);
          Ok(PipelineControl::Continue)
        }
        Err(e) => {
          warn!(error = %e, "Product form rejected.");
          Err::<PipelineControl, AppError>(e)
        }
      }
    })
  });

  p.on_root("upsert_product", upsert_product);

  p.on_root("record_product_audit", |ctx_data: ContextData<ProductSaveCtxData>| {
    Box::pin(async move {
      let (app_state, outcome) = {
        let guard = ctx_data.read();
        (guard.app_state.clone(), guard.outcome.clone())
      };
      let (kind, details) = match outcome {
        Some(Upserted::Created(product)) => (AuditKind::ProductAdd, format!("Product: {}", product.name)),
        Some(Upserted::Updated(product)) => (AuditKind::ProductUpdate, format!("Product: {}", product.name)),
        Some(Upserted::Missing(id)) => (AuditKind::ProductUpdateFailed, format!("Product: {} not found", id)),
        None => return Ok::<_, AppError>(PipelineControl::Continue),
      };
      common_steps::record_audit(&app_state, kind, details).await;
      Ok(PipelineControl::Continue)
    })
  });

  flow.register_pipeline(p);
  info!("Product save pipeline registered.");
}

#[instrument(name = "admin_step::upsert_product", skip(ctx_data))]
async fn upsert_product(ctx_data: ContextData<ProductSaveCtxData>) -> Result<PipelineControl> {
  let (app_state, id, draft) = {
    let guard = ctx_data.read();
    (guard.app_state.clone(), guard.form.id.clone(), guard.draft.clone())
  };
  let draft = draft.ok_or_else(|| AppError::Internal("Product form was not validated.".to_string()))?;

  let outcome = {
    let _writer = app_state.catalog_writer.lock().await;
    app_state.products.upsert(id.as_deref(), draft).await?
  };
  info!(outcome = ?outcome, "Product upsert finished.");
  ctx_data.write().outcome = Some(outcome);
  Ok(PipelineControl::Continue)
}

/// Price and stock must be non-negative whole numbers; the remaining fields
/// are taken as submitted.
pub fn parse_product_form(form: &ProductForm) -> Result<ProductDraft> {
  let price = form
    .price
    .trim()
    .parse::<u64>()
    .map_err(|_| AppError::Validation("Price must be a non-negative whole number".to_string()))?;
  let stock = form
    .stock
    .trim()
    .parse::<u32>()
    .map_err(|_| AppError::Validation("Stock must be a non-negative whole number".to_string()))?;

  Ok(ProductDraft {
    name: form.name.clone(),
    price,
    stock,
    category: form.category.clone(),
    image: form.image.clone(),
  })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSaveOutcome {
  Unauthorized,
  Saved(Upserted),
}

/// Runs the product save pipeline. Successful saves are audited by the
/// pipeline itself; unauthorized and failed saves are audited here as
/// `PRODUCT_UPDATE_FAILED`.
#[instrument(name = "admin::save_product", skip(app_state, form), fields(product_id = ?form.id))]
pub async fn save_product(app_state: &AppState, is_admin: bool, form: ProductForm) -> Result<ProductSaveOutcome> {
  let label = form.id.clone().unwrap_or_else(|| form.name.clone());
  let ctx_data = ContextData::new(ProductSaveCtxData {
    app_state: app_state.clone(),
    is_admin,
    form,
    draft: None,
    outcome: None,
  });

  let result = app_state.flow.run(ctx_data.clone()).await;
  let outcome = match result {
    Ok(PipelineResult::Stopped) => Ok(ProductSaveOutcome::Unauthorized),
    Ok(PipelineResult::Completed) => {
      let outcome = ctx_data.read().outcome.clone();
      outcome
        .map(ProductSaveOutcome::Saved)
        .ok_or_else(|| AppError::Internal("Product save finished without an outcome.".to_string()))
    }
    Err(e) => Err(e),
  };

  let failure = match &outcome {
    Ok(ProductSaveOutcome::Unauthorized) => Some(format!("Product: {}, Reason: not authorized", label)),
    Err(e) => Some(format!("Product: {}, Reason: {}", label, e.user_message())),
    Ok(ProductSaveOutcome::Saved(_)) => None,
  };
  if let Some(details) = failure {
    common_steps::record_audit(app_state, AuditKind::ProductUpdateFailed, details).await;
  }
  outcome
}

#[cfg(test)]
mod tests {
  use super::*;

  fn form(price: &str, stock: &str) -> ProductForm {
    ProductForm {
      id: None,
      name: "Webcam".to_string(),
      price: price.to_string(),
      stock: stock.to_string(),
      category: "Video".to_string(),
      image: String::new(),
    }
  }

  #[test]
  fn product_form_parses_whole_numbers() {
    let draft = parse_product_form(&form(" 2599 ", "7")).unwrap();
    assert_eq!(draft.price, 2599);
    assert_eq!(draft.stock, 7);
    assert_eq!(draft.name, "Webcam");
  }

  #[test]
  fn product_form_rejects_negative_and_fractional_values() {
    assert!(matches!(parse_product_form(&form("-1", "7")), Err(AppError::Validation(_))));
    assert!(matches!(parse_product_form(&form("12.50", "7")), Err(AppError::Validation(_))));
    assert!(matches!(parse_product_form(&form("100", "")), Err(AppError::Validation(_))));
  }
}
