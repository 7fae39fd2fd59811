// storefront/src/pipelines/common_steps.rs

use crate::models::{AuditEvent, AuditKind};
use crate::state::AppState;
use tracing::{instrument, warn};

/// Appends an audit event. Audit failures are logged and never fail the
/// calling workflow; the return value reports whether the event was written.
#[instrument(name = "common_step::record_audit", skip_all, fields(kind = %kind))]
pub async fn record_audit(app_state: &AppState, kind: AuditKind, details: impl Into<String>) -> bool {
  let event = AuditEvent::now(kind, details);
  match app_state.audit.record(&event).await {
    Ok(()) => true,
    Err(e) => {
      warn!(error = %e, details = %event.details, "Failed to write audit event.");
      false
    }
  }
}
