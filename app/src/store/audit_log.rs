// storefront/src/store/audit_log.rs

use crate::errors::Result;
use crate::models::AuditEvent;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Append-only sink for audit events. The application never reads events back.
#[async_trait]
pub trait AuditSink: Send + Sync {
  async fn record(&self, event: &AuditEvent) -> Result<()>;
}

/// Plain-text log, one `AuditEvent::to_log_line` per line.
#[derive(Debug, Clone)]
pub struct FileAuditLog {
  path: PathBuf,
}

impl FileAuditLog {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

#[async_trait]
impl AuditSink for FileAuditLog {
  async fn record(&self, event: &AuditEvent) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    let mut line = event.to_log_line();
    line.push('\n');

    let mut file = tokio::fs::OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)
      .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await?;
    Ok(())
  }
}
