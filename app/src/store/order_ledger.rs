// storefront/src/store/order_ledger.rs

use crate::errors::Result;
use crate::models::Order;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{instrument, warn};

#[async_trait]
pub trait OrderLedger: Send + Sync {
  /// Appends one completed order. Existing records are never rewritten.
  async fn append(&self, order: &Order) -> Result<()>;

  /// Every readable order, oldest first.
  async fn list(&self) -> Result<Vec<Order>>;

  async fn find(&self, order_id: &str) -> Result<Option<Order>> {
    Ok(self.list().await?.into_iter().find(|o| o.id == order_id))
  }
}

/// One JSON object per line.
#[derive(Debug, Clone)]
pub struct JsonlOrderLedger {
  path: PathBuf,
}

impl JsonlOrderLedger {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

#[async_trait]
impl OrderLedger for JsonlOrderLedger {
  #[instrument(name = "order_ledger::append", skip(self, order), fields(order_id = %order.id))]
  async fn append(&self, order: &Order) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    let mut line = serde_json::to_string(order)?;
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

  async fn list(&self) -> Result<Vec<Order>> {
    let contents = match tokio::fs::read_to_string(&self.path).await {
      Ok(contents) => contents,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
      Err(e) => return Err(e.into()),
    };

    let orders = contents
      .lines()
      .enumerate()
      .filter(|(_, line)| !line.trim().is_empty())
      .filter_map(|(idx, line)| match serde_json::from_str::<Order>(line) {
        Ok(order) => Some(order),
        Err(e) => {
          warn!(line = idx + 1, error = %e, "Skipping unreadable order record.");
          None
        }
      })
      .collect();
    Ok(orders)
  }
}
