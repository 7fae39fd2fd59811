// storefront/src/store/product_store.rs

use crate::errors::Result;
use crate::models::product::{next_product_id, Product, ProductDraft};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// Result of `ProductStore::upsert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted {
  Created(Product),
  Updated(Product),
  /// An id was given but no product carries it. Nothing was written.
  Missing(String),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
  /// Every product. Unreadable data yields an empty catalog.
  async fn list(&self) -> Vec<Product>;

  async fn find(&self, id: &str) -> Option<Product> {
    self.list().await.into_iter().find(|p| p.id == id)
  }

  /// Creates a product with the next sequential id when `id` is `None`,
  /// otherwise overwrites the editable fields of that product.
  async fn upsert(&self, id: Option<&str>, draft: ProductDraft) -> Result<Upserted>;

  /// Rewrites the whole catalog.
  async fn replace_all(&self, products: &[Product]) -> Result<()>;
}

/// Catalog kept as a pretty-printed JSON array, rewritten in full on every
/// mutation. Seeded with the default catalog when the file does not exist.
///
/// Callers serialise writers through `AppState::catalog_writer`; the store
/// itself does no locking.
#[derive(Debug, Clone)]
pub struct JsonFileProductStore {
  path: PathBuf,
}

impl JsonFileProductStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  async fn load(&self) -> Result<Vec<Product>> {
    match tokio::fs::read(&self.path).await {
      Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
      Err(e) if e.kind() == ErrorKind::NotFound => {
        let seeded = Product::default_catalog();
        match self.write_all(&seeded).await {
          Ok(()) => info!(path = %self.path.display(), "Seeded product catalog with defaults."),
          Err(e) => warn!(path = %self.path.display(), error = %e, "Could not persist seeded catalog."),
        }
        Ok(seeded)
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn write_all(&self, products: &[Product]) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_vec_pretty(products)?;
    let staging = self.path.with_extension("json.tmp");
    tokio::fs::write(&staging, json).await?;
    tokio::fs::rename(&staging, &self.path).await?;
    Ok(())
  }
}

#[async_trait]
impl ProductStore for JsonFileProductStore {
  #[instrument(name = "product_store::list", skip(self))]
  async fn list(&self) -> Vec<Product> {
    match self.load().await {
      Ok(products) => products,
      Err(e) => {
        error!(path = %self.path.display(), error = %e, "Failed to load products, serving an empty catalog.");
        Vec::new()
      }
    }
  }

  #[instrument(name = "product_store::upsert", skip(self, draft), fields(product_name = %draft.name))]
  async fn upsert(&self, id: Option<&str>, draft: ProductDraft) -> Result<Upserted> {
    // A corrupt file is reported rather than overwritten with a one-product catalog.
    let mut products = self.load().await?;

    let outcome = match id {
      None => {
        let product = Product::from_draft(next_product_id(&products), draft);
        products.push(product.clone());
        Upserted::Created(product)
      }
      Some(id) => match products.iter_mut().find(|p| p.id == id) {
        Some(existing) => {
          existing.apply(draft);
          Upserted::Updated(existing.clone())
        }
        None => return Ok(Upserted::Missing(id.to_string())),
      },
    };

    self.write_all(&products).await?;
    Ok(outcome)
  }

  #[instrument(name = "product_store::replace_all", skip(self, products), fields(count = products.len()))]
  async fn replace_all(&self, products: &[Product]) -> Result<()> {
    self.write_all(products).await
  }
}
