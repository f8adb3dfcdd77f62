use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::domain::Place;
use crate::error::Result;
use crate::query::{BoundingBox, FacetFilters};

mod file;
#[cfg(feature = "db")]
mod database;

pub use file::FileStore;
#[cfg(feature = "db")]
pub use database::DatabaseStore;

/// Storage abstraction over the two interchangeable place backends: the
/// hosted libSQL database and the local JSON file fallback.
#[async_trait]
pub trait PlaceStore: Send + Sync {
    /// All places known to the backend.
    async fn list(&self) -> Result<Vec<Place>>;

    /// Places narrowed by an optional bounding box and facet filters.
    /// The hosted backend pushes predicates into SQL; the file backend
    /// filters in process.
    async fn query(
        &self,
        bbox: Option<&BoundingBox>,
        filters: &FacetFilters,
    ) -> Result<Vec<Place>>;

    /// Inserts or replaces a place keyed on its id. Returns the id.
    async fn upsert(&self, place: Place) -> Result<String>;
}

/// Selects the backend for this request. The hosted database wins when
/// its connection settings are present in the environment; otherwise the
/// file backend serves. Checked per request, not at process start, so a
/// deployment can gain or lose the hosted store without a restart.
pub async fn active_store(config: &Config) -> Result<Arc<dyn PlaceStore>> {
    #[cfg(feature = "db")]
    {
        if crate::db::hosted_config_present() {
            let store = DatabaseStore::connect().await?;
            return Ok(Arc::new(store));
        }
    }

    Ok(Arc::new(FileStore::new(config.data.overlay_path.clone())))
}
