use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::db::DatabaseManager;
use crate::domain::Place;
use crate::error::{AtlasError, Result};
use crate::query::{BoundingBox, FacetFilters};
use crate::storage::PlaceStore;

/// Hosted-backend result cap.
const LIMIT: usize = 200;

/// Hosted backend using Turso/libSQL. Filter predicates are pushed into
/// SQL; the full record travels as a JSON column alongside the
/// filterable ones.
pub struct DatabaseStore {
    db: Arc<DatabaseManager>,
}

impl DatabaseStore {
    pub async fn connect() -> Result<Self> {
        let db_manager = DatabaseManager::new().await?;
        db_manager.run_migrations().await?;

        Ok(Self {
            db: Arc::new(db_manager),
        })
    }

    fn place_to_row_data(place: &Place) -> Result<String> {
        serde_json::to_string(place).map_err(|e| AtlasError::Database {
            message: format!("Failed to serialize place: {e}"),
        })
    }

    fn row_data_to_place(data: &str) -> Result<Place> {
        serde_json::from_str(data).map_err(|e| AtlasError::Database {
            message: format!("Failed to deserialize place: {e}"),
        })
    }

    async fn select(&self, sql: &str, params: Vec<libsql::Value>) -> Result<Vec<Place>> {
        let conn = self.db.get_connection().await?;

        let mut rows = conn
            .query(sql, params)
            .await
            .map_err(|e| AtlasError::Database {
                message: format!("Failed to query places: {e}"),
            })?;

        let mut places = Vec::new();
        while let Some(row) = rows.next().await.map_err(|e| AtlasError::Database {
            message: format!("Failed to read row: {e}"),
        })? {
            let data: String = row.get(0).map_err(|e| AtlasError::Database {
                message: format!("Failed to get place data: {e}"),
            })?;
            places.push(Self::row_data_to_place(&data)?);
        }

        Ok(places)
    }
}

#[async_trait]
impl PlaceStore for DatabaseStore {
    async fn list(&self) -> Result<Vec<Place>> {
        self.query(None, &FacetFilters::default()).await
    }

    async fn query(
        &self,
        bbox: Option<&BoundingBox>,
        filters: &FacetFilters,
    ) -> Result<Vec<Place>> {
        let mut sql = String::from("SELECT data FROM places WHERE 1 = 1");
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(bbox) = bbox {
            sql.push_str(" AND lat >= ? AND lat <= ? AND lng >= ? AND lng <= ?");
            params.push(bbox.south.into());
            params.push(bbox.north.into());
            params.push(bbox.west.into());
            params.push(bbox.east.into());
        }

        if filters.quiet {
            sql.push_str(" AND quiet_level >= 2");
        }
        if filters.bright {
            sql.push_str(" AND lighting_level >= 2");
        }
        if filters.outlets {
            sql.push_str(" AND outlets_density >= 2");
        }
        if filters.low_sensory {
            sql.push_str(" AND low_sensory = 1");
        }
        if filters.linger_ok {
            sql.push_str(" AND linger_ok = 1");
        }
        if filters.open_late {
            sql.push_str(" AND open_late = 1");
        }

        sql.push_str(&format!(" LIMIT {LIMIT}"));

        debug!(sql = %sql, "Querying hosted places table");
        self.select(&sql, params).await
    }

    async fn upsert(&self, place: Place) -> Result<String> {
        let conn = self.db.get_connection().await?;
        let data = Self::place_to_row_data(&place)?;

        // Explicit ON CONFLICT(id) DO UPDATE preserves created_at
        conn.execute(
            "INSERT INTO places (id, lat, lng, quiet_level, lighting_level, outlets_density,
                                 low_sensory, linger_ok, open_late, data, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                     COALESCE((SELECT created_at FROM places WHERE id = ?1), datetime('now')),
                     datetime('now'))
             ON CONFLICT(id) DO UPDATE SET
               lat = excluded.lat,
               lng = excluded.lng,
               quiet_level = excluded.quiet_level,
               lighting_level = excluded.lighting_level,
               outlets_density = excluded.outlets_density,
               low_sensory = excluded.low_sensory,
               linger_ok = excluded.linger_ok,
               open_late = excluded.open_late,
               data = excluded.data,
               updated_at = excluded.updated_at",
            libsql::params![
                place.id.as_str(),
                place.lat,
                place.lng,
                place.quiet_level as i64,
                place.lighting_level as i64,
                place.outlets_density as i64,
                place.low_sensory as i64,
                place.linger_ok as i64,
                place.open_late as i64,
                data
            ],
        )
        .await
        .map_err(|e| AtlasError::Database {
            message: format!("Failed to upsert place: {e}"),
        })?;

        Ok(place.id)
    }
}
