use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::Place;
use crate::error::Result;
use crate::query::{self, BoundingBox, FacetFilters};
use crate::storage::PlaceStore;

/// Baseline dataset bundled into the binary.
const BASELINE: &str = include_str!("../../data/places.seattle.json");

/// Local file backend: a bundled baseline dataset plus an overlay file of
/// user-submitted places. The overlay is rewritten wholesale on each
/// upsert as pretty-printed JSON.
pub struct FileStore {
    overlay_path: PathBuf,
}

impl FileStore {
    pub fn new(overlay_path: PathBuf) -> Self {
        Self { overlay_path }
    }

    fn baseline(&self) -> Result<Vec<Place>> {
        let places: Vec<Place> = serde_json::from_str(BASELINE)?;
        Ok(places)
    }

    /// Reads the overlay file. Unreadable or malformed overlays are
    /// treated as absent so the read path stays available in restricted
    /// environments.
    fn read_overlay(&self) -> Vec<Place> {
        let raw = match fs::read_to_string(&self.overlay_path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.overlay_path.display(), "No readable overlay file: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %self.overlay_path.display(), "Ignoring malformed overlay: {e}");
                Vec::new()
            }
        }
    }

    fn write_overlay(&self, entries: &[Place]) -> Result<()> {
        if let Some(parent) = self.overlay_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.overlay_path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }

    /// Baseline and overlay combined. Overlay entries shadow baseline
    /// entries with the same id so each id appears once.
    fn combined(&self) -> Result<Vec<Place>> {
        let mut places: Vec<Place> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for place in self.baseline()?.into_iter().chain(self.read_overlay()) {
            match index.get(&place.id) {
                Some(&at) => places[at] = place,
                None => {
                    index.insert(place.id.clone(), places.len());
                    places.push(place);
                }
            }
        }

        Ok(places)
    }
}

#[async_trait]
impl PlaceStore for FileStore {
    async fn list(&self) -> Result<Vec<Place>> {
        self.combined()
    }

    async fn query(
        &self,
        bbox: Option<&BoundingBox>,
        filters: &FacetFilters,
    ) -> Result<Vec<Place>> {
        Ok(query::apply(self.combined()?, bbox, filters))
    }

    async fn upsert(&self, place: Place) -> Result<String> {
        let id = place.id.clone();
        let mut entries = self.read_overlay();

        match entries.iter_mut().find(|entry| entry.id == id) {
            Some(existing) => *existing = place,
            None => entries.push(place),
        }

        self.write_overlay(&entries)?;
        debug!(id = %id, "Upserted place into overlay");
        Ok(id)
    }
}
