use serde::Deserialize;

use crate::domain::{slugify, Place};
use crate::error::{AtlasError, Result};

/// Incoming place submission: the `Place` shape minus a required `id`.
/// Facet fields are optional and default like the stored record.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSubmission {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(default)]
    pub quiet_level: u8,
    #[serde(default)]
    pub lighting_level: u8,
    #[serde(default)]
    pub outlets_density: u8,
    #[serde(default)]
    pub wifi_quality: u8,
    #[serde(default)]
    pub safety_evening: u8,
    #[serde(default)]
    pub seating_type: Option<String>,
    #[serde(default)]
    pub linger_ok: bool,
    #[serde(default)]
    pub low_sensory: bool,
    #[serde(default)]
    pub outdoor_seating: bool,
    #[serde(default)]
    pub accessible_restroom: bool,
    #[serde(default)]
    pub open_late: bool,
}

/// Required fields, checked in this order. The first missing or empty
/// field names the validation error.
const REQUIRED_FIELDS: [&str; 6] = ["name", "address", "city", "category", "lat", "lng"];

impl PlaceSubmission {
    /// Validates required fields and coordinates, trims text fields, and
    /// derives the id from the name when none was supplied.
    pub fn into_place(self) -> Result<Place> {
        for field in REQUIRED_FIELDS {
            if !self.has_field(field) {
                return Err(AtlasError::MissingField(field.to_string()));
            }
        }

        let (lat, lng) = (self.lat.unwrap_or(f64::NAN), self.lng.unwrap_or(f64::NAN));
        if !lat.is_finite() || !lng.is_finite() {
            return Err(AtlasError::InvalidCoordinates);
        }

        let name = trimmed(self.name);
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => slugify(&name),
        };

        Ok(Place {
            id,
            name,
            address: trimmed(self.address),
            city: trimmed(self.city),
            category: trimmed(self.category),
            lat,
            lng,
            quiet_level: self.quiet_level,
            lighting_level: self.lighting_level,
            outlets_density: self.outlets_density,
            wifi_quality: self.wifi_quality,
            safety_evening: self.safety_evening,
            seating_type: self.seating_type.unwrap_or_else(|| "table".to_string()),
            linger_ok: self.linger_ok,
            low_sensory: self.low_sensory,
            outdoor_seating: self.outdoor_seating,
            accessible_restroom: self.accessible_restroom,
            open_late: self.open_late,
        })
    }

    fn has_field(&self, field: &str) -> bool {
        match field {
            "name" => present(&self.name),
            "address" => present(&self.address),
            "city" => present(&self.city),
            "category" => present(&self.category),
            "lat" => self.lat.is_some(),
            "lng" => self.lng.is_some(),
            _ => true,
        }
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}
