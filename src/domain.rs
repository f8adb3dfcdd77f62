use serde::{Deserialize, Serialize};

/// A third place: a public or semi-public spot suited to lingering.
///
/// Flat single-table record. Graded facets use a 0-3 scale; `seating_type`
/// is an enumerated string (`table`, `bar`, `soft`, `bench`) kept as text
/// so unrecognized values survive a round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub category: String,
    pub lat: f64,
    pub lng: f64,
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
    #[serde(default = "default_seating")]
    pub seating_type: String,
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

fn default_seating() -> String {
    "table".to_string()
}

/// Derives a stable slug from a place name: lowercased, runs of
/// non-alphanumeric characters collapsed to single hyphens, leading and
/// trailing hyphens trimmed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("Discovery Park Library"), "discovery-park-library");
        assert_eq!(slugify("  Ada's Technical Books  "), "ada-s-technical-books");
        assert_eq!(slugify("Caffe -- Vita!"), "caffe-vita");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn place_deserializes_with_facet_defaults() {
        let place: Place = serde_json::from_str(
            r#"{
                "id": "spot",
                "name": "Spot",
                "address": "1 Main St",
                "city": "Seattle",
                "category": "cafe",
                "lat": 47.6,
                "lng": -122.3
            }"#,
        )
        .unwrap();

        assert_eq!(place.quiet_level, 0);
        assert_eq!(place.seating_type, "table");
        assert!(!place.open_late);
    }
}
