use std::collections::HashMap;

use crate::domain::Place;

/// Rectangular geographic filter. All four bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Parses the `bbox` query parameter (`W,S,E,N`). Any non-numeric
    /// component or wrong arity yields `None`: a malformed bbox means
    /// "no bounding box", never an error.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split(',').collect();
        if parts.len() != 4 {
            return None;
        }

        let mut bounds = [0.0_f64; 4];
        for (slot, part) in bounds.iter_mut().zip(&parts) {
            *slot = part.trim().parse().ok()?;
        }

        Some(Self {
            west: bounds[0],
            south: bounds[1],
            east: bounds[2],
            north: bounds[3],
        })
    }

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.south && lat <= self.north && lng >= self.west && lng <= self.east
    }
}

/// Comfort facet filters. Each flag is an independent narrowing; all
/// enabled flags apply as a logical AND, so application order never
/// changes the result set.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FacetFilters {
    pub quiet: bool,
    pub bright: bool,
    pub outlets: bool,
    pub low_sensory: bool,
    pub linger_ok: bool,
    pub open_late: bool,
}

impl FacetFilters {
    /// Reads filter flags from query parameters. Flags are presence-only:
    /// `?quiet&outlets` enables both regardless of any value.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            quiet: params.contains_key("quiet"),
            bright: params.contains_key("bright"),
            outlets: params.contains_key("outlets"),
            low_sensory: params.contains_key("lowSensory"),
            linger_ok: params.contains_key("lingerOk"),
            open_late: params.contains_key("openLate"),
        }
    }

    pub fn matches(&self, place: &Place) -> bool {
        (!self.quiet || place.quiet_level >= 2)
            && (!self.bright || place.lighting_level >= 2)
            && (!self.outlets || place.outlets_density >= 2)
            && (!self.low_sensory || place.low_sensory)
            && (!self.linger_ok || place.linger_ok)
            && (!self.open_late || place.open_late)
    }
}

/// Narrows a candidate list: bounding box first, then facet filters.
pub fn apply(
    places: Vec<Place>,
    bbox: Option<&BoundingBox>,
    filters: &FacetFilters,
) -> Vec<Place> {
    places
        .into_iter()
        .filter(|place| bbox.map_or(true, |b| b.contains(place.lat, place.lng)))
        .filter(|place| filters.matches(place))
        .collect()
}
