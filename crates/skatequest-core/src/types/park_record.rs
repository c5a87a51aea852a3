//! The flat skatepark record written to the output artifact.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// A single skatepark, normalized from an OpenStreetMap element.
///
/// Records are created once per run and never updated. The web map reads
/// them from `parks.json`, which is why the category is written under the
/// `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkRecord {
    /// Stable identifier, `osm-{kind}-{id}`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Record category, always [`ParkRecord::CATEGORY`].
    #[serde(rename = "type")]
    pub category: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl ParkRecord {
    /// Category tag carried by every record this collector emits.
    pub const CATEGORY: &'static str = "park";

    /// Creates a new record at the given coordinates.
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: Self::CATEGORY.to_owned(),
            lat: coordinates.lat,
            lng: coordinates.lon,
        }
    }

    /// Derives the record identifier from an element kind and its numeric id.
    pub fn osm_id(kind: impl fmt::Display, id: u64) -> String {
        format!("osm-{kind}-{id}")
    }

    /// Name used when the source element carries no `name` tag.
    pub fn placeholder_name(region: &str) -> String {
        format!("Skatepark in {region}")
    }
}
