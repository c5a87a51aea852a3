//! Overpass JSON output model.
//!
//! Only the fields the collector reads are modeled; everything else in the
//! payload (`version`, `generator`, `osm3s`, way node lists, ...) is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use skatequest_core::Coordinates;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Top-level Overpass response with `[out:json]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverpassResponse {
    /// Matched elements in server order.
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Server remark, set when a query ran out of time or memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// OpenStreetMap element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ElementKind {
    /// A single point.
    Node,
    /// An ordered list of nodes, open or closed.
    Way,
    /// A group of members.
    Relation,
}

/// Centroid computed by the server for `out center`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Center {
    /// Centroid latitude.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Centroid longitude.
    #[serde(default)]
    pub lon: Option<f64>,
}

/// One matched OpenStreetMap element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Element type.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Numeric id, unique per element type.
    pub id: u64,
    /// OSM tags.
    #[serde(default)]
    pub tags: HashMap<String, String>,
    /// Latitude, present on nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude, present on nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    /// Centroid, present on ways and relations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Center>,
}

impl Element {
    /// Creates a node element at the given position.
    pub fn node(id: u64, lat: f64, lon: f64) -> Self {
        Self {
            kind: ElementKind::Node,
            id,
            tags: HashMap::new(),
            lat: Some(lat),
            lon: Some(lon),
            center: None,
        }
    }

    /// Creates a way element with a server-computed centroid.
    pub fn way(id: u64, center: Option<Center>) -> Self {
        Self {
            kind: ElementKind::Way,
            id,
            tags: HashMap::new(),
            lat: None,
            lon: None,
            center,
        }
    }

    /// Adds a tag to this element.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Returns the `name` tag, if any.
    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }

    /// Resolves the element position.
    ///
    /// Nodes use their own `lat`/`lon`; ways and relations use the centroid.
    /// Returns `None` when either half of the chosen pair is missing.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self.kind {
            ElementKind::Node => Coordinates::from_parts(self.lat, self.lon),
            ElementKind::Way | ElementKind::Relation => self
                .center
                .and_then(|center| Coordinates::from_parts(center.lat, center.lon)),
        }
    }
}

impl Center {
    /// Creates a centroid at the given position.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": 0.6,
        "generator": "Overpass API 0.7.62",
        "osm3s": { "timestamp_osm_base": "2024-05-01T00:00:00Z" },
        "elements": [
            {
                "type": "node",
                "id": 1001,
                "lat": 45.5231,
                "lon": -122.6765,
                "tags": { "leisure": "skatepark", "name": "Burnside Skatepark" }
            },
            {
                "type": "way",
                "id": 2002,
                "center": { "lat": 45.49, "lon": -122.63 },
                "nodes": [1, 2, 3, 1],
                "tags": { "leisure": "pitch", "sport": "skateboard" }
            },
            {
                "type": "relation",
                "id": 3003
            }
        ]
    }"#;

    #[test]
    fn test_decodes_sample_payload() {
        let response: OverpassResponse = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(response.elements.len(), 3);
        assert_eq!(response.remark, None);

        let node = &response.elements[0];
        assert_eq!(node.kind, ElementKind::Node);
        assert_eq!(node.name(), Some("Burnside Skatepark"));

        let way = &response.elements[1];
        assert_eq!(way.kind, ElementKind::Way);
        assert_eq!(way.name(), None);
        assert_eq!(way.center, Some(Center::new(45.49, -122.63)));

        let relation = &response.elements[2];
        assert!(relation.tags.is_empty());
        assert_eq!(relation.center, None);
    }

    #[test]
    fn test_missing_elements_defaults_to_empty() {
        let response: OverpassResponse =
            serde_json::from_str(r#"{"remark": "runtime error: Query timed out"}"#).unwrap();

        assert!(response.elements.is_empty());
        assert_eq!(
            response.remark.as_deref(),
            Some("runtime error: Query timed out")
        );
    }

    #[test]
    fn test_node_coordinates() {
        let node = Element::node(1, 40.0, -105.0);
        assert_eq!(node.coordinates(), Some(Coordinates::new(40.0, -105.0)));

        let mut partial = Element::node(2, 40.0, -105.0);
        partial.lon = None;
        assert_eq!(partial.coordinates(), None);
    }

    #[test]
    fn test_node_ignores_center() {
        let mut node = Element::node(1, 0.0, 0.0);
        node.lat = None;
        node.center = Some(Center::new(1.0, 1.0));
        assert_eq!(node.coordinates(), None);
    }

    #[test]
    fn test_way_coordinates_use_center() {
        let way = Element::way(5, Some(Center::new(33.4, -112.0)));
        assert_eq!(way.coordinates(), Some(Coordinates::new(33.4, -112.0)));

        let no_center = Element::way(6, None);
        assert_eq!(no_center.coordinates(), None);

        let half_center = Element::way(
            7,
            Some(Center {
                lat: Some(33.4),
                lon: None,
            }),
        );
        assert_eq!(half_center.coordinates(), None);
    }

    #[test]
    fn test_element_kind_display() {
        assert_eq!(ElementKind::Node.to_string(), "node");
        assert_eq!(ElementKind::Relation.as_ref(), "relation");
    }
}
