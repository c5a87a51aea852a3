//! Element to record mapping.

use skatequest_core::ParkRecord;
use skatequest_overpass::Element;

/// Maps an Overpass element to a park record.
///
/// Returns `None` when the element has no resolvable position: a node
/// without both `lat` and `lon`, or a way/relation without a complete
/// `center`. A missing `name` tag falls back to `Skatepark in {region}`.
pub fn park_record(element: &Element, region: &str) -> Option<ParkRecord> {
    let coordinates = element.coordinates()?;

    let name = element
        .name()
        .map(str::to_owned)
        .unwrap_or_else(|| ParkRecord::placeholder_name(region));

    Some(ParkRecord::new(
        ParkRecord::osm_id(element.kind, element.id),
        name,
        coordinates,
    ))
}

#[cfg(test)]
mod tests {
    use skatequest_overpass::Center;

    use super::*;

    #[test]
    fn node_maps_to_record() {
        let element = Element::node(123, 44.05, -123.09).with_tag("name", "Washington Park");
        let record = park_record(&element, "Oregon").unwrap();

        assert_eq!(record.id, "osm-node-123");
        assert_eq!(record.name, "Washington Park");
        assert_eq!(record.category, "park");
        assert_eq!(record.lat, 44.05);
        assert_eq!(record.lng, -123.09);
    }

    #[test]
    fn way_maps_to_centroid() {
        let element = Element::way(456, Some(Center::new(47.61, -122.33)));
        let record = park_record(&element, "Washington").unwrap();

        assert_eq!(record.id, "osm-way-456");
        assert_eq!(record.lat, 47.61);
        assert_eq!(record.lng, -122.33);
    }

    #[test]
    fn missing_name_uses_placeholder() {
        let element = Element::node(7, 35.0, -106.6);
        let record = park_record(&element, "New Mexico").unwrap();
        assert_eq!(record.name, "Skatepark in New Mexico");
    }

    #[test]
    fn empty_name_is_kept() {
        let element = Element::node(8, 35.0, -106.6).with_tag("name", "");
        let record = park_record(&element, "New Mexico").unwrap();
        assert_eq!(record.name, "");
    }

    #[test]
    fn unresolvable_elements_are_skipped() {
        let way = Element::way(9, None);
        assert!(park_record(&way, "Utah").is_none());

        let mut node = Element::node(10, 40.7, -111.9);
        node.lat = None;
        assert!(park_record(&node, "Utah").is_none());
    }

    #[test]
    fn id_is_stable_across_runs() {
        let first = park_record(&Element::node(11, 1.0, 1.0), "Iowa").unwrap();
        let second = park_record(&Element::node(11, 2.0, 2.0), "Iowa").unwrap();
        assert_eq!(first.id, second.id);
    }
}
