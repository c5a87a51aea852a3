use serde::{Deserialize, Serialize};

/// A resolved latitude/longitude pair in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl Coordinates {
    /// Creates a new coordinate pair.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Builds a pair only when both halves are present.
    ///
    /// A value of `0.0` counts as present.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        Some(Self::new(lat?, lon?))
    }
}
