//! Coordinate type definitions

use serde::Serialize;
use std::fmt;

/// Geographic position as reported by the position API.
///
/// Raw and unvalidated: values outside ±90/±180 are passed through to the
/// mapper unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl GeoPosition {
    /// Creates a new position from latitude/longitude degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for GeoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{}, {:.4}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// Position within the map's bounding box, in percent.
///
/// `top` grows downward and `left` grows rightward, so the pair can be used
/// directly as offsets of the tracked icon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCoordinate {
    /// Vertical offset from the top edge (percent)
    pub top: f64,
    /// Horizontal offset from the left edge (percent)
    pub left: f64,
}

impl MapCoordinate {
    /// Returns true if both offsets fall inside the map image (0..=100).
    ///
    /// The mapper never clamps; far-south latitudes land below the bottom edge.
    pub fn is_on_map(&self) -> bool {
        (0.0..=100.0).contains(&self.top) && (0.0..=100.0).contains(&self.left)
    }
}

impl fmt::Display for MapCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "top {:.2}%, left {:.2}%", self.top, self.left)
    }
}

/// Calibration of one map axis.
///
/// The map image's visual centre is not the numeric midpoint of the degree
/// domain, and the usable extent differs on either side of it, so each side
/// of the centre gets its own slope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisCalibration {
    /// Degrees covered on the positive side of the centre
    pub positive_extent: f64,
    /// Degrees covered on the negative side of the centre
    pub negative_extent: f64,
    /// Axis percentage of the map centre (0° on this axis)
    pub center: f64,
    /// Axis percentage reached at `+positive_extent`
    pub positive_edge: f64,
    /// Axis percentage reached at `-negative_extent`
    pub negative_edge: f64,
}

/// Vertical axis. Fed with the negated latitude: the image shows 90°N at the
/// top and stops at 60°S at the bottom.
pub const LATITUDE_AXIS: AxisCalibration = AxisCalibration {
    positive_extent: 60.0,
    negative_extent: 90.0,
    center: 59.9,
    positive_edge: 96.8,
    negative_edge: 4.8,
};

/// Horizontal axis, fed with the longitude unchanged.
pub const LONGITUDE_AXIS: AxisCalibration = AxisCalibration {
    positive_extent: 180.0,
    negative_extent: 180.0,
    center: 45.0,
    positive_edge: 94.0,
    negative_edge: -4.0,
};
