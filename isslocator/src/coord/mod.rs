//! Coordinate conversion module
//!
//! Projects geographic coordinates (latitude/longitude) onto percentage
//! offsets within the map image the tracked icon is drawn on.
//!
//! The projection is a two-sided linear interpolation anchored at a
//! calibrated centre point, not a symmetric affine map:
//!
//! ```text
//!   negative_edge ──── center ──────── positive_edge     (axis %)
//!        ▲               ▲                  ▲
//!  -negative_extent      0°          +positive_extent    (degrees)
//! ```

mod types;

pub use types::{AxisCalibration, GeoPosition, MapCoordinate, LATITUDE_AXIS, LONGITUDE_AXIS};

/// Converts one axis value from degrees to a map percentage.
///
/// Values beyond the calibrated extents extrapolate along the same slope.
/// A NaN input maps to the centre.
#[inline]
pub fn convert_axis(coord: f64, axis: &AxisCalibration) -> f64 {
    if coord < 0.0 {
        axis.center + coord * (axis.center - axis.negative_edge) / axis.negative_extent
    } else if coord > 0.0 {
        axis.center + coord * (axis.positive_edge - axis.center) / axis.positive_extent
    } else {
        axis.center
    }
}

/// Projects a geographic position onto the map.
///
/// Pure and deterministic; safe to call from any context.
#[inline]
pub fn project(position: &GeoPosition) -> MapCoordinate {
    MapCoordinate {
        top: convert_axis(-position.latitude, &LATITUDE_AXIS),
        left: convert_axis(position.longitude, &LONGITUDE_AXIS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_origin_projects_to_map_center() {
        let coord = project(&GeoPosition::new(0.0, 0.0));
        assert_eq!(coord.top, 59.9);
        assert_eq!(coord.left, 45.0);
    }

    #[test]
    fn test_southern_map_edge_and_date_line() {
        // 60°S is the bottom edge of the image
        let coord = project(&GeoPosition::new(-60.0, 180.0));
        assert_close(coord.top, 96.8);
        assert_close(coord.left, 94.0);
    }

    #[test]
    fn test_north_pole_and_antimeridian_west() {
        let coord = project(&GeoPosition::new(90.0, -180.0));
        assert_close(coord.top, 4.8);
        assert_close(coord.left, -4.0);
    }

    #[test]
    fn test_south_pole_extrapolates_below_map() {
        let coord = project(&GeoPosition::new(-90.0, 180.0));
        assert_close(coord.top, convert_axis(90.0, &LATITUDE_AXIS));
        assert_close(coord.top, 115.25);
        assert!(!coord.is_on_map());
    }

    #[test]
    fn test_convert_axis_negative_side_uses_negative_slope() {
        // 45°N: halfway between centre (59.9) and the top edge (4.8)
        let top = convert_axis(-45.0, &LATITUDE_AXIS);
        assert_close(top, 59.9 - 55.1 / 2.0);
    }

    #[test]
    fn test_convert_axis_positive_side_uses_positive_slope() {
        // 90°E: halfway between centre (45) and the right edge (94)
        let left = convert_axis(90.0, &LONGITUDE_AXIS);
        assert_close(left, 69.5);
    }

    #[test]
    fn test_negative_zero_is_center() {
        assert_eq!(convert_axis(-0.0, &LATITUDE_AXIS), 59.9);
    }

    #[test]
    fn test_nan_maps_to_center() {
        assert_eq!(convert_axis(f64::NAN, &LONGITUDE_AXIS), 45.0);
    }

    #[test]
    fn test_typical_iss_fix() {
        // ISS over the north Atlantic
        let coord = project(&GeoPosition::new(51.6, -30.0));
        assert_close(coord.top, 59.9 - 51.6 * 55.1 / 90.0);
        assert_close(coord.left, 45.0 - 30.0 * 49.0 / 180.0);
        assert!(coord.is_on_map());
    }

    #[test]
    fn test_project_does_not_mutate_input() {
        let position = GeoPosition::new(12.5, -77.25);
        let copy = position;
        let _ = project(&position);
        assert_eq!(position, copy);
    }

    proptest! {
        #[test]
        fn prop_project_is_deterministic(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            let position = GeoPosition::new(lat, lon);
            prop_assert_eq!(project(&position), project(&position));
        }

        #[test]
        fn prop_convert_axis_is_monotonic(a in -180.0f64..=180.0, b in -180.0f64..=180.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(convert_axis(lo, &LONGITUDE_AXIS) <= convert_axis(hi, &LONGITUDE_AXIS));
            prop_assert!(convert_axis(lo, &LATITUDE_AXIS) <= convert_axis(hi, &LATITUDE_AXIS));
        }

        #[test]
        fn prop_northern_fixes_sit_above_center(lat in 0.001f64..=90.0, lon in -180.0f64..=180.0) {
            let coord = project(&GeoPosition::new(lat, lon));
            prop_assert!(coord.top < LATITUDE_AXIS.center);
        }

        #[test]
        fn prop_visible_band_stays_on_map(lat in -60.0f64..=90.0, lon in -165.0f64..=180.0) {
            // Past ~165.3°W the longitude axis runs into the negative margin
            let coord = project(&GeoPosition::new(lat, lon));
            prop_assert!(coord.is_on_map(), "{:?} -> {:?}", (lat, lon), coord);
        }
    }
}
