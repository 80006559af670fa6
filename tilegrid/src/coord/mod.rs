//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and Web Mercator XYZ tile coordinates with a pixel offset inside the tile.

mod types;

pub use types::{
    tiles_per_axis, CoordError, GeoPoint, PixelOffset, TileBounds, TileCoord, TilePosition,
    DEFAULT_TILE_SIZE, MAP_EDGE_LAT, MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Converts geographic coordinates to a tile and the pixel offset within it.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.0511 to 85.0511)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
/// * `zoom` - Zoom level (0 to 22)
/// * `tile_size` - Tile edge length in pixels, typically 256 or 512
///
/// # Returns
///
/// A `Result` containing the tile position or an error if inputs are invalid.
/// Inputs are checked in the order latitude, longitude, zoom, tile size.
///
/// # Example
///
/// ```
/// use tilegrid::coord::project;
///
/// let position = project(53.1959, 50.1008, 12, 256).unwrap();
/// assert_eq!((position.tile.x, position.tile.y), (2618, 1330));
/// assert_eq!((position.offset.px, position.offset.py), (9, 145));
/// ```
pub fn project(lat: f64, lon: f64, zoom: u8, tile_size: u32) -> Result<TilePosition, CoordError> {
    GeoPoint::new(lat, lon).validate()?;
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }
    if tile_size == 0 {
        return Err(CoordError::InvalidTileSize(tile_size));
    }

    let lat_rad = lat * PI / 180.0;
    let n = 2.0_f64.powi(zoom as i32);

    let x_norm = (lon + 180.0) / 360.0;
    // tan + sec, in this order
    let y_norm = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;

    // lon = 180 lands exactly on n, and the latitude limit can dip just
    // below row 0, so both indices are clamped onto the grid.
    let max_index = tiles_per_axis(zoom) as i64 - 1;
    let x = ((x_norm * n).floor() as i64).clamp(0, max_index) as u32;
    let y = ((y_norm * n).floor() as i64).clamp(0, max_index) as u32;

    let size = f64::from(tile_size);
    let px_total = x_norm * n * size;
    let py_total = y_norm * n * size;

    let px = (px_total.floor() as i64).rem_euclid(i64::from(tile_size)) as u32;
    let py = (py_total.floor() as i64).rem_euclid(i64::from(tile_size)) as u32;

    Ok(TilePosition {
        tile: TileCoord { x, y, zoom },
        offset: PixelOffset { px, py },
        tile_size,
    })
}

/// Converts a tile index back to its geographic bounding box.
///
/// Rows grow southward, so `lat_max` comes from row `y` and `lat_min`
/// from row `y + 1`.
///
/// # Errors
///
/// `InvalidZoom` if `zoom` exceeds 22, `InvalidTileIndex` if `x` or `y`
/// is not below 2^zoom.
pub fn tile_bounds(x: u32, y: u32, zoom: u8) -> Result<TileBounds, CoordError> {
    let tile = TileCoord::new(x, y, zoom)?;
    let n = f64::from(tiles_per_axis(tile.zoom));

    Ok(TileBounds {
        lon_min: column_to_lon(f64::from(tile.x), n),
        lon_max: column_to_lon(f64::from(tile.x) + 1.0, n),
        lat_min: row_to_lat(f64::from(tile.y) + 1.0, n),
        lat_max: row_to_lat(f64::from(tile.y), n),
    })
}

#[inline]
fn column_to_lon(column: f64, n: f64) -> f64 {
    column / n * 360.0 - 180.0
}

/// Inverse Web Mercator for a tile-aligned row edge.
#[inline]
fn row_to_lat(row: f64, n: f64) -> f64 {
    let lat_rad = (PI * (1.0 - 2.0 * row / n)).sinh().atan();
    lat_rad * 180.0 / PI
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMARA_LAT: f64 = 53.1959;
    const SAMARA_LON: f64 = 50.1008;

    fn assert_position(pos: TilePosition, x: u32, y: u32, px: u32, py: u32) {
        assert_eq!(
            (pos.tile.x, pos.tile.y, pos.offset.px, pos.offset.py),
            (x, y, px, py)
        );
    }

    #[test]
    fn test_reference_point_at_zoom_12() {
        let pos = project(SAMARA_LAT, SAMARA_LON, 12, 256).unwrap();
        assert_position(pos, 2618, 1330, 9, 145);
        assert_eq!(pos.tile.zoom, 12);
        assert_eq!(pos.tile_size, 256);
    }

    #[test]
    fn test_reference_point_at_zoom_13_and_14() {
        let pos = project(SAMARA_LAT, SAMARA_LON, 13, 256).unwrap();
        assert_position(pos, 5236, 2661, 18, 34);

        let pos = project(SAMARA_LAT, SAMARA_LON, 14, 256).unwrap();
        assert_position(pos, 10472, 5322, 36, 69);
    }

    #[test]
    fn test_zoom_zero_is_single_tile() {
        let pos = project(0.0, 0.0, 0, 256).unwrap();
        assert_position(pos, 0, 0, 128, 128);
    }

    #[test]
    fn test_larger_tile_size_scales_offset() {
        // Same point, 512 px tiles: tile index unchanged, offset doubles
        let pos = project(SAMARA_LAT, SAMARA_LON, 12, 512).unwrap();
        assert_position(pos, 2618, 1330, 18, 290);
    }

    #[test]
    fn test_longitude_180_clamps_to_last_column() {
        let pos = project(0.0, 180.0, 3, 256).unwrap();
        assert_eq!(pos.tile.x, 7);
        assert_eq!(pos.offset.px, 0);
    }

    #[test]
    fn test_longitude_minus_180_is_first_column() {
        let pos = project(0.0, -180.0, 3, 256).unwrap();
        assert_eq!(pos.tile.x, 0);
        assert_eq!(pos.offset.px, 0);
    }

    #[test]
    fn test_latitude_limit_accepted() {
        assert!(project(85.0511, 0.0, 10, 256).is_ok());
        assert!(project(-85.0511, 0.0, 10, 256).is_ok());
    }

    #[test]
    fn test_latitude_just_past_limit_rejected() {
        assert_eq!(
            project(85.05112, 0.0, 10, 256),
            Err(CoordError::InvalidLatitude(85.05112))
        );
        assert_eq!(
            project(-85.05112, 0.0, 10, 256),
            Err(CoordError::InvalidLatitude(-85.05112))
        );
        assert!(matches!(
            project(MAP_EDGE_LAT, 0.0, 10, 256),
            Err(CoordError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_north_limit_sits_at_top_of_first_row() {
        let pos = project(MAX_LAT, 0.0, 0, 256).unwrap();
        assert_position(pos, 0, 0, 128, 0);

        let pos = project(MAX_LAT, 0.0, 12, 256).unwrap();
        assert_eq!((pos.tile.y, pos.offset.py), (0, 0));

        // At max zoom the gap to the map edge spans a few rows
        let pos = project(MAX_LAT, 0.0, MAX_ZOOM, 256).unwrap();
        assert_eq!((pos.tile.y, pos.offset.py), (3, 227));
    }

    #[test]
    fn test_south_limit_is_last_row() {
        let pos = project(MIN_LAT, 0.0, 3, 256).unwrap();
        assert_eq!(pos.tile.y, 7);
    }

    #[test]
    fn test_invalid_latitude() {
        let result = project(85.1, 0.0, 10, 256);
        assert_eq!(result, Err(CoordError::InvalidLatitude(85.1)));

        let result = project(-90.0, 0.0, 10, 256);
        assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
    }

    #[test]
    fn test_invalid_longitude() {
        assert_eq!(
            project(0.0, 181.0, 10, 256),
            Err(CoordError::InvalidLongitude(181.0))
        );
        assert_eq!(
            project(0.0, -180.5, 10, 256),
            Err(CoordError::InvalidLongitude(-180.5))
        );
    }

    #[test]
    fn test_invalid_zoom() {
        assert_eq!(
            project(SAMARA_LAT, SAMARA_LON, 23, 256),
            Err(CoordError::InvalidZoom(23))
        );
    }

    #[test]
    fn test_invalid_tile_size() {
        assert_eq!(
            project(SAMARA_LAT, SAMARA_LON, 12, 0),
            Err(CoordError::InvalidTileSize(0))
        );
    }

    #[test]
    fn test_latitude_checked_before_zoom() {
        assert!(matches!(
            project(89.0, 0.0, 40, 0),
            Err(CoordError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_tile_bounds_world_tile() {
        let bounds = tile_bounds(0, 0, 0).unwrap();
        assert_eq!(bounds.lon_min, -180.0);
        assert_eq!(bounds.lon_max, 180.0);
        assert!((bounds.lat_max - MAP_EDGE_LAT).abs() < 1e-9);
        assert!((bounds.lat_min + MAP_EDGE_LAT).abs() < 1e-9);
    }

    #[test]
    fn test_tile_bounds_reference_tile() {
        let bounds = tile_bounds(2618, 1330, 12).unwrap();
        assert!((bounds.lon_min - 50.09765625).abs() < 1e-9);
        assert!((bounds.lon_max - 50.185546875).abs() < 1e-9);
        assert!((bounds.lat_min - 53.173119).abs() < 1e-6);
        assert!((bounds.lat_max - 53.225768).abs() < 1e-6);
        assert!(bounds.contains(SAMARA_LAT, SAMARA_LON));
    }

    #[test]
    fn test_tile_bounds_equator_split() {
        // Zoom 1: row 0 is the northern hemisphere, row 1 the southern
        let north = tile_bounds(0, 0, 1).unwrap();
        let south = tile_bounds(0, 1, 1).unwrap();
        assert!(north.lat_min.abs() < 1e-12);
        assert!(south.lat_max.abs() < 1e-12);
        assert_eq!(north.lon_max, 0.0);
    }

    #[test]
    fn test_tile_bounds_invalid_index() {
        assert_eq!(
            tile_bounds(8, 0, 3),
            Err(CoordError::InvalidTileIndex { x: 8, y: 0, zoom: 3 })
        );
        assert_eq!(
            tile_bounds(0, 8, 3),
            Err(CoordError::InvalidTileIndex { x: 0, y: 8, zoom: 3 })
        );
    }

    #[test]
    fn test_tile_bounds_invalid_zoom() {
        assert_eq!(tile_bounds(0, 0, 23), Err(CoordError::InvalidZoom(23)));
    }

    #[test]
    fn test_bounds_of_projected_tile_contain_point() {
        for zoom in [0, 5, 10, 15, 18, 22] {
            let pos = project(SAMARA_LAT, SAMARA_LON, zoom, 256).unwrap();
            let bounds = pos.tile.bounds().unwrap();
            assert!(
                bounds.contains(SAMARA_LAT, SAMARA_LON),
                "Zoom {}: {} does not contain the point",
                zoom,
                bounds
            );
        }
    }

    #[test]
    fn test_reference_tiles_are_nested() {
        let z12 = project(SAMARA_LAT, SAMARA_LON, 12, 256).unwrap().tile;
        let z13 = project(SAMARA_LAT, SAMARA_LON, 13, 256).unwrap().tile;
        let z14 = project(SAMARA_LAT, SAMARA_LON, 14, 256).unwrap().tile;
        assert_eq!(z13.parent(), Some(z12));
        assert_eq!(z14.parent(), Some(z13));
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_tile_coords_in_bounds(
                lat in -85.05..85.05_f64,
                lon in -180.0..=180.0_f64,
                zoom in 0u8..=22
            ) {
                let pos = project(lat, lon, zoom, 256)?;

                let max_tile = tiles_per_axis(zoom);
                prop_assert!(
                    pos.tile.x < max_tile,
                    "X {} exceeds maximum {} at zoom {}",
                    pos.tile.x, max_tile, zoom
                );
                prop_assert!(
                    pos.tile.y < max_tile,
                    "Y {} exceeds maximum {} at zoom {}",
                    pos.tile.y, max_tile, zoom
                );
                prop_assert_eq!(pos.tile.zoom, zoom);
            }

            #[test]
            fn test_pixel_offset_within_tile(
                lat in MIN_LAT..=MAX_LAT,
                lon in -180.0..=180.0_f64,
                zoom in 0u8..=22,
                tile_size in 1u32..=4096
            ) {
                let pos = project(lat, lon, zoom, tile_size)?;
                prop_assert!(pos.offset.px < tile_size);
                prop_assert!(pos.offset.py < tile_size);
            }

            #[test]
            fn test_roundtrip_inside_bounds(
                x_raw in 0u32..u32::MAX,
                y_raw in 0u32..u32::MAX,
                zoom in 0u8..=18,
                fx in 0.05..0.95_f64,
                fy in 0.05..0.95_f64
            ) {
                let n = tiles_per_axis(zoom);
                let (x, y) = (x_raw % n, y_raw % n);
                let bounds = tile_bounds(x, y, zoom)?;

                // A point well inside the box, away from the edges
                let lon = bounds.lon_min + fx * bounds.lon_span();
                let lat = bounds.lat_min + fy * bounds.lat_span();

                let pos = project(lat, lon, zoom, 256)?;
                prop_assert_eq!((pos.tile.x, pos.tile.y), (x, y));
            }

            #[test]
            fn test_child_tile_is_nested(
                lat in -85.0..85.0_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..22
            ) {
                let outer = project(lat, lon, zoom, 256)?.tile;
                let inner = project(lat, lon, zoom + 1, 256)?.tile;

                let children = outer.children().expect("zoom below max");
                prop_assert!(
                    children.contains(&inner),
                    "{} is not a child of {}",
                    inner, outer
                );
            }

            #[test]
            fn test_longitude_monotonic(
                lat in 0.0..1.0_f64,
                lon1 in -180.0..-90.0_f64,
                lon2 in -90.0..0.0_f64,
                zoom in 10u8..=15
            ) {
                // For fixed latitude, increasing longitude should increase column
                let tile1 = project(lat, lon1, zoom, 256)?.tile;
                let tile2 = project(lat, lon2, zoom, 256)?.tile;

                prop_assert!(
                    tile1.x < tile2.x,
                    "Longitude not monotonic: lon {} (x {}) >= lon {} (x {})",
                    lon1, tile1.x, lon2, tile2.x
                );
            }

            #[test]
            fn test_tile_bounds_in_geographic_range(
                x_raw in 0u32..65536,
                y_raw in 0u32..65536,
                zoom in 0u8..=16
            ) {
                let n = tiles_per_axis(zoom);
                let bounds = tile_bounds(x_raw % n, y_raw % n, zoom)?;

                prop_assert!(bounds.lat_min < bounds.lat_max);
                prop_assert!(bounds.lon_min < bounds.lon_max);
                prop_assert!(bounds.lat_min >= -MAP_EDGE_LAT - 1e-9 && bounds.lat_max <= MAP_EDGE_LAT + 1e-9);
                prop_assert!(bounds.lon_min >= -180.0 && bounds.lon_max <= 180.0);
            }

            #[test]
            fn test_reject_invalid_latitude(
                lat in 85.06..90.0_f64,
                lon in -180.0..180.0_f64,
                zoom in 0u8..=22
            ) {
                // Latitudes outside Web Mercator range should error
                prop_assert!(matches!(
                    project(lat, lon, zoom, 256),
                    Err(CoordError::InvalidLatitude(_))
                ));
                prop_assert!(matches!(
                    project(-lat, lon, zoom, 256),
                    Err(CoordError::InvalidLatitude(_))
                ));
            }

            #[test]
            fn test_reject_invalid_longitude(
                lat in -85.0..85.0_f64,
                lon in 180.01..360.0_f64,
                zoom in 0u8..=22
            ) {
                prop_assert!(matches!(
                    project(lat, lon, zoom, 256),
                    Err(CoordError::InvalidLongitude(_))
                ));
            }

            #[test]
            fn test_reject_invalid_zoom(zoom in 23u8..=u8::MAX) {
                prop_assert_eq!(
                    project(0.0, 0.0, zoom, 256),
                    Err(CoordError::InvalidZoom(zoom))
                );
            }
        }
    }
}
