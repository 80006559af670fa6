//! Coordinate type definitions

use std::fmt;

use thiserror::Error;

/// Accepted latitude range for projection.
///
/// Kept just inside [`MAP_EDGE_LAT`] so every accepted point has a
/// non-negative normalized y and lands inside its tile.
pub const MIN_LAT: f64 = -85.0511;
pub const MAX_LAT: f64 = 85.0511;

/// Latitude of the top edge of the Web Mercator square, `atan(sinh(π))`.
pub const MAP_EDGE_LAT: f64 = 85.051_128_779_806_59;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Supported zoom levels
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 22;

/// Default tile edge length in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 256;

/// Number of tiles along one axis at the given zoom level.
///
/// Callers must validate `zoom` first; at `MAX_ZOOM` this is 2^22.
#[inline]
pub fn tiles_per_axis(zoom: u8) -> u32 {
    1u32 << zoom
}

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point without validating it.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that the point can be projected with Web Mercator.
    ///
    /// NaN coordinates fail the range checks and are rejected.
    pub fn validate(&self) -> Result<(), CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&self.lat) {
            return Err(CoordError::InvalidLatitude(self.lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&self.lon) {
            return Err(CoordError::InvalidLongitude(self.lon));
        }
        Ok(())
    }

    /// Project this point onto the tile grid. See [`super::project`].
    pub fn to_tile_position(&self, zoom: u8, tile_size: u32) -> Result<TilePosition, CoordError> {
        super::project(self.lat, self.lon, zoom, tile_size)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lat={:.6}, lon={:.6}", self.lat, self.lon)
    }
}

/// Tile coordinates in the XYZ / Slippy Map system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// X coordinate (east-west), 0 at the antimeridian west edge
    pub x: u32,
    /// Y coordinate (north-south), 0 at north
    pub y: u32,
    /// Zoom level (0-22)
    pub zoom: u8,
}

impl TileCoord {
    /// Create a tile coordinate, checking it lies on the grid for `zoom`.
    pub fn new(x: u32, y: u32, zoom: u8) -> Result<Self, CoordError> {
        if zoom > MAX_ZOOM {
            return Err(CoordError::InvalidZoom(zoom));
        }
        let n = tiles_per_axis(zoom);
        if x >= n || y >= n {
            return Err(CoordError::InvalidTileIndex { x, y, zoom });
        }
        Ok(Self { x, y, zoom })
    }

    /// Geographic bounding box of this tile.
    #[inline]
    pub fn bounds(&self) -> Result<TileBounds, CoordError> {
        super::tile_bounds(self.x, self.y, self.zoom)
    }

    /// The tile one zoom level up that contains this tile.
    ///
    /// Returns `None` at zoom 0.
    pub fn parent(&self) -> Option<TileCoord> {
        if self.zoom == 0 {
            return None;
        }
        Some(TileCoord {
            x: self.x / 2,
            y: self.y / 2,
            zoom: self.zoom - 1,
        })
    }

    /// The four tiles one zoom level down, in row-major order
    /// (north-west, north-east, south-west, south-east).
    ///
    /// Returns `None` at `MAX_ZOOM`.
    pub fn children(&self) -> Option<[TileCoord; 4]> {
        if self.zoom >= MAX_ZOOM {
            return None;
        }
        let (x, y, zoom) = (self.x * 2, self.y * 2, self.zoom + 1);
        Some([
            TileCoord { x, y, zoom },
            TileCoord { x: x + 1, y, zoom },
            TileCoord { x, y: y + 1, zoom },
            TileCoord {
                x: x + 1,
                y: y + 1,
                zoom,
            },
        ])
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Position of a point inside its tile, in pixels from the tile's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelOffset {
    pub px: u32,
    pub py: u32,
}

/// Result of projecting a point: the containing tile plus the offset within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePosition {
    pub tile: TileCoord,
    pub offset: PixelOffset,
    /// Tile size the offset was computed for.
    pub tile_size: u32,
}

/// Geographic extent of a tile in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBounds {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl TileBounds {
    /// Whether the point falls in this tile.
    ///
    /// West and north edges are inclusive, east and south edges exclusive,
    /// matching how the projector floors into tile indices.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lon >= self.lon_min && lon < self.lon_max && lat <= self.lat_max && lat > self.lat_min
    }

    /// Width of the tile in degrees of longitude.
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Height of the tile in degrees of latitude.
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }
}

impl fmt::Display for TileBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lon [{:.6}, {:.6}] lat [{:.6}, {:.6}]",
            self.lon_min, self.lon_max, self.lat_min, self.lat_max
        )
    }
}

/// Errors that can occur during coordinate conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordError {
    /// Latitude is outside the Web Mercator range
    #[error("Invalid latitude: {0} (must be between {} and {})", MIN_LAT, MAX_LAT)]
    InvalidLatitude(f64),

    /// Longitude is outside valid range (-180.0 to 180.0)
    #[error("Invalid longitude: {0} (must be between {} and {})", MIN_LON, MAX_LON)]
    InvalidLongitude(f64),

    /// Zoom level is outside valid range (0 to 22)
    #[error("Invalid zoom level: {0} (must be between {} and {})", MIN_ZOOM, MAX_ZOOM)]
    InvalidZoom(u8),

    /// Tile size must be at least one pixel
    #[error("Invalid tile size: {0} (must be greater than 0)")]
    InvalidTileSize(u32),

    /// Tile index does not exist at this zoom level
    #[error("Invalid tile index: x={x}, y={y} does not exist at zoom {zoom}")]
    InvalidTileIndex { x: u32, y: u32, zoom: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_coord_new_rejects_out_of_range() {
        assert!(TileCoord::new(3, 3, 2).is_ok());
        assert_eq!(
            TileCoord::new(4, 0, 2),
            Err(CoordError::InvalidTileIndex {
                x: 4,
                y: 0,
                zoom: 2
            })
        );
        assert_eq!(TileCoord::new(0, 0, 23), Err(CoordError::InvalidZoom(23)));
    }

    #[test]
    fn test_parent_and_children_are_consistent() {
        let tile = TileCoord::new(2618, 1330, 12).unwrap();
        let children = tile.children().unwrap();

        for child in children {
            assert_eq!(child.parent(), Some(tile));
        }
        assert_eq!(children[0], TileCoord { x: 5236, y: 2660, zoom: 13 });
        assert_eq!(children[3], TileCoord { x: 5237, y: 2661, zoom: 13 });
    }

    #[test]
    fn test_parent_at_zoom_zero_is_none() {
        let root = TileCoord { x: 0, y: 0, zoom: 0 };
        assert!(root.parent().is_none());
        assert_eq!(root.children().unwrap().len(), 4);
    }

    #[test]
    fn test_children_at_max_zoom_is_none() {
        let tile = TileCoord { x: 0, y: 0, zoom: MAX_ZOOM };
        assert!(tile.children().is_none());
    }

    #[test]
    fn test_geo_point_validate_rejects_nan() {
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0).validate(),
            Err(CoordError::InvalidLatitude(_))
        ));
        assert!(matches!(
            GeoPoint::new(0.0, f64::NAN).validate(),
            Err(CoordError::InvalidLongitude(_))
        ));
    }

    #[test]
    fn test_coord_error_display() {
        let err = CoordError::InvalidZoom(23);
        assert_eq!(
            err.to_string(),
            "Invalid zoom level: 23 (must be between 0 and 22)"
        );

        let err = CoordError::InvalidTileIndex { x: 4, y: 1, zoom: 2 };
        assert_eq!(
            err.to_string(),
            "Invalid tile index: x=4, y=1 does not exist at zoom 2"
        );
    }

    #[test]
    fn test_tile_coord_display() {
        let tile = TileCoord { x: 2618, y: 1330, zoom: 12 };
        assert_eq!(tile.to_string(), "12/2618/1330");
    }

    #[test]
    fn test_bounds_contains_is_half_open() {
        let bounds = TileBounds {
            lon_min: 0.0,
            lon_max: 10.0,
            lat_min: 0.0,
            lat_max: 10.0,
        };
        assert!(bounds.contains(10.0, 0.0));
        assert!(!bounds.contains(0.0, 5.0));
        assert!(!bounds.contains(5.0, 10.0));
        assert!(bounds.contains(5.0, 5.0));
    }
}
