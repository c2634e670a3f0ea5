//! Slippy map tile addressing for the base layer.
//!
//! Tiles follow the XYZ scheme: at zoom `z` the projected world is split into
//! `2^z` columns and rows, column 0 at the antimeridian, row 0 at the top.

use crate::geometry::Coordinate;
use crate::projection::HALF_WORLD;

/// Deepest zoom level tile servers publish
pub const MAX_TILE_ZOOM: u8 = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileSource {
    OpenStreetMap,
}

impl TileSource {
    pub fn url(&self, tile: TileId) -> String {
        match self {
            Self::OpenStreetMap => format!(
                "https://tile.openstreetmap.org/{}/{}/{}.png",
                tile.zoom, tile.x, tile.y
            ),
        }
    }

    /// Credit line the provider requires next to its imagery
    pub fn attribution(&self) -> &'static str {
        match self {
            Self::OpenStreetMap => "© OpenStreetMap contributors",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

/// A tile and where one copy of it sits in map space.
///
/// Columns past the antimeridian wrap, so the same [`TileId`] can be placed
/// more than once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub tile: TileId,
    pub top_left: Coordinate,
    pub bottom_right: Coordinate,
}

/// Width of one tile in map units
pub fn tile_span(zoom: u8) -> f64 {
    2.0 * HALF_WORLD / f64::from(1u32 << zoom)
}

/// Tile level to fetch for a fractional view zoom
pub fn tile_zoom(view_zoom: f64) -> u8 {
    view_zoom.round().clamp(0.0, f64::from(MAX_TILE_ZOOM)) as u8
}

/// Every tile of `zoom` overlapping the box spanned by two opposite corners
pub fn covering(a: Coordinate, b: Coordinate, zoom: u8) -> Vec<PlacedTile> {
    let zoom = zoom.min(MAX_TILE_ZOOM);
    let count = 1i64 << zoom;
    let span = tile_span(zoom);
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));

    let first_col = ((min_x + HALF_WORLD) / span).floor() as i64;
    let last_col = ((max_x + HALF_WORLD) / span).ceil() as i64 - 1;
    // Rows never wrap
    let first_row = (((HALF_WORLD - max_y) / span).floor() as i64).max(0);
    let last_row = ((((HALF_WORLD - min_y) / span).ceil() as i64) - 1).min(count - 1);

    let mut tiles = Vec::new();
    for row in first_row..=last_row {
        for col in first_col..=last_col {
            let left = -HALF_WORLD + col as f64 * span;
            let top = HALF_WORLD - row as f64 * span;
            tiles.push(PlacedTile {
                tile: TileId {
                    zoom,
                    x: col.rem_euclid(count) as u32,
                    y: row as u32,
                },
                top_left: Coordinate::new(left, top),
                bottom_right: Coordinate::new(left + span, top - span),
            });
        }
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_world_at_zoom_zero_is_one_tile() {
        let tiles = covering(
            Coordinate::new(-HALF_WORLD, HALF_WORLD),
            Coordinate::new(HALF_WORLD - 1.0, -HALF_WORLD),
            0,
        );
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].tile, TileId { zoom: 0, x: 0, y: 0 });
        assert_eq!(tiles[0].top_left, Coordinate::new(-HALF_WORLD, HALF_WORLD));
    }

    #[test]
    fn north_east_quadrant_at_zoom_one() {
        let tiles = covering(
            Coordinate::new(1000.0, 1000.0),
            Coordinate::new(HALF_WORLD / 2.0, HALF_WORLD / 2.0),
            1,
        );
        let ids: Vec<_> = tiles.iter().map(|t| t.tile).collect();
        assert_eq!(ids, vec![TileId { zoom: 1, x: 1, y: 0 }]);
    }

    #[test]
    fn columns_past_the_antimeridian_wrap() {
        let span = tile_span(1);
        let tiles = covering(
            Coordinate::new(HALF_WORLD + 10.0, 10.0),
            Coordinate::new(HALF_WORLD + 20.0, 20.0),
            1,
        );
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].tile.x, 0);
        assert_eq!(tiles[0].top_left.x, -HALF_WORLD + 2.0 * span);
    }

    #[test]
    fn rows_are_clamped_to_the_world() {
        let tiles = covering(
            Coordinate::new(-10.0, 3.0 * HALF_WORLD),
            Coordinate::new(10.0, -3.0 * HALF_WORLD),
            1,
        );
        assert!(tiles.iter().all(|t| t.tile.y < 2));
        assert_eq!(tiles.len(), 4);
    }

    #[test]
    fn osm_url_is_zoom_x_y() {
        let url = TileSource::OpenStreetMap.url(TileId { zoom: 3, x: 4, y: 2 });
        assert_eq!(url, "https://tile.openstreetmap.org/3/4/2.png");
        assert_eq!(tile_zoom(2.6), 3);
        assert_eq!(tile_zoom(25.0), MAX_TILE_ZOOM);
    }
}
