//! Spherical web mercator (EPSG:3857).

use crate::geometry::Coordinate;

/// Earth radius used by EPSG:3857, in metres
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the width of the projected world, in metres
pub const HALF_WORLD: f64 = std::f64::consts::PI * EARTH_RADIUS;

/// Latitude beyond which web mercator is undefined
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Project a longitude/latitude pair (degrees) into map space
pub fn from_lon_lat(lon: f64, lat: f64) -> Coordinate {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = EARTH_RADIUS * lon.to_radians();
    let y = EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    Coordinate::new(x, y)
}

/// Inverse of [`from_lon_lat`], returns `(lon, lat)` in degrees
pub fn to_lon_lat(c: Coordinate) -> (f64, f64) {
    let lon = (c.x / EARTH_RADIUS).to_degrees();
    let lat = (2.0 * (c.y / EARTH_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    (lon, lat)
}

/// Map units per screen pixel at a zoom level, for 256px tiles
pub fn resolution_at_zoom(zoom: f64) -> f64 {
    2.0 * HALF_WORLD / 256.0 / 2f64.powf(zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_origin() {
        let c = from_lon_lat(0.0, 0.0);
        assert!(c.x.abs() < 1e-9);
        assert!(c.y.abs() < 1e-9);
    }

    #[test]
    fn round_trip() {
        let (lon, lat) = to_lon_lat(from_lon_lat(128.9784, 37.566));
        assert!((lon - 128.9784).abs() < 1e-9);
        assert!((lat - 37.566).abs() < 1e-9);
    }

    #[test]
    fn antimeridian_is_half_world() {
        assert!((from_lon_lat(180.0, 0.0).x - HALF_WORLD).abs() < 1e-6);
    }
}
