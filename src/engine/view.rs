use egui::{Pos2, Rect, Vec2};

use crate::config::ViewConfig;
use crate::geometry::Coordinate;
use crate::projection::{self, HALF_WORLD};

/// Center and zoom of the visible map, plus the screen/map transforms
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    center: Coordinate,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl MapView {
    pub fn new(config: &ViewConfig) -> Self {
        let [lon, lat] = config.center_lon_lat;
        Self {
            center: projection::from_lon_lat(lon, lat),
            zoom: config.zoom.clamp(config.min_zoom, config.max_zoom),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Map units per screen point
    pub fn resolution(&self) -> f64 {
        projection::resolution_at_zoom(self.zoom)
    }

    pub fn screen_to_map(&self, rect: Rect, pos: Pos2) -> Coordinate {
        let res = self.resolution();
        let offset = pos - rect.center();
        Coordinate::new(
            self.center.x + offset.x as f64 * res,
            self.center.y - offset.y as f64 * res,
        )
    }

    pub fn map_to_screen(&self, rect: Rect, c: Coordinate) -> Pos2 {
        let res = self.resolution();
        rect.center()
            + Vec2::new(
                ((c.x - self.center.x) / res) as f32,
                ((self.center.y - c.y) / res) as f32,
            )
    }

    /// Move the view so the content follows a pointer drag of `delta`
    pub fn pan(&mut self, delta: Vec2) {
        let res = self.resolution();
        self.center.x = (self.center.x - delta.x as f64 * res).clamp(-HALF_WORLD, HALF_WORLD);
        self.center.y = (self.center.y + delta.y as f64 * res).clamp(-HALF_WORLD, HALF_WORLD);
    }

    /// Zoom by `steps` levels keeping the map point under `anchor` fixed
    pub fn zoom_at(&mut self, rect: Rect, anchor: Pos2, steps: f64) {
        let before = self.screen_to_map(rect, anchor);
        self.zoom = (self.zoom + steps).clamp(self.min_zoom, self.max_zoom);
        let after = self.screen_to_map(rect, anchor);
        self.center.x += before.x - after.x;
        self.center.y += before.y - after.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 400.0))
    }

    #[test]
    fn viewport_center_is_view_center() {
        let view = MapView::new(&ViewConfig::default());
        let c = view.screen_to_map(viewport(), viewport().center());
        assert!(c.distance_to(view.center()) < 1e-6);
    }

    #[test]
    fn screen_and_map_transforms_invert() {
        let view = MapView::new(&ViewConfig::default());
        let pos = Pos2::new(123.0, 321.0);
        let back = view.map_to_screen(viewport(), view.screen_to_map(viewport(), pos));
        assert!((back - pos).length() < 0.01);
    }

    #[test]
    fn zoom_keeps_anchor_in_place() {
        let mut view = MapView::new(&ViewConfig::default());
        let anchor = Pos2::new(600.0, 100.0);
        let before = view.screen_to_map(viewport(), anchor);
        view.zoom_at(viewport(), anchor, 1.5);
        let after = view.screen_to_map(viewport(), anchor);
        assert!(before.distance_to(after) < 1.0);
        assert_eq!(view.zoom(), 3.5);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut view = MapView::new(&ViewConfig::default());
        view.zoom_at(viewport(), viewport().center(), -10.0);
        assert_eq!(view.zoom(), 0.0);
    }
}
