use crate::geometry::Coordinate;

/// Tracks the single "last clicked" marker
#[derive(Debug, Default)]
pub struct MarkerController {
    position: Option<Coordinate>,
}

impl MarkerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the marker to `coordinate`, creating it on the first click
    pub fn on_map_click(&mut self, coordinate: Coordinate) {
        self.position = Some(coordinate);
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }
}
