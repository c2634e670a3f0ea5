use serde::{Deserialize, Serialize};

use crate::geometry::GeometryKind;

/// Which geometry type the user is currently drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DrawMode {
    #[default]
    None,
    Point,
    Line,
    Polygon,
}

impl DrawMode {
    /// The modes offered to the user, in toolbar order
    pub const DRAWING: [DrawMode; 3] = [DrawMode::Point, DrawMode::Line, DrawMode::Polygon];

    /// The geometry kind a draw interaction for this mode is configured with
    pub fn geometry_kind(&self) -> Option<GeometryKind> {
        match self {
            Self::None => None,
            Self::Point => Some(GeometryKind::Point),
            Self::Line => Some(GeometryKind::LineString),
            Self::Polygon => Some(GeometryKind::Polygon),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Point => "Point",
            Self::Line => "Line",
            Self::Polygon => "Polygon",
        }
    }
}

/// Holds the active draw mode.
///
/// A pure state holder: the host reads the result of [`set_mode`](Self::set_mode)
/// to decide whether the draw interaction needs re-wiring.
#[derive(Debug, Default)]
pub struct DrawModeController {
    mode: DrawMode,
}

impl DrawModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Select a mode. Returns the previous mode if it changed.
    pub fn set_mode(&mut self, mode: DrawMode) -> Option<DrawMode> {
        if self.mode == mode {
            return None;
        }
        let old = self.mode;
        self.mode = mode;
        Some(old)
    }
}
