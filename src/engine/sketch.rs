use crate::geometry::{Coordinate, Geometry, GeometryKind, geometry_from_sketch};

/// The in-progress geometry of a draw interaction
///
/// Gathers vertices between the first click and the finishing click. Only
/// [`Sketch::finish`] turns it into a [`Geometry`].
#[derive(Debug, Clone)]
pub struct Sketch {
    kind: GeometryKind,
    vertices: Vec<Coordinate>,
}

impl Sketch {
    pub fn new(kind: GeometryKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn add_vertex(&mut self, vertex: Coordinate) {
        self.vertices.push(vertex);
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// A point sketch finishes on its first vertex
    pub fn finishes_on_click(&self) -> bool {
        self.kind == GeometryKind::Point
    }

    pub fn can_finish(&self) -> bool {
        self.vertices.len() >= self.kind.min_vertices()
    }

    /// Consume the sketch, producing a geometry if enough vertices were placed
    pub fn finish(self) -> Option<Geometry> {
        geometry_from_sketch(self.kind, &self.vertices)
    }
}
