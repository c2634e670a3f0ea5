use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A position in map projection space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Coordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// The kinds of geometry a draw interaction can be configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

impl GeometryKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
        }
    }

    /// Fewest vertices a sketch of this kind needs before it can finish
    pub fn min_vertices(&self) -> usize {
        match self {
            Self::Point => 1,
            Self::LineString => 2,
            Self::Polygon => 3,
        }
    }
}

/// Addresses one vertex inside a geometry.
///
/// `ring` is always 0 for points and lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexPath {
    pub ring: usize,
    pub index: usize,
}

impl VertexPath {
    pub fn new(ring: usize, index: usize) -> Self {
        Self { ring, index }
    }
}

/// A finished geometry as produced by a draw interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    /// Rings of the polygon. Ring 0 is the exterior; every ring is closed.
    Polygon(Vec<Vec<Coordinate>>),
    /// A geometry kind the engine produced but this crate does not model
    Unsupported { kind: String },
}

impl Geometry {
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Point(_) => "Point",
            Self::LineString(_) => "LineString",
            Self::Polygon(_) => "Polygon",
            Self::Unsupported { kind } => kind,
        }
    }

    /// The coordinates reported when a draw of this geometry completes.
    ///
    /// Points yield a single coordinate, lines their vertices in drawing
    /// order, polygons their exterior ring including the closing vertex.
    pub fn extract_coordinates(&self) -> Result<Vec<Coordinate>, GeometryError> {
        match self {
            Self::Point(c) => Ok(vec![*c]),
            Self::LineString(coords) => Ok(coords.clone()),
            Self::Polygon(rings) => match rings.first() {
                Some(exterior) => Ok(exterior.clone()),
                None => Err(GeometryError::Malformed {
                    kind: "Polygon".to_string(),
                    reason: "polygon has no rings".to_string(),
                }),
            },
            Self::Unsupported { kind } => Err(GeometryError::Malformed {
                kind: kind.clone(),
                reason: "unrecognized geometry kind".to_string(),
            }),
        }
    }

    /// All vertices with their paths, in storage order
    pub fn vertices(&self) -> Vec<(VertexPath, Coordinate)> {
        match self {
            Self::Point(c) => vec![(VertexPath::new(0, 0), *c)],
            Self::LineString(coords) => coords
                .iter()
                .enumerate()
                .map(|(i, c)| (VertexPath::new(0, i), *c))
                .collect(),
            Self::Polygon(rings) => rings
                .iter()
                .enumerate()
                .flat_map(|(r, ring)| {
                    ring.iter()
                        .enumerate()
                        .map(move |(i, c)| (VertexPath::new(r, i), *c))
                })
                .collect(),
            Self::Unsupported { .. } => Vec::new(),
        }
    }

    /// Move one vertex in place. Returns false when the path does not exist.
    ///
    /// Polygon rings stay closed: moving the first or last vertex of a ring
    /// moves both.
    pub fn set_vertex(&mut self, path: VertexPath, to: Coordinate) -> bool {
        match self {
            Self::Point(c) => {
                if path.ring != 0 || path.index != 0 {
                    return false;
                }
                *c = to;
                true
            }
            Self::LineString(coords) => {
                if path.ring != 0 {
                    return false;
                }
                match coords.get_mut(path.index) {
                    Some(c) => {
                        *c = to;
                        true
                    }
                    None => false,
                }
            }
            Self::Polygon(rings) => {
                let Some(ring) = rings.get_mut(path.ring) else {
                    return false;
                };
                if path.index >= ring.len() {
                    return false;
                }
                let last = ring.len() - 1;
                let closed = last > 0 && ring[0] == ring[last];
                ring[path.index] = to;
                if closed && path.index == 0 {
                    ring[last] = to;
                } else if closed && path.index == last {
                    ring[0] = to;
                }
                true
            }
            Self::Unsupported { .. } => false,
        }
    }
}

/// Build the geometry a finished sketch of `kind` represents.
///
/// Polygon sketches are closed by repeating the first vertex.
pub fn geometry_from_sketch(kind: GeometryKind, vertices: &[Coordinate]) -> Option<Geometry> {
    if vertices.len() < kind.min_vertices() {
        return None;
    }
    let geometry = match kind {
        GeometryKind::Point => Geometry::Point(vertices[0]),
        GeometryKind::LineString => Geometry::LineString(vertices.to_vec()),
        GeometryKind::Polygon => {
            let mut ring = vertices.to_vec();
            if ring.first() != ring.last() {
                ring.push(vertices[0]);
            }
            Geometry::Polygon(vec![ring])
        }
    };
    Some(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_polygon_start_keeps_ring_closed() {
        let mut polygon = geometry_from_sketch(
            GeometryKind::Polygon,
            &[(0.0, 0.0).into(), (1.0, 0.0).into(), (0.0, 1.0).into()],
        )
        .unwrap();

        assert!(polygon.set_vertex(VertexPath::new(0, 0), Coordinate::new(-1.0, -1.0)));

        let Geometry::Polygon(rings) = &polygon else {
            panic!("expected polygon");
        };
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0][0], Coordinate::new(-1.0, -1.0));
        assert_eq!(rings[0][3], Coordinate::new(-1.0, -1.0));
    }

    #[test]
    fn short_sketches_do_not_finish() {
        assert!(geometry_from_sketch(GeometryKind::LineString, &[Coordinate::ORIGIN]).is_none());
        assert!(geometry_from_sketch(GeometryKind::Polygon, &[Coordinate::ORIGIN; 2]).is_none());
        assert!(geometry_from_sketch(GeometryKind::Point, &[]).is_none());
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let mut line = Geometry::LineString(vec![Coordinate::ORIGIN]);
        assert!(!line.set_vertex(VertexPath::new(0, 3), Coordinate::ORIGIN));
        assert!(!line.set_vertex(VertexPath::new(1, 0), Coordinate::ORIGIN));
    }
}
