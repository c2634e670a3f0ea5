use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Coordinate, Geometry, VertexPath};

/// Opaque identifier of a stored feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureId(Uuid);

impl FeatureId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A drawn geometry plus its identity
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    id: FeatureId,
    geometry: Geometry,
}

impl Feature {
    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

/// In-memory collection of everything that has been drawn.
///
/// Owned by the map view host; features are only removed when the view is
/// torn down.
#[derive(Debug, Default)]
pub struct GeometryStore {
    features: Vec<Feature>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, geometry: Geometry) -> FeatureId {
        let id = FeatureId::new();
        self.features.push(Feature { id, geometry });
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Edit one vertex in place on behalf of the modify interaction
    pub fn move_vertex(&mut self, id: FeatureId, path: VertexPath, to: Coordinate) -> bool {
        match self.features.iter_mut().find(|f| f.id == id) {
            Some(feature) => feature.geometry.set_vertex(path, to),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.features.clear();
    }
}
