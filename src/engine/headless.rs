use std::collections::BTreeMap;

use log::debug;

use super::{
    HandleAllocator, InteractionId, InteractionSpec, LayerId, LayerSpec, MapEngine, MountTarget,
    OverlayId, OverlaySpec,
};
use crate::error::EngineError;
use crate::geometry::Coordinate;

/// One call made into the engine, in the order it happened
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Mount(String),
    Unmount,
    AddLayer(LayerId),
    RemoveLayer(LayerId),
    AddInteraction(InteractionId, InteractionSpec),
    RemoveInteraction(InteractionId),
    AddOverlay(OverlayId),
    SetOverlayPosition(OverlayId, Option<Coordinate>),
    RemoveOverlay(OverlayId),
}

#[derive(Debug, Clone)]
struct OverlayState {
    spec: OverlaySpec,
    position: Option<Coordinate>,
}

/// A map engine without a surface.
///
/// Keeps track of everything attached to it so the host can run headless
/// and so the attachment invariants can be inspected.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    handles: HandleAllocator,
    /// `None` accepts any non-empty target id
    known_targets: Option<Vec<String>>,
    mounted: Option<String>,
    layers: BTreeMap<LayerId, LayerSpec>,
    interactions: BTreeMap<InteractionId, InteractionSpec>,
    overlays: BTreeMap<OverlayId, OverlayState>,
    calls: Vec<EngineCall>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine that can only mount on the given target ids
    pub fn with_targets<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_targets: Some(targets.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &LayerSpec)> {
        self.layers.iter().map(|(id, spec)| (*id, spec))
    }

    pub fn interactions(&self) -> impl Iterator<Item = (InteractionId, InteractionSpec)> + '_ {
        self.interactions.iter().map(|(id, spec)| (*id, *spec))
    }

    pub fn draw_interaction_count(&self) -> usize {
        self.interactions.values().filter(|s| s.is_draw()).count()
    }

    pub fn modify_interaction_count(&self) -> usize {
        self.interactions
            .values()
            .filter(|s| matches!(s, InteractionSpec::Modify))
            .count()
    }

    pub fn has_interaction(&self, id: InteractionId) -> bool {
        self.interactions.contains_key(&id)
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn overlay_spec(&self, id: OverlayId) -> Option<&OverlaySpec> {
        self.overlays.get(&id).map(|o| &o.spec)
    }

    pub fn overlay_position(&self, id: OverlayId) -> Option<Coordinate> {
        self.overlays.get(&id).and_then(|o| o.position)
    }

    /// Every call made so far
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl MapEngine for HeadlessEngine {
    fn mount(&mut self, target: &MountTarget) -> Result<(), EngineError> {
        if target.id.is_empty() {
            return Err(EngineError::NoMountTarget(target.id.clone()));
        }
        if let Some(known) = &self.known_targets {
            if !known.contains(&target.id) {
                return Err(EngineError::NoMountTarget(target.id.clone()));
            }
        }
        if self.mounted.is_some() {
            return Err(EngineError::MountFailed("surface is already mounted".to_string()));
        }
        debug!("headless engine mounted on '{}'", target.id);
        self.mounted = Some(target.id.clone());
        self.calls.push(EngineCall::Mount(target.id.clone()));
        Ok(())
    }

    fn unmount(&mut self) {
        self.mounted = None;
        self.calls.push(EngineCall::Unmount);
    }

    fn add_layer(&mut self, layer: LayerSpec) -> LayerId {
        let id = self.handles.layer();
        self.layers.insert(id, layer);
        self.calls.push(EngineCall::AddLayer(id));
        id
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id);
        self.calls.push(EngineCall::RemoveLayer(id));
    }

    fn add_interaction(&mut self, interaction: InteractionSpec) -> InteractionId {
        let id = self.handles.interaction();
        self.interactions.insert(id, interaction);
        self.calls.push(EngineCall::AddInteraction(id, interaction));
        id
    }

    fn remove_interaction(&mut self, id: InteractionId) {
        self.interactions.remove(&id);
        self.calls.push(EngineCall::RemoveInteraction(id));
    }

    fn add_overlay(&mut self, overlay: OverlaySpec) -> OverlayId {
        let id = self.handles.overlay();
        self.overlays.insert(
            id,
            OverlayState {
                spec: overlay,
                position: None,
            },
        );
        self.calls.push(EngineCall::AddOverlay(id));
        id
    }

    fn set_overlay_position(&mut self, id: OverlayId, position: Option<Coordinate>) {
        if let Some(overlay) = self.overlays.get_mut(&id) {
            overlay.position = position;
        }
        self.calls.push(EngineCall::SetOverlayPosition(id, position));
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.remove(&id);
        self.calls.push(EngineCall::RemoveOverlay(id));
    }
}
