//! The map view host: keeps the draw mode, the geometry store, the marker and
//! the engine's interactions consistent with each other.
//!
//! # Lifecycle
//!
//! ```text
//! ┌───────────────┐  init   ┌─────────┐  dispose  ┌──────────┐
//! │ Uninitialized ├────────►│  Ready  ├──────────►│ Disposed │
//! └───────────────┘         └──┬───▲──┘           └──────────┘
//!                              │   │ set_mode
//!                              └───┘
//! ```
//!
//! While `Ready` the host owns at most one draw interaction handle. Every mode
//! change detaches the old handle before a new one is attached, so the engine
//! never carries two draw interactions at once. The modify interaction is
//! attached once by `init` and stays until `dispose`.
//!
//! # Example
//!
//! ```rust
//! use map_draw::{DrawMode, MapConfig, MapViewHost};
//! use map_draw::engine::HeadlessEngine;
//!
//! let mut host = MapViewHost::new(HeadlessEngine::new(), MapConfig::default());
//! host.init().expect("mount target exists");
//! host.set_mode(DrawMode::Polygon).unwrap();
//! assert!(host.active_draw_interaction().is_some());
//! ```
use log::{debug, info, warn};

use crate::config::MapConfig;
use crate::engine::{
    InteractionId, InteractionSpec, LayerId, LayerSpec, MapEngine, MountTarget, OverlayId,
    OverlaySpec, TileSource,
};
use crate::error::MapError;
use crate::event::{DrawnFeature, EngineEvent, EventBus, MapViewEvent};
use crate::geometry::{Coordinate, GeometryKind};
use crate::marker::MarkerController;
use crate::mode::{DrawMode, DrawModeController};
use crate::store::GeometryStore;

/// The draw interaction currently attached, and what it was configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawBinding {
    pub interaction: InteractionId,
    pub kind: GeometryKind,
}

/// Handles of everything `init` attached to the engine
#[derive(Debug)]
pub struct Attachments {
    base_layer: LayerId,
    vector_layer: LayerId,
    marker: OverlayId,
    modify: InteractionId,
    draw: Option<DrawBinding>,
}

#[derive(Debug, Default)]
pub enum HostState {
    #[default]
    Uninitialized,
    Ready(Attachments),
    Disposed,
}

impl HostState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Ready(_) => "Ready",
            Self::Disposed => "Disposed",
        }
    }
}

#[derive(Debug)]
pub struct MapViewHost<E: MapEngine> {
    engine: E,
    config: MapConfig,
    state: HostState,
    modes: DrawModeController,
    store: GeometryStore,
    marker: MarkerController,
    event_bus: EventBus,
}

impl<E: MapEngine> MapViewHost<E> {
    /// Creates a host in the `Uninitialized` state
    pub fn new(engine: E, config: MapConfig) -> Self {
        Self {
            engine,
            config,
            state: HostState::Uninitialized,
            modes: DrawModeController::new(),
            store: GeometryStore::new(),
            marker: MarkerController::new(),
            event_bus: EventBus::new(),
        }
    }

    /// Mounts the map surface and attaches the base layer, the vector layer,
    /// the marker overlay and the modify interaction.
    ///
    /// A mode selected before `init` gets its draw interaction attached here.
    ///
    /// # Errors
    ///
    /// `MapError::InitializationFailure` if the engine cannot mount on the
    /// configured target. The host stays `Uninitialized` and `init` may be
    /// retried.
    pub fn init(&mut self) -> Result<(), MapError> {
        match self.state {
            HostState::Uninitialized => {}
            HostState::Ready(_) => return Err(MapError::AlreadyInitialized),
            HostState::Disposed => return Err(MapError::Disposed),
        }

        let target = MountTarget::new(self.config.mount_target.clone());
        self.engine
            .mount(&target)
            .map_err(|e| MapError::InitializationFailure {
                target: target.id.clone(),
                reason: e.to_string(),
            })?;

        let base_layer = self.engine.add_layer(LayerSpec::Tiles {
            source: TileSource::OpenStreetMap,
        });
        let vector_layer = self.engine.add_layer(LayerSpec::Vector {
            style: self.config.style.clone(),
            wrap_x: self.config.wrap_x,
        });
        let marker = self.engine.add_overlay(OverlaySpec {
            marker: self.config.marker.clone(),
        });
        let modify = self.engine.add_interaction(InteractionSpec::Modify);

        let mut attachments = Attachments {
            base_layer,
            vector_layer,
            marker,
            modify,
            draw: None,
        };
        Self::rewire(&mut self.engine, &mut attachments, self.modes.mode());
        self.state = HostState::Ready(attachments);

        info!(
            "map view ready on '{}' (mode: {})",
            target.id,
            self.modes.mode().name()
        );
        Ok(())
    }

    /// Selects the draw mode, re-wiring the draw interaction if it changed.
    ///
    /// Selecting the current mode again does nothing.
    pub fn set_mode(&mut self, mode: DrawMode) -> Result<(), MapError> {
        if matches!(self.state, HostState::Disposed) {
            return Err(MapError::Disposed);
        }
        let Some(old) = self.modes.set_mode(mode) else {
            return Ok(());
        };

        info!("draw mode changed: {} -> {}", old.name(), mode.name());
        if let HostState::Ready(attachments) = &mut self.state {
            Self::rewire(&mut self.engine, attachments, mode);
        }
        self.event_bus.emit(MapViewEvent::ModeChanged { old, new: mode });
        Ok(())
    }

    /// Detach the current draw interaction, then attach one for `mode`
    fn rewire(engine: &mut E, attachments: &mut Attachments, mode: DrawMode) {
        if let Some(old) = attachments.draw.take() {
            debug!("detaching {} draw interaction {:?}", old.kind.name(), old.interaction);
            engine.remove_interaction(old.interaction);
        }
        attachments.draw = mode.geometry_kind().map(|kind| {
            let interaction = engine.add_interaction(InteractionSpec::Draw { kind });
            debug!("attached {} draw interaction {:?}", kind.name(), interaction);
            DrawBinding { interaction, kind }
        });
    }

    /// Feed one engine event into the host.
    ///
    /// Returns the drawn feature when the event finished a draw whose
    /// coordinates could be extracted.
    pub fn handle_event(&mut self, event: EngineEvent) -> Option<DrawnFeature> {
        let HostState::Ready(attachments) = &self.state else {
            debug!("ignoring {:?} while {}", event, self.state.name());
            return None;
        };

        match event {
            EngineEvent::MapClick(coordinate) => {
                self.marker.on_map_click(coordinate);
                self.engine
                    .set_overlay_position(attachments.marker, Some(coordinate));
                self.event_bus.emit(MapViewEvent::MarkerMoved {
                    position: coordinate,
                });
                None
            }
            EngineEvent::DrawComplete {
                interaction,
                geometry,
            } => {
                let binding = match attachments.draw {
                    Some(binding) if binding.interaction == interaction => binding,
                    _ => {
                        debug!("dropping draw-complete from detached interaction {:?}", interaction);
                        return None;
                    }
                };

                let coordinates = geometry.extract_coordinates();
                let id = self.store.add(geometry);
                match coordinates {
                    Ok(coordinates) => {
                        info!("Coordinates: {:?}", coordinates);
                        let drawn = DrawnFeature {
                            id,
                            kind: binding.kind,
                            coordinates,
                        };
                        self.event_bus.emit(MapViewEvent::FeatureDrawn(drawn.clone()));
                        Some(drawn)
                    }
                    Err(e) => {
                        warn!("feature {} stored without coordinates: {}", id, e);
                        None
                    }
                }
            }
            EngineEvent::VertexMoved {
                feature,
                vertex,
                to,
            } => {
                if self.store.move_vertex(feature, vertex, to) {
                    self.event_bus.emit(MapViewEvent::FeatureModified { id: feature });
                } else {
                    warn!("modify interaction moved unknown vertex {:?} of {}", vertex, feature);
                }
                None
            }
        }
    }

    /// Tears the map down: detaches every interaction, overlay and layer,
    /// unmounts the surface and clears the store. Irreversible.
    pub fn dispose(&mut self) {
        match std::mem::replace(&mut self.state, HostState::Disposed) {
            HostState::Ready(attachments) => {
                if let Some(draw) = attachments.draw {
                    self.engine.remove_interaction(draw.interaction);
                }
                self.engine.remove_interaction(attachments.modify);
                self.engine.remove_overlay(attachments.marker);
                self.engine.remove_layer(attachments.vector_layer);
                self.engine.remove_layer(attachments.base_layer);
                self.engine.unmount();
                self.store.clear();
                info!("map view disposed");
                self.event_bus.emit(MapViewEvent::Disposed);
            }
            HostState::Uninitialized => {
                self.event_bus.emit(MapViewEvent::Disposed);
            }
            HostState::Disposed => {}
        }
    }

    pub fn mode(&self) -> DrawMode {
        self.modes.mode()
    }

    pub fn state(&self) -> &HostState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, HostState::Ready(_))
    }

    pub fn active_draw(&self) -> Option<DrawBinding> {
        match &self.state {
            HostState::Ready(attachments) => attachments.draw,
            _ => None,
        }
    }

    pub fn active_draw_interaction(&self) -> Option<InteractionId> {
        self.active_draw().map(|d| d.interaction)
    }

    pub fn modify_interaction(&self) -> Option<InteractionId> {
        match &self.state {
            HostState::Ready(attachments) => Some(attachments.modify),
            _ => None,
        }
    }

    pub fn marker_overlay(&self) -> Option<OverlayId> {
        match &self.state {
            HostState::Ready(attachments) => Some(attachments.marker),
            _ => None,
        }
    }

    pub fn marker_position(&self) -> Option<Coordinate> {
        self.marker.position()
    }

    pub fn store(&self) -> &GeometryStore {
        &self.store
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

impl MapViewHost<crate::engine::EguiMapEngine> {
    /// Render the map viewport and process the frame's input
    pub fn show(&mut self, ui: &mut egui::Ui) -> Vec<DrawnFeature> {
        let height = self.config.viewport_height;
        let events = self.engine.ui(ui, &self.store, height);
        events
            .into_iter()
            .filter_map(|event| self.handle_event(event))
            .collect()
    }
}
