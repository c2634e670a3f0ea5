use egui::load::{SizeHint, TexturePoll};
use egui::{
    Align2, Color32, CursorIcon, FontId, Mesh, Painter, Pos2, Rect, Sense, Shape, Stroke, TextureOptions, Ui,
    Vec2,
};
use log::{debug, info, trace};

use super::tiles::{self, TileSource};
use super::triangulate::triangulate;
use super::{
    HandleAllocator, InteractionId, InteractionSpec, LayerId, LayerSpec, MapEngine, MapView,
    MountTarget, OverlayId, OverlaySpec, Sketch,
};
use crate::config::{MapConfig, Positioning, VectorStyle};
use crate::error::EngineError;
use crate::event::EngineEvent;
use crate::geometry::{Coordinate, Geometry, GeometryKind, VertexPath};
use crate::projection::HALF_WORLD;
use crate::store::{FeatureId, GeometryStore};

const BACKGROUND: Color32 = Color32::from_rgb(0xaa, 0xd3, 0xdf);
const WORLD_FILL: Color32 = Color32::from_rgb(0xf2, 0xef, 0xe9);
const GRID_COLOR: Color32 = Color32::from_gray(200);
const SKETCH_COLOR: Color32 = Color32::from_rgb(0x33, 0x99, 0xcc);
/// Horizontal offsets of the world copies drawn when the vector layer wraps
static WORLD_SHIFTS: [f64; 3] = [-2.0 * HALF_WORLD, 0.0, 2.0 * HALF_WORLD];

#[derive(Debug, Clone, Copy)]
struct VertexGrab {
    feature: FeatureId,
    vertex: VertexPath,
    /// World copy the vertex was grabbed on
    shift: f64,
}

#[derive(Debug, Clone)]
struct Overlay {
    spec: OverlaySpec,
    position: Option<Coordinate>,
}

impl Overlay {
    /// Screen center of the marker dot for the overlay's positioning
    fn anchor(&self, pos: Pos2) -> Pos2 {
        let r = self.spec.marker.radius;
        match self.spec.marker.positioning {
            Positioning::CenterCenter => pos,
            Positioning::TopLeft => pos + Vec2::splat(r),
            Positioning::BottomCenter => pos - Vec2::new(0.0, r),
        }
    }
}

/// An interactive map engine drawn with egui.
///
/// Renders raster tiles from the base layer's source, the vector layer from
/// the geometry store, the in-progress sketch and the marker overlay.
/// Dragging pans, scrolling zooms.
///
/// Tiles are fetched through the context's image loaders, so
/// `egui_extras::install_image_loaders` must have run for imagery to show.
pub struct EguiMapEngine {
    handles: HandleAllocator,
    view: MapView,
    vertex_tolerance: f32,
    mounted: Option<egui::Id>,
    layers: Vec<(LayerId, LayerSpec)>,
    draws: Vec<(InteractionId, Sketch)>,
    modify: Option<InteractionId>,
    grab: Option<VertexGrab>,
    overlays: Vec<(OverlayId, Overlay)>,
}

impl std::fmt::Debug for EguiMapEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EguiMapEngine")
            .field("view", &self.view)
            .field("mounted", &self.mounted.is_some())
            .field("layers", &self.layers.len())
            .field("draws", &self.draws.len())
            .field("modify", &self.modify)
            .finish()
    }
}

impl EguiMapEngine {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            handles: HandleAllocator::default(),
            view: MapView::new(&config.view),
            vertex_tolerance: config.vertex_tolerance,
            mounted: None,
            layers: Vec::new(),
            draws: Vec::new(),
            modify: None,
            grab: None,
            overlays: Vec::new(),
        }
    }

    /// Lay out the map viewport, render it and translate this frame's input
    /// into engine events.
    pub fn ui(&mut self, ui: &mut Ui, store: &GeometryStore, height: f32) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        if self.mounted.is_none() {
            ui.label("Map surface is not mounted");
            return events;
        }

        let size = Vec2::new(ui.available_width(), height);
        let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
        let rect = response.rect;

        if let Some(hover) = response.hover_pos() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.view.zoom_at(rect, hover, scroll as f64 / 120.0);
            }
            if !self.draws.is_empty() {
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            } else if self.modify.is_some() && self.vertex_at(rect, store, hover).is_some() {
                ui.ctx().set_cursor_icon(CursorIcon::Grab);
            }
        }

        if response.drag_started() {
            let origin = ui.input(|i| i.pointer.press_origin());
            self.grab = match (self.modify, origin) {
                (Some(_), Some(origin)) => self.vertex_at(rect, store, origin),
                _ => None,
            };
        }
        if response.dragged() {
            match (self.grab, response.interact_pointer_pos()) {
                (Some(grab), Some(pos)) => {
                    let to = self.view.screen_to_map(rect, pos);
                    events.push(EngineEvent::VertexMoved {
                        feature: grab.feature,
                        vertex: grab.vertex,
                        to: Coordinate::new(to.x - grab.shift, to.y),
                    });
                }
                _ => self.view.pan(response.drag_delta()),
            }
        }
        if response.drag_stopped() {
            self.grab = None;
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if !self.click_stopped_by_overlay(rect, pos) {
                    let finish = response.double_clicked();
                    self.handle_click(rect, pos, finish, &mut events);
                }
            }
        }

        self.paint(&painter, rect, store, response.hover_pos());
        events
    }

    fn handle_click(&mut self, rect: Rect, pos: Pos2, finish: bool, events: &mut Vec<EngineEvent>) {
        let coordinate = self.view.screen_to_map(rect, pos);
        events.push(EngineEvent::MapClick(coordinate));

        let view = &self.view;
        let tolerance = self.vertex_tolerance;
        for (id, sketch) in &mut self.draws {
            let kind = sketch.kind();
            let closes_ring = kind == GeometryKind::Polygon
                && sketch.can_finish()
                && sketch
                    .vertices()
                    .first()
                    .is_some_and(|first| (view.map_to_screen(rect, *first) - pos).length() <= tolerance);

            if (finish && kind != GeometryKind::Point) || closes_ring {
                // The first click of a double click already placed this vertex
                if sketch.can_finish() {
                    let done = std::mem::replace(sketch, Sketch::new(kind));
                    if let Some(geometry) = done.finish() {
                        debug!("draw interaction {:?} finished a {}", id, geometry.kind_name());
                        events.push(EngineEvent::DrawComplete {
                            interaction: *id,
                            geometry,
                        });
                    }
                }
                continue;
            }

            sketch.add_vertex(coordinate);
            if sketch.finishes_on_click() {
                let done = std::mem::replace(sketch, Sketch::new(kind));
                if let Some(geometry) = done.finish() {
                    events.push(EngineEvent::DrawComplete {
                        interaction: *id,
                        geometry,
                    });
                }
            }
        }
    }

    fn click_stopped_by_overlay(&self, rect: Rect, pos: Pos2) -> bool {
        self.overlays.iter().any(|(_, overlay)| {
            overlay.spec.marker.stop_event
                && overlay.position.is_some_and(|p| {
                    let center = overlay.anchor(self.view.map_to_screen(rect, p));
                    (center - pos).length() <= overlay.spec.marker.radius
                })
        })
    }

    /// World copies the vector layer is drawn at
    fn vector_shifts(&self) -> &'static [f64] {
        let wraps = self
            .layers
            .iter()
            .any(|(_, layer)| matches!(layer, LayerSpec::Vector { wrap_x: true, .. }));
        if wraps { &WORLD_SHIFTS[..] } else { &WORLD_SHIFTS[1..2] }
    }

    /// Nearest stored vertex within the grab tolerance of `pos`, on any
    /// drawn world copy
    fn vertex_at(&self, rect: Rect, store: &GeometryStore, pos: Pos2) -> Option<VertexGrab> {
        let shifts = self.vector_shifts();
        let mut best: Option<(f32, VertexGrab)> = None;
        for feature in store.iter() {
            for (vertex, c) in feature.geometry().vertices() {
                for &shift in shifts {
                    let screen = self.view.map_to_screen(rect, Coordinate::new(c.x + shift, c.y));
                    let d = (screen - pos).length();
                    if d <= self.vertex_tolerance && best.is_none_or(|(bd, _)| d < bd) {
                        best = Some((
                            d,
                            VertexGrab {
                                feature: feature.id(),
                                vertex,
                                shift,
                            },
                        ));
                    }
                }
            }
        }
        best.map(|(_, grab)| grab)
    }

    fn paint(&self, painter: &Painter, rect: Rect, store: &GeometryStore, hover: Option<Pos2>) {
        painter.rect_filled(rect, 0.0, BACKGROUND);

        for (_, layer) in &self.layers {
            match layer {
                LayerSpec::Tiles { source } => self.paint_tiles(painter, rect, *source),
                LayerSpec::Vector { style, wrap_x } => {
                    let shifts = if *wrap_x { &WORLD_SHIFTS[..] } else { &WORLD_SHIFTS[1..2] };
                    for feature in store.iter() {
                        for shift in shifts {
                            self.paint_geometry(painter, rect, feature.geometry(), style, *shift);
                        }
                    }
                }
            }
        }

        for (_, sketch) in &self.draws {
            self.paint_sketch(painter, rect, sketch, hover);
        }

        for (_, overlay) in &self.overlays {
            if let Some(position) = overlay.position {
                let center = overlay.anchor(self.view.map_to_screen(rect, position));
                let marker = &overlay.spec.marker;
                painter.circle_filled(center, marker.radius, marker.color.to_color32());
                painter.circle_stroke(center, marker.radius, Stroke::new(1.5, Color32::WHITE));
            }
        }

        painter.text(
            rect.left_bottom() + Vec2::new(6.0, -6.0),
            Align2::LEFT_BOTTOM,
            format!("zoom {:.1}", self.view.zoom()),
            FontId::monospace(11.0),
            Color32::DARK_GRAY,
        );
    }

    /// Raster tiles covering the viewport. Tiles still loading, or that
    /// failed to load, show as an outline on the land fill.
    fn paint_tiles(&self, painter: &Painter, rect: Rect, source: TileSource) {
        let top = self.view.map_to_screen(rect, Coordinate::new(0.0, HALF_WORLD)).y;
        let bottom = self.view.map_to_screen(rect, Coordinate::new(0.0, -HALF_WORLD)).y;
        let band = Rect::from_x_y_ranges(rect.x_range(), top..=bottom);
        painter.rect_filled(band.intersect(rect), 0.0, WORLD_FILL);

        let zoom = tiles::tile_zoom(self.view.zoom());
        let corner_a = self.view.screen_to_map(rect, rect.left_top());
        let corner_b = self.view.screen_to_map(rect, rect.right_bottom());
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));

        for placed in tiles::covering(corner_a, corner_b, zoom) {
            let tile_rect = Rect::from_min_max(
                self.view.map_to_screen(rect, placed.top_left),
                self.view.map_to_screen(rect, placed.bottom_right),
            );
            let url = source.url(placed.tile);
            match painter
                .ctx()
                .try_load_texture(&url, TextureOptions::LINEAR, SizeHint::default())
            {
                Ok(TexturePoll::Ready { texture }) => {
                    painter.image(texture.id, tile_rect, uv, Color32::WHITE);
                }
                Ok(TexturePoll::Pending { .. }) => {
                    painter.rect_stroke(tile_rect, 0.0, Stroke::new(1.0, GRID_COLOR));
                }
                Err(e) => {
                    trace!("tile {} unavailable: {}", url, e);
                    painter.rect_stroke(tile_rect, 0.0, Stroke::new(1.0, GRID_COLOR));
                }
            }
        }

        painter.text(
            rect.right_bottom() - Vec2::splat(4.0),
            Align2::RIGHT_BOTTOM,
            source.attribution(),
            FontId::proportional(10.0),
            Color32::DARK_GRAY,
        );
    }

    fn paint_geometry(
        &self,
        painter: &Painter,
        rect: Rect,
        geometry: &Geometry,
        style: &VectorStyle,
        shift: f64,
    ) {
        let to_screen = |c: &Coordinate| {
            self.view
                .map_to_screen(rect, Coordinate::new(c.x + shift, c.y))
        };
        let stroke = Stroke::new(style.stroke_width, style.stroke_color.to_color32());

        match geometry {
            Geometry::Point(c) => {
                painter.circle_filled(to_screen(c), style.point_radius, style.point_fill.to_color32());
            }
            Geometry::LineString(coords) => {
                painter.add(Shape::line(coords.iter().map(&to_screen).collect(), stroke));
            }
            Geometry::Polygon(rings) => {
                for (i, ring) in rings.iter().enumerate() {
                    let points: Vec<Pos2> = ring.iter().map(&to_screen).collect();
                    if i == 0 {
                        let indices = triangulate(&points);
                        if !indices.is_empty() {
                            let fill = style.fill.to_color32();
                            let mut mesh = Mesh::default();
                            for p in &points {
                                mesh.colored_vertex(*p, fill);
                            }
                            for t in indices.chunks_exact(3) {
                                mesh.add_triangle(t[0], t[1], t[2]);
                            }
                            painter.add(Shape::mesh(mesh));
                        }
                    }
                    painter.add(Shape::closed_line(points, stroke));
                }
            }
            Geometry::Unsupported { .. } => {}
        }
    }

    fn paint_sketch(&self, painter: &Painter, rect: Rect, sketch: &Sketch, hover: Option<Pos2>) {
        if sketch.is_empty() {
            return;
        }
        let mut points: Vec<Pos2> = sketch
            .vertices()
            .iter()
            .map(|c| self.view.map_to_screen(rect, *c))
            .collect();
        for p in &points {
            painter.circle_filled(*p, 4.0, SKETCH_COLOR);
        }
        if let Some(hover) = hover {
            points.push(hover);
        }
        painter.add(Shape::line(points, Stroke::new(1.5, SKETCH_COLOR)));
    }
}

impl MapEngine for EguiMapEngine {
    fn mount(&mut self, target: &MountTarget) -> Result<(), EngineError> {
        if target.id.is_empty() {
            return Err(EngineError::NoMountTarget(target.id.clone()));
        }
        if self.mounted.is_some() {
            return Err(EngineError::MountFailed("surface is already mounted".to_string()));
        }
        info!("mounting map surface on '{}'", target.id);
        self.mounted = Some(egui::Id::new(&target.id));
        Ok(())
    }

    fn unmount(&mut self) {
        self.mounted = None;
        self.grab = None;
    }

    fn add_layer(&mut self, layer: LayerSpec) -> LayerId {
        let id = self.handles.layer();
        self.layers.push((id, layer));
        id
    }

    fn remove_layer(&mut self, id: LayerId) {
        self.layers.retain(|(l, _)| *l != id);
    }

    fn add_interaction(&mut self, interaction: InteractionSpec) -> InteractionId {
        let id = self.handles.interaction();
        match interaction {
            InteractionSpec::Draw { kind } => self.draws.push((id, Sketch::new(kind))),
            InteractionSpec::Modify => self.modify = Some(id),
        }
        id
    }

    fn remove_interaction(&mut self, id: InteractionId) {
        // Dropping the sketch discards any half-drawn geometry
        self.draws.retain(|(d, _)| *d != id);
        if self.modify == Some(id) {
            self.modify = None;
            self.grab = None;
        }
    }

    fn add_overlay(&mut self, overlay: OverlaySpec) -> OverlayId {
        let id = self.handles.overlay();
        self.overlays.push((
            id,
            Overlay {
                spec: overlay,
                position: None,
            },
        ));
        id
    }

    fn set_overlay_position(&mut self, id: OverlayId, position: Option<Coordinate>) {
        if let Some((_, overlay)) = self.overlays.iter_mut().find(|(o, _)| *o == id) {
            overlay.position = position;
        }
    }

    fn remove_overlay(&mut self, id: OverlayId) {
        self.overlays.retain(|(o, _)| *o != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewConfig;

    fn viewport() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 400.0))
    }

    fn engine_drawing(kind: GeometryKind) -> (EguiMapEngine, InteractionId) {
        let mut engine = EguiMapEngine::new(&MapConfig::default());
        let id = engine.add_interaction(InteractionSpec::Draw { kind });
        (engine, id)
    }

    fn click(engine: &mut EguiMapEngine, x: f32, y: f32, finish: bool) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        engine.handle_click(viewport(), Pos2::new(x, y), finish, &mut events);
        events
    }

    fn completed(events: &[EngineEvent]) -> Vec<(InteractionId, Geometry)> {
        events
            .iter()
            .filter_map(|e| match e {
                EngineEvent::DrawComplete { interaction, geometry } => Some((*interaction, geometry.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn double_click_finishes_line_without_duplicate_vertex() {
        let (mut engine, id) = engine_drawing(GeometryKind::LineString);
        let mut events = click(&mut engine, 100.0, 100.0, false);
        events.extend(click(&mut engine, 200.0, 100.0, false));
        assert!(completed(&events).is_empty());

        events.extend(click(&mut engine, 200.0, 100.0, true));

        let done = completed(&events);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].0, id);
        match &done[0].1 {
            Geometry::LineString(coords) => assert_eq!(coords.len(), 2),
            other => panic!("expected a line, got {:?}", other),
        }
        let clicks = events.iter().filter(|e| matches!(e, EngineEvent::MapClick(_))).count();
        assert_eq!(clicks, 3);
    }

    #[test]
    fn clicking_first_vertex_closes_polygon() {
        let (mut engine, _) = engine_drawing(GeometryKind::Polygon);
        let mut events = Vec::new();
        for (x, y) in [(100.0, 100.0), (200.0, 100.0), (100.0, 200.0)] {
            events.extend(click(&mut engine, x, y, false));
        }
        events.extend(click(&mut engine, 101.0, 101.0, false));

        let done = completed(&events);
        assert_eq!(done.len(), 1);
        match &done[0].1 {
            Geometry::Polygon(rings) => {
                assert_eq!(rings[0].len(), 4);
                assert_eq!(rings[0].first(), rings[0].last());
            }
            other => panic!("expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn point_finishes_on_a_single_click() {
        let (mut engine, id) = engine_drawing(GeometryKind::Point);
        let events = click(&mut engine, 150.0, 250.0, false);

        let expected = engine.view.screen_to_map(viewport(), Pos2::new(150.0, 250.0));
        assert_eq!(completed(&events), vec![(id, Geometry::Point(expected))]);
        assert_eq!(events[0], EngineEvent::MapClick(expected));
    }

    #[test]
    fn removing_a_draw_interaction_discards_its_sketch() {
        let (mut engine, id) = engine_drawing(GeometryKind::LineString);
        click(&mut engine, 100.0, 100.0, false);
        click(&mut engine, 200.0, 100.0, false);
        engine.remove_interaction(id);
        let next = engine.add_interaction(InteractionSpec::Draw {
            kind: GeometryKind::LineString,
        });

        let mut events = click(&mut engine, 300.0, 300.0, false);
        events.extend(click(&mut engine, 300.0, 300.0, true));

        assert_ne!(next, id);
        assert!(completed(&events).is_empty());
    }

    #[test]
    fn vertex_grab_respects_tolerance() {
        let mut engine = EguiMapEngine::new(&MapConfig::default());
        engine.add_interaction(InteractionSpec::Modify);
        let mut store = GeometryStore::new();
        let c = engine.view.screen_to_map(viewport(), Pos2::new(150.0, 150.0));
        let id = store.add(Geometry::Point(c));

        let grab = engine.vertex_at(viewport(), &store, Pos2::new(155.0, 150.0));
        assert!(grab.is_some_and(|g| g.feature == id && g.vertex == VertexPath::new(0, 0)));
        assert!(engine.vertex_at(viewport(), &store, Pos2::new(160.0, 150.0)).is_none());
    }

    #[test]
    fn vertex_on_wrapped_copy_can_be_grabbed() {
        let config = MapConfig {
            view: ViewConfig {
                zoom: 0.0,
                ..ViewConfig::default()
            },
            ..MapConfig::default()
        };
        let mut engine = EguiMapEngine::new(&config);
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(1200.0, 400.0));
        let mut store = GeometryStore::new();
        let c = Coordinate::new(HALF_WORLD / 2.0, 0.0);
        store.add(Geometry::Point(c));
        let copy = engine
            .view
            .map_to_screen(rect, Coordinate::new(c.x - 2.0 * HALF_WORLD, c.y));

        assert!(engine.vertex_at(rect, &store, copy).is_none());

        engine.add_layer(LayerSpec::Vector {
            style: VectorStyle::default(),
            wrap_x: true,
        });
        let grab = engine.vertex_at(rect, &store, copy);
        assert!(grab.is_some_and(|g| g.shift == -2.0 * HALF_WORLD));
    }
}
