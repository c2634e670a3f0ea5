use map_draw::config::Positioning;
use map_draw::engine::{HeadlessEngine, LayerSpec, TileSource};
use map_draw::geometry::{Coordinate, Geometry};
use map_draw::{DrawMode, EngineEvent, MapConfig, MapError, MapViewHost};

fn config_on(target: &str) -> MapConfig {
    MapConfig {
        mount_target: target.to_string(),
        ..MapConfig::default()
    }
}

#[test]
fn test_init_attaches_layers_overlay_and_modify() {
    let mut host = MapViewHost::new(HeadlessEngine::new(), MapConfig::default());
    assert_eq!(host.state().name(), "Uninitialized");

    host.init().unwrap();

    assert_eq!(host.state().name(), "Ready");
    let engine = host.engine();
    assert!(engine.is_mounted());
    let layers: Vec<_> = engine.layers().map(|(_, spec)| spec.clone()).collect();
    assert_eq!(layers.len(), 2);
    assert_eq!(
        layers[0],
        LayerSpec::Tiles {
            source: TileSource::OpenStreetMap
        }
    );
    assert!(matches!(layers[1], LayerSpec::Vector { wrap_x: false, .. }));
    assert_eq!(engine.overlay_count(), 1);
    assert_eq!(engine.modify_interaction_count(), 1);

    // Clicks on the marker still reach the map
    let overlay = host.marker_overlay().unwrap();
    let spec = engine.overlay_spec(overlay).unwrap();
    assert!(!spec.marker.stop_event);
    assert_eq!(spec.marker.positioning, Positioning::CenterCenter);
}

#[test]
fn test_missing_mount_target_fails_initialization() {
    let engine = HeadlessEngine::with_targets(["map"]);
    let mut host = MapViewHost::new(engine, config_on("elsewhere"));

    let result = host.init();

    match result {
        Err(MapError::InitializationFailure { target, .. }) => assert_eq!(target, "elsewhere"),
        other => panic!("expected initialization failure, got {:?}", other),
    }
    assert!(!host.is_ready());
    assert!(!host.engine().is_mounted());
    assert_eq!(host.engine().layers().count(), 0);
}

#[test]
fn test_empty_mount_target_fails_initialization() {
    let mut host = MapViewHost::new(HeadlessEngine::new(), config_on(""));
    assert!(matches!(host.init(), Err(MapError::InitializationFailure { .. })));
    assert_eq!(host.state().name(), "Uninitialized");
}

#[test]
fn test_init_twice_is_rejected() {
    let mut host = MapViewHost::new(HeadlessEngine::new(), MapConfig::default());
    host.init().unwrap();
    assert!(matches!(host.init(), Err(MapError::AlreadyInitialized)));
    assert_eq!(host.engine().layers().count(), 2);
}

#[test]
fn test_clicks_leave_one_marker_at_last_position() {
    let mut host = MapViewHost::new(HeadlessEngine::new(), MapConfig::default());
    host.init().unwrap();

    host.handle_event(EngineEvent::MapClick(Coordinate::new(5.0, 5.0)));
    host.handle_event(EngineEvent::MapClick(Coordinate::new(9.0, 9.0)));

    let overlay = host.marker_overlay().unwrap();
    assert_eq!(host.engine().overlay_count(), 1);
    assert_eq!(host.engine().overlay_position(overlay), Some(Coordinate::new(9.0, 9.0)));
    assert_eq!(host.marker_position(), Some(Coordinate::new(9.0, 9.0)));
}

#[test]
fn test_events_before_init_are_ignored() {
    let mut host = MapViewHost::new(HeadlessEngine::new(), MapConfig::default());
    host.handle_event(EngineEvent::MapClick(Coordinate::new(1.0, 1.0)));
    assert!(host.marker_position().is_none());
}

#[test]
fn test_dispose_releases_everything() {
    let mut host = MapViewHost::new(HeadlessEngine::new(), MapConfig::default());
    host.init().unwrap();
    host.set_mode(DrawMode::Line).unwrap();
    let interaction = host.active_draw_interaction().unwrap();
    host.handle_event(EngineEvent::DrawComplete {
        interaction,
        geometry: Geometry::LineString(vec![Coordinate::ORIGIN, Coordinate::new(1.0, 1.0)]),
    });

    host.dispose();

    assert_eq!(host.state().name(), "Disposed");
    let engine = host.engine();
    assert!(!engine.is_mounted());
    assert_eq!(engine.interactions().count(), 0);
    assert_eq!(engine.layers().count(), 0);
    assert_eq!(engine.overlay_count(), 0);
    assert!(host.store().is_empty());
}

#[test]
fn test_disposed_host_is_terminal() {
    let mut host = MapViewHost::new(HeadlessEngine::new(), MapConfig::default());
    host.init().unwrap();
    host.dispose();
    host.dispose();

    assert!(matches!(host.set_mode(DrawMode::Point), Err(MapError::Disposed)));
    assert!(matches!(host.init(), Err(MapError::Disposed)));
    assert!(host.active_draw_interaction().is_none());
    assert_eq!(host.engine().interactions().count(), 0);
}
