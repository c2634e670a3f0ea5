use map_draw::config::{Positioning, Rgba};
use map_draw::MapConfig;

#[test]
fn test_defaults_match_the_page_layout() {
    let config = MapConfig::default();

    assert_eq!(config.viewport_height, 400.0);
    assert_eq!(config.view.center_lon_lat, [0.0, 0.0]);
    assert_eq!(config.view.zoom, 2.0);
    assert_eq!(config.style.stroke_color, Rgba::rgb(0xff, 0xcc, 0x33));
    assert_eq!(config.style.stroke_width, 2.0);
    assert_eq!(config.style.point_radius, 7.0);
    assert_eq!(config.marker.positioning, Positioning::CenterCenter);
    assert!(!config.marker.stop_event);
    assert!(!config.wrap_x);
}

#[test]
fn test_partial_json_fills_in_defaults() {
    let config = MapConfig::from_json(
        r#"{
            "mount_target": "canvas",
            "view": { "zoom": 5.0 },
            "marker": { "positioning": "bottom-center" }
        }"#,
    )
    .unwrap();

    assert_eq!(config.mount_target, "canvas");
    assert_eq!(config.view.zoom, 5.0);
    assert_eq!(config.view.center_lon_lat, [0.0, 0.0]);
    assert_eq!(config.marker.positioning, Positioning::BottomCenter);
    assert_eq!(config.viewport_height, 400.0);
}

#[test]
fn test_invalid_json_is_an_error() {
    let result = MapConfig::from_json("{ not json");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().starts_with("invalid config"));
}

#[test]
fn test_missing_file_is_an_error() {
    let result = MapConfig::load("/nonexistent/map_draw_config.json");
    assert!(result.unwrap_err().to_string().starts_with("failed to read config"));
}
