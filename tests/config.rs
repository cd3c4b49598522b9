use mandalaviz::config::{DisplayConfig, LayoutConfig, MediaType};

#[test]
fn test_display_config_parses_camel_case_keys() {
    let cfg: DisplayConfig =
        serde_json::from_str(r#"{"mediaType": "video", "mediaURL": "om.mp4"}"#).unwrap();
    assert_eq!(cfg.media_type, MediaType::Video);
    assert_eq!(cfg.media_url, "om.mp4");
    // Layout falls back to the canonical constants
    assert_eq!(cfg.layout.main_radius, 300.0);
    assert_eq!(cfg.layout.group_zoom_factor, 3.5);
}

#[test]
fn test_display_config_defaults() {
    let cfg: DisplayConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg.media_type, MediaType::Image);
    assert!(cfg.media_url.is_empty());
}

#[test]
fn test_partial_layout_override() {
    let cfg: DisplayConfig = serde_json::from_str(
        r#"{"mediaType": "image", "mediaURL": "om.png", "layout": {"main_radius": 250.0, "margin_factor": 0.8}}"#,
    )
    .unwrap();
    assert_eq!(cfg.layout.main_radius, 250.0);
    assert_eq!(cfg.layout.margin_factor, 0.8);
    // untouched fields keep their defaults
    assert_eq!(cfg.layout.mandala_radius, 85.0);
    assert_eq!(cfg.layout.item_zoom_factor, 30.0);
    assert_eq!(cfg.layout.max_zoom_multiplier, 50.0);
}

#[test]
fn test_layout_config_durations() {
    let cfg = LayoutConfig::default();
    assert_eq!(cfg.zoom_step_duration_ms, 300.0);
    assert_eq!(cfg.reset_duration_ms, 750.0);
    assert_eq!(cfg.group_focus_duration_ms, 1000.0);
    assert_eq!(cfg.item_focus_duration_ms, 2000.0);
}
