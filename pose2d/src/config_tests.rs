use crate::{Canvas, EditorConfig, Error, Point};

#[test]
fn empty_document_keeps_defaults() {
    let config = EditorConfig::from_json_str("{}").unwrap();
    assert_eq!(config, EditorConfig::default());
    assert_eq!(config.canvas, Canvas::new(512.0, 512.0));
    assert_eq!(config.hand_forearm_ratio, 0.7);
    assert_eq!(config.hand_segments, 4.0);
}

#[test]
fn fields_override_defaults() {
    let config = EditorConfig::from_json_str(
        r#"{
  "canvas": { "x": 40, "y": 16, "width": 768, "height": 1024 },
  "keypointRadius": 5,
  "handForearmRatio": 0.5
}"#,
    )
    .unwrap();
    assert_eq!(config.canvas.origin, Point::new(40.0, 16.0));
    assert_eq!(config.canvas.width, 768.0);
    assert_eq!(config.canvas.height, 1024.0);
    assert_eq!(config.keypoint_radius, 5.0);
    assert_eq!(config.connection_width, 2.0);
    assert_eq!(config.hand_forearm_ratio, 0.5);
}

#[test]
fn non_positive_values_are_rejected() {
    for input in [
        r#"{ "keypointRadius": 0 }"#,
        r#"{ "handSegments": -4 }"#,
        r#"{ "canvas": { "width": 0, "height": 10 } }"#,
    ] {
        let err = EditorConfig::from_json_str(input).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }), "{input}");
    }
}

#[test]
fn unknown_fields_are_rejected() {
    let err = EditorConfig::from_json_str(r#"{ "keypointSize": 3 }"#).unwrap_err();
    assert!(matches!(err, Error::JsonParse { .. }));
}

#[test]
fn canvas_origin_shifts_validity() {
    let canvas = Canvas::new(100.0, 100.0).with_origin(Point::new(10.0, 10.0));
    assert!(!canvas.is_valid_position(Point::new(10.0, 50.0)));
    assert!(canvas.is_valid_position(Point::new(10.5, 50.0)));
    assert_eq!(canvas.to_canvas(Point::new(15.0, 20.0)), Point::new(5.0, 10.0));
}
