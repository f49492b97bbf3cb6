use crate::json::{PersonDef, PoseDocument};
use crate::runtime::test_support::{TestSurface, animal_raw, assert_approx, body_raw, hand_raw};
use crate::{EditorConfig, EditorSession, Error, Point, Side, SkeletonKind};

fn flat(raw: &[[f32; 3]]) -> Vec<f32> {
    raw.iter().flatten().copied().collect()
}

fn loaded_session(input: &str) -> (EditorSession, TestSurface, Vec<crate::json::SkippedEntity>) {
    let mut session = EditorSession::default();
    let mut surface = TestSurface::new();
    let skipped = session.load_json_str(input, &mut surface).unwrap();
    (session, surface, skipped)
}

#[test]
fn export_shape_matches_openpose() {
    let mut session = EditorSession::default();
    let mut surface = TestSurface::new();
    let body = session.create_body(&body_raw()).unwrap();
    let person = session.new_person(None, body).unwrap();
    session.add_person(person, &mut surface);

    let value: serde_json::Value = serde_json::from_str(&session.to_json_string().unwrap()).unwrap();
    assert_eq!(value["canvas_width"], 512.0);
    assert_eq!(value["canvas_height"], 512.0);
    assert!(value.get("animals").is_none());

    let person = &value["people"][0];
    assert_eq!(person["pose_keypoints_2d"].as_array().unwrap().len(), 54);
    assert!(person["hand_left_keypoints_2d"].is_null());
    assert!(person["hand_right_keypoints_2d"].is_null());
    assert!(person["face_keypoints_2d"].is_null());
    assert_eq!(person["pose_keypoints_2d"][0], 100.0);
    assert_eq!(person["pose_keypoints_2d"][2], 1.0);
}

#[test]
fn export_places_animals_in_their_own_section() {
    let mut session = EditorSession::default();
    let mut surface = TestSurface::new();
    let animal = session.create_animal(&animal_raw()).unwrap();
    let animal = session.new_person(None, animal).unwrap();
    session.add_person(animal, &mut surface);

    let document = session.to_document();
    assert!(document.people.is_empty());
    let animals = document.animals.unwrap();
    assert_eq!(animals.len(), 1);
    assert_eq!(animals[0].len(), 51);
}

#[test]
fn partial_confidence_exports_as_missing() {
    let mut raw = body_raw();
    raw[5] = [120.0, 50.0, 0.8];
    let input = serde_json::json!({
        "canvas_width": 512,
        "canvas_height": 512,
        "people": [{ "pose_keypoints_2d": flat(&raw) }],
    })
    .to_string();

    let (session, _, skipped) = loaded_session(&input);
    assert!(skipped.is_empty());
    let pose = &session.to_document().people[0].pose_keypoints_2d;
    assert_eq!(&pose[15..18], &[0.0, 0.0, 0.0]);
    assert_eq!(&pose[0..3], &[100.0, 30.0, 1.0]);
}

#[test]
fn short_hand_keeps_the_person() {
    let input = serde_json::json!({
        "canvas_width": 512,
        "canvas_height": 512,
        "people": [{
            "pose_keypoints_2d": flat(&body_raw()),
            "hand_left_keypoints_2d": flat(&hand_raw(Point::new(300.0, 300.0), 10.0)[..10]),
            "hand_right_keypoints_2d": flat(&hand_raw(Point::new(300.0, 300.0), 10.0)),
        }],
    })
    .to_string();

    let (session, _, skipped) = loaded_session(&input);
    assert_eq!(session.people().len(), 1);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].kind, SkeletonKind::Hand);
    assert!(matches!(skipped[0].error, Error::TooFewKeypoints { .. }));

    let person = &session.people()[0];
    assert!(person.hand(Side::Left).is_none());
    assert!(person.hand(Side::Right).is_some());
}

#[test]
fn short_body_skips_the_person() {
    let input = serde_json::json!({
        "canvas_width": 512,
        "canvas_height": 512,
        "people": [
            { "pose_keypoints_2d": flat(&body_raw()[..12]) },
            { "pose_keypoints_2d": flat(&body_raw()) },
        ],
    })
    .to_string();

    let (session, surface, skipped) = loaded_session(&input);
    assert_eq!(session.people().len(), 1);
    assert_eq!(surface.len(), 18 + 17);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].index, 0);
    assert_eq!(skipped[0].kind, SkeletonKind::Body);
    assert!(skipped[0].error.is_validation());
}

#[test]
fn ragged_array_is_reported() {
    let mut values = flat(&body_raw());
    values.pop();
    let document = PoseDocument {
        canvas_width: 512.0,
        canvas_height: 512.0,
        people: vec![PersonDef {
            pose_keypoints_2d: values,
            ..PersonDef::default()
        }],
        animals: None,
    };

    let mut session = EditorSession::default();
    let loaded = document.load(&mut session);
    assert!(loaded.people.is_empty());
    assert!(matches!(
        loaded.skipped[0].error,
        Error::JsonKeypointArray { len: 53, .. }
    ));
}

#[test]
fn normalized_coordinates_scale_to_document_canvas() {
    let raw = body_raw()
        .iter()
        .map(|&[x, y, c]| [x / 400.0, y / 200.0, c])
        .collect::<Vec<_>>();
    let input = serde_json::json!({
        "canvas_width": 400,
        "canvas_height": 200,
        "people": [{ "pose_keypoints_2d": flat(&raw) }],
    })
    .to_string();

    let (session, _, _) = loaded_session(&input);
    let body = session.people()[0].body();
    let nose = body.absolute_position(0).unwrap();
    assert_approx(nose.x, 100.0);
    assert_approx(nose.y, 30.0);
}

#[test]
fn animals_load_as_animal_people() {
    let input = serde_json::json!({
        "canvas_width": 512,
        "canvas_height": 512,
        "people": [],
        "animals": [flat(&animal_raw()), flat(&animal_raw()[..3])],
    })
    .to_string();

    let (session, _, skipped) = loaded_session(&input);
    assert_eq!(session.people().len(), 1);
    assert!(session.people()[0].is_animal());
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].kind, SkeletonKind::Animal);
    assert_eq!(skipped[0].index, 1);
}

#[test]
fn reload_reproduces_export() {
    let input = serde_json::json!({
        "canvas_width": 512,
        "canvas_height": 512,
        "people": [{
            "pose_keypoints_2d": flat(&body_raw()),
            "hand_right_keypoints_2d": flat(&hand_raw(Point::new(300.0, 300.0), 10.0)),
        }],
        "animals": [flat(&animal_raw())],
    })
    .to_string();

    let (session, _, _) = loaded_session(&input);
    let exported = session.to_document();
    let (reloaded, _, _) = loaded_session(&exported.to_json_string().unwrap());
    assert_eq!(reloaded.to_document(), exported);
    assert_eq!(exported.people[0].hand_right_keypoints_2d.as_ref().map(Vec::len), Some(63));
}

#[test]
fn malformed_document_is_a_validation_error() {
    let err = PoseDocument::from_json_str("{ \"people\": 3 }").unwrap_err();
    assert!(matches!(err, Error::JsonParse { .. }));
    assert!(err.is_validation());

    let mut session = EditorSession::new(EditorConfig::default());
    assert!(session.load_json_str("not json", &mut TestSurface::new()).is_err());
}
