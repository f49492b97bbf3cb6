use crate::{
    ANIMAL_CONNECTIONS, BODY_CONNECTIONS, BODY_OPACITY, Color, HAND_CONNECTIONS, SkeletonKind,
    hsv_to_rgb,
};

#[test]
fn topology_sizes() {
    assert_eq!(SkeletonKind::Body.keypoint_count(), 18);
    assert_eq!(SkeletonKind::Body.connections().len(), 17);
    assert_eq!(SkeletonKind::Hand.keypoint_count(), 21);
    assert_eq!(SkeletonKind::Hand.connections().len(), 20);
    assert_eq!(SkeletonKind::Face.keypoint_count(), 70);
    assert_eq!(SkeletonKind::Face.min_keypoints(), 68);
    assert!(SkeletonKind::Face.connections().is_empty());
    assert_eq!(SkeletonKind::Animal.keypoint_count(), 17);
    assert_eq!(SkeletonKind::Animal.connections().len(), 17);
}

#[test]
fn connections_reference_existing_keypoints() {
    for kind in [SkeletonKind::Body, SkeletonKind::Hand, SkeletonKind::Animal] {
        for &(k1, k2) in kind.connections() {
            assert!(k1 < kind.keypoint_count() && k2 < kind.keypoint_count());
            assert_ne!(k1, k2);
        }
    }
}

#[test]
fn animal_limbs_are_zero_based() {
    assert_eq!(ANIMAL_CONNECTIONS[0], (0, 1));
    assert_eq!(ANIMAL_CONNECTIONS[3], (2, 3));
    assert_eq!(ANIMAL_CONNECTIONS[16], (15, 16));
}

#[test]
fn body_topology_names_and_colors() {
    assert_eq!(SkeletonKind::Body.keypoint_name(0), "nose");
    assert_eq!(SkeletonKind::Body.keypoint_name(7), "left_wrist");
    assert_eq!(BODY_CONNECTIONS[0], (0, 1));
    assert_eq!(
        SkeletonKind::Body.keypoint_color(0),
        Color::new([255, 0, 0], BODY_OPACITY)
    );
    assert_eq!(SkeletonKind::Body.connection_color(1).alpha, BODY_OPACITY);
}

#[test]
fn hand_and_face_names_are_numbered() {
    assert_eq!(SkeletonKind::Hand.keypoint_name(0), "HandKeypoint-0");
    assert_eq!(SkeletonKind::Hand.keypoint_name(20), "HandKeypoint-20");
    assert_eq!(SkeletonKind::Face.keypoint_name(69), "FaceKeypoint-69");
}

#[test]
fn hand_connections_walk_the_hue_wheel() {
    assert_eq!(HAND_CONNECTIONS.len(), 20);
    assert_eq!(SkeletonKind::Hand.connection_color(0).rgb, [255, 0, 0]);
    assert_eq!(SkeletonKind::Hand.connection_color(5).rgb, [128, 255, 0]);
    assert_eq!(SkeletonKind::Hand.keypoint_color(3).rgb, [0, 0, 255]);
    assert_eq!(SkeletonKind::Hand.keypoint_color(3).alpha, 1.0);
}

#[test]
fn hsv_primaries() {
    assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
    assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), [0, 255, 0]);
    assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), [0, 0, 255]);
    assert_eq!(hsv_to_rgb(0.5, 0.0, 1.0), [255, 255, 255]);
}

#[test]
fn only_body_like_kinds_flip() {
    assert!(SkeletonKind::Body.is_flippable());
    assert!(SkeletonKind::Animal.is_flippable());
    assert!(!SkeletonKind::Hand.is_flippable());
    assert!(!SkeletonKind::Face.is_flippable());
    assert_eq!(SkeletonKind::Animal.to_string(), "animal");
}

#[test]
fn css_color() {
    assert_eq!(
        Color::new([255, 85, 0], 0.7).to_css(),
        "rgba(255, 85, 0, 0.7)"
    );
}
