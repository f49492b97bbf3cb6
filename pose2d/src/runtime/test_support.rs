use crate::{Point, PrimitiveId};
use std::collections::BTreeSet;

pub(crate) type TestSurface = BTreeSet<PrimitiveId>;

pub(crate) fn assert_approx(actual: f32, expected: f32) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= 1.0e-3,
        "expected {expected}, got {actual} (diff {diff})"
    );
}

pub(crate) fn assert_point(actual: Point, expected: Point) {
    assert_approx(actual.x, expected.x);
    assert_approx(actual.y, expected.y);
}

/// A standing person facing the viewer, every joint detected.
pub(crate) fn body_raw() -> Vec<[f32; 3]> {
    vec![
        [100.0, 30.0, 1.0],  // nose
        [100.0, 50.0, 1.0],  // neck
        [80.0, 50.0, 1.0],   // right_shoulder
        [70.0, 80.0, 1.0],   // right_elbow
        [65.0, 110.0, 1.0],  // right_wrist
        [120.0, 50.0, 1.0],  // left_shoulder
        [130.0, 80.0, 1.0],  // left_elbow
        [135.0, 110.0, 1.0], // left_wrist
        [90.0, 120.0, 1.0],  // right_hip
        [88.0, 160.0, 1.0],  // right_knee
        [86.0, 200.0, 1.0],  // right_ankle
        [110.0, 120.0, 1.0], // left_hip
        [112.0, 160.0, 1.0], // left_knee
        [114.0, 200.0, 1.0], // left_ankle
        [95.0, 25.0, 1.0],   // right_eye
        [105.0, 25.0, 1.0],  // left_eye
        [90.0, 28.0, 1.0],   // right_ear
        [110.0, 28.0, 1.0],  // left_ear
    ]
}

/// An open hand with fingers fanned upwards; every finger segment is `segment` long.
pub(crate) fn hand_raw(wrist: Point, segment: f32) -> Vec<[f32; 3]> {
    let mut raw = vec![[wrist.x, wrist.y, 1.0]];
    for finger in 0..5 {
        let angle = ((finger as f32) - 2.0) * 20.0;
        let (sin, cos) = angle.to_radians().sin_cos();
        for joint in 1..=4 {
            let distance = segment * joint as f32;
            raw.push([wrist.x + sin * distance, wrist.y - cos * distance, 1.0]);
        }
    }
    raw
}

pub(crate) fn animal_raw() -> Vec<[f32; 3]> {
    vec![
        [40.0, 20.0, 1.0],   // left_eye
        [50.0, 20.0, 1.0],   // right_eye
        [45.0, 30.0, 1.0],   // nose
        [60.0, 40.0, 1.0],   // neck
        [140.0, 45.0, 1.0],  // root_of_tail
        [65.0, 60.0, 1.0],   // left_shoulder
        [65.0, 80.0, 1.0],   // left_elbow
        [65.0, 100.0, 1.0],  // left_front_paw
        [75.0, 60.0, 1.0],   // right_shoulder
        [75.0, 80.0, 1.0],   // right_elbow
        [75.0, 100.0, 1.0],  // right_front_paw
        [130.0, 60.0, 1.0],  // left_hip
        [130.0, 80.0, 1.0],  // left_knee
        [130.0, 100.0, 1.0], // left_back_paw
        [140.0, 60.0, 1.0],  // right_hip
        [140.0, 80.0, 1.0],  // right_knee
        [140.0, 100.0, 1.0], // right_back_paw
    ]
}

pub(crate) fn face_raw(count: usize) -> Vec<[f32; 3]> {
    (0..count)
        .map(|i| [50.0 + i as f32, 60.0 + (i % 7) as f32, 1.0])
        .collect()
}
