use std::borrow::Cow;
use std::fmt;

/// RGB colour with an opacity, as handed to the rendering layer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl Color {
    pub const fn new(rgb: [u8; 3], alpha: f32) -> Self {
        Self { rgb, alpha }
    }

    pub const fn opaque(rgb: [u8; 3]) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.rgb[0], self.rgb[1], self.rgb[2], self.alpha
        )
    }
}

/// `h`, `s` and `v` are in `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (i as i32).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    ]
}

/// Opacity used for body and animal primitives.
pub const BODY_OPACITY: f32 = 0.7;

pub const BODY_KEYPOINT_NAMES: [&str; 18] = [
    "nose",
    "neck",
    "right_shoulder",
    "right_elbow",
    "right_wrist",
    "left_shoulder",
    "left_elbow",
    "left_wrist",
    "right_hip",
    "right_knee",
    "right_ankle",
    "left_hip",
    "left_knee",
    "left_ankle",
    "right_eye",
    "left_eye",
    "right_ear",
    "left_ear",
];

pub const BODY_CONNECTIONS: [(usize, usize); 17] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (1, 5),
    (5, 6),
    (6, 7),
    (1, 8),
    (8, 9),
    (9, 10),
    (1, 11),
    (11, 12),
    (12, 13),
    (0, 14),
    (14, 16),
    (0, 15),
    (15, 17),
];

/// One colour per keypoint; the first 17 also colour the connections.
pub const BODY_COLORS: [[u8; 3]; 18] = [
    [255, 0, 0],
    [255, 85, 0],
    [255, 170, 0],
    [255, 255, 0],
    [170, 255, 0],
    [85, 255, 0],
    [0, 255, 0],
    [0, 255, 85],
    [0, 255, 170],
    [0, 255, 255],
    [0, 170, 255],
    [0, 85, 255],
    [0, 0, 255],
    [85, 0, 255],
    [170, 0, 255],
    [255, 0, 255],
    [255, 0, 170],
    [255, 0, 85],
];

/// Index of the wrist joint in the hand topology.
pub const HAND_WRIST: usize = 0;
pub const HAND_KEYPOINT_COUNT: usize = 21;

pub const HAND_CONNECTIONS: [(usize, usize); 20] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    (0, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (0, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

pub const HAND_KEYPOINT_COLOR: [u8; 3] = [0, 0, 255];

pub const FACE_KEYPOINT_COUNT: usize = 70;
/// The two trailing eyeball points are optional.
pub const FACE_MIN_KEYPOINTS: usize = 68;
pub const FACE_KEYPOINT_COLOR: [u8; 3] = [255, 255, 255];

pub const ANIMAL_KEYPOINT_NAMES: [&str; 17] = [
    "left_eye",
    "right_eye",
    "nose",
    "neck",
    "root_of_tail",
    "left_shoulder",
    "left_elbow",
    "left_front_paw",
    "right_shoulder",
    "right_elbow",
    "right_front_paw",
    "left_hip",
    "left_knee",
    "left_back_paw",
    "right_hip",
    "right_knee",
    "right_back_paw",
];

/// AP-10K limb table, 1-based as published.
const ANIMAL_LIMBS_ONE_BASED: [(usize, usize); 17] = [
    (1, 2),
    (1, 3),
    (2, 3),
    (3, 4),
    (4, 5),
    (4, 6),
    (6, 7),
    (7, 8),
    (4, 9),
    (9, 10),
    (10, 11),
    (5, 12),
    (12, 13),
    (13, 14),
    (5, 15),
    (15, 16),
    (16, 17),
];

pub const ANIMAL_CONNECTIONS: [(usize, usize); 17] = {
    let mut out = [(0usize, 0usize); 17];
    let mut i = 0;
    while i < ANIMAL_LIMBS_ONE_BASED.len() {
        out[i] = (ANIMAL_LIMBS_ONE_BASED[i].0 - 1, ANIMAL_LIMBS_ONE_BASED[i].1 - 1);
        i += 1;
    }
    out
};

pub const ANIMAL_COLORS: [[u8; 3]; 17] = [
    [0, 255, 255],
    [0, 191, 255],
    [0, 255, 170],
    [0, 255, 85],
    [0, 255, 0],
    [170, 255, 0],
    [255, 255, 0],
    [255, 170, 0],
    [85, 255, 0],
    [255, 85, 0],
    [255, 0, 0],
    [170, 0, 255],
    [255, 0, 255],
    [255, 0, 170],
    [85, 0, 255],
    [0, 0, 255],
    [0, 85, 255],
];

/// Skeleton topology tag.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SkeletonKind {
    /// 18-point COCO body.
    Body,
    /// 21-point hand.
    Hand,
    /// Up to 70 face landmarks, no connections.
    Face,
    /// 17-point AP-10K quadruped.
    Animal,
}

impl fmt::Display for SkeletonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Body => "body",
            Self::Hand => "hand",
            Self::Face => "face",
            Self::Animal => "animal",
        })
    }
}

impl SkeletonKind {
    /// Number of keypoints stored for this topology.
    pub fn keypoint_count(self) -> usize {
        match self {
            Self::Body => BODY_KEYPOINT_NAMES.len(),
            Self::Hand => HAND_KEYPOINT_COUNT,
            Self::Face => FACE_KEYPOINT_COUNT,
            Self::Animal => ANIMAL_KEYPOINT_NAMES.len(),
        }
    }

    /// Fewest raw keypoints accepted at construction.
    pub fn min_keypoints(self) -> usize {
        match self {
            Self::Face => FACE_MIN_KEYPOINTS,
            other => other.keypoint_count(),
        }
    }

    pub fn keypoint_name(self, index: usize) -> Cow<'static, str> {
        match self {
            Self::Body => Cow::Borrowed(BODY_KEYPOINT_NAMES[index]),
            Self::Animal => Cow::Borrowed(ANIMAL_KEYPOINT_NAMES[index]),
            Self::Hand => Cow::Owned(format!("HandKeypoint-{index}")),
            Self::Face => Cow::Owned(format!("FaceKeypoint-{index}")),
        }
    }

    pub fn connections(self) -> &'static [(usize, usize)] {
        match self {
            Self::Body => &BODY_CONNECTIONS,
            Self::Hand => &HAND_CONNECTIONS,
            Self::Face => &[],
            Self::Animal => &ANIMAL_CONNECTIONS,
        }
    }

    pub fn keypoint_color(self, index: usize) -> Color {
        match self {
            Self::Body => Color::new(BODY_COLORS[index], BODY_OPACITY),
            Self::Animal => Color::new(ANIMAL_COLORS[index], BODY_OPACITY),
            Self::Hand => Color::opaque(HAND_KEYPOINT_COLOR),
            Self::Face => Color::opaque(FACE_KEYPOINT_COLOR),
        }
    }

    pub fn connection_color(self, index: usize) -> Color {
        match self {
            Self::Body => Color::new(BODY_COLORS[index], BODY_OPACITY),
            Self::Animal => Color::new(ANIMAL_COLORS[index], BODY_OPACITY),
            Self::Hand => Color::opaque(hsv_to_rgb(
                index as f32 / HAND_CONNECTIONS.len() as f32,
                1.0,
                1.0,
            )),
            Self::Face => Color::opaque(FACE_KEYPOINT_COLOR),
        }
    }

    pub fn is_flippable(self) -> bool {
        matches!(self, Self::Body | Self::Animal)
    }

    /// Kinds that can serve as a person's main skeleton.
    pub fn is_body_like(self) -> bool {
        matches!(self, Self::Body | Self::Animal)
    }
}
