use crate::Point;

/// Placement of the addressed canvas inside the editor's absolute coordinate space.
///
/// Keypoints are stored in absolute coordinates. Serialized coordinates are relative to
/// `origin`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Canvas {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            origin: Point::ORIGIN,
            width: 512.0,
            height: 512.0,
        }
    }
}

impl Canvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// A point counts as detected only when it lies strictly right of and below the origin.
    pub fn is_valid_position(&self, absolute: Point) -> bool {
        absolute.x - self.origin.x > 0.0 && absolute.y - self.origin.y > 0.0
    }

    pub fn to_canvas(&self, absolute: Point) -> Point {
        absolute - self.origin
    }

    pub fn to_absolute(&self, local: Point) -> Point {
        local + self.origin
    }
}

/// Tunables for one editing session.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
    pub canvas: Canvas,
    /// On-screen radius of a keypoint marker. Never scaled by a group transform.
    pub keypoint_radius: f32,
    pub connection_width: f32,
    /// Attached hands are sized to this fraction of the forearm length.
    pub hand_forearm_ratio: f32,
    /// Number of finger segments between the wrist joint and a fingertip.
    pub hand_segments: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            keypoint_radius: 2.0,
            connection_width: 2.0,
            hand_forearm_ratio: 0.7,
            hand_segments: 4.0,
        }
    }
}

#[cfg(feature = "json")]
mod json_config {
    use super::{Canvas, EditorConfig};
    use crate::{Error, Point};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct ConfigDef {
        #[serde(default)]
        canvas: Option<CanvasDef>,
        #[serde(default, rename = "keypointRadius")]
        keypoint_radius: Option<f32>,
        #[serde(default, rename = "connectionWidth")]
        connection_width: Option<f32>,
        #[serde(default, rename = "handForearmRatio")]
        hand_forearm_ratio: Option<f32>,
        #[serde(default, rename = "handSegments")]
        hand_segments: Option<f32>,
    }

    #[derive(Debug, Deserialize)]
    struct CanvasDef {
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
        width: f32,
        height: f32,
    }

    fn positive(value: f32, field: &str) -> Result<f32, Error> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(Error::InvalidValue {
                message: format!("{field} must be a positive number, got {value}"),
            })
        }
    }

    impl EditorConfig {
        /// Reads a config document. Missing fields keep their defaults.
        pub fn from_json_str(input: &str) -> Result<Self, Error> {
            let def: ConfigDef = serde_json::from_str(input).map_err(|e| Error::JsonParse {
                message: e.to_string(),
            })?;

            let mut config = EditorConfig::default();
            if let Some(canvas) = def.canvas {
                config.canvas = Canvas {
                    origin: Point::new(canvas.x, canvas.y),
                    width: positive(canvas.width, "canvas.width")?,
                    height: positive(canvas.height, "canvas.height")?,
                };
            }
            if let Some(radius) = def.keypoint_radius {
                config.keypoint_radius = positive(radius, "keypointRadius")?;
            }
            if let Some(width) = def.connection_width {
                config.connection_width = positive(width, "connectionWidth")?;
            }
            if let Some(ratio) = def.hand_forearm_ratio {
                config.hand_forearm_ratio = positive(ratio, "handForearmRatio")?;
            }
            if let Some(segments) = def.hand_segments {
                config.hand_segments = positive(segments, "handSegments")?;
            }
            Ok(config)
        }
    }
}
