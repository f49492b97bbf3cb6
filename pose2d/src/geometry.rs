use std::ops::{Add, Sub};

const DEGENERATE_DETERMINANT: f32 = 1.0e-12;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Rotates `self` about `pivot` by `degrees` (positive turns from +x towards +y).
    pub fn rotate_about(self, pivot: Point, degrees: f32) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Point {
            x: pivot.x + dx * cos - dy * sin,
            y: pivot.y + dx * sin + dy * cos,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(feature = "glam")]
impl From<Point> for glam::Vec2 {
    fn from(p: Point) -> Self {
        glam::Vec2::new(p.x, p.y)
    }
}

#[cfg(feature = "glam")]
impl From<glam::Vec2> for Point {
    fn from(v: glam::Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

/// Affine 2D transform in the same layout as a world bone matrix:
///
/// ```text
/// | a b x |
/// | c d y |
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub x: f32,
    pub y: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Self::IDENTITY
        }
    }

    pub fn rotation_about(pivot: Point, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let rotate = Self {
            a: cos,
            b: -sin,
            c: sin,
            d: cos,
            x: 0.0,
            y: 0.0,
        };
        Self::translation(pivot.x, pivot.y)
            .then(&rotate)
            .then(&Self::translation(-pivot.x, -pivot.y))
    }

    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.b * p.y + self.x,
            y: self.c * p.x + self.d * p.y + self.y,
        }
    }

    /// Returns `self ∘ inner`: `inner` is applied first.
    pub fn then(&self, inner: &Transform) -> Transform {
        Transform {
            a: self.a * inner.a + self.b * inner.c,
            b: self.a * inner.b + self.b * inner.d,
            c: self.c * inner.a + self.d * inner.c,
            d: self.c * inner.b + self.d * inner.d,
            x: self.a * inner.x + self.b * inner.y + self.x,
            y: self.c * inner.x + self.d * inner.y + self.y,
        }
    }

    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    pub fn inverse(&self) -> Option<Transform> {
        let det = self.determinant();
        if det.abs() <= DEGENERATE_DETERMINANT {
            return None;
        }
        let inv = 1.0 / det;
        let a = self.d * inv;
        let b = -self.b * inv;
        let c = -self.c * inv;
        let d = self.a * inv;
        Some(Transform {
            a,
            b,
            c,
            d,
            x: -(a * self.x + b * self.y),
            y: -(c * self.x + d * self.y),
        })
    }

    /// The scale/rotation/shear/flip part without translation.
    pub fn linear(&self) -> Transform {
        Transform {
            x: 0.0,
            y: 0.0,
            ..*self
        }
    }

    pub fn is_identity(&self) -> bool {
        const EPSILON: f32 = 1.0e-6;
        (self.a - 1.0).abs() <= EPSILON
            && self.b.abs() <= EPSILON
            && self.c.abs() <= EPSILON
            && (self.d - 1.0).abs() <= EPSILON
            && self.x.abs() <= EPSILON
            && self.y.abs() <= EPSILON
    }
}

/// Decomposed transform of a grouped skeleton object.
///
/// `x`/`y` place the group origin (the centre of the keypoint bounds at grouping time). The
/// remaining components are applied about that origin. Rotation and shear are in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroupTransform {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub shear_x: f32,
    pub shear_y: f32,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Default for GroupTransform {
    fn default() -> Self {
        Self::at(Point::ORIGIN)
    }
}

impl GroupTransform {
    pub fn at(origin: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            shear_x: 0.0,
            shear_y: 0.0,
            flip_x: false,
            flip_y: false,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn matrix(&self) -> Transform {
        let scale_x = if self.flip_x {
            -self.scale_x
        } else {
            self.scale_x
        };
        let scale_y = if self.flip_y {
            -self.scale_y
        } else {
            self.scale_y
        };
        let (sin_x, cos_x) = (self.rotation + self.shear_x).to_radians().sin_cos();
        let (sin_y, cos_y) = (self.rotation + self.shear_y).to_radians().sin_cos();
        Transform {
            a: cos_x * scale_x,
            b: -sin_y * scale_y,
            c: sin_x * scale_x,
            d: cos_y * scale_y,
            x: self.x,
            y: self.y,
        }
    }
}

/// Axis-aligned bounds in absolute coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Bounds> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }
}
