use crate::{Color, EditorConfig, Person, Point, SkeletonObject, Transform};
use std::collections::BTreeSet;

/// Identifies a primitive towards the rendering layer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum PrimitiveId {
    Keypoint(u32),
    Connection(u32),
}

/// Lifecycle hooks the rendering layer implements. The core never calls into a renderer
/// through any other path; everything else is passive state read by the renderer.
pub trait Surface {
    fn add(&mut self, primitive: PrimitiveId);
    fn remove(&mut self, primitive: PrimitiveId);
}

/// A set of registered primitives is the simplest surface: it only tracks membership.
impl Surface for BTreeSet<PrimitiveId> {
    fn add(&mut self, primitive: PrimitiveId) {
        self.insert(primitive);
    }

    fn remove(&mut self, primitive: PrimitiveId) {
        BTreeSet::remove(self, &primitive);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dot {
    pub id: u32,
    pub center: Point,
    pub radius: f32,
    pub color: Color,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    pub id: u32,
    pub from: Point,
    pub to: Point,
    pub width: f32,
    pub color: Color,
    pub stroke: Transform,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub lines: Vec<Line>,
    pub dots: Vec<Dot>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.lines.clear();
        self.dots.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.dots.is_empty()
    }
}

pub fn build_draw_list(object: &SkeletonObject, config: &EditorConfig) -> DrawList {
    let mut out = DrawList::default();
    append_draw_list(&mut out, object, config);
    out
}

/// Appends the visible primitives of `object`. Dots keep `config.keypoint_radius` whatever
/// the group scale.
pub fn append_draw_list(out: &mut DrawList, object: &SkeletonObject, config: &EditorConfig) {
    if !object.is_visible() {
        return;
    }

    for connection in object.connections().iter().filter(|c| c.is_visible()) {
        let [from, to] = connection.endpoints();
        out.lines.push(Line {
            id: connection.id(),
            from,
            to,
            width: config.connection_width,
            color: connection.color(),
            stroke: connection.stroke_transform(),
        });
    }

    let world = object.world_transform();
    for keypoint in object.keypoints().iter().filter(|k| k.is_visible()) {
        out.dots.push(Dot {
            id: keypoint.id(),
            center: world.apply(keypoint.position()),
            radius: config.keypoint_radius,
            color: keypoint.color(),
        });
    }
}

pub fn build_person_draw_list(person: &Person, config: &EditorConfig) -> DrawList {
    let mut out = DrawList::default();
    if person.is_visible() {
        for object in person.objects() {
            append_draw_list(&mut out, object, config);
        }
    }
    out
}
