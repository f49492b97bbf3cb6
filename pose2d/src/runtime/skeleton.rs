use crate::{
    Bounds, Canvas, Color, Error, GroupTransform, IdGenerator, Point, PrimitiveId, SkeletonKind,
    Surface, Transform,
};

/// A named 2D joint. Its position is local to the owning object's group when grouped.
#[derive(Clone, Debug)]
pub struct Keypoint {
    id: u32,
    x: f32,
    y: f32,
    confidence: f32,
    color: Color,
    name: String,
    visible: bool,
    connections: Vec<usize>,
}

impl Keypoint {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Local position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Indices of the connections in the owning object that reference this keypoint.
    pub fn connections(&self) -> &[usize] {
        &self.connections
    }

    /// Euclidean distance in the local frame.
    pub fn distance_to(&self, other: &Keypoint) -> f32 {
        self.position().distance_to(other.position())
    }
}

/// A drawn edge between two keypoints of the same object. All geometry is derived.
#[derive(Clone, Debug)]
pub struct Connection {
    id: u32,
    k1: usize,
    k2: usize,
    color: Color,
    endpoints: [Point; 2],
    stroke: Transform,
    visible: bool,
}

impl Connection {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn keypoints(&self) -> (usize, usize) {
        (self.k1, self.k2)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Drawn endpoints in absolute coordinates, as of the last resync.
    pub fn endpoints(&self) -> [Point; 2] {
        self.endpoints
    }

    /// Scale/rotation/shear/flip the line inherits from an enclosing group.
    pub fn stroke_transform(&self) -> Transform {
        self.stroke
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Local-frame length, used for size comparisons.
    pub fn length(&self, keypoints: &[Keypoint]) -> f32 {
        keypoints[self.k1].distance_to(&keypoints[self.k2])
    }

    pub fn resync(&mut self, keypoints: &[Keypoint], transform: &Transform) {
        self.endpoints = [
            transform.apply(keypoints[self.k1].position()),
            transform.apply(keypoints[self.k2].position()),
        ];
        self.stroke = transform.linear();
    }

    pub fn update_visibility(&mut self, keypoints: &[Keypoint]) {
        self.visible = keypoints[self.k1].visible && keypoints[self.k2].visible;
    }

    pub fn reset_stroke(&mut self) {
        self.stroke = Transform::IDENTITY;
    }
}

/// A topology-bearing collection of keypoints and connections.
#[derive(Clone, Debug)]
pub struct SkeletonObject {
    kind: SkeletonKind,
    keypoints: Vec<Keypoint>,
    connections: Vec<Connection>,
    canvas: Canvas,
    visible: bool,
    locked: bool,
    group: Option<GroupTransform>,
    bounds: Option<Bounds>,
    on_canvas: bool,
}

impl SkeletonObject {
    /// Builds an object from raw `[x, y, confidence]` triples relative to the canvas origin.
    ///
    /// Entries beyond the topology's keypoint count are ignored. Fewer than
    /// [`SkeletonKind::min_keypoints`] entries is a validation error.
    pub fn new(
        kind: SkeletonKind,
        raw: &[[f32; 3]],
        canvas: &Canvas,
        ids: &mut IdGenerator,
    ) -> Result<Self, Error> {
        let expected = kind.min_keypoints();
        if raw.len() < expected {
            return Err(Error::TooFewKeypoints {
                kind,
                expected,
                actual: raw.len(),
            });
        }

        let keypoints = raw
            .iter()
            .take(kind.keypoint_count())
            .enumerate()
            .map(|(index, &[x, y, confidence])| {
                let absolute = canvas.to_absolute(Point::new(x, y));
                // Non-positive raw coordinates mark an undetected joint.
                let detected = canvas.is_valid_position(absolute);
                Keypoint {
                    id: ids.next_keypoint_id(),
                    x: absolute.x,
                    y: absolute.y,
                    confidence,
                    color: kind.keypoint_color(index),
                    name: kind.keypoint_name(index).into_owned(),
                    visible: detected && confidence == 1.0,
                    connections: Vec::new(),
                }
            })
            .collect::<Vec<_>>();

        let mut object = Self {
            kind,
            keypoints,
            connections: Vec::new(),
            canvas: *canvas,
            visible: true,
            locked: false,
            group: None,
            bounds: None,
            on_canvas: false,
        };

        for (index, &(k1, k2)) in kind.connections().iter().enumerate() {
            if k1 >= object.keypoints.len() || k2 >= object.keypoints.len() {
                continue;
            }
            let connection_index = object.connections.len();
            let mut connection = Connection {
                id: ids.next_connection_id(),
                k1,
                k2,
                color: kind.connection_color(index),
                endpoints: [Point::ORIGIN; 2],
                stroke: Transform::IDENTITY,
                visible: false,
            };
            connection.resync(&object.keypoints, &Transform::IDENTITY);
            connection.update_visibility(&object.keypoints);
            object.keypoints[k1].connections.push(connection_index);
            object.keypoints[k2].connections.push(connection_index);
            object.connections.push(connection);
        }

        object.update_bounds();
        Ok(object)
    }

    pub fn body(raw: &[[f32; 3]], canvas: &Canvas, ids: &mut IdGenerator) -> Result<Self, Error> {
        Self::new(SkeletonKind::Body, raw, canvas, ids)
    }

    pub fn hand(raw: &[[f32; 3]], canvas: &Canvas, ids: &mut IdGenerator) -> Result<Self, Error> {
        Self::new(SkeletonKind::Hand, raw, canvas, ids)
    }

    pub fn face(raw: &[[f32; 3]], canvas: &Canvas, ids: &mut IdGenerator) -> Result<Self, Error> {
        Self::new(SkeletonKind::Face, raw, canvas, ids)
    }

    pub fn animal(
        raw: &[[f32; 3]],
        canvas: &Canvas,
        ids: &mut IdGenerator,
    ) -> Result<Self, Error> {
        Self::new(SkeletonKind::Animal, raw, canvas, ids)
    }

    pub fn kind(&self) -> SkeletonKind {
        self.kind
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn keypoint(&self, index: usize) -> Result<&Keypoint, Error> {
        self.keypoints
            .get(index)
            .ok_or(Error::InvalidKeypointIndex {
                kind: self.kind,
                index,
                len: self.keypoints.len(),
            })
    }

    pub fn find_keypoint(&self, name: &str) -> Result<usize, Error> {
        self.keypoints
            .iter()
            .position(|k| k.name == name)
            .ok_or_else(|| Error::UnknownKeypoint {
                kind: self.kind,
                name: name.to_string(),
            })
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Object-level visibility, independent of per-keypoint detection state.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_interactive(&self) -> bool {
        !self.locked
    }

    pub fn is_grouped(&self) -> bool {
        self.group.is_some()
    }

    pub fn is_on_canvas(&self) -> bool {
        self.on_canvas
    }

    pub fn group_transform(&self) -> Option<&GroupTransform> {
        self.group.as_ref()
    }

    /// Bounds of the keypoints in absolute coordinates, as of the last [`Self::update_bounds`].
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Transform from local keypoint coordinates to absolute coordinates.
    pub fn world_transform(&self) -> Transform {
        self.group
            .as_ref()
            .map(GroupTransform::matrix)
            .unwrap_or(Transform::IDENTITY)
    }

    pub fn absolute_position(&self, index: usize) -> Result<Point, Error> {
        let keypoint = self.keypoint(index)?;
        Ok(self.world_transform().apply(keypoint.position()))
    }

    pub fn absolute_positions(&self) -> Vec<Point> {
        let world = self.world_transform();
        self.keypoints
            .iter()
            .map(|k| world.apply(k.position()))
            .collect()
    }

    pub fn is_valid_keypoint(&self, index: usize) -> Result<bool, Error> {
        Ok(self.canvas.is_valid_position(self.absolute_position(index)?))
    }

    /// Keypoints outside the canvas that are hidden; the UI warns about these.
    pub fn invalid_keypoints(&self) -> Vec<&Keypoint> {
        let world = self.world_transform();
        self.keypoints
            .iter()
            .filter(|k| !k.visible && !self.canvas.is_valid_position(world.apply(k.position())))
            .collect()
    }

    pub fn has_invalid_keypoints(&self) -> bool {
        !self.invalid_keypoints().is_empty()
    }

    /// Mean local length of the visible connections, or 0 when none is visible.
    pub fn size(&self) -> f32 {
        let (total, count) = self
            .connections
            .iter()
            .filter(|c| c.visible)
            .fold((0.0f32, 0usize), |(total, count), c| {
                (total + c.length(&self.keypoints), count + 1)
            });
        if count == 0 {
            0.0
        } else {
            total / count as f32
        }
    }

    /// `(x, y, 1)` per visible keypoint relative to the canvas origin, `(0, 0, 0)` otherwise.
    pub fn serialize(&self) -> Vec<f32> {
        let world = self.world_transform();
        let mut out = Vec::with_capacity(self.keypoints.len() * 3);
        for keypoint in &self.keypoints {
            if keypoint.visible {
                let p = self.canvas.to_canvas(world.apply(keypoint.position()));
                out.extend_from_slice(&[p.x, p.y, 1.0]);
            } else {
                out.extend_from_slice(&[0.0, 0.0, 0.0]);
            }
        }
        out
    }

    pub fn add_to_canvas(&mut self, surface: &mut dyn Surface) {
        for keypoint in &self.keypoints {
            surface.add(PrimitiveId::Keypoint(keypoint.id));
        }
        for connection in &self.connections {
            surface.add(PrimitiveId::Connection(connection.id));
        }
        self.on_canvas = true;
    }

    pub fn remove_from_canvas(&mut self, surface: &mut dyn Surface) {
        for keypoint in &self.keypoints {
            surface.remove(PrimitiveId::Keypoint(keypoint.id));
        }
        for connection in &self.connections {
            surface.remove(PrimitiveId::Connection(connection.id));
        }
        self.on_canvas = false;
    }

    fn ensure_unlocked(&self) -> Result<(), Error> {
        if self.locked {
            return Err(Error::Locked { kind: self.kind });
        }
        Ok(())
    }

    fn ensure_grouped(&self, operation: &'static str) -> Result<&GroupTransform, Error> {
        self.group.as_ref().ok_or(Error::NotGrouped {
            kind: self.kind,
            operation,
        })
    }

    fn ensure_on_canvas(&self, operation: &'static str) -> Result<(), Error> {
        if !self.on_canvas {
            return Err(Error::NotOnCanvas {
                kind: self.kind,
                operation,
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        self.keypoint(index).map(|_| ())
    }

    fn resync_keypoint(&mut self, index: usize) {
        let world = self.world_transform();
        for &c in &self.keypoints[index].connections {
            self.connections[c].resync(&self.keypoints, &world);
        }
    }

    fn resync_all(&mut self) {
        let world = self.world_transform();
        for connection in &mut self.connections {
            connection.resync(&self.keypoints, &world);
        }
    }

    /// Moves a keypoint to an absolute position, routing through the group transform.
    pub fn move_keypoint(&mut self, index: usize, absolute: Point) -> Result<(), Error> {
        self.check_index(index)?;
        self.ensure_unlocked()?;
        let local = self
            .world_transform()
            .inverse()
            .ok_or_else(|| Error::InvalidValue {
                message: format!("{} group transform is not invertible", self.kind),
            })?
            .apply(absolute);
        let keypoint = &mut self.keypoints[index];
        keypoint.x = local.x;
        keypoint.y = local.y;
        self.resync_keypoint(index);
        Ok(())
    }

    pub fn set_keypoint_visible(&mut self, index: usize, visible: bool) -> Result<(), Error> {
        self.check_index(index)?;
        self.keypoints[index].visible = visible;
        for &c in &self.keypoints[index].connections {
            self.connections[c].update_visibility(&self.keypoints);
        }
        Ok(())
    }

    /// Exchanges the local positions of two keypoints.
    pub fn swap_keypoints(&mut self, a: usize, b: usize) -> Result<(), Error> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.ensure_unlocked()?;
        self.swap_positions(a, b);
        self.resync_keypoint(a);
        self.resync_keypoint(b);
        Ok(())
    }

    fn swap_positions(&mut self, a: usize, b: usize) {
        let pa = self.keypoints[a].position();
        let pb = self.keypoints[b].position();
        self.keypoints[a].x = pb.x;
        self.keypoints[a].y = pb.y;
        self.keypoints[b].x = pa.x;
        self.keypoints[b].y = pa.y;
    }

    /// Recomputes the cached bounds from the visible keypoints (all keypoints if none is
    /// visible).
    pub fn update_bounds(&mut self) {
        let world = self.world_transform();
        let visible = self
            .keypoints
            .iter()
            .filter(|k| k.visible)
            .map(|k| world.apply(k.position()));
        self.bounds = Bounds::from_points(visible).or_else(|| {
            Bounds::from_points(self.keypoints.iter().map(|k| world.apply(k.position())))
        });
    }

    /// Treats all keypoints and connections as one rigid unit.
    pub fn group(&mut self) -> Result<(), Error> {
        self.ensure_on_canvas("group")?;
        if self.group.is_some() {
            return Ok(());
        }
        self.update_bounds();
        let origin = self.bounds.map(|b| b.center()).unwrap_or(Point::ORIGIN);
        for keypoint in &mut self.keypoints {
            keypoint.x -= origin.x;
            keypoint.y -= origin.y;
        }
        self.group = Some(GroupTransform::at(origin));
        self.resync_all();
        Ok(())
    }

    /// Bakes the group transform into keypoint coordinates and dissolves the group.
    pub fn ungroup(&mut self) -> Result<(), Error> {
        self.ensure_on_canvas("ungroup")?;
        let Some(group) = self.group else {
            return Ok(());
        };
        self.ensure_unlocked()?;

        let world = group.matrix();
        for keypoint in &mut self.keypoints {
            let p = world.apply(keypoint.position());
            keypoint.x = p.x;
            keypoint.y = p.y;
        }
        self.group = None;

        for connection in &mut self.connections {
            connection.reset_stroke();
            connection.resync(&self.keypoints, &Transform::IDENTITY);
        }
        self.update_bounds();
        Ok(())
    }

    /// Groups the object (if needed) and disables interaction.
    pub fn lock(&mut self) -> Result<(), Error> {
        self.group()?;
        self.locked = true;
        Ok(())
    }

    /// Restores interaction; the object stays grouped.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn set_group_transform(&mut self, transform: GroupTransform) -> Result<(), Error> {
        self.ensure_grouped("set_group_transform")?;
        self.ensure_unlocked()?;
        self.group = Some(transform);
        self.resync_all();
        Ok(())
    }

    pub fn translate(&mut self, dx: f32, dy: f32) -> Result<(), Error> {
        let mut group = *self.ensure_grouped("translate")?;
        group.x += dx;
        group.y += dy;
        self.set_group_transform(group)
    }

    /// Scales the group about its origin.
    pub fn scale(&mut self, sx: f32, sy: f32) -> Result<(), Error> {
        if !sx.is_finite() || !sy.is_finite() || sx == 0.0 || sy == 0.0 {
            return Err(Error::InvalidValue {
                message: format!("scale factors must be finite and non-zero, got ({sx}, {sy})"),
            });
        }
        let mut group = *self.ensure_grouped("scale")?;
        group.scale_x *= sx;
        group.scale_y *= sy;
        self.set_group_transform(group)
    }

    /// Rotates the group about its origin.
    pub fn rotate(&mut self, degrees: f32) -> Result<(), Error> {
        let mut group = *self.ensure_grouped("rotate")?;
        group.rotation += degrees;
        self.set_group_transform(group)
    }

    /// Rotates the local coordinates of every keypoint about keypoint `pivot`.
    pub fn rotate_keypoints_about(&mut self, pivot: usize, degrees: f32) -> Result<(), Error> {
        self.check_index(pivot)?;
        self.ensure_unlocked()?;
        if self.group.is_some() {
            return Err(Error::Grouped {
                kind: self.kind,
                operation: "rotate_keypoints_about",
            });
        }
        let center = self.keypoints[pivot].position();
        for keypoint in &mut self.keypoints {
            let p = keypoint.position().rotate_about(center, degrees);
            keypoint.x = p.x;
            keypoint.y = p.y;
        }
        self.resync_all();
        Ok(())
    }

    /// Swaps every `left*` keypoint with its `right*` counterpart.
    pub fn flip(&mut self) -> Result<(), Error> {
        if !self.kind.is_flippable() {
            return Err(Error::NotFlippable { kind: self.kind });
        }
        self.ensure_unlocked()?;

        let mut pairs = Vec::new();
        for (index, keypoint) in self.keypoints.iter().enumerate() {
            let Some(suffix) = keypoint.name.strip_prefix("left") else {
                continue;
            };
            let counterpart = self.find_keypoint(&format!("right{suffix}"))?;
            pairs.push((index, counterpart));
        }

        for (a, b) in pairs {
            self.swap_positions(a, b);
        }
        self.resync_all();
        Ok(())
    }
}
