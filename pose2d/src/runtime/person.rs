use crate::{
    EditorConfig, Error, HAND_WRIST, IdGenerator, Keypoint, SkeletonKind, SkeletonObject, Surface,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn wrist(self) -> &'static str {
        match self {
            Self::Left => "left_wrist",
            Self::Right => "right_wrist",
        }
    }

    pub fn elbow(self) -> &'static str {
        match self {
            Self::Left => "left_elbow",
            Self::Right => "right_elbow",
        }
    }
}

/// Serialized coordinate arrays of one person, 3 numbers per keypoint.
#[derive(Clone, Debug, PartialEq)]
pub struct PersonKeypoints {
    pub kind: SkeletonKind,
    pub pose: Vec<f32>,
    pub hand_left: Option<Vec<f32>>,
    pub hand_right: Option<Vec<f32>>,
    pub face: Option<Vec<f32>>,
}

/// One body (or animal) plus its optional hands and face.
#[derive(Clone, Debug)]
pub struct Person {
    id: u32,
    name: String,
    body: SkeletonObject,
    left_hand: Option<SkeletonObject>,
    right_hand: Option<SkeletonObject>,
    face: Option<SkeletonObject>,
    visible: bool,
}

impl Person {
    /// `name` defaults to `"Person {id}"`.
    pub fn new(
        name: Option<&str>,
        body: SkeletonObject,
        ids: &mut IdGenerator,
    ) -> Result<Self, Error> {
        if !body.kind().is_body_like() {
            return Err(Error::WrongKind {
                expected: "body or animal",
                actual: body.kind(),
            });
        }
        let id = ids.next_person_id();
        Ok(Self {
            id,
            name: name
                .map(str::to_string)
                .unwrap_or_else(|| format!("Person {id}")),
            body,
            left_hand: None,
            right_hand: None,
            face: None,
            visible: true,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_animal(&self) -> bool {
        self.body.kind() == SkeletonKind::Animal
    }

    pub fn body(&self) -> &SkeletonObject {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut SkeletonObject {
        &mut self.body
    }

    pub fn hand(&self, side: Side) -> Option<&SkeletonObject> {
        match side {
            Side::Left => self.left_hand.as_ref(),
            Side::Right => self.right_hand.as_ref(),
        }
    }

    pub fn hand_mut(&mut self, side: Side) -> Option<&mut SkeletonObject> {
        match side {
            Side::Left => self.left_hand.as_mut(),
            Side::Right => self.right_hand.as_mut(),
        }
    }

    pub fn left_hand(&self) -> Option<&SkeletonObject> {
        self.left_hand.as_ref()
    }

    pub fn right_hand(&self) -> Option<&SkeletonObject> {
        self.right_hand.as_ref()
    }

    pub fn face(&self) -> Option<&SkeletonObject> {
        self.face.as_ref()
    }

    pub fn face_mut(&mut self) -> Option<&mut SkeletonObject> {
        self.face.as_mut()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the person and every object it owns.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        for object in self.objects_mut() {
            object.set_visible(visible);
        }
    }

    /// Body first, then left hand, right hand and face when present.
    pub fn objects(&self) -> impl Iterator<Item = &SkeletonObject> {
        std::iter::once(&self.body)
            .chain(self.left_hand.as_ref())
            .chain(self.right_hand.as_ref())
            .chain(self.face.as_ref())
    }

    fn objects_mut(&mut self) -> impl Iterator<Item = &mut SkeletonObject> {
        std::iter::once(&mut self.body)
            .chain(self.left_hand.as_mut())
            .chain(self.right_hand.as_mut())
            .chain(self.face.as_mut())
    }

    pub fn all_keypoints(&self) -> Vec<&Keypoint> {
        self.objects().flat_map(|o| o.keypoints()).collect()
    }

    pub fn add_to_canvas(&mut self, surface: &mut dyn Surface) {
        for object in self.objects_mut() {
            object.add_to_canvas(surface);
        }
    }

    pub fn remove_from_canvas(&mut self, surface: &mut dyn Surface) {
        for object in self.objects_mut() {
            object.remove_from_canvas(surface);
        }
    }

    fn ensure_accepts(&self, part: &SkeletonObject, expected: SkeletonKind) -> Result<(), Error> {
        if self.is_animal() {
            return Err(Error::UnsupportedAttachment {
                body: self.body.kind(),
                part: part.kind(),
            });
        }
        if part.kind() != expected {
            return Err(Error::WrongKind {
                expected: match expected {
                    SkeletonKind::Hand => "hand",
                    _ => "face",
                },
                actual: part.kind(),
            });
        }
        Ok(())
    }

    /// Stores `hand` on `side` as-is. Returns the hand it replaces.
    pub fn set_hand(
        &mut self,
        side: Side,
        hand: SkeletonObject,
    ) -> Result<Option<SkeletonObject>, Error> {
        self.ensure_accepts(&hand, SkeletonKind::Hand)?;
        Ok(self.store_hand(side, hand))
    }

    pub(crate) fn store_hand(
        &mut self,
        side: Side,
        hand: SkeletonObject,
    ) -> Option<SkeletonObject> {
        match side {
            Side::Left => self.left_hand.replace(hand),
            Side::Right => self.right_hand.replace(hand),
        }
    }

    /// Sizes, orients and places `hand` at the body's wrist on `side`.
    ///
    /// The hand must already be on a canvas. On error `hand` is left exactly as it was.
    pub fn fit_hand(
        &self,
        side: Side,
        hand: &mut SkeletonObject,
        config: &EditorConfig,
    ) -> Result<(), Error> {
        self.ensure_accepts(hand, SkeletonKind::Hand)?;
        let mut candidate = hand.clone();
        fit_hand_to_wrist(&self.body, &mut candidate, side, config)?;
        *hand = candidate;
        Ok(())
    }

    /// [`Self::fit_hand`] followed by [`Self::set_hand`].
    pub fn attach_hand(
        &mut self,
        side: Side,
        mut hand: SkeletonObject,
        config: &EditorConfig,
    ) -> Result<Option<SkeletonObject>, Error> {
        self.fit_hand(side, &mut hand, config)?;
        log::debug!(
            "attached {:?} hand to person {} at {:?}",
            side,
            self.id,
            hand.absolute_position(HAND_WRIST).ok()
        );
        self.set_hand(side, hand)
    }

    /// Records the face without repositioning it.
    // TODO: fit the face to the nose/eye/ear keypoints once the placement rules are agreed.
    pub fn attach_face(&mut self, face: SkeletonObject) -> Result<Option<SkeletonObject>, Error> {
        self.ensure_accepts(&face, SkeletonKind::Face)?;
        Ok(self.face.replace(face))
    }

    pub fn detach_hand(&mut self, side: Side) -> Option<SkeletonObject> {
        match side {
            Side::Left => self.left_hand.take(),
            Side::Right => self.right_hand.take(),
        }
    }

    pub fn detach_face(&mut self) -> Option<SkeletonObject> {
        self.face.take()
    }

    pub fn serialize(&self) -> PersonKeypoints {
        PersonKeypoints {
            kind: self.body.kind(),
            pose: self.body.serialize(),
            hand_left: self.left_hand.as_ref().map(SkeletonObject::serialize),
            hand_right: self.right_hand.as_ref().map(SkeletonObject::serialize),
            face: self.face.as_ref().map(SkeletonObject::serialize),
        }
    }
}

/// Size fit, angle fit, then location fit. The order matters: rotation works on local
/// coordinates, so the scale has to be baked in by ungrouping first.
fn fit_hand_to_wrist(
    body: &SkeletonObject,
    hand: &mut SkeletonObject,
    side: Side,
    config: &EditorConfig,
) -> Result<(), Error> {
    let wrist = body.absolute_position(body.find_keypoint(side.wrist())?)?;
    let elbow = body.absolute_position(body.find_keypoint(side.elbow())?)?;

    hand.group()?;
    let forearm = wrist.distance_to(elbow);
    let hand_length = hand.size() * config.hand_segments;
    if hand_length <= 0.0 {
        return Err(Error::InvalidValue {
            message: "hand has no visible connections to measure".to_string(),
        });
    }
    let ratio = forearm * config.hand_forearm_ratio / hand_length;
    hand.scale(ratio, ratio)?;

    hand.ungroup()?;
    // Fingers point up at rest; turning by `target - 90°` points them away from the elbow.
    let target = (elbow.y - wrist.y).atan2(elbow.x - wrist.x).to_degrees();
    hand.rotate_keypoints_about(HAND_WRIST, target - 90.0)?;

    hand.group()?;
    let hand_wrist = hand.absolute_position(HAND_WRIST)?;
    hand.translate(wrist.x - hand_wrist.x, wrist.y - hand_wrist.y)?;
    hand.update_bounds();
    Ok(())
}
