//! OpenPose keypoint JSON documents.

use crate::{
    Canvas, EditorSession, Error, Person, PersonKeypoints, Side, SkeletonKind, SkeletonObject,
    Surface,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseDocument {
    pub canvas_width: f32,
    pub canvas_height: f32,
    #[serde(default)]
    pub people: Vec<PersonDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animals: Option<Vec<Vec<f32>>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonDef {
    #[serde(default)]
    pub pose_keypoints_2d: Vec<f32>,
    #[serde(default)]
    pub hand_right_keypoints_2d: Option<Vec<f32>>,
    #[serde(default)]
    pub hand_left_keypoints_2d: Option<Vec<f32>>,
    #[serde(default)]
    pub face_keypoints_2d: Option<Vec<f32>>,
}

/// An entity dropped while loading a document.
#[derive(Debug)]
pub struct SkippedEntity {
    /// Index into `people`, or into `animals` when `kind` is [`SkeletonKind::Animal`].
    pub index: usize,
    pub kind: SkeletonKind,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct LoadedPose {
    pub people: Vec<Person>,
    pub skipped: Vec<SkippedEntity>,
}

impl PoseDocument {
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        serde_json::from_str(input).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|e| Error::InvalidValue {
            message: e.to_string(),
        })
    }

    pub fn to_json_string_pretty(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidValue {
            message: e.to_string(),
        })
    }

    /// Humans go to `people`; animals go to `animals`, which is omitted when empty.
    pub fn from_keypoints(records: &[PersonKeypoints], canvas: &Canvas) -> Self {
        let mut people = Vec::new();
        let mut animals = Vec::new();
        for record in records {
            if record.kind == SkeletonKind::Animal {
                animals.push(record.pose.clone());
                continue;
            }
            people.push(PersonDef {
                pose_keypoints_2d: record.pose.clone(),
                hand_right_keypoints_2d: record.hand_right.clone(),
                hand_left_keypoints_2d: record.hand_left.clone(),
                face_keypoints_2d: record.face.clone(),
            });
        }
        Self {
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            people,
            animals: (!animals.is_empty()).then_some(animals),
        }
    }

    pub fn from_people(people: &[Person], canvas: &Canvas) -> Self {
        let records = people.iter().map(Person::serialize).collect::<Vec<_>>();
        Self::from_keypoints(&records, canvas)
    }

    /// Rebuilds people and animals. Entities with too few keypoints are skipped and
    /// reported; the rest of the document still loads.
    pub fn load(&self, session: &mut EditorSession) -> LoadedPose {
        let mut out = LoadedPose::default();

        for (index, def) in self.people.iter().enumerate() {
            let body = match self.build(session, SkeletonKind::Body, &def.pose_keypoints_2d) {
                Ok(body) => body,
                Err(error) => {
                    skip(&mut out, index, SkeletonKind::Body, error);
                    continue;
                }
            };
            let mut person = match session.new_person(None, body) {
                Ok(person) => person,
                Err(error) => {
                    skip(&mut out, index, SkeletonKind::Body, error);
                    continue;
                }
            };

            let hands = [
                (Side::Left, &def.hand_left_keypoints_2d),
                (Side::Right, &def.hand_right_keypoints_2d),
            ];
            for (side, values) in hands {
                let Some(values) = values else {
                    continue;
                };
                let attached = self
                    .build(session, SkeletonKind::Hand, values)
                    .and_then(|hand| person.set_hand(side, hand));
                if let Err(error) = attached {
                    skip(&mut out, index, SkeletonKind::Hand, error);
                }
            }

            if let Some(values) = &def.face_keypoints_2d {
                let attached = self
                    .build(session, SkeletonKind::Face, values)
                    .and_then(|face| person.attach_face(face));
                if let Err(error) = attached {
                    skip(&mut out, index, SkeletonKind::Face, error);
                }
            }

            out.people.push(person);
        }

        for (index, values) in self.animals.iter().flatten().enumerate() {
            let person = self
                .build(session, SkeletonKind::Animal, values)
                .and_then(|animal| session.new_person(None, animal));
            match person {
                Ok(person) => out.people.push(person),
                Err(error) => skip(&mut out, index, SkeletonKind::Animal, error),
            }
        }

        out
    }

    fn build(
        &self,
        session: &mut EditorSession,
        kind: SkeletonKind,
        values: &[f32],
    ) -> Result<SkeletonObject, Error> {
        let mut raw = parse_triples(&kind.to_string(), values)?;
        denormalize(&mut raw, self.canvas_width, self.canvas_height);
        session.try_create(kind, &raw)
    }
}

fn skip(out: &mut LoadedPose, index: usize, kind: SkeletonKind, error: Error) {
    log::warn!("skipping {kind} of entry {index}: {error}");
    out.skipped.push(SkippedEntity { index, kind, error });
}

fn parse_triples(field: &str, values: &[f32]) -> Result<Vec<[f32; 3]>, Error> {
    if values.len() % 3 != 0 {
        return Err(Error::JsonKeypointArray {
            field: field.to_string(),
            len: values.len(),
        });
    }
    Ok(values
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect())
}

/// Arrays whose every value lies in `[-1, 1]` hold normalized coordinates; scale them to
/// the document canvas.
fn denormalize(raw: &mut [[f32; 3]], width: f32, height: f32) {
    let normalized = raw.iter().flatten().all(|v| v.abs() <= 1.0);
    if !normalized {
        return;
    }
    for point in raw {
        point[0] *= width;
        point[1] *= height;
    }
}

impl EditorSession {
    pub fn to_document(&self) -> PoseDocument {
        PoseDocument::from_keypoints(&self.serialize(), &self.config().canvas)
    }

    pub fn to_json_string(&self) -> Result<String, Error> {
        self.to_document().to_json_string()
    }

    /// Parses `input`, adds every loaded person to the session and the surface, and returns
    /// what had to be skipped.
    pub fn load_json_str(
        &mut self,
        input: &str,
        surface: &mut dyn Surface,
    ) -> Result<Vec<SkippedEntity>, Error> {
        let document = PoseDocument::from_json_str(input)?;
        let loaded = document.load(self);
        for person in loaded.people {
            self.add_person(person, surface);
        }
        Ok(loaded.skipped)
    }
}
