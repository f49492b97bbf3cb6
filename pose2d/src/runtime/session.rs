use crate::{
    EditorConfig, Error, IdGenerator, Person, PersonKeypoints, Side, SkeletonKind, SkeletonObject,
    Surface,
};

/// Top-level editing context: configuration, id generation and the people on the canvas.
#[derive(Clone, Debug, Default)]
pub struct EditorSession {
    config: EditorConfig,
    ids: IdGenerator,
    people: Vec<Person>,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            ids: IdGenerator::new(),
            people: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    pub fn try_create(
        &mut self,
        kind: SkeletonKind,
        raw: &[[f32; 3]],
    ) -> Result<SkeletonObject, Error> {
        SkeletonObject::new(kind, raw, &self.config.canvas, &mut self.ids)
    }

    /// Validating constructor: reports a shortfall with a warning and returns `None`.
    pub fn create(&mut self, kind: SkeletonKind, raw: &[[f32; 3]]) -> Option<SkeletonObject> {
        match self.try_create(kind, raw) {
            Ok(object) => Some(object),
            Err(e) => {
                log::warn!("skipping {kind}: {e}");
                None
            }
        }
    }

    pub fn create_body(&mut self, raw: &[[f32; 3]]) -> Option<SkeletonObject> {
        self.create(SkeletonKind::Body, raw)
    }

    pub fn create_hand(&mut self, raw: &[[f32; 3]]) -> Option<SkeletonObject> {
        self.create(SkeletonKind::Hand, raw)
    }

    pub fn create_face(&mut self, raw: &[[f32; 3]]) -> Option<SkeletonObject> {
        self.create(SkeletonKind::Face, raw)
    }

    pub fn create_animal(&mut self, raw: &[[f32; 3]]) -> Option<SkeletonObject> {
        self.create(SkeletonKind::Animal, raw)
    }

    pub fn new_person(
        &mut self,
        name: Option<&str>,
        body: SkeletonObject,
    ) -> Result<Person, Error> {
        Person::new(name, body, &mut self.ids)
    }

    /// Registers `person` with the surface and takes ownership of it. Returns its id.
    pub fn add_person(&mut self, mut person: Person, surface: &mut dyn Surface) -> u32 {
        person.add_to_canvas(surface);
        let id = person.id();
        self.people.push(person);
        id
    }

    pub fn remove_person(&mut self, id: u32, surface: &mut dyn Surface) -> Option<Person> {
        let index = self.people.iter().position(|p| p.id() == id)?;
        let mut person = self.people.remove(index);
        person.remove_from_canvas(surface);
        Some(person)
    }

    pub fn clear(&mut self, surface: &mut dyn Surface) {
        for mut person in self.people.drain(..) {
            person.remove_from_canvas(surface);
        }
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, id: u32) -> Option<&Person> {
        self.people.iter().find(|p| p.id() == id)
    }

    pub fn person_mut(&mut self, id: u32) -> Option<&mut Person> {
        self.people.iter_mut().find(|p| p.id() == id)
    }

    /// Adds `hand` to the surface, then fits and attaches it to person `id`.
    ///
    /// On failure the hand is taken back off the surface and returned with the error.
    pub fn attach_hand(
        &mut self,
        id: u32,
        side: Side,
        mut hand: SkeletonObject,
        surface: &mut dyn Surface,
    ) -> Result<(), (Error, SkeletonObject)> {
        let Some(person) = self.people.iter_mut().find(|p| p.id() == id) else {
            return Err((
                Error::InvalidValue {
                    message: format!("unknown person id {id}"),
                },
                hand,
            ));
        };

        hand.add_to_canvas(surface);
        if let Err(e) = person.fit_hand(side, &mut hand, &self.config) {
            hand.remove_from_canvas(surface);
            return Err((e, hand));
        }
        if let Some(mut replaced) = person.store_hand(side, hand) {
            replaced.remove_from_canvas(surface);
        }
        Ok(())
    }

    pub fn serialize(&self) -> Vec<PersonKeypoints> {
        self.people.iter().map(Person::serialize).collect()
    }
}
