/// Hands out monotonically increasing ids for one editing session.
///
/// Each primitive family has its own counter; ids are never reused within a generator.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    next_keypoint: u32,
    next_connection: u32,
    next_person: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_keypoint_id(&mut self) -> u32 {
        let id = self.next_keypoint;
        self.next_keypoint += 1;
        id
    }

    pub fn next_connection_id(&mut self) -> u32 {
        let id = self.next_connection;
        self.next_connection += 1;
        id
    }

    pub fn next_person_id(&mut self) -> u32 {
        let id = self.next_person;
        self.next_person += 1;
        id
    }
}
