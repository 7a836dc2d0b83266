use crate::application::identifiers::IdGenerator;
use uuid::Uuid;

/// Generates ids from the hex digits of random (v4) UUIDs.
///
/// Lengths above 32 are filled by concatenating several UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        UuidIdGenerator
    }
}

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self, length: usize) -> String {
        let mut id = String::with_capacity(length + 32);
        while id.len() < length {
            id.push_str(&Uuid::new_v4().simple().to_string());
        }
        id.truncate(length);
        id
    }
}
