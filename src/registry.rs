use std::collections::BTreeMap;

pub type ContactId = i32;

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Position {
        Position { x, y }
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Contact {
    pub id: ContactId,
    pub position: Position,
}

/// The fingers currently on the screen. Iterates in ascending id order, which keeps
/// seeded picks reproducible.
#[derive(Debug, Default)]
pub struct ContactRegistry {
    contacts: BTreeMap<ContactId, Contact>,
}

impl ContactRegistry {
    pub fn new() -> ContactRegistry {
        ContactRegistry::default()
    }

    pub fn upsert(&mut self, id: ContactId, position: Position) {
        self.contacts.insert(id, Contact { id, position });
    }

    /// Returns whether the id was being tracked.
    pub fn remove(&mut self, id: ContactId) -> bool {
        self.contacts.remove(&id).is_some()
    }

    #[cfg(test)]
    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn ids(&self) -> Vec<ContactId> {
        self.contacts.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.values()
    }
}
