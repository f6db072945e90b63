use std::collections::BTreeMap;

use crate::mover::MovingBlockRecord;

use super::{CellPos, EntityId, ResourceMeter};

/// Component payload tracked per live entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityRecord {
    /// Template the entity was stamped from, inherited by derived entities.
    pub template: Option<String>,
    /// Cell the entity is anchored to, when world-anchored.
    pub location: Option<CellPos>,
    /// Present while the entity is the transitional actor of a block move.
    pub moving_block: Option<MovingBlockRecord>,
    /// Remaining damage the entity can absorb, when damageable.
    pub durability: Option<ResourceMeter>,
}

/// Allocates and tracks entities. Identifiers are never reused.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    next_id: u32,
    records: BTreeMap<EntityId, EntityRecord>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a blank entity and returns its id.
    pub fn create(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        debug_assert!(!id.is_world(), "entity id space exhausted");
        self.next_id += 1;
        self.records.insert(id, EntityRecord::default());
        id
    }

    /// Creates an entity stamped from `template`.
    pub fn create_from_template(&mut self, template: Option<&str>) -> EntityId {
        let id = self.create();
        if let Some(name) = template {
            if let Some(record) = self.records.get_mut(&id) {
                record.template = Some(name.to_owned());
            }
        }
        id
    }

    /// Removes the entity. Returns true if it was alive.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        self.records.remove(&id).is_some()
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn record(&self, id: EntityId) -> Option<&EntityRecord> {
        self.records.get(&id)
    }

    pub fn record_mut(&mut self, id: EntityId) -> Option<&mut EntityRecord> {
        self.records.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_allocate_monotonically_and_never_recycle() {
        let mut store = EntityStore::new();
        let first = store.create();
        let second = store.create();
        assert!(first < second);

        store.destroy(first);
        let third = store.create();
        assert!(second < third);
        assert!(!store.is_alive(first));
    }

    #[test]
    fn template_is_stamped_on_creation() {
        let mut store = EntityStore::new();
        let blank = store.create_from_template(None);
        let stamped = store.create_from_template(Some("core:stone_block"));

        assert_eq!(store.record(blank).unwrap().template, None);
        assert_eq!(
            store.record(stamped).unwrap().template.as_deref(),
            Some("core:stone_block")
        );
    }

    #[test]
    fn destroy_reports_liveness() {
        let mut store = EntityStore::new();
        let id = store.create();
        assert!(store.destroy(id));
        assert!(!store.destroy(id));
        assert!(store.record(id).is_none());
    }
}
