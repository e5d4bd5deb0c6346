//! Flat entity arena keyed by full name
//!
//! Parent/child relations are full-name lookups into this registry, never
//! owning references, so the entity graph has no ownership cycles.

use super::Entity;
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    index: FxHashMap<String, usize>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Add an entity. Returns it back unchanged if its full name is taken.
    pub fn insert(&mut self, entity: Entity) -> Result<(), Entity> {
        if self.index.contains_key(entity.full_name()) {
            return Err(entity);
        }
        self.index
            .insert(entity.full_name().to_string(), self.entities.len());
        self.entities.push(entity);
        Ok(())
    }

    pub fn get(&self, full_name: &str) -> Option<&Entity> {
        self.index.get(full_name).map(|&i| &self.entities[i])
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.index.contains_key(full_name)
    }

    /// Position in load order
    pub fn position(&self, full_name: &str) -> Option<usize> {
        self.index.get(full_name).copied()
    }

    /// Parent of an entity, `None` for roots and orphans
    pub fn parent_of(&self, entity: &Entity) -> Option<&Entity> {
        entity.parent_full_name().and_then(|p| self.get(p))
    }

    /// Children of an entity in load order; unknown names are skipped
    pub fn children_of<'a>(&'a self, entity: &'a Entity) -> impl Iterator<Item = &'a Entity> + 'a {
        entity
            .children_full_names()
            .iter()
            .filter_map(move |c| self.get(c))
    }

    /// Entities in load order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
