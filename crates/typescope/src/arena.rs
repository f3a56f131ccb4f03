//! Identity-keyed storage for resolved named schemas.
//!
//! Slots are addressed by stable [`SchemaId`] handles. A placeholder is
//! allocated before a type's properties are resolved and filled in place
//! afterwards, so recursive references always point at the slot that ends up
//! holding the complete schema.

use crate::schema::{NamedSchema, PropertySchema, SchemaNode};
use indexmap::IndexMap;

/// Stable handle to an arena slot. Valid until the arena is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(usize);

impl SchemaId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Named schemas keyed by qualified identity, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SchemaArena {
    slots: IndexMap<String, NamedSchema>,
}

impl SchemaArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.slots.contains_key(identity)
    }

    pub fn id_of(&self, identity: &str) -> Option<SchemaId> {
        self.slots.get_index_of(identity).map(SchemaId)
    }

    /// Inserts or overwrites the slot for `schema.identity`. Re-inserting an
    /// identity keeps its original handle.
    pub fn insert(&mut self, schema: NamedSchema) -> SchemaId {
        let (index, _) = self.slots.insert_full(schema.identity.clone(), schema);
        SchemaId(index)
    }

    /// Allocates an empty object slot for `identity` unless one exists.
    pub fn insert_placeholder(&mut self, name: &str, identity: &str) -> SchemaId {
        if let Some(id) = self.id_of(identity) {
            return id;
        }
        self.insert(NamedSchema::new(name, identity, SchemaNode::empty_object()))
    }

    pub fn get(&self, id: SchemaId) -> Option<&NamedSchema> {
        self.slots.get_index(id.0).map(|(_, schema)| schema)
    }

    pub fn get_mut(&mut self, id: SchemaId) -> Option<&mut NamedSchema> {
        self.slots.get_index_mut(id.0).map(|(_, schema)| schema)
    }

    pub fn get_by_identity(&self, identity: &str) -> Option<&NamedSchema> {
        self.slots.get(identity)
    }

    /// Writes a property into the object held by `id`.
    ///
    /// Existing entries are kept, so a property declared on the type itself
    /// wins over one with the same name on an ancestor. Returns `false` if
    /// the slot does not hold an object or the name was already taken.
    pub fn put_property(&mut self, id: SchemaId, name: String, property: PropertySchema) -> bool {
        let Some(schema) = self.get_mut(id) else {
            return false;
        };
        match schema.node.properties_mut() {
            Some(properties) if !properties.contains_key(&name) => {
                properties.insert(name, property);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedSchema> {
        self.slots.values()
    }

    /// Schemas allocated at or after `start`, in insertion order.
    pub fn iter_from(&self, start: usize) -> impl Iterator<Item = &NamedSchema> {
        self.slots.values().skip(start)
    }

    /// Drops every schema allocated at or after `id`, the slot itself included.
    ///
    /// Handles below `id` stay valid.
    pub fn rollback_to(&mut self, id: SchemaId) {
        self.slots.truncate(id.index());
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
