//! Entity type name -> protocol id table, from the
//! `minecraft:entity_type` registry in `registries.json`.

use rustc_hash::FxHashMap;

use crate::registry_data::protocol_ids;

/// Entity type name -> id resolution.
#[derive(Default)]
pub struct EntityTypeRegistry {
    id_by_name: FxHashMap<String, i32>,
}

impl EntityTypeRegistry {
    /// Extracts the entity type registry out of the parsed
    /// `registries.json`.
    #[must_use]
    pub fn from_registries(registries: Option<&serde_json::Value>) -> Self {
        let mut registry = Self::default();
        for (name, id) in protocol_ids(registries, "minecraft:entity_type") {
            registry.id_by_name.insert(name, id);
        }
        registry
    }

    /// The protocol id for an entity type such as `minecraft:item`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<i32> {
        self.id_by_name.get(name).copied()
    }

    /// How many entity types are known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.id_by_name.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id_by_name.is_empty()
    }
}
