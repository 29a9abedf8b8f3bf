//! Item name <-> protocol id table, from the `minecraft:item` registry in
//! `registries.json`.

use rustc_hash::FxHashMap;

use crate::registry_data::protocol_ids;

/// Item name <-> id resolution.
#[derive(Default)]
pub struct ItemRegistry {
    id_by_name: FxHashMap<String, i32>,
    name_by_id: FxHashMap<i32, String>,
}

impl ItemRegistry {
    /// Extracts the item registry out of the parsed `registries.json`.
    #[must_use]
    pub fn from_registries(registries: Option<&serde_json::Value>) -> Self {
        let mut registry = Self::default();

        for (name, id) in protocol_ids(registries, "minecraft:item") {
            registry.name_by_id.insert(id, name.clone());
            registry.id_by_name.insert(name, id);
        }

        registry
    }

    /// The protocol id for an item name such as `minecraft:dirt`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<i32> {
        self.id_by_name.get(name).copied()
    }

    /// The item name for a protocol id.
    #[must_use]
    pub fn by_id(&self, id: i32) -> Option<&str> {
        self.name_by_id.get(&id).map(String::as_str)
    }

    /// How many items are known.
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
