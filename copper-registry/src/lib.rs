//! # Copper Registry
//!
//! Read-only lookup tables mined from the vendor JAR by the extraction
//! scripts and loaded once at process start from `extracted_data/`.
//!
//! Every lookup returns `Option`; a missing file or entry degrades the
//! feature that needed it (a block with no loot drops nothing, an item with
//! no block state cannot be placed) but never the server.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

pub mod blocks;
pub mod entity_types;
pub mod items;
pub mod loot;
pub mod registry_data;

pub use blocks::BlockRegistry;
pub use entity_types::EntityTypeRegistry;
pub use items::ItemRegistry;
pub use loot::LootRegistry;
pub use registry_data::RegistryDataSet;

/// The immutable handle to every static table, shared by all components.
pub struct Registry {
    #[allow(missing_docs)]
    pub blocks: BlockRegistry,
    #[allow(missing_docs)]
    pub items: ItemRegistry,
    #[allow(missing_docs)]
    pub entity_types: EntityTypeRegistry,
    #[allow(missing_docs)]
    pub loot: LootRegistry,
    /// Ordered biome names; the order defines the implicit numeric ids.
    pub biomes: Vec<String>,
    /// Ordered damage type names.
    pub damage_types: Vec<String>,
    /// Configuration-phase registry payloads.
    pub registry_data: RegistryDataSet,
}

impl Registry {
    /// Loads every table from `extracted_data/` under the given directory.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let registries: Option<serde_json::Value> = load_json(data_dir, "registries.json");

        let biomes: Vec<String> = load_json(data_dir, "biomes.json").unwrap_or_default();
        let damage_types: Vec<String> = load_json(data_dir, "damage_types.json").unwrap_or_default();

        let mut registry_data = RegistryDataSet::load(data_dir);
        registry_data.backfill("minecraft:worldgen/biome", &biomes);
        registry_data.backfill("minecraft:damage_type", &damage_types);

        let registry = Self {
            blocks: BlockRegistry::load(data_dir),
            items: ItemRegistry::from_registries(registries.as_ref()),
            entity_types: EntityTypeRegistry::from_registries(registries.as_ref()),
            loot: LootRegistry::load(data_dir),
            biomes,
            damage_types,
            registry_data,
        };

        log::info!(
            "Loaded registries: {} block states, {} items, {} entity types, {} loot mappings, {} biomes, {} damage types",
            registry.blocks.state_count(),
            registry.items.len(),
            registry.entity_types.len(),
            registry.loot.len(),
            registry.biomes.len(),
            registry.damage_types.len(),
        );

        registry
    }

    /// Protocol id of the `minecraft:item` entity type, used for dropped
    /// item spawns.
    #[must_use]
    pub fn item_entity_type(&self) -> Option<i32> {
        self.entity_types.by_name("minecraft:item")
    }
}

pub(crate) fn load_json<T: DeserializeOwned>(data_dir: &Path, file: &str) -> Option<T> {
    let path: PathBuf = data_dir.join(file);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) => {
            log::warn!("Missing registry file {}: {err}", path.display());
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(err) => {
            log::error!("Malformed registry file {}: {err}", path.display());
            None
        }
    }
}
