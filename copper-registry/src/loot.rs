//! Block -> dropped item table, from `loot_table_mappings.json`.

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::load_json;

/// Block name -> item name drop resolution.
#[derive(Default)]
pub struct LootRegistry {
    item_by_block: FxHashMap<String, String>,
}

impl LootRegistry {
    /// Loads `loot_table_mappings.json`.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        Self {
            item_by_block: load_json(data_dir, "loot_table_mappings.json").unwrap_or_default(),
        }
    }

    /// The item a block drops when mined, if any.
    #[must_use]
    pub fn drop_for(&self, block_name: &str) -> Option<&str> {
        self.item_by_block.get(block_name).map(String::as_str)
    }

    /// How many mappings are known.
    #[must_use]
    pub fn len(&self) -> usize {
        self.item_by_block.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_by_block.is_empty()
    }
}
