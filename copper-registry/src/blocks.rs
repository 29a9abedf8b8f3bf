//! Block name <-> state id tables, from `blocks.json` and
//! `block_hardness.json`.

use std::path::Path;

use copper_utils::BlockStateId;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::load_json;

#[derive(Deserialize)]
struct BlockDefinition {
    states: Vec<BlockStateDefinition>,
}

#[derive(Deserialize)]
struct BlockStateDefinition {
    id: u16,
    #[serde(default)]
    default: bool,
}

/// Block name <-> state id resolution.
///
/// `blocks.json` maps every block to all of its states; the default state
/// is the one placement uses, and every state maps back to its block name
/// so mined blocks can be resolved to loot entries.
#[derive(Default)]
pub struct BlockRegistry {
    default_state_by_name: FxHashMap<String, BlockStateId>,
    name_by_state: FxHashMap<BlockStateId, String>,
    hardness_by_name: FxHashMap<String, f32>,
    tool_speeds: FxHashMap<String, f32>,
}

impl BlockRegistry {
    /// Loads `blocks.json` and the optional `block_hardness.json`.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let mut registry = Self::default();

        let blocks: Option<FxHashMap<String, BlockDefinition>> = load_json(data_dir, "blocks.json");
        for (name, definition) in blocks.unwrap_or_default() {
            let default_state = definition
                .states
                .iter()
                .find(|state| state.default)
                .or_else(|| definition.states.first());

            if let Some(state) = default_state {
                registry
                    .default_state_by_name
                    .insert(name.clone(), BlockStateId(state.id));
            }
            for state in &definition.states {
                registry
                    .name_by_state
                    .insert(BlockStateId(state.id), name.clone());
            }
        }

        registry.hardness_by_name = load_json(data_dir, "block_hardness.json").unwrap_or_default();
        registry.tool_speeds = load_json(data_dir, "tool_speeds.json").unwrap_or_default();

        registry
    }

    /// The default state id for a block name such as `minecraft:dirt`.
    #[must_use]
    pub fn default_state(&self, name: &str) -> Option<BlockStateId> {
        self.default_state_by_name.get(name).copied()
    }

    /// The canonical block name owning a state id.
    #[must_use]
    pub fn name_of_state(&self, state: BlockStateId) -> Option<&str> {
        self.name_by_state.get(&state).map(String::as_str)
    }

    /// Block hardness; -1.0 denotes unbreakable. Advisory only.
    #[must_use]
    pub fn hardness(&self, name: &str) -> Option<f32> {
        self.hardness_by_name.get(name).copied()
    }

    /// Mining speed multiplier of a tool. Advisory only.
    #[must_use]
    pub fn tool_speed(&self, tool: &str) -> Option<f32> {
        self.tool_speeds.get(tool).copied()
    }

    /// How many states are known.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.name_by_state.len()
    }
}
