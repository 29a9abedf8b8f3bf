//! Configuration-phase registry payloads from `registry_data.json`, plus
//! the JSON -> NBT conversion the Registry Data packets need.

use std::path::Path;

use rustc_hash::FxHashMap;
use simdnbt::owned::{NbtCompound, NbtList, NbtTag};

use crate::load_json;

/// The registries the configuration phase must synchronise even when the
/// extraction file lacks them; entries then go out name-only.
const REQUIRED_REGISTRIES: [&str; 3] = [
    "minecraft:dimension_type",
    "minecraft:worldgen/biome",
    "minecraft:damage_type",
];

/// One registry to synchronise: its name and ordered entries.
pub struct RegistryPayload {
    /// Registry name, e.g. `minecraft:dimension_type`.
    pub registry: String,
    /// Ordered `(entry_name, payload)` pairs; order defines numeric ids.
    pub entries: Vec<(String, Option<NbtCompound>)>,
}

/// Everything `registry_data.json` contributed, ready for the
/// configuration phase.
#[derive(Default)]
pub struct RegistryDataSet {
    /// All payloads, in the order they will be sent.
    pub payloads: Vec<RegistryPayload>,
}

impl RegistryDataSet {
    /// Loads `registry_data.json` and fills in the required registries
    /// from the plain name lists when the file misses them.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let raw: FxHashMap<String, serde_json::Map<String, serde_json::Value>> =
            load_json(data_dir, "registry_data.json").unwrap_or_default();

        let mut payloads: Vec<RegistryPayload> = raw
            .into_iter()
            .map(|(registry, entries)| RegistryPayload {
                registry,
                entries: entries
                    .into_iter()
                    .map(|(name, value)| {
                        let compound = match json_to_nbt(&value) {
                            Some(NbtTag::Compound(compound)) => Some(compound),
                            _ => None,
                        };
                        (name, compound)
                    })
                    .collect(),
            })
            .collect();
        payloads.sort_by(|a, b| a.registry.cmp(&b.registry));

        let mut set = Self { payloads };

        for required in REQUIRED_REGISTRIES {
            if !set.payloads.iter().any(|p| p.registry == required) {
                set.payloads.push(RegistryPayload {
                    registry: required.to_string(),
                    entries: Vec::new(),
                });
            }
        }

        set
    }

    /// Backfills name-only entries for a registry that came up empty, from
    /// an ordered name list (`biomes.json` / `damage_types.json`).
    pub fn backfill(&mut self, registry: &str, names: &[String]) {
        if let Some(payload) = self
            .payloads
            .iter_mut()
            .find(|p| p.registry == registry && p.entries.is_empty())
        {
            payload.entries = names
                .iter()
                .map(|name| (qualify(name), None))
                .collect();
        }
    }
}

fn qualify(name: &str) -> String {
    if name.contains(':') {
        name.to_string()
    } else {
        format!("minecraft:{name}")
    }
}

/// Extracts `(entry_name, protocol_id)` pairs for one registry out of the
/// parsed `registries.json` document.
pub(crate) fn protocol_ids(
    registries: Option<&serde_json::Value>,
    registry_name: &str,
) -> Vec<(String, i32)> {
    let Some(entries) = registries
        .and_then(|root| root.get(registry_name))
        .and_then(|registry| registry.get("entries"))
        .and_then(serde_json::Value::as_object)
    else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|(name, entry)| {
            let id = entry.get("protocol_id")?.as_i64()?;
            Some((name.clone(), id as i32))
        })
        .collect()
}

/// Converts an extraction-script JSON value into an NBT tag.
///
/// Integers become Int (or Long when they overflow), other numbers Double,
/// and arrays become homogeneous lists keyed on their first element. Nulls
/// have no NBT form and are dropped.
#[must_use]
pub fn json_to_nbt(value: &serde_json::Value) -> Option<NbtTag> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(value) => Some(NbtTag::Byte(i8::from(*value))),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                if let Ok(int) = i32::try_from(int) {
                    Some(NbtTag::Int(int))
                } else {
                    Some(NbtTag::Long(int))
                }
            } else {
                Some(NbtTag::Double(number.as_f64()?))
            }
        }
        serde_json::Value::String(value) => Some(NbtTag::String(value.clone().into())),
        serde_json::Value::Array(values) => {
            let tags: Vec<NbtTag> = values.iter().filter_map(json_to_nbt).collect();
            Some(NbtTag::List(NbtList::from(tags)))
        }
        serde_json::Value::Object(map) => {
            let mut compound = NbtCompound::new();
            for (key, value) in map {
                if let Some(tag) = json_to_nbt(value) {
                    compound.insert(key.as_str(), tag);
                }
            }
            Some(NbtTag::Compound(compound))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_to_nbt_scalars() {
        assert!(matches!(
            json_to_nbt(&serde_json::json!(true)),
            Some(NbtTag::Byte(1))
        ));
        assert!(matches!(
            json_to_nbt(&serde_json::json!(7)),
            Some(NbtTag::Int(7))
        ));
        assert!(matches!(
            json_to_nbt(&serde_json::json!(0.5)),
            Some(NbtTag::Double(_))
        ));
        assert!(json_to_nbt(&serde_json::Value::Null).is_none());
    }

    #[test]
    fn test_json_to_nbt_compound() {
        let value = serde_json::json!({
            "has_skylight": true,
            "logical_height": 384,
            "infiniburn": "#minecraft:infiniburn_overworld"
        });

        let Some(NbtTag::Compound(compound)) = json_to_nbt(&value) else {
            panic!("expected a compound");
        };
        assert!(matches!(compound.get("has_skylight"), Some(&NbtTag::Byte(1))));
        assert!(matches!(
            compound.get("logical_height"),
            Some(&NbtTag::Int(384))
        ));
    }

    #[test]
    fn test_protocol_ids_extraction() {
        let registries = serde_json::json!({
            "minecraft:item": {
                "entries": {
                    "minecraft:dirt": {"protocol_id": 29},
                    "minecraft:stone": {"protocol_id": 1}
                }
            }
        });

        let mut ids = protocol_ids(Some(&registries), "minecraft:item");
        ids.sort();
        assert_eq!(
            ids,
            vec![
                ("minecraft:dirt".to_string(), 29),
                ("minecraft:stone".to_string(), 1)
            ]
        );
        assert!(protocol_ids(Some(&registries), "minecraft:block").is_empty());
    }
}
