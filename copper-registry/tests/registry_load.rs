//! Loads a full miniature `extracted_data/` directory and checks every
//! table, including the tolerance for files that are absent.

use std::fs;
use std::path::PathBuf;

use copper_registry::Registry;
use copper_utils::BlockStateId;

fn write_fixture(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("copper-registry-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    fs::write(
        dir.join("registries.json"),
        r#"{
            "minecraft:item": {
                "entries": {
                    "minecraft:stone": {"protocol_id": 1},
                    "minecraft:dirt": {"protocol_id": 29}
                }
            },
            "minecraft:entity_type": {
                "entries": {
                    "minecraft:item": {"protocol_id": 70},
                    "minecraft:player": {"protocol_id": 148}
                }
            }
        }"#,
    )
    .unwrap();

    fs::write(
        dir.join("blocks.json"),
        r#"{
            "minecraft:stone": {"states": [{"id": 1, "default": true}]},
            "minecraft:dirt": {"states": [{"id": 10, "default": true}]},
            "minecraft:grass_block": {
                "states": [{"id": 8}, {"id": 9, "default": true}]
            }
        }"#,
    )
    .unwrap();

    fs::write(
        dir.join("loot_table_mappings.json"),
        r#"{"minecraft:grass_block": "minecraft:dirt", "minecraft:stone": "minecraft:cobblestone"}"#,
    )
    .unwrap();

    fs::write(
        dir.join("biomes.json"),
        r#"["plains", "desert", "forest"]"#,
    )
    .unwrap();

    fs::write(dir.join("damage_types.json"), r#"["in_fire", "generic"]"#).unwrap();

    fs::write(
        dir.join("registry_data.json"),
        r#"{
            "minecraft:dimension_type": {
                "minecraft:overworld": {
                    "has_skylight": true,
                    "height": 384,
                    "min_y": -64,
                    "ambient_light": 0.0
                }
            }
        }"#,
    )
    .unwrap();

    // block_hardness.json and tool_speeds.json stay absent on purpose.
    dir
}

#[test]
fn test_full_load_and_lookups() {
    let dir = write_fixture("lookups");
    let registry = Registry::load(&dir);
    fs::remove_dir_all(&dir).ok();

    // Blocks.
    assert_eq!(
        registry.blocks.default_state("minecraft:grass_block"),
        Some(BlockStateId(9))
    );
    assert_eq!(
        registry.blocks.name_of_state(BlockStateId(8)),
        Some("minecraft:grass_block")
    );

    // Items both ways.
    assert_eq!(registry.items.by_name("minecraft:dirt"), Some(29));
    assert_eq!(registry.items.by_id(1), Some("minecraft:stone"));
    assert_eq!(registry.items.by_name("minecraft:unknown"), None);

    // Entity types.
    assert_eq!(registry.item_entity_type(), Some(70));

    // Loot chain: grass drops dirt, which resolves to an item id.
    let dropped = registry
        .loot
        .drop_for("minecraft:grass_block")
        .and_then(|item| registry.items.by_name(item));
    assert_eq!(dropped, Some(29));

    // A loot entry pointing at an unknown item resolves to nothing.
    let dropped = registry
        .loot
        .drop_for("minecraft:stone")
        .and_then(|item| registry.items.by_name(item));
    assert_eq!(dropped, None);

    // Ordered name lists.
    assert_eq!(registry.biomes, vec!["plains", "desert", "forest"]);
    assert_eq!(registry.damage_types.len(), 2);

    // Absent optional files degrade to empty tables.
    assert_eq!(registry.blocks.hardness("minecraft:stone"), None);
    assert_eq!(registry.blocks.tool_speed("minecraft:wooden_pickaxe"), None);
}

#[test]
fn test_registry_data_payloads_and_backfill() {
    let dir = write_fixture("payloads");
    let registry = Registry::load(&dir);
    fs::remove_dir_all(&dir).ok();

    let payloads = &registry.registry_data.payloads;

    // The dimension type payload carries NBT.
    let dimension_types = payloads
        .iter()
        .find(|payload| payload.registry == "minecraft:dimension_type")
        .expect("dimension types present");
    assert_eq!(dimension_types.entries.len(), 1);
    assert_eq!(dimension_types.entries[0].0, "minecraft:overworld");
    assert!(dimension_types.entries[0].1.is_some());

    // Biomes were missing from registry_data.json and get backfilled as
    // name-only entries from biomes.json, in order.
    let biomes = payloads
        .iter()
        .find(|payload| payload.registry == "minecraft:worldgen/biome")
        .expect("biomes present");
    assert_eq!(biomes.entries.len(), 3);
    assert_eq!(biomes.entries[0].0, "minecraft:plains");
    assert!(biomes.entries[0].1.is_none());

    // Damage types likewise.
    let damage_types = payloads
        .iter()
        .find(|payload| payload.registry == "minecraft:damage_type")
        .expect("damage types present");
    assert_eq!(damage_types.entries.len(), 2);
}

#[test]
fn test_missing_directory_degrades_to_empty() {
    let registry = Registry::load(std::path::Path::new("/nonexistent/copper-test"));

    assert!(registry.items.is_empty());
    assert!(registry.loot.is_empty());
    assert_eq!(registry.blocks.default_state("minecraft:stone"), None);
    assert_eq!(registry.item_entity_type(), None);
    assert!(registry.biomes.is_empty());

    // The required registries still exist for the configuration phase,
    // just empty.
    assert_eq!(registry.registry_data.payloads.len(), 3);
}