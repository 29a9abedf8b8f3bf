//! World-level scenario tests: chunk contents against their serialized
//! form, and the full drop/rest/invalidate life cycle of item entities.

use std::sync::Arc;
use std::time::Instant;

use copper_utils::{BlockStateId, ChunkPos, math::Vector3};
use copper_world::{
    BlockManager, EntityTable, ItemEntity, Player, WorldBlocks, WorldMode,
    block_manager::SEA_LEVEL,
    chunk_packet::build_chunk_packet,
    entity::DEFAULT_PICKUP_DELAY,
    physics::tick_entities,
    terrain::{NoiseParams, TerrainGenerator},
};
use uuid::Uuid;

fn test_blocks() -> WorldBlocks {
    WorldBlocks {
        stone: BlockStateId(1),
        dirt: BlockStateId(10),
        grass_block: BlockStateId(9),
        white_wool: BlockStateId(2093),
        yellow_wool: BlockStateId(2097),
        water: BlockStateId(86),
    }
}

fn flat_manager() -> BlockManager {
    let generator = Arc::new(TerrainGenerator::new(0, NoiseParams::default()));
    BlockManager::new(generator, test_blocks(), WorldMode::Flat, 64)
}

fn terrain_manager(seed: i64) -> BlockManager {
    let generator = Arc::new(TerrainGenerator::new(seed, NoiseParams::default()));
    BlockManager::new(generator, test_blocks(), WorldMode::Terrain, 64)
}

fn spawn_item(entities: &mut EntityTable, position: Vector3<f64>) -> i32 {
    let entity_id = entities.allocate_id();
    let now = Instant::now();
    entities.insert(ItemEntity {
        entity_id,
        uuid: Uuid::from_u128(u128::from(entity_id as u32)),
        position,
        velocity: Vector3::new(0.0, 0.0, 0.0),
        item_id: 29,
        count: 1,
        spawn_time: now,
        last_update_time: now,
        pickup_delay: DEFAULT_PICKUP_DELAY,
    });
    entity_id
}

/// The serialized non-air count of every section must equal a direct
/// census of the block manager's contents.
#[test]
fn test_serialized_counts_match_block_contents() {
    let mut manager = flat_manager();
    let pos = ChunkPos::new(0, 0);
    manager.load_chunk(pos);

    // Disturb the chunk a little first.
    manager.set_block(3, 70, 3, BlockStateId(1));
    manager.set_block(4, 64, 4, BlockStateId::AIR);

    for section_y in 0..24 {
        let (non_air, palette, indices) = manager.section_for_protocol(pos, section_y);

        let mut census = 0;
        let min_y = -64 + section_y * 16;
        for y in 0..16 {
            for z in 0..16 {
                for x in 0..16 {
                    let state = manager.get_block(x, min_y + y, z);
                    if !state.is_air() {
                        census += 1;
                    }
                    // The palette index must map back to the stored state.
                    let index = indices[(y * 256 + z * 16 + x) as usize];
                    assert_eq!(palette[index as usize], state);
                }
            }
        }
        assert_eq!(non_air, census, "section {section_y}");
    }
}

#[test]
fn test_chunk_packet_shape() {
    let mut manager = flat_manager();
    let packet = build_chunk_packet(&mut manager, ChunkPos::new(2, -3));

    assert_eq!(packet.pos, ChunkPos::new(2, -3));
    assert_eq!(packet.chunk_data.heightmaps.heightmaps.len(), 1);
    assert_eq!(packet.chunk_data.heightmaps.heightmaps[0].1.len(), 37);
    assert_eq!(packet.chunk_data.block_entity_count, 0);
    assert!(!packet.chunk_data.data.is_empty());
    assert!(packet.light_data.block_updates.is_empty());

    // Serialization must have materialized the chunk.
    assert!(manager.is_chunk_loaded(ChunkPos::new(2, -3)));
}

/// Terrain chunks must obey the surface rules column by column.
#[test]
fn test_terrain_surface_rules() {
    let mut manager = terrain_manager(42);
    let generator = Arc::clone(manager.generator());
    let blocks = test_blocks();

    for (chunk_x, chunk_z) in [(0, 0), (-3, 5), (17, -9)] {
        let pos = ChunkPos::new(chunk_x, chunk_z);
        manager.load_chunk(pos);
        let map = generator.generate_height_map(pos);

        for z in 0..16 {
            for x in 0..16 {
                let world_x = chunk_x * 16 + x;
                let world_z = chunk_z * 16 + z;
                let surface = map[z as usize][x as usize];

                let surface_block = manager.get_block(world_x, surface, world_z);
                if surface >= 90 {
                    assert_eq!(surface_block, blocks.white_wool);
                } else if surface <= SEA_LEVEL {
                    assert_eq!(surface_block, blocks.yellow_wool);
                } else {
                    assert!(
                        surface_block == blocks.dirt || surface_block == blocks.grass_block,
                        "unexpected surface {surface_block:?} at ({world_x}, {world_z})"
                    );
                }

                // Directly above the surface: water below sea level, air
                // otherwise.
                let above = manager.get_block(world_x, surface + 1, world_z);
                if surface + 1 < SEA_LEVEL {
                    assert_eq!(above, blocks.water);
                } else {
                    assert_eq!(above, BlockStateId::AIR);
                }

                // Dirt band, then stone.
                assert_eq!(manager.get_block(world_x, surface - 2, world_z), blocks.dirt);
                assert_eq!(manager.get_block(world_x, surface - 8, world_z), blocks.stone);
            }
        }
    }
}

/// A dropped item falls, rests on the ground, survives unrelated block
/// changes, and resumes falling when its supporting block is mined.
#[test]
fn test_item_drop_rest_and_invalidate_cycle() {
    let mut blocks = flat_manager();
    blocks.load_chunk(ChunkPos::new(0, 0));
    blocks.clear_updated_blocks();
    let mut entities = EntityTable::new();

    let id = spawn_item(&mut entities, Vector3::new(0.5, 80.0, 0.5));

    // Fall until at rest.
    let mut rest_tick = None;
    for tick in 0..100 {
        tick_entities(&mut blocks, &mut entities);
        if entities.cache(id).is_some_and(|cache| cache.gravity_disabled) {
            rest_tick = Some(tick);
            break;
        }
    }
    let rest_tick = rest_tick.expect("item comes to rest");
    // Falling 15 blocks under gravity 0.04/tick^2 with drag takes roughly
    // sqrt(2 * 15 / 0.04) ~ 27 ticks; drag stretches it a little.
    assert!((20..60).contains(&rest_tick), "rested after {rest_tick} ticks");

    let rest_y = entities.get(id).unwrap().position.y;
    assert!(entities.cache(id).unwrap().blocks_checked.contains(&(0, 64, 0)));

    // A mutation outside the footprint leaves the cache intact.
    blocks.set_block(8, 64, 8, BlockStateId::AIR);
    tick_entities(&mut blocks, &mut entities);
    assert!(entities.cache(id).unwrap().gravity_disabled);
    assert_eq!(entities.get(id).unwrap().position.y, rest_y);

    // Mining the supporting block re-enables gravity.
    blocks.set_block(0, 64, 0, BlockStateId::AIR);
    tick_entities(&mut blocks, &mut entities);
    assert!(
        entities
            .cache(id)
            .is_none_or(|cache| !cache.gravity_disabled)
    );

    for _ in 0..30 {
        tick_entities(&mut blocks, &mut entities);
    }
    assert!(entities.get(id).unwrap().position.y < rest_y - 0.5);
}

/// A resting item is picked up once its delay has elapsed, and the stack
/// count is conserved into the inventory.
#[test]
fn test_resting_item_is_picked_up() {
    let mut blocks = flat_manager();
    blocks.load_chunk(ChunkPos::new(0, 0));
    blocks.clear_updated_blocks();
    let mut entities = EntityTable::new();

    let id = spawn_item(&mut entities, Vector3::new(0.5, 66.0, 0.5));
    for _ in 0..40 {
        tick_entities(&mut blocks, &mut entities);
    }

    let mut player = Player::new(
        Uuid::nil(),
        "tester".to_string(),
        Vector3::new(0.5, 65.0, 0.5),
        10,
    );

    // Before the delay elapses nothing is eligible; afterwards the item
    // within the pickup box is.
    let entity = entities.get(id).unwrap();
    let eligible = player.eligible_pickups(&entities, entity.spawn_time);
    assert!(eligible.is_empty());

    let eligible = player.eligible_pickups(&entities, entity.spawn_time + DEFAULT_PICKUP_DELAY);
    assert_eq!(eligible, vec![id]);

    let entity = entities.remove(id).expect("entity exists");
    let slot = player.inventory.find_slot_for(entity.item_id).expect("slot");
    player.inventory.add_to_slot(slot, entity.item_id, entity.count);
    assert_eq!(player.inventory.total_of(entity.item_id), u32::from(entity.count));
    assert!(entities.is_empty());
}

/// Breaking a block records the mutation that chunk serialization and the
/// physics caches key off.
#[test]
fn test_break_records_mutation_and_serializes_air() {
    let mut manager = flat_manager();
    manager.load_chunk(ChunkPos::new(0, 0));
    manager.clear_updated_blocks();

    assert_eq!(manager.get_block(0, 64, 0), BlockStateId(9));
    manager.set_block(0, 64, 0, BlockStateId::AIR);

    assert!(manager.updated_blocks().contains(&(0, 64, 0)));
    assert_eq!(manager.get_block(0, 64, 0), BlockStateId::AIR);

    let (non_air, _, indices) = manager.section_for_protocol(ChunkPos::new(0, 0), 8);
    assert_eq!(non_air, 255);
    assert_eq!(indices[0], 0);
}
