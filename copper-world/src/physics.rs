//! The 20 Hz item-entity physics step.

use std::panic::{AssertUnwindSafe, catch_unwind};

use copper_utils::{
    ChunkPos,
    math::Vector3,
    types::{WORLD_MAX_Y, WORLD_MIN_Y},
};
use rustc_hash::FxHashSet;

use crate::{
    block_manager::BlockManager,
    collision::sweep_segment,
    entity::{CollisionCache, EntityTable, ItemEntity},
};

/// Downward acceleration per tick, in blocks per tick squared.
pub const GRAVITY: f64 = -0.04;
/// Velocity retained per tick.
pub const DRAG: f64 = 0.98;
/// Position/velocity tolerance for a rest-cache hit.
const CACHE_EPSILON: f64 = 1e-6;

/// Advances every item entity by one tick and clears the block manager's
/// mutation set afterwards.
///
/// Entities that drift outside the world's vertical range are dropped, and
/// a panic inside a single entity's step removes that entity instead of
/// taking the server down.
pub fn tick_entities(blocks: &mut BlockManager, entities: &mut EntityTable) {
    let updated = blocks.updated_blocks();

    for entity_id in entities.ids() {
        let Some(mut entity) = entities.take(entity_id) else {
            continue;
        };

        if entity.position.y < f64::from(WORLD_MIN_Y) || entity.position.y > f64::from(WORLD_MAX_Y)
        {
            entities.clear_cache(entity_id);
            continue;
        }

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            step_entity(blocks, entities, &mut entity, &updated);
        }));

        match outcome {
            Ok(()) => entities.insert(entity),
            Err(_) => {
                log::error!("Entity {entity_id} panicked during its physics step, removing it");
                entities.clear_cache(entity_id);
            }
        }
    }

    blocks.clear_updated_blocks();
}

/// One fixed 50 ms step for one entity.
fn step_entity(
    blocks: &mut BlockManager,
    entities: &mut EntityTable,
    entity: &mut ItemEntity,
    updated: &FxHashSet<(i32, i32, i32)>,
) {
    let entity_id = entity.entity_id;

    let gravity_disabled = entities
        .cache(entity_id)
        .is_some_and(|cache| cache.gravity_disabled);
    if !gravity_disabled {
        entity.velocity.y += GRAVITY;
    }
    entity.velocity *= DRAG;

    // Physics may outrun the chunk loader; force-load whatever the entity
    // occupies or is about to enter.
    let predicted = entity.position + entity.velocity;
    for position in [entity.position, predicted] {
        let chunk = ChunkPos::containing(position.x.floor() as i32, position.z.floor() as i32);
        if !blocks.is_chunk_loaded(chunk) {
            blocks.load_chunk(chunk);
        }
    }

    let collided = match check_cache(entities, entity, updated) {
        Some(result) => result,
        None => {
            let sweep = sweep_segment(entity.position, predicted, |x, y, z| {
                blocks.is_block_solid(x, y, z)
            });

            if sweep.hit {
                entities.set_cache(
                    entity_id,
                    CollisionCache {
                        blocks_checked: sweep.blocks_checked,
                        result: true,
                        position: entity.position,
                        velocity: Vector3::new(0.0, 0.0, 0.0),
                        gravity_disabled: true,
                    },
                );
            } else {
                // A moving entity invalidates its own cache every tick;
                // caching buys nothing.
                entities.clear_cache(entity_id);
            }
            sweep.hit
        }
    };

    if collided {
        entity.velocity = Vector3::new(0.0, 0.0, 0.0);
    } else {
        entity.position = predicted;
    }

    clamp_horizontal(blocks, entity);
}

/// Rest-cache lookup. Returns the cached collision result when position
/// and velocity still match and none of the checked blocks mutated;
/// mutations also re-enable gravity.
fn check_cache(
    entities: &mut EntityTable,
    entity: &ItemEntity,
    updated: &FxHashSet<(i32, i32, i32)>,
) -> Option<bool> {
    let cache = entities.cache_mut(entity.entity_id)?;

    let invalidated = !updated.is_empty()
        && cache
            .blocks_checked
            .iter()
            .any(|block| updated.contains(block));
    if invalidated {
        cache.gravity_disabled = false;
        return None;
    }

    let matches = vectors_match(cache.position, entity.position)
        && vectors_match(cache.velocity, entity.velocity);
    matches.then_some(cache.result)
}

fn vectors_match(a: Vector3<f64>, b: Vector3<f64>) -> bool {
    (a.x - b.x).abs() < CACHE_EPSILON
        && (a.y - b.y).abs() < CACHE_EPSILON
        && (a.z - b.z).abs() < CACHE_EPSILON
}

/// Axis-separated horizontal clamps so fast entities cannot graze through
/// a wall the swept query slipped past: entering a solid block at foot or
/// head height on x or z zeroes that axis and snaps the entity just inside
/// its current block.
fn clamp_horizontal(blocks: &BlockManager, entity: &mut ItemEntity) {
    let feet_y = entity.position.y.floor() as i32;
    let head_y = (entity.position.y + 0.5).floor() as i32;
    let z = entity.position.z.floor() as i32;

    if entity.velocity.x != 0.0 {
        let next_x = (entity.position.x + entity.velocity.x).floor() as i32;
        let current_x = entity.position.x.floor() as i32;
        if next_x != current_x
            && (blocks.is_block_solid(next_x, feet_y, z) || blocks.is_block_solid(next_x, head_y, z))
        {
            entity.velocity.x = 0.0;
            entity.position.x = if next_x > current_x {
                f64::from(current_x + 1) - 0.001
            } else {
                f64::from(current_x) + 0.001
            };
        }
    }

    let x = entity.position.x.floor() as i32;
    if entity.velocity.z != 0.0 {
        let next_z = (entity.position.z + entity.velocity.z).floor() as i32;
        let current_z = entity.position.z.floor() as i32;
        if next_z != current_z
            && (blocks.is_block_solid(x, feet_y, next_z) || blocks.is_block_solid(x, head_y, next_z))
        {
            entity.velocity.z = 0.0;
            entity.position.z = if next_z > current_z {
                f64::from(current_z + 1) - 0.001
            } else {
                f64::from(current_z) + 0.001
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_manager::{WorldBlocks, WorldMode};
    use crate::terrain::{NoiseParams, TerrainGenerator};
    use copper_utils::BlockStateId;
    use std::sync::Arc;
    use std::time::Instant;
    use uuid::Uuid;

    fn flat_world() -> (BlockManager, EntityTable) {
        let generator = Arc::new(TerrainGenerator::new(0, NoiseParams::default()));
        let blocks = WorldBlocks {
            stone: BlockStateId(1),
            dirt: BlockStateId(10),
            grass_block: BlockStateId(9),
            white_wool: BlockStateId(2093),
            yellow_wool: BlockStateId(2097),
            water: BlockStateId(86),
        };
        let mut manager = BlockManager::new(generator, blocks, WorldMode::Flat, 64);
        manager.load_chunk(copper_utils::ChunkPos::new(0, 0));
        manager.clear_updated_blocks();
        (manager, EntityTable::new())
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
            pickup_delay: crate::entity::DEFAULT_PICKUP_DELAY,
        });
        entity_id
    }

    #[test]
    fn test_gravity_accelerates_falling_item() {
        let (mut blocks, mut entities) = flat_world();
        let id = spawn_item(&mut entities, Vector3::new(0.5, 80.0, 0.5));

        tick_entities(&mut blocks, &mut entities);
        let entity = entities.get(id).unwrap();
        assert!(entity.velocity.y < 0.0);
        assert!(entity.position.y < 80.0);

        let first_y = entity.position.y;
        tick_entities(&mut blocks, &mut entities);
        let entity = entities.get(id).unwrap();
        // The second tick falls farther than the first.
        assert!(first_y - entity.position.y > 80.0 - first_y - 1e-9);
    }

    #[test]
    fn test_item_rests_on_ground_and_caches() {
        let (mut blocks, mut entities) = flat_world();
        let id = spawn_item(&mut entities, Vector3::new(0.5, 80.0, 0.5));

        // Enough ticks for a 15-block fall and some settling.
        for _ in 0..60 {
            tick_entities(&mut blocks, &mut entities);
        }

        let entity = entities.get(id).unwrap();
        assert_eq!(entity.velocity.y, 0.0);
        assert!(entity.position.y >= 65.0, "rested at {}", entity.position.y);

        let cache = entities.cache(id).expect("rest cache exists");
        assert!(cache.gravity_disabled);
        assert!(cache.result);
        assert!(cache.blocks_checked.contains(&(0, 64, 0)));

        // At rest the cached position holds exactly, tick after tick.
        let rest_y = entity.position.y;
        for _ in 0..5 {
            tick_entities(&mut blocks, &mut entities);
        }
        assert_eq!(entities.get(id).unwrap().position.y, rest_y);
    }

    #[test]
    fn test_mining_under_resting_item_resumes_gravity() {
        let (mut blocks, mut entities) = flat_world();
        let id = spawn_item(&mut entities, Vector3::new(0.5, 70.0, 0.5));

        for _ in 0..60 {
            tick_entities(&mut blocks, &mut entities);
        }
        let rest_y = entities.get(id).unwrap().position.y;
        assert!(entities.cache(id).unwrap().gravity_disabled);

        // Another player mines the grass block the item rests on.
        blocks.set_block(0, 64, 0, BlockStateId::AIR);

        tick_entities(&mut blocks, &mut entities);
        assert!(
            entities
                .cache(id)
                .is_none_or(|cache| !cache.gravity_disabled)
        );

        for _ in 0..20 {
            tick_entities(&mut blocks, &mut entities);
        }
        assert!(entities.get(id).unwrap().position.y < rest_y);
    }

    #[test]
    fn test_updated_blocks_cleared_after_tick() {
        let (mut blocks, mut entities) = flat_world();
        blocks.set_block(3, 70, 3, BlockStateId(1));
        assert!(!blocks.updated_blocks().is_empty());

        tick_entities(&mut blocks, &mut entities);
        assert!(blocks.updated_blocks().is_empty());
    }

    #[test]
    fn test_out_of_range_entity_is_removed() {
        let (mut blocks, mut entities) = flat_world();
        let id = spawn_item(&mut entities, Vector3::new(0.5, -100.0, 0.5));

        tick_entities(&mut blocks, &mut entities);
        assert!(entities.get(id).is_none());
    }

    #[test]
    fn test_physics_force_loads_chunks() {
        let (mut blocks, mut entities) = flat_world();
        let far_chunk = copper_utils::ChunkPos::new(20, 20);
        assert!(!blocks.is_chunk_loaded(far_chunk));

        spawn_item(&mut entities, Vector3::new(325.0, 80.0, 325.0));
        tick_entities(&mut blocks, &mut entities);
        assert!(blocks.is_chunk_loaded(far_chunk));
    }
}
