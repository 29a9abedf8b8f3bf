//! Item entities and their rest caches.

use std::time::{Duration, Instant};

use copper_utils::math::Vector3;
use rustc_hash::{FxHashMap, FxHashSet};
use uuid::Uuid;

/// Items cannot be picked up for this long after spawning.
pub const DEFAULT_PICKUP_DELAY: Duration = Duration::from_millis(500);

/// First id handed out to item entities; the player is entity 1.
const FIRST_ITEM_ENTITY_ID: i32 = 1000;

/// A dropped item in the world.
#[derive(Debug, Clone)]
pub struct ItemEntity {
    #[allow(missing_docs)]
    pub entity_id: i32,
    #[allow(missing_docs)]
    pub uuid: Uuid,
    #[allow(missing_docs)]
    pub position: Vector3<f64>,
    /// Blocks per tick.
    pub velocity: Vector3<f64>,
    #[allow(missing_docs)]
    pub item_id: i32,
    /// Stack size, 1..=64.
    pub count: u8,
    #[allow(missing_docs)]
    pub spawn_time: Instant,
    #[allow(missing_docs)]
    pub last_update_time: Instant,
    #[allow(missing_docs)]
    pub pickup_delay: Duration,
}

impl ItemEntity {
    /// Whether the pickup delay has elapsed.
    #[must_use]
    pub fn can_be_picked_up(&self, now: Instant) -> bool {
        now.duration_since(self.spawn_time) >= self.pickup_delay
    }
}

/// The rest cache of one item entity.
///
/// Written when an entity comes to rest; as long as position and velocity
/// still match and none of the checked blocks mutated, the collision query
/// is skipped entirely and gravity stays off.
#[derive(Debug, Clone)]
pub struct CollisionCache {
    /// Blocks the sweep visited; a mutation to any of them invalidates the
    /// cache.
    pub blocks_checked: FxHashSet<(i32, i32, i32)>,
    /// The cached collision outcome.
    pub result: bool,
    #[allow(missing_docs)]
    pub position: Vector3<f64>,
    #[allow(missing_docs)]
    pub velocity: Vector3<f64>,
    /// Set while the entity rests on something.
    pub gravity_disabled: bool,
}

/// Every live item entity plus the physics caches, under one lock.
#[derive(Default)]
pub struct EntityTable {
    entities: FxHashMap<i32, ItemEntity>,
    caches: FxHashMap<i32, CollisionCache>,
    next_entity_id: i32,
}

impl EntityTable {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: FxHashMap::default(),
            caches: FxHashMap::default(),
            next_entity_id: FIRST_ITEM_ENTITY_ID,
        }
    }

    /// Reserves the next entity id.
    pub fn allocate_id(&mut self) -> i32 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Registers a freshly spawned entity.
    pub fn insert(&mut self, entity: ItemEntity) {
        self.entities.insert(entity.entity_id, entity);
    }

    /// Removes an entity and its cache.
    pub fn remove(&mut self, entity_id: i32) -> Option<ItemEntity> {
        self.caches.remove(&entity_id);
        self.entities.remove(&entity_id)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn get(&self, entity_id: i32) -> Option<&ItemEntity> {
        self.entities.get(&entity_id)
    }

    /// All live entity ids.
    #[must_use]
    pub fn ids(&self) -> Vec<i32> {
        self.entities.keys().copied().collect()
    }

    /// Iterates over all live entities.
    pub fn iter(&self) -> impl Iterator<Item = &ItemEntity> {
        self.entities.values()
    }

    /// How many entities are live.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Takes an entity out for a physics step; pair with [`Self::insert`].
    pub(crate) fn take(&mut self, entity_id: i32) -> Option<ItemEntity> {
        self.entities.remove(&entity_id)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn cache(&self, entity_id: i32) -> Option<&CollisionCache> {
        self.caches.get(&entity_id)
    }

    pub(crate) fn cache_mut(&mut self, entity_id: i32) -> Option<&mut CollisionCache> {
        self.caches.get_mut(&entity_id)
    }

    pub(crate) fn set_cache(&mut self, entity_id: i32, cache: CollisionCache) {
        self.caches.insert(entity_id, cache);
    }

    pub(crate) fn clear_cache(&mut self, entity_id: i32) {
        self.caches.remove(&entity_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copper_utils::math::Vector3;

    fn item(entity_id: i32) -> ItemEntity {
        let now = Instant::now();
        ItemEntity {
            entity_id,
            uuid: Uuid::from_u128(u128::from(entity_id as u32)),
            position: Vector3::new(0.5, 65.0, 0.5),
            velocity: Vector3::new(0.0, 0.0, 0.0),
            item_id: 29,
            count: 1,
            spawn_time: now,
            last_update_time: now,
            pickup_delay: DEFAULT_PICKUP_DELAY,
        }
    }

    #[test]
    fn test_entity_ids_are_unique_and_above_player_range() {
        let mut table = EntityTable::new();
        let first = table.allocate_id();
        let second = table.allocate_id();
        assert!(first >= 1000);
        assert_ne!(first, second);
    }

    #[test]
    fn test_remove_also_drops_cache() {
        let mut table = EntityTable::new();
        let id = table.allocate_id();
        table.insert(item(id));
        table.set_cache(
            id,
            CollisionCache {
                blocks_checked: FxHashSet::default(),
                result: true,
                position: Vector3::new(0.5, 65.0, 0.5),
                velocity: Vector3::new(0.0, 0.0, 0.0),
                gravity_disabled: true,
            },
        );

        assert!(table.cache(id).is_some());
        assert!(table.remove(id).is_some());
        assert!(table.cache(id).is_none());
        assert!(table.get(id).is_none());
    }

    #[test]
    fn test_pickup_delay_window() {
        let entity = item(1000);
        assert!(!entity.can_be_picked_up(entity.spawn_time));
        assert!(entity.can_be_picked_up(entity.spawn_time + DEFAULT_PICKUP_DELAY));
    }
}
