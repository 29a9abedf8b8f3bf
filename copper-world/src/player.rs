//! Per-session player state: position, chunk bookkeeping and inventory.

use std::time::Instant;

use copper_utils::{ChunkPos, math::Vector3};
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};
use uuid::Uuid;

use crate::entity::EntityTable;

/// Pickup box reach on x and z.
const PICKUP_HORIZONTAL_RANGE: f64 = 1.0;
/// Pickup box reach upward; drops spawn at eye level, so the box must
/// reach it.
const PICKUP_RANGE_UP: f64 = 1.62;
/// Pickup box reach downward (exclusive).
const PICKUP_RANGE_DOWN: f64 = 0.5;

/// Eye height items are thrown from.
pub const EYE_HEIGHT: f64 = 1.52;

/// First hotbar slot in the 46-slot inventory window.
pub const HOTBAR_START: u16 = 36;
/// Last hotbar slot.
pub const HOTBAR_END: u16 = 44;
/// First main-storage slot.
pub const STORAGE_START: u16 = 9;
/// Last main-storage slot.
pub const STORAGE_END: u16 = 35;
/// Largest stack a slot can hold.
pub const MAX_STACK: u8 = 64;

/// The player-inventory window, tracked server side.
///
/// Slot layout: 0 crafting output, 1-4 crafting input, 5-8 armor, 9-35
/// main storage, 36-44 hotbar, 45 offhand. Items live in 9..=44.
#[derive(Debug, Default)]
pub struct Inventory {
    slots: FxHashMap<u16, (i32, u8)>,
    /// Revision counter echoed by Set Container Slot packets.
    pub state_id: i32,
    /// Selected hotbar index 0-8.
    pub selected_hotbar: u8,
    /// What the cursor is carrying mid-click, if anything.
    pub cursor_item: Option<(i32, u8)>,
}

impl Inventory {
    /// The `(item_id, count)` in a slot.
    #[must_use]
    pub fn slot(&self, slot: u16) -> Option<(i32, u8)> {
        self.slots.get(&slot).copied()
    }

    /// The inventory slot index of the selected hotbar slot.
    #[must_use]
    pub fn selected_slot(&self) -> u16 {
        HOTBAR_START + u16::from(self.selected_hotbar)
    }

    /// Writes a slot; zero count or item id clears it.
    pub fn set_slot(&mut self, slot: u16, item_id: i32, count: u8) {
        if count > 0 && item_id > 0 {
            self.slots.insert(slot, (item_id, count));
        } else {
            self.slots.remove(&slot);
        }
    }

    /// Bumps and returns the container revision.
    pub fn bump_state_id(&mut self) -> i32 {
        self.state_id += 1;
        self.state_id
    }

    /// Where an incoming item should go: an existing stack of the same
    /// item with room first, then the first empty hotbar slot, then the
    /// first empty storage slot. `None` means the inventory is full.
    #[must_use]
    pub fn find_slot_for(&self, item_id: i32) -> Option<u16> {
        for slot in STORAGE_START..=HOTBAR_END {
            if let Some((existing, count)) = self.slot(slot)
                && existing == item_id
                && count < MAX_STACK
            {
                return Some(slot);
            }
        }

        (HOTBAR_START..=HOTBAR_END)
            .chain(STORAGE_START..=STORAGE_END)
            .find(|slot| !self.slots.contains_key(slot))
    }

    /// Stacks `count` items into a slot, capping at the stack limit.
    /// Returns the slot's new contents.
    pub fn add_to_slot(&mut self, slot: u16, item_id: i32, count: u8) -> (i32, u8) {
        let current = self.slot(slot).map_or(0, |(_, count)| count);
        let new_count = current.saturating_add(count).min(MAX_STACK);
        self.set_slot(slot, item_id, new_count);
        (item_id, new_count)
    }

    /// Total count of one item across all slots.
    #[must_use]
    pub fn total_of(&self, item_id: i32) -> u32 {
        self.slots
            .values()
            .filter(|(id, _)| *id == item_id)
            .map(|(_, count)| u32::from(*count))
            .sum()
    }
}

/// A connected player.
pub struct Player {
    #[allow(missing_docs)]
    pub uuid: Uuid,
    #[allow(missing_docs)]
    pub username: String,
    #[allow(missing_docs)]
    pub position: Vector3<f64>,
    /// Degrees; 0 faces south.
    pub yaw: f32,
    #[allow(missing_docs)]
    pub pitch: f32,
    /// The chunk the player stands in.
    pub chunk_pos: ChunkPos,
    /// Chunks the client currently holds.
    pub loaded_chunks: FxHashSet<ChunkPos>,
    #[allow(missing_docs)]
    pub inventory: Inventory,
    /// Chunks are streamed within this radius of the player.
    loading_radius: i32,
}

impl Player {
    /// Creates a player at the world spawn.
    #[must_use]
    pub fn new(uuid: Uuid, username: String, spawn: Vector3<f64>, view_distance: i32) -> Self {
        Self {
            uuid,
            username,
            position: spawn,
            yaw: 0.0,
            pitch: 0.0,
            chunk_pos: ChunkPos::containing(spawn.x.floor() as i32, spawn.z.floor() as i32),
            loaded_chunks: FxHashSet::default(),
            inventory: Inventory::default(),
            // Two extra chunks so every visible chunk has loaded neighbors
            // for light continuity.
            loading_radius: view_distance + 2,
        }
    }

    /// Moves the player; returns the new chunk when a border was crossed.
    pub fn update_position(&mut self, position: Vector3<f64>) -> Option<ChunkPos> {
        self.position = position;

        let chunk = ChunkPos::containing(position.x.floor() as i32, position.z.floor() as i32);
        if chunk == self.chunk_pos {
            return None;
        }
        self.chunk_pos = chunk;
        Some(chunk)
    }

    /// Chunks inside the loading radius that the client does not hold yet,
    /// unsorted; the chunk loader orders them by distance.
    #[must_use]
    pub fn chunks_to_load(&self) -> Vec<ChunkPos> {
        let center = self.chunk_pos;
        let radius = self.loading_radius;

        let mut chunks = Vec::new();
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let chunk = ChunkPos::new(center.x() + dx, center.z() + dz);
                if !self.loaded_chunks.contains(&chunk) {
                    chunks.push(chunk);
                }
            }
        }
        chunks
    }

    /// Held chunks that drifted outside the keep radius.
    #[must_use]
    pub fn chunks_to_unload(&self) -> Vec<ChunkPos> {
        let keep_radius = self.loading_radius + 1;
        self.loaded_chunks
            .iter()
            .copied()
            .filter(|chunk| {
                (chunk.x() - self.chunk_pos.x()).abs() > keep_radius
                    || (chunk.z() - self.chunk_pos.z()).abs() > keep_radius
            })
            .collect()
    }

    /// Item entities inside the pickup box whose delay has elapsed.
    #[must_use]
    pub fn eligible_pickups(&self, entities: &EntityTable, now: Instant) -> Vec<i32> {
        entities
            .iter()
            .filter(|entity| {
                if !entity.can_be_picked_up(now) {
                    return false;
                }

                let dx = (entity.position.x - self.position.x).abs();
                let dz = (entity.position.z - self.position.z).abs();
                let dy = entity.position.y - self.position.y;

                dx <= PICKUP_HORIZONTAL_RANGE
                    && dz <= PICKUP_HORIZONTAL_RANGE
                    && dy > -PICKUP_RANGE_DOWN
                    && dy <= PICKUP_RANGE_UP
            })
            .map(|entity| entity.entity_id)
            .collect()
    }

    /// Velocity for an item thrown out of the inventory: the look
    /// direction scaled down, a touch of upward bias, and a little spread.
    #[must_use]
    pub fn throw_velocity(&self, rng: &mut impl Rng) -> Vector3<f64> {
        let yaw = f64::from(self.yaw).to_radians();
        let pitch = f64::from(self.pitch).to_radians();

        let forward_x = -yaw.sin() * pitch.cos();
        let forward_y = -pitch.sin();
        let forward_z = yaw.cos() * pitch.cos();

        let speed = 0.2;
        let spread = 0.02;
        Vector3::new(
            forward_x * speed + (rng.random::<f64>() - 0.5) * spread,
            forward_y * speed + 0.1 + (rng.random::<f64>() - 0.5) * spread,
            forward_z * speed + (rng.random::<f64>() - 0.5) * spread,
        )
    }

    /// Where thrown items appear: eye height, with slight horizontal
    /// jitter.
    #[must_use]
    pub fn throw_position(&self, rng: &mut impl Rng) -> Vector3<f64> {
        Vector3::new(
            self.position.x + (rng.random::<f64>() - 0.5) * 0.3,
            self.position.y + EYE_HEIGHT,
            self.position.z + (rng.random::<f64>() - 0.5) * 0.3,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{DEFAULT_PICKUP_DELAY, ItemEntity};
    use std::time::Duration;

    fn test_player() -> Player {
        Player::new(
            Uuid::nil(),
            "tester".to_string(),
            Vector3::new(0.5, 65.0, 0.5),
            10,
        )
    }

    #[test]
    fn test_slot_packing_policy() {
        let mut inventory = Inventory::default();

        // Empty inventory: hotbar first.
        assert_eq!(inventory.find_slot_for(29), Some(HOTBAR_START));

        // A partial stack of the same item wins over empty hotbar slots.
        inventory.set_slot(12, 29, 10);
        assert_eq!(inventory.find_slot_for(29), Some(12));

        // A full stack no longer accepts more.
        inventory.set_slot(12, 29, MAX_STACK);
        assert_eq!(inventory.find_slot_for(29), Some(HOTBAR_START));

        // Different item never stacks into it.
        assert_eq!(inventory.find_slot_for(5), Some(HOTBAR_START));
    }

    #[test]
    fn test_slot_packing_falls_back_to_storage_then_fails() {
        let mut inventory = Inventory::default();
        for slot in HOTBAR_START..=HOTBAR_END {
            inventory.set_slot(slot, 1, MAX_STACK);
        }
        assert_eq!(inventory.find_slot_for(2), Some(STORAGE_START));

        for slot in STORAGE_START..=STORAGE_END {
            inventory.set_slot(slot, 1, MAX_STACK);
        }
        assert_eq!(inventory.find_slot_for(2), None);
    }

    #[test]
    fn test_pickup_conserves_item_totals() {
        let mut inventory = Inventory::default();
        inventory.set_slot(36, 29, 60);

        let before = inventory.total_of(29);
        let slot = inventory.find_slot_for(29).unwrap();
        inventory.add_to_slot(slot, 29, 3);
        assert_eq!(inventory.total_of(29), before + 3);
    }

    #[test]
    fn test_chunk_crossing_detection() {
        let mut player = test_player();
        assert!(player.update_position(Vector3::new(8.0, 65.0, 8.0)).is_none());
        assert_eq!(
            player.update_position(Vector3::new(17.0, 65.0, 0.0)),
            Some(ChunkPos::new(1, 0))
        );
    }

    #[test]
    fn test_chunk_load_unload_radii() {
        let mut player = test_player();
        // radius 12 -> a 25x25 square.
        assert_eq!(player.chunks_to_load().len(), 25 * 25);

        player.loaded_chunks.insert(ChunkPos::new(0, 0));
        assert_eq!(player.chunks_to_load().len(), 25 * 25 - 1);

        // Within the keep radius nothing unloads.
        player.loaded_chunks.insert(ChunkPos::new(13, 0));
        assert!(player.chunks_to_unload().is_empty());

        player.loaded_chunks.insert(ChunkPos::new(14, 0));
        assert_eq!(player.chunks_to_unload(), vec![ChunkPos::new(14, 0)]);
    }

    #[test]
    fn test_pickup_box_and_delay() {
        let player = test_player();
        let mut entities = EntityTable::new();
        let spawn_time = Instant::now() - Duration::from_secs(1);

        let mut spawn_at = |position: Vector3<f64>, spawn_time: Instant| {
            let entity_id = entities.allocate_id();
            entities.insert(ItemEntity {
                entity_id,
                uuid: Uuid::from_u128(u128::from(entity_id as u32)),
                position,
                velocity: Vector3::new(0.0, 0.0, 0.0),
                item_id: 29,
                count: 1,
                spawn_time,
                last_update_time: spawn_time,
                pickup_delay: DEFAULT_PICKUP_DELAY,
            });
            entity_id
        };

        let near = spawn_at(Vector3::new(1.0, 65.5, 0.5), spawn_time);
        let too_far = spawn_at(Vector3::new(3.0, 65.0, 0.5), spawn_time);
        let below = spawn_at(Vector3::new(0.5, 64.4, 0.5), spawn_time);
        let fresh = spawn_at(Vector3::new(0.5, 65.5, 0.5), Instant::now());

        let now = Instant::now();
        let pickups = player.eligible_pickups(&entities, now);
        assert!(pickups.contains(&near));
        assert!(!pickups.contains(&too_far));
        assert!(!pickups.contains(&below));
        assert!(!pickups.contains(&fresh));
    }
}
