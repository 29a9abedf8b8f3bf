//! The shared world handle and its background tick task.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU32, Ordering},
};
use std::time::Duration;

use copper_protocol::packets::game::CLevelChunkWithLight;
use copper_registry::Registry;
use copper_utils::{ChunkPos, locks::SyncMutex};
use tokio::{select, sync::Notify, task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    block_manager::{BlockManager, WorldBlocks, WorldMode},
    chunk_packet::build_chunk_packet,
    entity::EntityTable,
    physics::tick_entities,
    terrain::{NoiseParams, TerrainGenerator},
};

/// Fixed tick interval: 20 ticks per second.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Pause/step gate the tick loop waits on.
///
/// While paused, each [`TickGate::single_step`] grants exactly one tick.
/// The physics code itself never looks at the gate.
#[derive(Default)]
pub struct TickGate {
    paused: AtomicBool,
    step_permits: AtomicU32,
    notify: Notify,
}

impl TickGate {
    /// Holds the tick loop at the top of its next iteration.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Releases the tick loop.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Grants one tick while paused.
    pub fn single_step(&self) {
        self.step_permits.fetch_add(1, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Whether the gate is currently closed.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Waits until a tick may run.
    pub async fn acquire(&self) {
        loop {
            // Register for wakeups before checking state, so a resume or
            // step landing in between is not lost.
            let notified = self.notify.notified();

            if !self.paused.load(Ordering::SeqCst) {
                return;
            }

            // Claim a single-step permit if one is available.
            let mut permits = self.step_permits.load(Ordering::SeqCst);
            while permits > 0 {
                match self.step_permits.compare_exchange(
                    permits,
                    permits - 1,
                    Ordering::SeqCst,
                    Ordering::SeqCst,
                ) {
                    Ok(_) => return,
                    Err(current) => permits = current,
                }
            }

            notified.await;
        }
    }
}

/// Everything the sessions and the tick task share: block storage, the
/// entity table, and the tick gate. Lock order is blocks before entities.
pub struct World {
    /// Block storage, the sole authority on block contents.
    pub blocks: SyncMutex<BlockManager>,
    /// Item entities and their physics caches.
    pub entities: SyncMutex<EntityTable>,
    /// Pause/step control for the tick loop.
    pub tick_gate: TickGate,
}

impl World {
    /// Builds the world with its generator and resolved block palette.
    #[must_use]
    pub fn new(
        registry: &Registry,
        seed: i64,
        params: NoiseParams,
        mode: WorldMode,
        ground_y: i32,
    ) -> Arc<Self> {
        let generator = Arc::new(TerrainGenerator::new(seed, params));
        let blocks = WorldBlocks::resolve(registry);

        Arc::new(Self {
            blocks: SyncMutex::new(BlockManager::new(generator, blocks, mode, ground_y)),
            entities: SyncMutex::new(EntityTable::new()),
            tick_gate: TickGate::default(),
        })
    }

    /// Runs one physics tick over all entities.
    pub fn tick(&self) {
        let mut blocks = self.blocks.lock();
        let mut entities = self.entities.lock();
        tick_entities(&mut blocks, &mut entities);
    }

    /// Materializes a chunk's blocks. Idempotent.
    pub fn load_chunk_blocks(&self, pos: ChunkPos) {
        self.blocks.lock().load_chunk(pos);
    }

    /// Serializes one chunk column, loading it first if needed.
    #[must_use]
    pub fn chunk_packet(&self, pos: ChunkPos) -> CLevelChunkWithLight {
        build_chunk_packet(&mut self.blocks.lock(), pos)
    }

    /// Starts the 20 Hz tick task; it stops only when `cancel` fires at
    /// process shutdown.
    pub fn spawn_tick_task(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let world = Arc::clone(self);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                select! {
                    () = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        select! {
                            () = cancel.cancelled() => break,
                            () = world.tick_gate.acquire() => world.tick(),
                        }
                    }
                }
            }

            log::debug!("World tick task stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tick_gate_pause_and_step() {
        let gate = Arc::new(TickGate::default());

        // Open gate: acquire returns immediately.
        gate.acquire().await;

        gate.pause();
        assert!(gate.is_paused());

        let waiter = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                gate.acquire().await;
            })
        };

        // A single step releases exactly one waiter.
        gate.single_step();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("step releases the waiter")
            .unwrap();

        // Resume opens the gate for good.
        gate.resume();
        gate.acquire().await;
    }
}
