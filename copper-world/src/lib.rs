//! # Copper World
//!
//! The shared world model: paletted block storage, terrain generation,
//! chunk wire serialization, item entities and the 20 Hz physics tick.

pub mod block_manager;
pub mod chunk_packet;
pub mod collision;
pub mod entity;
pub mod physics;
pub mod player;
pub mod section;
pub mod terrain;
pub mod world;

pub use block_manager::{BlockManager, WorldBlocks, WorldMode};
pub use entity::{CollisionCache, EntityTable, ItemEntity};
pub use player::{Inventory, Player};
pub use section::Section;
pub use terrain::{NoiseParams, TerrainGenerator};
pub use world::World;
