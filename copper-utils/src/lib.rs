//! # Copper Utils
//!
//! Wire-primitive codecs, serial traits and core world-coordinate types
//! shared by every other crate in the workspace.

pub mod codec;
pub mod locks;
pub mod math;
pub mod serial;
pub mod types;

pub use types::BlockPos;
pub use types::BlockStateId;
pub use types::ChunkPos;
pub use types::Identifier;
