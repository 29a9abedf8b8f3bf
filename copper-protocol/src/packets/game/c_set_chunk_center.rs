//! Set Center Chunk.

use copper_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_SET_CHUNK_CENTER;

/// Moves the center of the client's chunk loading area.
#[derive(ClientPacket, WriteTo, Clone, Copy, Debug)]
#[packet_id(Play = C_SET_CHUNK_CENTER)]
pub struct CSetChunkCenter {
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub chunk_x: i32,
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub chunk_z: i32,
}
