//! Chunk Data and Update Light.

use copper_macros::{ClientPacket, WriteTo};
use copper_utils::{ChunkPos, codec::BitSet};

use crate::ids::play::C_LEVEL_CHUNK_WITH_LIGHT;

/// Heightmap kinds the chunk packet can carry.
#[derive(WriteTo, Copy, Clone, Debug)]
#[write(as = VarInt)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum HeightmapType {
    WorldSurface = 1,
    MotionBlocking = 4,
    MotionBlockingNoLeaves = 5,
}

/// The packet's heightmap list: per heightmap a type tag and the packed
/// 9-bit column heights (37 longs for a 16x16 chunk).
#[derive(WriteTo, Clone, Debug)]
pub struct Heightmaps {
    #[allow(missing_docs)]
    pub heightmaps: Vec<(HeightmapType, Vec<i64>)>,
}

/// The chunk body: heightmaps, the concatenated section encodings, and
/// block entities (always empty here).
#[derive(WriteTo, Clone, Debug)]
pub struct ChunkPacketData {
    #[allow(missing_docs)]
    pub heightmaps: Heightmaps,
    /// 24 sections, each: non-air count, block container, biome container.
    pub data: Vec<u8>,
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub block_entity_count: i32,
}

/// The light envelope: four 26-bit masks plus the nibble arrays for every
/// set bit of the sky mask. Block light is never sent.
#[derive(WriteTo, Clone, Debug)]
pub struct LightUpdatePacketData {
    #[allow(missing_docs)]
    pub sky_light_mask: BitSet,
    #[allow(missing_docs)]
    pub block_light_mask: BitSet,
    #[allow(missing_docs)]
    pub empty_sky_light_mask: BitSet,
    #[allow(missing_docs)]
    pub empty_block_light_mask: BitSet,
    /// One 2048-byte array per set bit in `sky_light_mask`.
    pub sky_updates: Vec<Vec<u8>>,
    #[allow(missing_docs)]
    pub block_updates: Vec<Vec<u8>>,
}

/// A full chunk column with its light data.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_LEVEL_CHUNK_WITH_LIGHT)]
pub struct CLevelChunkWithLight {
    #[allow(missing_docs)]
    pub pos: ChunkPos,
    #[allow(missing_docs)]
    pub chunk_data: ChunkPacketData,
    #[allow(missing_docs)]
    pub light_data: LightUpdatePacketData,
}
