//! Serializes one chunk column into Chunk Data and Update Light.
//!
//! The block manager is the sole source of block contents; this module
//! only flattens it onto the wire.

use copper_protocol::packets::game::{
    CLevelChunkWithLight, ChunkPacketData, HeightmapType, Heightmaps, LightUpdatePacketData,
};
use copper_utils::{
    ChunkPos,
    codec::{BitSet, PackedLongArray, VarInt},
    serial::WriteTo,
    types::SECTIONS_PER_CHUNK,
};

use crate::block_manager::{BlockManager, WorldMode};

/// Bits per heightmap entry; 9 bits span the world's 384-block height.
const HEIGHTMAP_BITS: usize = 9;
/// Mask width: 24 sections plus one below and one above the world.
const LIGHT_SECTIONS: usize = SECTIONS_PER_CHUNK + 2;
/// Bytes per light array: 4096 nibbles.
const LIGHT_ARRAY_SIZE: usize = 2048;

/// Builds the full chunk packet for one column, materializing the chunk in
/// the block manager first.
#[must_use]
pub fn build_chunk_packet(blocks: &mut BlockManager, pos: ChunkPos) -> CLevelChunkWithLight {
    blocks.load_chunk(pos);

    let heights = column_heights(blocks, pos);

    CLevelChunkWithLight {
        pos,
        chunk_data: ChunkPacketData {
            heightmaps: pack_heightmaps(&heights),
            data: encode_sections(blocks, pos),
            block_entity_count: 0,
        },
        light_data: light_data(&heights),
    }
}

/// Surface height per column, indexed `z * 16 + x`.
fn column_heights(blocks: &BlockManager, pos: ChunkPos) -> [i32; 256] {
    match blocks.mode() {
        WorldMode::Flat => [blocks.ground_y(); 256],
        WorldMode::Terrain => {
            let map = blocks.generator().generate_height_map(pos);
            let mut heights = [0; 256];
            for z in 0..16 {
                for x in 0..16 {
                    heights[z * 16 + x] = map[z][x];
                }
            }
            heights
        }
    }
}

fn pack_heightmaps(heights: &[i32; 256]) -> Heightmaps {
    let entries: Vec<u32> = heights.iter().map(|&height| height as u32).collect();
    let packed = PackedLongArray::pack(HEIGHTMAP_BITS, &entries);
    let words: Vec<i64> = packed.words().iter().map(|&word| word as i64).collect();

    Heightmaps {
        heightmaps: vec![(HeightmapType::MotionBlocking, words)],
    }
}

/// Concatenates all 24 section encodings: an i16 non-air count, the block
/// paletted container, and the single-valued plains biome container.
fn encode_sections(blocks: &BlockManager, pos: ChunkPos) -> Vec<u8> {
    let mut data = Vec::new();

    for section_y in 0..SECTIONS_PER_CHUNK as i32 {
        let (non_air, palette, indices) = blocks.section_for_protocol(pos, section_y);

        (non_air as i16).write(&mut data).expect("vec write");

        if palette.len() == 1 {
            // Single-valued container: no index data at all.
            0u8.write(&mut data).expect("vec write");
            palette[0].write(&mut data).expect("vec write");
        } else {
            let bits = bits_per_entry(palette.len());
            (bits as u8).write(&mut data).expect("vec write");
            VarInt(palette.len() as i32).write(&mut data).expect("vec write");
            for state in &palette {
                state.write(&mut data).expect("vec write");
            }
            // The word count is implied by the entry count, so the packed
            // longs follow with no length prefix.
            PackedLongArray::pack(bits, &indices)
                .write(&mut data)
                .expect("vec write");
        }

        // Biomes: single-valued plains.
        0u8.write(&mut data).expect("vec write");
        VarInt(0).write(&mut data).expect("vec write");
    }

    data
}

/// Smallest block-palette index width: at least 4 bits, at most 8.
fn bits_per_entry(palette_size: usize) -> usize {
    let needed = usize::BITS as usize - (palette_size - 1).leading_zeros() as usize;
    needed.clamp(4, 8)
}

/// The light envelope. Sky light is computed straight from the column
/// heights: full above the surface, fading by one level per block of
/// depth. Block light is never emitted.
fn light_data(heights: &[i32; 256]) -> LightUpdatePacketData {
    let min_height = heights.iter().copied().min().unwrap_or(64);

    // Mask bit 0 is the section below the world, so section n sits at
    // bit n + 1.
    let lowest_lit_section = ((min_height + 64) / 16).max(0);
    let mut sky_light_mask = BitSet::with_capacity(LIGHT_SECTIONS);
    let mut lit_sections = Vec::new();
    for section_y in lowest_lit_section..SECTIONS_PER_CHUNK as i32 {
        sky_light_mask.set(section_y as usize + 1, true);
        lit_sections.push(section_y);
    }

    // Sections buried 16 blocks under the lowest surface carry no sky
    // light at all.
    let mut empty_sky_light_mask = BitSet::with_capacity(LIGHT_SECTIONS);
    let buried_below = ((min_height - 16 + 64) / 16).max(0);
    for section_y in 0..buried_below {
        empty_sky_light_mask.set(section_y as usize + 1, true);
    }

    let mut empty_block_light_mask = BitSet::with_capacity(LIGHT_SECTIONS);
    for bit in 0..LIGHT_SECTIONS {
        empty_block_light_mask.set(bit, true);
    }

    let sky_updates = lit_sections
        .iter()
        .map(|&section_y| sky_light_array(heights, section_y))
        .collect();

    LightUpdatePacketData {
        sky_light_mask,
        block_light_mask: BitSet::with_capacity(LIGHT_SECTIONS),
        empty_sky_light_mask,
        empty_block_light_mask,
        sky_updates,
        block_updates: Vec::new(),
    }
}

/// One section's sky light: 4096 values at 4 bits, even linear indices in
/// the low nibble.
fn sky_light_array(heights: &[i32; 256], section_y: i32) -> Vec<u8> {
    let section_min = section_y * 16 - 64;
    let mut array = vec![0u8; LIGHT_ARRAY_SIZE];

    for y in 0..16 {
        let world_y = section_min + y as i32;
        for z in 0..16 {
            for x in 0..16 {
                let height = heights[z * 16 + x];
                let value = if world_y >= height {
                    15
                } else {
                    (15 - (height - world_y)).max(0) as u8
                };

                let index = y * 256 + z * 16 + x;
                if index % 2 == 0 {
                    array[index / 2] |= value;
                } else {
                    array[index / 2] |= value << 4;
                }
            }
        }
    }

    array
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_manager::WorldBlocks;
    use crate::terrain::{NoiseParams, TerrainGenerator};
    use copper_utils::BlockStateId;
    use std::sync::Arc;

    fn flat_manager() -> BlockManager {
        let generator = Arc::new(TerrainGenerator::new(0, NoiseParams::default()));
        let blocks = WorldBlocks {
            stone: BlockStateId(1),
            dirt: BlockStateId(10),
            grass_block: BlockStateId(9),
            white_wool: BlockStateId(2093),
            yellow_wool: BlockStateId(2097),
            water: BlockStateId(86),
        };
        BlockManager::new(generator, blocks, WorldMode::Flat, 64)
    }

    #[test]
    fn test_heightmap_is_37_longs() {
        let mut blocks = flat_manager();
        let packet = build_chunk_packet(&mut blocks, ChunkPos::new(0, 0));

        let heightmaps = &packet.chunk_data.heightmaps.heightmaps;
        assert_eq!(heightmaps.len(), 1);
        assert_eq!(heightmaps[0].1.len(), 37);
        // Every column of the flat world is at ground level.
        assert_eq!(heightmaps[0].1[0] as u64 & 0x1FF, 64);
    }

    #[test]
    fn test_bits_per_entry_bounds() {
        assert_eq!(bits_per_entry(2), 4);
        assert_eq!(bits_per_entry(16), 4);
        assert_eq!(bits_per_entry(17), 5);
        assert_eq!(bits_per_entry(33), 6);
        assert_eq!(bits_per_entry(1000), 8);
    }

    #[test]
    fn test_flat_grass_section_encoding() {
        let mut blocks = flat_manager();
        blocks.load_chunk(ChunkPos::new(0, 0));
        let data = encode_sections(&blocks, ChunkPos::new(0, 0));

        // Walk to section 8 (world y 64..=79): sections 0..7 are either
        // empty or two-palette layers.
        let mut offset = 0;
        for section_y in 0..8 {
            let (non_air, palette, _) = blocks.section_for_protocol(ChunkPos::new(0, 0), section_y);
            offset += 2; // non-air count
            if palette.len() == 1 {
                offset += 2; // bits byte + single varint id (all < 128)
            } else {
                assert_eq!(non_air, 256);
                offset += 1; // bits byte
                offset += 1; // palette length
                for state in &palette {
                    offset += VarInt::written_size(i32::from(state.0));
                }
                offset += 256 * 8; // 4096 entries at 4 bits
            }
            offset += 2; // biome container
        }

        // Section 8: count 256, 4 bits, palette [air, grass].
        assert_eq!(&data[offset..offset + 2], &[1, 0]); // i16 256
        assert_eq!(data[offset + 2], 4);
        assert_eq!(data[offset + 3], 2);
        assert_eq!(data[offset + 4], 0); // air
        assert_eq!(data[offset + 5], 9); // grass state id
        // 256 packed longs follow; the bottom layer is all palette
        // index 1.
        let first_long = &data[offset + 6..offset + 14];
        assert_eq!(first_long, &[0x11; 8]);
    }

    #[test]
    fn test_flat_light_masks() {
        let mut blocks = flat_manager();
        let packet = build_chunk_packet(&mut blocks, ChunkPos::new(0, 0));
        let light = &packet.light_data;

        // Ground at 64 -> section 8; lit sections 8..24 at bits 9..25.
        assert!(!light.sky_light_mask.get(8));
        assert!(light.sky_light_mask.get(9));
        assert!(light.sky_light_mask.get(25));
        assert_eq!(light.sky_updates.len(), 16);
        assert!(light.sky_updates.iter().all(|a| a.len() == 2048));

        // Sections fully below the surface are flagged empty.
        assert!(light.empty_sky_light_mask.get(1));
        assert!(!light.empty_sky_light_mask.get(9));

        // Block light: nothing lit, everything flagged empty.
        assert!((0..26).all(|bit| !light.block_light_mask.get(bit)));
        assert!((0..26).all(|bit| light.empty_block_light_mask.get(bit)));
        assert!(light.block_updates.is_empty());
    }

    #[test]
    fn test_sky_light_gradient() {
        let heights = [64i32; 256];
        // Section 8 starts at world y 64; the surface layer reads 15.
        let array = sky_light_array(&heights, 8);
        assert_eq!(array[0] & 0x0F, 15);

        // Section 7 covers y 48..=63: its top layer (y 63) is one below
        // the surface -> 14; its bottom layer is dark.
        let array = sky_light_array(&heights, 7);
        let top_layer_index = 15 * 256;
        assert_eq!(array[top_layer_index / 2] & 0x0F, 14);
        assert_eq!(array[0] & 0x0F, 0);
    }
}
