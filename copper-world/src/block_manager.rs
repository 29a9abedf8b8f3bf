//! The single source of truth for block contents.
//!
//! Chunk serialization and collision both read from here; every mutation
//! lands in the updated-block set so the physics tick can invalidate its
//! rest caches.

use std::sync::Arc;

use copper_registry::Registry;
use copper_utils::{
    BlockStateId, ChunkPos,
    types::{SECTIONS_PER_CHUNK, WORLD_MAX_Y, WORLD_MIN_Y, floor_mod, section_index, section_min_y},
};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    section::Section,
    terrain::{HeightMap, TerrainGenerator},
};

/// How chunks come into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldMode {
    /// Grass over dirt at a fixed ground level.
    Flat,
    /// Noise terrain from the generator.
    Terrain,
}

/// The block states world generation places, resolved from the registry
/// once at boot. A missing table degrades the affected block to air.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorldBlocks {
    #[allow(missing_docs)]
    pub stone: BlockStateId,
    #[allow(missing_docs)]
    pub dirt: BlockStateId,
    #[allow(missing_docs)]
    pub grass_block: BlockStateId,
    /// Snow caps above the snow line.
    pub white_wool: BlockStateId,
    /// Beaches at and below sea level.
    pub yellow_wool: BlockStateId,
    #[allow(missing_docs)]
    pub water: BlockStateId,
}

impl WorldBlocks {
    /// Resolves the default state of every generation block.
    #[must_use]
    pub fn resolve(registry: &Registry) -> Self {
        let state = |name: &str| {
            registry.blocks.default_state(name).unwrap_or_else(|| {
                log::warn!("No block state for {name}, world generation will place air");
                BlockStateId::AIR
            })
        };

        Self {
            stone: state("minecraft:stone"),
            dirt: state("minecraft:dirt"),
            grass_block: state("minecraft:grass_block"),
            white_wool: state("minecraft:white_wool"),
            yellow_wool: state("minecraft:yellow_wool"),
            water: state("minecraft:water"),
        }
    }
}

/// Sea level; water fills terrain columns below it.
pub const SEA_LEVEL: i32 = 64;
/// Columns at or above this height get snow caps.
const SNOW_LINE: i32 = 90;
/// Per-block height difference at which grass gives way to dirt.
const STEEP_SLOPE: f64 = 4.0;

/// Sectioned block storage for the whole world.
pub struct BlockManager {
    sections: FxHashMap<(ChunkPos, i32), Section>,
    updated_blocks: FxHashSet<(i32, i32, i32)>,
    generator: Arc<TerrainGenerator>,
    blocks: WorldBlocks,
    mode: WorldMode,
    ground_y: i32,
}

impl BlockManager {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(
        generator: Arc<TerrainGenerator>,
        blocks: WorldBlocks,
        mode: WorldMode,
        ground_y: i32,
    ) -> Self {
        Self {
            sections: FxHashMap::default(),
            updated_blocks: FxHashSet::default(),
            generator,
            blocks,
            mode,
            ground_y,
        }
    }

    /// The active world mode.
    #[must_use]
    pub fn mode(&self) -> WorldMode {
        self.mode
    }

    /// The flat-mode surface level.
    #[must_use]
    pub fn ground_y(&self) -> i32 {
        self.ground_y
    }

    /// The generator chunks are filled from.
    #[must_use]
    pub fn generator(&self) -> &Arc<TerrainGenerator> {
        &self.generator
    }

    /// The block at a world position; air when the section is not
    /// resident or the position is outside the world.
    #[must_use]
    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockStateId {
        if !(WORLD_MIN_Y..=WORLD_MAX_Y).contains(&y) {
            return BlockStateId::AIR;
        }

        let chunk = ChunkPos::containing(x, z);
        let section_y = section_index(y);
        self.sections
            .get(&(chunk, section_y))
            .map_or(BlockStateId::AIR, |section| {
                let (lx, ly, lz) = local_coords(x, y, z, section_y);
                section.get(lx, ly, lz)
            })
    }

    /// Writes a block, materializing its section from the generator if
    /// needed, and records the mutation for cache invalidation.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, state: BlockStateId) {
        if !(WORLD_MIN_Y..=WORLD_MAX_Y).contains(&y) {
            return;
        }

        let chunk = ChunkPos::containing(x, z);
        let section_y = section_index(y);
        let section = self
            .sections
            .entry((chunk, section_y))
            .or_insert_with(|| {
                generate_section(&self.generator, &self.blocks, self.mode, self.ground_y, chunk, section_y)
            });

        let (lx, ly, lz) = local_coords(x, y, z, section_y);
        section.set(lx, ly, lz, state);
        self.updated_blocks.insert((x, y, z));
    }

    /// The collision-world predicate: every non-air block is solid.
    #[must_use]
    pub fn is_block_solid(&self, x: i32, y: i32, z: i32) -> bool {
        !self.get_block(x, y, z).is_air()
    }

    /// Materializes all 24 sections of a chunk. Idempotent.
    pub fn load_chunk(&mut self, pos: ChunkPos) {
        for section_y in 0..SECTIONS_PER_CHUNK as i32 {
            self.sections.entry((pos, section_y)).or_insert_with(|| {
                generate_section(
                    &self.generator,
                    &self.blocks,
                    self.mode,
                    self.ground_y,
                    pos,
                    section_y,
                )
            });
        }
    }

    /// Whether any section of the chunk is resident.
    #[must_use]
    pub fn is_chunk_loaded(&self, pos: ChunkPos) -> bool {
        (0..SECTIONS_PER_CHUNK as i32).any(|section_y| self.sections.contains_key(&(pos, section_y)))
    }

    /// Section contents for serialization; an absent section reads as all
    /// air.
    #[must_use]
    pub fn section_for_protocol(
        &self,
        pos: ChunkPos,
        section_y: i32,
    ) -> (i32, Vec<BlockStateId>, Vec<u32>) {
        self.sections.get(&(pos, section_y)).map_or_else(
            || (0, vec![BlockStateId::AIR], vec![0; Section::VOLUME]),
            Section::protocol_data,
        )
    }

    /// A snapshot of every position mutated since the last clear.
    #[must_use]
    pub fn updated_blocks(&self) -> FxHashSet<(i32, i32, i32)> {
        self.updated_blocks.clone()
    }

    /// Forgets the mutation set; the physics tick calls this once all
    /// caches have been checked against it.
    pub fn clear_updated_blocks(&mut self) {
        self.updated_blocks.clear();
    }
}

fn local_coords(x: i32, y: i32, z: i32, section_y: i32) -> (usize, usize, usize) {
    let local_x = floor_mod(x, 16) as usize;
    let local_z = floor_mod(z, 16) as usize;
    let local_y = (y - section_min_y(section_y)) as usize;
    (local_x, local_y, local_z)
}

/// Fills one fresh section from the active generator.
fn generate_section(
    generator: &TerrainGenerator,
    blocks: &WorldBlocks,
    mode: WorldMode,
    ground_y: i32,
    chunk: ChunkPos,
    section_y: i32,
) -> Section {
    match mode {
        WorldMode::Flat => flat_section(blocks, ground_y, section_y),
        WorldMode::Terrain => terrain_section(generator, blocks, chunk, section_y),
    }
}

fn flat_section(blocks: &WorldBlocks, ground_y: i32, section_y: i32) -> Section {
    let min_y = section_min_y(section_y);
    if ground_y < min_y || ground_y - 1 > min_y + 15 {
        return Section::empty();
    }

    Section::from_fn(|_, y, _| {
        let world_y = min_y + y as i32;
        if world_y == ground_y {
            blocks.grass_block
        } else if world_y == ground_y - 1 {
            blocks.dirt
        } else {
            BlockStateId::AIR
        }
    })
}

fn terrain_section(
    generator: &TerrainGenerator,
    blocks: &WorldBlocks,
    chunk: ChunkPos,
    section_y: i32,
) -> Section {
    let height_map = generator.generate_height_map(chunk);
    let min_y = section_min_y(section_y);

    Section::from_fn(|x, y, z| {
        let world_y = min_y + y as i32;
        let surface = height_map[z][x];

        if world_y > surface {
            if world_y < SEA_LEVEL {
                blocks.water
            } else {
                BlockStateId::AIR
            }
        } else if world_y == surface {
            surface_block(generator, blocks, &height_map, chunk, x, z)
        } else if world_y >= surface - 3 {
            blocks.dirt
        } else {
            blocks.stone
        }
    })
}

fn surface_block(
    generator: &TerrainGenerator,
    blocks: &WorldBlocks,
    height_map: &HeightMap,
    chunk: ChunkPos,
    x: usize,
    z: usize,
) -> BlockStateId {
    let surface = height_map[z][x];
    if surface >= SNOW_LINE {
        return blocks.white_wool;
    }
    if surface <= SEA_LEVEL {
        return blocks.yellow_wool;
    }

    let world_x = f64::from(chunk.x() * 16 + x as i32) + 0.5;
    let world_z = f64::from(chunk.z() * 16 + z as i32) + 0.5;
    if generator.slope_at(world_x, world_z) >= STEEP_SLOPE {
        blocks.dirt
    } else {
        blocks.grass_block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::NoiseParams;

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

    #[test]
    fn test_flat_chunk_layers() {
        let mut manager = flat_manager();
        manager.load_chunk(ChunkPos::new(0, 0));

        assert_eq!(manager.get_block(0, 63, 0), BlockStateId(10));
        assert_eq!(manager.get_block(0, 64, 0), BlockStateId(9));
        assert_eq!(manager.get_block(0, 65, 0), BlockStateId::AIR);
        assert_eq!(manager.get_block(5, -64, 5), BlockStateId::AIR);
    }

    #[test]
    fn test_unloaded_chunk_reads_air_and_loads_lazily_on_write() {
        let mut manager = flat_manager();
        assert_eq!(manager.get_block(100, 64, 100), BlockStateId::AIR);
        assert!(!manager.is_chunk_loaded(ChunkPos::new(6, 6)));

        manager.set_block(100, 70, 100, BlockStateId(1));
        // The write materialized the containing section with flat terrain.
        assert_eq!(manager.get_block(100, 70, 100), BlockStateId(1));
        assert_eq!(manager.get_block(100, 64, 100), BlockStateId(9));
        assert!(manager.is_chunk_loaded(ChunkPos::new(6, 6)));
    }

    #[test]
    fn test_mutation_tracking() {
        let mut manager = flat_manager();
        manager.set_block(1, 64, 2, BlockStateId::AIR);
        manager.set_block(-5, 64, -5, BlockStateId(1));

        let updated = manager.updated_blocks();
        assert!(updated.contains(&(1, 64, 2)));
        assert!(updated.contains(&(-5, 64, -5)));

        manager.clear_updated_blocks();
        assert!(manager.updated_blocks().is_empty());
    }

    #[test]
    fn test_negative_coordinates_map_correctly() {
        let mut manager = flat_manager();
        manager.load_chunk(ChunkPos::new(-1, -1));

        assert_eq!(manager.get_block(-1, 64, -1), BlockStateId(9));
        assert_eq!(manager.get_block(-16, 63, -16), BlockStateId(10));
        assert_eq!(manager.get_block(-17, 64, -17), BlockStateId::AIR);
    }

    #[test]
    fn test_out_of_range_y_is_air() {
        let mut manager = flat_manager();
        manager.set_block(0, 400, 0, BlockStateId(1));
        assert_eq!(manager.get_block(0, 400, 0), BlockStateId::AIR);
        assert!(manager.updated_blocks().is_empty());
    }

    #[test]
    fn test_flat_section_8_protocol_shape() {
        let mut manager = flat_manager();
        manager.load_chunk(ChunkPos::new(0, 0));

        // Section 8 covers world y 64..=79: one grass layer, rest air.
        let (non_air, palette, indices) = manager.section_for_protocol(ChunkPos::new(0, 0), 8);
        assert_eq!(non_air, 256);
        assert_eq!(palette, vec![BlockStateId::AIR, BlockStateId(9)]);
        assert!(indices[..256].iter().all(|&i| i == 1));
        assert!(indices[256..].iter().all(|&i| i == 0));

        // Section 7 covers 48..=63: one dirt layer on top.
        let (non_air, palette, indices) = manager.section_for_protocol(ChunkPos::new(0, 0), 7);
        assert_eq!(non_air, 256);
        assert_eq!(palette, vec![BlockStateId::AIR, BlockStateId(10)]);
        assert!(indices[3840..].iter().all(|&i| i == 1));
    }

    #[test]
    fn test_absent_section_protocol_shape() {
        let manager = flat_manager();
        let (non_air, palette, indices) = manager.section_for_protocol(ChunkPos::new(9, 9), 8);
        assert_eq!(non_air, 0);
        assert_eq!(palette, vec![BlockStateId::AIR]);
        assert_eq!(indices.len(), 4096);
    }

    #[test]
    fn test_terrain_chunk_has_stone_under_dirt() {
        let generator = Arc::new(TerrainGenerator::new(42, NoiseParams::default()));
        let mut manager =
            BlockManager::new(Arc::clone(&generator), test_blocks(), WorldMode::Terrain, 64);
        manager.load_chunk(ChunkPos::new(0, 0));

        let surface = generator.generate_height_map(ChunkPos::new(0, 0))[0][0];
        assert_ne!(manager.get_block(0, surface, 0), BlockStateId::AIR);
        assert_eq!(manager.get_block(0, surface - 1, 0), BlockStateId(10));
        assert_eq!(manager.get_block(0, surface - 3, 0), BlockStateId(10));
        assert_eq!(manager.get_block(0, surface - 4, 0), BlockStateId(1));
        assert_eq!(manager.get_block(0, surface + 10, 0), BlockStateId::AIR);
    }
}
