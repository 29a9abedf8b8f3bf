//! Multi-octave Perlin terrain with a cached per-chunk height map.

use std::sync::Arc;

use copper_utils::{ChunkPos, locks::SyncRwLock};
use noise::{NoiseFn, Perlin};
use rustc_hash::FxHashMap;

/// A 16x16 grid of surface heights, indexed `[z][x]`.
pub type HeightMap = [[i32; 16]; 16];

/// Noise shaping parameters.
#[derive(Debug, Clone, Copy)]
pub struct NoiseParams {
    /// Base noise frequency; lower means larger features.
    pub scale: f64,
    /// Base height variation in blocks.
    pub amplitude: i32,
    /// The y level terrain varies around.
    pub base_height: i32,
    /// Octave count for the base noise.
    pub octaves: u32,
    /// Amplitude falloff per octave.
    pub persistence: f64,
    /// Frequency growth per octave.
    pub lacunarity: f64,
    /// Frequency of the mountain placement mask.
    pub mountain_scale: f64,
    /// Extra amplitude inside mountain regions.
    pub mountain_amplitude: i32,
    /// Mask value above which mountains appear.
    pub mountain_threshold: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            scale: 0.03,
            amplitude: 16,
            base_height: 64,
            octaves: 1,
            persistence: 0.5,
            lacunarity: 2.0,
            mountain_scale: 0.01,
            mountain_amplitude: 300,
            mountain_threshold: 0.5,
        }
    }
}

/// Deterministic terrain heights from a seed.
///
/// The cache is append-only: a height map is a pure function of its chunk
/// position and the generator parameters, so concurrent readers can share
/// whatever entry got inserted first.
pub struct TerrainGenerator {
    seed: i64,
    params: NoiseParams,
    noise: Perlin,
    cache: SyncRwLock<FxHashMap<ChunkPos, Arc<HeightMap>>>,
}

impl TerrainGenerator {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(seed: i64, params: NoiseParams) -> Self {
        Self {
            seed,
            params,
            noise: Perlin::new(seed as u32),
            cache: SyncRwLock::new(FxHashMap::default()),
        }
    }

    /// The surface height of every column in a chunk, cached.
    #[must_use]
    pub fn generate_height_map(&self, pos: ChunkPos) -> Arc<HeightMap> {
        if let Some(cached) = self.cache.read().get(&pos) {
            return Arc::clone(cached);
        }

        let mut height_map = [[0i32; 16]; 16];
        for (z, row) in height_map.iter_mut().enumerate() {
            for (x, height) in row.iter_mut().enumerate() {
                let world_x = f64::from(pos.x() * 16 + x as i32);
                let world_z = f64::from(pos.z() * 16 + z as i32);
                *height = self.height_at(world_x, world_z);
            }
        }

        let height_map = Arc::new(height_map);
        self.cache
            .write()
            .entry(pos)
            .or_insert_with(|| Arc::clone(&height_map))
            .clone()
    }

    /// The surface height at a world column.
    #[must_use]
    pub fn height_at(&self, world_x: f64, world_z: f64) -> i32 {
        let height = self.continuous_height(world_x, world_z).round() as i32;
        height.clamp(0, 255)
    }

    /// The per-block height difference at a column, sampled from the
    /// continuous noise at the block center so chunk borders cannot skew
    /// it. Drives the dirt-vs-grass surface choice.
    #[must_use]
    pub fn slope_at(&self, world_x: f64, world_z: f64) -> f64 {
        let dx = self.continuous_height(world_x + 0.5, world_z)
            - self.continuous_height(world_x - 0.5, world_z);
        let dz = self.continuous_height(world_x, world_z + 0.5)
            - self.continuous_height(world_x, world_z - 0.5);
        dx.abs().max(dz.abs())
    }

    fn continuous_height(&self, world_x: f64, world_z: f64) -> f64 {
        let base = self.base_noise(world_x, world_z);
        let mountain = self.mountain_noise(world_x, world_z);

        let params = &self.params;
        let amplitude = if mountain > params.mountain_threshold {
            let factor =
                (mountain - params.mountain_threshold) / (1.0 - params.mountain_threshold);
            f64::from(params.amplitude) + f64::from(params.mountain_amplitude) * factor
        } else {
            f64::from(params.amplitude)
        };

        f64::from(params.base_height) + base * amplitude
    }

    /// Octave-accumulated base noise in `[-1, 1]`.
    fn base_noise(&self, x: f64, z: f64) -> f64 {
        let offset_x = self.seed as f64 * 100.0;
        let offset_z = self.seed as f64 * 200.0;

        let params = &self.params;
        let mut total = 0.0;
        let mut frequency = params.scale;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..params.octaves {
            total += self.noise.get([x * frequency + offset_x, z * frequency + offset_z])
                * amplitude;
            max_value += amplitude;

            amplitude *= params.persistence;
            frequency *= params.lacunarity;
        }

        if max_value > 0.0 { total / max_value } else { 0.0 }
    }

    /// Two-octave mountain placement mask, remapped to `[0, 1]`.
    fn mountain_noise(&self, x: f64, z: f64) -> f64 {
        let offset_x = self.seed as f64 * 300.0;
        let offset_z = self.seed as f64 * 400.0;

        let mut total = 0.0;
        let mut frequency = self.params.mountain_scale;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..2 {
            total += self.noise.get([x * frequency + offset_x, z * frequency + offset_z])
                * amplitude;
            max_value += amplitude;

            amplitude *= 0.5;
            frequency *= 2.0;
        }

        (total / max_value + 1.0) / 2.0
    }
}
