//! Paletted 16x16x16 block storage.

use std::{fmt::Debug, hash::Hash};

use copper_utils::BlockStateId;

/// 3d array indexed by y,z,x
type Cube<T, const DIM: usize> = [[[T; DIM]; DIM]; DIM];

/// Cube storage with an occurrence-counted palette.
#[derive(Debug, Clone)]
pub struct HeterogeneousPaletteData<V: Hash + Eq + Copy, const DIM: usize> {
    cube: Box<Cube<V, DIM>>,
    // Keeps track of how many times each value appears in the cube. (value, count)
    palette: Vec<(V, u16)>,
}

impl<V: Hash + Eq + Copy, const DIM: usize> HeterogeneousPaletteData<V, DIM> {
    fn get(&self, x: usize, y: usize, z: usize) -> V {
        debug_assert!(x < DIM);
        debug_assert!(y < DIM);
        debug_assert!(z < DIM);

        self.cube[y][z][x]
    }

    fn set(&mut self, x: usize, y: usize, z: usize, value: V) -> V {
        debug_assert!(x < DIM);
        debug_assert!(y < DIM);
        debug_assert!(z < DIM);

        let old_value = self.cube[y][z][x];

        if let Some((_, count)) = self.palette.iter_mut().find(|(v, _)| *v == value) {
            *count += 1;
        } else {
            self.palette.push((value, 1));
        }

        if let Some((index, (_, count))) = self
            .palette
            .iter_mut()
            .enumerate()
            .find(|(_, (v, _))| *v == old_value)
        {
            *count -= 1;
            if *count == 0 {
                self.palette.swap_remove(index);
            }
        }

        self.cube[y][z][x] = value;

        old_value
    }
}

/// A container that collapses to a single value when homogeneous.
#[derive(Debug, Clone)]
pub enum PalettedContainer<V: Hash + Eq + Copy + Default, const DIM: usize> {
    /// Every entry holds the same value.
    Homogeneous(V),
    /// Mixed contents with a live palette.
    Heterogeneous(Box<HeterogeneousPaletteData<V, DIM>>),
}

impl<V: Hash + Eq + Copy + Default + Debug, const DIM: usize> PalettedContainer<V, DIM> {
    /// Edge length.
    pub const SIZE: usize = DIM;
    /// Total entries.
    pub const VOLUME: usize = DIM * DIM * DIM;

    /// Builds a container by evaluating `f(x, y, z)` for every entry.
    pub fn from_fn(mut f: impl FnMut(usize, usize, usize) -> V) -> Self {
        let mut cube = Box::new([[[V::default(); DIM]; DIM]; DIM]);
        for (y, layer) in cube.iter_mut().enumerate() {
            for (z, row) in layer.iter_mut().enumerate() {
                for (x, entry) in row.iter_mut().enumerate() {
                    *entry = f(x, y, z);
                }
            }
        }
        Self::from_cube(cube)
    }

    fn from_cube(cube: Box<Cube<V, DIM>>) -> Self {
        let mut palette: Vec<(V, u16)> = Vec::new();
        cube.iter().flatten().flatten().for_each(|v| {
            if let Some((_, count)) = palette.iter_mut().find(|(value, _)| value == v) {
                *count += 1;
            } else {
                palette.push((*v, 1));
            }
        });

        if palette.len() == 1 {
            Self::Homogeneous(palette[0].0)
        } else {
            Self::Heterogeneous(Box::new(HeterogeneousPaletteData { cube, palette }))
        }
    }

    #[allow(missing_docs)]
    pub fn get(&self, x: usize, y: usize, z: usize) -> V {
        match self {
            Self::Homogeneous(value) => *value,
            Self::Heterogeneous(data) => data.get(x, y, z),
        }
    }

    /// Writes one entry and returns the previous value.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: V) -> V {
        debug_assert!(x < Self::SIZE);
        debug_assert!(y < Self::SIZE);
        debug_assert!(z < Self::SIZE);

        match self {
            Self::Homogeneous(original) => {
                let original = *original;
                if value != original {
                    let mut cube = Box::new([[[original; DIM]; DIM]; DIM]);
                    cube[y][z][x] = value;
                    *self = Self::from_cube(cube);
                }
                original
            }
            Self::Heterogeneous(data) => {
                let original = data.set(x, y, z, value);
                if data.palette.len() == 1 {
                    *self = Self::Homogeneous(data.palette[0].0);
                }
                original
            }
        }
    }
}

/// One 16x16x16 block section. Always exactly 4096 entries; the linear
/// index of a local position is `y * 256 + z * 16 + x`.
pub type Section = PalettedContainer<BlockStateId, 16>;

impl Section {
    /// An all-air section.
    #[must_use]
    pub fn empty() -> Self {
        Self::Homogeneous(BlockStateId::AIR)
    }

    /// The section as the chunk packet needs it: non-air entry count, the
    /// sorted deduplicated palette, and one palette index per entry in
    /// linear order.
    #[must_use]
    pub fn protocol_data(&self) -> (i32, Vec<BlockStateId>, Vec<u32>) {
        match self {
            Self::Homogeneous(value) => {
                let non_air = if value.is_air() { 0 } else { Self::VOLUME as i32 };
                (non_air, vec![*value], vec![0; Self::VOLUME])
            }
            Self::Heterogeneous(data) => {
                let mut palette: Vec<BlockStateId> =
                    data.palette.iter().map(|(value, _)| *value).collect();
                palette.sort_unstable();

                let mut non_air = 0;
                let mut indices = Vec::with_capacity(Self::VOLUME);
                for layer in data.cube.iter() {
                    for row in layer {
                        for value in row {
                            if !value.is_air() {
                                non_air += 1;
                            }
                            let index = palette
                                .binary_search(value)
                                .expect("value is in the palette");
                            indices.push(index as u32);
                        }
                    }
                }

                (non_air, palette, indices)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homogeneous_collapse_and_expand() {
        let mut section = Section::empty();
        assert!(matches!(section, Section::Homogeneous(BlockStateId::AIR)));

        section.set(3, 2, 1, BlockStateId(9));
        assert!(matches!(section, Section::Heterogeneous(_)));
        assert_eq!(section.get(3, 2, 1), BlockStateId(9));
        assert_eq!(section.get(0, 0, 0), BlockStateId::AIR);

        section.set(3, 2, 1, BlockStateId::AIR);
        assert!(matches!(section, Section::Homogeneous(BlockStateId::AIR)));
    }

    #[test]
    fn test_protocol_data_counts_non_air() {
        let mut section = Section::empty();
        for x in 0..16 {
            for z in 0..16 {
                section.set(x, 0, z, BlockStateId(9));
            }
        }

        let (non_air, palette, indices) = section.protocol_data();
        assert_eq!(non_air, 256);
        assert_eq!(palette, vec![BlockStateId::AIR, BlockStateId(9)]);
        assert_eq!(indices.len(), 4096);
        // The bottom layer occupies the first 256 linear indices.
        assert!(indices[..256].iter().all(|&i| i == 1));
        assert!(indices[256..].iter().all(|&i| i == 0));
    }

    #[test]
    fn test_protocol_data_homogeneous_stone() {
        let section = Section::Homogeneous(BlockStateId(1));
        let (non_air, palette, indices) = section.protocol_data();
        assert_eq!(non_air, 4096);
        assert_eq!(palette, vec![BlockStateId(1)]);
        assert!(indices.iter().all(|&i| i == 0));
    }
}
