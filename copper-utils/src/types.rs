#![allow(missing_docs)]

use std::{
    fmt::{self, Display},
    io::{self, Read, Write},
    str::FromStr,
};

use crate::{
    codec::VarInt,
    math::{Vector2, Vector3},
    serial::{ReadFrom, WriteTo},
};

/// A raw block state id. Id 0 is air; the registry maps ids back to blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BlockStateId(pub u16);

impl BlockStateId {
    /// The air block state.
    pub const AIR: Self = Self(0);

    /// Whether this state is air.
    #[must_use]
    pub fn is_air(self) -> bool {
        self.0 == 0
    }
}

impl WriteTo for BlockStateId {
    fn write(&self, writer: &mut impl Write) -> io::Result<()> {
        VarInt(i32::from(self.0)).write(writer)
    }
}

impl ReadFrom for BlockStateId {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        let id = VarInt::read(data)?.0;
        Ok(Self(id as u16))
    }
}

/// Division that rounds towards negative infinity.
#[must_use]
pub const fn floor_div(a: i32, b: i32) -> i32 {
    let quotient = a / b;
    if a % b != 0 && (a < 0) != (b < 0) {
        quotient - 1
    } else {
        quotient
    }
}

/// Remainder matching [`floor_div`], always in `0..b` for positive `b`.
#[must_use]
pub const fn floor_mod(a: i32, b: i32) -> i32 {
    let remainder = a % b;
    if remainder != 0 && (remainder < 0) != (b < 0) {
        remainder + b
    } else {
        remainder
    }
}

/// A block position in world space, packable into one 64-bit word as
/// `[x:26][z:26][y:12]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    pub const MAX_HORIZONTAL: i32 = 33_554_431;
    pub const MIN_HORIZONTAL: i32 = -33_554_432;
    pub const MAX_VERTICAL: i32 = 2047;
    pub const MIN_VERTICAL: i32 = -2048;

    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.0.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.0.y
    }

    #[must_use]
    pub const fn z(&self) -> i32 {
        self.0.z
    }

    /// Packs this position into the wire word.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        ((i64::from(self.0.x) & 0x3FF_FFFF) << 38)
            | ((i64::from(self.0.z) & 0x3FF_FFFF) << 12)
            | (i64::from(self.0.y) & 0xFFF)
    }

    /// Unpacks a position from the wire word, sign-extending each field.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        let x = (value >> 38) as i32 & 0x3FF_FFFF;
        let z = (value >> 12) as i32 & 0x3FF_FFFF;
        let y = value as i32 & 0xFFF;

        let x = if x & 0x200_0000 != 0 {
            x - 0x400_0000
        } else {
            x
        };
        let z = if z & 0x200_0000 != 0 {
            z - 0x400_0000
        } else {
            z
        };
        let y = if y & 0x800 != 0 { y - 0x1000 } else { y };

        Self::new(x, y, z)
    }

    /// The position one step along `direction`.
    #[must_use]
    pub fn relative(&self, direction: Direction) -> Self {
        let normal = direction.normal();
        Self::new(
            self.0.x + normal.x,
            self.0.y + normal.y,
            self.0.z + normal.z,
        )
    }
}

impl ReadFrom for BlockPos {
    fn read(data: &mut impl Read) -> io::Result<Self> {
        Ok(Self::from_i64(i64::read(data)?))
    }
}

/// A chunk column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChunkPos(pub Vector2<i32>);

impl std::hash::Hash for ChunkPos {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.as_i64() as u64);
    }
}

impl ChunkPos {
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self(Vector2::new(x, z))
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.0.x
    }

    #[must_use]
    pub const fn z(&self) -> i32 {
        self.0.y
    }

    /// The chunk containing the given world column.
    #[must_use]
    pub const fn containing(x: i32, z: i32) -> Self {
        Self::new(floor_div(x, 16), floor_div(z, 16))
    }

    #[must_use]
    pub fn as_i64(&self) -> i64 {
        (i64::from(self.0.x) << 32) | (i64::from(self.0.y) & 0xFFFF_FFFF)
    }

    /// Taxicab distance to another chunk, the chunk queue's sort key.
    #[must_use]
    pub const fn manhattan_distance(&self, other: ChunkPos) -> i32 {
        (self.0.x - other.0.x).abs() + (self.0.y - other.0.y).abs()
    }
}

/// The world's vertical extent: 24 sections covering y -64..=319.
pub const WORLD_MIN_Y: i32 = -64;
pub const WORLD_MAX_Y: i32 = 319;
pub const SECTIONS_PER_CHUNK: usize = 24;

/// Maps a world y to its section index (0..24 inside the world).
#[must_use]
pub const fn section_index(y: i32) -> i32 {
    floor_div(y - WORLD_MIN_Y, 16)
}

/// The lowest world y inside a section.
#[must_use]
pub const fn section_min_y(section_y: i32) -> i32 {
    WORLD_MIN_Y + section_y * 16
}

/// A namespaced identifier such as `minecraft:grass_block`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    pub const DEFAULT_NAMESPACE: &'static str = "minecraft";

    #[must_use]
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// An identifier in the `minecraft` namespace.
    #[must_use]
    pub fn vanilla(path: impl Into<String>) -> Self {
        Self::new(Self::DEFAULT_NAMESPACE, path)
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("empty identifier".to_string());
        }
        match s.split_once(':') {
            Some((namespace, path)) => Ok(Self::new(namespace, path)),
            None => Ok(Self::vanilla(s)),
        }
    }
}

/// The six block faces, in protocol order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Decodes the face index used by digging and placement packets.
    #[must_use]
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::Down),
            1 => Some(Self::Up),
            2 => Some(Self::North),
            3 => Some(Self::South),
            4 => Some(Self::West),
            5 => Some(Self::East),
            _ => None,
        }
    }

    /// The unit offset this face points towards.
    #[must_use]
    pub const fn normal(self) -> Vector3<i32> {
        match self {
            Self::Down => Vector3::new(0, -1, 0),
            Self::Up => Vector3::new(0, 1, 0),
            Self::North => Vector3::new(0, 0, -1),
            Self::South => Vector3::new(0, 0, 1),
            Self::West => Vector3::new(-1, 0, 0),
            Self::East => Vector3::new(1, 0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_pos_roundtrip() {
        let positions = vec![
            BlockPos::new(0, -61, -2),
            BlockPos::new(0, 0, 0),
            BlockPos::new(100, 64, -100),
            BlockPos::new(-1000, -64, 1000),
            BlockPos::new(33554431, 2047, 33554431),
            BlockPos::new(-33554432, -2048, -33554432),
        ];

        for pos in positions {
            let encoded = pos.as_i64();
            let decoded = BlockPos::from_i64(encoded);
            assert_eq!(
                pos, decoded,
                "Roundtrip failed for {pos:?}: encoded={encoded}, decoded={decoded:?}"
            );
        }
    }

    #[test]
    fn test_floor_math_handles_negatives() {
        assert_eq!(floor_div(-1, 16), -1);
        assert_eq!(floor_div(-16, 16), -1);
        assert_eq!(floor_div(-17, 16), -2);
        assert_eq!(floor_mod(-1, 16), 15);
        assert_eq!(floor_mod(-16, 16), 0);
    }

    #[test]
    fn test_section_index_bounds() {
        assert_eq!(section_index(-64), 0);
        assert_eq!(section_index(-49), 0);
        assert_eq!(section_index(-48), 1);
        assert_eq!(section_index(64), 8);
        assert_eq!(section_index(319), 23);
        assert_eq!(section_min_y(8), 64);
    }

    #[test]
    fn test_chunk_pos_containing() {
        assert_eq!(ChunkPos::containing(0, 0), ChunkPos::new(0, 0));
        assert_eq!(ChunkPos::containing(15, 15), ChunkPos::new(0, 0));
        assert_eq!(ChunkPos::containing(16, -1), ChunkPos::new(1, -1));
        assert_eq!(ChunkPos::containing(-16, -17), ChunkPos::new(-1, -2));
    }

    #[test]
    fn test_identifier_parsing() {
        let id: Identifier = "minecraft:stone".parse().expect("parse failed");
        assert_eq!(id.namespace(), "minecraft");
        assert_eq!(id.path(), "stone");

        let bare: Identifier = "dirt".parse().expect("parse failed");
        assert_eq!(bare.to_string(), "minecraft:dirt");
    }
}
