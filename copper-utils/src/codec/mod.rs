//! Newtype codecs for the protocol's bespoke integer encodings.

/// A 1/256-turn rotation byte.
pub mod angle;
/// A varint-prefixed set of bits packed into 64-bit words.
pub mod bit_set;
/// A quantized low-precision 3-vector (entity velocities).
pub mod lp_vec3;
/// Fixed-width entries bit-packed into 64-bit words.
pub mod long_array;
/// A variable-length 32-bit integer.
pub mod var_int;
/// A variable-length 64-bit integer.
pub mod var_long;

pub use angle::Angle;
pub use bit_set::BitSet;
pub use long_array::PackedLongArray;
pub use lp_vec3::LpVec3;
pub use var_int::VarInt;
pub use var_long::VarLong;
