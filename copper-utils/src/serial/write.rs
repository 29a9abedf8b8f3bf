#![allow(missing_docs)]
use std::io::{Result, Write};

use uuid::Uuid;

use crate::{
    BlockPos, ChunkPos, Identifier,
    codec::VarInt,
    serial::{PrefixedWrite, WriteTo},
};

macro_rules! impl_write_be {
    ($($ty:ty),*) => {
        $(
            impl WriteTo for $ty {
                fn write(&self, writer: &mut impl Write) -> Result<()> {
                    writer.write_all(&self.to_be_bytes())
                }
            }
        )*
    };
}

impl_write_be!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl WriteTo for bool {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        u8::from(*self).write(writer)
    }
}

impl<T: WriteTo> WriteTo for Option<T> {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        if let Some(value) = self {
            true.write(writer)?;
            value.write(writer)
        } else {
            false.write(writer)
        }
    }
}

impl<T: WriteTo, const N: usize> WriteTo for [T; N] {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        for i in self {
            i.write(writer)?;
        }
        Ok(())
    }
}

impl<T: WriteTo, Z: WriteTo> WriteTo for (T, Z) {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.0.write(writer)?;
        self.1.write(writer)
    }
}

impl<T: WriteTo> WriteTo for Vec<T> {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.write_prefixed::<VarInt>(writer)
    }
}

impl WriteTo for String {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.write_prefixed::<VarInt>(writer)
    }
}

impl WriteTo for BlockPos {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.as_i64().write(writer)
    }
}

// Chunk packets carry the coordinates as two plain ints, not packed.
impl WriteTo for ChunkPos {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.x().write(writer)?;
        self.z().write(writer)
    }
}

impl WriteTo for Uuid {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        let (most_significant_bits, least_significant_bits) = self.as_u64_pair();
        most_significant_bits.write(writer)?;
        least_significant_bits.write(writer)?;
        Ok(())
    }
}

impl WriteTo for Identifier {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.to_string().write_prefixed::<VarInt>(writer)
    }
}
