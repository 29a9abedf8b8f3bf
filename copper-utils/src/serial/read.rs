#![allow(missing_docs)]
use std::{
    io::{Error, Read, Result},
    str::FromStr,
};

use uuid::Uuid;

use crate::{
    Identifier,
    codec::VarInt,
    serial::{PrefixedRead, ReadFrom},
};

macro_rules! impl_read_be {
    ($($ty:ty),*) => {
        $(
            impl ReadFrom for $ty {
                fn read(data: &mut impl Read) -> Result<Self> {
                    let mut buf = [0; size_of::<Self>()];
                    data.read_exact(&mut buf)?;
                    Ok(Self::from_be_bytes(buf))
                }
            }
        )*
    };
}

impl_read_be!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl ReadFrom for bool {
    fn read(data: &mut impl Read) -> Result<Self> {
        let byte = u8::read(data)?;
        Ok(byte == 1)
    }
}

impl<T: ReadFrom> ReadFrom for Option<T> {
    fn read(data: &mut impl Read) -> Result<Self> {
        if bool::read(data)? {
            Ok(Some(T::read(data)?))
        } else {
            Ok(None)
        }
    }
}

impl ReadFrom for Uuid {
    fn read(data: &mut impl Read) -> Result<Self> {
        let most_significant_bits = u64::read(data)?;
        let least_significant_bits = u64::read(data)?;

        Ok(Uuid::from_u64_pair(
            most_significant_bits,
            least_significant_bits,
        ))
    }
}

impl ReadFrom for Identifier {
    fn read(data: &mut impl Read) -> Result<Self> {
        Identifier::from_str(&String::read_prefixed::<VarInt>(data)?).map_err(Error::other)
    }
}
