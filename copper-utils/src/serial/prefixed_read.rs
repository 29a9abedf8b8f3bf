#![allow(missing_docs)]
use std::io::{Error, ErrorKind, Read, Result};

use crate::serial::{PrefixedRead, ReadFrom};

/// Error message used when a prefixed string exceeds its bound. The packet
/// layer matches on this to surface the dedicated error variant.
pub const STRING_TOO_LONG: &str = "string too long";

impl PrefixedRead for String {
    fn read_prefixed_bound<P: TryInto<usize> + ReadFrom>(
        data: &mut impl Read,
        bound: usize,
    ) -> Result<Self> {
        let len: usize = P::read(data)?
            .try_into()
            .map_err(|_| Error::other("negative length prefix"))?;

        // UTF-8 is at most 3 bytes per code point on the wire.
        if len > bound * 3 {
            return Err(Error::new(ErrorKind::InvalidData, STRING_TOO_LONG));
        }

        let mut buf = vec![0; len];
        data.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|_| Error::new(ErrorKind::InvalidData, "invalid UTF-8"))
    }
}

impl<T: ReadFrom> PrefixedRead for Vec<T> {
    fn read_prefixed_bound<P: TryInto<usize> + ReadFrom>(
        data: &mut impl Read,
        bound: usize,
    ) -> Result<Self> {
        let len: usize = P::read(data)?
            .try_into()
            .map_err(|_| Error::other("negative length prefix"))?;

        if len > bound {
            return Err(Error::new(ErrorKind::InvalidData, "array too long"));
        }

        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(T::read(data)?);
        }
        Ok(items)
    }
}

impl ReadFrom for String {
    fn read(data: &mut impl Read) -> Result<Self> {
        String::read_prefixed::<crate::codec::VarInt>(data)
    }
}
