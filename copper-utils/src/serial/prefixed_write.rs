#![allow(missing_docs)]
use std::io::{Error, Result, Write};

use crate::serial::{PrefixedWrite, WriteTo};

impl PrefixedWrite for String {
    fn write_prefixed_bound<P: TryFrom<usize> + WriteTo>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> Result<()> {
        self.as_str().write_prefixed_bound::<P>(writer, bound)
    }
}

impl PrefixedWrite for str {
    fn write_prefixed_bound<P: TryFrom<usize> + WriteTo>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> Result<()> {
        if self.len() > bound * 3 {
            Err(Error::other("string too long"))?;
        }

        let len: P = self
            .len()
            .try_into()
            .map_err(|_| Error::other("length does not fit the prefix"))?;
        len.write(writer)?;

        writer.write_all(self.as_bytes())
    }
}

impl<T: WriteTo> PrefixedWrite for Vec<T> {
    fn write_prefixed_bound<P: TryFrom<usize> + WriteTo>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> Result<()> {
        self.as_slice().write_prefixed_bound::<P>(writer, bound)
    }
}

impl<T: WriteTo> PrefixedWrite for [T] {
    fn write_prefixed_bound<P: TryFrom<usize> + WriteTo>(
        &self,
        writer: &mut impl Write,
        bound: usize,
    ) -> Result<()> {
        if self.len() > bound {
            Err(Error::other("array too long"))?;
        }

        let len: P = self
            .len()
            .try_into()
            .map_err(|_| Error::other("length does not fit the prefix"))?;
        len.write(writer)?;

        for item in self {
            item.write(writer)?;
        }

        Ok(())
    }
}
