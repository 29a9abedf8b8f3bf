use std::io::{Read, Result, Write};

use crate::serial::{PrefixedRead, PrefixedWrite, ReadFrom, WriteTo};

use super::VarInt;

/// A simple bit set, transmitted as a varint count of 64-bit words followed
/// by the words themselves. Bit `i` lives in word `i / 64` at bit `i % 64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSet(pub Box<[u64]>);

impl BitSet {
    /// Creates an all-zero bit set wide enough for `bits` bits.
    #[must_use]
    pub fn with_capacity(bits: usize) -> Self {
        Self(vec![0; bits.div_ceil(64)].into_boxed_slice())
    }

    /// Sets the bit at the given index.
    pub fn set(&mut self, index: usize, value: bool) {
        let word_index = index / 64;
        let bit_index = index % 64;

        if word_index >= self.0.len() {
            return;
        }

        if value {
            self.0[word_index] |= 1 << bit_index;
        } else {
            self.0[word_index] &= !(1 << bit_index);
        }
    }

    /// Returns the bit at the given index.
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        let word_index = index / 64;
        let bit_index = index % 64;

        word_index < self.0.len() && self.0[word_index] & (1 << bit_index) != 0
    }
}

#[allow(missing_docs)]
impl ReadFrom for BitSet {
    fn read(data: &mut impl Read) -> Result<Self> {
        Ok(Self(Vec::read_prefixed::<VarInt>(data)?.into_boxed_slice()))
    }
}

#[allow(missing_docs)]
impl WriteTo for BitSet {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.0.write_prefixed::<VarInt>(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bit_set_roundtrip() {
        let mut bits = BitSet::with_capacity(26);
        bits.set(0, true);
        bits.set(9, true);
        bits.set(25, true);

        let mut buf = Vec::new();
        bits.write(&mut buf).expect("write failed");

        let mut cursor = Cursor::new(buf.as_slice());
        let decoded = BitSet::read(&mut cursor).expect("read failed");
        assert_eq!(decoded, bits);
        assert!(decoded.get(0) && decoded.get(9) && decoded.get(25));
        assert!(!decoded.get(1));
    }

    #[test]
    fn test_bit_set_word_count() {
        assert_eq!(BitSet::with_capacity(26).0.len(), 1);
        assert_eq!(BitSet::with_capacity(64).0.len(), 1);
        assert_eq!(BitSet::with_capacity(65).0.len(), 2);
    }
}
