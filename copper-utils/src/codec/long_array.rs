use std::io::{Result, Write};

use crate::serial::WriteTo;

/// Fixed-width entries bit-packed into 64-bit words.
///
/// The first entry occupies the least significant bits of the first word and
/// entries never straddle a word boundary; a word holds
/// `64 / bits_per_entry` entries and any leftover high bits stay zero. The
/// word count is not part of this type's wire form: chunk serialization
/// derives it from the entry count, heightmaps prefix it explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedLongArray {
    bits_per_entry: usize,
    words: Vec<u64>,
}

impl PackedLongArray {
    /// Packs `entries` at `bits_per_entry` bits each.
    ///
    /// # Panics
    /// - If `bits_per_entry` is zero or above 64.
    #[must_use]
    pub fn pack(bits_per_entry: usize, entries: &[u32]) -> Self {
        assert!(bits_per_entry > 0 && bits_per_entry <= 64);

        let entries_per_word = 64 / bits_per_entry;
        let mask = (1u64 << bits_per_entry) - 1;
        let mut words = vec![0u64; entries.len().div_ceil(entries_per_word)];

        for (index, entry) in entries.iter().enumerate() {
            let word = index / entries_per_word;
            let offset = (index % entries_per_word) * bits_per_entry;
            words[word] |= (u64::from(*entry) & mask) << offset;
        }

        Self {
            bits_per_entry,
            words,
        }
    }

    /// Unpacks `count` entries out of `words` at `bits_per_entry` bits each.
    #[must_use]
    pub fn unpack(bits_per_entry: usize, words: &[u64], count: usize) -> Vec<u32> {
        let entries_per_word = 64 / bits_per_entry;
        let mask = (1u64 << bits_per_entry) - 1;

        (0..count)
            .map(|index| {
                let word = words.get(index / entries_per_word).copied().unwrap_or(0);
                let offset = (index % entries_per_word) * bits_per_entry;
                ((word >> offset) & mask) as u32
            })
            .collect()
    }

    /// The packed 64-bit words.
    #[must_use]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// The number of packed words.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The configured entry width.
    #[must_use]
    pub fn bits_per_entry(&self) -> usize {
        self.bits_per_entry
    }
}

impl WriteTo for PackedLongArray {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        for word in &self.words {
            word.write(writer)?;
        }
        Ok(())
    }
}
