//! Set Entity Metadata.

use std::io::{Result, Write};

use copper_macros::ClientPacket;
use copper_utils::{
    codec::{VarInt, VarLong},
    serial::WriteTo,
};

use crate::ids::play::C_SET_ENTITY_DATA;

use super::SlotData;

/// The metadata value encodings this server emits.
#[derive(Clone, Debug)]
pub enum MetadataValue {
    #[allow(missing_docs)]
    Byte(i8),
    #[allow(missing_docs)]
    VarInt(i32),
    #[allow(missing_docs)]
    VarLong(i64),
    #[allow(missing_docs)]
    Float(f32),
    /// The item stack of an item entity (index 8).
    Slot(SlotData),
    #[allow(missing_docs)]
    Boolean(bool),
}

impl MetadataValue {
    fn type_tag(&self) -> i32 {
        match self {
            Self::Byte(_) => 0,
            Self::VarInt(_) => 1,
            Self::VarLong(_) => 2,
            Self::Float(_) => 3,
            Self::Slot(_) => 7,
            Self::Boolean(_) => 8,
        }
    }
}

/// One `(index, type, value)` triple of the metadata stream.
#[derive(Clone, Debug)]
pub struct MetadataEntry {
    #[allow(missing_docs)]
    pub index: u8,
    #[allow(missing_docs)]
    pub value: MetadataValue,
}

impl MetadataEntry {
    /// Index of an item entity's stack.
    pub const ITEM_STACK_INDEX: u8 = 8;

    #[allow(missing_docs)]
    #[must_use]
    pub fn new(index: u8, value: MetadataValue) -> Self {
        Self { index, value }
    }
}

impl WriteTo for MetadataEntry {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        self.index.write(writer)?;
        VarInt(self.value.type_tag()).write(writer)?;
        match &self.value {
            MetadataValue::Byte(value) => value.write(writer),
            MetadataValue::VarInt(value) => VarInt(*value).write(writer),
            MetadataValue::VarLong(value) => VarLong(*value).write(writer),
            MetadataValue::Float(value) => value.write(writer),
            MetadataValue::Slot(value) => value.write(writer),
            MetadataValue::Boolean(value) => value.write(writer),
        }
    }
}

/// Entity metadata: entries back to back, closed by the 0xFF sentinel.
#[derive(ClientPacket, Clone, Debug)]
#[packet_id(Play = C_SET_ENTITY_DATA)]
pub struct CSetEntityData {
    #[allow(missing_docs)]
    pub entity_id: i32,
    #[allow(missing_docs)]
    pub entries: Vec<MetadataEntry>,
}

impl CSetEntityData {
    /// Metadata carrying just an item entity's stack.
    #[must_use]
    pub fn item_stack(entity_id: i32, item: SlotData) -> Self {
        Self {
            entity_id,
            entries: vec![MetadataEntry::new(
                MetadataEntry::ITEM_STACK_INDEX,
                MetadataValue::Slot(item),
            )],
        }
    }
}

impl WriteTo for CSetEntityData {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        VarInt(self.entity_id).write(writer)?;
        for entry in &self.entries {
            entry.write(writer)?;
        }
        0xFFu8.write(writer)
    }
}
