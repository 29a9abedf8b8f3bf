//! Registry Data: one packet per registry, entries carrying optional NBT.

use std::io::{Result, Write};

use copper_macros::{ClientPacket, WriteTo};
use copper_utils::{Identifier, serial::WriteTo};
use simdnbt::owned::NbtCompound;

use crate::ids::config::C_REGISTRY_DATA;

/// An unnamed ("network") NBT compound: type byte 0x0A, then the compound
/// payload without a root name.
#[derive(Clone, Debug)]
pub struct Nbt(pub NbtCompound);

impl WriteTo for Nbt {
    fn write(&self, writer: &mut impl Write) -> Result<()> {
        let mut buf = Vec::new();
        buf.push(0x0A);
        self.0.write(&mut buf);
        writer.write_all(&buf)
    }
}

/// One entry of a registry, with its optional payload.
#[derive(WriteTo, Clone, Debug)]
pub struct RegistryEntry {
    #[allow(missing_docs)]
    pub id: Identifier,
    #[allow(missing_docs)]
    pub data: Option<Nbt>,
}

impl RegistryEntry {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(id: Identifier, data: Option<NbtCompound>) -> Self {
        Self {
            id,
            data: data.map(Nbt),
        }
    }
}

/// Synchronizes one registry's contents during configuration. Entry order
/// defines the numeric ids the play state refers back to.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Config = C_REGISTRY_DATA)]
pub struct CRegistryData {
    #[allow(missing_docs)]
    pub registry: Identifier,
    #[allow(missing_docs)]
    #[write(as = Prefixed(VarInt))]
    pub entries: Vec<RegistryEntry>,
}
