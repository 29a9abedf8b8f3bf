//! Serverbound Known Packs.

use copper_macros::{ReadFrom, ServerPacket, WriteTo};

/// A data pack the client claims to know.
#[derive(ReadFrom, WriteTo, Clone, Debug, PartialEq, Eq)]
pub struct KnownPack {
    #[allow(missing_docs)]
    pub namespace: String,
    #[allow(missing_docs)]
    pub id: String,
    #[allow(missing_docs)]
    pub version: String,
}

impl KnownPack {
    /// The vanilla core pack for this game version.
    #[must_use]
    pub fn core(version: &str) -> Self {
        Self {
            namespace: "minecraft".to_string(),
            id: "core".to_string(),
            version: version.to_string(),
        }
    }
}

/// The client's answer to the server's Known Packs advertisement.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SSelectKnownPacks {
    #[allow(missing_docs)]
    #[read(as = Prefixed(VarInt))]
    pub packs: Vec<KnownPack>,
}
