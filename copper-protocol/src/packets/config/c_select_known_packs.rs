//! Clientbound Known Packs.

use copper_macros::{ClientPacket, WriteTo};

use crate::ids::config::C_SELECT_KNOWN_PACKS;

use super::KnownPack;

/// Advertises the server's data packs; usually just the vanilla core pack.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Config = C_SELECT_KNOWN_PACKS)]
pub struct CSelectKnownPacks {
    #[allow(missing_docs)]
    #[write(as = Prefixed(VarInt))]
    pub packs: Vec<KnownPack>,
}
