//! Remove Entities.

use copper_macros::{ClientPacket, WriteTo};
use copper_utils::codec::VarInt;

use crate::ids::play::C_REMOVE_ENTITIES;

/// Despawns entities on the client.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_REMOVE_ENTITIES)]
pub struct CRemoveEntities {
    #[allow(missing_docs)]
    #[write(as = Prefixed(VarInt))]
    pub entity_ids: Vec<VarInt>,
}

impl CRemoveEntities {
    /// Removal of a single entity.
    #[must_use]
    pub fn single(entity_id: i32) -> Self {
        Self {
            entity_ids: vec![VarInt(entity_id)],
        }
    }
}
