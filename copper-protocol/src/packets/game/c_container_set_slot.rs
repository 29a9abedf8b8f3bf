//! Set Container Slot.

use copper_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_CONTAINER_SET_SLOT;

use super::SlotData;

/// Updates one slot of a container; container id 0 is the player inventory.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_CONTAINER_SET_SLOT)]
pub struct CContainerSetSlot {
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub container_id: i32,
    /// Server revision counter for container synchronisation.
    #[write(as = VarInt)]
    pub state_id: i32,
    #[allow(missing_docs)]
    pub slot: i16,
    #[allow(missing_docs)]
    pub item: SlotData,
}
