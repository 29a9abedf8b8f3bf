//! Set Held Item (serverbound).

use copper_macros::{ReadFrom, ServerPacket};

/// The client switched hotbar slots.
#[derive(ServerPacket, ReadFrom, Clone, Copy, Debug)]
pub struct SSetCarriedItem {
    /// Hotbar index 0-8.
    pub slot: i16,
}
