//! Pickup Item.

use copper_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_TAKE_ITEM_ENTITY;

/// Plays the item-flies-to-collector animation. The actual inventory
/// change travels separately as a Set Container Slot.
#[derive(ClientPacket, WriteTo, Clone, Copy, Debug)]
#[packet_id(Play = C_TAKE_ITEM_ENTITY)]
pub struct CTakeItemEntity {
    /// The item entity being collected.
    #[write(as = VarInt)]
    pub collected_entity_id: i32,
    /// The collecting entity, normally the player.
    #[write(as = VarInt)]
    pub collector_entity_id: i32,
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub pickup_count: i32,
}
