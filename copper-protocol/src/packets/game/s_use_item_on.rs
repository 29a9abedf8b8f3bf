//! Use Item On (block placement).

use copper_macros::{ReadFrom, ServerPacket};
use copper_utils::BlockPos;

/// The client used its held item against a block face.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SUseItemOn {
    /// 0 main hand, 1 off hand.
    #[read(as = VarInt)]
    pub hand: i32,
    /// The block that was clicked, not the placement position.
    pub pos: BlockPos,
    /// The clicked face (0-5); placement happens one step along it.
    #[read(as = VarInt)]
    pub face: i32,
    #[allow(missing_docs)]
    pub cursor_x: f32,
    #[allow(missing_docs)]
    pub cursor_y: f32,
    #[allow(missing_docs)]
    pub cursor_z: f32,
    /// Whether the player's head is inside a block.
    pub inside_block: bool,
    /// Whether the placement would hit the world border.
    pub world_border_hit: bool,
    /// Block-change sequence number for client prediction.
    #[read(as = VarInt)]
    pub sequence: i32,
}
