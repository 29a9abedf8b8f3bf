//! Player Action (digging and hotbar drops).

use copper_macros::{ReadFrom, ServerPacket};
use copper_utils::BlockPos;

/// What the client is doing to a block or its held item.
#[derive(ReadFrom, Clone, Copy, Debug, PartialEq, Eq)]
#[read(as = VarInt)]
#[repr(i32)]
pub enum PlayerActionStatus {
    #[allow(missing_docs)]
    StartedDigging = 0,
    #[allow(missing_docs)]
    CancelledDigging = 1,
    #[allow(missing_docs)]
    FinishedDigging = 2,
    /// Q with ctrl: drop the whole held stack.
    DropItemStack = 3,
    /// Q: drop one item of the held stack.
    DropItem = 4,
    #[allow(missing_docs)]
    ShootArrowOrFinishEating = 5,
    #[allow(missing_docs)]
    SwapItemInHand = 6,
}

/// Digging progress and drop requests.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SPlayerAction {
    #[allow(missing_docs)]
    pub status: PlayerActionStatus,
    /// The targeted block; meaningless for drop actions.
    pub pos: BlockPos,
    /// The face being hit (0-5).
    pub face: u8,
    /// Block-change sequence number for client prediction.
    #[read(as = VarInt)]
    pub sequence: i32,
}
