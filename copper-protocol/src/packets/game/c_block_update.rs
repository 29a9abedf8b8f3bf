//! Block Update.

use copper_macros::{ClientPacket, WriteTo};
use copper_utils::{BlockPos, BlockStateId};

use crate::ids::play::C_BLOCK_UPDATE;

/// Tells the client a single block changed.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_BLOCK_UPDATE)]
pub struct CBlockUpdate {
    #[allow(missing_docs)]
    pub pos: BlockPos,
    /// The new state; air for broken blocks.
    pub block_state: BlockStateId,
}
