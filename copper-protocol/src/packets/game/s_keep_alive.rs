//! Serverbound Keep Alive.

use copper_macros::{ReadFrom, ServerPacket};

/// The client's echo of a clientbound keep-alive id.
#[derive(ServerPacket, ReadFrom, Clone, Copy, Debug)]
pub struct SKeepAlive {
    #[allow(missing_docs)]
    pub id: i64,
}
