//! Clientbound Keep Alive.

use copper_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_KEEP_ALIVE;

/// Liveness probe; the client must echo the id within the vanilla timeout.
#[derive(ClientPacket, WriteTo, Clone, Copy, Debug)]
#[packet_id(Play = C_KEEP_ALIVE)]
pub struct CKeepAlive {
    #[allow(missing_docs)]
    pub id: i64,
}
