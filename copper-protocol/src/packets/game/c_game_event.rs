//! Game Event.

use copper_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_GAME_EVENT;

/// Miscellaneous game state changes. Event 13 ("start waiting for level
/// chunks") is the one the login bootstrap needs; without it the client
/// never leaves the loading screen.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_GAME_EVENT)]
pub struct CGameEvent {
    #[allow(missing_docs)]
    pub event: u8,
    #[allow(missing_docs)]
    pub value: f32,
}

impl CGameEvent {
    /// Event id for "start waiting for level chunks".
    pub const START_WAITING_FOR_CHUNKS: u8 = 13;
}
