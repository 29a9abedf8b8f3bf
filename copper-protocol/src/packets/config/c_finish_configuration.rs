//! Clientbound Finish Configuration.

use copper_macros::{ClientPacket, WriteTo};

use crate::ids::config::C_FINISH_CONFIGURATION;

/// Tells the client the configuration phase is over; the client answers
/// with its acknowledgement and both sides switch to Play.
#[derive(ClientPacket, WriteTo, Clone, Debug, Default)]
#[packet_id(Config = C_FINISH_CONFIGURATION)]
pub struct CFinishConfiguration {}
