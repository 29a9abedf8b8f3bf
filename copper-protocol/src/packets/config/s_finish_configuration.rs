//! Acknowledge Finish Configuration.

use copper_macros::{ReadFrom, ServerPacket};

/// Empty acknowledgement; on receipt the connection enters Play.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SFinishConfiguration {}
