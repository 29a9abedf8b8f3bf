//! Update Time.

use copper_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_SET_TIME;

/// World age and time of day, in ticks.
#[derive(ClientPacket, WriteTo, Clone, Copy, Debug)]
#[packet_id(Play = C_SET_TIME)]
pub struct CSetTime {
    #[allow(missing_docs)]
    pub world_age: i64,
    /// 0 is sunrise, 6000 noon, 18000 midnight.
    pub time_of_day: i64,
    /// Whether the client should advance the time on its own.
    pub increasing: bool,
}
