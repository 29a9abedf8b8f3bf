//! Synchronize Player Position.

use copper_macros::{ClientPacket, WriteTo};

use crate::ids::play::C_PLAYER_POSITION;

/// Teleports the player. All fields are absolute (flags 0); the client
/// confirms with an Accept Teleportation carrying the same id.
#[derive(ClientPacket, WriteTo, Clone, Copy, Debug)]
#[packet_id(Play = C_PLAYER_POSITION)]
pub struct CPlayerPosition {
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub teleport_id: i32,
    #[allow(missing_docs)]
    pub x: f64,
    #[allow(missing_docs)]
    pub y: f64,
    #[allow(missing_docs)]
    pub z: f64,
    #[allow(missing_docs)]
    pub velocity_x: f64,
    #[allow(missing_docs)]
    pub velocity_y: f64,
    #[allow(missing_docs)]
    pub velocity_z: f64,
    #[allow(missing_docs)]
    pub yaw: f32,
    #[allow(missing_docs)]
    pub pitch: f32,
    /// Relative-teleport flags; zero means fully absolute.
    pub flags: i32,
}

impl CPlayerPosition {
    /// An absolute teleport with zero velocity and rotation.
    #[must_use]
    pub fn absolute(teleport_id: i32, x: f64, y: f64, z: f64) -> Self {
        Self {
            teleport_id,
            x,
            y,
            z,
            velocity_x: 0.0,
            velocity_y: 0.0,
            velocity_z: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            flags: 0,
        }
    }
}
