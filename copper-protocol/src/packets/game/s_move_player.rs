//! The three movement packets, merged into one server-side view.

use copper_macros::{ReadFrom, ServerPacket};
use copper_utils::math::Vector3;

fn unpack_on_ground(packed_byte: u8) -> bool {
    packed_byte & 0b0000_0001 != 0
}

/// Movement state assembled by the server from whichever of the three
/// packets arrived.
#[derive(Clone, Debug)]
pub struct SMovePlayer {
    #[allow(missing_docs)]
    pub position: Vector3<f64>,
    #[allow(missing_docs)]
    pub yaw: f32,
    #[allow(missing_docs)]
    pub pitch: f32,
    #[allow(missing_docs)]
    pub on_ground: bool,
    #[allow(missing_docs)]
    pub has_pos: bool,
    #[allow(missing_docs)]
    pub has_rot: bool,
}

impl SMovePlayer {
    #[allow(missing_docs)]
    #[must_use]
    pub fn position_or(&self, fallback: Vector3<f64>) -> Vector3<f64> {
        if self.has_pos { self.position } else { fallback }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn yaw_or(&self, fallback: f32) -> f32 {
        if self.has_rot { self.yaw } else { fallback }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn pitch_or(&self, fallback: f32) -> f32 {
        if self.has_rot { self.pitch } else { fallback }
    }
}

/// Set Player Position.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SMovePlayerPos {
    #[allow(missing_docs)]
    pub position: Vector3<f64>,
    /// Bit 0: on ground, bit 1: pushing against a wall.
    pub packed_byte: u8,
}

impl From<SMovePlayerPos> for SMovePlayer {
    fn from(value: SMovePlayerPos) -> Self {
        Self {
            position: value.position,
            yaw: 0.0,
            pitch: 0.0,
            on_ground: unpack_on_ground(value.packed_byte),
            has_pos: true,
            has_rot: false,
        }
    }
}

/// Set Player Position and Rotation.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SMovePlayerPosRot {
    #[allow(missing_docs)]
    pub position: Vector3<f64>,
    #[allow(missing_docs)]
    pub yaw: f32,
    #[allow(missing_docs)]
    pub pitch: f32,
    #[allow(missing_docs)]
    pub packed_byte: u8,
}

impl From<SMovePlayerPosRot> for SMovePlayer {
    fn from(value: SMovePlayerPosRot) -> Self {
        Self {
            position: value.position,
            yaw: value.yaw,
            pitch: value.pitch,
            on_ground: unpack_on_ground(value.packed_byte),
            has_pos: true,
            has_rot: true,
        }
    }
}

/// Set Player Rotation.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SMovePlayerRot {
    #[allow(missing_docs)]
    pub yaw: f32,
    #[allow(missing_docs)]
    pub pitch: f32,
    #[allow(missing_docs)]
    pub packed_byte: u8,
}

impl From<SMovePlayerRot> for SMovePlayer {
    fn from(value: SMovePlayerRot) -> Self {
        Self {
            position: Vector3::default(),
            yaw: value.yaw,
            pitch: value.pitch,
            on_ground: unpack_on_ground(value.packed_byte),
            has_pos: false,
            has_rot: true,
        }
    }
}
