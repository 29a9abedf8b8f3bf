//! Spawn Entity.

use copper_macros::{ClientPacket, WriteTo};
use copper_utils::codec::{Angle, LpVec3};
use uuid::Uuid;

use crate::ids::play::C_ADD_ENTITY;

/// Spawns an entity on the client.
///
/// The head-yaw angle is nominally only meaningful for living entities, but
/// the 1.21.10 client expects it for item entities too, so it is always
/// present, as is the trailing data varint (zero for items).
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_ADD_ENTITY)]
pub struct CAddEntity {
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub entity_id: i32,
    #[allow(missing_docs)]
    pub entity_uuid: Uuid,
    /// Id in the `minecraft:entity_type` registry.
    #[write(as = VarInt)]
    pub entity_type: i32,
    #[allow(missing_docs)]
    pub x: f64,
    #[allow(missing_docs)]
    pub y: f64,
    #[allow(missing_docs)]
    pub z: f64,
    /// Initial velocity in blocks per tick.
    pub velocity: LpVec3,
    #[allow(missing_docs)]
    pub pitch: Angle,
    #[allow(missing_docs)]
    pub yaw: Angle,
    #[allow(missing_docs)]
    pub head_yaw: Angle,
    /// Type-dependent extra data; zero for item entities.
    #[write(as = VarInt)]
    pub data: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_traits::ClientPacket;
    use crate::utils::ConnectionProtocol;

    #[test]
    fn test_item_spawn_frame_size() {
        let packet = CAddEntity {
            entity_id: 1000,
            entity_uuid: Uuid::nil(),
            entity_type: 71,
            x: 0.5,
            y: 64.5,
            z: 0.5,
            velocity: LpVec3::new(0.02, 0.1, -0.03),
            pitch: Angle(0.0),
            yaw: Angle(0.0),
            head_yaw: Angle(0.0),
            data: 0,
        };

        let mut buf = Vec::new();
        packet
            .write_packet(&mut buf, ConnectionProtocol::Play)
            .expect("write");

        // id(1) + entity_id(2) + uuid(16) + type(1) + position(24) +
        // velocity(6) + three angles(3) + data(1) = 54 bytes.
        assert_eq!(buf.len(), 54);
    }
}
