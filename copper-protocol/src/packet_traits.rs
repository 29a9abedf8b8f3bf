//! Traits connecting packet structs to the framing layer.

use std::io::{Cursor, Write};

use copper_utils::{
    codec::VarInt,
    serial::{ReadFrom, WriteTo},
};

use crate::utils::{ConnectionProtocol, MAX_PACKET_SIZE, PacketError};

/// A packet sent from the client to the server.
pub trait ServerPacket: ReadFrom {
    /// Reads a packet body.
    fn read_packet(data: &mut Cursor<&[u8]>) -> Result<Self, PacketError> {
        Self::read(data).map_err(PacketError::from)
    }
}

/// A packet sent from the server to the client.
pub trait ClientPacket: WriteTo {
    /// Writes the packet id and body to the given writer.
    ///
    /// # Errors
    /// - If the packet fails to write.
    /// - If the packet has no id in the given state.
    fn write_packet(
        &self,
        writer: &mut impl Write,
        protocol: ConnectionProtocol,
    ) -> Result<(), PacketError> {
        let packet_id = self
            .get_id(protocol)
            .ok_or(PacketError::InvalidProtocol(format!(
                "packet has no id in {protocol:?}"
            )))?;
        VarInt(packet_id).write(writer)?;
        self.write(writer).map_err(PacketError::from)
    }

    /// Gets the id of the packet for the given connection state.
    fn get_id(&self, protocol: ConnectionProtocol) -> Option<i32>;
}

/// A fully framed clientbound packet: `varint(length) || id || body`.
///
/// The stream is clear-text, so the frame can be assembled once and shared
/// between the session handler, chunk loader and keep-alive tasks.
#[derive(Clone)]
pub struct EncodedPacket {
    /// The encoded frame.
    pub data: Vec<u8>,
}

impl EncodedPacket {
    /// Encodes a bare packet for the given state.
    ///
    /// # Errors
    /// - If the packet fails to write or exceeds the frame limit.
    pub fn from_bare<P: ClientPacket>(
        packet: &P,
        protocol: ConnectionProtocol,
    ) -> Result<Self, PacketError> {
        let mut body = Vec::with_capacity(64);
        packet.write_packet(&mut body, protocol)?;

        if body.len() > MAX_PACKET_SIZE {
            return Err(PacketError::TooLong(body.len()));
        }

        let mut data = Vec::with_capacity(VarInt::written_size(body.len() as i32) + body.len());
        VarInt(body.len() as i32).write(&mut data)?;
        data.extend_from_slice(&body);

        Ok(Self { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::game::CKeepAlive;

    #[test]
    fn test_frame_layout() {
        let packet = CKeepAlive { id: 1 };
        let encoded = EncodedPacket::from_bare(&packet, ConnectionProtocol::Play).expect("encode");

        // varint(length=9) || varint(0x2B) || i64 id
        assert_eq!(encoded.data.len(), 10);
        assert_eq!(encoded.data[0], 9);
        assert_eq!(encoded.data[1], 0x2B);
        assert_eq!(&encoded.data[2..], &[0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_wrong_state_is_rejected() {
        let packet = CKeepAlive { id: 1 };
        assert!(EncodedPacket::from_bare(&packet, ConnectionProtocol::Login).is_err());
    }
}
