//! The single handshake-state packet.

use copper_macros::{ReadFrom, ServerPacket};

/// What the client wants out of this connection.
#[derive(ReadFrom, Clone, Copy, Debug, PartialEq, Eq)]
#[read(as = VarInt)]
#[repr(i32)]
pub enum ClientIntent {
    /// A server-list ping.
    Status = 1,
    /// A normal login.
    Login = 2,
    /// A login after a server transfer.
    Transfer = 3,
}

/// Sent by the client as the very first packet of a connection.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SClientIntention {
    /// The client's protocol version (773 for 1.21.10).
    #[read(as = VarInt)]
    pub protocol_version: i32,
    /// The hostname the client connected with.
    pub hostname: String,
    /// The port the client connected with.
    pub port: u16,
    /// The state the client wants to switch to.
    pub intention: ClientIntent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet_traits::ServerPacket;
    use std::io::Cursor;

    #[test]
    fn test_parse_vanilla_handshake() {
        // Captured from a 1.21.10 client connecting to localhost:25565 with
        // intent = status.
        let payload: &[u8] = &[
            0x85, 0x06, 0x09, b'l', b'o', b'c', b'a', b'l', b'h', b'o', b's', b't', 0x63, 0xDD,
            0x01,
        ];

        let packet = SClientIntention::read_packet(&mut Cursor::new(payload)).expect("parse");
        assert_eq!(packet.protocol_version, 773);
        assert_eq!(packet.hostname, "localhost");
        assert_eq!(packet.port, 25565);
        assert_eq!(packet.intention, ClientIntent::Status);
    }
}
