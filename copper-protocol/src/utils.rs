//! Connection states, raw packets and the protocol error taxonomy.

use std::io;

use copper_utils::serial::prefixed_read::STRING_TOO_LONG;
use thiserror::Error;

/// The maximum size of a packet frame.
pub const MAX_PACKET_SIZE: usize = 2_097_152;

/// Describes the set of packets a connection understands at a given point.
///
/// A connection always starts out in [`ConnectionProtocol::Handshake`],
/// where the client announces which protocol it wants next. Every packet id
/// is meaningful only relative to one of these states.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ConnectionProtocol {
    /// The initial state; the client sends its intention and nothing else.
    Handshake,
    /// The server-list ping protocol.
    Status,
    /// The login exchange; ends when the client acknowledges login.
    Login,
    /// Registry and settings synchronisation before gameplay.
    Config,
    /// The main gameplay protocol.
    Play,
}

/// A de-framed packet: id plus undecoded payload.
#[derive(Debug)]
pub struct RawPacket {
    /// The packet id, relative to the connection state.
    pub id: i32,
    /// The packet body after the id.
    pub payload: Vec<u8>,
}

/// An error that can occur when handling packets.
#[derive(Error, Debug)]
pub enum PacketError {
    /// The packet frame exceeds the maximum length.
    #[error("packet length {0} exceeds maximum length")]
    TooLong(usize),
    /// The packet length is negative or otherwise outside the frame bounds.
    #[error("packet length is out of bounds")]
    OutOfBounds,
    /// A length-prefixed string exceeded its character bound.
    #[error("string exceeds maximum length")]
    StringTooLong,
    /// The packet length `VarInt` is malformed.
    #[error("malformed packet length VarInt: {0}")]
    MalformedLength(String),
    /// A value in the packet body is malformed.
    #[error("malformed packet value: {0}")]
    MalformedValue(String),
    /// A known connection state received an id it has no handler for.
    #[error("unsupported packet id {id:#04x} in state {protocol:?}")]
    UnsupportedPacket {
        /// The state the connection was in.
        protocol: ConnectionProtocol,
        /// The offending packet id.
        id: i32,
    },
    /// The connection has closed.
    #[error("the connection has closed")]
    ConnectionClosed,
    /// An error occurred when queueing a packet for sending.
    #[error("{0}")]
    SendError(String),
    /// A packet was encoded for a state it has no id in.
    #[error("invalid protocol: {0}")]
    InvalidProtocol(String),
}

impl From<io::Error> for PacketError {
    fn from(value: io::Error) -> Self {
        if value.to_string() == STRING_TOO_LONG {
            Self::StringTooLong
        } else {
            Self::MalformedValue(value.to_string())
        }
    }
}
