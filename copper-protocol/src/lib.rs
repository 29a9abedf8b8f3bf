//! # Copper Protocol
//!
//! Packet framing, connection states and the packet structs for every state
//! of a Minecraft Java Edition 1.21.10 (protocol 773) connection.

pub mod ids;
pub mod packet_reader;
pub mod packet_traits;
pub mod packet_writer;
pub mod packets;
pub mod utils;

/// The wire protocol version this server speaks.
pub const PROTOCOL_VERSION: i32 = 773;
/// The game version the protocol version belongs to.
pub const GAME_VERSION: &str = "1.21.10";
