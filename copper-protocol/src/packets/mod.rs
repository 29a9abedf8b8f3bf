//! Packet structs, one module per connection state, plus the per-state
//! serverbound dispatch enums.

pub mod config;
pub mod game;
pub mod handshake;
pub mod login;
pub mod serverbound;
pub mod status;
