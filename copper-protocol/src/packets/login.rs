//! Login-state packets.
//!
//! The server runs offline mode, so the whole exchange is Hello ->
//! Login Success -> Login Acknowledged; there is no key exchange.

use copper_macros::{ClientPacket, ReadFrom, ServerPacket, WriteTo};
use uuid::Uuid;

use crate::ids::login::{C_LOGIN_DISCONNECT, C_LOGIN_SUCCESS};

/// Login Start: the client announces its name and uuid.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SHello {
    /// The username, at most 16 characters.
    pub name: String,
    /// The uuid the client claims; trusted verbatim in offline mode.
    pub uuid: Uuid,
}

/// Login Acknowledged: empty; moves the connection to Config.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SLoginAcknowledged {}

/// A textured-skin property on a game profile. Always absent here, but the
/// empty array is mandatory on the wire.
#[derive(WriteTo, Clone, Debug)]
pub struct ProfileProperty {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub value: String,
    #[allow(missing_docs)]
    pub signature: Option<String>,
}

/// Kicks a client that is still in the login state.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Login = C_LOGIN_DISCONNECT)]
pub struct CLoginDisconnect {
    /// A JSON chat component.
    pub reason: String,
}

impl CLoginDisconnect {
    /// A plain-text reason.
    #[must_use]
    pub fn text(message: &str) -> Self {
        Self {
            reason: serde_json::json!({ "text": message }).to_string(),
        }
    }
}

/// Login Success: echoes the game profile back to the client.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Login = C_LOGIN_SUCCESS)]
pub struct CLoginSuccess {
    #[allow(missing_docs)]
    pub uuid: Uuid,
    #[allow(missing_docs)]
    pub username: String,
    /// Empty in offline mode.
    #[write(as = Prefixed(VarInt))]
    pub properties: Vec<ProfileProperty>,
}
