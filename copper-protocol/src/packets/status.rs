//! Status-state packets (the server-list ping).

use copper_macros::{ClientPacket, ReadFrom, ServerPacket, WriteTo};
use serde::Serialize;

use crate::ids::status::{C_PONG_RESPONSE, C_STATUS_RESPONSE};

/// Empty request for the status JSON.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SStatusRequest {}

/// Latency probe; the payload is echoed back verbatim.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SPingRequest {
    #[allow(missing_docs)]
    pub payload: i64,
}

/// The status JSON document.
#[derive(Serialize, Clone, Debug)]
pub struct StatusResponse {
    #[allow(missing_docs)]
    pub version: StatusVersion,
    #[allow(missing_docs)]
    pub players: StatusPlayers,
    /// The MOTD, as a plain-text chat component.
    pub description: StatusDescription,
}

#[allow(missing_docs)]
#[derive(Serialize, Clone, Debug)]
pub struct StatusVersion {
    pub name: String,
    pub protocol: i32,
}

#[allow(missing_docs)]
#[derive(Serialize, Clone, Debug)]
pub struct StatusPlayers {
    pub max: u32,
    pub online: u32,
}

#[allow(missing_docs)]
#[derive(Serialize, Clone, Debug)]
pub struct StatusDescription {
    pub text: String,
}

/// Carries the status JSON back to the client.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Status = C_STATUS_RESPONSE)]
pub struct CStatusResponse {
    /// JSON-encoded [`StatusResponse`].
    pub status: String,
}

impl CStatusResponse {
    /// Serializes the response document.
    ///
    /// # Panics
    /// - Never; the document contains no non-serializable values.
    #[must_use]
    pub fn new(response: &StatusResponse) -> Self {
        Self {
            status: serde_json::to_string(response).expect("status response serializes"),
        }
    }
}

/// Echo of [`SPingRequest`].
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Status = C_PONG_RESPONSE)]
pub struct CPongResponse {
    #[allow(missing_docs)]
    pub payload: i64,
}
