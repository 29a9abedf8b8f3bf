//! Status-state handlers: the server-list ping.

use std::sync::Arc;

use copper_protocol::{
    PROTOCOL_VERSION,
    packets::serverbound::ServerboundStatus,
    packets::status::{
        CPongResponse, CStatusResponse, StatusDescription, StatusPlayers, StatusResponse,
        StatusVersion,
    },
};

use crate::network::Connection;

pub(crate) async fn handle_status(connection: &Arc<Connection>, packet: ServerboundStatus) {
    match packet {
        ServerboundStatus::StatusRequest => {
            let config = &connection.server.config;
            let response = StatusResponse {
                version: StatusVersion {
                    name: copper_protocol::GAME_VERSION.to_string(),
                    protocol: PROTOCOL_VERSION,
                },
                players: StatusPlayers {
                    max: config.max_players,
                    online: 0,
                },
                description: StatusDescription {
                    text: config.motd.clone(),
                },
            };
            connection
                .send_bare_packet(&CStatusResponse::new(&response))
                .await;
        }
        ServerboundStatus::PingRequest(ping) => {
            connection
                .send_bare_packet(&CPongResponse {
                    payload: ping.payload,
                })
                .await;
        }
    }
}
