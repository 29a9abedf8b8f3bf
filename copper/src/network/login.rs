//! Login-state handlers. Offline mode: the client's claimed profile is
//! echoed straight back.

use std::sync::Arc;

use copper_protocol::{
    packets::login::CLoginSuccess, packets::serverbound::ServerboundLogin,
    utils::ConnectionProtocol,
};

use crate::network::{Connection, connection::GameProfile};

pub(crate) async fn handle_login(connection: &Arc<Connection>, packet: ServerboundLogin) {
    match packet {
        ServerboundLogin::Hello(hello) => {
            log::info!(
                "Client {} logging in as {} ({})",
                connection.id,
                hello.name,
                hello.uuid
            );

            *connection.profile.lock() = Some(GameProfile {
                uuid: hello.uuid,
                username: hello.name.clone(),
            });

            connection
                .send_bare_packet(&CLoginSuccess {
                    uuid: hello.uuid,
                    username: hello.name,
                    properties: Vec::new(),
                })
                .await;
        }
        ServerboundLogin::LoginAcknowledged => {
            connection.protocol.store(ConnectionProtocol::Config);
            log::debug!("Client {} entered configuration", connection.id);
        }
    }
}
