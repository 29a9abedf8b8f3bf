//! Configuration-state handlers: known packs, registry sync, and the
//! switch into Play.

use std::str::FromStr;
use std::sync::Arc;

use copper_protocol::{
    GAME_VERSION,
    packets::config::{
        CFinishConfiguration, CRegistryData, CSelectKnownPacks, KnownPack, RegistryEntry,
    },
    packets::serverbound::ServerboundConfig,
    utils::ConnectionProtocol,
};
use copper_utils::Identifier;

use crate::network::{Connection, play};

pub(crate) async fn handle_config(
    connection: &Arc<Connection>,
    session: &mut Option<play::PlaySession>,
    packet: ServerboundConfig,
) {
    match packet {
        ServerboundConfig::ClientInformation(information) => {
            log::debug!(
                "Client {} information: locale {}, view distance {}",
                connection.id,
                information.locale,
                information.view_distance
            );

            connection
                .send_bare_packet(&CSelectKnownPacks {
                    packs: vec![KnownPack::core(GAME_VERSION)],
                })
                .await;
        }
        ServerboundConfig::SelectKnownPacks(known_packs) => {
            log::debug!(
                "Client {} knows {} pack(s); sending registry data",
                connection.id,
                known_packs.packs.len()
            );

            send_registry_data(connection).await;
            connection.send_bare_packet(&CFinishConfiguration {}).await;
        }
        ServerboundConfig::FinishConfiguration => {
            connection.protocol.store(ConnectionProtocol::Play);
            log::info!("Client {} entered play", connection.id);

            *session = Some(play::begin_play(connection).await);
        }
    }
}

/// One Registry Data packet per synchronised registry, in load order.
async fn send_registry_data(connection: &Arc<Connection>) {
    for payload in &connection.server.registry.registry_data.payloads {
        let Ok(registry) = Identifier::from_str(&payload.registry) else {
            log::warn!("Skipping registry with unusable name {}", payload.registry);
            continue;
        };

        let entries = payload
            .entries
            .iter()
            .filter_map(|(name, data)| {
                let id = Identifier::from_str(name).ok()?;
                Some(RegistryEntry::new(id, data.clone()))
            })
            .collect();

        connection
            .send_bare_packet(&CRegistryData { registry, entries })
            .await;
    }
}
