//! Play-state handlers: the login bootstrap and the gameplay packet loop.

use std::sync::{Arc, atomic::AtomicI64, atomic::Ordering};
use std::time::Instant;

use copper_protocol::{
    packet_traits::EncodedPacket,
    packets::game::{
        CAddEntity, CBlockUpdate, CContainerSetSlot, CGameEvent, CLogin, CPlayerPosition,
        CRemoveEntities, CSetChunkCenter, CSetEntityData, CSetTime, CTakeItemEntity, ClickType,
        PlayerActionStatus, SContainerClick, SMovePlayer, SPlayerAction, SUseItemOn, SlotData,
    },
    packets::serverbound::ServerboundPlay,
    utils::ConnectionProtocol,
};
use copper_utils::{
    BlockPos, BlockStateId, Identifier,
    codec::{Angle, LpVec3},
    locks::AsyncMutex,
    math::Vector3,
    types::Direction,
};
use copper_world::{ItemEntity, Player, entity::DEFAULT_PICKUP_DELAY, player::MAX_STACK};
use rand::Rng;
use uuid::Uuid;

use crate::network::{Connection, chunk_loader::ChunkLoader, keep_alive};
use crate::server::Server;

/// The player's own entity id.
const PLAYER_ENTITY_ID: i32 = 1;
/// Registry fallback for `minecraft:item` when the extraction is missing.
const ITEM_ENTITY_TYPE_FALLBACK: i32 = 70;
/// Sea level reported in the play login packet.
const SEA_LEVEL: i32 = 63;
/// Noon.
const TIME_OF_DAY: i64 = 6000;

/// Per-session play state: the player, the chunk streaming worker and the
/// keep-alive bookkeeping.
pub struct PlaySession {
    #[allow(missing_docs)]
    pub player: Arc<AsyncMutex<Player>>,
    #[allow(missing_docs)]
    pub chunk_loader: ChunkLoader,
    /// The id the next serverbound keep-alive must echo.
    pub expected_keep_alive: Arc<AtomicI64>,
}

/// Runs the login bootstrap and starts the session's helper tasks.
pub async fn begin_play(connection: &Arc<Connection>) -> PlaySession {
    let server = &connection.server;
    let profile = connection.profile.lock().clone();
    let (uuid, username) = profile
        .map(|profile| (profile.uuid, profile.username))
        .unwrap_or_else(|| (Uuid::nil(), format!("player-{}", connection.id)));

    let spawn = spawn_position(server);
    let player = Player::new(uuid, username, spawn, server.view_distance());
    let center = player.chunk_pos;
    let initial_chunks = player.chunks_to_load();
    let player = Arc::new(AsyncMutex::new(player));

    connection
        .send_bare_packet(&CLogin {
            entity_id: PLAYER_ENTITY_ID,
            hardcore: false,
            dimension_names: vec![Identifier::vanilla("overworld")],
            max_players: server.config.max_players as i32,
            view_distance: server.view_distance(),
            simulation_distance: i32::from(server.config.simulation_distance),
            reduced_debug_info: false,
            enable_respawn_screen: true,
            do_limited_crafting: false,
            dimension_type: 0,
            dimension_name: Identifier::vanilla("overworld"),
            hashed_seed: 0,
            game_mode: 0,
            previous_game_mode: -1,
            debug: false,
            flat: server.config.world_mode == crate::config::WorldModeConfig::Flat,
            has_death_location: false,
            portal_cooldown: 0,
            sea_level: SEA_LEVEL,
            enforces_secure_chat: false,
        })
        .await;

    connection
        .send_bare_packet(&CPlayerPosition::absolute(0, spawn.x, spawn.y, spawn.z))
        .await;

    connection
        .send_bare_packet(&CSetTime {
            world_age: 0,
            time_of_day: TIME_OF_DAY,
            increasing: true,
        })
        .await;

    connection
        .send_bare_packet(&CGameEvent {
            event: CGameEvent::START_WAITING_FOR_CHUNKS,
            value: 0.0,
        })
        .await;

    connection
        .send_bare_packet(&CSetChunkCenter {
            chunk_x: center.x(),
            chunk_z: center.z(),
        })
        .await;

    let chunk_loader = ChunkLoader::spawn(
        Arc::clone(connection),
        Arc::clone(&player),
        connection.cancel_token.clone(),
    );
    chunk_loader.queue_load(initial_chunks, center);

    let expected_keep_alive =
        keep_alive::spawn(Arc::clone(connection), connection.cancel_token.clone());

    PlaySession {
        player,
        chunk_loader,
        expected_keep_alive,
    }
}

fn spawn_position(server: &Server) -> Vector3<f64> {
    match server.config.world_mode {
        crate::config::WorldModeConfig::Flat => {
            Vector3::new(0.0, f64::from(server.config.ground_y) + 1.0, 0.0)
        }
        crate::config::WorldModeConfig::Terrain => {
            let surface = server
                .world
                .blocks
                .lock()
                .generator()
                .height_at(0.0, 0.0);
            Vector3::new(0.5, f64::from(surface) + 2.0, 0.5)
        }
    }
}

/// Dispatches one gameplay packet.
pub async fn handle_play(
    connection: &Arc<Connection>,
    session: &mut PlaySession,
    packet: ServerboundPlay,
) {
    match packet {
        ServerboundPlay::KeepAlive(keep_alive) => {
            let expected = session.expected_keep_alive.load(Ordering::SeqCst);
            if keep_alive.id != expected {
                log::warn!(
                    "Client {}: keep-alive mismatch (got {}, expected {expected})",
                    connection.id,
                    keep_alive.id
                );
            }
        }
        ServerboundPlay::MovePlayer(movement) => {
            handle_move(connection, session, &movement).await;
        }
        ServerboundPlay::PlayerAction(action) => {
            handle_player_action(connection, session, &action).await;
        }
        ServerboundPlay::SetCarriedItem(held) => {
            if (0..=8).contains(&held.slot) {
                session.player.lock().await.inventory.selected_hotbar = held.slot as u8;
            } else {
                log::warn!("Client {}: hotbar index {} out of range", connection.id, held.slot);
            }
        }
        ServerboundPlay::ContainerClick(click) => {
            handle_container_click(connection, session, &click).await;
        }
        ServerboundPlay::UseItemOn(use_item) => {
            handle_use_item_on(connection, session, &use_item).await;
        }
    }
}

async fn handle_move(
    connection: &Arc<Connection>,
    session: &mut PlaySession,
    movement: &SMovePlayer,
) {
    let mut player = session.player.lock().await;

    player.yaw = movement.yaw_or(player.yaw);
    player.pitch = movement.pitch_or(player.pitch);

    if movement.has_pos
        && let Some(new_chunk) = player.update_position(movement.position)
    {
        connection
            .send_bare_packet(&CSetChunkCenter {
                chunk_x: new_chunk.x(),
                chunk_z: new_chunk.z(),
            })
            .await;

        session
            .chunk_loader
            .queue_load(player.chunks_to_load(), new_chunk);
        session.chunk_loader.queue_unload(player.chunks_to_unload());
    }

    let outgoing = pickup_scan(&connection.server, &mut player);
    drop(player);
    for packet in &outgoing {
        connection.send_packet(packet).await;
    }
}

/// Collects every eligible item around the player into the inventory and
/// returns the resulting packets. Items that fit nowhere stay in the
/// world.
fn pickup_scan(server: &Server, player: &mut Player) -> Vec<EncodedPacket> {
    let mut outgoing = Vec::new();
    let now = Instant::now();

    let mut entities = server.world.entities.lock();
    for entity_id in player.eligible_pickups(&entities, now) {
        let Some(entity) = entities.get(entity_id) else {
            continue;
        };
        let item_id = entity.item_id;
        let count = entity.count;

        let Some(slot) = player.inventory.find_slot_for(item_id) else {
            log::debug!("Inventory full, leaving item entity {entity_id} in the world");
            continue;
        };

        entities.remove(entity_id);
        // Stack in, capping at the stack limit; overflow is discarded.
        let (slot_item, slot_count) = player.inventory.add_to_slot(slot, item_id, count);
        let state_id = player.inventory.bump_state_id();

        push_encoded(
            &mut outgoing,
            &CTakeItemEntity {
                collected_entity_id: entity_id,
                collector_entity_id: PLAYER_ENTITY_ID,
                pickup_count: i32::from(count),
            },
        );
        push_encoded(&mut outgoing, &CRemoveEntities::single(entity_id));
        push_encoded(
            &mut outgoing,
            &CContainerSetSlot {
                container_id: 0,
                state_id,
                slot: slot as i16,
                item: SlotData::new(slot_item, i32::from(slot_count)),
            },
        );
    }

    outgoing
}

async fn handle_player_action(
    connection: &Arc<Connection>,
    session: &mut PlaySession,
    action: &SPlayerAction,
) {
    match action.status {
        PlayerActionStatus::FinishedDigging => {
            handle_block_break(connection, action.pos).await;
        }
        PlayerActionStatus::DropItemStack | PlayerActionStatus::DropItem => {
            let mut player = session.player.lock().await;
            let slot = player.inventory.selected_slot();
            let drop_all = action.status == PlayerActionStatus::DropItemStack;
            let outgoing = drop_from_slot(&connection.server, &mut player, slot, drop_all);
            drop(player);
            for packet in &outgoing {
                connection.send_packet(packet).await;
            }
        }
        PlayerActionStatus::StartedDigging
        | PlayerActionStatus::CancelledDigging
        | PlayerActionStatus::ShootArrowOrFinishEating
        | PlayerActionStatus::SwapItemInHand => {}
    }
}

async fn handle_block_break(connection: &Arc<Connection>, pos: BlockPos) {
    let server = &connection.server;

    let broken_state = {
        let mut blocks = server.world.blocks.lock();
        let state = blocks.get_block(pos.x(), pos.y(), pos.z());
        if state.is_air() {
            return;
        }
        blocks.set_block(pos.x(), pos.y(), pos.z(), BlockStateId::AIR);
        state
    };

    connection
        .send_bare_packet(&CBlockUpdate {
            pos,
            block_state: BlockStateId::AIR,
        })
        .await;

    // Resolve the drop: state -> block name -> loot item -> item id. A
    // miss anywhere just means the block drops nothing.
    let registry = &server.registry;
    let Some(item_id) = registry
        .blocks
        .name_of_state(broken_state)
        .and_then(|block_name| registry.loot.drop_for(block_name))
        .and_then(|item_name| registry.items.by_name(item_name))
    else {
        log::debug!(
            "No loot for block state {} at ({}, {}, {})",
            broken_state.0,
            pos.x(),
            pos.y(),
            pos.z()
        );
        return;
    };

    let position = Vector3::new(
        f64::from(pos.x()) + 0.5,
        f64::from(pos.y()) + 0.5,
        f64::from(pos.z()) + 0.5,
    );
    let velocity = {
        let mut rng = rand::rng();
        Vector3::new(
            (rng.random::<f64>() - 0.5) * 0.1,
            0.1,
            (rng.random::<f64>() - 0.5) * 0.1,
        )
    };

    let outgoing = spawn_item_entity(server, item_id, 1, position, velocity);
    for packet in &outgoing {
        connection.send_packet(packet).await;
    }
}

/// Removes items from a slot and throws them from the player's eyes.
fn drop_from_slot(
    server: &Server,
    player: &mut Player,
    slot: u16,
    drop_all: bool,
) -> Vec<EncodedPacket> {
    let Some((item_id, count)) = player.inventory.slot(slot) else {
        return Vec::new();
    };

    let drop_count = if drop_all { count } else { 1 };
    let new_count = count - drop_count;
    player.inventory.set_slot(slot, item_id, new_count);
    let state_id = player.inventory.bump_state_id();

    let mut outgoing = Vec::new();
    push_encoded(
        &mut outgoing,
        &CContainerSetSlot {
            container_id: 0,
            state_id,
            slot: slot as i16,
            item: if new_count > 0 {
                SlotData::new(item_id, i32::from(new_count))
            } else {
                SlotData::EMPTY
            },
        },
    );

    let mut rng = rand::rng();
    let position = player.throw_position(&mut rng);
    let velocity = player.throw_velocity(&mut rng);
    outgoing.extend(spawn_item_entity(server, item_id, drop_count, position, velocity));

    outgoing
}

async fn handle_container_click(
    connection: &Arc<Connection>,
    session: &mut PlaySession,
    click: &SContainerClick,
) {
    if click.container_id != 0 {
        log::debug!(
            "Client {}: ignoring click in container {}",
            connection.id,
            click.container_id
        );
        return;
    }

    let mut player = session.player.lock().await;
    let mut outgoing = Vec::new();

    player.inventory.state_id = click.state_id;
    for change in &click.changed_slots {
        if change.slot >= 0 {
            let count = change.item.count.clamp(0, i32::from(MAX_STACK)) as u8;
            player
                .inventory
                .set_slot(change.slot as u16, change.item.item_id, count);
        }
    }

    let previous_cursor = player.inventory.cursor_item;
    player.inventory.cursor_item = if click.carried_item.is_empty() {
        None
    } else {
        let count = click.carried_item.count.clamp(0, i32::from(MAX_STACK)) as u8;
        Some((click.carried_item.item_id, count))
    };

    match click.mode {
        // A pickup click outside the window throws the cursor stack.
        ClickType::Pickup if click.slot == SContainerClick::SLOT_OUTSIDE => {
            if let Some((item_id, count)) = previous_cursor {
                let drop_count = if click.button == 0 { count } else { 1 };

                let mut rng = rand::rng();
                let position = player.throw_position(&mut rng);
                let velocity = player.throw_velocity(&mut rng);
                outgoing.extend(spawn_item_entity(
                    &connection.server,
                    item_id,
                    drop_count,
                    position,
                    velocity,
                ));
            }
            player.inventory.cursor_item = None;
        }
        ClickType::Throw => {
            if click.slot >= 0 {
                let drop_all = click.button == 1;
                outgoing.extend(drop_from_slot(
                    &connection.server,
                    &mut player,
                    click.slot as u16,
                    drop_all,
                ));
            }
        }
        _ => {}
    }

    drop(player);
    for packet in &outgoing {
        connection.send_packet(packet).await;
    }
}

async fn handle_use_item_on(
    connection: &Arc<Connection>,
    session: &mut PlaySession,
    use_item: &SUseItemOn,
) {
    let server = &connection.server;
    let mut player = session.player.lock().await;

    let slot = player.inventory.selected_slot();
    let Some((item_id, count)) = player.inventory.slot(slot) else {
        return;
    };

    // An item with no block form cannot be placed; refuse silently.
    let Some(state) = server
        .registry
        .items
        .by_id(item_id)
        .and_then(|item_name| server.registry.blocks.default_state(item_name))
    else {
        log::debug!("Client {}: item {item_id} has no block state", connection.id);
        return;
    };

    let Some(face) = Direction::from_index(use_item.face) else {
        log::warn!("Client {}: invalid face {}", connection.id, use_item.face);
        return;
    };
    let target = use_item.pos.relative(face);

    server
        .world
        .blocks
        .lock()
        .set_block(target.x(), target.y(), target.z(), state);

    let new_count = count - 1;
    player.inventory.set_slot(slot, item_id, new_count);
    let state_id = player.inventory.bump_state_id();
    drop(player);

    connection
        .send_bare_packet(&CBlockUpdate {
            pos: target,
            block_state: state,
        })
        .await;
    connection
        .send_bare_packet(&CContainerSetSlot {
            container_id: 0,
            state_id,
            slot: slot as i16,
            item: if new_count > 0 {
                SlotData::new(item_id, i32::from(new_count))
            } else {
                SlotData::EMPTY
            },
        })
        .await;
}

/// Registers a new item entity in the world and returns its spawn and
/// metadata packets.
fn spawn_item_entity(
    server: &Server,
    item_id: i32,
    count: u8,
    position: Vector3<f64>,
    velocity: Vector3<f64>,
) -> Vec<EncodedPacket> {
    let entity_type = server
        .registry
        .item_entity_type()
        .unwrap_or(ITEM_ENTITY_TYPE_FALLBACK);

    let now = Instant::now();
    let uuid = Uuid::new_v4();
    let entity_id = {
        let mut entities = server.world.entities.lock();
        let entity_id = entities.allocate_id();
        entities.insert(ItemEntity {
            entity_id,
            uuid,
            position,
            velocity,
            item_id,
            count,
            spawn_time: now,
            last_update_time: now,
            pickup_delay: DEFAULT_PICKUP_DELAY,
        });
        entity_id
    };

    log::debug!(
        "Spawned item entity {entity_id} ({count}x item {item_id}) at ({:.1}, {:.1}, {:.1})",
        position.x,
        position.y,
        position.z
    );

    let mut outgoing = Vec::new();
    push_encoded(
        &mut outgoing,
        &CAddEntity {
            entity_id,
            entity_uuid: uuid,
            entity_type,
            x: position.x,
            y: position.y,
            z: position.z,
            velocity: LpVec3::new(velocity.x, velocity.y, velocity.z),
            pitch: Angle(0.0),
            yaw: Angle(0.0),
            head_yaw: Angle(0.0),
            data: 0,
        },
    );
    push_encoded(
        &mut outgoing,
        &CSetEntityData::item_stack(entity_id, SlotData::new(item_id, i32::from(count))),
    );

    outgoing
}

fn push_encoded<P: copper_protocol::packet_traits::ClientPacket>(
    outgoing: &mut Vec<EncodedPacket>,
    packet: &P,
) {
    match EncodedPacket::from_bare(packet, ConnectionProtocol::Play) {
        Ok(encoded) => outgoing.push(encoded),
        Err(err) => log::error!("Failed to encode packet: {err}"),
    }
}
