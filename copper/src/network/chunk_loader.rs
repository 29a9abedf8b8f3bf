//! The per-session chunk streaming worker.
//!
//! The session enqueues load and unload batches; the worker materializes
//! and serializes chunks closest-first and sends them on the shared
//! writer, finishing each batch with a Set Center Chunk.

use std::sync::Arc;

use copper_protocol::{
    packet_traits::EncodedPacket,
    packets::game::CSetChunkCenter,
    utils::ConnectionProtocol,
};
use copper_utils::{ChunkPos, locks::AsyncMutex};
use copper_world::Player;
use tokio::{select, sync::mpsc};
use tokio_util::sync::CancellationToken;

use crate::network::Connection;

/// A batch of work for the worker.
pub enum ChunkCommand {
    /// Stream these chunks, closest to `center` first.
    Load {
        #[allow(missing_docs)]
        chunks: Vec<ChunkPos>,
        #[allow(missing_docs)]
        center: ChunkPos,
    },
    /// Forget these chunks on the player; world data stays resident.
    Unload {
        #[allow(missing_docs)]
        chunks: Vec<ChunkPos>,
    },
}

/// Handle for enqueueing chunk work.
pub struct ChunkLoader {
    sender: mpsc::UnboundedSender<ChunkCommand>,
}

impl ChunkLoader {
    /// Spawns the worker task for one session.
    #[must_use]
    pub fn spawn(
        connection: Arc<Connection>,
        player: Arc<AsyncMutex<Player>>,
        cancel: CancellationToken,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(worker(connection, player, receiver, cancel));
        Self { sender }
    }

    /// Enqueues a load batch.
    pub fn queue_load(&self, chunks: Vec<ChunkPos>, center: ChunkPos) {
        if !chunks.is_empty() {
            let _ = self.sender.send(ChunkCommand::Load { chunks, center });
        }
    }

    /// Enqueues an unload batch.
    pub fn queue_unload(&self, chunks: Vec<ChunkPos>) {
        if !chunks.is_empty() {
            let _ = self.sender.send(ChunkCommand::Unload { chunks });
        }
    }
}

async fn worker(
    connection: Arc<Connection>,
    player: Arc<AsyncMutex<Player>>,
    mut receiver: mpsc::UnboundedReceiver<ChunkCommand>,
    cancel: CancellationToken,
) {
    loop {
        let command = select! {
            () = cancel.cancelled() => break,
            command = receiver.recv() => match command {
                Some(command) => command,
                None => break,
            },
        };

        match command {
            ChunkCommand::Load { mut chunks, center } => {
                chunks.sort_by_key(|chunk| chunk.manhattan_distance(center));
                log::debug!(
                    "Client {}: streaming {} chunk(s) around ({}, {})",
                    connection.id,
                    chunks.len(),
                    center.x(),
                    center.z()
                );

                for chunk in chunks {
                    if cancel.is_cancelled() {
                        return;
                    }

                    let packet = connection.server.world.chunk_packet(chunk);
                    match EncodedPacket::from_bare(&packet, ConnectionProtocol::Play) {
                        Ok(encoded) => connection.send_packet(&encoded).await,
                        Err(err) => {
                            log::error!(
                                "Client {}: failed to encode chunk ({}, {}): {err}",
                                connection.id,
                                chunk.x(),
                                chunk.z()
                            );
                            continue;
                        }
                    }

                    player.lock().await.loaded_chunks.insert(chunk);
                }

                connection
                    .send_bare_packet(&CSetChunkCenter {
                        chunk_x: center.x(),
                        chunk_z: center.z(),
                    })
                    .await;
            }
            ChunkCommand::Unload { chunks } => {
                let mut player = player.lock().await;
                for chunk in &chunks {
                    player.loaded_chunks.remove(chunk);
                }
                log::debug!(
                    "Client {}: unloaded {} chunk(s)",
                    connection.id,
                    chunks.len()
                );
            }
        }
    }
}
