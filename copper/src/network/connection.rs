//! One connected client: socket halves, connection state, and the packet
//! read loop that drives the session state machine.

use std::{net::SocketAddr, sync::Arc};

use copper_protocol::{
    packet_reader::TcpPacketReader,
    packet_traits::{ClientPacket, EncodedPacket},
    packet_writer::TcpPacketWriter,
    packets::login::CLoginDisconnect,
    packets::serverbound::{
        ServerboundConfig, ServerboundHandshake, ServerboundLogin, ServerboundPlay,
        ServerboundStatus,
    },
    utils::{ConnectionProtocol, PacketError, RawPacket},
};
use copper_utils::locks::{AsyncMutex, SyncMutex};
use crossbeam::atomic::AtomicCell;
use tokio::{
    io::{BufReader, BufWriter},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    select,
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    network::{config, login, play, status},
    server::Server,
};

/// Consecutive malformed frames tolerated before the connection is torn
/// down.
const MAX_DECODE_FAILURES: u32 = 5;

/// Name and uuid from Login Start, kept for the whole session.
#[derive(Clone, Debug)]
pub struct GameProfile {
    #[allow(missing_docs)]
    pub uuid: Uuid,
    #[allow(missing_docs)]
    pub username: String,
}

/// A single client connection.
///
/// The writer is shared by the session handler, the chunk loader and the
/// keep-alive task; its mutex is held for exactly one packet per send, so
/// packets never interleave on the stream.
pub struct Connection {
    /// The unique id of the client.
    pub id: u64,
    /// The client's address, for log lines.
    pub address: SocketAddr,
    /// The current connection state.
    pub protocol: AtomicCell<ConnectionProtocol>,
    /// The shared frame writer.
    pub writer: Arc<AsyncMutex<TcpPacketWriter<BufWriter<OwnedWriteHalf>>>>,
    /// Cancelled on teardown; child tasks watch it.
    pub cancel_token: CancellationToken,
    /// The shared server state.
    pub server: Arc<Server>,
    /// Set by Login Start.
    pub profile: SyncMutex<Option<GameProfile>>,
}

impl Connection {
    /// Splits the stream and builds the connection.
    #[must_use]
    pub fn new(
        stream: TcpStream,
        address: SocketAddr,
        id: u64,
        cancel_token: CancellationToken,
        server: Arc<Server>,
    ) -> (Arc<Self>, TcpPacketReader<BufReader<OwnedReadHalf>>) {
        let (read, write) = stream.into_split();

        let connection = Arc::new(Self {
            id,
            address,
            protocol: AtomicCell::new(ConnectionProtocol::Handshake),
            writer: Arc::new(AsyncMutex::new(TcpPacketWriter::new(BufWriter::new(write)))),
            cancel_token,
            server,
            profile: SyncMutex::new(None),
        });

        (connection, TcpPacketReader::new(BufReader::new(read)))
    }

    /// Requests teardown of the connection and its tasks.
    pub fn close(&self) {
        self.cancel_token.cancel();
    }

    /// Kicks the client with a reason, when its state has a disconnect
    /// packet, and tears the connection down.
    pub async fn kick(&self, reason: &str) {
        log::info!("Kicking client {}: {reason}", self.id);
        if self.protocol.load() == ConnectionProtocol::Login {
            self.send_bare_packet(&CLoginDisconnect::text(reason)).await;
        }
        self.close();
    }

    /// Encodes a packet for the current state and sends it.
    pub async fn send_bare_packet<P: ClientPacket>(&self, packet: &P) {
        match EncodedPacket::from_bare(packet, self.protocol.load()) {
            Ok(encoded) => self.send_packet(&encoded).await,
            Err(err) => {
                log::error!("Failed to encode packet for client {}: {err}", self.id);
                self.close();
            }
        }
    }

    /// Sends an already encoded frame, holding the writer for its
    /// duration.
    pub async fn send_packet(&self, packet: &EncodedPacket) {
        if let Err(err) = self.writer.lock().await.write_packet(packet).await
            && !self.cancel_token.is_cancelled()
        {
            log::warn!("Failed to send packet to client {}: {err}", self.id);
            self.close();
        }
    }

    /// The packet read loop; returns when the client disconnects, the
    /// session is cancelled, or framing breaks down for good.
    pub async fn run(
        self: &Arc<Self>,
        mut reader: TcpPacketReader<BufReader<OwnedReadHalf>>,
    ) {
        let mut session: Option<play::PlaySession> = None;
        let mut decode_failures = 0u32;

        loop {
            select! {
                () = self.cancel_token.cancelled() => break,
                packet = reader.get_raw_packet() => {
                    match packet {
                        Ok(packet) => {
                            decode_failures = 0;
                            if let Err(err) = self.process_packet(&mut session, packet).await {
                                match err {
                                    PacketError::UnsupportedPacket { .. } => {
                                        log::debug!("Client {}: {err}", self.id);
                                    }
                                    err => {
                                        log::warn!("Client {}: bad packet: {err}", self.id);
                                    }
                                }
                            }
                        }
                        Err(PacketError::ConnectionClosed) => {
                            log::info!("Client {} disconnected", self.id);
                            break;
                        }
                        Err(err) => {
                            decode_failures += 1;
                            log::warn!(
                                "Client {}: framing error ({decode_failures}/{MAX_DECODE_FAILURES}): {err}",
                                self.id
                            );
                            if decode_failures >= MAX_DECODE_FAILURES {
                                self.kick("Malformed packet stream").await;
                                break;
                            }
                        }
                    }
                }
            }
        }

        self.close();
    }

    async fn process_packet(
        self: &Arc<Self>,
        session: &mut Option<play::PlaySession>,
        packet: RawPacket,
    ) -> Result<(), PacketError> {
        match self.protocol.load() {
            ConnectionProtocol::Handshake => {
                let ServerboundHandshake::Intention(intention) =
                    ServerboundHandshake::from_raw_packet(&packet)?;
                self.handle_intention(&intention);
            }
            ConnectionProtocol::Status => {
                let packet = ServerboundStatus::from_raw_packet(&packet)?;
                status::handle_status(self, packet).await;
            }
            ConnectionProtocol::Login => {
                let packet = ServerboundLogin::from_raw_packet(&packet)?;
                login::handle_login(self, packet).await;
            }
            ConnectionProtocol::Config => {
                let packet = ServerboundConfig::from_raw_packet(&packet)?;
                config::handle_config(self, session, packet).await;
            }
            ConnectionProtocol::Play => {
                let packet = ServerboundPlay::from_raw_packet(&packet)?;
                if let Some(session) = session.as_mut() {
                    play::handle_play(self, session, packet).await;
                } else {
                    log::warn!("Client {} sent a play packet before the bootstrap", self.id);
                }
            }
        }
        Ok(())
    }

    fn handle_intention(&self, intention: &copper_protocol::packets::handshake::SClientIntention) {
        use copper_protocol::packets::handshake::ClientIntent;

        let next = match intention.intention {
            ClientIntent::Status => ConnectionProtocol::Status,
            ClientIntent::Login | ClientIntent::Transfer => ConnectionProtocol::Login,
        };
        log::debug!(
            "Client {} handshake: protocol {} -> {next:?}",
            self.id,
            intention.protocol_version
        );
        self.protocol.store(next);
    }
}
