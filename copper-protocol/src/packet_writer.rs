//! Async frame encoder: Server -> Client.

use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::packet_traits::EncodedPacket;

/// Writes pre-encoded frames onto a TCP write half.
///
/// Holding the surrounding mutex for the duration of one `write_packet`
/// call is what keeps frames from interleaving between the session handler,
/// the chunk loader and the keep-alive task.
pub struct TcpPacketWriter<W: AsyncWrite + Unpin> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> TcpPacketWriter<W> {
    /// Creates a new `TcpPacketWriter`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes one frame and flushes it.
    ///
    /// # Errors
    /// - If the underlying stream fails.
    pub async fn write_packet(&mut self, packet: &EncodedPacket) -> io::Result<()> {
        self.writer.write_all(&packet.data).await?;
        self.writer.flush().await
    }
}
