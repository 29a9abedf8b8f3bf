//! Async frame decoder: Client -> Server.
//!
//! The stream is clear-text; compression and encryption are not part of this
//! server, so de-framing is a varint length followed by that many bytes.

use std::io;

use copper_utils::codec::VarInt;
use copper_utils::serial::ReadFrom;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::utils::{MAX_PACKET_SIZE, PacketError, RawPacket};

/// Reads length-prefixed packet frames off a TCP read half.
pub struct TcpPacketReader<R: AsyncRead + Unpin> {
    reader: R,
}

impl<R: AsyncRead + Unpin> TcpPacketReader<R> {
    /// Creates a new `TcpPacketReader`.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads one frame and splits it into id and payload.
    ///
    /// # Errors
    /// - If the length varint is malformed or out of bounds.
    /// - If the stream ends mid-frame.
    pub async fn get_raw_packet(&mut self) -> Result<RawPacket, PacketError> {
        let packet_len = VarInt::read_async(&mut self.reader)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => PacketError::ConnectionClosed,
                _ => PacketError::MalformedLength(e.to_string()),
            })?;

        if packet_len < 0 {
            return Err(PacketError::OutOfBounds);
        }
        let packet_len = packet_len as usize;
        if packet_len > MAX_PACKET_SIZE {
            return Err(PacketError::TooLong(packet_len));
        }

        let mut packet_data = vec![0u8; packet_len];
        self.reader
            .read_exact(&mut packet_data)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => PacketError::ConnectionClosed,
                _ => PacketError::MalformedValue(e.to_string()),
            })?;

        let mut cursor = io::Cursor::new(packet_data.as_slice());
        let packet_id = VarInt::read(&mut cursor)?.0;
        let pos = cursor.position() as usize;

        Ok(RawPacket {
            id: packet_id,
            payload: packet_data[pos..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copper_utils::serial::WriteTo;

    fn frame(packet_id: i32, payload: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        VarInt(packet_id).write(&mut body).unwrap();
        body.extend_from_slice(payload);

        let mut packet = Vec::new();
        VarInt(body.len() as i32).write(&mut packet).unwrap();
        packet.extend_from_slice(&body);
        packet
    }

    #[tokio::test]
    async fn test_decode_simple_frame() {
        let packet = frame(0x1B, b"payload");
        let mut reader = TcpPacketReader::new(packet.as_slice());

        let raw = reader.get_raw_packet().await.expect("decode failed");
        assert_eq!(raw.id, 0x1B);
        assert_eq!(raw.payload, b"payload");
    }

    #[tokio::test]
    async fn test_decode_empty_payload() {
        let packet = frame(0x03, b"");
        let mut reader = TcpPacketReader::new(packet.as_slice());

        let raw = reader.get_raw_packet().await.expect("decode failed");
        assert_eq!(raw.id, 0x03);
        assert!(raw.payload.is_empty());
    }

    #[tokio::test]
    async fn test_decode_consecutive_frames() {
        let mut stream = frame(0x00, &[1, 2, 3]);
        stream.extend(frame(0x01, &[4]));
        let mut reader = TcpPacketReader::new(stream.as_slice());

        let first = reader.get_raw_packet().await.expect("decode failed");
        let second = reader.get_raw_packet().await.expect("decode failed");
        assert_eq!(first.payload, vec![1, 2, 3]);
        assert_eq!(second.id, 0x01);
    }

    #[tokio::test]
    async fn test_truncated_frame_is_closed_connection() {
        let mut packet = frame(0x00, &[1, 2, 3, 4]);
        packet.truncate(packet.len() - 2);
        let mut reader = TcpPacketReader::new(packet.as_slice());

        assert!(matches!(
            reader.get_raw_packet().await,
            Err(PacketError::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn test_overlong_length_is_malformed() {
        let bytes = [0xFFu8, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut reader = TcpPacketReader::new(bytes.as_slice());

        assert!(matches!(
            reader.get_raw_packet().await,
            Err(PacketError::MalformedLength(_))
        ));
    }
}
