//! Per-state decoding of raw frames into typed serverbound packets.

use std::io::Cursor;

use crate::{
    ids::{config, handshake, login, play, status},
    packet_traits::ServerPacket,
    packets::{
        config::{SClientInformation, SFinishConfiguration, SSelectKnownPacks},
        game::{
            SContainerClick, SKeepAlive, SMovePlayer, SMovePlayerPos, SMovePlayerPosRot,
            SMovePlayerRot, SPlayerAction, SSetCarriedItem, SUseItemOn,
        },
        handshake::SClientIntention,
        login::SHello,
        status::SPingRequest,
    },
    utils::{ConnectionProtocol, PacketError, RawPacket},
};

fn unsupported(protocol: ConnectionProtocol, id: i32) -> PacketError {
    PacketError::UnsupportedPacket { protocol, id }
}

/// Serverbound packets of the Handshake state.
#[derive(Clone, Debug)]
pub enum ServerboundHandshake {
    #[allow(missing_docs)]
    Intention(SClientIntention),
}

impl ServerboundHandshake {
    /// Decodes a raw frame in the Handshake state.
    pub fn from_raw_packet(raw_packet: &RawPacket) -> Result<Self, PacketError> {
        let data = &mut Cursor::new(raw_packet.payload.as_slice());
        match raw_packet.id {
            handshake::S_INTENTION => Ok(Self::Intention(SClientIntention::read_packet(data)?)),
            id => Err(unsupported(ConnectionProtocol::Handshake, id)),
        }
    }
}

/// Serverbound packets of the Status state.
#[derive(Clone, Debug)]
pub enum ServerboundStatus {
    #[allow(missing_docs)]
    StatusRequest,
    #[allow(missing_docs)]
    PingRequest(SPingRequest),
}

impl ServerboundStatus {
    /// Decodes a raw frame in the Status state.
    pub fn from_raw_packet(raw_packet: &RawPacket) -> Result<Self, PacketError> {
        let data = &mut Cursor::new(raw_packet.payload.as_slice());
        match raw_packet.id {
            status::S_STATUS_REQUEST => Ok(Self::StatusRequest),
            status::S_PING_REQUEST => Ok(Self::PingRequest(SPingRequest::read_packet(data)?)),
            id => Err(unsupported(ConnectionProtocol::Status, id)),
        }
    }
}

/// Serverbound packets of the Login state.
#[derive(Clone, Debug)]
pub enum ServerboundLogin {
    #[allow(missing_docs)]
    Hello(SHello),
    #[allow(missing_docs)]
    LoginAcknowledged,
}

impl ServerboundLogin {
    /// Decodes a raw frame in the Login state.
    pub fn from_raw_packet(raw_packet: &RawPacket) -> Result<Self, PacketError> {
        let data = &mut Cursor::new(raw_packet.payload.as_slice());
        match raw_packet.id {
            login::S_HELLO => Ok(Self::Hello(SHello::read_packet(data)?)),
            login::S_LOGIN_ACKNOWLEDGED => Ok(Self::LoginAcknowledged),
            id => Err(unsupported(ConnectionProtocol::Login, id)),
        }
    }
}

/// Serverbound packets of the Config state.
#[derive(Clone, Debug)]
pub enum ServerboundConfig {
    #[allow(missing_docs)]
    ClientInformation(SClientInformation),
    #[allow(missing_docs)]
    FinishConfiguration,
    #[allow(missing_docs)]
    SelectKnownPacks(SSelectKnownPacks),
}

impl ServerboundConfig {
    /// Decodes a raw frame in the Config state.
    pub fn from_raw_packet(raw_packet: &RawPacket) -> Result<Self, PacketError> {
        let data = &mut Cursor::new(raw_packet.payload.as_slice());
        match raw_packet.id {
            config::S_CLIENT_INFORMATION => Ok(Self::ClientInformation(
                SClientInformation::read_packet(data)?,
            )),
            config::S_FINISH_CONFIGURATION => {
                SFinishConfiguration::read_packet(data)?;
                Ok(Self::FinishConfiguration)
            }
            config::S_SELECT_KNOWN_PACKS => Ok(Self::SelectKnownPacks(
                SSelectKnownPacks::read_packet(data)?,
            )),
            id => Err(unsupported(ConnectionProtocol::Config, id)),
        }
    }
}

/// Serverbound packets of the Play state.
#[derive(Clone, Debug)]
pub enum ServerboundPlay {
    #[allow(missing_docs)]
    ContainerClick(SContainerClick),
    #[allow(missing_docs)]
    KeepAlive(SKeepAlive),
    /// Any of the three movement packets, merged.
    MovePlayer(SMovePlayer),
    #[allow(missing_docs)]
    PlayerAction(SPlayerAction),
    #[allow(missing_docs)]
    SetCarriedItem(SSetCarriedItem),
    #[allow(missing_docs)]
    UseItemOn(SUseItemOn),
}

impl ServerboundPlay {
    /// Decodes a raw frame in the Play state.
    pub fn from_raw_packet(raw_packet: &RawPacket) -> Result<Self, PacketError> {
        let data = &mut Cursor::new(raw_packet.payload.as_slice());
        match raw_packet.id {
            play::S_CONTAINER_CLICK => {
                Ok(Self::ContainerClick(SContainerClick::read_packet(data)?))
            }
            play::S_KEEP_ALIVE => Ok(Self::KeepAlive(SKeepAlive::read_packet(data)?)),
            play::S_MOVE_PLAYER_POS => Ok(Self::MovePlayer(
                SMovePlayerPos::read_packet(data)?.into(),
            )),
            play::S_MOVE_PLAYER_POS_ROT => Ok(Self::MovePlayer(
                SMovePlayerPosRot::read_packet(data)?.into(),
            )),
            play::S_MOVE_PLAYER_ROT => Ok(Self::MovePlayer(
                SMovePlayerRot::read_packet(data)?.into(),
            )),
            play::S_PLAYER_ACTION => Ok(Self::PlayerAction(SPlayerAction::read_packet(data)?)),
            play::S_SET_CARRIED_ITEM => {
                Ok(Self::SetCarriedItem(SSetCarriedItem::read_packet(data)?))
            }
            play::S_USE_ITEM_ON => Ok(Self::UseItemOn(SUseItemOn::read_packet(data)?)),
            id => Err(unsupported(ConnectionProtocol::Play, id)),
        }
    }
}
