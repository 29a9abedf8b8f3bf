//! Client Information, sent at the start of the configuration phase.

use std::io::{Read, Result};

use bitflags::bitflags;
use copper_macros::{ReadFrom, ServerPacket};
use copper_utils::serial::ReadFrom;

/// Which chat messages the client wants to see.
#[derive(ReadFrom, Clone, Copy, Debug, PartialEq, Eq)]
#[read(as = VarInt)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum ChatVisibility {
    Full = 0,
    System = 1,
    Hidden = 2,
}

/// Which hand the client renders as its main hand.
#[derive(ReadFrom, Clone, Copy, Debug, PartialEq, Eq)]
#[read(as = VarInt)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum MainHand {
    Left = 0,
    Right = 1,
}

bitflags! {
    /// Displayed skin layers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SkinParts: u8 {
        /// Cape enabled.
        const CAPE = 0x01;
        /// Jacket layer.
        const JACKET = 0x02;
        /// Left sleeve layer.
        const LEFT_SLEEVE = 0x04;
        /// Right sleeve layer.
        const RIGHT_SLEEVE = 0x08;
        /// Left pants layer.
        const LEFT_PANTS = 0x10;
        /// Right pants layer.
        const RIGHT_PANTS = 0x20;
        /// Hat layer.
        const HAT = 0x40;
    }
}

impl ReadFrom for SkinParts {
    fn read(data: &mut impl Read) -> Result<Self> {
        Ok(Self::from_bits_truncate(u8::read(data)?))
    }
}

/// The client's settings. The server keeps them on the session but serves
/// its own view distance regardless.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SClientInformation {
    /// Locale tag such as `en_us`, at most 16 characters.
    pub locale: String,
    /// The client's requested view distance in chunks.
    pub view_distance: i8,
    #[allow(missing_docs)]
    pub chat_visibility: ChatVisibility,
    #[allow(missing_docs)]
    pub chat_colors: bool,
    #[allow(missing_docs)]
    pub skin_parts: SkinParts,
    #[allow(missing_docs)]
    pub main_hand: MainHand,
    /// Whether the client wants profanity filtering applied to its text.
    pub text_filtering: bool,
    /// Whether the client consents to appearing in server listings.
    pub allow_server_listings: bool,
}
