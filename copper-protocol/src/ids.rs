//! Packet id constants, grouped by connection state and direction.
//!
//! `S_` ids are serverbound, `C_` ids clientbound, for protocol 773.
#![allow(missing_docs)]

pub mod handshake {
    pub const S_INTENTION: i32 = 0x00;
}

pub mod status {
    pub const S_STATUS_REQUEST: i32 = 0x00;
    pub const S_PING_REQUEST: i32 = 0x01;

    pub const C_STATUS_RESPONSE: i32 = 0x00;
    pub const C_PONG_RESPONSE: i32 = 0x01;
}

pub mod login {
    pub const S_HELLO: i32 = 0x00;
    pub const S_LOGIN_ACKNOWLEDGED: i32 = 0x03;

    pub const C_LOGIN_DISCONNECT: i32 = 0x00;
    pub const C_LOGIN_SUCCESS: i32 = 0x02;
}

pub mod config {
    pub const S_CLIENT_INFORMATION: i32 = 0x00;
    pub const S_FINISH_CONFIGURATION: i32 = 0x03;
    pub const S_SELECT_KNOWN_PACKS: i32 = 0x07;

    pub const C_FINISH_CONFIGURATION: i32 = 0x03;
    pub const C_REGISTRY_DATA: i32 = 0x07;
    pub const C_SELECT_KNOWN_PACKS: i32 = 0x0E;
}

pub mod play {
    pub const S_CONTAINER_CLICK: i32 = 0x11;
    pub const S_KEEP_ALIVE: i32 = 0x1B;
    pub const S_MOVE_PLAYER_POS: i32 = 0x1D;
    pub const S_MOVE_PLAYER_POS_ROT: i32 = 0x1E;
    pub const S_MOVE_PLAYER_ROT: i32 = 0x1F;
    pub const S_PLAYER_ACTION: i32 = 0x28;
    pub const S_SET_CARRIED_ITEM: i32 = 0x34;
    pub const S_USE_ITEM_ON: i32 = 0x3F;

    pub const C_ADD_ENTITY: i32 = 0x01;
    pub const C_BLOCK_UPDATE: i32 = 0x08;
    pub const C_CONTAINER_SET_SLOT: i32 = 0x14;
    pub const C_GAME_EVENT: i32 = 0x26;
    pub const C_KEEP_ALIVE: i32 = 0x2B;
    pub const C_LEVEL_CHUNK_WITH_LIGHT: i32 = 0x2C;
    pub const C_LOGIN: i32 = 0x30;
    pub const C_PLAYER_POSITION: i32 = 0x46;
    pub const C_REMOVE_ENTITIES: i32 = 0x4B;
    pub const C_SET_CHUNK_CENTER: i32 = 0x5C;
    pub const C_SET_ENTITY_DATA: i32 = 0x61;
    pub const C_SET_TIME: i32 = 0x6F;
    pub const C_TAKE_ITEM_ENTITY: i32 = 0x7A;
}
