//! Play-state packets.

mod c_add_entity;
mod c_block_update;
mod c_container_set_slot;
mod c_game_event;
mod c_keep_alive;
mod c_level_chunk_with_light;
mod c_login;
mod c_player_position;
mod c_remove_entities;
mod c_set_chunk_center;
mod c_set_entity_data;
mod c_set_time;
mod c_take_item_entity;
mod item_stack;
mod s_container_click;
mod s_keep_alive;
mod s_move_player;
mod s_player_action;
mod s_set_carried_item;
mod s_use_item_on;

pub use c_add_entity::CAddEntity;
pub use c_block_update::CBlockUpdate;
pub use c_container_set_slot::CContainerSetSlot;
pub use c_game_event::CGameEvent;
pub use c_keep_alive::CKeepAlive;
pub use c_level_chunk_with_light::{
    CLevelChunkWithLight, ChunkPacketData, HeightmapType, Heightmaps, LightUpdatePacketData,
};
pub use c_login::CLogin;
pub use c_player_position::CPlayerPosition;
pub use c_remove_entities::CRemoveEntities;
pub use c_set_chunk_center::CSetChunkCenter;
pub use c_set_entity_data::{CSetEntityData, MetadataEntry, MetadataValue};
pub use c_set_time::CSetTime;
pub use c_take_item_entity::CTakeItemEntity;
pub use item_stack::SlotData;
pub use s_container_click::{ClickType, HashedSlot, SContainerClick, SlotChange};
pub use s_keep_alive::SKeepAlive;
pub use s_move_player::{SMovePlayer, SMovePlayerPos, SMovePlayerPosRot, SMovePlayerRot};
pub use s_player_action::{PlayerActionStatus, SPlayerAction};
pub use s_set_carried_item::SSetCarriedItem;
pub use s_use_item_on::SUseItemOn;
