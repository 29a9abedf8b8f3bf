//! Login (play), the first packet after entering the Play state.

use copper_macros::{ClientPacket, WriteTo};
use copper_utils::Identifier;

use crate::ids::play::C_LOGIN;

/// Describes the world the player is joining.
#[derive(ClientPacket, WriteTo, Clone, Debug)]
#[packet_id(Play = C_LOGIN)]
pub struct CLogin {
    /// The player's own entity id.
    pub entity_id: i32,
    #[allow(missing_docs)]
    pub hardcore: bool,
    /// All dimensions of the server; a single overworld here.
    #[write(as = Prefixed(VarInt))]
    pub dimension_names: Vec<Identifier>,
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub max_players: i32,
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub view_distance: i32,
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub simulation_distance: i32,
    #[allow(missing_docs)]
    pub reduced_debug_info: bool,
    #[allow(missing_docs)]
    pub enable_respawn_screen: bool,
    #[allow(missing_docs)]
    pub do_limited_crafting: bool,
    /// Index into the dimension_type registry sent during configuration.
    #[write(as = VarInt)]
    pub dimension_type: i32,
    #[allow(missing_docs)]
    pub dimension_name: Identifier,
    #[allow(missing_docs)]
    pub hashed_seed: i64,
    /// 0 survival, 1 creative, 2 adventure, 3 spectator.
    pub game_mode: i8,
    /// -1 when there is no previous game mode.
    pub previous_game_mode: i8,
    #[allow(missing_docs)]
    pub debug: bool,
    #[allow(missing_docs)]
    pub flat: bool,
    /// No death location is ever sent, so this stays false and the
    /// dimension/position pair is omitted.
    pub has_death_location: bool,
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub portal_cooldown: i32,
    #[allow(missing_docs)]
    #[write(as = VarInt)]
    pub sea_level: i32,
    #[allow(missing_docs)]
    pub enforces_secure_chat: bool,
}
