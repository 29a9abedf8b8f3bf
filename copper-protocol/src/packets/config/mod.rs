//! Configuration-state packets.

mod c_finish_configuration;
mod c_registry_data;
mod c_select_known_packs;
mod s_client_information;
mod s_finish_configuration;
mod s_select_known_packs;

pub use c_finish_configuration::CFinishConfiguration;
pub use c_registry_data::{CRegistryData, Nbt, RegistryEntry};
pub use c_select_known_packs::CSelectKnownPacks;
pub use s_client_information::{ChatVisibility, MainHand, SClientInformation, SkinParts};
pub use s_finish_configuration::SFinishConfiguration;
pub use s_select_known_packs::{KnownPack, SSelectKnownPacks};
