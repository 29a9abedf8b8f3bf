//! Click Container.

use std::io::{Read, Result};

use copper_macros::{ReadFrom, ServerPacket};
use copper_utils::{codec::VarInt, serial::ReadFrom};

/// Click type for container interactions.
#[derive(ReadFrom, Clone, Copy, Debug, PartialEq, Eq)]
#[read(as = VarInt)]
#[repr(i32)]
pub enum ClickType {
    /// Normal left/right click.
    Pickup = 0,
    /// Shift + left/right click.
    QuickMove = 1,
    /// Number keys (1-9) or offhand (F).
    Swap = 2,
    /// Middle click (creative clone).
    Clone = 3,
    /// Q key to drop items.
    Throw = 4,
    /// Click and drag to distribute items.
    QuickCraft = 5,
    /// Double-click to collect items.
    PickupAll = 6,
}

/// An item stack as the client reports it: id and count plus hashed
/// component patches. The hashes are read and discarded; inventory
/// tracking only needs the id and count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HashedSlot {
    #[allow(missing_docs)]
    pub item_id: i32,
    /// Zero when the slot is empty.
    pub count: i32,
}

impl HashedSlot {
    /// Whether the client reported an empty slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count <= 0
    }
}

impl ReadFrom for HashedSlot {
    fn read(data: &mut impl Read) -> Result<Self> {
        let present = bool::read(data)?;
        if !present {
            return Ok(Self::default());
        }

        let item_id = VarInt::read(data)?.0;
        let count = VarInt::read(data)?.0;

        let added = VarInt::read(data)?.0;
        for _ in 0..added {
            let _component_type = VarInt::read(data)?.0;
            let _component_hash = i32::read(data)?;
        }
        let removed = VarInt::read(data)?.0;
        for _ in 0..removed {
            let _component_type = VarInt::read(data)?.0;
        }

        Ok(Self { item_id, count })
    }
}

/// A slot change sent by the client.
#[derive(ReadFrom, Clone, Copy, Debug)]
pub struct SlotChange {
    #[allow(missing_docs)]
    pub slot: i16,
    #[allow(missing_docs)]
    pub item: HashedSlot,
}

/// Sent by the client when it clicks in a container.
#[derive(ServerPacket, ReadFrom, Clone, Debug)]
pub struct SContainerClick {
    /// 0 is the player inventory.
    #[read(as = VarInt)]
    pub container_id: i32,
    /// The last state id the client saw.
    #[read(as = VarInt)]
    pub state_id: i32,
    /// The clicked slot; -999 means outside the window.
    pub slot: i16,
    /// 0 left button, 1 right button.
    pub button: i8,
    #[allow(missing_docs)]
    pub mode: ClickType,
    /// Slots the client thinks changed.
    #[read(as = Prefixed(VarInt))]
    pub changed_slots: Vec<SlotChange>,
    /// What the client thinks is on the cursor afterwards.
    pub carried_item: HashedSlot,
}

impl SContainerClick {
    /// Slot value the client sends for clicks outside the window.
    pub const SLOT_OUTSIDE: i16 = -999;
}
