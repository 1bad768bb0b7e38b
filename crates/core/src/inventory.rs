//! Slot inventory.
//!
//! Provides the fixed 37-slot store (27 main + 9 hotbar + 1 cursor) and the
//! [`Inventory`] aggregate that couples it with the active [`Selection`].
//! Writes overwrite unconditionally; there is no stacking or merging.

use tracing::debug;

use crate::catalog::{ItemCatalog, ItemDefinition};
use crate::error::InventoryError;
use crate::random::RandomSource;
use crate::selection::Selection;

/// Largest count produced by a debug fill.
pub const MAX_STACK_SIZE: u32 = 64;

/// Number of main storage slots (indices 0-26).
pub const MAIN_SLOTS: usize = 27;

/// First hotbar slot (hotbar is 27-35).
pub const HOTBAR_START: usize = MAIN_SLOTS;

/// Cursor / held slot.
pub const CURSOR_SLOT: usize = 36;

/// Total inventory slots.
pub const SLOT_COUNT: usize = 37;

/// An occupied slot: an item reference and a positive count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotEntry {
    item_id: String,
    count: u32,
}

impl SlotEntry {
    /// Create an entry. Fails when `count` is zero.
    pub fn new(item_id: impl Into<String>, count: u32) -> Result<Self, InventoryError> {
        if count == 0 {
            return Err(InventoryError::InvalidCount { count });
        }
        Ok(Self {
            item_id: item_id.into(),
            count,
        })
    }

    /// Referenced item id.
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Stack count (always >= 1).
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Fixed-size ordered array of optional slot entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStore {
    slots: [Option<SlotEntry>; SLOT_COUNT],
}

impl SlotStore {
    /// Create a store with every slot empty.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Build a store from exactly [`SLOT_COUNT`] slots.
    pub fn from_slots(slots: Vec<Option<SlotEntry>>) -> Result<Self, InventoryError> {
        let len = slots.len();
        let slots: [Option<SlotEntry>; SLOT_COUNT] = slots.try_into().map_err(|_| {
            InventoryError::PersistenceCorrupt(format!(
                "expected {SLOT_COUNT} slots, got {len}"
            ))
        })?;
        Ok(Self { slots })
    }

    /// Get the entry at `index`.
    pub fn get(&self, index: usize) -> Result<Option<&SlotEntry>, InventoryError> {
        check_index(index)?;
        Ok(self.slots[index].as_ref())
    }

    /// Overwrite the slot at `index`. Last write wins.
    pub fn set(&mut self, index: usize, entry: SlotEntry) -> Result<(), InventoryError> {
        check_index(index)?;
        self.slots[index] = Some(entry);
        Ok(())
    }

    /// Remove the entry at `index`, returning it.
    pub fn take(&mut self, index: usize) -> Result<Option<SlotEntry>, InventoryError> {
        check_index(index)?;
        Ok(self.slots[index].take())
    }

    /// Reset every slot to empty.
    pub fn clear_all(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// All slots in index order.
    pub fn slots(&self) -> &[Option<SlotEntry>] {
        &self.slots
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_none())
    }
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new()
    }
}

fn check_index(index: usize) -> Result<(), InventoryError> {
    if index >= SLOT_COUNT {
        return Err(InventoryError::OutOfRange {
            index,
            len: SLOT_COUNT,
        });
    }
    Ok(())
}

/// One startup assignment for [`Inventory::fill_sample`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleAssignment {
    /// Target slot.
    pub slot: usize,
    /// Item id; must exist in the catalog.
    pub item_id: String,
    /// Stack count.
    pub count: u32,
}

impl SampleAssignment {
    /// Create an assignment.
    pub fn new(slot: usize, item_id: impl Into<String>, count: u32) -> Self {
        Self {
            slot,
            item_id: item_id.into(),
            count,
        }
    }

    /// The stock startup layout.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(0, "stone", 64),
            Self::new(1, "dirt", 64),
            Self::new(3, "wood", 32),
            Self::new(4, "planks", 48),
            Self::new(28, "iron_ore", 1),
            Self::new(29, "coal_ore", 12),
        ]
    }
}

/// Slot store plus the active selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    store: SlotStore,
    selection: Selection,
}

impl Inventory {
    /// Create an empty inventory with slot 0 selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Underlying slot store.
    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    /// Get the entry at `index`.
    pub fn get(&self, index: usize) -> Result<Option<&SlotEntry>, InventoryError> {
        self.store.get(index)
    }

    /// Overwrite the slot at `index`.
    pub fn set(&mut self, index: usize, entry: SlotEntry) -> Result<(), InventoryError> {
        self.store.set(index, entry)
    }

    /// Currently selected slot.
    pub fn selected_slot(&self) -> usize {
        self.selection.selected()
    }

    /// Entry in the selected slot, if any.
    pub fn selected_entry(&self) -> Option<&SlotEntry> {
        self.store.slots()[self.selection.selected()].as_ref()
    }

    /// Select `index`, returning the previously selected slot.
    pub fn select_slot(&mut self, index: usize) -> Result<usize, InventoryError> {
        self.selection.select(index)
    }

    /// Select the hotbar slot for `digit` (1-9), returning the previously selected slot.
    pub fn select_hotbar(&mut self, digit: u8) -> Result<usize, InventoryError> {
        self.selection.select_hotbar(digit)
    }

    /// Empty every slot and select slot 0.
    pub fn clear_all(&mut self) {
        self.store.clear_all();
        self.selection.reset();
    }

    /// Replace the slot contents wholesale and select slot 0.
    pub fn replace_store(&mut self, store: SlotStore) {
        self.store = store;
        self.selection.reset();
    }

    /// Apply startup assignments with [`Inventory::set`] semantics.
    ///
    /// Every assignment is validated before any slot is written.
    pub fn fill_sample(
        &mut self,
        catalog: &ItemCatalog,
        assignments: &[SampleAssignment],
    ) -> Result<(), InventoryError> {
        let mut staged = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            check_index(assignment.slot)?;
            if !catalog.contains(&assignment.item_id) {
                return Err(InventoryError::UnknownItem {
                    id: assignment.item_id.clone(),
                });
            }
            staged.push((
                assignment.slot,
                SlotEntry::new(assignment.item_id.clone(), assignment.count)?,
            ));
        }

        for (slot, entry) in staged {
            self.store.set(slot, entry)?;
        }
        debug!(count = assignments.len(), "applied sample fill");
        Ok(())
    }

    /// Assign a uniformly chosen item with a count in `[1, MAX_STACK_SIZE]` to `index`.
    ///
    /// Overwrites whatever the slot held. Returns the chosen definition.
    pub fn random_fill<'c>(
        &mut self,
        index: usize,
        catalog: &'c ItemCatalog,
        random: &mut dyn RandomSource,
    ) -> Result<&'c ItemDefinition, InventoryError> {
        check_index(index)?;
        let item = catalog.choose(random);
        let count = random.next_below(MAX_STACK_SIZE as usize) as u32 + 1;
        self.store.set(index, SlotEntry::new(item.id.clone(), count)?)?;
        debug!(slot = index, item = %item.id, count, "random fill");
        Ok(item)
    }
}
