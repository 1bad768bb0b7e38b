//! Active slot tracking.

use crate::error::InventoryError;
use crate::inventory::{HOTBAR_START, SLOT_COUNT};

/// Number of hotbar slots reachable through digit keys.
pub const HOTBAR_SIZE: usize = 9;

/// The single active slot index, always within `[0, SLOT_COUNT)`.
///
/// Selection does not look at slot contents; selecting an empty slot is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    selected: usize,
}

impl Selection {
    /// Selection starting at slot 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected slot index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Select `index`, returning the previously selected index.
    pub fn select(&mut self, index: usize) -> Result<usize, InventoryError> {
        if index >= SLOT_COUNT {
            return Err(InventoryError::OutOfRange {
                index,
                len: SLOT_COUNT,
            });
        }
        let previous = self.selected;
        self.selected = index;
        Ok(previous)
    }

    /// Select the hotbar slot for `digit` (1-9), returning the previously selected index.
    pub fn select_hotbar(&mut self, digit: u8) -> Result<usize, InventoryError> {
        let index = hotbar_slot(digit)?;
        self.select(index)
    }

    /// Reset to slot 0.
    pub fn reset(&mut self) {
        self.selected = 0;
    }
}

/// Map a hotbar digit (1-9) to its slot index.
pub fn hotbar_slot(digit: u8) -> Result<usize, InventoryError> {
    if !(1..=HOTBAR_SIZE as u8).contains(&digit) {
        return Err(InventoryError::HotbarOutOfRange { digit });
    }
    Ok(HOTBAR_START + (digit as usize - 1))
}
