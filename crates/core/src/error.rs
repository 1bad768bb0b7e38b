//! Error kinds surfaced by the inventory core.

use thiserror::Error;

use crate::persist::StoreError;

/// Errors emitted by slot, selection and persistence operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// A slot index outside `[0, len)`.
    #[error("slot index {index} out of range (0..{len})")]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Number of addressable slots.
        len: usize,
    },
    /// A hotbar digit outside `[1, 9]`.
    #[error("hotbar digit {digit} out of range (1..=9)")]
    HotbarOutOfRange {
        /// Offending digit.
        digit: u8,
    },
    /// A stack count that is not a positive integer.
    #[error("invalid stack count {count}")]
    InvalidCount {
        /// Offending count.
        count: u32,
    },
    /// An item id that the catalog does not define.
    #[error("unknown item id `{id}`")]
    UnknownItem {
        /// Offending id.
        id: String,
    },
    /// A saved payload that cannot be turned back into an inventory.
    #[error("saved inventory is corrupt: {0}")]
    PersistenceCorrupt(String),
    /// The backing key-value store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InventoryError {
    /// Whether this error came from a payload that failed validation.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, InventoryError::PersistenceCorrupt(_))
    }
}
