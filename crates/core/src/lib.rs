#![warn(missing_docs)]
//! Slot inventory state, grid navigation and persistence shared across the workspace.

pub mod catalog;
pub mod display;
pub mod error;
pub mod inventory;
pub mod navigator;
pub mod persist;
pub mod presenter;
pub mod random;
pub mod selection;
pub mod session;

// Re-export commonly used types
pub use catalog::{CatalogError, ItemCatalog, ItemDefinition};
pub use display::{compute_display_state, SlotView};
pub use error::InventoryError;
pub use inventory::{
    Inventory, SampleAssignment, SlotEntry, SlotStore, CURSOR_SLOT, HOTBAR_START, MAIN_SLOTS,
    MAX_STACK_SIZE, SLOT_COUNT,
};
pub use navigator::{columns_for, next_index, Direction, FocusGrid};
pub use persist::{
    decode_inventory, encode_inventory, FileStore, KeyValueStore, MemoryStore, StoreError,
    INVENTORY_KEY,
};
pub use presenter::{Notification, Presenter, DEFAULT_NOTIFICATION_DURATION};
pub use random::{RandomSource, RngSource};
pub use selection::{Selection, HOTBAR_SIZE};
pub use session::{Command, Flow, InventorySession, SessionOptions};
