//! Render projection from inventory state to per-slot view models.
//!
//! Presenters draw from these values only; nothing is ever read back from the
//! rendered view.

use serde::Serialize;

use crate::inventory::{Inventory, SLOT_COUNT};

/// What a presenter needs to draw one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    /// Stack count to display, `None` for a blank slot.
    pub label: Option<u32>,
    /// Whether the slot carries the selection highlight.
    pub selected: bool,
    /// Item id of the occupying entry.
    pub item_id: Option<String>,
}

impl SlotView {
    /// Text label (count or blank).
    pub fn label_text(&self) -> String {
        self.label.map(|count| count.to_string()).unwrap_or_default()
    }
}

/// View model for a single slot. `index` must be below [`SLOT_COUNT`].
pub fn slot_view(inventory: &Inventory, index: usize) -> SlotView {
    let entry = inventory.store().slots()[index].as_ref();
    SlotView {
        label: entry.map(|e| e.count()),
        selected: index == inventory.selected_slot(),
        item_id: entry.map(|e| e.item_id().to_string()),
    }
}

/// View models for every slot in index order.
pub fn compute_display_state(inventory: &Inventory) -> Vec<SlotView> {
    (0..SLOT_COUNT)
        .map(|index| slot_view(inventory, index))
        .collect()
}
