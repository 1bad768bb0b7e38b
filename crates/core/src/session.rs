//! Command dispatch.
//!
//! [`InventorySession`] owns the inventory, the item catalog and the focus grid,
//! and turns abstract host commands into mutations followed by render and
//! notification calls on the [`Presenter`]. Everything runs synchronously on the
//! caller's thread.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::catalog::ItemCatalog;
use crate::display::{compute_display_state, slot_view};
use crate::error::InventoryError;
use crate::inventory::{Inventory, SampleAssignment, SLOT_COUNT};
use crate::navigator::{Direction, FocusGrid};
use crate::persist::{decode_inventory, encode_inventory, KeyValueStore, INVENTORY_KEY};
use crate::presenter::{Notification, Presenter, DEFAULT_NOTIFICATION_DURATION};
use crate::random::RandomSource;

/// Abstract input commands produced by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Click on a slot: select it if occupied.
    PrimaryActivate(usize),
    /// Right-click on a slot: debug fill with a random item.
    SecondaryActivate(usize),
    /// Digit key 1-9.
    HotbarDigit(u8),
    /// Close key.
    Close,
    /// Arrow / d-pad input.
    Directional(Direction),
    /// Enter / OK on the focused cell.
    ActivateFocused,
    /// Persist the inventory.
    Save,
    /// Replace the inventory with the persisted one.
    Load,
    /// Empty the inventory. The host must have confirmed this already.
    ClearAll,
    /// Softkey reload.
    Reload,
    /// Softkey exit.
    Exit,
}

/// What the host should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep processing input.
    Continue,
    /// Host-level reload requested.
    Reload,
    /// Host-level exit requested.
    Exit,
}

/// Session construction options.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// On-screen lifetime attached to every notification.
    pub notification_duration: Duration,
    /// Startup assignments applied when nothing was saved. `None` starts empty.
    pub sample_fill: Option<Vec<SampleAssignment>>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            notification_duration: DEFAULT_NOTIFICATION_DURATION,
            sample_fill: Some(SampleAssignment::defaults()),
        }
    }
}

/// Owned inventory state wired to a presenter, a store and a random source.
pub struct InventorySession<P, S, R> {
    inventory: Inventory,
    catalog: ItemCatalog,
    focus: FocusGrid,
    presenter: P,
    store: S,
    random: R,
    options: SessionOptions,
}

impl<P, S, R> InventorySession<P, S, R>
where
    P: Presenter,
    S: KeyValueStore,
    R: RandomSource,
{
    /// Build a session, restore any saved inventory and render every slot.
    ///
    /// A missing payload falls back to the sample fill. A corrupt or unreadable
    /// payload, or a sample fill naming items the catalog lacks, leaves the
    /// inventory empty and notifies the user once.
    pub fn open(
        catalog: ItemCatalog,
        presenter: P,
        store: S,
        random: R,
        options: SessionOptions,
    ) -> Self {
        let mut session = Self {
            inventory: Inventory::new(),
            catalog,
            focus: FocusGrid::new(SLOT_COUNT),
            presenter,
            store,
            random,
            options,
        };

        match session.store.load(INVENTORY_KEY) {
            Ok(Some(bytes)) => match decode_inventory(&bytes, &session.catalog) {
                Ok(slots) => {
                    info!(occupied = slots.occupied(), "restored saved inventory");
                    session.inventory.replace_store(slots);
                }
                Err(err) => {
                    warn!("discarding saved inventory: {err}");
                    session.notify("Saved inventory was corrupt; starting empty");
                }
            },
            Ok(None) => {
                if let Some(samples) = session.options.sample_fill.clone() {
                    // fill_sample validates before writing, so failure leaves every slot empty.
                    if let Err(err) = session.inventory.fill_sample(&session.catalog, &samples) {
                        warn!("skipping sample fill: {err}");
                        session.notify("Sample items unavailable; starting empty");
                    }
                }
            }
            Err(err) => {
                warn!("failed to read saved inventory: {err}");
                session.notify("Failed to load inventory; starting empty");
            }
        }

        session.render_all();
        if let Some(cell) = session.focus.focused() {
            session.presenter.focus(cell);
        }
        session
    }

    /// Run one host command.
    pub fn dispatch(&mut self, command: Command) -> Result<Flow, InventoryError> {
        debug!(?command, "dispatch");
        match command {
            Command::PrimaryActivate(index) => self.primary_activate(index)?,
            Command::SecondaryActivate(index) => self.secondary_activate(index)?,
            Command::HotbarDigit(digit) => self.select_hotbar(digit)?,
            Command::Close => self.close(),
            Command::Directional(direction) => {
                self.move_focus(direction);
            }
            Command::ActivateFocused => self.activate_focused()?,
            Command::Save => self.save()?,
            Command::Load => self.load()?,
            Command::ClearAll => self.clear_all(),
            Command::Reload => return Ok(Flow::Reload),
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Click: select an occupied slot and announce it. Empty slots are ignored.
    pub fn primary_activate(&mut self, index: usize) -> Result<(), InventoryError> {
        let Some(entry) = self.inventory.get(index)? else {
            return Ok(());
        };
        let message = format!("Selected: {}", self.display_name(entry.item_id()));
        self.select_slot(index)?;
        self.notify(message);
        Ok(())
    }

    /// Right-click: overwrite the slot with a random item and count.
    pub fn secondary_activate(&mut self, index: usize) -> Result<(), InventoryError> {
        let name = self
            .inventory
            .random_fill(index, &self.catalog, &mut self.random)?
            .name
            .clone();
        self.render_slot(index);
        self.notify(format!("Added: {name}"));
        Ok(())
    }

    /// Select `index` regardless of contents and re-render the highlight change.
    pub fn select_slot(&mut self, index: usize) -> Result<(), InventoryError> {
        let previous = self.inventory.select_slot(index)?;
        self.render_selection_change(previous, index);
        Ok(())
    }

    /// Digit key: select hotbar slot `27 + digit - 1` regardless of contents.
    pub fn select_hotbar(&mut self, digit: u8) -> Result<(), InventoryError> {
        let previous = self.inventory.select_hotbar(digit)?;
        let current = self.inventory.selected_slot();
        self.render_selection_change(previous, current);
        Ok(())
    }

    /// Close key: notification only.
    pub fn close(&mut self) {
        info!("closing inventory");
        self.notify("Inventory closed (E to open)");
    }

    /// Move keyboard focus using the current viewport width.
    ///
    /// Returns the new focus cell, or `None` when the move was ignored.
    pub fn move_focus(&mut self, direction: Direction) -> Option<usize> {
        let width = self.presenter.viewport_width();
        let cell = self.focus.move_focus(direction, width)?;
        self.presenter.focus(cell);
        Some(cell)
    }

    /// Enter / OK: primary activation of the focused cell.
    pub fn activate_focused(&mut self) -> Result<(), InventoryError> {
        match self.focus.focused() {
            Some(cell) => self.primary_activate(cell),
            None => Ok(()),
        }
    }

    /// Persist the whole inventory. Failures are notified once and returned.
    pub fn save(&mut self) -> Result<(), InventoryError> {
        let result = encode_inventory(self.inventory.store(), &self.catalog)
            .and_then(|bytes| self.store.save(INVENTORY_KEY, &bytes));
        match result {
            Ok(()) => {
                info!(occupied = self.inventory.store().occupied(), "inventory saved");
                self.notify("Inventory saved!");
                Ok(())
            }
            Err(err) => {
                warn!("failed to save inventory: {err}");
                self.notify("Failed to save inventory");
                Err(err.into())
            }
        }
    }

    /// Replace the inventory with the persisted one.
    ///
    /// A corrupt payload leaves the in-memory inventory untouched.
    pub fn load(&mut self) -> Result<(), InventoryError> {
        let bytes = match self.store.load(INVENTORY_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                self.notify("No saved inventory");
                return Ok(());
            }
            Err(err) => {
                warn!("failed to read saved inventory: {err}");
                self.notify("Failed to load inventory");
                return Err(err.into());
            }
        };

        match decode_inventory(&bytes, &self.catalog) {
            Ok(slots) => {
                self.inventory.replace_store(slots);
                self.render_all();
                info!("inventory loaded");
                self.notify("Inventory loaded!");
                Ok(())
            }
            Err(err) => {
                warn!("refusing corrupt saved inventory: {err}");
                self.notify("Saved inventory is corrupt");
                Err(err)
            }
        }
    }

    /// Empty every slot and select slot 0. Confirmation is the host's job.
    pub fn clear_all(&mut self) {
        self.inventory.clear_all();
        self.render_all();
        info!("inventory cleared");
        self.notify("Inventory cleared!");
    }

    /// Current inventory state.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Item catalog in use.
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Keyboard focus state.
    pub fn focus(&self) -> &FocusGrid {
        &self.focus
    }

    /// The presenter.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Mutable access to the presenter (e.g. to change its viewport).
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Tear the session down, keeping everything but the in-memory inventory.
    pub fn into_parts(self) -> (ItemCatalog, P, S, R) {
        (self.catalog, self.presenter, self.store, self.random)
    }

    fn display_name(&self, item_id: &str) -> String {
        self.catalog
            .get(item_id)
            .map(|def| def.name.clone())
            .unwrap_or_else(|| item_id.to_string())
    }

    fn notify(&mut self, message: impl Into<String>) {
        let notification =
            Notification::with_duration(message, self.options.notification_duration);
        self.presenter.notify(notification);
    }

    fn render_slot(&mut self, index: usize) {
        let view = slot_view(&self.inventory, index);
        self.presenter.render(index, &view);
    }

    fn render_selection_change(&mut self, previous: usize, current: usize) {
        if previous != current {
            self.render_slot(previous);
        }
        self.render_slot(current);
    }

    fn render_all(&mut self) {
        for (index, view) in compute_display_state(&self.inventory).iter().enumerate() {
            self.presenter.render(index, view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::SlotView;
    use crate::persist::MemoryStore;
    use crate::random::RngSource;

    #[derive(Default)]
    struct Log {
        renders: Vec<usize>,
        notes: Vec<String>,
        focus: Vec<usize>,
        width: u32,
    }

    impl Presenter for Log {
        fn render(&mut self, index: usize, _view: &SlotView) {
            self.renders.push(index);
        }
        fn notify(&mut self, notification: Notification) {
            self.notes.push(notification.message);
        }
        fn focus(&mut self, cell: usize) {
            self.focus.push(cell);
        }
        fn viewport_width(&self) -> u32 {
            self.width
        }
    }

    fn session() -> InventorySession<Log, MemoryStore, RngSource> {
        let log = Log {
            width: 1024,
            ..Log::default()
        };
        InventorySession::open(
            ItemCatalog::builtin(),
            log,
            MemoryStore::new(),
            RngSource::seeded(3),
            SessionOptions::default(),
        )
    }

    #[test]
    fn open_renders_everything_and_focuses_first_cell() {
        let s = session();
        assert_eq!(s.presenter().renders.len(), SLOT_COUNT);
        assert_eq!(s.presenter().focus, vec![0]);
        assert_eq!(s.inventory().store().occupied(), 6);
    }

    #[test]
    fn selection_change_renders_old_and_new_slot() {
        let mut s = session();
        s.presenter_mut().renders.clear();
        s.select_hotbar(2).unwrap();
        assert_eq!(s.presenter().renders, vec![0, 28]);
        assert!(s.presenter().notes.is_empty());
    }

    #[test]
    fn click_on_occupied_slot_selects_and_names_it() {
        let mut s = session();
        s.primary_activate(3).unwrap();
        assert_eq!(s.inventory().selected_slot(), 3);
        assert_eq!(s.presenter().notes, vec!["Selected: Oak Log"]);
    }

    #[test]
    fn reload_and_exit_are_reported_to_host() {
        let mut s = session();
        let before = s.inventory().clone();
        assert_eq!(s.dispatch(Command::Reload).unwrap(), Flow::Reload);
        assert_eq!(s.dispatch(Command::Exit).unwrap(), Flow::Exit);
        assert_eq!(s.inventory(), &before);
    }

    #[test]
    fn out_of_range_commands_fail_without_side_effects() {
        let mut s = session();
        s.presenter_mut().renders.clear();
        assert!(s.dispatch(Command::PrimaryActivate(37)).is_err());
        assert!(s.dispatch(Command::SecondaryActivate(99)).is_err());
        assert!(s.dispatch(Command::HotbarDigit(0)).is_err());
        assert!(s.dispatch(Command::HotbarDigit(10)).is_err());
        assert!(s.presenter().renders.is_empty());
        assert!(s.presenter().notes.is_empty());
        assert_eq!(s.inventory().selected_slot(), 0);
    }
}
