//! End-to-end session scenarios driven through the public command surface.

use slotgrid_core::{
    Command, Direction, Flow, InventoryError, InventorySession, ItemCatalog, KeyValueStore,
    MemoryStore, SessionOptions, SlotEntry, INVENTORY_KEY, MAX_STACK_SIZE, SLOT_COUNT,
};
use slotgrid_testkit::{FailingStore, RecordingPresenter, ScriptedRandom};

type TestSession<S = MemoryStore> = InventorySession<RecordingPresenter, S, ScriptedRandom>;

fn empty_options() -> SessionOptions {
    SessionOptions {
        sample_fill: None,
        ..SessionOptions::default()
    }
}

fn open_with<S: KeyValueStore>(store: S, draws: Vec<usize>) -> TestSession<S> {
    InventorySession::open(
        ItemCatalog::builtin(),
        RecordingPresenter::new(1024),
        store,
        ScriptedRandom::new(draws),
        empty_options(),
    )
}

fn open_empty(draws: Vec<usize>) -> TestSession {
    let mut session = open_with(MemoryStore::new(), draws);
    session.presenter_mut().clear();
    session
}

#[test]
fn hotbar_three_selects_slot_29() {
    let mut session = open_empty(vec![]);
    assert_eq!(session.inventory().selected_slot(), 0);

    session.dispatch(Command::HotbarDigit(3)).unwrap();

    assert_eq!(session.inventory().selected_slot(), 29);
    assert!(session.presenter().view(29).unwrap().selected);
    assert!(!session.presenter().view(0).unwrap().selected);
}

#[test]
fn hotbar_selects_empty_slots_and_rejects_bad_digits() {
    let mut session = open_empty(vec![]);
    for digit in 1..=9u8 {
        session.dispatch(Command::HotbarDigit(digit)).unwrap();
        assert_eq!(session.inventory().selected_slot(), 26 + digit as usize);
    }
    assert!(matches!(
        session.dispatch(Command::HotbarDigit(0)),
        Err(InventoryError::HotbarOutOfRange { digit: 0 })
    ));
    assert_eq!(session.inventory().selected_slot(), 35);
}

#[test]
fn click_on_empty_slot_is_a_no_op() {
    let mut session = open_empty(vec![]);
    session.dispatch(Command::PrimaryActivate(10)).unwrap();

    assert_eq!(session.inventory().selected_slot(), 0);
    assert!(session.presenter().notifications().is_empty());
    assert!(session.presenter().events().is_empty());
}

#[test]
fn right_click_twice_overwrites_independently() {
    // Draws: (item index, count - 1) per fill.
    let mut session = open_empty(vec![2, 9, 11, 0]);

    session.dispatch(Command::SecondaryActivate(5)).unwrap();
    assert_eq!(
        session.inventory().get(5).unwrap(),
        Some(&SlotEntry::new("grass", 10).unwrap())
    );

    session.dispatch(Command::SecondaryActivate(5)).unwrap();
    let entry = session.inventory().get(5).unwrap().unwrap();
    assert_eq!(entry.item_id(), "diamond_ore");
    assert_eq!(entry.count(), 1);
    assert!((1..=MAX_STACK_SIZE).contains(&entry.count()));

    assert_eq!(
        session.presenter().notifications(),
        vec!["Added: Grass Block", "Added: Diamond Ore"]
    );
    assert_eq!(session.presenter().rendered_slots(), vec![5, 5]);
}

#[test]
fn right_click_caps_count_at_64() {
    let mut session = open_empty(vec![0, 63]);
    session.dispatch(Command::SecondaryActivate(36)).unwrap();
    assert_eq!(session.inventory().get(36).unwrap().unwrap().count(), 64);
}

#[test]
fn click_then_right_click_does_not_move_selection() {
    let mut session = open_empty(vec![4, 20]);
    session.dispatch(Command::SecondaryActivate(12)).unwrap();
    assert_eq!(session.inventory().selected_slot(), 0);

    session.dispatch(Command::PrimaryActivate(12)).unwrap();
    assert_eq!(session.inventory().selected_slot(), 12);
    assert_eq!(
        session.presenter().notifications(),
        vec!["Added: Oak Planks", "Selected: Oak Planks"]
    );
    assert_eq!(session.presenter().view(12).unwrap().label, Some(21));
}

#[test]
fn clear_all_empties_everything_and_selects_zero() {
    let mut session = open_with(MemoryStore::new(), vec![]);
    session.select_hotbar(5).unwrap();
    session
        .dispatch(Command::SecondaryActivate(20))
        .expect("fill works");
    session.presenter_mut().clear();

    session.dispatch(Command::ClearAll).unwrap();

    for index in 0..SLOT_COUNT {
        assert_eq!(session.inventory().get(index).unwrap(), None);
        assert_eq!(session.presenter().view(index).unwrap().label, None);
    }
    assert_eq!(session.inventory().selected_slot(), 0);
    assert_eq!(session.presenter().rendered_slots().len(), SLOT_COUNT);
    assert_eq!(session.presenter().notifications(), vec!["Inventory cleared!"]);
}

#[test]
fn close_only_notifies() {
    let mut session = open_empty(vec![1, 1]);
    session.dispatch(Command::SecondaryActivate(3)).unwrap();
    let before = session.inventory().clone();
    session.presenter_mut().clear();

    assert_eq!(session.dispatch(Command::Close).unwrap(), Flow::Continue);

    assert_eq!(session.inventory(), &before);
    assert_eq!(
        session.presenter().notifications(),
        vec!["Inventory closed (E to open)"]
    );
    assert!(session.presenter().rendered_slots().is_empty());
}

#[test]
fn focus_navigation_in_narrow_viewport() {
    let mut session = open_empty(vec![]);
    // 281..=360 px -> 4 columns.
    session.presenter_mut().set_viewport_width(320);

    session.dispatch(Command::Directional(Direction::Right)).unwrap();
    assert_eq!(session.focus().focused(), Some(1));
    session.dispatch(Command::Directional(Direction::Down)).unwrap();
    assert_eq!(session.focus().focused(), Some(5));
    session.dispatch(Command::Directional(Direction::Up)).unwrap();
    assert_eq!(session.focus().focused(), Some(1));
    session.dispatch(Command::Directional(Direction::Up)).unwrap();
    assert_eq!(session.focus().focused(), Some(1));

    assert_eq!(session.presenter().focus_calls(), vec![1, 5, 1]);
}

#[test]
fn column_count_tracks_resizes_between_moves() {
    let mut session = open_empty(vec![]);
    session.dispatch(Command::Directional(Direction::Down)).unwrap();
    assert_eq!(session.focus().focused(), Some(9));

    session.presenter_mut().set_viewport_width(250);
    session.dispatch(Command::Directional(Direction::Down)).unwrap();
    assert_eq!(session.focus().focused(), Some(12));
}

#[test]
fn focus_never_leaves_the_grid() {
    let mut session = open_empty(vec![]);
    session.dispatch(Command::Directional(Direction::Left)).unwrap();
    session.dispatch(Command::Directional(Direction::Up)).unwrap();
    assert_eq!(session.focus().focused(), Some(0));

    for _ in 0..10 {
        session.dispatch(Command::Directional(Direction::Down)).unwrap();
    }
    // 9 columns: 0 -> 9 -> 18 -> 27 -> 36, then blocked.
    assert_eq!(session.focus().focused(), Some(36));
    session.dispatch(Command::Directional(Direction::Right)).unwrap();
    assert_eq!(session.focus().focused(), Some(36));
}

#[test]
fn activate_focused_behaves_like_click() {
    let mut session = open_empty(vec![9, 4]);
    session.dispatch(Command::SecondaryActivate(1)).unwrap();
    session.presenter_mut().clear();

    // Focused cell 0 is empty: nothing happens.
    session.dispatch(Command::ActivateFocused).unwrap();
    assert!(session.presenter().events().is_empty());

    session.dispatch(Command::Directional(Direction::Right)).unwrap();
    session.dispatch(Command::ActivateFocused).unwrap();
    assert_eq!(session.inventory().selected_slot(), 1);
    assert_eq!(session.presenter().notifications(), vec!["Selected: Coal Ore"]);
}

#[test]
fn sample_fill_runs_when_nothing_is_saved() {
    let session: TestSession = InventorySession::open(
        ItemCatalog::builtin(),
        RecordingPresenter::default(),
        MemoryStore::new(),
        ScriptedRandom::default(),
        SessionOptions::default(),
    );

    let views: Vec<_> = (0..SLOT_COUNT)
        .map(|i| session.presenter().view(i).unwrap().label)
        .collect();
    assert_eq!(views[0], Some(64));
    assert_eq!(views[1], Some(64));
    assert_eq!(views[3], Some(32));
    assert_eq!(views[4], Some(48));
    assert_eq!(views[28], Some(1));
    assert_eq!(views[29], Some(12));
    assert_eq!(views.iter().filter(|v| v.is_some()).count(), 6);
    assert_eq!(session.presenter().focus_calls(), vec![0]);
}

#[test]
fn save_writes_payload_and_notifies() {
    let mut session = open_empty(vec![5, 30]);
    session.dispatch(Command::SecondaryActivate(7)).unwrap();
    session.dispatch(Command::Save).unwrap();

    let bytes = session.store().get(INVENTORY_KEY).expect("payload stored");
    let value: serde_json::Value = serde_json::from_slice(bytes).unwrap();
    assert_eq!(value.as_array().unwrap().len(), SLOT_COUNT);
    assert_eq!(value[7]["id"], "sand");
    assert_eq!(value[7]["count"], 31);
    assert_eq!(
        session.presenter().notifications(),
        vec!["Added: Sand", "Inventory saved!"]
    );
}

#[test]
fn failed_save_is_reported_once_and_state_kept() {
    let mut session = open_with(FailingStore::new(), vec![0, 0]);
    session.dispatch(Command::SecondaryActivate(0)).unwrap();
    let before = session.inventory().clone();
    session.presenter_mut().clear();

    let err = session.dispatch(Command::Save).unwrap_err();
    assert!(matches!(err, InventoryError::Store(_)));
    assert_eq!(session.store().save_attempts(), 1);
    assert_eq!(session.presenter().notifications(), vec!["Failed to save inventory"]);
    assert_eq!(session.inventory(), &before);
}

#[test]
fn save_then_load_restores_after_changes() {
    let mut session = open_empty(vec![12, 7, 3, 40]);
    session.dispatch(Command::SecondaryActivate(30)).unwrap();
    session.dispatch(Command::Save).unwrap();
    let saved = session.inventory().store().clone();

    session.dispatch(Command::SecondaryActivate(31)).unwrap();
    session.dispatch(Command::HotbarDigit(5)).unwrap();
    session.dispatch(Command::Load).unwrap();

    assert_eq!(session.inventory().store(), &saved);
    assert_eq!(session.inventory().selected_slot(), 0);
    assert_eq!(session.presenter().view(31).unwrap().label, None);
    assert_eq!(
        session.presenter().notifications().last(),
        Some(&"Inventory loaded!")
    );
}

#[test]
fn corrupt_payload_at_startup_starts_empty_and_notifies() {
    let mut store = MemoryStore::new();
    store.insert(INVENTORY_KEY, "[null, null]");

    let session: TestSession = InventorySession::open(
        ItemCatalog::builtin(),
        RecordingPresenter::default(),
        store,
        ScriptedRandom::default(),
        SessionOptions::default(),
    );

    assert!(session.inventory().store().is_empty());
    assert_eq!(
        session.presenter().notifications(),
        vec!["Saved inventory was corrupt; starting empty"]
    );
}

#[test]
fn corrupt_payload_on_load_keeps_current_state() {
    let mut session = open_empty(vec![3, 3]);
    session.dispatch(Command::SecondaryActivate(9)).unwrap();
    session.dispatch(Command::HotbarDigit(1)).unwrap();
    let before = session.inventory().clone();

    let truncated = format!("[{}]", vec!["null"; SLOT_COUNT - 1].join(","));
    session.store_mut().insert(INVENTORY_KEY, truncated);

    let err = session.dispatch(Command::Load).unwrap_err();
    assert!(err.is_corrupt());
    assert_eq!(session.inventory(), &before);
    assert_eq!(
        session.presenter().notifications().last(),
        Some(&"Saved inventory is corrupt")
    );
}

#[test]
fn load_without_saved_payload_is_harmless() {
    let mut session = open_empty(vec![]);
    session.dispatch(Command::Load).unwrap();
    assert_eq!(session.presenter().notifications(), vec!["No saved inventory"]);
}

#[test]
fn sample_fill_with_foreign_catalog_starts_empty() {
    let catalog = ItemCatalog::from_json_str(
        r##"[{"id": "glass", "name": "Glass", "color": "#C0E0F0"}]"##,
    )
    .unwrap();
    let mut session: TestSession = InventorySession::open(
        catalog,
        RecordingPresenter::default(),
        MemoryStore::new(),
        ScriptedRandom::new([0, 6]),
        SessionOptions::default(),
    );

    assert!(session.inventory().store().is_empty());
    assert_eq!(
        session.presenter().notifications(),
        vec!["Sample items unavailable; starting empty"]
    );
    assert_eq!(session.presenter().rendered_slots().len(), SLOT_COUNT);

    session.dispatch(Command::SecondaryActivate(2)).unwrap();
    assert_eq!(
        session.inventory().get(2).unwrap(),
        Some(&SlotEntry::new("glass", 7).unwrap())
    );
}
