use slotgrid_core::{Notification, Presenter, SlotView, SLOT_COUNT};

use crate::HostEvent;

/// Presenter that records every call for later assertions.
#[derive(Debug, Clone)]
pub struct RecordingPresenter {
    events: Vec<HostEvent>,
    views: Vec<Option<SlotView>>,
    width: u32,
}

impl RecordingPresenter {
    /// Recorder reporting a fixed viewport `width`.
    pub fn new(width: u32) -> Self {
        Self {
            events: Vec::new(),
            views: vec![None; SLOT_COUNT],
            width,
        }
    }

    /// Change the reported viewport width (simulates a resize).
    pub fn set_viewport_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Every recorded call, oldest first.
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Forget recorded calls (the last rendered views are kept).
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Notification messages, oldest first.
    pub fn notifications(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Notify { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Slot indices passed to `render`, oldest first.
    pub fn rendered_slots(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Render { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect()
    }

    /// Cells passed to `focus`, oldest first.
    pub fn focus_calls(&self) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Focus { cell } => Some(*cell),
                _ => None,
            })
            .collect()
    }

    /// Last view rendered for `slot`.
    pub fn view(&self, slot: usize) -> Option<&SlotView> {
        self.views.get(slot).and_then(|view| view.as_ref())
    }
}

impl Default for RecordingPresenter {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, index: usize, view: &SlotView) {
        if let Some(slot) = self.views.get_mut(index) {
            *slot = Some(view.clone());
        }
        self.events.push(HostEvent::Render {
            slot: index,
            view: view.clone(),
        });
    }

    fn notify(&mut self, notification: Notification) {
        self.events.push(HostEvent::Notify {
            message: notification.message,
            duration_ms: notification.duration.as_millis() as u64,
        });
    }

    fn focus(&mut self, cell: usize) {
        self.events.push(HostEvent::Focus { cell });
    }

    fn viewport_width(&self) -> u32 {
        self.width
    }
}
