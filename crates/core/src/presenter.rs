//! Host-side rendering and notification interface.

use std::time::Duration;

use crate::display::SlotView;

/// Default on-screen lifetime of a notification.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(2);

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text to show.
    pub message: String,
    /// How long the host should keep it visible. Cosmetic only.
    pub duration: Duration,
}

impl Notification {
    /// Notification with the default duration.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_duration(message, DEFAULT_NOTIFICATION_DURATION)
    }

    /// Notification with an explicit duration.
    pub fn with_duration(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            duration,
        }
    }
}

/// Everything the core needs from the host.
///
/// All calls are synchronous and fire-and-forget; implementations must not call
/// back into the session.
pub trait Presenter {
    /// Draw slot `index` in the given state.
    fn render(&mut self, index: usize, view: &SlotView);

    /// Show a transient message. Overlapping notifications may stack.
    fn notify(&mut self, notification: Notification);

    /// Move the visual focus to `cell`.
    fn focus(&mut self, cell: usize);

    /// Current viewport width in pixels, queried on every directional command.
    fn viewport_width(&self) -> u32;
}
