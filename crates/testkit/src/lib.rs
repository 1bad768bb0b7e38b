#![warn(missing_docs)]
//! Deterministic testing surfaces (recording presenter, scripted randomness, event log).

mod presenter;
mod random;
mod store;

use anyhow::Result;
use serde::Serialize;
use slotgrid_core::SlotView;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use presenter::*;
pub use random::*;
pub use store::*;

/// One call the core made into its presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    /// `render(slot, view)`.
    Render {
        /// Rendered slot index.
        slot: usize,
        /// View model passed in.
        view: SlotView,
    },
    /// `notify(message)`.
    Notify {
        /// Message text.
        message: String,
        /// Requested display duration in milliseconds.
        duration_ms: u64,
    },
    /// `focus(cell)`.
    Focus {
        /// Focused cell.
        cell: usize,
    },
}

/// A sink that writes newline-delimited JSON host events to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &HostEvent) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
