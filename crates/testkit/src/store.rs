use slotgrid_core::{KeyValueStore, StoreError};
use std::io;

/// Store whose writes always fail, optionally serving a fixed payload on reads.
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
    payload: Option<Vec<u8>>,
    save_attempts: usize,
}

impl FailingStore {
    /// Store with nothing to load.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that serves `payload` for every key.
    pub fn with_payload(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: Some(payload.into()),
            save_attempts: 0,
        }
    }

    /// Number of rejected saves so far.
    pub fn save_attempts(&self) -> usize {
        self.save_attempts
    }
}

impl KeyValueStore for FailingStore {
    fn save(&mut self, _key: &str, _bytes: &[u8]) -> Result<(), StoreError> {
        self.save_attempts += 1;
        Err(StoreError::Io(io::Error::new(
            io::ErrorKind::Other,
            "storage quota exceeded",
        )))
    }

    fn load(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.payload.clone())
    }
}
