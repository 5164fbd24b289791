//! In-memory card store.

use std::cell::RefCell;

use tracing::trace;

use super::CardStore;
use crate::error::Result;

/// A card store that lives only as long as the value.
///
/// Useful for tests and dry runs. Not shared across threads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose slot already holds `raw`.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
        }
    }

    /// The raw slot contents.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl CardStore for MemoryStore {
    fn read_slot(&self) -> Result<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn write_slot(&self, value: &str) -> Result<()> {
        trace!("Writing {} bytes to memory slot", value.len());
        *self.slot.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}
