//! Persistence for ration cards.
//!
//! The whole collection is one JSON array kept under a single key. Every
//! change reads the array, edits it and writes it back in one go, so each
//! operation is all-or-nothing from the caller's side. Two processes writing
//! the same slot race with last write wins.
//!
//! [`CardStore`] only asks a backend to read and write the raw slot; the
//! collection operations are provided on top so all backends behave the
//! same way.

mod memory;
pub mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use tracing::{debug, info};

use crate::card::RationCard;
use crate::error::{Error, Result};
use crate::rules;

/// Key under which the card array is persisted.
pub const SLOT_KEY: &str = "ration_cards_db";

/// A durable home for the card collection.
pub trait CardStore {
    /// Read the raw slot, `None` if nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read_slot(&self) -> Result<Option<String>>;

    /// Overwrite the raw slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write_slot(&self, value: &str) -> Result<()>;

    /// All persisted cards in stored order, empty if none were saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if the slot holds something other
    /// than a card array, or a backend error.
    fn get_all(&self) -> Result<Vec<RationCard>> {
        match self.read_slot()? {
            Some(raw) => decode(&raw),
            None => Ok(Vec::new()),
        }
    }

    /// Look up one card by id.
    ///
    /// # Errors
    ///
    /// Same as [`CardStore::get_all`].
    fn get(&self, id: &str) -> Result<Option<RationCard>> {
        Ok(self.get_all()?.into_iter().find(|card| card.id == id))
    }

    /// Insert a card, or replace the card with the same id where it stands.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the card breaks a record invariant;
    /// nothing is written in that case.
    fn upsert(&self, card: &RationCard) -> Result<()> {
        rules::validate(card)?;

        let mut cards = self.get_all()?;
        if let Some(existing) = cards.iter_mut().find(|c| c.id == card.id) {
            debug!("Replacing card {}", card.id);
            *existing = card.clone();
        } else {
            debug!("Appending card {}", card.id);
            cards.push(card.clone());
        }

        self.write_slot(&encode(&cards)?)
    }

    /// Delete every card with the given id.
    ///
    /// Returns `true` if anything was removed. An unknown id leaves the
    /// stored collection as it was.
    ///
    /// # Errors
    ///
    /// Same as [`CardStore::get_all`], plus backend write errors.
    fn remove(&self, id: &str) -> Result<bool> {
        let cards = self.get_all()?;
        let before = cards.len();
        let kept: Vec<RationCard> = cards.into_iter().filter(|c| c.id != id).collect();
        let removed = kept.len() != before;

        self.write_slot(&encode(&kept)?)?;
        if removed {
            debug!("Removed card {}", id);
        }
        Ok(removed)
    }

    /// Overwrite the whole collection. Cards are stored as given.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn replace_all(&self, cards: &[RationCard]) -> Result<()> {
        self.write_slot(&encode(cards)?)?;
        info!("Replaced card collection with {} cards", cards.len());
        Ok(())
    }
}

/// Parse the slot contents. Blank text counts as an empty collection.
fn decode(raw: &str) -> Result<Vec<RationCard>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|source| Error::CorruptStore {
        key: SLOT_KEY,
        source,
    })
}

fn encode(cards: &[RationCard]) -> Result<String> {
    Ok(serde_json::to_string(cards)?)
}
