//! `tamween` - Offline record keeping for bread-ration card withdrawals
//!
//! This library provides the card model, the withdrawal rules and
//! statistics, the persistent card store, and JSON backup export/import.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod card;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod rules;
pub mod store;
pub mod transfer;
pub mod view;

pub use card::{CardDraft, RationCard};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use rules::{compute_stats, max_withdrawal, validate, Stats};
pub use store::{CardStore, MemoryStore, SqliteStore};
pub use transfer::{AssumeYes, Confirm, ImportOutcome};
