//! Backup export and import.
//!
//! An export is the stored card array pretty-printed to a dated JSON file.
//! An import reads such a file back and, once confirmed, replaces the whole
//! collection with it. A file that does not parse, or whose top level is not
//! an array, is rejected before anything is asked or written.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use tracing::{info, warn};

use crate::card::RationCard;
use crate::error::{Error, Result};
use crate::store::CardStore;

/// Prefix of every export file name.
pub const EXPORT_FILE_PREFIX: &str = "back_tamween_";

/// A yes/no gate in front of destructive operations.
pub trait Confirm {
    /// Ask the question; `true` means go ahead.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A gate that always says yes, for `--yes` on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// What an import did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The collection was replaced with this many cards.
    Imported(usize),
    /// The user declined; nothing changed.
    Declined,
}

/// File name for an export taken on `date`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}{}.json", date.format("%Y-%m-%d"))
}

/// Render cards exactly as they are persisted, pretty-printed.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_json(cards: &[RationCard]) -> Result<String> {
    Ok(serde_json::to_string_pretty(cards)?)
}

/// Write the current collection to a dated file in `dir`.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the file cannot be
/// written.
pub fn export_to_dir(store: &dyn CardStore, dir: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
    let cards = store.get_all()?;
    let body = export_json(&cards)?;

    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let path = dir.join(export_file_name(now.date_naive()));
    std::fs::write(&path, body)?;
    info!("Exported {} cards to {}", cards.len(), path.display());
    Ok(path)
}

/// Parse an import file.
///
/// # Errors
///
/// Returns [`Error::Json`] if the text is not valid JSON or the array
/// elements are not cards, and [`Error::ImportNotArray`] if the top-level
/// value is not an array.
pub fn parse_import(text: &str) -> Result<Vec<RationCard>> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_array() {
        return Err(Error::ImportNotArray {
            found: json_kind(&value),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Replace the stored collection with the cards in `text`, if confirmed.
///
/// The text is parsed before `confirm` is consulted, so a bad file never
/// prompts and never writes.
///
/// # Errors
///
/// Returns the [`parse_import`] errors, or a store write error.
pub fn import(
    store: &dyn CardStore,
    text: &str,
    confirm: &mut dyn Confirm,
) -> Result<ImportOutcome> {
    let cards = parse_import(text)?;

    let prompt = match store.get_all() {
        Ok(current) => format!(
            "Replace all {} stored cards with {} cards from the import?",
            current.len(),
            cards.len()
        ),
        Err(e) => {
            warn!("Stored cards are unreadable, import will replace them: {e}");
            format!(
                "Stored cards are unreadable. Replace them with {} cards from the import?",
                cards.len()
            )
        }
    };

    if !confirm.confirm(&prompt) {
        info!("Import declined");
        return Ok(ImportOutcome::Declined);
    }

    store.replace_all(&cards)?;
    Ok(ImportOutcome::Imported(cards.len()))
}

/// Read `path` and [`import`] it.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, otherwise as [`import`].
pub fn import_file(
    store: &dyn CardStore,
    path: &Path,
    confirm: &mut dyn Confirm,
) -> Result<ImportOutcome> {
    let text = std::fs::read_to_string(path)?;
    import(store, &text, confirm)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardDraft;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 21, 45, 0).unwrap()
    }

    fn card(name: &str, paid: bool) -> RationCard {
        RationCard::from_draft(
            CardDraft {
                owner_name: name.to_string(),
                members_count: 3,
                withdrawn_loaves: 20,
                is_paid: paid,
                paid_amount: if paid { 4.0 } else { 0.0 },
                notes: "note".to_string(),
            },
            None,
            now(),
        )
    }

    fn seeded(cards: &[RationCard]) -> MemoryStore {
        let store = MemoryStore::new();
        store.replace_all(cards).unwrap();
        store
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(export_file_name(date), "back_tamween_2024-03-05.json");
    }

    #[test]
    fn test_export_json_is_pretty_array() {
        let body = export_json(&[card("A", false)]).unwrap();
        assert!(body.starts_with('['));
        assert!(body.contains('\n'));
        assert!(body.contains("\"ownerName\": \"A\""));
    }

    #[test]
    fn test_export_empty() {
        assert_eq!(export_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_parse_import_rejects_object() {
        let err = parse_import(r#"{"a":1}"#).unwrap_err();
        assert!(matches!(err, Error::ImportNotArray { found: "an object" }));
    }

    #[test]
    fn test_parse_import_rejects_garbage() {
        let err = parse_import("not json at all").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_parse_import_rejects_wrong_elements() {
        let err = parse_import("[1, 2, 3]").unwrap_err();
        assert!(err.is_import_error());
    }

    #[test]
    fn test_round_trip() {
        let original = vec![card("A", false), card("B", true)];
        let source = seeded(&original);
        let body = export_json(&source.get_all().unwrap()).unwrap();

        let target = seeded(&[card("Old", false)]);
        let outcome = import(&target, &body, &mut AssumeYes).unwrap();

        assert_eq!(outcome, ImportOutcome::Imported(2));
        assert_eq!(target.get_all().unwrap(), original);
    }

    #[test]
    fn test_round_trip_keeps_paid_amount_bits() {
        let amounts = [
            246.847_319_692_392_38,
            0.1 + 0.2,
            1.0 / 3.0,
            9_007_199_254.740_993,
            5e-324,
            f64::MAX,
        ];
        let original: Vec<RationCard> = amounts
            .iter()
            .map(|&amount| {
                let mut c = card("Paid", true);
                c.paid_amount = amount;
                c
            })
            .collect();

        let target = MemoryStore::new();
        let body = export_json(&original).unwrap();
        import(&target, &body, &mut AssumeYes).unwrap();

        let restored = target.get_all().unwrap();
        for (before, after) in original.iter().zip(&restored) {
            assert_eq!(before.paid_amount.to_bits(), after.paid_amount.to_bits());
        }
        assert_eq!(restored, original);
    }

    #[test]
    fn test_import_non_array_leaves_store_untouched() {
        let existing = vec![card("A", false)];
        let store = seeded(&existing);
        let before = store.raw();
        let mut asked = false;

        let result = import(&store, r#"{"a":1}"#, &mut |_: &str| {
            asked = true;
            true
        });

        assert!(result.is_err());
        assert!(!asked);
        assert_eq!(store.raw(), before);
        assert_eq!(store.get_all().unwrap(), existing);
    }

    #[test]
    fn test_import_declined_leaves_store_untouched() {
        let existing = vec![card("A", false)];
        let store = seeded(&existing);
        let body = export_json(&[card("B", true)]).unwrap();

        let outcome = import(&store, &body, &mut |_: &str| false).unwrap();

        assert_eq!(outcome, ImportOutcome::Declined);
        assert_eq!(store.get_all().unwrap(), existing);
    }

    #[test]
    fn test_import_prompt_mentions_counts() {
        let store = seeded(&[card("A", false), card("B", false)]);
        let body = export_json(&[card("C", true)]).unwrap();
        let mut seen = String::new();

        import(&store, &body, &mut |p: &str| {
            seen = p.to_string();
            false
        })
        .unwrap();

        assert!(seen.contains("all 2 stored cards"));
        assert!(seen.contains("1 cards"));
    }

    #[test]
    fn test_import_replaces_corrupt_store() {
        let store = MemoryStore::with_raw("{broken");
        let body = export_json(&[card("A", false)]).unwrap();

        let outcome = import(&store, &body, &mut AssumeYes).unwrap();
        assert_eq!(outcome, ImportOutcome::Imported(1));
        assert_eq!(store.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_export_to_dir_and_import_file() {
        let dir = std::env::temp_dir().join(format!("tamween_export_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let original = vec![card("A", false), card("B", true)];
        let source = seeded(&original);

        let path = export_to_dir(&source, &dir, now()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "back_tamween_2024-03-10.json"
        );

        let target = MemoryStore::new();
        let outcome = import_file(&target, &path, &mut AssumeYes).unwrap();
        assert_eq!(outcome, ImportOutcome::Imported(2));
        assert_eq!(target.get_all().unwrap(), original);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
