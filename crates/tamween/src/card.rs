//! Ration card records.
//!
//! A [`RationCard`] is one household's entry: who holds the card, how many
//! people it feeds, how much bread was drawn against it and whether that was
//! paid for. [`CardDraft`] is the editable part of a card, the shape of the
//! add/edit form, and [`RationCard::from_draft`] is the save step that stamps
//! identity and timestamps onto it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A ration card record.
///
/// Field names serialize in camelCase; this is both the persisted layout and
/// the export file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RationCard {
    /// Opaque unique identifier, fixed at creation.
    pub id: String,

    /// Name of the card holder.
    pub owner_name: String,

    /// Number of household members on the card.
    pub members_count: u32,

    /// Loaves drawn in the current withdrawal window.
    pub withdrawn_loaves: u32,

    /// When the card was last saved.
    pub last_withdrawal_date: DateTime<Utc>,

    /// Whether the withdrawal has been paid for.
    pub is_paid: bool,

    /// Amount paid; only meaningful when `is_paid` is set.
    #[serde(default)]
    pub paid_amount: f64,

    /// Free-form notes.
    #[serde(default)]
    pub notes: String,

    /// When the card was first recorded, fixed at creation.
    pub created_at: DateTime<Utc>,
}

/// The user-editable fields of a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    /// Name of the card holder.
    pub owner_name: String,
    /// Number of household members.
    pub members_count: u32,
    /// Loaves drawn.
    pub withdrawn_loaves: u32,
    /// Payment status.
    pub is_paid: bool,
    /// Amount paid.
    pub paid_amount: f64,
    /// Free-form notes.
    pub notes: String,
}

impl Default for CardDraft {
    fn default() -> Self {
        Self {
            owner_name: String::new(),
            members_count: 1,
            withdrawn_loaves: 0,
            is_paid: false,
            paid_amount: 0.0,
            notes: String::new(),
        }
    }
}

impl CardDraft {
    /// Pre-fill a draft from an existing card, for editing.
    #[must_use]
    pub fn from_card(card: &RationCard) -> Self {
        Self {
            owner_name: card.owner_name.clone(),
            members_count: card.members_count,
            withdrawn_loaves: card.withdrawn_loaves,
            is_paid: card.is_paid,
            paid_amount: card.paid_amount,
            notes: card.notes.clone(),
        }
    }
}

impl RationCard {
    /// Build the card to save from a submitted draft.
    ///
    /// With no `existing` card a fresh id is generated and `created_at` is
    /// `now`; otherwise both are carried over. `last_withdrawal_date` is
    /// always `now`: every save counts as a new withdrawal, even one that
    /// only changes payment status or notes.
    #[must_use]
    pub fn from_draft(draft: CardDraft, existing: Option<&RationCard>, now: DateTime<Utc>) -> Self {
        let (id, created_at) = match existing {
            Some(card) => (card.id.clone(), card.created_at),
            None => (Self::new_id(), now),
        };

        Self {
            id,
            owner_name: draft.owner_name,
            members_count: draft.members_count,
            withdrawn_loaves: draft.withdrawn_loaves,
            last_withdrawal_date: now,
            is_paid: draft.is_paid,
            paid_amount: draft.paid_amount,
            notes: draft.notes,
            created_at,
        }
    }

    /// Generate a new card id.
    #[must_use]
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Amount still owed at the fixed per-loaf rate, zero once paid.
    #[must_use]
    pub fn outstanding_debt(&self) -> f64 {
        if self.is_paid {
            0.0
        } else {
            f64::from(self.withdrawn_loaves) * crate::rules::DEBT_PER_LOAF
        }
    }
}
