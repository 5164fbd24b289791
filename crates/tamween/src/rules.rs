//! Withdrawal rules and collection statistics.
//!
//! Each household member may draw five loaves a day over a three day
//! window. Unpaid loaves are costed at a flat rate to estimate what is owed.

use serde::Serialize;

use crate::card::RationCard;
use crate::error::{Error, Result};

/// Loaves each member may draw per day.
pub const LOAVES_PER_PERSON_PER_DAY: u32 = 5;

/// Length of the withdrawal window in days.
pub const MAX_DAYS_WITHDRAWAL: u32 = 3;

/// Loaves each member may draw in one window.
pub const MAX_LOAVES_PER_PERSON: u32 = LOAVES_PER_PERSON_PER_DAY * MAX_DAYS_WITHDRAWAL;

/// Flat price per unpaid loaf used for the debt estimate.
pub const DEBT_PER_LOAF: f64 = 0.20;

/// Most loaves a card with `members_count` members may draw.
#[must_use]
pub fn max_withdrawal(members_count: u32) -> u32 {
    members_count.saturating_mul(MAX_LOAVES_PER_PERSON)
}

/// Check a card against the record invariants.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the first invariant the card breaks.
pub fn validate(card: &RationCard) -> Result<()> {
    if card.id.trim().is_empty() {
        return Err(Error::validation("id must not be empty"));
    }

    if card.owner_name.trim().is_empty() {
        return Err(Error::validation("owner name must not be empty"));
    }

    if card.members_count < 1 {
        return Err(Error::validation("members count must be at least 1"));
    }

    let max = max_withdrawal(card.members_count);
    if card.withdrawn_loaves > max {
        return Err(Error::validation(format!(
            "withdrawn loaves ({}) exceed the maximum of {max} for {} members",
            card.withdrawn_loaves, card.members_count
        )));
    }

    if !card.paid_amount.is_finite() || card.paid_amount < 0.0 {
        return Err(Error::validation(format!(
            "paid amount must be a non-negative number, got {}",
            card.paid_amount
        )));
    }

    Ok(())
}

/// Aggregate figures over a set of cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stats {
    /// Sum of household members.
    pub total_members: u64,
    /// Sum of loaves drawn.
    pub total_loaves: u64,
    /// Number of cards not yet paid.
    pub unpaid_count: usize,
    /// Estimated amount owed across unpaid cards.
    pub estimated_debt: f64,
}

/// Fold a collection into [`Stats`].
///
/// Counts are summed as integers and the debt is priced once at the end, so
/// the result does not depend on the order of `cards`.
#[must_use]
pub fn compute_stats(cards: &[RationCard]) -> Stats {
    let (total_members, total_loaves, unpaid_count, unpaid_loaves) = cards.iter().fold(
        (0u64, 0u64, 0usize, 0u64),
        |(members, loaves, unpaid, unpaid_loaves), card| {
            let drawn = u64::from(card.withdrawn_loaves);
            let members = members + u64::from(card.members_count);
            if card.is_paid {
                (members, loaves + drawn, unpaid, unpaid_loaves)
            } else {
                (members, loaves + drawn, unpaid + 1, unpaid_loaves + drawn)
            }
        },
    );

    #[allow(clippy::cast_precision_loss)]
    let estimated_debt = unpaid_loaves as f64 * DEBT_PER_LOAF;

    Stats {
        total_members,
        total_loaves,
        unpaid_count,
        estimated_debt,
    }
}
