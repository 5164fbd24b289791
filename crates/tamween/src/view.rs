//! Display-only filtering and ordering of the card list.
//!
//! Nothing here touches the store; these shape what `list` prints.

use crate::card::RationCard;

/// Cards whose owner name contains `query`, ignoring case.
///
/// An empty query keeps everything.
#[must_use]
pub fn filter_by_owner<'a>(cards: &'a [RationCard], query: &str) -> Vec<&'a RationCard> {
    let needle = query.to_lowercase();
    cards
        .iter()
        .filter(|card| needle.is_empty() || card.owner_name.to_lowercase().contains(&needle))
        .collect()
}

/// Order by most recent withdrawal first. Ties keep their stored order.
pub fn sort_recent_first(cards: &mut [&RationCard]) {
    cards.sort_by(|a, b| b.last_withdrawal_date.cmp(&a.last_withdrawal_date));
}

/// The cards `list` shows for a search: filtered, then newest first.
#[must_use]
pub fn visible<'a>(cards: &'a [RationCard], query: &str) -> Vec<&'a RationCard> {
    let mut shown = filter_by_owner(cards, query);
    sort_recent_first(&mut shown);
    shown
}
