//! History replay shared by goals and funds

use chrono::NaiveDate;
use core_kernel::money::Cents;

/// A dated deposit or withdrawal in a savings history
pub trait HistoryEntry {
    fn date(&self) -> NaiveDate;

    /// Deposits are positive, withdrawals negative
    fn signed_cents(&self) -> Cents;
}

/// Replays a history, flooring the running total at zero after every entry
///
/// With `until` set, only entries dated on or before it are counted.
/// Flooring step by step reproduces the cached total, which is also
/// floored on each withdrawal, so a deposit made after an over-sized
/// withdrawal is earmarked in full.
pub fn replay<'a, E, I>(entries: I, until: Option<NaiveDate>) -> Cents
where
    E: HistoryEntry + 'a,
    I: IntoIterator<Item = &'a E>,
{
    entries
        .into_iter()
        .filter(|entry| until.map_or(true, |limit| entry.date() <= limit))
        .fold(Cents::ZERO, |total, entry| {
            (total + entry.signed_cents()).clamp_non_negative()
        })
}
