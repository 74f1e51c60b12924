//! Interval synthesis
//!
//! Turns sparse onsets (start time only) into closed ranges: each entry ends
//! where the next one starts, and the last one ends at the known duration of
//! the media, or at its own start when the duration is unknown.

use crate::types::Entry;
use std::time::Duration;

/// A timestamp marking only the start of an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Onset {
    /// When the item starts
    pub start: Duration,
    /// Line text or chapter title
    pub text: String,
}

impl Onset {
    /// Create a new onset
    pub fn new(start: Duration, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }

    /// Create an onset from a millisecond offset
    pub fn from_millis(millis: u32, text: impl Into<String>) -> Self {
        Self::new(Duration::from_millis(u64::from(millis)), text)
    }
}

/// Synthesize `[start, end]` ranges from onsets
///
/// Onsets are stably sorted by start first, so items sharing a start keep
/// their input order.
pub fn synthesize_intervals(
    onsets: impl IntoIterator<Item = Onset>,
    duration: Option<Duration>,
) -> Vec<Entry> {
    let mut onsets: Vec<Onset> = onsets.into_iter().collect();
    onsets.sort_by_key(|onset| onset.start);

    let ends: Vec<Duration> = onsets
        .iter()
        .skip(1)
        .map(|next| next.start)
        .chain(onsets.last().map(|last| duration.unwrap_or(last.start)))
        .collect();

    onsets
        .into_iter()
        .zip(ends)
        .map(|(onset, end)| Entry::new(onset.text, onset.start, end))
        .collect()
}
