//! Time-ranged entries shared by lyrics and chapters

use std::cmp::Ordering;
use std::time::Duration;

/// A lyrics line or a chapter marker
///
/// `end >= start` is expected but not enforced; zero-length and inverted
/// ranges are representable and still order deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    /// Line text, or the chapter title
    pub text: String,
    /// Start of the range
    pub start: Duration,
    /// End of the range
    pub end: Duration,
}

/// A lyrics line
pub type LyricsEntry = Entry;

/// A chapter marker (`text` holds the title)
pub type Chapter = Entry;

impl Entry {
    /// Create a new entry
    pub fn new(text: impl Into<String>, start: Duration, end: Duration) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Create an untimed entry (zero-zero range)
    pub fn untimed(text: impl Into<String>) -> Self {
        Self::new(text, Duration::ZERO, Duration::ZERO)
    }

    /// Chapter title (alias for `text`)
    pub fn title(&self) -> &str {
        &self.text
    }

    /// Check whether `time` falls inside `[start, end]`
    pub fn contains(&self, time: Duration) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Orders by start, then end, then text compared byte-wise
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| self.text.as_bytes().cmp(other.text.as_bytes()))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
