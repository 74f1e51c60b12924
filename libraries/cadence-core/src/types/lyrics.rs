//! Lyrics: channels of time-ranged lines

use super::entry::LyricsEntry;
use crate::events::{ChangeEvent, Observers, SubscriptionId};
use crate::synthesis::{synthesize_intervals, Onset};
use crate::timestamp::{format_line, frame_millis};
use std::cmp::Ordering;
use std::time::Duration;

/// A named group of lyric lines (e.g. one singer)
///
/// Entries are stored in insertion order and always exposed sorted.
/// Equality compares the name and the sorted entries.
#[derive(Debug, Clone, Default)]
pub struct LyricsChannel {
    name: Option<String>,
    entries: Vec<LyricsEntry>,
    observers: Observers,
}

impl LyricsChannel {
    /// Create an empty channel
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            entries: Vec::new(),
            observers: Observers::new(),
        }
    }

    /// Create a channel holding `entries`
    pub fn with_entries(name: Option<String>, entries: impl IntoIterator<Item = LyricsEntry>) -> Self {
        Self {
            name,
            entries: entries.into_iter().collect(),
            observers: Observers::new(),
        }
    }

    /// Channel name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Rename the channel
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
        self.observers.notify(ChangeEvent::Name);
    }

    /// Entries in comparator order
    pub fn lyrics(&self) -> Vec<&LyricsEntry> {
        let mut sorted: Vec<&LyricsEntry> = self.entries.iter().collect();
        sorted.sort();
        sorted
    }

    /// Earliest entry start, `None` when empty
    pub fn start(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.start).min()
    }

    /// Latest entry end, `None` when empty
    pub fn end(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.end).max()
    }

    /// Add an entry
    pub fn add(&mut self, entry: LyricsEntry) {
        self.entries.push(entry);
        self.observers.notify(ChangeEvent::Lyrics);
    }

    /// Remove the first entry equal to `entry`
    pub fn remove(&mut self, entry: &LyricsEntry) -> bool {
        match self.entries.iter().position(|e| e == entry) {
            Some(index) => {
                self.entries.remove(index);
                self.observers.notify(ChangeEvent::Lyrics);
                true
            }
            None => false,
        }
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.observers.notify(ChangeEvent::Lyrics);
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the channel has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Register a change callback
    pub fn subscribe(&mut self, callback: impl FnMut(ChangeEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    /// Remove a change callback
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl PartialEq for LyricsChannel {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.lyrics() == other.lyrics()
    }
}

impl Eq for LyricsChannel {}

/// Orders channels by `(start, end, name)`; empty channels sort last
pub fn compare_channels(a: &LyricsChannel, b: &LyricsChannel) -> Ordering {
    let start = |c: &LyricsChannel| c.start().unwrap_or(Duration::MAX);
    let end = |c: &LyricsChannel| c.end().unwrap_or(Duration::MAX);
    start(a)
        .cmp(&start(b))
        .then_with(|| end(a).cmp(&end(b)))
        .then_with(|| a.name().map(str::as_bytes).cmp(&b.name().map(str::as_bytes)))
}

/// Lyrics for one piece of media
///
/// Equality compares the sorted views, so insertion order and subscribers
/// do not matter.
#[derive(Debug, Clone)]
pub struct Lyrics {
    synchronized: bool,
    channels: Vec<LyricsChannel>,
    observers: Observers,
}

impl Lyrics {
    /// Create lyrics without channels
    pub fn new(synchronized: bool) -> Self {
        Self {
            synchronized,
            channels: Vec::new(),
            observers: Observers::new(),
        }
    }

    /// Synchronized lyrics from onsets; the last line ends at `duration`
    pub fn from_onsets(onsets: impl IntoIterator<Item = Onset>, duration: Option<Duration>) -> Self {
        let entries = synthesize_intervals(onsets, duration);
        Self::from_entries(entries)
    }

    /// Synchronized lyrics in a single unnamed channel
    pub fn from_entries(entries: impl IntoIterator<Item = LyricsEntry>) -> Self {
        let mut lyrics = Self::new(true);
        lyrics.channels.push(LyricsChannel::with_entries(None, entries));
        lyrics
    }

    /// Unsynchronized lyrics, one zero-length entry per line
    pub fn from_plain_text(text: &str) -> Self {
        let mut lyrics = Self::new(false);
        lyrics
            .channels
            .push(LyricsChannel::with_entries(None, text.lines().map(LyricsEntry::untimed)));
        lyrics
    }

    /// Whether entries carry meaningful timing
    pub fn synchronized(&self) -> bool {
        self.synchronized
    }

    /// Channels in comparator order
    pub fn channels(&self) -> Vec<&LyricsChannel> {
        let mut sorted: Vec<&LyricsChannel> = self.channels.iter().collect();
        sorted.sort_by(|a, b| compare_channels(a, b));
        sorted
    }

    /// Mutable access to channels, in insertion order
    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut LyricsChannel> {
        self.channels.iter_mut()
    }

    /// Every entry across all channels, in comparator order
    ///
    /// Lines interleave by time instead of grouping per channel.
    pub fn all_lyrics(&self) -> Vec<&LyricsEntry> {
        let mut all: Vec<&LyricsEntry> = self.channels.iter().flat_map(|c| c.entries.iter()).collect();
        all.sort();
        all
    }

    /// Entries whose range contains `time`, channel by channel
    ///
    /// Always empty for unsynchronized lyrics.
    pub fn lyrics_at_time(&self, time: Duration) -> Vec<&LyricsEntry> {
        if !self.synchronized {
            return Vec::new();
        }
        self.channels()
            .into_iter()
            .flat_map(|channel| channel.lyrics())
            .filter(|entry| entry.contains(time))
            .collect()
    }

    /// Add a channel
    pub fn add_channel(&mut self, channel: LyricsChannel) {
        self.channels.push(channel);
        self.observers.notify(ChangeEvent::Channels);
    }

    /// Remove the first channel equal to `channel`
    pub fn remove_channel(&mut self, channel: &LyricsChannel) -> bool {
        match self.channels.iter().position(|c| c == channel) {
            Some(index) => {
                self.channels.remove(index);
                self.observers.notify(ChangeEvent::Channels);
                true
            }
            None => false,
        }
    }

    /// Remove every channel
    pub fn clear_channels(&mut self) {
        if self.channels.is_empty() {
            return;
        }
        self.channels.clear();
        self.observers.notify(ChangeEvent::Channels);
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.channels.iter().map(LyricsChannel::len).sum()
    }

    /// Check if there are no entries in any channel
    pub fn is_empty(&self) -> bool {
        self.channels.iter().all(LyricsChannel::is_empty)
    }

    /// `(start in ms, text)` pairs for frame-based synchronized encodings
    pub fn to_synched_text(&self) -> Vec<(u32, String)> {
        self.all_lyrics()
            .into_iter()
            .map(|e| (frame_millis(e.start), e.text.clone()))
            .collect()
    }

    /// Plain text, one line per entry
    pub fn to_simple(&self) -> String {
        self.all_lyrics()
            .into_iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `[time]text` lines
    pub fn to_lrc(&self) -> Vec<String> {
        self.all_lyrics()
            .into_iter()
            .map(|e| format_line(e.start, &e.text))
            .collect()
    }

    /// Register a change callback
    pub fn subscribe(&mut self, callback: impl FnMut(ChangeEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    /// Remove a change callback
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl PartialEq for Lyrics {
    fn eq(&self, other: &Self) -> bool {
        self.synchronized == other.synchronized && self.channels() == other.channels()
    }
}

impl Eq for Lyrics {}
