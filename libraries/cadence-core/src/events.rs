//! Change notifications
//!
//! Collections emit a [`ChangeEvent`] after every successful mutation so an
//! observer (an editor view, a dirty flag) can react. Subscribers are plain
//! callbacks registered per instance and are not cloned along with the
//! collection that owns them.

use std::fmt;

/// What changed on a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// Channels were added to or removed from a `Lyrics`
    Channels,
    /// Entries of a `LyricsChannel` changed
    Lyrics,
    /// A `LyricsChannel` was renamed
    Name,
    /// Entries of a `ChapterCollection` changed
    Chapters,
}

/// Handle returned by [`Observers::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(ChangeEvent)>;

/// Subscriber list owned by a collection
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    /// Create an empty subscriber list
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback, returning a handle for [`Observers::unsubscribe`]
    pub fn subscribe(&mut self, callback: impl FnMut(ChangeEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    /// Invoke every callback with `event`
    pub fn notify(&mut self, event: ChangeEvent) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Check if no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

// A cloned collection starts without subscribers.
impl Clone for Observers {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.callbacks.len())
            .finish()
    }
}
