//! Chapter markers

use super::entry::Chapter;
use crate::events::{ChangeEvent, Observers, SubscriptionId};
use crate::synthesis::{synthesize_intervals, Onset};
use std::time::Duration;

/// Flat collection of chapters
///
/// Stored in insertion order, always exposed sorted. Equality compares the
/// sorted view.
#[derive(Debug, Clone, Default)]
pub struct ChapterCollection {
    entries: Vec<Chapter>,
    observers: Observers,
}

impl ChapterCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection holding `chapters`
    pub fn from_entries(chapters: impl IntoIterator<Item = Chapter>) -> Self {
        Self {
            entries: chapters.into_iter().collect(),
            observers: Observers::new(),
        }
    }

    /// Chapters from onsets; the last chapter ends at `duration`
    pub fn from_onsets(onsets: impl IntoIterator<Item = Onset>, duration: Option<Duration>) -> Self {
        Self::from_entries(synthesize_intervals(onsets, duration))
    }

    /// Chapters in comparator order
    pub fn chapters(&self) -> Vec<&Chapter> {
        let mut sorted: Vec<&Chapter> = self.entries.iter().collect();
        sorted.sort();
        sorted
    }

    /// Chapters whose range contains `time`
    pub fn chapters_at_time(&self, time: Duration) -> Vec<&Chapter> {
        self.chapters()
            .into_iter()
            .filter(|chapter| chapter.contains(time))
            .collect()
    }

    /// Add a chapter
    pub fn add(&mut self, chapter: Chapter) {
        self.entries.push(chapter);
        self.observers.notify(ChangeEvent::Chapters);
    }

    /// Remove the first chapter equal to `chapter`
    pub fn remove(&mut self, chapter: &Chapter) -> bool {
        match self.entries.iter().position(|c| c == chapter) {
            Some(index) => {
                self.entries.remove(index);
                self.observers.notify(ChangeEvent::Chapters);
                true
            }
            None => false,
        }
    }

    /// Remove every chapter
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.entries.clear();
        self.observers.notify(ChangeEvent::Chapters);
    }

    /// Number of chapters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no chapters
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

impl PartialEq for ChapterCollection {
    fn eq(&self, other: &Self) -> bool {
        self.chapters() == other.chapters()
    }
}

impl Eq for ChapterCollection {}

impl FromIterator<Chapter> for ChapterCollection {
    fn from_iter<I: IntoIterator<Item = Chapter>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn chapters_are_exposed_sorted() {
        let mut chapters = ChapterCollection::new();
        chapters.add(Chapter::new("Outro", secs(50), secs(60)));
        chapters.add(Chapter::new("Intro", secs(0), secs(10)));
        chapters.add(Chapter::new("Middle", secs(10), secs(50)));

        let titles: Vec<_> = chapters.chapters().iter().map(|c| c.title()).collect();
        assert_eq!(titles, ["Intro", "Middle", "Outro"]);
    }

    #[test]
    fn from_onsets_uses_duration_for_last_chapter() {
        let chapters = ChapterCollection::from_onsets(
            vec![Onset::new(secs(0), "One"), Onset::new(secs(30), "Two")],
            Some(secs(45)),
        );
        let last = chapters.chapters()[1];
        assert_eq!((last.start, last.end), (secs(30), secs(45)));
    }

    #[test]
    fn chapters_at_time_contains_time() {
        let chapters = ChapterCollection::from_entries(vec![
            Chapter::new("A", secs(0), secs(10)),
            Chapter::new("B", secs(10), secs(20)),
        ]);
        let hits: Vec<_> = chapters.chapters_at_time(secs(15)).iter().map(|c| c.title()).collect();
        assert_eq!(hits, ["B"]);
    }

    #[test]
    fn mutations_notify_once_per_call() {
        let count = Rc::new(Cell::new(0));
        let mut chapters = ChapterCollection::new();
        let c = Rc::clone(&count);
        chapters.subscribe(move |event| {
            assert_eq!(event, ChangeEvent::Chapters);
            c.set(c.get() + 1);
        });

        let chapter = Chapter::new("A", secs(0), secs(1));
        chapters.add(chapter.clone());
        chapters.add(Chapter::new("B", secs(1), secs(2)));
        assert!(chapters.remove(&chapter));
        assert!(!chapters.remove(&chapter));
        chapters.clear();
        chapters.clear();

        assert_eq!(count.get(), 4);
        assert!(chapters.is_empty());
    }
}
