//! Fallback resolution over lazy read attempts
//!
//! Several encodings of the same data may coexist in one file. Readers list
//! them richest first and take the first one that yields something; later
//! attempts are never evaluated.

use crate::error::Result;
use crate::types::{ChapterCollection, Lyrics};
use tracing::debug;

/// A value that can be present but carry nothing
pub trait Resolvable {
    /// Check if the value holds no entries
    fn is_empty(&self) -> bool;
}

impl Resolvable for Lyrics {
    fn is_empty(&self) -> bool {
        Lyrics::is_empty(self)
    }
}

impl Resolvable for ChapterCollection {
    fn is_empty(&self) -> bool {
        ChapterCollection::is_empty(self)
    }
}

/// A deferred read
///
/// `Ok(None)` means "nothing here, keep looking"; `Err` aborts resolution.
pub type Attempt<'a, T> = Box<dyn FnOnce() -> Result<Option<T>> + 'a>;

/// Compose a lookup with a decoder
///
/// `setup` answers whether the source structure exists at all; `getter` only
/// runs when it does.
pub fn attempt<'a, S, T>(
    setup: impl FnOnce() -> Option<S> + 'a,
    getter: impl FnOnce(S) -> Result<Option<T>> + 'a,
) -> Attempt<'a, T> {
    Box::new(move || match setup() {
        Some(source) => getter(source),
        None => Ok(None),
    })
}

/// Return the first non-empty result, in order
pub fn resolve_first<'a, T: Resolvable>(
    attempts: impl IntoIterator<Item = Attempt<'a, T>>,
) -> Result<Option<T>> {
    for (index, attempt) in attempts.into_iter().enumerate() {
        match attempt()? {
            Some(value) if !value.is_empty() => {
                debug!("Resolved from attempt {}", index);
                return Ok(Some(value));
            }
            _ => {}
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::types::Chapter;
    use std::cell::Cell;
    use std::time::Duration;

    fn one_chapter(title: &str) -> ChapterCollection {
        ChapterCollection::from_entries(vec![Chapter::new(title, Duration::ZERO, Duration::ZERO)])
    }

    #[test]
    fn first_non_empty_wins_and_later_attempts_are_skipped() {
        let evaluated = Cell::new(0);
        let attempts: Vec<Attempt<'_, ChapterCollection>> = vec![
            Box::new(|| {
                evaluated.set(evaluated.get() + 1);
                Ok(None)
            }),
            Box::new(|| {
                evaluated.set(evaluated.get() + 1);
                Ok(Some(ChapterCollection::new()))
            }),
            Box::new(|| {
                evaluated.set(evaluated.get() + 1);
                Ok(Some(one_chapter("third")))
            }),
            Box::new(|| {
                evaluated.set(evaluated.get() + 1);
                Ok(Some(one_chapter("fourth")))
            }),
        ];

        let result = resolve_first(attempts).unwrap().unwrap();
        assert_eq!(result.chapters()[0].title(), "third");
        assert_eq!(evaluated.get(), 3);
    }

    #[test]
    fn nothing_found_is_none() {
        let attempts: Vec<Attempt<'_, Lyrics>> = vec![Box::new(|| Ok(None))];
        assert!(resolve_first(attempts).unwrap().is_none());
        assert!(resolve_first(Vec::<Attempt<'_, Lyrics>>::new()).unwrap().is_none());
    }

    #[test]
    fn getter_runs_only_when_setup_finds_something() {
        let ran = Cell::new(false);
        let attempts = vec![
            attempt(
                || None::<&str>,
                |_| {
                    ran.set(true);
                    Ok(Some(one_chapter("never")))
                },
            ),
            attempt(|| Some("found"), |title| Ok(Some(one_chapter(title)))),
        ];

        let result = resolve_first(attempts).unwrap().unwrap();
        assert_eq!(result.chapters()[0].title(), "found");
        assert!(!ran.get());
    }

    #[test]
    fn errors_abort_resolution() {
        let attempts: Vec<Attempt<'_, ChapterCollection>> = vec![
            Box::new(|| Err(SyncError::invalid_input("corrupt"))),
            Box::new(|| Ok(Some(one_chapter("unreached")))),
        ];
        assert!(resolve_first(attempts).is_err());
    }
}
