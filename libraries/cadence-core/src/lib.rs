//! Cadence Core
//!
//! Format-agnostic building blocks for keeping time-coded lyrics and chapter
//! markers in sync across the redundant encodings a media file may carry.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Entry`, `Lyrics`/`LyricsChannel`, `ChapterCollection`
//! - **Timestamp Codec**: the `[mm:ss.fff]text` line format
//! - **Interval Synthesis**: onsets to closed ranges
//! - **Fallback Resolution**: first non-empty result among lazy attempts
//! - **Capability Traits**: `FrameTag`, `FieldTag`, `SidecarSource`
//! - **Error Handling**: unified `SyncError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{timestamp, Lyrics};
//! use std::time::Duration;
//!
//! let onsets = ["[00:01.000]Hello", "[00:04.500]World"]
//!     .iter()
//!     .filter_map(|line| timestamp::parse_line(line));
//! let lyrics = Lyrics::from_onsets(onsets, Some(Duration::from_secs(10)));
//!
//! assert_eq!(lyrics.all_lyrics()[0].end, Duration::from_millis(4_500));
//! assert_eq!(lyrics.to_lrc()[1], "[00:04.500]World");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod resolve;
pub mod synthesis;
pub mod timestamp;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SyncError};
pub use events::{ChangeEvent, Observers, SubscriptionId};
pub use resolve::{attempt, resolve_first, Attempt, Resolvable};
pub use synthesis::{synthesize_intervals, Onset};
pub use traits::{FieldTag, FrameTag, SidecarSource};
pub use types::{
    Chapter, ChapterCollection, ChapterFrame, Entry, Frame, FrameKind, Lyrics, LyricsChannel,
    LyricsEntry, SyncedLyricsFrame, UnsyncedLyricsFrame, UserTextFrame,
};
