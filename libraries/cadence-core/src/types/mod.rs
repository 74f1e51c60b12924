//! Domain types for Cadence

mod chapters;
mod entry;
mod frame;
mod lyrics;

pub use chapters::ChapterCollection;
pub use entry::{Chapter, Entry, LyricsEntry};
pub use frame::{ChapterFrame, Frame, FrameKind, SyncedLyricsFrame, UnsyncedLyricsFrame, UserTextFrame};
pub use lyrics::{compare_channels, Lyrics, LyricsChannel};
