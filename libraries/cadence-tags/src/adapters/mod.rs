//! Format adapters
//!
//! One bidirectional adapter per encoding. Every encoding knows which stores
//! can host it; asking an encoding to read from or write to a store that
//! cannot hold it is not an error, it simply finds nothing and changes
//! nothing.
//!
//! | Encoding       | ID3v2           | Xiph              | APE      | Sidecar     |
//! |----------------|-----------------|-------------------|----------|-------------|
//! | `Rich`         | `TXXX`          | `RICH ...` field  |          |             |
//! | `Structured`   | `SYLT` / `CHAP` |                   |          |             |
//! | `Flat`         |                 | `LYRICS` / `CHAPTERnnn` |    |             |
//! | `SingleString` | `USLT`          | `UNSYNCED LYRICS` | `Lyrics` |             |
//! | `Sidecar`      |                 |                   |          | `[time]text` lines |

mod flat;
mod rich;
mod sidecar;
mod single;
mod structured;

pub use flat::{chapter_name_key, chapter_time_key, MAX_FLAT_CHAPTERS, XIPH_LYRICS};
pub use rich::{
    chapters_from_json, chapters_to_json, lyrics_from_json, lyrics_to_json, RICH_CHAPTERS,
    RICH_LYRICS,
};
pub use sidecar::SidecarLines;
pub use single::{APE_LYRICS, XIPH_UNSYNCED_LYRICS};

use crate::diff;
use crate::language;
use cadence_core::{
    timestamp, ChapterCollection, FieldTag, Frame, FrameKind, FrameTag, Lyrics, Onset, Result,
    UserTextFrame,
};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Language code used for ID3 lyric frames when the tag names none
pub const UNKNOWN_LANGUAGE: &str = "XXX";

/// The encodings a collection can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Frame-based structures (`SYLT`, `CHAP`)
    Structured,
    /// Flat key/value fields (`LYRICS`, `CHAPTERnnn`)
    Flat,
    /// One plain-text value (`USLT`, `UNSYNCED LYRICS`, APE `Lyrics`)
    SingleString,
    /// Self-describing JSON payload
    Rich,
    /// Companion text file, one `[time]text` per line
    Sidecar,
}

impl Encoding {
    /// Every encoding
    pub const ALL: [Encoding; 5] = [
        Encoding::Rich,
        Encoding::Structured,
        Encoding::Flat,
        Encoding::SingleString,
        Encoding::Sidecar,
    ];
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Structured => "structured",
            Self::Flat => "flat",
            Self::SingleString => "single-string",
            Self::Rich => "rich",
            Self::Sidecar => "sidecar",
        };
        f.write_str(name)
    }
}

/// A place an encoding can live in
pub enum Store<'a> {
    /// ID3v2 tag
    Id3v2(&'a mut dyn FrameTag),
    /// Vorbis comments
    Xiph(&'a mut dyn FieldTag),
    /// APEv2 tag
    Ape(&'a mut dyn FieldTag),
    /// Contents of a companion text file
    Sidecar(&'a mut SidecarLines),
}

impl Store<'_> {
    /// Short name for log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id3v2(_) => "ID3v2",
            Self::Xiph(_) => "Xiph",
            Self::Ape(_) => "APE",
            Self::Sidecar(_) => "sidecar",
        }
    }
}

impl fmt::Debug for Store<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Store").field(&self.name()).finish()
    }
}

/// Facts about the media that decoding may need
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeContext {
    /// Playback length; closes the last interval of onset-only encodings
    pub duration: Option<Duration>,
}

impl DecodeContext {
    /// Context with a known duration
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            duration: Some(duration),
        }
    }
}

/// Encoder settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Language for ID3 lyric frames; falls back to the tag's `TLAN`
    pub language: Option<String>,
}

/// Bidirectional conversion between a collection and one encoding
pub trait Adapter<C> {
    /// Read the collection from `store`
    ///
    /// `Ok(None)` when the store does not hold this encoding.
    fn decode(&self, store: &Store<'_>, ctx: &DecodeContext) -> Result<Option<C>>;

    /// Replace whatever `store` holds in this encoding with `value`
    ///
    /// `None` removes the encoding. Returns whether the store changed.
    fn encode(&self, store: &mut Store<'_>, value: Option<&C>, options: &EncodeOptions) -> bool;
}

impl Adapter<Lyrics> for Encoding {
    fn decode(&self, store: &Store<'_>, ctx: &DecodeContext) -> Result<Option<Lyrics>> {
        match self {
            Self::Rich => rich::decode_lyrics(store),
            Self::Structured => Ok(structured::decode_lyrics(store, ctx)),
            Self::Flat => Ok(flat::decode_lyrics(store, ctx)),
            Self::SingleString => Ok(single::decode_lyrics(store)),
            Self::Sidecar => Ok(sidecar::decode_lyrics(store, ctx)),
        }
    }

    fn encode(&self, store: &mut Store<'_>, value: Option<&Lyrics>, options: &EncodeOptions) -> bool {
        let changed = match self {
            Self::Rich => rich::encode_lyrics(store, value),
            Self::Structured => structured::encode_lyrics(store, value, options),
            Self::Flat => flat::encode_lyrics(store, value),
            Self::SingleString => single::encode_lyrics(store, value, options),
            Self::Sidecar => sidecar::encode_lyrics(store, value),
        };
        if changed {
            debug!("{} lyrics changed in {}", self, store.name());
        }
        changed
    }
}

impl Adapter<ChapterCollection> for Encoding {
    fn decode(&self, store: &Store<'_>, ctx: &DecodeContext) -> Result<Option<ChapterCollection>> {
        match self {
            Self::Rich => rich::decode_chapters(store),
            Self::Structured => Ok(structured::decode_chapters(store)),
            Self::Flat => Ok(flat::decode_chapters(store, ctx)),
            Self::SingleString => Ok(None),
            Self::Sidecar => Ok(sidecar::decode_chapters(store, ctx)),
        }
    }

    fn encode(
        &self,
        store: &mut Store<'_>,
        value: Option<&ChapterCollection>,
        _options: &EncodeOptions,
    ) -> bool {
        let changed = match self {
            Self::Rich => rich::encode_chapters(store, value),
            Self::Structured => structured::encode_chapters(store, value),
            Self::Flat => flat::encode_chapters(store, value),
            Self::SingleString => false,
            Self::Sidecar => sidecar::encode_chapters(store, value),
        };
        if changed {
            debug!("{} chapters changed in {}", self, store.name());
        }
        changed
    }
}

// ===== Shared helpers =====

/// Replace the stored frames of `kind` selected by `matches` with `desired`
///
/// Compares what the tag actually stores, including frames the neutral model
/// cannot represent, against the rendering of `desired`.
fn sync_frames(
    tag: &mut dyn FrameTag,
    kind: FrameKind,
    matches: &dyn Fn(&str) -> bool,
    desired: Vec<Frame>,
) -> bool {
    let existing = tag
        .stored(kind)
        .into_iter()
        .filter(|(identity, _)| matches(identity))
        .collect();
    let changed = diff::frames_changed(&*tag, existing, &desired);
    if changed {
        tag.remove_frames(kind, matches);
        for frame in desired {
            tag.add_frame(frame);
        }
    }
    changed
}

/// Selects every frame
fn any_frame(_: &str) -> bool {
    true
}

/// Set a single-valued field if it differs from `desired`
fn sync_field(tag: &mut dyn FieldTag, key: &str, desired: Option<String>) -> bool {
    let changed = diff::field_changed(&tag.field(key), desired.as_deref());
    if changed {
        tag.set_field(key, desired.map(|value| vec![value]));
    }
    changed
}

/// `TXXX` frames carrying `description`
fn user_text_frames(tag: &dyn FrameTag, description: &str) -> Vec<Frame> {
    tag.frames(FrameKind::UserText)
        .into_iter()
        .filter(|frame| matches!(frame, Frame::UserText(t) if t.description == description))
        .collect()
}

/// First non-empty `TXXX` value carrying `description`
fn user_text(tag: &dyn FrameTag, description: &str) -> Option<String> {
    user_text_frames(tag, description)
        .into_iter()
        .find_map(|frame| match frame {
            Frame::UserText(t) if !t.value.is_empty() => Some(t.value),
            _ => None,
        })
}

/// Set the single `TXXX` frame carrying `description`
fn sync_user_text(tag: &mut dyn FrameTag, description: &str, value: Option<String>) -> bool {
    let desired = value
        .map(|value| {
            Frame::UserText(UserTextFrame {
                description: description.to_string(),
                value,
            })
        })
        .into_iter()
        .collect();
    let identity = user_text_identity(description);
    sync_frames(tag, FrameKind::UserText, &|id| id == identity, desired)
}

/// Identity of the `TXXX` frame carrying `description`
fn user_text_identity(description: &str) -> String {
    Frame::UserText(UserTextFrame {
        description: description.to_string(),
        value: String::new(),
    })
    .identity()
}

/// Language for ID3 lyric frames
fn lyric_language(tag: &dyn FrameTag, options: &EncodeOptions) -> String {
    options
        .language
        .as_deref()
        .and_then(language::frame_language)
        .or_else(|| {
            tag.text_frame(language::ID3_LANGUAGE)
                .and_then(|lang| language::frame_language(&lang))
        })
        .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
}

/// Decode line-oriented lyrics (Vorbis `LYRICS`, `.lrc` files)
///
/// If the first non-empty line is not `[time]text` the whole content is
/// plain text. Otherwise every parsable line becomes an onset and the rest
/// are skipped.
fn lyrics_from_lines<S: AsRef<str>>(lines: &[S], duration: Option<Duration>) -> Option<Lyrics> {
    let first = lines
        .iter()
        .map(AsRef::as_ref)
        .find(|line| !line.trim().is_empty())?;

    if timestamp::parse_line(first).is_none() {
        let text = lines.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n");
        return Some(Lyrics::from_plain_text(&text));
    }

    Some(Lyrics::from_onsets(onsets_from_lines(lines), duration))
}

/// Parse every `[time]text` line, skipping the rest
fn onsets_from_lines<S: AsRef<str>>(lines: &[S]) -> Vec<Onset> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|line| {
            let onset = timestamp::parse_line(line);
            if onset.is_none() && !line.trim().is_empty() {
                debug!("Skipping line without timestamp: {:?}", line);
            }
            onset
        })
        .collect()
}

/// Lines for line-oriented lyric encodings
///
/// Synchronized lyrics become `[time]text`, unsynchronized ones plain text.
fn lyrics_to_lines(lyrics: &Lyrics) -> Vec<String> {
    if lyrics.synchronized() {
        lyrics.to_lrc()
    } else {
        lyrics
            .all_lyrics()
            .into_iter()
            .map(|entry| entry.text.clone())
            .collect()
    }
}
