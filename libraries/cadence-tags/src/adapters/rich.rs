//! Rich encoding
//!
//! A compact JSON document in a user-defined text slot. It is the only
//! encoding that keeps channels and explicit end times, so readers try it
//! first.

use super::{sync_field, sync_user_text, user_text, Store};
use cadence_core::timestamp::{format_rich_time, parse_rich_time};
use cadence_core::{Chapter, ChapterCollection, Lyrics, LyricsChannel, LyricsEntry, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// `TXXX` description / Vorbis field holding rich lyrics
pub const RICH_LYRICS: &str = "RICH LYRICS";
/// `TXXX` description / Vorbis field holding rich chapters
pub const RICH_CHAPTERS: &str = "RICH CHAPTERS";

mod rich_time {
    use super::{format_rich_time, parse_rich_time, Duration};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_rich_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_rich_time(&text).ok_or_else(|| D::Error::custom(format!("invalid time `{}`", text)))
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct LyricsPayload {
    channels: Vec<ChannelPayload>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChannelPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    lyrics: Vec<LinePayload>,
}

/// Plain strings in unsynchronized lyrics, timed objects otherwise
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum LinePayload {
    Plain(String),
    Timed(TimedPayload),
}

#[derive(Debug, Serialize, Deserialize)]
struct TimedPayload {
    text: String,
    #[serde(with = "rich_time")]
    start: Duration,
    #[serde(with = "rich_time")]
    end: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChaptersPayload {
    chapters: Vec<ChapterPayload>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChapterPayload {
    title: String,
    #[serde(with = "rich_time")]
    start: Duration,
    #[serde(with = "rich_time")]
    end: Duration,
}

/// Serialize lyrics to the rich JSON form
pub fn lyrics_to_json(lyrics: &Lyrics) -> Result<String> {
    let channels = lyrics
        .channels()
        .into_iter()
        .map(|channel| ChannelPayload {
            name: channel.name().map(str::to_string),
            lyrics: channel
                .lyrics()
                .into_iter()
                .map(|entry| {
                    if lyrics.synchronized() {
                        LinePayload::Timed(TimedPayload {
                            text: entry.text.clone(),
                            start: entry.start,
                            end: entry.end,
                        })
                    } else {
                        LinePayload::Plain(entry.text.clone())
                    }
                })
                .collect(),
        })
        .collect();
    Ok(serde_json::to_string(&LyricsPayload { channels })?)
}

/// Parse lyrics from the rich JSON form
///
/// A single plain-string line anywhere marks the whole document as
/// unsynchronized.
pub fn lyrics_from_json(json: &str) -> Result<Lyrics> {
    let payload: LyricsPayload = serde_json::from_str(json)?;
    let synchronized = !payload
        .channels
        .iter()
        .flat_map(|channel| &channel.lyrics)
        .any(|line| matches!(line, LinePayload::Plain(_)));

    let mut lyrics = Lyrics::new(synchronized);
    for channel in payload.channels {
        let entries = channel.lyrics.into_iter().map(|line| match line {
            LinePayload::Plain(text) => LyricsEntry::untimed(text),
            LinePayload::Timed(timed) => LyricsEntry::new(timed.text, timed.start, timed.end),
        });
        lyrics.add_channel(LyricsChannel::with_entries(channel.name, entries));
    }
    Ok(lyrics)
}

/// Serialize chapters to the rich JSON form
pub fn chapters_to_json(chapters: &ChapterCollection) -> Result<String> {
    let chapters = chapters
        .chapters()
        .into_iter()
        .map(|chapter| ChapterPayload {
            title: chapter.text.clone(),
            start: chapter.start,
            end: chapter.end,
        })
        .collect();
    Ok(serde_json::to_string(&ChaptersPayload { chapters })?)
}

/// Parse chapters from the rich JSON form
pub fn chapters_from_json(json: &str) -> Result<ChapterCollection> {
    let payload: ChaptersPayload = serde_json::from_str(json)?;
    Ok(payload
        .chapters
        .into_iter()
        .map(|c| Chapter::new(c.title, c.start, c.end))
        .collect())
}

fn read_payload(store: &Store<'_>, key: &str) -> Option<String> {
    match store {
        Store::Id3v2(tag) => user_text(&**tag, key),
        Store::Xiph(tag) => tag.first_field(key),
        Store::Ape(_) | Store::Sidecar(_) => None,
    }
}

fn write_payload(store: &mut Store<'_>, key: &str, payload: Option<String>) -> bool {
    match store {
        Store::Id3v2(tag) => sync_user_text(&mut **tag, key, payload),
        Store::Xiph(tag) => sync_field(&mut **tag, key, payload),
        Store::Ape(_) | Store::Sidecar(_) => false,
    }
}

pub(super) fn decode_lyrics(store: &Store<'_>) -> Result<Option<Lyrics>> {
    read_payload(store, RICH_LYRICS)
        .map(|json| lyrics_from_json(&json))
        .transpose()
}

pub(super) fn encode_lyrics(store: &mut Store<'_>, lyrics: Option<&Lyrics>) -> bool {
    match lyrics.map(lyrics_to_json).transpose() {
        Ok(payload) => write_payload(store, RICH_LYRICS, payload),
        Err(err) => {
            warn!("Leaving rich lyrics untouched: {}", err);
            false
        }
    }
}

pub(super) fn decode_chapters(store: &Store<'_>) -> Result<Option<ChapterCollection>> {
    read_payload(store, RICH_CHAPTERS)
        .map(|json| chapters_from_json(&json))
        .transpose()
}

pub(super) fn encode_chapters(store: &mut Store<'_>, chapters: Option<&ChapterCollection>) -> bool {
    match chapters.map(chapters_to_json).transpose() {
        Ok(payload) => write_payload(store, RICH_CHAPTERS, payload),
        Err(err) => {
            warn!("Leaving rich chapters untouched: {}", err);
            false
        }
    }
}
