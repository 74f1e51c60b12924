//! Flat encoding: Vorbis comment fields
//!
//! Lyrics live in one `LYRICS` field. Chapters use numbered field pairs,
//! `CHAPTER001=00:00.000` and `CHAPTER001NAME=Intro`, which carry only the
//! start of each chapter.

use super::{lyrics_from_lines, lyrics_to_lines, sync_field, DecodeContext, Store};
use crate::diff::{self, Rendered};
use cadence_core::{timestamp, ChapterCollection, FieldTag, Lyrics, Onset};
use tracing::{debug, warn};

/// Vorbis field holding `[time]text` (or plain) lyrics
pub const XIPH_LYRICS: &str = "LYRICS";

/// Highest chapter index a flat field name can carry
pub const MAX_FLAT_CHAPTERS: usize = 999;

/// `CHAPTERnnn`
pub fn chapter_time_key(index: usize) -> String {
    format!("CHAPTER{:03}", index)
}

/// `CHAPTERnnnNAME`
pub fn chapter_name_key(index: usize) -> String {
    format!("CHAPTER{:03}NAME", index)
}

pub(super) fn decode_lyrics(store: &Store<'_>, ctx: &DecodeContext) -> Option<Lyrics> {
    let Store::Xiph(tag) = store else {
        return None;
    };
    let text = tag.first_field(XIPH_LYRICS)?;
    let lines: Vec<&str> = text.lines().collect();
    lyrics_from_lines(&lines, ctx.duration)
}

pub(super) fn encode_lyrics(store: &mut Store<'_>, lyrics: Option<&Lyrics>) -> bool {
    let Store::Xiph(tag) = store else {
        return false;
    };
    let desired = lyrics.map(|lyrics| lyrics_to_lines(lyrics).join("\n"));
    sync_field(&mut **tag, XIPH_LYRICS, desired)
}

pub(super) fn decode_chapters(store: &Store<'_>, ctx: &DecodeContext) -> Option<ChapterCollection> {
    let Store::Xiph(tag) = store else {
        return None;
    };

    let mut onsets = Vec::new();
    for index in 0..=MAX_FLAT_CHAPTERS {
        let key = chapter_time_key(index);
        let Some(time) = tag.first_field(&key) else {
            continue;
        };
        let Some(start) = timestamp::parse_time(&time) else {
            debug!("Skipping {} with unreadable time {:?}", key, time);
            continue;
        };
        let title = tag
            .first_field(&chapter_name_key(index))
            .unwrap_or_else(|| format!("Chapter {}", index));
        onsets.push(Onset::new(start, title));
    }

    if onsets.is_empty() {
        return None;
    }
    Some(ChapterCollection::from_onsets(onsets, ctx.duration))
}

/// Every chapter field currently stored, as `(key, value)` items
fn stored_fields(tag: &dyn FieldTag) -> Vec<Rendered> {
    (0..=MAX_FLAT_CHAPTERS)
        .flat_map(|index| [chapter_time_key(index), chapter_name_key(index)])
        .flat_map(|key| {
            tag.field(&key)
                .into_iter()
                .map(move |value| (key.clone(), value.into_bytes()))
        })
        .collect()
}

pub(super) fn encode_chapters(store: &mut Store<'_>, chapters: Option<&ChapterCollection>) -> bool {
    let Store::Xiph(tag) = store else {
        return false;
    };

    let mut desired: Vec<(String, String)> = Vec::new();
    if let Some(chapters) = chapters {
        let sorted = chapters.chapters();
        if sorted.len() > MAX_FLAT_CHAPTERS {
            warn!(
                "Only {} of {} chapters fit in Vorbis comments",
                MAX_FLAT_CHAPTERS,
                sorted.len()
            );
        }
        for (index, chapter) in sorted.into_iter().take(MAX_FLAT_CHAPTERS).enumerate() {
            let number = index + 1;
            desired.push((chapter_time_key(number), timestamp::format_time(chapter.start)));
            desired.push((chapter_name_key(number), chapter.text.clone()));
        }
    }

    let rendered = desired
        .iter()
        .map(|(key, value)| (key.clone(), value.as_bytes().to_vec()))
        .collect();
    let changed = diff::items_changed(stored_fields(&**tag), rendered);
    if changed {
        for index in 0..=MAX_FLAT_CHAPTERS {
            tag.set_field(&chapter_time_key(index), None);
            tag.set_field(&chapter_name_key(index), None);
        }
        for (key, value) in desired {
            tag.set_field(&key, Some(vec![value]));
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Adapter, EncodeOptions, Encoding};
    use crate::backend::MemoryTag;
    use cadence_core::Chapter;
    use std::time::Duration;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn chapters_are_written_one_based() {
        let mut tag = MemoryTag::new();
        let chapters: ChapterCollection = vec![
            Chapter::new("Intro", secs(0), secs(10)),
            Chapter::new("Verse", secs(10), secs(25)),
        ]
        .into_iter()
        .collect();

        let mut store = Store::Xiph(&mut tag);
        assert!(Encoding::Flat.encode(&mut store, Some(&chapters), &EncodeOptions::default()));
        assert!(!Encoding::Flat.encode(&mut store, Some(&chapters), &EncodeOptions::default()));
        drop(store);

        assert!(tag.field("CHAPTER000").is_empty());
        assert_eq!(tag.field("CHAPTER001"), vec!["00:00.000"]);
        assert_eq!(tag.field("CHAPTER001NAME"), vec!["Intro"]);
        assert_eq!(tag.field("CHAPTER002"), vec!["00:10.000"]);
        assert_eq!(tag.field("CHAPTER002NAME"), vec!["Verse"]);
    }

    #[test]
    fn reading_scans_from_zero_and_names_untitled_chapters() {
        let mut tag = MemoryTag::new();
        tag.set_field("CHAPTER000", Some(vec!["00:00.000".into()]));
        tag.set_field("CHAPTER000NAME", Some(vec!["Start".into()]));
        tag.set_field("CHAPTER007", Some(vec!["01:00.5".into()]));
        tag.set_field("CHAPTER008", Some(vec!["not a time".into()]));

        let store = Store::Xiph(&mut tag);
        let chapters: ChapterCollection = Encoding::Flat
            .decode(&store, &DecodeContext::with_duration(secs(90)))
            .unwrap()
            .unwrap();

        let read: Vec<&Chapter> = chapters.chapters();
        assert_eq!(read.len(), 2);
        assert_eq!(*read[0], Chapter::new("Start", secs(0), Duration::from_millis(60_500)));
        assert_eq!(*read[1], Chapter::new("Chapter 7", Duration::from_millis(60_500), secs(90)));
    }

    #[test]
    fn stale_indices_are_cleared() {
        let mut tag = MemoryTag::new();
        tag.set_field("CHAPTER000", Some(vec!["00:00.000".into()]));
        tag.set_field("CHAPTER005NAME", Some(vec!["Old".into()]));
        let chapters: ChapterCollection =
            std::iter::once(Chapter::new("New", secs(1), secs(2))).collect();

        let mut store = Store::Xiph(&mut tag);
        assert!(Encoding::Flat.encode(&mut store, Some(&chapters), &EncodeOptions::default()));
        drop(store);

        assert!(tag.field("CHAPTER000").is_empty());
        assert!(tag.field("CHAPTER005NAME").is_empty());
        assert_eq!(tag.field("CHAPTER001NAME"), vec!["New"]);
    }

    #[test]
    fn excess_chapters_are_dropped() {
        let mut tag = MemoryTag::new();
        let chapters: ChapterCollection = (0..1_005u64)
            .map(|i| Chapter::new(format!("c{}", i), secs(i), secs(i + 1)))
            .collect();

        let mut store = Store::Xiph(&mut tag);
        assert!(Encoding::Flat.encode(&mut store, Some(&chapters), &EncodeOptions::default()));
        drop(store);

        assert_eq!(tag.field("CHAPTER999NAME"), vec!["c998"]);
        assert!(tag.field("CHAPTER1000").is_empty());
    }

    #[test]
    fn lyrics_field_holds_lrc_or_plain_text() {
        let mut tag = MemoryTag::new();
        let options = EncodeOptions::default();
        let synced = Lyrics::from_onsets(
            vec![Onset::new(secs(1), "one"), Onset::new(secs(2), "two")],
            Some(secs(3)),
        );

        let mut store = Store::Xiph(&mut tag);
        assert!(Encoding::Flat.encode(&mut store, Some(&synced), &options));
        let decoded: Lyrics = Encoding::Flat
            .decode(&store, &DecodeContext::with_duration(secs(3)))
            .unwrap()
            .unwrap();
        assert_eq!(decoded, synced);

        let plain = Lyrics::from_plain_text("just words");
        assert!(Encoding::Flat.encode(&mut store, Some(&plain), &options));
        drop(store);
        assert_eq!(tag.field(XIPH_LYRICS), vec!["just words"]);
    }
}
