//! Structured encoding: ID3v2 `SYLT` and `CHAP` frames

use super::{any_frame, lyric_language, sync_frames, DecodeContext, EncodeOptions, Store};
use cadence_core::{
    Chapter, ChapterCollection, ChapterFrame, Frame, FrameKind, Lyrics, Onset, SyncedLyricsFrame,
};
use cadence_core::timestamp::frame_millis;
use std::time::Duration;
use tracing::debug;

/// Element id of the `n`th chapter (1-based)
pub(super) fn element_id(number: usize) -> String {
    format!("CHAPTER{:03}", number)
}

pub(super) fn decode_lyrics(store: &Store<'_>, ctx: &DecodeContext) -> Option<Lyrics> {
    let Store::Id3v2(tag) = store else {
        return None;
    };
    tag.frames(FrameKind::SyncedLyrics)
        .into_iter()
        .find_map(|frame| match frame {
            Frame::SyncedLyrics(sylt) => Some(sylt),
            _ => None,
        })
        .map(|sylt| {
            let onsets = sylt
                .content
                .into_iter()
                .map(|(ms, text)| Onset::from_millis(ms, text));
            Lyrics::from_onsets(onsets, ctx.duration)
        })
}

/// Unsynchronized lyrics have no timing to store, so `SYLT` is removed
pub(super) fn encode_lyrics(
    store: &mut Store<'_>,
    lyrics: Option<&Lyrics>,
    options: &EncodeOptions,
) -> bool {
    let Store::Id3v2(tag) = store else {
        return false;
    };
    let desired = match lyrics {
        Some(lyrics) if lyrics.synchronized() => vec![Frame::SyncedLyrics(SyncedLyricsFrame {
            lang: lyric_language(&**tag, options),
            description: String::new(),
            content: lyrics.to_synched_text(),
        })],
        _ => Vec::new(),
    };
    sync_frames(&mut **tag, FrameKind::SyncedLyrics, &any_frame, desired)
}

pub(super) fn decode_chapters(store: &Store<'_>) -> Option<ChapterCollection> {
    let Store::Id3v2(tag) = store else {
        return None;
    };
    let frames = tag.frames(FrameKind::Chapter);
    if frames.is_empty() {
        return None;
    }

    let chapters = frames.into_iter().filter_map(|frame| match frame {
        Frame::Chapter(chap) => match chap.title {
            Some(title) if !title.is_empty() => Some(Chapter::new(
                title,
                Duration::from_millis(u64::from(chap.start_ms)),
                Duration::from_millis(u64::from(chap.end_ms)),
            )),
            _ => {
                debug!("Skipping untitled chapter {}", chap.element_id);
                None
            }
        },
        _ => None,
    });
    Some(chapters.collect())
}

pub(super) fn encode_chapters(store: &mut Store<'_>, chapters: Option<&ChapterCollection>) -> bool {
    let Store::Id3v2(tag) = store else {
        return false;
    };
    let desired = chapters
        .map(|chapters| {
            chapters
                .chapters()
                .into_iter()
                .enumerate()
                .map(|(index, chapter)| {
                    Frame::Chapter(ChapterFrame {
                        element_id: element_id(index + 1),
                        start_ms: frame_millis(chapter.start),
                        end_ms: frame_millis(chapter.end),
                        title: Some(chapter.text.clone()),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    sync_frames(&mut **tag, FrameKind::Chapter, &any_frame, desired)
}
