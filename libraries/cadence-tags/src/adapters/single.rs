//! Single-string encoding: plain lyrics in one text value

use super::{any_frame, lyric_language, sync_field, sync_frames, EncodeOptions, Store};
use cadence_core::{Frame, FrameKind, Lyrics, UnsyncedLyricsFrame};

/// Vorbis field holding plain lyrics
pub const XIPH_UNSYNCED_LYRICS: &str = "UNSYNCED LYRICS";
/// APE item holding plain lyrics
pub const APE_LYRICS: &str = "Lyrics";

fn read_text(store: &Store<'_>) -> Option<String> {
    match store {
        Store::Id3v2(tag) => tag
            .frames(FrameKind::UnsyncedLyrics)
            .into_iter()
            .find_map(|frame| match frame {
                Frame::UnsyncedLyrics(uslt) => Some(uslt.text),
                _ => None,
            }),
        Store::Xiph(tag) => tag.first_field(XIPH_UNSYNCED_LYRICS),
        Store::Ape(tag) => tag.first_field(APE_LYRICS),
        Store::Sidecar(_) => None,
    }
}

pub(super) fn decode_lyrics(store: &Store<'_>) -> Option<Lyrics> {
    read_text(store)
        .filter(|text| !text.is_empty())
        .map(|text| Lyrics::from_plain_text(&text))
}

pub(super) fn encode_lyrics(
    store: &mut Store<'_>,
    lyrics: Option<&Lyrics>,
    options: &EncodeOptions,
) -> bool {
    let text = lyrics.map(Lyrics::to_simple);
    match store {
        Store::Id3v2(tag) => {
            let desired = text
                .map(|text| {
                    Frame::UnsyncedLyrics(UnsyncedLyricsFrame {
                        lang: lyric_language(&**tag, options),
                        description: String::new(),
                        text,
                    })
                })
                .into_iter()
                .collect();
            sync_frames(&mut **tag, FrameKind::UnsyncedLyrics, &any_frame, desired)
        }
        Store::Xiph(tag) => sync_field(&mut **tag, XIPH_UNSYNCED_LYRICS, text),
        Store::Ape(tag) => sync_field(&mut **tag, APE_LYRICS, text),
        Store::Sidecar(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Adapter, DecodeContext, Encoding};
    use crate::backend::MemoryTag;
    use cadence_core::{FieldTag, FrameTag, LyricsEntry};
    use std::time::Duration;

    #[test]
    fn timing_is_dropped_when_flattening() {
        let mut tag = MemoryTag::new();
        let lyrics = Lyrics::from_entries(vec![
            LyricsEntry::new("second", Duration::from_secs(2), Duration::from_secs(3)),
            LyricsEntry::new("first", Duration::from_secs(1), Duration::from_secs(2)),
        ]);

        let mut store = Store::Ape(&mut tag);
        assert!(Encoding::SingleString.encode(&mut store, Some(&lyrics), &EncodeOptions::default()));
        drop(store);
        assert_eq!(tag.field(APE_LYRICS), vec!["first\nsecond"]);
    }

    #[test]
    fn empty_text_reads_as_nothing() {
        let mut tag = MemoryTag::new();
        tag.set_field(XIPH_UNSYNCED_LYRICS, Some(vec![String::new()]));
        let store = Store::Xiph(&mut tag);
        let decoded: Option<Lyrics> =
            Encoding::SingleString.decode(&store, &DecodeContext::default()).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn uslt_round_trips_as_unsynchronized_text() {
        let mut tag = MemoryTag::new();
        let lyrics = Lyrics::from_plain_text("la\nla");

        let mut store = Store::Id3v2(&mut tag);
        assert!(Encoding::SingleString.encode(&mut store, Some(&lyrics), &EncodeOptions::default()));
        let decoded: Lyrics = Encoding::SingleString
            .decode(&store, &DecodeContext::default())
            .unwrap()
            .unwrap();
        assert!(!decoded.synchronized());
        assert_eq!(decoded, lyrics);

        assert!(Encoding::SingleString.encode(&mut store, None::<&Lyrics>, &EncodeOptions::default()));
        drop(store);
        assert!(!tag.has_frames(FrameKind::UnsyncedLyrics));
    }
}
