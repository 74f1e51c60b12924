/// Integration tests against real tag containers and files on disk
///
/// MP3 fixtures are built on the fly from silent MPEG-1 Layer III frames so
/// no binary test data needs to be checked in.
use cadence_core::{Chapter, ChapterCollection, FieldTag, FrameKind, FrameTag, Lyrics, LyricsEntry};
use cadence_tags::{
    ApeFields, DecodeContext, Id3Tag, MediaFile, MediaKind, SidecarLines, SidecarSettings, StdFs,
    Store, SyncConfig, SyncEngine, Target, XiphTag,
};
use id3::{Tag, Version};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;


use test_helpers::init_logging;

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn sample_lyrics() -> Lyrics {
    Lyrics::from_entries(vec![
        LyricsEntry::new("first", secs(0), secs(2)),
        LyricsEntry::new("second", secs(2), secs(4)),
    ])
}

fn sample_chapters() -> ChapterCollection {
    vec![
        Chapter::new("Intro", secs(0), secs(2)),
        Chapter::new("Outro", secs(2), secs(4)),
    ]
    .into_iter()
    .collect()
}

/// Write a tagless MP3 of silent 128 kbit/s, 44.1 kHz frames
fn silent_mp3(dir: &TempDir, name: &str, frames: usize) -> PathBuf {
    const FRAME_LEN: usize = 417;
    let mut data = Vec::with_capacity(FRAME_LEN * frames);
    for _ in 0..frames {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..4].copy_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
        data.extend_from_slice(&frame);
    }
    let path = dir.path().join(name);
    std::fs::write(&path, data).unwrap();
    path
}

fn read_settings() -> SidecarSettings {
    SidecarSettings::default()
}

fn write_settings() -> SidecarSettings {
    SidecarSettings {
        write: true,
        ..SidecarSettings::default()
    }
}

fn engine_with(sidecar: SidecarSettings) -> SyncEngine {
    init_logging();
    SyncEngine::new(SyncConfig {
        sidecar,
        ..SyncConfig::default()
    })
}

// ===== Native tag containers =====

#[test]
fn id3_tag_round_trips_through_the_engine() {
    init_logging();
    let mut tag = Id3Tag::default();
    let engine = SyncEngine::default();

    assert!(engine.write_lyrics(&mut [Store::Id3v2(&mut tag)], Some(&sample_lyrics())));
    assert!(engine.write_chapters(&mut [Store::Id3v2(&mut tag)], Some(&sample_chapters())));
    assert!(tag.has_frames(FrameKind::SyncedLyrics));
    assert!(tag.has_frames(FrameKind::UnsyncedLyrics));
    assert_eq!(tag.frames(FrameKind::Chapter).len(), 2);

    let ctx = DecodeContext::with_duration(secs(4));
    let stores = [Store::Id3v2(&mut tag)];
    assert_eq!(
        engine.read_lyrics(&stores, &ctx).unwrap(),
        Some(sample_lyrics())
    );
    assert_eq!(
        engine.read_chapters(&stores, &ctx).unwrap(),
        Some(sample_chapters())
    );
}

#[test]
fn id3_tag_survives_a_trip_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tagged.id3");
    std::fs::write(&path, b"").unwrap();

    init_logging();
    let engine = SyncEngine::default();
    let mut tag = Id3Tag::default();
    engine.write_chapters(&mut [Store::Id3v2(&mut tag)], Some(&sample_chapters()));
    tag.inner().write_to_path(&path, Version::Id3v24).unwrap();

    let mut reread = Id3Tag::new(Tag::read_from_path(&path).unwrap());
    assert!(!engine.write_chapters(&mut [Store::Id3v2(&mut reread)], Some(&sample_chapters())));
    let read = engine
        .read_chapters(&[Store::Id3v2(&mut reread)], &DecodeContext::default())
        .unwrap();
    assert_eq!(read, Some(sample_chapters()));
}

#[test]
fn vorbis_comments_round_trip_through_the_engine() {
    init_logging();
    let mut comments = XiphTag::default();
    let engine = SyncEngine::default();

    assert!(engine.write_lyrics(&mut [Store::Xiph(&mut comments)], Some(&sample_lyrics())));
    assert!(!engine.write_lyrics(&mut [Store::Xiph(&mut comments)], Some(&sample_lyrics())));
    assert_eq!(
        comments.first_field("LYRICS").as_deref(),
        Some("[00:00.000]first\n[00:02.000]second")
    );
    assert_eq!(comments.field("UNSYNCED LYRICS"), vec!["first\nsecond"]);

    let read = engine
        .read_lyrics(&[Store::Xiph(&mut comments)], &DecodeContext::with_duration(secs(4)))
        .unwrap();
    assert_eq!(read, Some(sample_lyrics()));
}

#[test]
fn ape_tag_only_holds_plain_lyrics() {
    init_logging();
    let mut ape = ApeFields::default();
    let engine = SyncEngine::default();

    assert!(engine.write_lyrics(&mut [Store::Ape(&mut ape)], Some(&sample_lyrics())));
    assert!(!engine.write_chapters(&mut [Store::Ape(&mut ape)], Some(&sample_chapters())));
    assert_eq!(ape.first_field("Lyrics").as_deref(), Some("first\nsecond"));

    let read = engine
        .read_lyrics(&[Store::Ape(&mut ape)], &DecodeContext::default())
        .unwrap()
        .unwrap();
    assert!(!read.synchronized());
    assert_eq!(read.len(), 2);
}

// ===== Sidecar files =====

#[test]
fn sidecar_file_is_read_and_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("song.lrc");
    std::fs::write(&path, "[00:01.000]hello\n[00:03.000]world\n").unwrap();

    let mut lines = SidecarLines::load(&StdFs, &path).unwrap();
    let engine = engine_with(write_settings());
    let read = engine
        .read_lyrics(&[Store::Sidecar(&mut lines)], &DecodeContext::with_duration(secs(5)))
        .unwrap()
        .unwrap();
    assert_eq!(read.all_lyrics()[1], &LyricsEntry::new("world", secs(3), secs(5)));

    assert!(engine.write_lyrics(&mut [Store::Sidecar(&mut lines)], None));
    lines.store(&StdFs, &path).unwrap();
    assert!(!path.exists());
}

// ===== Media files =====

fn open(path: &Path, settings: &SidecarSettings) -> MediaFile {
    MediaFile::open(path, settings).unwrap()
}

#[test]
fn mp3_gets_an_id3_tag_and_keeps_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = silent_mp3(&dir, "song.mp3", 40);
    let settings = read_settings();
    let engine = engine_with(settings.clone());

    let mut file = open(&path, &settings);
    assert_eq!(file.kind(), MediaKind::Mpeg);
    assert!(!file.is_dirty());
    assert!(engine.write_lyrics(&mut file.stores(Target::Lyrics), Some(&sample_lyrics())));
    assert!(engine.write_chapters(&mut file.stores(Target::Chapters), Some(&sample_chapters())));
    assert!(file.is_dirty());
    assert!(file.save().unwrap());
    assert!(!file.save().unwrap());

    let mut reopened = open(&path, &settings);
    let ctx = reopened.context();
    let read = engine
        .read_chapters(&reopened.stores(Target::Chapters), &ctx)
        .unwrap();
    assert_eq!(read, Some(sample_chapters()));
    let read = engine
        .read_lyrics(&reopened.stores(Target::Lyrics), &ctx)
        .unwrap()
        .unwrap();
    assert_eq!(read.all_lyrics(), sample_lyrics().all_lyrics());

    // Nothing changed, nothing to save
    assert!(!engine.write_lyrics(&mut reopened.stores(Target::Lyrics), Some(&sample_lyrics())));
    assert!(!reopened.save().unwrap());
}

#[test]
fn mp3_sidecars_are_only_written_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = silent_mp3(&dir, "song.mp3", 20);
    let lrc = dir.path().join("song.lrc");
    let chp = dir.path().join("song.chp");

    let settings = read_settings();
    let mut file = open(&path, &settings);
    engine_with(settings).write_lyrics(&mut file.stores(Target::Lyrics), Some(&sample_lyrics()));
    file.save().unwrap();
    assert!(!lrc.exists());

    let settings = write_settings();
    let mut file = open(&path, &settings);
    let engine = engine_with(settings);
    engine.write_lyrics(&mut file.stores(Target::Lyrics), Some(&sample_lyrics()));
    engine.write_chapters(&mut file.stores(Target::Chapters), Some(&sample_chapters()));
    assert!(file.save().unwrap());
    assert_eq!(
        std::fs::read_to_string(&lrc).unwrap(),
        "[00:00.000]first\n[00:02.000]second\n"
    );
    assert_eq!(
        std::fs::read_to_string(&chp).unwrap(),
        "[00:00.000]Intro\n[00:02.000]Outro\n"
    );

    let mut file = open(&path, &write_settings());
    engine.write_chapters(&mut file.stores(Target::Chapters), None);
    file.save().unwrap();
    assert!(!chp.exists());
    assert!(lrc.exists());
}
