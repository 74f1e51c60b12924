//! Sidecar encoding: `.lrc` / `.chp` companion files

use super::{lyrics_from_lines, lyrics_to_lines, onsets_from_lines, DecodeContext, Store};
use cadence_core::{timestamp, ChapterCollection, Lyrics, Result, SidecarSource};
use std::path::Path;

/// In-memory contents of a companion file
///
/// `None` means the file does not exist, which is different from an empty
/// file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidecarLines {
    lines: Option<Vec<String>>,
}

impl SidecarLines {
    /// A file that does not exist
    pub fn absent() -> Self {
        Self::default()
    }

    /// A file with `lines`
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines: Some(lines) }
    }

    /// Load `path`, or an absent file if it does not exist
    pub fn load(source: &dyn SidecarSource, path: &Path) -> Result<Self> {
        if !source.exists(path) {
            return Ok(Self::absent());
        }
        Ok(Self::new(source.read_lines(path)?))
    }

    /// Write the lines to `path`, deleting it when absent
    pub fn store(&self, source: &dyn SidecarSource, path: &Path) -> Result<()> {
        source.write_lines(path, self.lines.as_deref())
    }

    /// Current lines, if the file exists
    pub fn lines(&self) -> Option<&[String]> {
        self.lines.as_deref()
    }

    /// Check if the file exists
    pub fn is_present(&self) -> bool {
        self.lines.is_some()
    }

    /// Replace the contents; returns whether they differ
    pub fn replace(&mut self, lines: Option<Vec<String>>) -> bool {
        let changed = self.lines != lines;
        if changed {
            self.lines = lines;
        }
        changed
    }
}

pub(super) fn decode_lyrics(store: &Store<'_>, ctx: &DecodeContext) -> Option<Lyrics> {
    let Store::Sidecar(file) = store else {
        return None;
    };
    lyrics_from_lines(file.lines()?, ctx.duration)
}

pub(super) fn encode_lyrics(store: &mut Store<'_>, lyrics: Option<&Lyrics>) -> bool {
    let Store::Sidecar(file) = store else {
        return false;
    };
    file.replace(lyrics.map(lyrics_to_lines))
}

pub(super) fn decode_chapters(store: &Store<'_>, ctx: &DecodeContext) -> Option<ChapterCollection> {
    let Store::Sidecar(file) = store else {
        return None;
    };
    let onsets = onsets_from_lines(file.lines()?);
    if onsets.is_empty() {
        return None;
    }
    Some(ChapterCollection::from_onsets(onsets, ctx.duration))
}

pub(super) fn encode_chapters(store: &mut Store<'_>, chapters: Option<&ChapterCollection>) -> bool {
    let Store::Sidecar(file) = store else {
        return false;
    };
    let lines = chapters.map(|chapters| {
        chapters
            .chapters()
            .into_iter()
            .map(|chapter| timestamp::format_line(chapter.start, &chapter.text))
            .collect()
    });
    file.replace(lines)
}
