/// Media files and their tag containers
use super::{sidecar_path, ApeFields, Id3Tag, StdFs, Tracked, XiphTag};
use crate::adapters::{DecodeContext, SidecarLines, Store};
use crate::config::SidecarSettings;
use crate::error::{Result, TagError};
use id3::{Tag, Version};
use lofty::flac::FlacFile;
use lofty::mpeg::MpegFile;
use lofty::ogg::VorbisFile;
use lofty::{AudioFile, ParseOptions, TagExt};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Supported container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// MP3: ID3v2 plus an optional APE tag
    Mpeg,
    /// FLAC: Vorbis comments
    Flac,
    /// Ogg Vorbis: Vorbis comments
    Ogg,
}

impl MediaKind {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "mp3" => Some(Self::Mpeg),
            "flac" => Some(Self::Flac),
            "ogg" | "oga" => Some(Self::Ogg),
            _ => None,
        }
    }
}

/// What a set of stores is for; picks the companion file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Lyrics (`.lrc`)
    Lyrics,
    /// Chapters (`.chp`)
    Chapters,
}

#[derive(Debug)]
struct Sidecar {
    path: PathBuf,
    lines: SidecarLines,
    saved: SidecarLines,
}

impl Sidecar {
    fn load(path: PathBuf) -> Result<Self> {
        let lines = SidecarLines::load(&StdFs, &path)?;
        Ok(Self {
            path,
            saved: lines.clone(),
            lines,
        })
    }

    fn save(&mut self) -> Result<bool> {
        if self.lines == self.saved {
            return Ok(false);
        }
        self.lines.store(&StdFs, &self.path)?;
        self.saved = self.lines.clone();
        Ok(true)
    }
}

/// An opened media file
///
/// Holds every tag container the file carries plus its companion files.
/// Nothing touches the disk until [`MediaFile::save`], and then only the
/// containers that changed are written.
#[derive(Debug)]
pub struct MediaFile {
    path: PathBuf,
    kind: MediaKind,
    duration: Option<Duration>,
    id3: Option<Tracked<Id3Tag>>,
    ape: Option<Tracked<ApeFields>>,
    vorbis: Option<Tracked<XiphTag>>,
    lyrics_sidecar: Option<Sidecar>,
    chapters_sidecar: Option<Sidecar>,
}

impl MediaFile {
    /// Open `path` and read its tags
    ///
    /// Companion files are loaded when `sidecar` allows reading or writing
    /// them.
    pub fn open(path: impl AsRef<Path>, sidecar: &SidecarSettings) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TagError::FileNotFound(path.display().to_string()));
        }
        let kind = MediaKind::from_path(path)
            .ok_or_else(|| TagError::UnsupportedFormat(path.display().to_string()))?;

        let mut file = Self {
            path: path.to_path_buf(),
            kind,
            duration: None,
            id3: None,
            ape: None,
            vorbis: None,
            lyrics_sidecar: None,
            chapters_sidecar: None,
        };

        let mut reader = File::open(path)?;
        match kind {
            MediaKind::Mpeg => {
                let mpeg = MpegFile::read_from(&mut reader, ParseOptions::new())?;
                file.duration = Some(mpeg.properties().duration());
                file.ape = mpeg.ape().cloned().map(|tag| Tracked::new(ApeFields::new(tag)));
                file.id3 = Some(Tracked::new(Id3Tag::new(read_id3(path)?)));
            }
            MediaKind::Flac => {
                let flac = FlacFile::read_from(&mut reader, ParseOptions::new())?;
                file.duration = Some(flac.properties().duration());
                file.vorbis = Some(Tracked::new(XiphTag::new(
                    flac.vorbis_comments().cloned().unwrap_or_default(),
                )));
            }
            MediaKind::Ogg => {
                let ogg = VorbisFile::read_from(&mut reader, ParseOptions::new())?;
                file.duration = Some(ogg.properties().duration());
                file.vorbis = Some(Tracked::new(XiphTag::new(ogg.vorbis_comments().clone())));
            }
        }
        file.duration = file.duration.filter(|d| !d.is_zero());

        if sidecar.read || sidecar.write {
            file.lyrics_sidecar = Some(Sidecar::load(sidecar_path(path, &sidecar.lyrics_extension))?);
            file.chapters_sidecar =
                Some(Sidecar::load(sidecar_path(path, &sidecar.chapters_extension))?);
        }

        debug!(
            "Opened {} ({:?}, duration {:?})",
            path.display(),
            kind,
            file.duration
        );
        Ok(file)
    }

    /// Path of the media file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Container format
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Playback length, when known
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// Decode context for this file
    pub fn context(&self) -> DecodeContext {
        DecodeContext {
            duration: self.duration,
        }
    }

    /// Every store that may hold `target`: tags first, then the companion file
    pub fn stores(&mut self, target: Target) -> Vec<Store<'_>> {
        let mut stores = Vec::new();
        if let Some(tag) = self.id3.as_mut() {
            stores.push(Store::Id3v2(tag));
        }
        if let Some(tag) = self.vorbis.as_mut() {
            stores.push(Store::Xiph(tag));
        }
        if let Some(tag) = self.ape.as_mut() {
            stores.push(Store::Ape(tag));
        }
        let sidecar = match target {
            Target::Lyrics => self.lyrics_sidecar.as_mut(),
            Target::Chapters => self.chapters_sidecar.as_mut(),
        };
        if let Some(sidecar) = sidecar {
            stores.push(Store::Sidecar(&mut sidecar.lines));
        }
        stores
    }

    /// Check if anything needs saving
    pub fn is_dirty(&self) -> bool {
        self.id3.as_ref().is_some_and(Tracked::is_dirty)
            || self.ape.as_ref().is_some_and(Tracked::is_dirty)
            || self.vorbis.as_ref().is_some_and(Tracked::is_dirty)
            || [&self.lyrics_sidecar, &self.chapters_sidecar]
                .into_iter()
                .flatten()
                .any(|sidecar| sidecar.lines != sidecar.saved)
    }

    /// Write every modified container back to disk
    ///
    /// Returns whether anything was written.
    pub fn save(&mut self) -> Result<bool> {
        let mut saved = false;

        if let Some(tag) = self.id3.as_mut().filter(|tag| tag.is_dirty()) {
            if tag.get().is_empty() {
                Tag::remove_from_path(&self.path)?;
            } else {
                tag.get().inner().write_to_path(&self.path, Version::Id3v24)?;
            }
            tag.mark_clean();
            info!("Saved ID3v2 tag to {}", self.path.display());
            saved = true;
        }

        if let Some(tag) = self.ape.as_mut().filter(|tag| tag.is_dirty()) {
            tag.get().inner().save_to_path(&self.path)?;
            tag.mark_clean();
            info!("Saved APE tag to {}", self.path.display());
            saved = true;
        }

        if let Some(tag) = self.vorbis.as_mut().filter(|tag| tag.is_dirty()) {
            tag.get().inner().save_to_path(&self.path)?;
            tag.mark_clean();
            info!("Saved Vorbis comments to {}", self.path.display());
            saved = true;
        }

        for sidecar in [&mut self.lyrics_sidecar, &mut self.chapters_sidecar]
            .into_iter()
            .flatten()
        {
            if sidecar.save()? {
                info!("Saved {}", sidecar.path.display());
                saved = true;
            }
        }

        Ok(saved)
    }
}

/// Read the ID3v2 tag, starting fresh when there is none
fn read_id3(path: &Path) -> Result<Tag> {
    match Tag::read_from_path(path) {
        Ok(tag) => Ok(tag),
        Err(id3::Error {
            kind: id3::ErrorKind::NoTag,
            ..
        }) => Ok(Tag::new()),
        Err(id3::Error {
            partial_tag: Some(tag),
            description,
            ..
        }) => {
            warn!("Using partially read ID3v2 tag of {}: {}", path.display(), description);
            Ok(tag)
        }
        Err(err) => Err(err.into()),
    }
}
