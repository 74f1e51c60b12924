/// Sync configuration
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Which lyric encodings are kept in a file
///
/// A disabled encoding is not just skipped on write: whatever it stored
/// before is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LyricTypes {
    /// Plain text (`USLT`, `UNSYNCED LYRICS`, APE `Lyrics`)
    pub simple: bool,
    /// Timed lyrics (`SYLT`, Vorbis `LYRICS`)
    pub synced: bool,
    /// JSON payload with channels
    pub rich: bool,
}

impl Default for LyricTypes {
    fn default() -> Self {
        Self {
            simple: true,
            synced: true,
            rich: true,
        }
    }
}

impl LyricTypes {
    /// Every encoding enabled
    pub fn all() -> Self {
        Self::default()
    }

    /// Every encoding disabled (writing clears all lyrics)
    pub fn none() -> Self {
        Self {
            simple: false,
            synced: false,
            rich: false,
        }
    }
}

/// Companion text file settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SidecarSettings {
    /// Fall back to sidecar files when the tags hold nothing
    pub read: bool,
    /// Mirror lyrics and chapters into sidecar files on write
    pub write: bool,
    /// Lyrics file extension
    pub lyrics_extension: String,
    /// Chapters file extension
    pub chapters_extension: String,
}

impl Default for SidecarSettings {
    fn default() -> Self {
        Self {
            read: true,
            write: false,
            lyrics_extension: "lrc".to_string(),
            chapters_extension: "chp".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Lyric encodings to maintain
    pub lyric_types: LyricTypes,
    /// Maintain the rich chapter payload alongside `CHAP`/`CHAPTERnnn`
    pub rich_chapters: bool,
    /// Companion files
    pub sidecar: SidecarSettings,
}

impl SyncConfig {
    /// Load configuration from an optional TOML file and the environment
    ///
    /// Environment variables use the `CADENCE_` prefix and `__` between
    /// nesting levels, e.g. `CADENCE_LYRIC_TYPES__RICH=false`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            settings = settings.add_source(config::File::from(path).required(true));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }
}
