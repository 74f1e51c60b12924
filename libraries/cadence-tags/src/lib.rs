//! Cadence Tags
//!
//! Keeps lyrics and chapters in sync across every encoding a media file can
//! carry them in.
//!
//! This crate provides:
//! - Format adapters for the structured, flat, single-string, rich and
//!   sidecar encodings
//! - A sync engine that reads the best available encoding and only rewrites
//!   the ones whose content actually changed
//! - Tag backends for `id3` and `lofty`, plus an in-memory tag
//! - Configuration loading
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Chapter, ChapterCollection};
//! use cadence_tags::{DecodeContext, MemoryTag, Store, SyncEngine};
//! use std::time::Duration;
//!
//! let chapters: ChapterCollection = vec![
//!     Chapter::new("Intro", Duration::ZERO, Duration::from_secs(30)),
//!     Chapter::new("Theme", Duration::from_secs(30), Duration::from_secs(95)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut id3 = MemoryTag::new();
//! let engine = SyncEngine::default();
//!
//! // The first write changes the tag, repeating it does not
//! assert!(engine.write_chapters(&mut [Store::Id3v2(&mut id3)], Some(&chapters)));
//! assert!(!engine.write_chapters(&mut [Store::Id3v2(&mut id3)], Some(&chapters)));
//!
//! let read = engine
//!     .read_chapters(&[Store::Id3v2(&mut id3)], &DecodeContext::default())
//!     .unwrap();
//! assert_eq!(read, Some(chapters));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod adapters;
pub mod backend;
pub mod config;
pub mod diff;
pub mod engine;
mod error;
pub mod language;

pub use adapters::{Adapter, DecodeContext, EncodeOptions, Encoding, SidecarLines, Store};
pub use backend::{
    sidecar_path, ApeFields, Id3Tag, MediaFile, MediaKind, MemoryTag, StdFs, Target, Tracked,
    XiphTag,
};
pub use config::{LyricTypes, SidecarSettings, SyncConfig};
pub use engine::SyncEngine;
pub use error::{Result, TagError};
pub use language::{read_language, write_language};
