//! Sync engine
//!
//! Reads pick the best encoding available across all stores; writes push one
//! collection into every encoding the configuration keeps, and clear the
//! ones it does not.

use crate::adapters::{Adapter, DecodeContext, EncodeOptions, Encoding, Store};
use crate::config::SyncConfig;
use cadence_core::{resolve_first, Attempt, ChapterCollection, Lyrics, Result};
use tracing::debug;

/// Lyric encodings, richest first
const LYRICS_READ_ORDER: [Encoding; 5] = [
    Encoding::Rich,
    Encoding::Structured,
    Encoding::Flat,
    Encoding::Sidecar,
    Encoding::SingleString,
];

/// Chapter encodings, richest first
const CHAPTERS_READ_ORDER: [Encoding; 4] = [
    Encoding::Rich,
    Encoding::Structured,
    Encoding::Flat,
    Encoding::Sidecar,
];

/// Reads and writes lyrics and chapters according to a [`SyncConfig`]
#[derive(Debug, Clone, Default)]
pub struct SyncEngine {
    config: SyncConfig,
    options: EncodeOptions,
}

impl SyncEngine {
    /// Create an engine
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            options: EncodeOptions::default(),
        }
    }

    /// Override encoder settings
    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Build one deferred read per (encoding, store) pair, in priority order
    fn attempts<'s, 'a: 's, C: 's>(
        &self,
        order: &[Encoding],
        stores: &'s [Store<'a>],
        ctx: &'s DecodeContext,
    ) -> Vec<Attempt<'s, C>>
    where
        Encoding: Adapter<C>,
    {
        let mut attempts: Vec<Attempt<'s, C>> = Vec::new();
        for &encoding in order {
            if encoding == Encoding::Sidecar && !self.config.sidecar.read {
                continue;
            }
            for store in stores {
                attempts.push(Box::new(move || {
                    <Encoding as Adapter<C>>::decode(&encoding, store, ctx)
                }));
            }
        }
        attempts
    }

    /// Read lyrics from the best available encoding
    ///
    /// Rich payloads win over structured or flat ones, which win over
    /// companion files and finally plain text. A corrupt rich payload is an
    /// error rather than a reason to fall back.
    pub fn read_lyrics(&self, stores: &[Store<'_>], ctx: &DecodeContext) -> Result<Option<Lyrics>> {
        resolve_first(self.attempts(&LYRICS_READ_ORDER, stores, ctx))
    }

    /// Read chapters from the best available encoding
    pub fn read_chapters(
        &self,
        stores: &[Store<'_>],
        ctx: &DecodeContext,
    ) -> Result<Option<ChapterCollection>> {
        resolve_first(self.attempts(&CHAPTERS_READ_ORDER, stores, ctx))
    }

    /// Whether `encoding` should hold lyrics under the current configuration
    fn keeps_lyrics(&self, encoding: Encoding) -> bool {
        let types = self.config.lyric_types;
        match encoding {
            Encoding::Rich => types.rich,
            Encoding::Structured | Encoding::Flat => types.synced,
            Encoding::SingleString => types.simple,
            Encoding::Sidecar => self.config.sidecar.write,
        }
    }

    /// Whether `encoding` should hold chapters under the current configuration
    fn keeps_chapters(&self, encoding: Encoding) -> bool {
        match encoding {
            Encoding::Rich => self.config.rich_chapters,
            Encoding::Structured | Encoding::Flat => true,
            Encoding::SingleString => false,
            Encoding::Sidecar => self.config.sidecar.write,
        }
    }

    fn write<C>(
        &self,
        stores: &mut [Store<'_>],
        value: Option<&C>,
        keeps: impl Fn(Encoding) -> bool,
    ) -> bool
    where
        Encoding: Adapter<C>,
    {
        let mut changed = false;
        for store in stores.iter_mut() {
            for encoding in Encoding::ALL {
                // Companion files are only touched when writing them is enabled.
                if encoding == Encoding::Sidecar && !self.config.sidecar.write {
                    continue;
                }
                let desired = if keeps(encoding) { value } else { None };
                changed |= <Encoding as Adapter<C>>::encode(&encoding, store, desired, &self.options);
            }
        }
        debug!("Write finished, changed: {}", changed);
        changed
    }

    /// Write lyrics (or remove them with `None`) to every store
    ///
    /// Returns whether any store changed. Every store is visited even after
    /// a change has been found.
    pub fn write_lyrics(&self, stores: &mut [Store<'_>], lyrics: Option<&Lyrics>) -> bool {
        self.write(stores, lyrics, |encoding| self.keeps_lyrics(encoding))
    }

    /// Write chapters (or remove them with `None`) to every store
    pub fn write_chapters(
        &self,
        stores: &mut [Store<'_>],
        chapters: Option<&ChapterCollection>,
    ) -> bool {
        self.write(stores, chapters, |encoding| self.keeps_chapters(encoding))
    }
}
