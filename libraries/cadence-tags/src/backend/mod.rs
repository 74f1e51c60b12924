//! Concrete tag backends
//!
//! Capability-trait implementations for the tag libraries in use, an
//! in-memory tag for tests and tooling, and file-level access.

mod fields;
mod fs;
mod id3v2;
mod media;
mod memory;

pub use fields::{ApeFields, XiphTag};
pub use fs::{sidecar_path, StdFs};
pub use id3v2::Id3Tag;
pub use media::{MediaFile, MediaKind, Target};
pub use memory::MemoryTag;

use cadence_core::{FieldTag, Frame, FrameKind, FrameTag};

/// A tag that remembers whether it was modified
///
/// Adapters only mutate a store when its content really changes, so a
/// dirty tag is one that needs saving.
#[derive(Debug, Clone, Default)]
pub struct Tracked<T> {
    inner: T,
    dirty: bool,
}

impl<T> Tracked<T> {
    /// Wrap an unmodified tag
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            dirty: false,
        }
    }

    /// The wrapped tag
    pub fn get(&self) -> &T {
        &self.inner
    }

    /// Unwrap the tag
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Check if the tag was modified since it was wrapped or last saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forget past modifications (after saving)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl<T: FrameTag> FrameTag for Tracked<T> {
    fn frames(&self, kind: FrameKind) -> Vec<Frame> {
        self.inner.frames(kind)
    }

    fn add_frame(&mut self, frame: Frame) {
        self.dirty = true;
        self.inner.add_frame(frame);
    }

    fn remove_frame(&mut self, frame: &Frame) -> bool {
        let removed = self.inner.remove_frame(frame);
        self.dirty |= removed;
        removed
    }

    fn render(&self, frame: &Frame) -> Vec<u8> {
        self.inner.render(frame)
    }

    fn stored(&self, kind: FrameKind) -> Vec<(String, Vec<u8>)> {
        self.inner.stored(kind)
    }

    fn remove_frames(&mut self, kind: FrameKind, matches: &dyn Fn(&str) -> bool) -> usize {
        let removed = self.inner.remove_frames(kind, matches);
        self.dirty |= removed > 0;
        removed
    }

    fn text_frame(&self, id: &str) -> Option<String> {
        self.inner.text_frame(id)
    }

    fn set_text_frame(&mut self, id: &str, value: Option<String>) {
        self.dirty = true;
        self.inner.set_text_frame(id, value);
    }
}

impl<T: FieldTag> FieldTag for Tracked<T> {
    fn field(&self, key: &str) -> Vec<String> {
        self.inner.field(key)
    }

    fn set_field(&mut self, key: &str, values: Option<Vec<String>>) {
        self.dirty = true;
        self.inner.set_field(key, values);
    }
}
