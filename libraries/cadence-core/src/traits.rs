/// Capability traits for tag containers and companion files
///
/// The engine never parses container formats itself. It talks to whatever
/// tag library is in use through these narrow interfaces.
use crate::error::Result;
use crate::types::{Frame, FrameKind};
use std::path::Path;

/// Structured, frame-based tag container (ID3v2)
pub trait FrameTag {
    /// Frames of `kind`, in container order
    fn frames(&self, kind: FrameKind) -> Vec<Frame>;

    /// Check if any frame of `kind` exists
    fn has_frames(&self, kind: FrameKind) -> bool {
        !self.frames(kind).is_empty()
    }

    /// Add a frame
    fn add_frame(&mut self, frame: Frame);

    /// Remove the first frame equal to `frame`
    ///
    /// Returns false if no such frame was present.
    fn remove_frame(&mut self, frame: &Frame) -> bool;

    /// Render a frame to the bytes the container would store
    ///
    /// Used for change detection; the default is a canonical encoding.
    fn render(&self, frame: &Frame) -> Vec<u8> {
        frame.render()
    }

    /// Identity and stored bytes of every frame of `kind`
    ///
    /// Must cover frames that [`FrameTag::frames`] cannot represent, and
    /// render them from what the container actually holds.
    fn stored(&self, kind: FrameKind) -> Vec<(String, Vec<u8>)> {
        self.frames(kind)
            .iter()
            .map(|frame| (frame.identity(), self.render(frame)))
            .collect()
    }

    /// Remove every frame of `kind` whose identity satisfies `matches`
    ///
    /// Returns the number of frames removed.
    fn remove_frames(&mut self, kind: FrameKind, matches: &dyn Fn(&str) -> bool) -> usize {
        let doomed: Vec<Frame> = self
            .frames(kind)
            .into_iter()
            .filter(|frame| matches(&frame.identity()))
            .collect();
        doomed.iter().filter(|frame| self.remove_frame(frame)).count()
    }

    /// First value of a plain text frame (`TLAN`, ...)
    fn text_frame(&self, id: &str) -> Option<String>;

    /// Replace (`Some`) or remove (`None`) a plain text frame
    fn set_text_frame(&mut self, id: &str, value: Option<String>);
}

/// Flat key to string-list container (Vorbis comments, APE)
pub trait FieldTag {
    /// All values stored under `key`; empty when absent
    fn field(&self, key: &str) -> Vec<String>;

    /// Replace the values under `key`, or remove the key with `None`
    fn set_field(&mut self, key: &str, values: Option<Vec<String>>);

    /// First value stored under `key`
    fn first_field(&self, key: &str) -> Option<String> {
        self.field(key).into_iter().next()
    }
}

/// File-system access for sidecar files
pub trait SidecarSource {
    /// Check if `path` exists
    fn exists(&self, path: &Path) -> bool;

    /// Read `path` as lines
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>;

    /// Write `lines` to `path`, or delete it with `None`
    fn write_lines(&self, path: &Path, lines: Option<&[String]>) -> Result<()>;
}
