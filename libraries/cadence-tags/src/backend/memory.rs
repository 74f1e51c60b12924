/// In-memory tag
use cadence_core::{FieldTag, Frame, FrameKind, FrameTag};

/// A tag held entirely in memory
///
/// Behaves like an ID3v2 tag and a Vorbis comment block at once. Field keys
/// compare case-insensitively, as in Vorbis comments and APE.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTag {
    frames: Vec<Frame>,
    text_frames: Vec<(String, String)>,
    fields: Vec<(String, String)>,
}

impl MemoryTag {
    /// Create an empty tag
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the tag holds nothing
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.text_frames.is_empty() && self.fields.is_empty()
    }
}

impl FrameTag for MemoryTag {
    fn frames(&self, kind: FrameKind) -> Vec<Frame> {
        self.frames
            .iter()
            .filter(|frame| frame.kind() == kind)
            .cloned()
            .collect()
    }

    fn add_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    fn remove_frame(&mut self, frame: &Frame) -> bool {
        match self.frames.iter().position(|f| f == frame) {
            Some(index) => {
                self.frames.remove(index);
                true
            }
            None => false,
        }
    }

    fn text_frame(&self, id: &str) -> Option<String> {
        self.text_frames
            .iter()
            .find(|(frame_id, _)| frame_id == id)
            .map(|(_, value)| value.clone())
    }

    fn set_text_frame(&mut self, id: &str, value: Option<String>) {
        self.text_frames.retain(|(frame_id, _)| frame_id != id);
        if let Some(value) = value {
            self.text_frames.push((id.to_string(), value));
        }
    }
}

impl FieldTag for MemoryTag {
    fn field(&self, key: &str) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.clone())
            .collect()
    }

    fn set_field(&mut self, key: &str, values: Option<Vec<String>>) {
        self.fields.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        for value in values.into_iter().flatten() {
            self.fields.push((key.to_string(), value));
        }
    }
}
