/// `FrameTag` for `id3` tags
use cadence_core::{
    ChapterFrame, Frame, FrameKind, FrameTag, SyncedLyricsFrame, UnsyncedLyricsFrame,
    UserTextFrame,
};
use id3::frame::{
    Chapter, Content, ExtendedText, Lyrics, SynchronisedLyrics, SynchronisedLyricsType,
    TimestampFormat,
};
use id3::{Tag, TagLike, Version};
use tracing::debug;

/// Sub-frame carrying a chapter's title
const CHAPTER_TITLE: &str = "TIT2";

/// Convert a neutral frame to an `id3` frame
fn to_native(frame: &Frame) -> id3::Frame {
    let content = match frame {
        Frame::Chapter(chap) => Content::Chapter(Chapter {
            element_id: chap.element_id.clone(),
            start_time: chap.start_ms,
            end_time: chap.end_ms,
            start_offset: u32::MAX,
            end_offset: u32::MAX,
            frames: chap
                .title
                .iter()
                .map(|title| id3::Frame::text(CHAPTER_TITLE, title.clone()))
                .collect(),
        }),
        Frame::SyncedLyrics(sylt) => Content::SynchronisedLyrics(SynchronisedLyrics {
            lang: sylt.lang.clone(),
            timestamp_format: TimestampFormat::Ms,
            content_type: SynchronisedLyricsType::Lyrics,
            description: sylt.description.clone(),
            content: sylt.content.clone(),
        }),
        Frame::UnsyncedLyrics(uslt) => Content::Lyrics(Lyrics {
            lang: uslt.lang.clone(),
            description: uslt.description.clone(),
            text: uslt.text.clone(),
        }),
        Frame::UserText(txxx) => Content::ExtendedText(ExtendedText {
            description: txxx.description.clone(),
            value: txxx.value.clone(),
        }),
    };
    id3::Frame::with_content(frame.kind().id(), content)
}

/// Convert an `id3` frame to a neutral frame, timing format aside
fn neutral(frame: &id3::Frame) -> Option<Frame> {
    match frame.content() {
        Content::Chapter(chap) => Some(Frame::Chapter(ChapterFrame {
            element_id: chap.element_id.clone(),
            start_ms: chap.start_time,
            end_ms: chap.end_time,
            title: chap
                .frames
                .iter()
                .find_map(|sub| sub.content().text())
                .map(str::to_string),
        })),
        Content::SynchronisedLyrics(sylt) => Some(Frame::SyncedLyrics(SyncedLyricsFrame {
            lang: sylt.lang.clone(),
            description: sylt.description.clone(),
            content: sylt.content.clone(),
        })),
        Content::Lyrics(uslt) => Some(Frame::UnsyncedLyrics(UnsyncedLyricsFrame {
            lang: uslt.lang.clone(),
            description: uslt.description.clone(),
            text: uslt.text.clone(),
        })),
        Content::ExtendedText(txxx) => Some(Frame::UserText(UserTextFrame {
            description: txxx.description.clone(),
            value: txxx.value.clone(),
        })),
        _ => None,
    }
}

/// Convert an `id3` frame to a neutral frame the engine can decode
///
/// `SYLT` frames timed in MPEG frames are left out: their offsets cannot be
/// turned into milliseconds without the stream.
fn from_native(frame: &id3::Frame) -> Option<Frame> {
    if let Content::SynchronisedLyrics(sylt) = frame.content() {
        if sylt.timestamp_format != TimestampFormat::Ms {
            debug!("Skipping SYLT frame with MPEG frame timestamps");
            return None;
        }
    }
    neutral(frame)
}

/// Render one native frame as a single-frame ID3v2.4 tag
fn render_native(frame: id3::Frame) -> std::result::Result<Vec<u8>, id3::Error> {
    let mut scratch = Tag::new();
    scratch.add_frame(frame);
    let mut bytes = Vec::new();
    scratch.write_to(&mut bytes, Version::Id3v24)?;
    Ok(bytes)
}

/// An `id3` tag exposed to the sync engine
#[derive(Debug, Clone, Default)]
pub struct Id3Tag(Tag);

impl Id3Tag {
    /// Wrap a tag
    pub fn new(tag: Tag) -> Self {
        Self(tag)
    }

    /// The wrapped tag
    pub fn inner(&self) -> &Tag {
        &self.0
    }

    /// Unwrap the tag
    pub fn into_inner(self) -> Tag {
        self.0
    }

    /// Check if the tag holds no frames at all
    pub fn is_empty(&self) -> bool {
        self.0.frames().next().is_none()
    }

    fn native(&self, kind: FrameKind) -> impl Iterator<Item = &id3::Frame> {
        self.0.frames().filter(move |frame| frame.id() == kind.id())
    }
}

impl From<Tag> for Id3Tag {
    fn from(tag: Tag) -> Self {
        Self(tag)
    }
}

impl FrameTag for Id3Tag {
    fn frames(&self, kind: FrameKind) -> Vec<Frame> {
        self.native(kind).filter_map(from_native).collect()
    }

    fn add_frame(&mut self, frame: Frame) {
        self.0.add_frame(to_native(&frame));
    }

    fn remove_frame(&mut self, frame: &Frame) -> bool {
        let mut removed = false;
        for native in self.0.remove(frame.kind().id()) {
            if !removed && from_native(&native).as_ref() == Some(frame) {
                removed = true;
                continue;
            }
            self.0.add_frame(native);
        }
        removed
    }

    fn render(&self, frame: &Frame) -> Vec<u8> {
        render_native(to_native(frame)).unwrap_or_else(|err| {
            debug!("Falling back to canonical rendering: {}", err);
            frame.render()
        })
    }

    /// Every stored frame of `kind`, rendered from the native frame
    ///
    /// Sub-frames, byte offsets and text encodings the neutral model drops
    /// still count, as do `SYLT` frames with MPEG timestamps.
    fn stored(&self, kind: FrameKind) -> Vec<(String, Vec<u8>)> {
        self.native(kind)
            .filter_map(|native| {
                let identity = neutral(native)?.identity();
                let bytes = render_native(native.clone()).unwrap_or_else(|err| {
                    debug!("Cannot render stored {} frame: {}", native.id(), err);
                    format!("{:?}", native).into_bytes()
                });
                Some((identity, bytes))
            })
            .collect()
    }

    fn remove_frames(&mut self, kind: FrameKind, matches: &dyn Fn(&str) -> bool) -> usize {
        let mut removed = 0;
        for native in self.0.remove(kind.id()) {
            if neutral(&native).is_some_and(|frame| matches(&frame.identity())) {
                removed += 1;
            } else {
                self.0.add_frame(native);
            }
        }
        removed
    }

    fn text_frame(&self, id: &str) -> Option<String> {
        self.0
            .get(id)
            .and_then(|frame| frame.content().text())
            .map(str::to_string)
    }

    fn set_text_frame(&mut self, id: &str, value: Option<String>) {
        self.0.remove(id);
        if let Some(value) = value {
            self.0.set_text(id, value);
        }
    }
}
