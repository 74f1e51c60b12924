//! Neutral frame model for structured (ID3v2-style) containers
//!
//! Backends translate their native frames into these values and back. Only
//! the frame kinds the sync engine touches are modelled.

/// Frame kinds the engine reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// `CHAP`
    Chapter,
    /// `SYLT`
    SyncedLyrics,
    /// `USLT`
    UnsyncedLyrics,
    /// `TXXX`
    UserText,
}

impl FrameKind {
    /// Four-character ID3v2.4 frame id
    pub fn id(self) -> &'static str {
        match self {
            Self::Chapter => "CHAP",
            Self::SyncedLyrics => "SYLT",
            Self::UnsyncedLyrics => "USLT",
            Self::UserText => "TXXX",
        }
    }
}

/// A chapter frame with its title sub-frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterFrame {
    /// Unique element id (`CHAPTER001`, ...)
    pub element_id: String,
    /// Start in milliseconds
    pub start_ms: u32,
    /// End in milliseconds
    pub end_ms: u32,
    /// First `TIT2` sub-frame, if present
    pub title: Option<String>,
}

/// Synchronized lyrics with absolute millisecond timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedLyricsFrame {
    /// ISO-639-2 language code
    pub lang: String,
    /// Content descriptor
    pub description: String,
    /// `(start in ms, text)` pairs
    pub content: Vec<(u32, String)>,
}

/// Unsynchronized lyrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsyncedLyricsFrame {
    /// ISO-639-2 language code
    pub lang: String,
    /// Content descriptor
    pub description: String,
    /// Lyrics text
    pub text: String,
}

/// User-defined text (`TXXX`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTextFrame {
    /// Description identifying the frame
    pub description: String,
    /// Value
    pub value: String,
}

/// A frame of one of the supported kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// `CHAP`
    Chapter(ChapterFrame),
    /// `SYLT`
    SyncedLyrics(SyncedLyricsFrame),
    /// `USLT`
    UnsyncedLyrics(UnsyncedLyricsFrame),
    /// `TXXX`
    UserText(UserTextFrame),
}

impl Frame {
    /// Kind of this frame
    pub fn kind(&self) -> FrameKind {
        match self {
            Self::Chapter(_) => FrameKind::Chapter,
            Self::SyncedLyrics(_) => FrameKind::SyncedLyrics,
            Self::UnsyncedLyrics(_) => FrameKind::UnsyncedLyrics,
            Self::UserText(_) => FrameKind::UserText,
        }
    }

    /// Stable identity used to pair frames before comparing them
    ///
    /// Mirrors what makes two frames conflict inside one ID3v2 tag.
    pub fn identity(&self) -> String {
        match self {
            Self::Chapter(c) => format!("CHAP:{}", c.element_id),
            Self::SyncedLyrics(s) => format!("SYLT:{}:{}", s.lang, s.description),
            Self::UnsyncedLyrics(u) => format!("USLT:{}:{}", u.lang, u.description),
            Self::UserText(t) => format!("TXXX:{}", t.description),
        }
    }

    /// Canonical byte rendering for containers without a native renderer
    ///
    /// Length-prefixed fields, so distinct frames never render equal.
    pub fn render(&self) -> Vec<u8> {
        fn push_str(out: &mut Vec<u8>, s: &str) {
            out.extend_from_slice(&(s.len() as u32).to_be_bytes());
            out.extend_from_slice(s.as_bytes());
        }

        let mut out = Vec::new();
        out.extend_from_slice(self.kind().id().as_bytes());
        match self {
            Self::Chapter(c) => {
                push_str(&mut out, &c.element_id);
                out.extend_from_slice(&c.start_ms.to_be_bytes());
                out.extend_from_slice(&c.end_ms.to_be_bytes());
                match &c.title {
                    Some(title) => {
                        out.push(1);
                        push_str(&mut out, title);
                    }
                    None => out.push(0),
                }
            }
            Self::SyncedLyrics(s) => {
                push_str(&mut out, &s.lang);
                push_str(&mut out, &s.description);
                out.extend_from_slice(&(s.content.len() as u32).to_be_bytes());
                for (ms, text) in &s.content {
                    out.extend_from_slice(&ms.to_be_bytes());
                    push_str(&mut out, text);
                }
            }
            Self::UnsyncedLyrics(u) => {
                push_str(&mut out, &u.lang);
                push_str(&mut out, &u.description);
                push_str(&mut out, &u.text);
            }
            Self::UserText(t) => {
                push_str(&mut out, &t.description);
                push_str(&mut out, &t.value);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_distinguishes_field_boundaries() {
        let a = Frame::UserText(UserTextFrame {
            description: "ab".into(),
            value: "c".into(),
        });
        let b = Frame::UserText(UserTextFrame {
            description: "a".into(),
            value: "bc".into(),
        });
        assert_ne!(a.render(), b.render());
        assert_eq!(a.render(), a.clone().render());
    }

    #[test]
    fn identity_follows_conflict_rules() {
        let chap = |id: &str, start| {
            Frame::Chapter(ChapterFrame {
                element_id: id.into(),
                start_ms: start,
                end_ms: start + 1,
                title: None,
            })
        };
        assert_eq!(chap("CHAPTER001", 0).identity(), chap("CHAPTER001", 50).identity());
        assert_ne!(chap("CHAPTER001", 0).identity(), chap("CHAPTER002", 0).identity());
        assert_eq!(chap("x", 0).kind().id(), "CHAP");
    }
}
