/// `FieldTag` for lofty's Vorbis comment and APE tags
use cadence_core::FieldTag;
use lofty::ape::{ApeItem, ApeTag};
use lofty::ogg::VorbisComments;
use lofty::ItemValue;
use tracing::warn;

/// APE stores multiple values in one item, separated by NUL
const APE_SEPARATOR: char = '\0';

/// Vorbis comments (FLAC, Ogg) exposed to the sync engine
#[derive(Debug, Clone, Default)]
pub struct XiphTag(VorbisComments);

impl XiphTag {
    /// Wrap a comment block
    pub fn new(comments: VorbisComments) -> Self {
        Self(comments)
    }

    /// The wrapped comment block
    pub fn inner(&self) -> &VorbisComments {
        &self.0
    }

    /// Unwrap the comment block
    pub fn into_inner(self) -> VorbisComments {
        self.0
    }
}

impl From<VorbisComments> for XiphTag {
    fn from(comments: VorbisComments) -> Self {
        Self(comments)
    }
}

impl FieldTag for XiphTag {
    fn field(&self, key: &str) -> Vec<String> {
        self.0.get_all(key).map(str::to_string).collect()
    }

    fn set_field(&mut self, key: &str, values: Option<Vec<String>>) {
        self.0.remove(key).for_each(drop);
        for value in values.into_iter().flatten() {
            self.0.push(key.to_string(), value);
        }
    }
}

/// An APEv2 tag exposed to the sync engine
#[derive(Debug, Clone, Default)]
pub struct ApeFields(ApeTag);

impl ApeFields {
    /// Wrap a tag
    pub fn new(tag: ApeTag) -> Self {
        Self(tag)
    }

    /// The wrapped tag
    pub fn inner(&self) -> &ApeTag {
        &self.0
    }

    /// Unwrap the tag
    pub fn into_inner(self) -> ApeTag {
        self.0
    }
}

impl From<ApeTag> for ApeFields {
    fn from(tag: ApeTag) -> Self {
        Self(tag)
    }
}

impl FieldTag for ApeFields {
    fn field(&self, key: &str) -> Vec<String> {
        match self.0.get(key).map(ApeItem::value) {
            Some(ItemValue::Text(text)) => text.split(APE_SEPARATOR).map(str::to_string).collect(),
            _ => Vec::new(),
        }
    }

    fn set_field(&mut self, key: &str, values: Option<Vec<String>>) {
        self.0.remove(key);
        let Some(values) = values else {
            return;
        };
        let joined = values.join(&APE_SEPARATOR.to_string());
        match ApeItem::new(key.to_string(), ItemValue::Text(joined)) {
            Ok(item) => self.0.insert(item),
            Err(err) => warn!("Cannot store APE item {}: {}", key, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vorbis_fields_hold_every_value() {
        let mut tag = XiphTag::default();
        tag.set_field("LYRICS", Some(vec!["one".into(), "two".into()]));
        assert_eq!(tag.field("LYRICS"), vec!["one", "two"]);

        tag.set_field("LYRICS", Some(vec!["three".into()]));
        assert_eq!(tag.field("LYRICS"), vec!["three"]);
        assert_eq!(tag.inner().get("LYRICS"), Some("three"));

        tag.set_field("LYRICS", None);
        assert!(tag.field("LYRICS").is_empty());
    }

    #[test]
    fn ape_items_split_on_nul() {
        let mut tag = ApeFields::default();
        assert!(tag.field("Lyrics").is_empty());

        tag.set_field("Lyrics", Some(vec!["la la".into()]));
        assert_eq!(tag.first_field("Lyrics").as_deref(), Some("la la"));

        tag.set_field("Lyrics", Some(vec!["a".into(), "b".into()]));
        assert_eq!(tag.field("Lyrics"), vec!["a", "b"]);

        tag.set_field("Lyrics", None);
        assert!(tag.field("Lyrics").is_empty());
        assert!(tag.inner().get("Lyrics").is_none());
    }
}
