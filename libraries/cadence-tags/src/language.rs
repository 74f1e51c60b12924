/// Track language helpers
use crate::adapters::Store;

/// ID3v2 text frame holding the language
pub const ID3_LANGUAGE: &str = "TLAN";
/// Vorbis field holding the language
pub const XIPH_LANGUAGE: &str = "LANGUAGE";

/// Read the language stored in `store`
pub fn read_language(store: &Store<'_>) -> Option<String> {
    match store {
        Store::Id3v2(tag) => tag.text_frame(ID3_LANGUAGE),
        Store::Xiph(tag) => tag.first_field(XIPH_LANGUAGE),
        Store::Ape(_) | Store::Sidecar(_) => None,
    }
    .filter(|language| !language.is_empty())
}

/// Set or remove the language; returns whether anything changed
pub fn write_language(store: &mut Store<'_>, language: Option<&str>) -> bool {
    match store {
        Store::Id3v2(tag) => {
            let changed = tag.text_frame(ID3_LANGUAGE).as_deref() != language;
            if changed {
                tag.set_text_frame(ID3_LANGUAGE, language.map(str::to_string));
            }
            changed
        }
        Store::Xiph(tag) => {
            let changed = crate::diff::field_changed(&tag.field(XIPH_LANGUAGE), language);
            if changed {
                tag.set_field(XIPH_LANGUAGE, language.map(|l| vec![l.to_string()]));
            }
            changed
        }
        Store::Ape(_) | Store::Sidecar(_) => false,
    }
}

/// Normalize a language for use in an ID3 lyrics frame
///
/// Those frames hold exactly three ASCII letters; anything else is
/// rejected.
pub fn frame_language(language: &str) -> Option<String> {
    let language = language.trim();
    (language.len() == 3 && language.bytes().all(|b| b.is_ascii_alphabetic()))
        .then(|| language.to_ascii_lowercase())
}
