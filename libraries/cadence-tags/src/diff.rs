//! Change detection
//!
//! Writers compute the desired encoded state, compare it with what the
//! container already holds and only touch the container when the two differ.
//! Comparisons are on exact bytes; absence and emptiness are distinct.

use cadence_core::{Frame, FrameTag};

/// An encoded item: stable identity plus the bytes the container stores
pub type Rendered = (String, Vec<u8>);

/// Compare two item sets, ignoring order
///
/// Items are sorted by `(identity, bytes)` and compared element-wise, so the
/// same content stored in a different order is unchanged.
pub fn items_changed(mut existing: Vec<Rendered>, mut desired: Vec<Rendered>) -> bool {
    if existing.len() != desired.len() {
        return true;
    }
    existing.sort_unstable();
    desired.sort_unstable();
    existing != desired
}

/// Compare stored frames with desired ones rendered by the container
///
/// `existing` comes from [`FrameTag::stored`], so it reflects the bytes the
/// tag really holds rather than a re-rendering of the neutral model.
pub fn frames_changed(tag: &dyn FrameTag, existing: Vec<Rendered>, desired: &[Frame]) -> bool {
    let desired = desired
        .iter()
        .map(|frame| (frame.identity(), tag.render(frame)))
        .collect();
    items_changed(existing, desired)
}

/// Compare a single-valued field with its desired value
///
/// `None` means the field should be absent. A field holding more than one
/// value never equals a single desired value.
pub fn field_changed(existing: &[String], desired: Option<&str>) -> bool {
    match (existing, desired) {
        ([], None) => false,
        ([current], Some(value)) => current != value,
        _ => true,
    }
}
