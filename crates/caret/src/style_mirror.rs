//! Keeping a mirror styled and sized like its source field.

use css::MIRRORED_PROPERTIES;

use crate::field::SourceField;
use crate::mirror::MirrorElement;

/// Sizes closer than this are considered equal.
const SIZE_EPSILON: f32 = 0.01;

/// Copy the source's layout-affecting style onto the mirror and pin the
/// mirror to the source's content size.
pub fn sync(source: &dyn SourceField, mirror: &mut MirrorElement) {
    let computed = source.computed_style();
    let size = source.content_size();
    let client = source.client_size();
    let scroll = source.scroll_size();
    let multiline = source.kind().is_multiline();

    let style = mirror.style_mut();
    for &property in MIRRORED_PROPERTIES {
        if let Some(value) = computed.get(property) {
            style.set(property, value);
        }
    }

    style.set("width", format!("{}px", size.width));
    style.set("height", format!("{}px", size.height));
    style.set("position", "absolute");
    style.set("left", "-9999px");

    if multiline {
        style.set("word-wrap", "break-word");
        style.set("overflow-wrap", "break-word");
        style.set("white-space", "pre-wrap");
    } else {
        style.set("word-wrap", "normal");
        style.set("white-space", "nowrap");
    }

    let overflow_axes = [
        ("overflow-y", scroll.height > client.height + SIZE_EPSILON),
        ("overflow-x", scroll.width > client.width + SIZE_EPSILON),
    ];
    for (property, overflows) in overflow_axes {
        if overflows {
            style.set(property, "scroll");
        } else {
            // A gutter added by an earlier sync must not outlive the overflow.
            style.set(property, computed.get(property).unwrap_or("visible"));
        }
    }

    log::debug!(
        target: "caret.mirror",
        "synced mirror for {}: {}x{} ({} declarations)",
        source.field_id(),
        size.width,
        size.height,
        style.len()
    );
}

/// Whether the source's content size drifted from the size the mirror is
/// pinned to.
pub fn needs_resync(source: &dyn SourceField, mirror: &MirrorElement) -> bool {
    let size = source.content_size();
    match mirror.pinned_size() {
        Some((width, height)) => {
            (width - size.width).abs() > SIZE_EPSILON || (height - size.height).abs() > SIZE_EPSILON
        }
        None => true,
    }
}

/// Resync when needed; returns whether a sync ran.
pub(crate) fn resync_if_needed(source: &dyn SourceField, mirror: &mut MirrorElement) -> bool {
    if !needs_resync(source, mirror) {
        return false;
    }
    sync(source, mirror);
    true
}
