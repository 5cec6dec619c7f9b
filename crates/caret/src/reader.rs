use std::fmt;

use html::find_by_class;

use crate::config::ClassNames;
use crate::field::{Point, SourceField, border_offset};
use crate::mirror::{LayoutEnv, MirrorElement};
use crate::position::CursorPosition;
use crate::style_mirror;

/// Why a caret position could not be read from a mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureError {
    /// The mirror has no layout (`display: none`).
    NotRendered,
    /// No marker in the mirror content, or it produced no box.
    MarkerMissing,
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureError::NotRendered => write!(f, "mirror is not rendered"),
            MeasureError::MarkerMissing => write!(f, "caret marker not found in mirror"),
        }
    }
}

impl std::error::Error for MeasureError {}

/// Measure the marker inside `mirror`.
///
/// `position` is relative to the mirror's padding edge; `offset` moves it
/// onto the page through the source's border box, minus its scroll offsets.
pub fn read(
    source: &dyn SourceField,
    mirror: &mut MirrorElement,
    names: &ClassNames,
    env: &LayoutEnv<'_>,
) -> Result<CursorPosition, MeasureError> {
    if style_mirror::resync_if_needed(source, mirror) {
        log::debug!(target: "caret.reader", "{} resized; mirror resynced", source.field_id());
    }

    let marker = find_by_class(mirror.content(), &names.cursor)
        .map(|n| n.id())
        .ok_or(MeasureError::MarkerMissing)?;
    let layout = mirror.layout(env).ok_or(MeasureError::NotRendered)?;
    let rect = layout.rect_of(marker).ok_or(MeasureError::MarkerMissing)?;

    let position = Point::new(rect.x, rect.y);
    let page = source.page_offset();
    let border = border_offset(source);
    let scroll = source.scroll_offset();
    let offset = Point::new(
        page.left + border.left + position.left - scroll.left,
        page.top + border.top + position.top - scroll.top,
    );

    log::trace!(
        target: "caret.reader",
        "marker at ({}, {}), page ({}, {})",
        position.left,
        position.top,
        offset.left,
        offset.top
    );
    Ok(CursorPosition { position, offset })
}
