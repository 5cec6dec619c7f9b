use std::collections::HashMap;

use css::{Display, Overflow, StyledNode};
use html::internal::Id;

use crate::inline::{FragmentKind, LineBox, layout_block_inline};
use crate::{MirrorLayoutOptions, Rectangle, TextMeasurer};

/// Geometry of a laid-out mirror block.
///
/// All coordinates are relative to the block's padding edge (the origin
/// used for offset-parent positions), so the first line of an unpadded
/// block starts at `(0, 0)`.
#[derive(Clone, Debug, PartialEq)]
pub struct MirrorLayout {
    pub lines: Vec<LineBox>,
    /// Content box, after subtracting scrollbar gutters.
    pub content_rect: Rectangle,
    /// Padding box of the block.
    pub padding_rect: Rectangle,
    elements: HashMap<Id, Rectangle>,
    advances: HashMap<Id, f32>,
}

impl MirrorLayout {
    /// Bounding rect of every fragment an element produced (descendants
    /// included). `None` when the element rendered nothing.
    pub fn rect_of(&self, id: Id) -> Option<Rectangle> {
        self.elements.get(&id).copied()
    }

    /// Summed width of the text an element produced, across all the lines
    /// it was wrapped onto.
    pub fn advance_of(&self, id: Id) -> f32 {
        self.advances.get(&id).copied().unwrap_or(0.0)
    }

    /// Index of the line whose vertical extent contains `y`.
    pub fn line_index_at(&self, y: f32) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| y >= l.rect.y && y <= l.rect.y + l.rect.height)
    }
}

/// Lay out the inline content of a mirror block.
///
/// Returns `None` when the block is not rendered (`display: none`).
pub fn layout_mirror(
    measurer: &dyn TextMeasurer,
    root: &StyledNode<'_>,
    options: &MirrorLayoutOptions,
) -> Option<MirrorLayout> {
    let style = &root.style;
    if style.display == Display::None {
        log::trace!(target: "layout.inline", "mirror not rendered (display: none)");
        return None;
    }

    let bm = style.box_metrics;
    let gutter = options.scrollbar_thickness.max(0.0);
    let width = style.width.map_or(f32::INFINITY, |l| l.px());
    let height = style.height.map_or(f32::INFINITY, |l| l.px());

    // A vertical scrollbar narrows the wrap width; a horizontal one only
    // shortens the visible height.
    let content_width = if style.overflow_y == Overflow::Scroll {
        (width - gutter).max(0.0)
    } else {
        width
    };
    let content_height = if style.overflow_x == Overflow::Scroll {
        (height - gutter).max(0.0)
    } else {
        height
    };

    let content_rect = Rectangle {
        x: bm.padding_left,
        y: bm.padding_top,
        width: content_width,
        height: content_height,
    };
    let padding_rect = Rectangle {
        x: 0.0,
        y: 0.0,
        width: width + bm.padding_left + bm.padding_right,
        height: height + bm.padding_top + bm.padding_bottom,
    };

    let inline = layout_block_inline(measurer, content_rect, root);
    let lines = inline.lines;

    let mut elements: HashMap<Id, Rectangle> = HashMap::new();
    let mut advances: HashMap<Id, f32> = HashMap::new();
    for line in &lines {
        for frag in &line.fragments {
            let text_width = match frag.kind {
                FragmentKind::Text(_) => frag.rect.width,
                _ => 0.0,
            };
            let mut owner = frag.owner;
            while let Some(id) = owner {
                elements
                    .entry(id)
                    .and_modify(|r| *r = r.union(&frag.rect))
                    .or_insert(frag.rect);
                *advances.entry(id).or_insert(0.0) += text_width;
                owner = inline.parents.get(&id).copied().flatten();
            }
        }
    }

    Some(MirrorLayout {
        lines,
        content_rect,
        padding_rect,
        elements,
        advances,
    })
}
