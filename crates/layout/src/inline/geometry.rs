use crate::Rectangle;

#[derive(Clone, Copy, Debug)]
pub(super) struct Pos {
    pub(super) x: f32,
    pub(super) y: f32,
}

/// Size that already includes margins (margin-box).
#[derive(Clone, Copy, Debug)]
pub(super) struct MarginBoxSize {
    pub(super) width: f32,
    pub(super) height: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub(super) struct Margins {
    pub(super) left: f32,
    pub(super) right: f32,
    pub(super) top: f32,
    pub(super) bottom: f32,
}

// Returns the margin-box advance rect and the border-box rect for a box placed
// at `cursor`. Negative margins are allowed; the border box may extend outside
// the advance rect.
pub(super) fn split_margin_and_border_rect(
    cursor: Pos,
    margin_box_size: MarginBoxSize,
    margins: Margins,
) -> (Rectangle, Rectangle) {
    debug_assert!(cursor.x.is_finite() && cursor.y.is_finite());
    debug_assert!(
        margin_box_size.width >= 0.0 && margin_box_size.height >= 0.0,
        "margin box size must be non-negative: w={}, h={}",
        margin_box_size.width,
        margin_box_size.height
    );

    let advance = Rectangle {
        x: cursor.x,
        y: cursor.y,
        width: margin_box_size.width,
        height: margin_box_size.height,
    };

    let border = Rectangle {
        x: cursor.x + margins.left,
        y: cursor.y + margins.top,
        width: (margin_box_size.width - margins.left - margins.right).max(0.0),
        height: (margin_box_size.height - margins.top - margins.bottom).max(0.0),
    };

    (advance, border)
}
