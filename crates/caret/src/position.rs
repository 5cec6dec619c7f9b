use crate::field::Point;

/// Where a caret was last measured.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorPosition {
    /// Marker's top-left relative to the mirror's padding edge.
    pub position: Point,
    /// Page coordinates, corrected for the field's scroll offsets.
    pub offset: Point,
}
