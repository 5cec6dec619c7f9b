use crate::Rectangle;
use html::internal::Id;

/// The logical content carried by a line fragment.
#[derive(Clone, Debug, PartialEq)]
pub enum FragmentKind {
    /// A run of text, as it appears in the source (before `text-transform`).
    Text(String),
    /// A rendered space: collapsed whitespace or a preserved space/tab.
    Space,
    /// An atomic inline box (`inline-block`). Its contents are not laid out.
    Box,
    /// A zero-width position: the start of an empty element, or a line break.
    Anchor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineFragment {
    pub kind: FragmentKind,
    /// Innermost element the fragment belongs to (`None` for the block itself).
    pub owner: Option<Id>,
    /// Border box for atomic boxes, content area for text.
    pub rect: Rectangle,
    /// Byte range in the laid-out text, for field-model layouts.
    pub source_range: Option<(usize, usize)>,
    /// Distance from the fragment's top edge to the line baseline (CSS px).
    pub ascent: f32,
    /// Distance from the baseline to the fragment's bottom edge (CSS px).
    pub descent: f32,
}

// One line box: a horizontal slice of inline content.
#[derive(Clone, Debug, PartialEq)]
pub struct LineBox {
    pub fragments: Vec<LineFragment>,
    pub rect: Rectangle,
    /// Line baseline in layout coordinates (CSS px).
    pub baseline: f32,
    /// Byte range of the source text covered by this line (field-model layouts).
    pub source_range: Option<(usize, usize)>,
}
