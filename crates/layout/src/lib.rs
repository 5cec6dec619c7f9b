//! Text layout for caret mirrors.
//!
//! Lays out the inline content of a measurement block (text, atomic inline
//! boxes, explicit breaks) honoring `white-space`, `overflow-wrap`, spacing
//! and alignment, and models how a text field wraps its own value.

mod inline;
mod mirror;
mod text;

pub use inline::{
    FragmentKind, LineBox, LineFragment, caret_line_index, layout_field_text,
    resolve_line_height,
};
pub use mirror::{MirrorLayout, layout_mirror};
pub use text::TextMeasurer;

/// Default width of a classic (space-taking) scrollbar in CSS px.
pub const DEFAULT_SCROLLBAR_THICKNESS: f32 = 15.0;

/// A rectangle in CSS px units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rectangle {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// Knobs for mirror layout that the style cannot express.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MirrorLayoutOptions {
    /// Space a `scroll` overflow scrollbar takes from the content box.
    pub scrollbar_thickness: f32,
}

impl Default for MirrorLayoutOptions {
    fn default() -> Self {
        Self {
            scrollbar_thickness: DEFAULT_SCROLLBAR_THICKNESS,
        }
    }
}

impl MirrorLayoutOptions {
    /// Overlay scrollbars (they take no layout space).
    pub fn overlay_scrollbars() -> Self {
        Self {
            scrollbar_thickness: 0.0,
        }
    }
}
