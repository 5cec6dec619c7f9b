pub mod cascade;
pub mod computed;
pub mod snapshot;
pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use cascade::{attach_styles, get_inline_style};
pub use computed::{BoxMetrics, ComputedStyle, StyledNode, build_style_tree, compute_style};
pub use snapshot::{MIRRORED_PROPERTIES, StyleSnapshot};
pub use syntax::{Declaration, Rule, Selector, Stylesheet, parse_declarations, parse_stylesheet};
pub use values::{
    Direction, Display, FontStyle, Length, LineHeight, Overflow, OverflowWrap, Position,
    TextAlign, TextTransform, WhiteSpace, parse_color, parse_length,
};
