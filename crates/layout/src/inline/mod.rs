mod breaker;
mod engine;
mod field;
mod geometry;
mod metrics;
mod options;
mod tokens;
mod types;


use std::collections::HashMap;

use css::StyledNode;
use html::internal::Id;

use crate::{Rectangle, TextMeasurer};

pub use field::{caret_line_index, layout_field_text};
pub use metrics::resolve_line_height;
pub use types::{FragmentKind, LineBox, LineFragment};

pub(crate) struct BlockInlineLayout {
    pub(crate) lines: Vec<LineBox>,
    /// Parent element of every element that took part (`None` = the block).
    pub(crate) parents: HashMap<Id, Option<Id>>,
}

/// Inline layout of a block's children inside its content box.
pub(crate) fn layout_block_inline(
    measurer: &dyn TextMeasurer,
    content: Rectangle,
    block: &StyledNode<'_>,
) -> BlockInlineLayout {
    let collected = tokens::collect_inline_tokens(block);
    let lines = engine::layout_tokens(
        measurer,
        content,
        &block.style,
        collected.tokens,
        options::InlineLayoutOptions::for_block(&block.style),
    );
    BlockInlineLayout {
        lines,
        parents: collected.parents,
    }
}
