use css::{ComputedStyle, WhiteSpace};

use crate::{Rectangle, TextMeasurer};

use super::engine::layout_tokens;
use super::options::InlineLayoutOptions;
use super::tokens::TokenSink;
use super::types::LineBox;

/// Lay out a field's raw value the way the field itself paints it.
///
/// Multi-line fields behave like `white-space: pre-wrap` with
/// `overflow-wrap: break-word`: explicit line breaks are honored, runs of
/// spaces are kept and hang at the end of a line, and over-long words are
/// split. Single-line fields keep their spaces and never wrap. Line source
/// ranges are byte offsets into `value`.
pub fn layout_field_text(
    measurer: &dyn TextMeasurer,
    style: &ComputedStyle,
    content_width: f32,
    value: &str,
    multiline: bool,
) -> Vec<LineBox> {
    let white_space = if multiline {
        WhiteSpace::PreWrap
    } else {
        WhiteSpace::Pre
    };
    let mut sink = TokenSink::new();
    sink.push_text(value, style, white_space, None);

    let content = Rectangle {
        x: 0.0,
        y: 0.0,
        width: content_width,
        height: f32::INFINITY,
    };
    layout_tokens(
        measurer,
        content,
        style,
        sink.finish(),
        InlineLayoutOptions::field_defaults(multiline),
    )
}

/// Index of the line a caret at `caret` (in characters) is painted on.
///
/// A caret sitting exactly on a soft-wrap boundary belongs to the later line.
pub fn caret_line_index(lines: &[LineBox], value: &str, caret: usize) -> usize {
    let byte = value
        .char_indices()
        .nth(caret)
        .map_or(value.len(), |(idx, _)| idx);
    lines
        .iter()
        .rposition(|line| line.source_range.is_some_and(|(start, _)| start <= byte))
        .unwrap_or(0)
}
