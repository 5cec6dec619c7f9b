//! # input_core
//!
//! UI-agnostic text-field state for caret tracking.
//!
//! - [`FieldId`]: opaque identity of a tracked field
//! - [`SelectionRange`]: a selection counted in plain-text characters
//! - [`EditBuffer`]: value/caret/selection of one field
//! - [`read_caret_offset`]: resolve a caret offset from whatever the host
//!   exposes (direct selection index, or a legacy movable text range)
//!
//! This crate has no knowledge of markup, styles or layout.

mod buffer;
mod caret;
mod id;
mod selection;
mod text;

pub use buffer::EditBuffer;
pub use caret::{CaretProbe, CaretReading, CaretStrategy, TextRange, read_caret_offset};
pub use id::FieldId;
pub use selection::SelectionRange;

pub use text::{
    LineEnding, byte_index_for_char, char_after, char_before, char_count, char_index_for_byte,
    clamp_to_char_boundary, filter_single_line, is_inline_whitespace, is_line_break_char,
    line_ending_at, next_cursor_boundary, normalize_newlines, prev_cursor_boundary,
};
