//! Editing state of a single text field.
//!
//! A host (or a simulation of one) keeps the value, caret and selection of a
//! field here. Offsets are stored as byte indices on UTF-8 boundaries and
//! reported to callers in characters, the unit form controls use for
//! `selectionStart`.

use crate::selection::SelectionRange;
use crate::text::{
    char_index_for_byte, byte_index_for_char, clamp_to_char_boundary, filter_single_line,
    next_cursor_boundary, normalize_newlines, prev_cursor_boundary,
};

#[derive(Clone, Debug, Default)]
pub struct EditBuffer {
    value: String,
    multiline: bool,
    /// Byte index, always on a char boundary.
    caret: usize,
    selection_anchor: Option<usize>,
    revision: u64,
}

impl EditBuffer {
    /// Buffer for a single-line input; newlines are stripped on insert.
    pub fn single_line(value: impl Into<String>) -> Self {
        let value = filter_single_line(&value.into()).into_owned();
        Self::with_value(value, false)
    }

    /// Buffer for a textarea-like control; newlines are normalized to LF.
    pub fn multi_line(value: impl Into<String>) -> Self {
        let value = normalize_newlines(&value.into()).into_owned();
        Self::with_value(value, true)
    }

    /// Buffer that keeps the value verbatim (content-editable payloads).
    pub fn raw(value: impl Into<String>) -> Self {
        Self::with_value(value.into(), true)
    }

    fn with_value(value: String, multiline: bool) -> Self {
        let caret = value.len();
        Self {
            value,
            multiline,
            caret,
            selection_anchor: None,
            revision: 0,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Monotonic counter, bumped on every text change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Caret in characters.
    pub fn caret(&self) -> usize {
        char_index_for_byte(&self.value, self.caret)
    }

    /// Current selection in characters; collapsed at the caret when nothing
    /// is selected.
    pub fn selection(&self) -> SelectionRange {
        let caret = self.caret();
        match self.selection_anchor {
            Some(anchor) => SelectionRange::new(char_index_for_byte(&self.value, anchor), caret),
            None => SelectionRange::caret(caret),
        }
    }

    /// Replace the whole value; the caret moves to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.value = if self.multiline {
            value
        } else {
            filter_single_line(&value).into_owned()
        };
        self.caret = self.value.len();
        self.selection_anchor = None;
        self.bump();
    }

    /// Place the caret at a character offset, optionally extending the
    /// selection from the previous caret.
    pub fn set_caret(&mut self, offset: usize, selecting: bool) {
        let byte = byte_index_for_char(&self.value, offset);
        self.place_caret(byte, selecting);
    }

    pub fn insert_text(&mut self, s: &str) {
        let s = if self.multiline {
            normalize_newlines(s)
        } else {
            filter_single_line(s)
        };
        if s.is_empty() {
            return;
        }
        self.delete_selection();
        let caret = clamp_to_char_boundary(&self.value, self.caret);
        self.value.insert_str(caret, &s);
        self.caret = caret + s.len();
        self.bump();
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.caret == 0 {
            return;
        }
        let prev = prev_cursor_boundary(&self.value, self.caret);
        self.value.drain(prev..self.caret);
        self.caret = prev;
        self.bump();
    }

    pub fn delete(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.caret >= self.value.len() {
            return;
        }
        let next = next_cursor_boundary(&self.value, self.caret);
        self.value.drain(self.caret..next);
        self.bump();
    }

    pub fn move_left(&mut self, selecting: bool) {
        if !selecting && let Some(start) = self.selected_bytes().map(|(s, _)| s) {
            self.place_caret(start, false);
            return;
        }
        let prev = prev_cursor_boundary(&self.value, self.caret);
        self.place_caret(prev, selecting);
    }

    pub fn move_right(&mut self, selecting: bool) {
        if !selecting && let Some(end) = self.selected_bytes().map(|(_, e)| e) {
            self.place_caret(end, false);
            return;
        }
        let next = next_cursor_boundary(&self.value, self.caret);
        self.place_caret(next, selecting);
    }

    pub fn move_to_start(&mut self, selecting: bool) {
        self.place_caret(0, selecting);
    }

    pub fn move_to_end(&mut self, selecting: bool) {
        self.place_caret(self.value.len(), selecting);
    }

    pub fn select_all(&mut self) {
        self.caret = self.value.len();
        self.selection_anchor = if self.value.is_empty() { None } else { Some(0) };
    }

    fn place_caret(&mut self, byte: usize, selecting: bool) {
        let byte = clamp_to_char_boundary(&self.value, byte);
        if selecting {
            if self.selection_anchor.is_none() {
                self.selection_anchor = Some(self.caret);
            }
            self.caret = byte;
            if self.selection_anchor == Some(byte) {
                self.selection_anchor = None;
            }
        } else {
            self.caret = byte;
            self.selection_anchor = None;
        }
    }

    fn selected_bytes(&self) -> Option<(usize, usize)> {
        let anchor = self.selection_anchor?;
        (anchor != self.caret).then(|| (anchor.min(self.caret), anchor.max(self.caret)))
    }

    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selected_bytes() else {
            self.selection_anchor = None;
            return false;
        };
        self.value.drain(start..end);
        self.caret = start;
        self.selection_anchor = None;
        self.bump();
        true
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_is_reported_in_characters() {
        let mut buf = EditBuffer::single_line("a€b");
        assert_eq!(buf.caret(), 3);
        buf.move_left(false);
        assert_eq!(buf.caret(), 2);
        buf.move_left(false);
        assert_eq!(buf.caret(), 1);
    }

    #[test]
    fn single_line_strips_newlines() {
        let mut buf = EditBuffer::single_line("ab\ncd");
        assert_eq!(buf.value(), "abcd");
        buf.insert_text("\r\nx");
        assert_eq!(buf.value(), "abcdx");
    }

    #[test]
    fn multi_line_normalizes_newlines() {
        let mut buf = EditBuffer::multi_line("a\r\nb");
        assert_eq!(buf.value(), "a\nb");
        buf.insert_text("\rc");
        assert_eq!(buf.value(), "a\nb\nc");
        assert_eq!(buf.caret(), 5);
    }

    #[test]
    fn selection_is_replaced_by_typing() {
        let mut buf = EditBuffer::single_line("hello");
        buf.move_left(true);
        buf.move_left(true);
        assert_eq!(buf.selection(), SelectionRange::new(3, 5));
        buf.insert_text("p!");
        assert_eq!(buf.value(), "help!");
        assert!(buf.selection().is_collapsed());
    }

    #[test]
    fn backspace_and_delete_remove_whole_chars() {
        let mut buf = EditBuffer::single_line("x€y");
        buf.set_caret(2, false);
        buf.backspace();
        assert_eq!(buf.value(), "xy");
        buf.move_to_start(false);
        buf.delete();
        assert_eq!(buf.value(), "y");
        assert_eq!(buf.revision(), 2);
    }

    #[test]
    fn set_caret_out_of_range_clamps_to_end() {
        let mut buf = EditBuffer::multi_line("abc");
        buf.set_caret(99, false);
        assert_eq!(buf.caret(), 3);
    }

    #[test]
    fn select_all_then_move_left_collapses_to_start() {
        let mut buf = EditBuffer::single_line("abc");
        buf.select_all();
        assert_eq!(buf.selection(), SelectionRange::new(0, 3));
        buf.move_left(false);
        assert_eq!(buf.caret(), 0);
        assert!(buf.selection().is_collapsed());
    }
}
