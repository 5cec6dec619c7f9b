//! Character/byte offset utilities for field text.
//!
//! Carets are reported by hosts in characters, while Rust slices by bytes.
//! Everything in here is total: out-of-range inputs clamp instead of panicking.

use std::borrow::Cow;

/// Clamp an arbitrary byte index to a valid UTF-8 character boundary.
///
/// ```
/// use input_core::clamp_to_char_boundary;
///
/// let s = "a€b"; // '€' is 3 bytes
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 100), 5);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Previous character boundary before byte index `i` (0 at the start).
pub fn prev_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[..i].char_indices().last().map(|(idx, _)| idx).unwrap_or(0)
}

/// Next character boundary after byte index `i` (`s.len()` at the end).
pub fn next_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[i..].chars().next().map(|ch| i + ch.len_utf8()).unwrap_or(s.len())
}

#[inline]
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the `n`-th character; `s.len()` once `n` runs past the end.
///
/// ```
/// use input_core::byte_index_for_char;
///
/// assert_eq!(byte_index_for_char("a€b", 2), 4);
/// assert_eq!(byte_index_for_char("a€b", 9), 5);
/// ```
pub fn byte_index_for_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(idx, _)| idx).unwrap_or(s.len())
}

/// Number of characters before byte index `byte` (clamped to a boundary).
pub fn char_index_for_byte(s: &str, byte: usize) -> usize {
    let byte = clamp_to_char_boundary(s, byte);
    s[..byte].chars().count()
}

/// Character immediately before byte index `byte`, if any.
pub fn char_before(s: &str, byte: usize) -> Option<char> {
    let byte = clamp_to_char_boundary(s, byte);
    s[..byte].chars().next_back()
}

/// Character starting at byte index `byte`, if any.
pub fn char_after(s: &str, byte: usize) -> Option<char> {
    let byte = clamp_to_char_boundary(s, byte);
    s[byte..].chars().next()
}

#[inline]
pub fn is_line_break_char(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}

/// Whitespace that is not a line break (spaces, tabs, NBSP, ...).
#[inline]
pub fn is_inline_whitespace(ch: char) -> bool {
    ch.is_whitespace() && !is_line_break_char(ch)
}

/// The three line terminators a field value may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    Cr,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::CrLf => "\r\n",
        }
    }

    #[inline]
    pub fn byte_len(self) -> usize {
        self.as_str().len()
    }
}

/// Line ending starting at byte index `byte`, treating `\r\n` as one unit.
pub fn line_ending_at(s: &str, byte: usize) -> Option<LineEnding> {
    let rest = s.get(byte..)?;
    if rest.starts_with("\r\n") {
        Some(LineEnding::CrLf)
    } else if rest.starts_with('\r') {
        Some(LineEnding::Cr)
    } else if rest.starts_with('\n') {
        Some(LineEnding::Lf)
    } else {
        None
    }
}

/// Strip CR and LF, for single-line inputs.
pub fn filter_single_line(s: &str) -> Cow<'_, str> {
    if !s.contains(['\n', '\r']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| !is_line_break_char(*c)).collect())
}

/// Normalize newlines (CRLF/CR → LF), as multi-line form controls do.
pub fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if !s.contains('\r') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut it = s.chars().peekable();
    while let Some(ch) = it.next() {
        match ch {
            '\r' => {
                if it.peek() == Some(&'\n') {
                    let _ = it.next();
                }
                out.push('\n');
            }
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}
