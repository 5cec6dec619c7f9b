//! Text selection expressed in plain-text characters.

/// A selection range in *character* offsets (not bytes).
///
/// Hosts report selections the way form controls do: `selectionStart` and
/// `selectionEnd` count characters of the plain-text value. The range is
/// normalized so `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Collapsed range at `offset`.
    #[inline]
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }

    /// Clamp both ends to a text of `char_len` characters.
    pub fn clamped(self, char_len: usize) -> Self {
        Self::new(self.start.min(char_len), self.end.min(char_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_order() {
        let r = SelectionRange::new(9, 2);
        assert_eq!((r.start, r.end), (2, 9));
        assert_eq!(r.len(), 7);
    }

    #[test]
    fn caret_is_collapsed() {
        assert!(SelectionRange::caret(4).is_collapsed());
        assert!(!SelectionRange::new(1, 3).is_collapsed());
    }

    #[test]
    fn clamped_respects_text_length() {
        let r = SelectionRange::new(3, 40).clamped(10);
        assert_eq!(r, SelectionRange::new(3, 10));
    }
}
