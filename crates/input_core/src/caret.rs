//! Caret offset acquisition.
//!
//! Form controls expose the caret directly as a selection index. Older hosts
//! only offer an opaque text range that can be nudged one character at a time;
//! the offset is then recovered by counting how many backward moves succeed
//! before the range hits the start of the field.

use crate::selection::SelectionRange;

/// A movable text range as exposed by legacy selection capabilities.
pub trait TextRange {
    /// Move the start of the range one character towards the beginning of
    /// the field. Returns `false` once it cannot move any further.
    fn move_start_back(&mut self) -> bool;
}

/// What a host can tell us about where its caret sits.
pub trait CaretProbe {
    /// Direct selection, counted in plain-text characters.
    fn selection(&self) -> Option<SelectionRange> {
        None
    }

    /// Legacy range positioned at the current caret.
    fn text_range(&mut self) -> Option<Box<dyn TextRange + '_>> {
        None
    }
}

/// Which strategy produced a caret offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaretStrategy {
    SelectionIndex,
    RangeUnitCount,
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretReading {
    pub offset: usize,
    pub strategy: CaretStrategy,
}

/// Resolve the caret offset of a field whose plain text has `char_len`
/// characters. The result is always within `0..=char_len`.
pub fn read_caret_offset(probe: &mut dyn CaretProbe, char_len: usize) -> CaretReading {
    if let Some(selection) = probe.selection() {
        return CaretReading {
            offset: selection.clamped(char_len).start,
            strategy: CaretStrategy::SelectionIndex,
        };
    }

    if let Some(mut range) = probe.text_range() {
        // Bounded by the text length so a misbehaving range cannot spin forever.
        let mut offset = 0usize;
        while offset < char_len && range.move_start_back() {
            offset += 1;
        }
        return CaretReading {
            offset,
            strategy: CaretStrategy::RangeUnitCount,
        };
    }

    CaretReading {
        offset: 0,
        strategy: CaretStrategy::Unavailable,
    }
}
