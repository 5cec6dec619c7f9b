//! Forcing the mirror to wrap where the field wraps.
//!
//! A field breaks a line between words, but the mirror's marker splits the
//! word at the caret into two spans, each of which can wrap on its own. When
//! the two halves end up on different lines the marker sits on the wrong one;
//! an explicit break next to the before-word puts it back.

use html::{Placement, find_by_class, insert_adjacent};
use input_core::is_line_break_char;

use crate::config::ClassNames;
use crate::mirror::{LayoutEnv, MirrorElement};
use crate::segment::{AFTER_WORD_CLASS, BEFORE_WORD_CLASS, SegmentedText, WordSide, line_break_nodes};

const EPSILON: f32 = 0.01;

/// What the corrector did to the mirror content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WrapCorrection {
    #[default]
    None,
    /// Break inserted after the before-word (the caret follows a space).
    BreakAfterBeforeWord,
    /// Break inserted before the before-word (the caret is inside a word).
    BreakBeforeBeforeWord,
}

/// Inspect the mirror's layout and insert a compensating break if the two
/// word spans around the caret were wrapped apart.
pub fn correct(
    segmented: &SegmentedText,
    caret: usize,
    mirror: &mut MirrorElement,
    names: &ClassNames,
    env: &LayoutEnv<'_>,
) -> WrapCorrection {
    if caret == 0 || segmented.word(WordSide::After).is_empty() {
        return WrapCorrection::None;
    }
    let Some(words) = word_layout(mirror, env) else {
        return WrapCorrection::None;
    };
    if !words.split {
        return WrapCorrection::None;
    }

    let before = segmented.before_char;
    let after = segmented.after_char;
    let (correction, placement) = if before == Some(' ') {
        (WrapCorrection::BreakAfterBeforeWord, Placement::After)
    } else if after != Some(' ') && !before.is_some_and(is_line_break_char) {
        if !words.moves_whole() {
            log::debug!(target: "caret.wrap", "caret {caret}: word is split in place");
            return WrapCorrection::None;
        }
        (WrapCorrection::BreakBeforeBeforeWord, Placement::Before)
    } else {
        return WrapCorrection::None;
    };

    let nodes = line_break_nodes(mirror.factory_mut(), names).into();
    if !insert_adjacent(mirror.content_mut(), BEFORE_WORD_CLASS, placement, nodes) {
        log::debug!(target: "caret.wrap", "before-word span missing; no correction");
        return WrapCorrection::None;
    }
    log::debug!(target: "caret.wrap", "caret {caret}: {correction:?}");
    correction
}

/// Where the two word spans landed.
struct WordLayout {
    /// The after-word starts below the before-word.
    split: bool,
    before_at_line_start: bool,
    combined_width: f32,
    line_width: f32,
}

impl WordLayout {
    /// Whether the field would carry the whole word to the next line. A word
    /// wider than the line that already starts a line is split where it is.
    fn moves_whole(&self) -> bool {
        !(self.before_at_line_start && self.combined_width > self.line_width + EPSILON)
    }
}

fn word_layout(mirror: &mut MirrorElement, env: &LayoutEnv<'_>) -> Option<WordLayout> {
    let before_id = find_by_class(mirror.content(), BEFORE_WORD_CLASS)?.id();
    let after_id = find_by_class(mirror.content(), AFTER_WORD_CLASS)?.id();
    let layout = mirror.layout(env)?;
    let before = layout.rect_of(before_id)?;
    let after = layout.rect_of(after_id)?;
    Some(WordLayout {
        split: after.y > before.y + EPSILON,
        before_at_line_start: before.x <= layout.content_rect.x + EPSILON,
        combined_width: layout.advance_of(before_id) + layout.advance_of(after_id),
        line_width: layout.content_rect.width,
    })
}
