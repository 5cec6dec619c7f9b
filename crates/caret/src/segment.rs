//! Splitting a field's text around the caret into mirror content.
//!
//! The text on each side of the caret is cut into pieces that render in a
//! `nowrap`/`pre-wrap` mirror exactly as the field paints them:
//!
//! - a plain space becomes a non-breaking space between two zero-width
//!   spaces, so runs of spaces never collapse yet can still wrap;
//! - a line break becomes `<br>` between two zero-width spaces, which keeps
//!   empty lines their height;
//! - the word touching the caret on either side is wrapped in its own span
//!   (`before-word` / `after-word`), so the wrap corrector can compare where
//!   the two halves landed.

use html::{NO_BREAK_SPACE, Node, NodeFactory, ZERO_WIDTH_SPACE, inner_markup};
use input_core::{
    LineEnding, byte_index_for_char, char_after, char_before, char_count, is_inline_whitespace,
    line_ending_at,
};

use crate::config::ClassNames;

pub const BEFORE_WORD_CLASS: &str = "before-word";
pub const AFTER_WORD_CLASS: &str = "after-word";

/// Which side of the caret an isolated word sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordSide {
    Before,
    After,
}

impl WordSide {
    pub fn class(self) -> &'static str {
        match self {
            WordSide::Before => BEFORE_WORD_CLASS,
            WordSide::After => AFTER_WORD_CLASS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Piece {
    /// Text without plain spaces or line breaks.
    Text(String),
    /// One plain space (U+0020).
    Space,
    LineBreak(LineEnding),
    /// The word next to the caret; may be empty.
    Word { side: WordSide, text: String },
}

impl Piece {
    fn push_plain(&self, out: &mut String) {
        match self {
            Piece::Text(text) | Piece::Word { text, .. } => out.push_str(text),
            Piece::Space => out.push(' '),
            Piece::LineBreak(ending) => out.push_str(ending.as_str()),
        }
    }
}

/// A field's text cut at the caret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentedText {
    pub before: Vec<Piece>,
    pub after: Vec<Piece>,
    /// Character right before the caret.
    pub before_char: Option<char>,
    /// Character right after the caret.
    pub after_char: Option<char>,
}

/// Cut `text` at `caret` (a character offset, clamped to the text).
pub fn segment(text: &str, caret: usize) -> SegmentedText {
    let caret = caret.min(char_count(text));
    let split = byte_index_for_char(text, caret);
    let (head, tail) = text.split_at(split);

    let segmented = SegmentedText {
        before: before_pieces(head),
        after: after_pieces(tail),
        before_char: char_before(text, split),
        after_char: char_after(text, split),
    };
    log::trace!(
        target: "caret.segment",
        "caret {caret}: {} pieces before, {} after",
        segmented.before.len(),
        segmented.after.len()
    );
    segmented
}

fn before_pieces(head: &str) -> Vec<Piece> {
    // Whitespace between the word and the caret stays after the word.
    let trail_start = head
        .char_indices()
        .rev()
        .take_while(|(_, ch)| is_inline_whitespace(*ch))
        .last()
        .map_or(head.len(), |(idx, _)| idx);
    let (body, trailing) = head.split_at(trail_start);

    let word_start = body
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(0, |(idx, ch)| idx + ch.len_utf8());
    let (first, word) = body.split_at(word_start);

    let mut pieces = pieces_of(first);
    pieces.push(Piece::Word {
        side: WordSide::Before,
        text: word.to_string(),
    });
    pieces.extend(pieces_of(trailing));
    pieces
}

fn after_pieces(tail: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let rest = match tail.strip_prefix(' ') {
        Some(rest) => {
            pieces.push(Piece::Space);
            rest
        }
        None => tail,
    };

    let word_end = rest
        .char_indices()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(rest.len(), |(idx, _)| idx);
    let (word, remainder) = rest.split_at(word_end);

    pieces.push(Piece::Word {
        side: WordSide::After,
        text: word.to_string(),
    });
    pieces.extend(pieces_of(remainder));
    pieces
}

fn pieces_of(text: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut run = String::new();
    let mut idx = 0;

    while idx < text.len() {
        if let Some(ending) = line_ending_at(text, idx) {
            flush_run(&mut run, &mut pieces);
            pieces.push(Piece::LineBreak(ending));
            idx += ending.byte_len();
            continue;
        }
        let Some(ch) = text[idx..].chars().next() else {
            break;
        };
        if ch == ' ' {
            flush_run(&mut run, &mut pieces);
            pieces.push(Piece::Space);
        } else {
            run.push(ch);
        }
        idx += ch.len_utf8();
    }
    flush_run(&mut run, &mut pieces);
    pieces
}

fn flush_run(run: &mut String, pieces: &mut Vec<Piece>) {
    if !run.is_empty() {
        pieces.push(Piece::Text(std::mem::take(run)));
    }
}

/// `&#8203;<br>&#8203;`, the explicit break used in mirror content.
pub(crate) fn line_break_nodes(factory: &mut NodeFactory, names: &ClassNames) -> [Node; 3] {
    [
        factory.text(ZERO_WIDTH_SPACE.to_string()),
        factory.element_with_class("br", &names.linebreak),
        factory.text(ZERO_WIDTH_SPACE.to_string()),
    ]
}

fn space_text() -> String {
    [ZERO_WIDTH_SPACE, NO_BREAK_SPACE, ZERO_WIDTH_SPACE]
        .into_iter()
        .collect()
}

fn push_nodes(pieces: &[Piece], factory: &mut NodeFactory, names: &ClassNames, out: &mut Vec<Node>) {
    for piece in pieces {
        match piece {
            Piece::Text(text) => out.push(factory.text(text.as_str())),
            Piece::Space => out.push(factory.text(space_text())),
            Piece::LineBreak(_) => out.extend(line_break_nodes(factory, names)),
            Piece::Word { side, text } => {
                let mut span = factory.element_with_class("span", side.class());
                if !text.is_empty()
                    && let Some(children) = span.children_mut()
                {
                    children.push(factory.text(text.as_str()));
                }
                out.push(span);
            }
        }
    }
}

impl SegmentedText {
    /// Text before the caret, exactly as it was.
    pub fn before_text(&self) -> String {
        let mut out = String::new();
        self.before.iter().for_each(|p| p.push_plain(&mut out));
        out
    }

    /// Text after the caret, exactly as it was.
    pub fn after_text(&self) -> String {
        let mut out = String::new();
        self.after.iter().for_each(|p| p.push_plain(&mut out));
        out
    }

    pub fn word(&self, side: WordSide) -> &str {
        let pieces = match side {
            WordSide::Before => &self.before,
            WordSide::After => &self.after,
        };
        pieces
            .iter()
            .find_map(|p| match p {
                Piece::Word { side: s, text } if *s == side => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or("")
    }

    /// Mirror content: before pieces, the caret marker, after pieces.
    pub fn to_nodes(&self, factory: &mut NodeFactory, names: &ClassNames) -> Vec<Node> {
        let mut nodes = Vec::new();
        push_nodes(&self.before, factory, names, &mut nodes);
        nodes.push(factory.element_with_class("span", &names.cursor));
        push_nodes(&self.after, factory, names, &mut nodes);
        nodes
    }

    pub fn to_markup(&self, names: &ClassNames) -> String {
        inner_markup(&self.to_nodes(&mut NodeFactory::new(), names))
    }
}
