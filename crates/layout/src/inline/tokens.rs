use std::collections::HashMap;

use css::{ComputedStyle, Display, StyledNode, WhiteSpace};
use html::{NO_BREAK_SPACE, Node, ZERO_WIDTH_SPACE, internal::Id};

use super::geometry::Margins;
use crate::TextMeasurer;

// Columns per tab. Tabs advance by a fixed multiple of the space width rather
// than to tab stops.
const TAB_SIZE: f32 = 8.0;

// Internal token representation after whitespace processing.
// Token invariants:
// - `Space { preserved: false }` is a single collapsible space and is never
//   emitted consecutively, at the start of a line, or before a hard break.
// - `Box` size uses margin-box dimensions (border box + margins).
// - `Open` precedes any content of its element; `Close` follows it.
// - `HardBreak` resets whitespace state (next content is line-start).
#[derive(Clone, Debug)]
pub(super) enum InlineToken<'a> {
    Text {
        text: String,
        style: &'a ComputedStyle,
        owner: Option<Id>,
        source_range: Option<(usize, usize)>,
        /// Whether `text` begins a word (for `text-transform: capitalize`).
        word_start: bool,
    },
    Space {
        style: &'a ComputedStyle,
        owner: Option<Id>,
        preserved: bool,
        tab: bool,
        source_range: Option<(usize, usize)>,
    },
    /// Zero-width break opportunity (U+200B).
    BreakOpportunity,
    /// Force a new line (`<br>` or a preserved segment break).
    HardBreak {
        style: &'a ComputedStyle,
        owner: Option<Id>,
        source_range: Option<(usize, usize)>,
    },
    /// End the current line if it has anything on it (block-level child).
    BlockBoundary,
    /// An atomic inline box (inline-block).
    Box {
        width: f32,
        height: f32,
        margins: Margins,
        id: Id,
    },
    Open {
        id: Id,
        style: &'a ComputedStyle,
    },
    Close,
}

#[derive(Clone)]
struct PendingSpace<'a> {
    style: &'a ComputedStyle,
    owner: Option<Id>,
    source_range: Option<(usize, usize)>,
}

/// Whitespace-collapsing state shared across the text nodes of one block.
#[derive(Default)]
pub(super) struct TokenSink<'a> {
    pub(super) tokens: Vec<InlineToken<'a>>,
    pending_space: Option<PendingSpace<'a>>,
    has_emitted_content: bool,
    at_word_start: bool,
}

impl<'a> TokenSink<'a> {
    pub(super) fn new() -> Self {
        Self {
            at_word_start: true,
            ..Self::default()
        }
    }

    fn push_content(&mut self, token: InlineToken<'a>) {
        self.flush_pending_space();
        self.tokens.push(token);
        self.has_emitted_content = true;
    }

    fn flush_pending_space(&mut self) {
        let Some(space) = self.pending_space.take() else {
            return;
        };
        if !self.has_emitted_content {
            // Leading collapsible whitespace is not rendered.
            return;
        }
        // The space belongs before any element that was opened after it.
        let at = self
            .tokens
            .iter()
            .rposition(|t| !matches!(t, InlineToken::Open { .. }))
            .map_or(0, |i| i + 1);
        self.tokens.insert(
            at,
            InlineToken::Space {
                style: space.style,
                owner: space.owner,
                preserved: false,
                tab: false,
                source_range: space.source_range,
            },
        );
        self.at_word_start = true;
    }

    pub(super) fn hard_break(
        &mut self,
        style: &'a ComputedStyle,
        owner: Option<Id>,
        source_range: Option<(usize, usize)>,
    ) {
        // Collapsible whitespace before a forced break is removed.
        self.pending_space = None;
        self.tokens.push(InlineToken::HardBreak {
            style,
            owner,
            source_range,
        });
        self.has_emitted_content = false;
        self.at_word_start = true;
    }

    pub(super) fn block_boundary(&mut self) {
        self.pending_space = None;
        self.tokens.push(InlineToken::BlockBoundary);
        self.has_emitted_content = false;
        self.at_word_start = true;
    }

    pub(super) fn push_text(
        &mut self,
        text: &str,
        style: &'a ComputedStyle,
        white_space: WhiteSpace,
        owner: Option<Id>,
    ) {
        let mut word = String::new();
        let mut word_start: Option<usize> = None;

        let mut prev: Option<char> = None;
        let mut it = text.char_indices().peekable();
        while let Some((idx, ch)) = it.next() {
            let newline = matches!(ch, '\n' | '\r');
            let bracketed_nbsp = ch == NO_BREAK_SPACE
                && prev == Some(ZERO_WIDTH_SPACE)
                && it.peek().is_some_and(|&(_, next)| next == ZERO_WIDTH_SPACE);
            prev = Some(ch);
            if ch == ZERO_WIDTH_SPACE {
                self.flush_word(&mut word, &mut word_start, idx, style, owner);
                self.flush_pending_space();
                self.tokens.push(InlineToken::BreakOpportunity);
            } else if newline && white_space.preserves_newlines() {
                self.flush_word(&mut word, &mut word_start, idx, style, owner);
                let mut end = idx + 1;
                if ch == '\r'
                    && let Some((next_idx, '\n')) = it.peek().copied()
                {
                    it.next();
                    end = next_idx + 1;
                }
                self.hard_break(style, owner, Some((idx, end)));
            } else if bracketed_nbsp && white_space.wraps() && !white_space.collapses_spaces() {
                // A non-breaking space between two break opportunities stands
                // in for a preserved space and hangs at the end of a line.
                self.flush_word(&mut word, &mut word_start, idx, style, owner);
                self.push_content(InlineToken::Space {
                    style,
                    owner,
                    preserved: true,
                    tab: false,
                    source_range: Some((idx, idx + ch.len_utf8())),
                });
                self.at_word_start = true;
            } else if matches!(ch, ' ' | '\t' | '\u{0C}') || newline {
                self.flush_word(&mut word, &mut word_start, idx, style, owner);
                let range = Some((idx, idx + ch.len_utf8()));
                if white_space.collapses_spaces() {
                    if self.pending_space.is_none() {
                        self.pending_space = Some(PendingSpace {
                            style,
                            owner,
                            source_range: range,
                        });
                    }
                } else {
                    self.push_content(InlineToken::Space {
                        style,
                        owner,
                        preserved: true,
                        tab: ch == '\t',
                        source_range: range,
                    });
                    self.at_word_start = true;
                }
            } else {
                if word_start.is_none() {
                    word_start = Some(idx);
                }
                word.push(ch);
            }
        }

        self.flush_word(&mut word, &mut word_start, text.len(), style, owner);
    }

    fn flush_word(
        &mut self,
        word: &mut String,
        word_start: &mut Option<usize>,
        end: usize,
        style: &'a ComputedStyle,
        owner: Option<Id>,
    ) {
        let Some(start) = word_start.take() else {
            return;
        };
        if word.is_empty() {
            return;
        }
        let at_word_start = self.at_word_start;
        self.push_content(InlineToken::Text {
            text: std::mem::take(word),
            style,
            owner,
            source_range: Some((start, end)),
            word_start: at_word_start,
        });
        self.at_word_start = false;
    }

    pub(super) fn finish(mut self) -> Vec<InlineToken<'a>> {
        // Trailing collapsible whitespace is not rendered.
        self.pending_space = None;
        self.tokens
    }
}

/// Flattened inline content of a block plus the element nesting, so element
/// rects can be unioned up the tree after layout.
pub(super) struct CollectedInline<'a> {
    pub(super) tokens: Vec<InlineToken<'a>>,
    pub(super) parents: HashMap<Id, Option<Id>>,
}

pub(super) fn collect_inline_tokens<'a>(block: &'a StyledNode<'a>) -> CollectedInline<'a> {
    let mut sink = TokenSink::new();
    let mut parents = HashMap::new();
    for child in &block.children {
        collect_from_styled(child, None, &mut sink, &mut parents);
    }
    CollectedInline {
        tokens: sink.finish(),
        parents,
    }
}

fn collect_from_styled<'a>(
    styled: &'a StyledNode<'a>,
    owner: Option<Id>,
    sink: &mut TokenSink<'a>,
    parents: &mut HashMap<Id, Option<Id>>,
) {
    let style = &styled.style;
    match styled.node {
        Node::Text { text, .. } => {
            if !text.is_empty() {
                sink.push_text(text, style, style.white_space, owner);
            }
        }
        Node::Element { id, name, .. } => {
            if style.display == Display::None {
                return;
            }
            let id = *id;
            parents.insert(id, owner);

            if name.eq_ignore_ascii_case("br") {
                sink.hard_break(style, Some(id), None);
                return;
            }

            match style.display {
                Display::InlineBlock => {
                    let bm = style.box_metrics;
                    let content_w = style.width.map_or(0.0, |l| l.px());
                    let content_h = style.height.map_or(0.0, |l| l.px());
                    let margins = Margins {
                        left: bm.margin_left,
                        right: bm.margin_right,
                        top: bm.margin_top,
                        bottom: bm.margin_bottom,
                    };
                    let width = (content_w + bm.horizontal_padding_border()
                        + margins.left
                        + margins.right)
                        .max(0.0);
                    let height = (content_h + bm.vertical_padding_border()
                        + margins.top
                        + margins.bottom)
                        .max(0.0);
                    sink.push_content(InlineToken::Box {
                        width,
                        height,
                        margins,
                        id,
                    });
                    sink.at_word_start = true;
                }
                Display::Block | Display::ListItem => {
                    sink.block_boundary();
                    sink.tokens.push(InlineToken::Open { id, style });
                    for child in &styled.children {
                        collect_from_styled(child, Some(id), sink, parents);
                    }
                    sink.tokens.push(InlineToken::Close);
                    sink.block_boundary();
                }
                Display::Inline | Display::None => {
                    sink.tokens.push(InlineToken::Open { id, style });
                    for child in &styled.children {
                        collect_from_styled(child, Some(id), sink, parents);
                    }
                    sink.tokens.push(InlineToken::Close);
                }
            }
        }
    }
}

/// Width of a text run in CSS px, with `text-transform`, letter and word
/// spacing applied. Non-breaking spaces measure as regular spaces.
pub(super) fn measure_text(
    measurer: &dyn TextMeasurer,
    style: &ComputedStyle,
    text: &str,
    at_word_start: bool,
) -> f32 {
    let transformed = style.text_transform.apply(text, at_word_start);
    let (visible, spaces) = if transformed.contains(NO_BREAK_SPACE) {
        let mut spaces = 0usize;
        let visible: String = transformed
            .chars()
            .map(|c| {
                if c == NO_BREAK_SPACE {
                    spaces += 1;
                    ' '
                } else {
                    c
                }
            })
            .collect();
        (visible, spaces)
    } else {
        let spaces = transformed.chars().filter(|&c| c == ' ').count();
        (transformed, spaces)
    };

    let w = measurer.measure(&visible, style);
    let w = if w.is_finite() { w.max(0.0) } else { 0.0 };
    let chars = visible.chars().count() as f32;
    w + style.letter_spacing * chars + style.word_spacing * spaces as f32
}

pub(super) fn measure_space(measurer: &dyn TextMeasurer, style: &ComputedStyle, tab: bool) -> f32 {
    let w = measure_text(measurer, style, " ", true);
    if tab { w * TAB_SIZE } else { w }
}
