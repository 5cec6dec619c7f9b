use css::{ComputedStyle, Direction, TextAlign};
use html::internal::Id;

use crate::{Rectangle, TextMeasurer};

use super::breaker::break_word_prefix_end;
use super::geometry::{MarginBoxSize, Margins, Pos, split_margin_and_border_rect};
use super::metrics::{
    FragmentMetrics, compute_strut_metrics, compute_text_metrics,
    inline_block_baseline_metrics_bottom_edge,
};
use super::options::InlineLayoutOptions;
use super::tokens::{InlineToken, measure_space, measure_text};
use super::types::{FragmentKind, LineBox, LineFragment};

// Width slack when testing whether content fits on a line.
const FIT_EPSILON: f32 = 0.01;

// A fragment whose vertical position is only known once its line is complete.
struct Placed {
    kind: FragmentKind,
    owner: Option<Id>,
    x: f32,
    width: f32,
    metrics: FragmentMetrics,
    /// Border-box offset inside the margin box (atomic boxes only).
    margins: Margins,
    source_range: Option<(usize, usize)>,
    collapsible: bool,
}

struct PendingSpace {
    width: f32,
    metrics: FragmentMetrics,
    owner: Option<Id>,
    source_range: Option<(usize, usize)>,
}

struct LineBuilder<'m> {
    measurer: &'m dyn TextMeasurer,
    options: InlineLayoutOptions,
    align: TextAlign,
    direction: Direction,
    strut: FragmentMetrics,

    start_x: f32,
    max_x: f32,
    cursor_x: f32,
    cursor_y: f32,

    lines: Vec<LineBox>,
    fragments: Vec<Placed>,
    line_has_content: bool,
    line_start_hint: Option<usize>,
    last_was_hard_break: bool,

    pending_space: Option<PendingSpace>,
    pending_anchors: Vec<(Id, FragmentMetrics)>,
}

/// Lay out a token stream into line boxes inside `content` (the block's
/// content box). Lines are not clipped to `content.height`.
pub(super) fn layout_tokens(
    measurer: &dyn TextMeasurer,
    content: Rectangle,
    block_style: &ComputedStyle,
    tokens: Vec<InlineToken<'_>>,
    options: InlineLayoutOptions,
) -> Vec<LineBox> {
    let mut b = LineBuilder {
        measurer,
        options,
        align: block_style.text_align,
        direction: block_style.direction,
        strut: compute_strut_metrics(measurer, block_style),
        start_x: content.x,
        max_x: content.x + content.width.max(0.0),
        cursor_x: content.x,
        cursor_y: content.y,
        lines: Vec::new(),
        fragments: Vec::new(),
        line_has_content: false,
        line_start_hint: Some(0),
        last_was_hard_break: false,
        pending_space: None,
        pending_anchors: Vec::new(),
    };

    let mut run: Vec<InlineToken<'_>> = Vec::new();
    let mut run_width = 0.0f32;

    for token in tokens {
        match token {
            InlineToken::Text {
                ref text,
                style,
                word_start,
                ..
            } => {
                run_width += measure_text(measurer, style, text, word_start);
                run.push(token);
            }
            InlineToken::Open { .. } | InlineToken::Close => run.push(token),
            InlineToken::Space {
                style,
                owner,
                preserved,
                tab,
                source_range,
            } => {
                b.commit_run(&mut run, &mut run_width);
                let width = measure_space(measurer, style, tab);
                let metrics = compute_text_metrics(measurer, style);
                if preserved {
                    b.place_space(width, metrics, owner, source_range, false);
                } else if b.line_has_content || !b.pending_anchors.is_empty() {
                    b.pending_space = Some(PendingSpace {
                        width,
                        metrics,
                        owner,
                        source_range,
                    });
                }
            }
            InlineToken::BreakOpportunity => b.commit_run(&mut run, &mut run_width),
            InlineToken::Box {
                width,
                height,
                margins,
                id,
            } => {
                b.commit_run(&mut run, &mut run_width);
                b.place_box(id, width, height, margins);
            }
            InlineToken::HardBreak {
                style,
                owner,
                source_range,
            } => {
                b.commit_run(&mut run, &mut run_width);
                b.pending_space = None;
                b.emit_pending_anchors();
                let metrics = compute_text_metrics(measurer, style);
                b.fragments.push(Placed {
                    kind: FragmentKind::Anchor,
                    owner,
                    x: b.cursor_x,
                    width: 0.0,
                    metrics,
                    margins: Margins::default(),
                    source_range,
                    collapsible: false,
                });
                b.flush_line();
                b.line_start_hint = source_range.map(|(_, end)| end);
                b.last_was_hard_break = true;
            }
            InlineToken::BlockBoundary => {
                b.commit_run(&mut run, &mut run_width);
                b.pending_space = None;
                if b.line_has_content || !b.fragments.is_empty() {
                    b.flush_line();
                }
            }
        }
    }

    b.commit_run(&mut run, &mut run_width);
    b.pending_space = None;
    b.emit_pending_anchors();
    if !b.fragments.is_empty() || b.lines.is_empty() || b.last_was_hard_break {
        b.flush_line();
    }

    log::trace!(target: "layout.inline", "laid out {} line(s)", b.lines.len());
    b.lines
}

impl LineBuilder<'_> {
    fn overflows(&self, width: f32) -> bool {
        self.cursor_x + width > self.max_x + FIT_EPSILON
    }

    fn set_content(&mut self) {
        self.line_has_content = true;
        self.last_was_hard_break = false;
    }

    /// Place an unbreakable run (text plus element boundaries), wrapping
    /// before it when it does not fit after the pending space.
    fn commit_run(&mut self, run: &mut Vec<InlineToken<'_>>, run_width: &mut f32) {
        if run.is_empty() {
            return;
        }
        let width = std::mem::take(run_width);
        let gap = self.pending_space.as_ref().map_or(0.0, |s| s.width);

        if self.options.wrap && self.line_has_content && self.overflows(gap + width) {
            self.pending_space = None;
            self.flush_line();
        } else if let Some(space) = self.pending_space.take() {
            self.place_space(space.width, space.metrics, space.owner, space.source_range, true);
        }

        let split = self.options.wrap
            && self.options.break_long_words
            && !self.line_has_content
            && self.overflows(width);

        for token in run.drain(..) {
            match token {
                InlineToken::Text {
                    text,
                    style,
                    owner,
                    source_range,
                    word_start,
                } => {
                    if split {
                        self.place_text_splitting(text, style, owner, source_range, word_start);
                    } else {
                        let w = measure_text(self.measurer, style, &text, word_start);
                        self.place_text(text, style, owner, source_range, w);
                    }
                }
                InlineToken::Open { id, style } => {
                    let metrics = compute_text_metrics(self.measurer, style);
                    self.pending_anchors.push((id, metrics));
                }
                InlineToken::Close => self.emit_pending_anchors(),
                _ => {}
            }
        }
    }

    fn place_text(
        &mut self,
        text: String,
        style: &ComputedStyle,
        owner: Option<Id>,
        source_range: Option<(usize, usize)>,
        width: f32,
    ) {
        self.emit_pending_anchors();
        let metrics = compute_text_metrics(self.measurer, style);
        self.fragments.push(Placed {
            kind: FragmentKind::Text(text),
            owner,
            x: self.cursor_x,
            width,
            metrics,
            margins: Margins::default(),
            source_range,
            collapsible: false,
        });
        self.cursor_x += width;
        self.set_content();
    }

    // `overflow-wrap: break-word`: split a run that cannot fit even on an
    // empty line at the last character that still fits.
    fn place_text_splitting(
        &mut self,
        text: String,
        style: &ComputedStyle,
        owner: Option<Id>,
        source_range: Option<(usize, usize)>,
        word_start: bool,
    ) {
        let mut remaining = text;
        let mut source_start = source_range.map(|(s, _)| s);
        let mut at_word_start = word_start;

        while !remaining.is_empty() {
            let w = measure_text(self.measurer, style, &remaining, at_word_start);
            if !self.overflows(w) {
                let range = source_start.zip(source_range.map(|(_, e)| e));
                self.place_text(remaining, style, owner, range, w);
                return;
            }
            if self.line_has_content {
                self.flush_line();
                continue;
            }

            let available = (self.max_x - self.cursor_x).max(0.0);
            let cut = break_word_prefix_end(self.measurer, style, &remaining, available)
                .clamp(1, remaining.len());
            if cut >= remaining.len() {
                self.place_text(remaining, style, owner, source_range, w);
                return;
            }

            let rest = remaining.split_off(cut);
            let prefix_w = measure_text(self.measurer, style, &remaining, at_word_start);
            let range = source_start.map(|s| (s, s + cut));
            self.place_text(remaining, style, owner, range, prefix_w);
            self.flush_line();

            remaining = rest;
            source_start = source_start.map(|s| s + cut);
            at_word_start = false;
        }
    }

    fn place_space(
        &mut self,
        width: f32,
        metrics: FragmentMetrics,
        owner: Option<Id>,
        source_range: Option<(usize, usize)>,
        collapsible: bool,
    ) {
        self.emit_pending_anchors();
        self.fragments.push(Placed {
            kind: FragmentKind::Space,
            owner,
            x: self.cursor_x,
            width,
            metrics,
            margins: Margins::default(),
            source_range,
            collapsible,
        });
        // Preserved spaces never wrap; at the end of a line they hang.
        self.cursor_x += width;
        self.set_content();
    }

    fn place_box(&mut self, id: Id, width: f32, height: f32, margins: Margins) {
        let gap = self.pending_space.as_ref().map_or(0.0, |s| s.width);
        if self.options.wrap && self.line_has_content && self.overflows(gap + width) {
            self.pending_space = None;
            self.flush_line();
        } else if let Some(space) = self.pending_space.take() {
            self.place_space(space.width, space.metrics, space.owner, space.source_range, true);
        }

        self.emit_pending_anchors();
        self.fragments.push(Placed {
            kind: FragmentKind::Box,
            owner: Some(id),
            x: self.cursor_x,
            width,
            metrics: inline_block_baseline_metrics_bottom_edge(height),
            margins,
            source_range: None,
            collapsible: false,
        });
        self.cursor_x += width;
        // A zero-width box takes no room, so it never forces a wrap by itself.
        if width > 0.0 {
            self.set_content();
        } else {
            self.last_was_hard_break = false;
        }
    }

    fn emit_pending_anchors(&mut self) {
        for (id, metrics) in std::mem::take(&mut self.pending_anchors) {
            self.fragments.push(Placed {
                kind: FragmentKind::Anchor,
                owner: Some(id),
                x: self.cursor_x,
                width: 0.0,
                metrics,
                margins: Margins::default(),
                source_range: None,
                collapsible: false,
            });
            self.last_was_hard_break = false;
        }
    }

    fn flush_line(&mut self) {
        // Collapsible spaces at the end of a line are removed.
        while self
            .fragments
            .last()
            .is_some_and(|f| f.collapsible && f.kind == FragmentKind::Space)
        {
            self.fragments.pop();
        }

        let mut ascent = self.strut.ascent;
        let mut descent = self.strut.descent;
        for f in &self.fragments {
            ascent = ascent.max(f.metrics.ascent);
            descent = descent.max(f.metrics.descent);
        }
        let baseline = self.cursor_y + ascent;

        // Hanging spaces do not count towards alignment.
        let content_end = self
            .fragments
            .iter()
            .rev()
            .find(|f| f.kind != FragmentKind::Space)
            .map_or(self.start_x, |f| f.x + f.width);
        let slack = (self.max_x - content_end).max(0.0);
        let shift = match (self.align, self.direction) {
            (TextAlign::Left, _)
            | (TextAlign::Start, Direction::Ltr)
            | (TextAlign::End, Direction::Rtl) => 0.0,
            (TextAlign::Right, _)
            | (TextAlign::End, Direction::Ltr)
            | (TextAlign::Start, Direction::Rtl) => slack,
            (TextAlign::Center, _) => slack * 0.5,
        };

        let source_start = self
            .fragments
            .iter()
            .filter_map(|f| f.source_range.map(|(s, _)| s))
            .min()
            .or(self.line_start_hint);
        let source_end = self
            .fragments
            .iter()
            .filter_map(|f| f.source_range.map(|(_, e)| e))
            .max()
            .or(source_start);

        let fragments = self
            .fragments
            .drain(..)
            .map(|f| {
                let top = baseline - f.metrics.ascent;
                let (_advance, border) = split_margin_and_border_rect(
                    Pos {
                        x: f.x + shift,
                        y: top,
                    },
                    MarginBoxSize {
                        width: f.width.max(0.0),
                        height: f.metrics.height(),
                    },
                    f.margins,
                );
                LineFragment {
                    kind: f.kind,
                    owner: f.owner,
                    rect: border,
                    source_range: f.source_range,
                    ascent: f.metrics.ascent,
                    descent: f.metrics.descent,
                }
            })
            .collect();

        let height = (ascent + descent).max(0.0);
        self.lines.push(LineBox {
            fragments,
            rect: Rectangle {
                x: self.start_x + shift,
                y: self.cursor_y,
                width: (content_end - self.start_x).max(0.0),
                height,
            },
            baseline,
            source_range: source_start.zip(source_end),
        });

        self.cursor_y += height;
        self.cursor_x = self.start_x;
        self.line_has_content = false;
        self.line_start_hint = None;
    }
}
