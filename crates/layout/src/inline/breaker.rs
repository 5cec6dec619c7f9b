use css::ComputedStyle;

use crate::TextMeasurer;

use super::tokens::measure_text;

/// Return the byte index at which to break `text` so that the prefix fits
/// within `max_w` CSS pixels.
///
/// Used for `overflow-wrap: break-word` when a run is wider than an empty
/// line. Always returns at least one character so layout makes progress.
pub(super) fn break_word_prefix_end(
    measurer: &dyn TextMeasurer,
    style: &ComputedStyle,
    text: &str,
    max_w: f32,
) -> usize {
    if text.is_empty() {
        return 0;
    }

    let max_w = max_w.max(0.0);

    // Candidate cut positions at UTF-8 char boundaries (end indices).
    let ends: Vec<usize> = text.char_indices().map(|(idx, ch)| idx + ch.len_utf8()).collect();
    let fallback_one_char = ends[0];

    let mut lo = 0usize;
    let mut hi = ends.len();
    let mut best: Option<usize> = None;
    while lo < hi {
        let mid = (lo + hi) / 2;
        let end = ends[mid];
        let w = measure_text(measurer, style, &text[..end], true);
        let w = if w.is_finite() { w } else { f32::INFINITY };
        if w <= max_w {
            best = Some(end);
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    best.unwrap_or(fallback_one_char).min(text.len())
}
