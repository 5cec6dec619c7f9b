use css::ComputedStyle;

use crate::TextMeasurer;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct FragmentMetrics {
    pub(super) ascent: f32,
    pub(super) descent: f32,
}

impl FragmentMetrics {
    pub(super) fn height(self) -> f32 {
        self.ascent + self.descent
    }
}

/// Used line height: fixed by the style, else whatever the measurer reports
/// for `normal`.
pub fn resolve_line_height(measurer: &dyn TextMeasurer, style: &ComputedStyle) -> f32 {
    let lh = style
        .line_height_px()
        .unwrap_or_else(|| measurer.line_height(style));
    if lh.is_finite() { lh.max(0.0) } else { 0.0 }
}

fn compute_font_metrics_from(font_px: f32, line_height: f32) -> FragmentMetrics {
    // No real font metrics: approximate a typical ascent/descent split and
    // distribute the leading equally above and below the em box.
    let font_px = font_px.max(0.0);
    let line_height = line_height.max(0.0);

    let font_ascent = font_px * 0.8;
    let font_descent = font_px - font_ascent;

    let leading = line_height - (font_ascent + font_descent);
    let half_leading = leading * 0.5;

    // Negative leading (line-height below the font size) shrinks both sides.
    let ascent = (half_leading + font_ascent).clamp(0.0, line_height);
    let descent = (line_height - ascent).max(0.0);
    FragmentMetrics { ascent, descent }
}

pub(super) fn compute_text_metrics(
    measurer: &dyn TextMeasurer,
    style: &ComputedStyle,
) -> FragmentMetrics {
    let line_height = resolve_line_height(measurer, style);
    compute_font_metrics_from(style.font_size_px(), line_height)
}

/// Each line box has a minimum height from the block's own font (the strut),
/// even when it holds nothing but atomic boxes or nothing at all.
pub(super) fn compute_strut_metrics(
    measurer: &dyn TextMeasurer,
    block_style: &ComputedStyle,
) -> FragmentMetrics {
    compute_text_metrics(measurer, block_style)
}

pub(super) fn inline_block_baseline_metrics_bottom_edge(height: f32) -> FragmentMetrics {
    // CSS2.1: an inline-block without in-flow line boxes has its baseline at
    // the bottom margin edge. Inline-block contents are not laid out here.
    FragmentMetrics {
        ascent: height.max(0.0),
        descent: 0.0,
    }
}
