use css::ComputedStyle;

/// Layout depends on this without knowing about fonts or rasterizers.
pub trait TextMeasurer {
    /// Return the width of `text` in CSS px when rendered with `style`.
    ///
    /// `text` never contains tabs or control characters; spacing properties
    /// (`letter-spacing`, `word-spacing`) are added by the caller.
    fn measure(&self, text: &str, style: &ComputedStyle) -> f32;

    /// Return the `line-height: normal` height in CSS px for `style`.
    /// Fixed line heights are resolved from the style before this is asked.
    fn line_height(&self, style: &ComputedStyle) -> f32;
}
