/// Per-call configuration for the inline layout engine.
#[derive(Clone, Copy, Debug)]
pub(crate) struct InlineLayoutOptions {
    /// Soft-wrap at break opportunities (`white-space` of the block).
    pub(crate) wrap: bool,
    /// Split a run that is wider than an empty line (`overflow-wrap: break-word`).
    pub(crate) break_long_words: bool,
}

impl InlineLayoutOptions {
    /// Defaults for mirror content in a block with the given style.
    pub(crate) fn for_block(style: &css::ComputedStyle) -> Self {
        Self {
            wrap: style.white_space.wraps(),
            break_long_words: style.overflow_wrap == css::OverflowWrap::BreakWord,
        }
    }

    /// Field renderer model: multi-line fields wrap with break-word,
    /// single-line fields never wrap.
    pub(crate) fn field_defaults(multiline: bool) -> Self {
        Self {
            wrap: multiline,
            break_long_words: multiline,
        }
    }
}
