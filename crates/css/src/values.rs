/// CSS Length value. Host styles arrive as computed values, so `px` is all
/// we need to resolve; unitless `0` is accepted as `0px`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
}

impl Length {
    pub fn px(self) -> f32 {
        match self {
            Length::Px(px) => px,
        }
    }
}

/// CSS `display` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    ListItem,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WhiteSpace {
    #[default]
    Normal,
    Nowrap,
    Pre,
    PreWrap,
    PreLine,
}

impl WhiteSpace {
    /// Runs of spaces and tabs collapse to a single space.
    pub fn collapses_spaces(self) -> bool {
        matches!(self, WhiteSpace::Normal | WhiteSpace::Nowrap | WhiteSpace::PreLine)
    }

    /// Segment breaks (`\n`) force a line break.
    pub fn preserves_newlines(self) -> bool {
        matches!(self, WhiteSpace::Pre | WhiteSpace::PreWrap | WhiteSpace::PreLine)
    }

    /// Lines may soft-wrap at break opportunities.
    pub fn wraps(self) -> bool {
        matches!(self, WhiteSpace::Normal | WhiteSpace::PreWrap | WhiteSpace::PreLine)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OverflowWrap {
    #[default]
    Normal,
    BreakWord,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    /// Apply the transform to a run of text. `at_word_start` says whether the
    /// first character of `text` begins a word (for `capitalize`).
    pub fn apply(self, text: &str, at_word_start: bool) -> String {
        match self {
            TextTransform::None => text.to_string(),
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
            TextTransform::Capitalize => {
                let mut out = String::with_capacity(text.len());
                let mut word_start = at_word_start;
                for ch in text.chars() {
                    if word_start && ch.is_alphanumeric() {
                        out.extend(ch.to_uppercase());
                        word_start = false;
                    } else {
                        out.push(ch);
                        word_start = ch.is_whitespace();
                    }
                }
                out
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum LineHeight {
    /// Left to the text measurer.
    #[default]
    Normal,
    /// Multiple of the font size.
    Number(f32),
    Px(f32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

pub fn parse_color(value: &str) -> Option<(u8, u8, u8, u8)> {
    let s = value.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            3 => Some((
                channel(&hex[0..1].repeat(2))?,
                channel(&hex[1..2].repeat(2))?,
                channel(&hex[2..3].repeat(2))?,
                255,
            )),
            6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?, 255)),
            _ => None,
        };
    }

    // Computed colors come back as `rgb()`/`rgba()`.
    if let Some(args) = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let r = parts[0].parse::<u8>().ok()?;
        let g = parts[1].parse::<u8>().ok()?;
        let b = parts[2].parse::<u8>().ok()?;
        let a = match parts.get(3) {
            Some(a) => (a.parse::<f32>().ok()?.clamp(0.0, 1.0) * 255.0).round() as u8,
            None => 255,
        };
        return Some((r, g, b, a));
    }

    let named = match s.as_str() {
        "black" => (0, 0, 0, 255),
        "blue" => (0, 0, 255, 255),
        "gray" | "grey" => (128, 128, 128, 255),
        "green" => (0, 128, 0, 255),
        "red" => (255, 0, 0, 255),
        "white" => (255, 255, 255, 255),
        "transparent" => (0, 0, 0, 0),
        _ => return None,
    };
    Some(named)
}

/// Parse `<number>px` (or a bare `0`). Negative values are allowed; callers
/// that need a non-negative length check it themselves.
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim().to_ascii_lowercase();
    let v = v.strip_suffix("!important").map_or(v.as_str(), str::trim_end);

    if let Some(px_str) = v.strip_suffix("px") {
        let num = px_str.trim().parse::<f32>().ok()?;
        if num.is_finite() {
            return Some(Length::Px(num));
        }
        return None;
    }
    if v.parse::<f32>().ok() == Some(0.0) {
        return Some(Length::Px(0.0));
    }
    None
}

/// `letter-spacing` / `word-spacing`: `normal` is zero.
pub fn parse_spacing(value: &str) -> Option<f32> {
    if value.trim().eq_ignore_ascii_case("normal") {
        return Some(0.0);
    }
    parse_length(value).map(Length::px)
}

pub fn parse_display(value: &str) -> Option<Display> {
    match value.trim().to_ascii_lowercase().as_str() {
        "block" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "list-item" => Some(Display::ListItem),
        "none" => Some(Display::None),
        // Host form controls report these; they lay out like an inline box.
        "inline-flex" | "inline-grid" | "inline-table" => Some(Display::InlineBlock),
        "flex" | "grid" | "table" | "flow-root" => Some(Display::Block),
        _ => None,
    }
}

pub fn parse_white_space(value: &str) -> Option<WhiteSpace> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(WhiteSpace::Normal),
        "nowrap" => Some(WhiteSpace::Nowrap),
        "pre" => Some(WhiteSpace::Pre),
        "pre-wrap" | "break-spaces" => Some(WhiteSpace::PreWrap),
        "pre-line" => Some(WhiteSpace::PreLine),
        _ => None,
    }
}

/// Shared by `overflow-wrap` and its legacy alias `word-wrap`.
pub fn parse_overflow_wrap(value: &str) -> Option<OverflowWrap> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(OverflowWrap::Normal),
        "break-word" | "anywhere" => Some(OverflowWrap::BreakWord),
        _ => None,
    }
}

pub fn parse_overflow(value: &str) -> Option<Overflow> {
    match value.trim().to_ascii_lowercase().as_str() {
        "visible" => Some(Overflow::Visible),
        "hidden" | "clip" => Some(Overflow::Hidden),
        "scroll" => Some(Overflow::Scroll),
        "auto" => Some(Overflow::Auto),
        _ => None,
    }
}

pub fn parse_position(value: &str) -> Option<Position> {
    match value.trim().to_ascii_lowercase().as_str() {
        "static" => Some(Position::Static),
        "relative" | "sticky" => Some(Position::Relative),
        "absolute" => Some(Position::Absolute),
        "fixed" => Some(Position::Fixed),
        _ => None,
    }
}

pub fn parse_text_align(value: &str) -> Option<TextAlign> {
    match value.trim().to_ascii_lowercase().as_str() {
        "start" | "justify" | "-webkit-auto" => Some(TextAlign::Start),
        "end" => Some(TextAlign::End),
        "left" | "-webkit-left" => Some(TextAlign::Left),
        "right" | "-webkit-right" => Some(TextAlign::Right),
        "center" | "-webkit-center" => Some(TextAlign::Center),
        _ => None,
    }
}

pub fn parse_direction(value: &str) -> Option<Direction> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ltr" => Some(Direction::Ltr),
        "rtl" => Some(Direction::Rtl),
        _ => None,
    }
}

pub fn parse_text_transform(value: &str) -> Option<TextTransform> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" => Some(TextTransform::None),
        "uppercase" => Some(TextTransform::Uppercase),
        "lowercase" => Some(TextTransform::Lowercase),
        "capitalize" => Some(TextTransform::Capitalize),
        _ => None,
    }
}

pub fn parse_line_height(value: &str) -> Option<LineHeight> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("normal") {
        return Some(LineHeight::Normal);
    }
    if let Some(Length::Px(px)) = parse_length(v)
        && v.to_ascii_lowercase().ends_with("px")
    {
        return (px >= 0.0).then_some(LineHeight::Px(px));
    }
    if let Some(pct) = v.strip_suffix('%') {
        let n = pct.trim().parse::<f32>().ok()?;
        return (n.is_finite() && n >= 0.0).then_some(LineHeight::Number(n / 100.0));
    }
    let n = v.parse::<f32>().ok()?;
    (n.is_finite() && n >= 0.0).then_some(LineHeight::Number(n))
}

pub fn parse_font_weight(value: &str) -> Option<u16> {
    match value.trim().to_ascii_lowercase().as_str() {
        "normal" => Some(400),
        "bold" => Some(700),
        "lighter" => Some(300),
        "bolder" => Some(700),
        other => other.parse::<u16>().ok().filter(|w| (1..=1000).contains(w)),
    }
}

pub fn parse_font_style(value: &str) -> Option<FontStyle> {
    let v = value.trim().to_ascii_lowercase();
    match v.split_whitespace().next() {
        Some("normal") => Some(FontStyle::Normal),
        Some("italic") => Some(FontStyle::Italic),
        Some("oblique") => Some(FontStyle::Oblique),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_accept_px_zero_and_negatives() {
        assert_eq!(parse_length("12.5px"), Some(Length::Px(12.5)));
        assert_eq!(parse_length(" 0 "), Some(Length::Px(0.0)));
        assert_eq!(parse_length("-9999px"), Some(Length::Px(-9999.0)));
        assert_eq!(parse_length("1em"), None);
        assert_eq!(parse_length("auto"), None);
    }

    #[test]
    fn colors_hex_rgb_and_named() {
        assert_eq!(parse_color("#fff"), Some((255, 255, 255, 255)));
        assert_eq!(parse_color("rgb(1, 2, 3)"), Some((1, 2, 3, 255)));
        assert_eq!(parse_color("rgba(1, 2, 3, 0)"), Some((1, 2, 3, 0)));
        assert_eq!(parse_color("red"), Some((255, 0, 0, 255)));
        assert_eq!(parse_color("#12"), None);
    }

    #[test]
    fn white_space_modes() {
        let pre_wrap = parse_white_space("pre-wrap").unwrap();
        assert!(pre_wrap.wraps() && pre_wrap.preserves_newlines() && !pre_wrap.collapses_spaces());
        let nowrap = parse_white_space("nowrap").unwrap();
        assert!(!nowrap.wraps() && nowrap.collapses_spaces());
        let pre_line = parse_white_space("PRE-LINE").unwrap();
        assert!(pre_line.wraps() && pre_line.preserves_newlines() && pre_line.collapses_spaces());
    }

    #[test]
    fn line_height_forms() {
        assert_eq!(parse_line_height("normal"), Some(LineHeight::Normal));
        assert_eq!(parse_line_height("18px"), Some(LineHeight::Px(18.0)));
        assert_eq!(parse_line_height("1.5"), Some(LineHeight::Number(1.5)));
        assert_eq!(parse_line_height("150%"), Some(LineHeight::Number(1.5)));
        assert_eq!(parse_line_height("-2"), None);
    }

    #[test]
    fn capitalize_respects_word_starts() {
        assert_eq!(TextTransform::Capitalize.apply("hello wORLD", true), "Hello WORLD");
        assert_eq!(TextTransform::Capitalize.apply("llo", false), "llo");
        assert_eq!(TextTransform::Uppercase.apply("straße", true), "STRASSE");
    }
}
