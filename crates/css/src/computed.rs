use std::sync::Arc;

use crate::values::{
    Direction, Display, FontStyle, Length, LineHeight, Overflow, OverflowWrap, Position,
    TextAlign, TextTransform, WhiteSpace, parse_color, parse_direction, parse_display,
    parse_font_style, parse_font_weight, parse_length, parse_line_height, parse_overflow,
    parse_overflow_wrap, parse_position, parse_spacing, parse_text_align, parse_text_transform,
    parse_white_space,
};

use html::Node;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxMetrics {
    // Margins in CSS px
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,

    // Padding in CSS px
    pub padding_top: f32,
    pub padding_right: f32,
    pub padding_bottom: f32,
    pub padding_left: f32,

    // Border widths in CSS px (zero when the side's style is none/hidden)
    pub border_top: f32,
    pub border_right: f32,
    pub border_bottom: f32,
    pub border_left: f32,
}

impl BoxMetrics {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn horizontal_padding_border(&self) -> f32 {
        self.padding_left + self.padding_right + self.border_left + self.border_right
    }

    pub fn vertical_padding_border(&self) -> f32 {
        self.padding_top + self.padding_bottom + self.border_top + self.border_bottom
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    /// Inherited by default. Initial: black.
    pub color: (u8, u8, u8, u8),

    /// Not inherited. Initial: transparent.
    pub background_color: (u8, u8, u8, u8),

    /// Inherited. The raw family list; the text measurer interprets it.
    pub font_family: Arc<str>,

    /// Inherited. Initial: 16px.
    pub font_size: Length,
    pub font_weight: u16,
    pub font_style: FontStyle,
    pub line_height: LineHeight,

    /// Inherited, in px (`normal` = 0).
    pub letter_spacing: f32,
    pub word_spacing: f32,

    pub text_transform: TextTransform,
    pub text_align: TextAlign,
    pub direction: Direction,
    pub white_space: WhiteSpace,
    pub overflow_wrap: OverflowWrap,

    /// Not inherited. Elements without a `display` declaration get a per-tag
    /// default in `build_style_tree`.
    pub display: Display,

    pub box_metrics: BoxMetrics,

    /// Content-box width/height. `None` means auto.
    pub width: Option<Length>,
    pub height: Option<Length>,

    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub position: Position,
    pub left: Option<Length>,
    pub top: Option<Length>,
}

impl ComputedStyle {
    pub fn initial() -> Self {
        ComputedStyle {
            color: (0, 0, 0, 255),
            background_color: (0, 0, 0, 0),
            font_family: Arc::from("monospace"),
            font_size: Length::Px(16.0),
            font_weight: 400,
            font_style: FontStyle::Normal,
            line_height: LineHeight::Normal,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            text_transform: TextTransform::None,
            text_align: TextAlign::Start,
            direction: Direction::Ltr,
            white_space: WhiteSpace::Normal,
            overflow_wrap: OverflowWrap::Normal,
            display: Display::Block,
            box_metrics: BoxMetrics::zero(),
            width: None,
            height: None,
            overflow_x: Overflow::Visible,
            overflow_y: Overflow::Visible,
            position: Position::Static,
            left: None,
            top: None,
        }
    }

    pub fn font_size_px(&self) -> f32 {
        self.font_size.px()
    }

    /// Used line height when it is fixed by the style; `None` for `normal`,
    /// which only the text measurer can resolve.
    pub fn line_height_px(&self) -> Option<f32> {
        match self.line_height {
            LineHeight::Normal => None,
            LineHeight::Number(n) => Some(n * self.font_size_px()),
            LineHeight::Px(px) => Some(px),
        }
    }

    fn inherit_from(parent: &ComputedStyle) -> Self {
        ComputedStyle {
            color: parent.color,
            font_family: Arc::clone(&parent.font_family),
            font_size: parent.font_size,
            font_weight: parent.font_weight,
            font_style: parent.font_style,
            line_height: parent.line_height,
            letter_spacing: parent.letter_spacing,
            word_spacing: parent.word_spacing,
            text_transform: parent.text_transform,
            text_align: parent.text_align,
            direction: parent.direction,
            white_space: parent.white_space,
            overflow_wrap: parent.overflow_wrap,
            ..ComputedStyle::initial()
        }
    }
}

/// A node in the style tree: pairs a DOM node with its computed style
/// and the styled children.
pub struct StyledNode<'a> {
    pub node: &'a Node,
    pub style: ComputedStyle,
    pub children: Vec<StyledNode<'a>>,
}

#[derive(Clone, Copy)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

const SIDES: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

fn side_from_suffix(suffix: &str) -> Option<Side> {
    match suffix {
        "top" => Some(Side::Top),
        "right" => Some(Side::Right),
        "bottom" => Some(Side::Bottom),
        "left" => Some(Side::Left),
        _ => None,
    }
}

fn set_side(metrics: &mut BoxMetrics, group: &str, side: Side, px: f32) {
    let slot = match (group, side) {
        ("margin", Side::Top) => &mut metrics.margin_top,
        ("margin", Side::Right) => &mut metrics.margin_right,
        ("margin", Side::Bottom) => &mut metrics.margin_bottom,
        ("margin", Side::Left) => &mut metrics.margin_left,
        ("padding", Side::Top) => &mut metrics.padding_top,
        ("padding", Side::Right) => &mut metrics.padding_right,
        ("padding", Side::Bottom) => &mut metrics.padding_bottom,
        ("padding", Side::Left) => &mut metrics.padding_left,
        (_, Side::Top) => &mut metrics.border_top,
        (_, Side::Right) => &mut metrics.border_right,
        (_, Side::Bottom) => &mut metrics.border_bottom,
        (_, Side::Left) => &mut metrics.border_left,
    };
    *slot = px;
}

// `padding: 1px 2px` style shorthand: 1 to 4 lengths in top/right/bottom/left order.
fn expand_box_shorthand(value: &str) -> Option<[f32; 4]> {
    let parts: Vec<f32> = value
        .split_whitespace()
        .map(|p| parse_length(p).map(Length::px))
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [a] => Some([*a, *a, *a, *a]),
        [v, h] => Some([*v, *h, *v, *h]),
        [t, h, b] => Some([*t, *h, *b, *h]),
        [t, r, b, l] => Some([*t, *r, *b, *l]),
        _ => None,
    }
}

fn is_hidden_border_style(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "none" | "hidden")
}

// `border: 1px solid red` -> (width, hidden?)
fn parse_border_shorthand(value: &str) -> (Option<f32>, bool) {
    let mut width = None;
    let mut hidden = false;
    for part in value.split_whitespace() {
        if let Some(len) = parse_length(part) {
            width = Some(len.px().max(0.0));
        } else if is_hidden_border_style(part) {
            hidden = true;
        }
    }
    (width, hidden)
}

fn parse_auto_length(value: &str) -> Option<Option<Length>> {
    if value.trim().eq_ignore_ascii_case("auto") {
        return Some(None);
    }
    parse_length(value).map(Some)
}

/// Compute the final, inherited style for an element, given:
/// - its specified declarations (Node.style)
/// - an optional parent computed style.
///
/// Unknown properties and unparsable values are ignored.
pub fn compute_style(
    specified: &[(String, String)],
    parent: Option<&ComputedStyle>,
) -> ComputedStyle {
    let mut result = match parent {
        Some(p) => ComputedStyle::inherit_from(p),
        None => ComputedStyle::initial(),
    };
    let mut hidden_border = [false; 4];

    for (name, value) in specified {
        let name = name.as_str();
        let value = value.as_str();

        match name {
            "color" => {
                if let Some(rgba) = parse_color(value) {
                    result.color = rgba;
                }
            }
            "background-color" => {
                if let Some(rgba) = parse_color(value) {
                    result.background_color = rgba;
                }
            }
            "font-family" => {
                let family = value.trim();
                if !family.is_empty() {
                    result.font_family = Arc::from(family);
                }
            }
            "font-size" => {
                if let Some(len) = parse_length(value)
                    && len.px() > 0.0
                {
                    result.font_size = len;
                }
            }
            "font-weight" => {
                if let Some(w) = parse_font_weight(value) {
                    result.font_weight = w;
                }
            }
            "font-style" => {
                if let Some(s) = parse_font_style(value) {
                    result.font_style = s;
                }
            }
            "line-height" => {
                if let Some(lh) = parse_line_height(value) {
                    result.line_height = lh;
                }
            }
            "letter-spacing" => {
                if let Some(px) = parse_spacing(value) {
                    result.letter_spacing = px;
                }
            }
            "word-spacing" => {
                if let Some(px) = parse_spacing(value) {
                    result.word_spacing = px;
                }
            }
            "text-transform" => {
                if let Some(t) = parse_text_transform(value) {
                    result.text_transform = t;
                }
            }
            "text-align" => {
                if let Some(a) = parse_text_align(value) {
                    result.text_align = a;
                }
            }
            "direction" => {
                if let Some(d) = parse_direction(value) {
                    result.direction = d;
                }
            }
            "white-space" => {
                if let Some(ws) = parse_white_space(value) {
                    result.white_space = ws;
                }
            }
            "overflow-wrap" | "word-wrap" => {
                if let Some(w) = parse_overflow_wrap(value) {
                    result.overflow_wrap = w;
                }
            }
            "display" => {
                if let Some(d) = parse_display(value) {
                    result.display = d;
                }
            }
            "width" => {
                if let Some(w) = parse_auto_length(value)
                    && w.is_none_or(|l| l.px() >= 0.0)
                {
                    result.width = w;
                }
            }
            "height" => {
                if let Some(h) = parse_auto_length(value)
                    && h.is_none_or(|l| l.px() >= 0.0)
                {
                    result.height = h;
                }
            }
            "left" => {
                if let Some(l) = parse_auto_length(value) {
                    result.left = l;
                }
            }
            "top" => {
                if let Some(t) = parse_auto_length(value) {
                    result.top = t;
                }
            }
            "position" => {
                if let Some(p) = parse_position(value) {
                    result.position = p;
                }
            }
            "overflow" => {
                if let Some(o) = parse_overflow(value) {
                    result.overflow_x = o;
                    result.overflow_y = o;
                }
            }
            "overflow-x" => {
                if let Some(o) = parse_overflow(value) {
                    result.overflow_x = o;
                }
            }
            "overflow-y" => {
                if let Some(o) = parse_overflow(value) {
                    result.overflow_y = o;
                }
            }

            // --- Box model shorthands ---
            "margin" | "padding" | "border-width" => {
                if let Some(edges) = expand_box_shorthand(value) {
                    let group = name.split('-').next().unwrap_or(name);
                    for (side, px) in SIDES.into_iter().zip(edges) {
                        let px = if group == "margin" { px } else { px.max(0.0) };
                        set_side(&mut result.box_metrics, group, side, px);
                    }
                }
            }
            "border" => {
                let (width, hidden) = parse_border_shorthand(value);
                for (i, side) in SIDES.into_iter().enumerate() {
                    if let Some(px) = width {
                        set_side(&mut result.box_metrics, "border", side, px);
                    }
                    hidden_border[i] = hidden;
                }
            }
            "border-style" => {
                let hidden = is_hidden_border_style(value);
                hidden_border = [hidden; 4];
            }

            // --- Longhands: margin-top, padding-left, border-top-width, border-left-style ---
            _ => {
                let mut parts = name.split('-');
                match (parts.next(), parts.next(), parts.next(), parts.next()) {
                    (Some(group @ ("margin" | "padding")), Some(side), None, None) => {
                        if let (Some(side), Some(len)) = (side_from_suffix(side), parse_length(value)) {
                            let px = if group == "margin" { len.px() } else { len.px().max(0.0) };
                            set_side(&mut result.box_metrics, group, side, px);
                        }
                    }
                    (Some("border"), Some(side), Some("width"), None) => {
                        if let (Some(side), Some(len)) = (side_from_suffix(side), parse_length(value)) {
                            set_side(&mut result.box_metrics, "border", side, len.px().max(0.0));
                        }
                    }
                    (Some("border"), Some(side), Some("style"), None) => {
                        if let Some(side) = side_from_suffix(side) {
                            hidden_border[side as usize] = is_hidden_border_style(value);
                        }
                    }
                    // unsupported property → ignored
                    _ => {}
                }
            }
        }
    }

    for (side, hidden) in SIDES.into_iter().zip(hidden_border) {
        if hidden {
            set_side(&mut result.box_metrics, "border", side, 0.0);
        }
    }

    result
}

fn default_display_for(tag: &str) -> Display {
    match tag.to_ascii_lowercase().as_str() {
        "span" | "a" | "em" | "strong" | "b" | "i" | "u" | "small" | "code" | "br" | "font" => {
            Display::Inline
        }
        "li" => Display::ListItem,
        "img" | "input" | "textarea" | "button" => Display::InlineBlock,
        "style" | "script" | "head" => Display::None,
        _ => Display::Block,
    }
}

/// Build a style tree rooted at `root`, inheriting from `parent_style`.
///
/// Text nodes get a copy of their parent's style.
pub fn build_style_tree<'a>(
    root: &'a Node,
    parent_style: Option<&ComputedStyle>,
) -> StyledNode<'a> {
    match root {
        Node::Element {
            name,
            style,
            children,
            ..
        } => {
            let has_display_decl = style
                .iter()
                .any(|(prop, _)| prop.eq_ignore_ascii_case("display"));

            let mut computed = compute_style(style, parent_style);
            if !has_display_decl {
                computed.display = default_display_for(name);
            }

            let children = children
                .iter()
                .map(|child| build_style_tree(child, Some(&computed)))
                .collect();

            StyledNode {
                node: root,
                style: computed,
                children,
            }
        }

        Node::Text { .. } => StyledNode {
            node: root,
            style: parent_style.cloned().unwrap_or_else(ComputedStyle::initial),
            children: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decls(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn inherited_text_properties_flow_to_children() {
        let parent = compute_style(
            &decls(&[
                ("font-size", "20px"),
                ("white-space", "pre-wrap"),
                ("padding-left", "5px"),
                ("letter-spacing", "1px"),
            ]),
            None,
        );
        let child = compute_style(&[], Some(&parent));
        assert_eq!(child.font_size, Length::Px(20.0));
        assert_eq!(child.white_space, WhiteSpace::PreWrap);
        assert_eq!(child.letter_spacing, 1.0);
        assert_eq!(child.box_metrics.padding_left, 0.0);
    }

    #[test]
    fn shorthands_expand_and_hidden_borders_collapse() {
        let s = compute_style(
            &decls(&[
                ("padding", "1px 2px"),
                ("border-left-width", "3px"),
                ("border-top-width", "4px"),
                ("border-top-style", "none"),
                ("margin", "0"),
            ]),
            None,
        );
        let m = s.box_metrics;
        assert_eq!((m.padding_top, m.padding_right, m.padding_bottom, m.padding_left), (1.0, 2.0, 1.0, 2.0));
        assert_eq!(m.border_left, 3.0);
        assert_eq!(m.border_top, 0.0);

        let marker = compute_style(&decls(&[("padding", "0"), ("border", "0")]), None);
        assert_eq!(marker.box_metrics, BoxMetrics::zero());
    }

    #[test]
    fn word_wrap_aliases_overflow_wrap_and_line_height_resolves() {
        let s = compute_style(
            &decls(&[("word-wrap", "break-word"), ("font-size", "10px"), ("line-height", "1.5")]),
            None,
        );
        assert_eq!(s.overflow_wrap, OverflowWrap::BreakWord);
        assert_eq!(s.line_height_px(), Some(15.0));
        assert_eq!(ComputedStyle::initial().line_height_px(), None);
    }

    #[test]
    fn style_tree_applies_tag_defaults() {
        let mut f = html::NodeFactory::new();
        let mut pre = f.element("pre");
        let span = f.element("span");
        let text = f.text("x");
        pre.children_mut().expect("element").extend([span, text]);

        let tree = build_style_tree(&pre, None);
        assert_eq!(tree.style.display, Display::Block);
        assert_eq!(tree.children[0].style.display, Display::Inline);
        assert_eq!(tree.children[1].style, tree.style);
    }
}
