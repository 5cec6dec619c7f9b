//! Simulated host pieces: a fixed-advance text measurer and an in-memory
//! text field. Enabled for tests and with the `test-harness` feature.

use std::collections::BTreeMap;

use css::{ComputedStyle, StyleSnapshot, compute_style};
use input_core::{CaretProbe, EditBuffer, FieldId, SelectionRange, TextRange};
use layout::{TextMeasurer, layout_field_text};

use crate::field::{FieldContent, FieldKind, Point, Size, SourceField};

/// Every character advances by the same width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance: 10.0 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, _style: &ComputedStyle) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn line_height(&self, style: &ComputedStyle) -> f32 {
        style.line_height_px().unwrap_or(style.font_size_px() * 1.2)
    }
}

/// Counts down to the start of the field, one character per move.
struct CountdownRange {
    remaining: usize,
}

impl TextRange for CountdownRange {
    fn move_start_back(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// An in-memory text field with a monospace renderer.
#[derive(Clone, Debug)]
pub struct SimField {
    id: FieldId,
    kind: FieldKind,
    buffer: EditBuffer,
    editable_html: Option<String>,
    page_offset: Point,
    scroll_offset: Point,
    content_size: Size,
    style: StyleSnapshot,
    attributes: BTreeMap<String, String>,
    legacy_only: bool,
    measurer: MonospaceMeasurer,
}

impl SimField {
    fn new(id: FieldId, kind: FieldKind, buffer: EditBuffer, content_size: Size) -> Self {
        Self {
            id,
            kind,
            buffer,
            editable_html: None,
            page_offset: Point::default(),
            scroll_offset: Point::default(),
            content_size,
            style: StyleSnapshot::parse_inline("font-family: monospace; font-size: 10px"),
            attributes: BTreeMap::new(),
            legacy_only: false,
            measurer: MonospaceMeasurer::default(),
        }
    }

    pub fn input(id: impl Into<FieldId>, value: &str) -> Self {
        Self::new(
            id.into(),
            FieldKind::Input,
            EditBuffer::single_line(value),
            Size::new(200.0, 12.0),
        )
    }

    pub fn textarea(id: impl Into<FieldId>, value: &str) -> Self {
        Self::new(
            id.into(),
            FieldKind::TextArea,
            EditBuffer::multi_line(value),
            Size::new(200.0, 120.0),
        )
    }

    /// Content-editable element holding `markup`; the caret counts in the
    /// plain text the markup renders to.
    pub fn content_editable(id: impl Into<FieldId>, markup: &str) -> Self {
        let mut field = Self::new(
            id.into(),
            FieldKind::ContentEditable,
            EditBuffer::raw(html::plain_text_from_html(markup)),
            Size::new(200.0, 120.0),
        );
        field.editable_html = Some(markup.to_string());
        field
    }

    pub fn with_content_size(mut self, width: f32, height: f32) -> Self {
        self.content_size = Size::new(width, height);
        self
    }

    /// Merge `css` declarations into the computed style.
    pub fn with_style(mut self, css: &str) -> Self {
        for (property, value) in StyleSnapshot::parse_inline(css).iter() {
            self.style.set(property, value);
        }
        self
    }

    pub fn with_page_offset(mut self, left: f32, top: f32) -> Self {
        self.page_offset = Point::new(left, top);
        self
    }

    pub fn with_scroll_offset(mut self, left: f32, top: f32) -> Self {
        self.scroll_offset = Point::new(left, top);
        self
    }

    pub fn with_advance(mut self, advance: f32) -> Self {
        self.measurer.advance = advance;
        self
    }

    /// Only expose the caret through a legacy text range.
    pub fn legacy_only(mut self) -> Self {
        self.legacy_only = true;
        self
    }

    pub fn caret_at(mut self, offset: usize) -> Self {
        self.buffer.set_caret(offset, false);
        self
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.content_size = Size::new(width, height);
    }

    pub fn scroll_to(&mut self, left: f32, top: f32) {
        self.scroll_offset = Point::new(left, top);
    }

    /// Replace the markup of a content-editable field.
    pub fn set_markup(&mut self, markup: &str) {
        self.buffer.set_value(html::plain_text_from_html(markup));
        self.editable_html = Some(markup.to_string());
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut EditBuffer {
        &mut self.buffer
    }

    pub fn data_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn padding(&self, a: &str, b: &str) -> f32 {
        self.style.px(a).unwrap_or(0.0) + self.style.px(b).unwrap_or(0.0)
    }
}

impl CaretProbe for SimField {
    fn selection(&self) -> Option<SelectionRange> {
        (!self.legacy_only).then(|| self.buffer.selection())
    }

    fn text_range(&mut self) -> Option<Box<dyn TextRange + '_>> {
        self.legacy_only.then(|| {
            Box::new(CountdownRange {
                remaining: self.buffer.caret(),
            }) as Box<dyn TextRange>
        })
    }
}

impl SourceField for SimField {
    fn field_id(&self) -> FieldId {
        self.id
    }

    fn kind(&self) -> FieldKind {
        self.kind
    }

    fn content(&self) -> FieldContent<'_> {
        match &self.editable_html {
            Some(markup) => FieldContent::EditableHtml(markup),
            None => FieldContent::Value(self.buffer.value()),
        }
    }

    fn page_offset(&self) -> Point {
        self.page_offset
    }

    fn content_size(&self) -> Size {
        self.content_size
    }

    fn client_size(&self) -> Size {
        Size::new(
            self.content_size.width + self.padding("padding-left", "padding-right"),
            self.content_size.height + self.padding("padding-top", "padding-bottom"),
        )
    }

    fn scroll_size(&self) -> Size {
        let style = compute_style(self.style.declarations(), None);
        let lines = layout_field_text(
            &self.measurer,
            &style,
            self.content_size.width,
            self.buffer.value(),
            self.kind.is_multiline(),
        );
        let text_width = lines
            .iter()
            .flat_map(|line| &line.fragments)
            .map(|frag| frag.rect.right())
            .fold(0.0, f32::max);
        let text_height = lines.last().map_or(0.0, |line| line.rect.bottom());

        // Hosts report scroll extents in whole pixels.
        let text_width = text_width.round();
        let text_height = text_height.round();
        let client = self.client_size();
        Size::new(
            client.width.max(text_width + self.padding("padding-left", "padding-right")),
            client.height.max(text_height + self.padding("padding-top", "padding-bottom")),
        )
    }

    fn scroll_offset(&self) -> Point {
        self.scroll_offset
    }

    fn computed_style(&self) -> &StyleSnapshot {
        &self.style
    }

    fn set_data_attribute(&mut self, name: &str, value: String) {
        self.attributes.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_text_overflows_vertically() {
        let field = SimField::textarea(1u32, &"word ".repeat(20)).with_content_size(100.0, 24.0);
        let scroll = field.scroll_size();
        assert_eq!(field.client_size(), Size::new(100.0, 24.0));
        assert!(scroll.height > 24.0, "scroll height {}", scroll.height);
    }

    #[test]
    fn short_text_does_not_overflow() {
        let field = SimField::input(1u32, "abc").with_style("padding-left: 4px; padding-right: 4px");
        assert_eq!(field.scroll_size(), field.client_size());
        assert_eq!(field.client_size().width, 208.0);
    }

    #[test]
    fn legacy_fields_only_offer_a_range() {
        let mut field = SimField::input(1u32, "abc").caret_at(2).legacy_only();
        assert!(field.selection().is_none());
        let mut range = field.text_range().expect("range");
        assert!(range.move_start_back());
        assert!(range.move_start_back());
        assert!(!range.move_start_back());
    }
}
