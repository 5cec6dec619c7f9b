//! The host side of a tracked text field.

use std::borrow::Cow;

use css::StyleSnapshot;
use input_core::{CaretProbe, FieldId};

/// What kind of control a source field is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single-line `<input>`.
    Input,
    TextArea,
    ContentEditable,
}

impl FieldKind {
    pub fn is_multiline(self) -> bool {
        !matches!(self, FieldKind::Input)
    }
}

/// The text a field currently holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldContent<'a> {
    /// Value of a form control.
    Value(&'a str),
    /// Markup payload of a content-editable element.
    EditableHtml(&'a str),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub left: f32,
    pub top: f32,
}

impl Point {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A text-bearing element owned by the host.
///
/// Sizes follow the usual element metrics: `content_size` is the content box,
/// `client_size` the padding box without scrollbars, and `scroll_size` the
/// full scrollable extent of the padding box.
pub trait SourceField: CaretProbe {
    fn field_id(&self) -> FieldId;

    fn kind(&self) -> FieldKind;

    fn content(&self) -> FieldContent<'_>;

    /// Page position of the border box's top-left corner.
    fn page_offset(&self) -> Point;

    fn content_size(&self) -> Size;

    fn client_size(&self) -> Size;

    fn scroll_size(&self) -> Size;

    fn scroll_offset(&self) -> Point;

    /// Computed style of the field.
    fn computed_style(&self) -> &StyleSnapshot;

    /// Write a `data-*` attribute onto the field.
    fn set_data_attribute(&mut self, name: &str, value: String);
}

/// The field's text as plain characters, the unit caret offsets count in.
pub fn plain_text(field: &dyn SourceField) -> Cow<'_, str> {
    match field.content() {
        FieldContent::Value(value) => Cow::Borrowed(value),
        FieldContent::EditableHtml(markup) => Cow::Owned(html::plain_text_from_html(markup)),
    }
}

/// Left and top border widths of the field.
pub(crate) fn border_offset(field: &dyn SourceField) -> Point {
    let style = field.computed_style();
    Point {
        left: style.px("border-left-width").unwrap_or(0.0),
        top: style.px("border-top-width").unwrap_or(0.0),
    }
}
