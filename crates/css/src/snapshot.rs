use crate::syntax::parse_declarations;
use crate::values::{Length, parse_length};

/// Computed properties copied from a source field onto its mirror.
///
/// Anything that changes where glyphs land is listed, plus the paint-only
/// properties hosts usually report alongside them.
pub const MIRRORED_PROPERTIES: &[&str] = &[
    "font-family",
    "font-size",
    "font-weight",
    "font-style",
    "color",
    "text-transform",
    "text-decoration",
    "letter-spacing",
    "word-spacing",
    "line-height",
    "text-align",
    "vertical-align",
    "direction",
    "background-color",
    "background-image",
    "background-repeat",
    "background-position",
    "background-attachment",
    "opacity",
    "width",
    "height",
    "top",
    "right",
    "bottom",
    "left",
    "margin-top",
    "margin-right",
    "margin-bottom",
    "margin-left",
    "padding-top",
    "padding-right",
    "padding-bottom",
    "padding-left",
    "border-top-width",
    "border-right-width",
    "border-bottom-width",
    "border-left-width",
    "border-top-color",
    "border-right-color",
    "border-bottom-color",
    "border-left-color",
    "border-top-style",
    "border-right-style",
    "border-bottom-style",
    "border-left-style",
    "position",
    "display",
    "visibility",
    "z-index",
    "overflow-x",
    "overflow-y",
    "white-space",
    "clip",
    "float",
    "clear",
    "cursor",
    "list-style-image",
    "list-style-position",
    "list-style-type",
    "marker-offset",
];

/// An ordered list of `property: value` declarations.
///
/// Property names are stored lowercase. Setting an existing property replaces
/// its value in place, so serialization order is first-write order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSnapshot {
    entries: Vec<(String, String)>,
}

impl StyleSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an inline declaration block (`"a: b; c: d"`).
    pub fn parse_inline(css: &str) -> Self {
        parse_declarations(css)
            .into_iter()
            .map(|d| (d.name, d.value))
            .collect()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(property))
            .map(|(_, v)| v.as_str())
    }

    /// `px` value of `property`, if it is set to a length.
    pub fn px(&self, property: &str) -> Option<f32> {
        self.get(property).and_then(parse_length).map(Length::px)
    }

    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(property))
        {
            Some(slot) => slot.1 = value,
            None => self.entries.push((property.to_ascii_lowercase(), value)),
        }
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let idx = self
            .entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(property))?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declarations as cascade input.
    pub fn declarations(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Serialize for a `style` attribute.
    pub fn to_inline_css(&self) -> String {
        let mut out = String::new();
        for (k, v) in &self.entries {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(k);
            out.push_str(": ");
            out.push_str(v);
            out.push(';');
        }
        out
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for StyleSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = StyleSnapshot::new();
        for (k, v) in iter {
            snapshot.set(k.as_ref(), v);
        }
        snapshot
    }
}
