//! Document-wide state shared by every locator: the injected style rules.

use css::{Stylesheet, parse_stylesheet};
use html::{Node, NodeFactory, find_by_class, inner_markup, text_content};

use crate::config::ClassNames;

#[derive(Clone, Debug, Default)]
pub struct Document {
    style_tags: Vec<Node>,
    factory: NodeFactory,
    sheet: Stylesheet,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the marker rules for `names` unless a style tag carrying
    /// `<class>-styles` already exists. Returns whether a tag was added.
    pub fn ensure_caret_styles(&mut self, names: &ClassNames) -> bool {
        if find_by_class(&self.style_tags, &names.styles).is_some() {
            return false;
        }

        let rules = format!(
            ".{} {{ display: inline-block; padding: 0; border: 0; }}\n.{} {{ display: block; }}\n",
            names.cursor, names.linebreak
        );
        let mut tag = self.factory.element_with_class("style", &names.styles);
        tag.set_attr("type", "text/css");
        if let Some(children) = tag.children_mut() {
            children.push(self.factory.text(rules));
        }
        self.style_tags.push(tag);
        self.sheet = parse_stylesheet(&text_content(&self.style_tags));

        log::debug!(target: "caret.locator", "injected caret styles for {:?}", names.base);
        true
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.sheet
    }

    pub fn style_tags(&self) -> &[Node] {
        &self.style_tags
    }

    pub fn style_markup(&self) -> String {
        inner_markup(&self.style_tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_are_injected_once_per_prefix() {
        let mut doc = Document::new();
        let names = ClassNames::new("jCursorPos");
        assert!(doc.ensure_caret_styles(&names));
        assert!(!doc.ensure_caret_styles(&names));
        assert_eq!(doc.style_tags().len(), 1);
        assert_eq!(doc.stylesheet().rules.len(), 2);

        assert!(doc.ensure_caret_styles(&ClassNames::new("other")));
        assert_eq!(doc.style_tags().len(), 2);
    }

    #[test]
    fn marker_rule_is_serialized() {
        let mut doc = Document::new();
        doc.ensure_caret_styles(&ClassNames::new("jCursorPos"));
        let markup = doc.style_markup();
        assert!(markup.starts_with("<style class=\"jCursorPos-styles\""));
        assert!(markup.contains(".jCursorPos-cursor { display: inline-block; padding: 0; border: 0; }"));
    }
}
