//! Markup serialization of mirror content.
//!
//! Mirror text carries two invisible characters that must survive a trip
//! through markup: zero-width spaces (break opportunities) and non-breaking
//! spaces (visible, non-collapsing). Both are written as character references
//! so the markup stays readable.

use crate::types::{Node, is_void_element};

pub const ZERO_WIDTH_SPACE: char = '\u{200B}';
pub const NO_BREAK_SPACE: char = '\u{00A0}';

pub fn outer_markup(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

pub fn inner_markup(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, &mut out);
    }
    out
}

/// Concatenated text of all descendants (`textContent`).
pub fn text_content(nodes: &[Node]) -> String {
    fn walk(node: &Node, out: &mut String) {
        match node {
            Node::Text { text, .. } => out.push_str(text),
            Node::Element { children, .. } => {
                for c in children {
                    walk(c, out);
                }
            }
        }
    }

    let mut out = String::new();
    for node in nodes {
        walk(node, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => write_text(text, out),
        Node::Element {
            name,
            attributes,
            children,
            ..
        } => {
            out.push('<');
            out.push_str(name);
            for (k, v) in attributes {
                out.push(' ');
                out.push_str(k);
                if let Some(v) = v {
                    out.push_str("=\"");
                    out.push_str(&html_escape::encode_double_quoted_attribute(v));
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            for c in children {
                write_node(c, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

fn write_text(text: &str, out: &mut String) {
    let mut run_start = 0;
    for (idx, ch) in text.char_indices() {
        let reference = match ch {
            ZERO_WIDTH_SPACE => "&#8203;",
            NO_BREAK_SPACE => "&nbsp;",
            _ => continue,
        };
        out.push_str(&html_escape::encode_text(&text[run_start..idx]));
        out.push_str(reference);
        run_start = idx + ch.len_utf8();
    }
    out.push_str(&html_escape::encode_text(&text[run_start..]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn br_is_void_and_invisible_chars_become_references() {
        let mut f = NodeFactory::new();
        let nodes = vec![
            f.text("\u{200B}"),
            f.element("br"),
            f.text("\u{200B}a\u{00A0}<b>"),
        ];
        assert_eq!(
            inner_markup(&nodes),
            "&#8203;<br>&#8203;a&nbsp;&lt;b&gt;"
        );
    }

    #[test]
    fn elements_serialize_with_attributes_and_children() {
        let mut f = NodeFactory::new();
        let mut span = f.element_with_class("span", "before-word");
        let word = f.text("say \"hi\"");
        span.children_mut().expect("element").push(word);
        assert_eq!(
            outer_markup(&span),
            "<span class=\"before-word\">say \"hi\"</span>"
        );
    }

    #[test]
    fn text_content_ignores_tags() {
        let mut f = NodeFactory::new();
        let mut span = f.element("span");
        let inner = f.text("b");
        span.children_mut().expect("element").push(inner);
        let nodes = vec![f.text("a"), span, f.element("br"), f.text("c")];
        assert_eq!(text_content(&nodes), "abc");
    }
}
