use crate::syntax::{Selector, Stylesheet, parse_declarations};
use html::Node;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
struct Specificity(u16, u16, u16); // (id, class, type)

struct Candidate {
    property: String,
    value: String,
    specificity: Specificity,
    order: u32,
}

fn specificity_of(selector: &Selector) -> Specificity {
    match selector {
        Selector::Universal => Specificity(0, 0, 0),
        Selector::Type(_) => Specificity(0, 0, 1),
        Selector::Class(_) => Specificity(0, 1, 0),
        Selector::Id(_) => Specificity(1, 0, 0),
        Selector::Compound { tag, classes } => Specificity(
            0,
            u16::try_from(classes.len()).unwrap_or(u16::MAX),
            u16::from(tag.is_some()),
        ),
    }
}

// Check if an element matches a selector
fn matches_selector(node: &Node, selector: &Selector) -> bool {
    let Some(name) = node.name() else {
        return false;
    };
    match selector {
        Selector::Universal => true,
        Selector::Type(t) => name.eq_ignore_ascii_case(t),
        Selector::Id(want) => node.attr("id") == Some(want.as_str()),
        Selector::Class(want) => node.has_class(want),
        Selector::Compound { tag, classes } => {
            tag.as_ref().is_none_or(|t| name.eq_ignore_ascii_case(t))
                && classes.iter().all(|c| node.has_class(c))
        }
    }
}

// If the element has an inline style attribute, return its value
pub fn get_inline_style(node: &Node) -> Option<&str> {
    node.attr("style")
}

// Walk the tree, and for each element, resolve the stylesheet and inline
// declarations into `Node::Element::style`.
pub fn attach_styles(dom: &mut Node, sheet: &Stylesheet) {
    let mut candidates: Vec<Candidate> = Vec::new();

    if let Some(inline) = get_inline_style(dom) {
        // Inline declarations beat every selector and come last in order.
        candidates.extend(parse_declarations(inline).into_iter().map(|d| Candidate {
            property: d.name,
            value: d.value,
            specificity: Specificity(u16::MAX, 0, 0),
            order: u32::MAX,
        }));
    }

    for (order, rule) in sheet.rules.iter().enumerate() {
        let order = u32::try_from(order).unwrap_or(u32::MAX - 1);
        let specificity = rule
            .selectors
            .iter()
            .filter(|s| matches_selector(dom, s))
            .map(specificity_of)
            .max();
        if let Some(specificity) = specificity {
            candidates.extend(rule.declarations.iter().map(|d| Candidate {
                property: d.name.clone(),
                value: d.value.clone(),
                specificity,
                order,
            }));
        }
    }

    // Lowest precedence first; a later winner overwrites in place.
    candidates.sort_by_key(|c| (c.specificity, c.order));

    match dom {
        Node::Element {
            style, children, ..
        } => {
            style.clear();
            for c in candidates {
                match style.iter_mut().find(|(k, _)| *k == c.property) {
                    Some(slot) => slot.1 = c.value,
                    None => style.push((c.property, c.value)),
                }
            }
            for child in children {
                attach_styles(child, sheet);
            }
        }
        Node::Text { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_stylesheet;
    use html::NodeFactory;

    #[test]
    fn inline_beats_class_beats_type() {
        let sheet = parse_stylesheet("span { color: red; padding: 1px } .m { color: blue }");
        let mut f = NodeFactory::new();
        let mut span = f.element_with_class("span", "m");
        span.set_attr("style", "padding: 0");
        attach_styles(&mut span, &sheet);
        assert_eq!(span.style_value("color"), Some("blue"));
        assert_eq!(span.style_value("padding"), Some("0"));
    }

    #[test]
    fn later_rule_wins_equal_specificity_and_children_are_styled() {
        let sheet = parse_stylesheet(".a { display: block } .b { display: inline-block }");
        let mut f = NodeFactory::new();
        let mut outer = f.element("pre");
        let inner = f.element_with_class("span", "a b");
        outer.children_mut().expect("element").push(inner);
        attach_styles(&mut outer, &sheet);
        assert_eq!(outer.children()[0].style_value("display"), Some("inline-block"));
        assert_eq!(outer.style_value("display"), None);
    }

    #[test]
    fn compound_selector_needs_tag_and_all_classes() {
        let sheet = parse_stylesheet("pre.x.y { color: red }");
        let mut f = NodeFactory::new();
        let mut hit = f.element_with_class("pre", "x y");
        let mut miss = f.element_with_class("div", "x y");
        attach_styles(&mut hit, &sheet);
        attach_styles(&mut miss, &sheet);
        assert_eq!(hit.style_value("color"), Some("red"));
        assert_eq!(miss.style_value("color"), None);
    }
}
