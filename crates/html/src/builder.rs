use crate::types::{Id, Node, NodeId};

/// Hands out node ids for a tree that is rebuilt from scratch.
///
/// Ids start at 1; `Id(0)` is reserved for "unassigned".
#[derive(Clone, Debug)]
pub struct NodeFactory {
    next: NodeId,
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeFactory {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Continue numbering after `last` (e.g. after a root allocated elsewhere).
    pub fn after(last: Id) -> Self {
        Self {
            next: last.0.wrapping_add(1).max(1),
        }
    }

    pub fn fresh_id(&mut self) -> Id {
        let id = Id(self.next);
        self.next = self.next.wrapping_add(1).max(1);
        id
    }

    pub fn element(&mut self, name: &str) -> Node {
        Node::Element {
            id: self.fresh_id(),
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element with a `class` attribute.
    pub fn element_with_class(&mut self, name: &str, class: &str) -> Node {
        let mut node = self.element(name);
        node.set_attr("class", class);
        node
    }

    pub fn text(&mut self, text: impl Into<String>) -> Node {
        Node::Text {
            id: self.fresh_id(),
            text: text.into(),
        }
    }
}
