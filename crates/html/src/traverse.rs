use crate::{Id, Node};

/// Where to put new siblings relative to an anchor element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

pub fn find_node_by_id(nodes: &[Node], id: Id) -> Option<&Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_node_by_id(node.children(), id) {
            return Some(found);
        }
    }
    None
}

/// First element (depth-first, document order) carrying `class`.
pub fn find_by_class<'a>(nodes: &'a [Node], class: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.has_class(class) {
            return Some(node);
        }
        if let Some(found) = find_by_class(node.children(), class) {
            return Some(found);
        }
    }
    None
}

pub fn count_by_class(nodes: &[Node], class: &str) -> usize {
    nodes
        .iter()
        .map(|n| usize::from(n.has_class(class)) + count_by_class(n.children(), class))
        .sum()
}

/// Insert `new_nodes` as siblings of the first element carrying `class`.
///
/// Returns `false` (and drops `new_nodes`) when no such element exists.
pub fn insert_adjacent(
    nodes: &mut Vec<Node>,
    class: &str,
    placement: Placement,
    new_nodes: Vec<Node>,
) -> bool {
    fn walk(nodes: &mut Vec<Node>, class: &str, placement: Placement, new_nodes: &mut Vec<Node>) -> bool {
        if let Some(idx) = nodes.iter().position(|n| n.has_class(class)) {
            let at = match placement {
                Placement::Before => idx,
                Placement::After => idx + 1,
            };
            nodes.splice(at..at, std::mem::take(new_nodes));
            return true;
        }
        for node in nodes.iter_mut() {
            if let Some(children) = node.children_mut()
                && walk(children, class, placement, new_nodes)
            {
                return true;
            }
        }
        false
    }

    let mut new_nodes = new_nodes;
    let found = walk(nodes, class, placement, &mut new_nodes);
    if !found {
        log::trace!(target: "html.traverse", "insert_adjacent: no element with class {class:?}");
    }
    found
}
