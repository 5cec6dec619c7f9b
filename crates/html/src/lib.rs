//! Mirror content tree: nodes, markup serialization and traversal helpers.

mod builder;
mod editable;
mod markup;
mod traverse;
mod types;

pub use crate::builder::NodeFactory;
pub use crate::editable::plain_text_from_html;
pub use crate::markup::{NO_BREAK_SPACE, ZERO_WIDTH_SPACE, inner_markup, outer_markup, text_content};
pub use crate::traverse::{Placement, count_by_class, find_by_class, find_node_by_id, insert_adjacent};
pub use crate::types::Node;

pub(crate) use crate::types::Id;

#[cfg(feature = "internal-api")]
pub mod internal {
    pub use super::types::{Id, NodeId};
}
