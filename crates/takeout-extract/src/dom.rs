//! Tree walks over a parsed `scraper` document.

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{Html, Node};
use std::ops::Deref;

/// Depth-first, document-order walk over every element of a document.
///
/// Uses an explicit stack so nesting depth is bounded by heap, not by the
/// call stack.
pub struct Elements<'a> {
    stack: Vec<NodeRef<'a, Node>>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = (NodeRef<'a, Node>, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let Node::Element(elem) = node.value() {
                // Reversed so the leftmost child is popped first
                self.stack.extend(node.children().rev());
                return Some((node, elem));
            }
        }
        None
    }
}

pub fn elements(document: &Html) -> Elements<'_> {
    Elements {
        stack: document.tree.root().children().rev().collect(),
    }
}

/// Text of the node's last direct text child. Earlier text children are
/// ignored, not concatenated.
pub fn last_text_child<'a>(node: NodeRef<'a, Node>) -> Option<&'a str> {
    node.children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(text.deref()),
            _ => None,
        })
        .last()
}
