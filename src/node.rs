//! The parsed JSON tree: a tag, a value view, and intrusive child links.
//!
//! Every [`Node`] is allocated in the parse arena and borrows both the arena
//! (for its links) and the input buffer (for its value and key views), so
//! the whole tree is a single lifetime `'a` with no per-node ownership.
//!
//! Links use [`Cell`] so the parser can wire siblings together during its
//! single forward pass; after `parse_any` returns the tree is effectively
//! immutable because nothing else holds the setters.

use std::cell::Cell;
use std::fmt;

use serde::Serialize;

/// The kind of JSON value a [`Node`] represents.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Null = 0,
    False,
    True,
    Number,
    String,
    Object,
    Array,
}

impl NodeType {
    /// Display name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            NodeType::Null => "null",
            NodeType::False => "false",
            NodeType::True => "true",
            NodeType::Number => "number",
            NodeType::String => "string",
            NodeType::Object => "object",
            NodeType::Array => "array",
        }
    }

    /// Whether this kind can carry children.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeType::Object | NodeType::Array)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One vertex of the parsed tree.
///
/// `String` and `Number` nodes hold a zero-copy view into the input buffer;
/// keyword nodes point at the static literal text; containers hold their
/// children through `first_child` / `next_sibling` links in source order.
pub struct Node<'a> {
    ty: NodeType,
    value: &'a [u8],
    /// Key view, non-empty exactly when the parent is an object.
    key: Cell<&'a [u8]>,
    first_child: Cell<Option<&'a Node<'a>>>,
    next_sibling: Cell<Option<&'a Node<'a>>>,
}

impl<'a> Node<'a> {
    pub(crate) fn new(ty: NodeType, value: &'a [u8]) -> Node<'a> {
        Node {
            ty,
            value,
            key: Cell::new(&[]),
            first_child: Cell::new(None),
            next_sibling: Cell::new(None),
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.ty
    }

    /// Raw value bytes: a subrange of the input for strings (escapes
    /// preserved verbatim) and numbers, the literal text for keywords,
    /// empty for containers.
    pub fn value(&self) -> &'a [u8] {
        self.value
    }

    /// The value as UTF-8, if it is valid UTF-8. The parser itself never
    /// validates; this is a consumer convenience.
    pub fn value_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.value).ok()
    }

    /// Object member key (raw bytes); empty when this node is not an
    /// object member.
    pub fn key(&self) -> &'a [u8] {
        self.key.get()
    }

    /// The key as UTF-8, if it is valid UTF-8.
    pub fn key_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.key.get()).ok()
    }

    pub fn first_child(&self) -> Option<&'a Node<'a>> {
        self.first_child.get()
    }

    pub fn next_sibling(&self) -> Option<&'a Node<'a>> {
        self.next_sibling.get()
    }

    /// Iterates this node's children in source order.
    pub fn children(&self) -> Children<'a> {
        Children {
            next: self.first_child.get(),
        }
    }

    pub(crate) fn set_key(&self, key: &'a [u8]) {
        self.key.set(key);
    }

    pub(crate) fn set_first_child(&self, child: &'a Node<'a>) {
        self.first_child.set(Some(child));
    }

    pub(crate) fn set_next_sibling(&self, sibling: &'a Node<'a>) {
        self.next_sibling.set(Some(sibling));
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Node");
        s.field("type", &self.ty);
        if !self.key.get().is_empty() {
            s.field("key", &String::from_utf8_lossy(self.key.get()));
        }
        if !self.value.is_empty() {
            s.field("value", &String::from_utf8_lossy(self.value));
        }
        if self.ty.is_container() {
            s.field("children", &self.children().count());
        }
        s.finish()
    }
}

/// Iterator over a node's children, following `next_sibling` links.
#[derive(Clone)]
pub struct Children<'a> {
    next: Option<&'a Node<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node<'a>;

    fn next(&mut self) -> Option<&'a Node<'a>> {
        let node = self.next?;
        self.next = node.next_sibling.get();
        Some(node)
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod node_tests;
