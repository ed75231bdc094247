//! Syntax tree node for Diesel
//!
//! The parser builds every declaration, statement and expression out of one
//! uniform node type: a label naming what the node is, an optional literal
//! payload, and the children it owns. Children are moved into their parent,
//! so a node has at most one parent and a tree can never contain a cycle.

use serde::Serialize;

use crate::frontend::token::Token;

/// A labeled n-ary tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    label: String,
    value: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a childless node
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Wrap a token: the lexeme becomes the value
    pub fn leaf(label: impl Into<String>, token: &Token<'_>) -> Self {
        Self::new(label, token.lexeme)
    }

    /// Attach `child` as the last child, taking ownership of it
    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// Builder form of [`add_child`](Self::add_child)
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.add_child(child);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Children in insertion order
    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    /// Depth-first pre-order walk yielding `(depth, node)`; the root has depth 0
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![(0, self)] }
    }
}

/// Iterator returned by [`TreeNode::walk`]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a TreeNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        // reversed so the first child is visited first
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

impl std::fmt::Display for TreeNode {
    /// Indented outline, one node per line
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (depth, node) in self.walk() {
            write!(f, "{:indent$}{}", "", node.label, indent = depth * 2)?;
            if !node.value.is_empty() {
                write!(f, " {:?}", node.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
