//! Document tree built during block parsing.
//!
//! Nodes live in an arena owned by [`Document`] and refer to each other by
//! [`NodeId`]. Block parsers receive `&mut Document` and never hold nodes
//! beyond the call.

use std::fmt::Write;

use xi_rope::Rope;

use super::{
    blocks::kinds::FenceKind,
    rope::{Span, slice_to_string, terminator_len},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Attributes of a `$$` math block node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MathBlock {
    /// Always `false` for blocks produced by the block recognizer.
    pub is_inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Paragraph,
    MathBlock(MathBlock),
    FencedCode { kind: FenceKind },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::MathBlock(_) => "MathBlock",
            NodeKind::FencedCode { .. } => "FencedCode",
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    lines: Vec<Span>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                lines: vec![],
                parent: None,
                children: vec![],
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Creates a detached node.
    pub fn create(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            lines: vec![],
            parent: None,
            children: vec![],
        });
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Inserts `new` directly after `existing` in `existing`'s parent.
    ///
    /// Returns `false` and leaves the tree unchanged when `existing` is
    /// detached.
    pub fn insert_after(&mut self, existing: NodeId, new: NodeId) -> bool {
        let Some(parent) = self.nodes[existing.0].parent else {
            return false;
        };
        self.detach(new);
        let siblings = &mut self.nodes[parent.0].children;
        let at = siblings
            .iter()
            .position(|&c| c == existing)
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(at, new);
        self.nodes[new.0].parent = Some(parent);
        true
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let i = siblings.iter().position(|&c| c == id)?;
        siblings.get(i + 1).copied()
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn lines(&self, id: NodeId) -> &[Span] {
        &self.nodes[id.0].lines
    }

    pub fn lines_mut(&mut self, id: NodeId) -> &mut Vec<Span> {
        &mut self.nodes[id.0].lines
    }

    /// Every node in depth-first document order, root first.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = vec![];
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// Captured text of a node: its line spans concatenated, with the final
    /// line terminator dropped.
    pub fn text(&self, id: NodeId, rope: &Rope) -> String {
        let mut s = String::new();
        for sp in self.lines(id) {
            s.push_str(&slice_to_string(rope, *sp));
        }
        let t = terminator_len(&s);
        s.truncate(s.len() - t);
        s
    }

    /// Indented one-node-per-line dump of the tree.
    pub fn outline(&self, rope: &Rope) -> String {
        let mut out = String::new();
        self.write_outline(&mut out, rope, self.root(), 0);
        out
    }

    fn write_outline(&self, out: &mut String, rope: &Rope, id: NodeId, depth: usize) {
        let kind = self.kind(id);
        let _ = write!(out, "{:indent$}{}", "", kind.name(), indent = depth * 2);
        match kind {
            NodeKind::Document => {}
            NodeKind::FencedCode { kind } => {
                let _ = write!(out, "({kind:?}) {:?}", self.text(id, rope));
            }
            _ => {
                let _ = write!(out, " {:?}", self.text(id, rope));
            }
        }
        out.push('\n');
        for &child in self.children(id) {
            self.write_outline(out, rope, child, depth + 1);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
