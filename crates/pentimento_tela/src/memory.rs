//! In-memory reference host.

use std::fmt::Write as _;

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::sink::{EventHandler, NodeId, TreeSink};

/// Node payload variants in the memory host.
#[derive(Debug, Clone)]
pub enum MemoryKind {
    /// Element with a tag name
    Element { tag: CompactString },
    /// Text content
    Text { content: CompactString },
}

/// A node stored in the memory host.
#[derive(Debug)]
pub struct MemoryNode {
    /// Node payload
    pub kind: MemoryKind,
    /// Attributes in set order, unique names
    pub attributes: Vec<(CompactString, CompactString)>,
    /// Installed event handlers, unique names
    pub handlers: Vec<(CompactString, EventHandler)>,
    /// Child node IDs
    pub children: SmallVec<[NodeId; 4]>,
}

impl MemoryNode {
    fn element(tag: &str) -> Self {
        Self {
            kind: MemoryKind::Element { tag: tag.into() },
            attributes: Vec::new(),
            handlers: Vec::new(),
            children: SmallVec::new(),
        }
    }

    fn text(content: &str) -> Self {
        Self {
            kind: MemoryKind::Text {
                content: content.into(),
            },
            attributes: Vec::new(),
            handlers: Vec::new(),
            children: SmallVec::new(),
        }
    }
}

/// An in-memory live tree.
///
/// Nodes live in an arena keyed by [`NodeId`]; detached nodes stay in the
/// arena until a `splice` removes them from an attached parent, at which point
/// the whole removed subtree is released. A counter tracks every mutating
/// call so tests can assert that a pass touched nothing.
pub struct MemoryTree {
    nodes: FxHashMap<NodeId, MemoryNode>,
    next_id: NodeId,
    mutations: u64,
}

impl MemoryTree {
    /// Create an empty memory tree.
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
            next_id: 0,
            mutations: 0,
        }
    }

    fn alloc(&mut self, node: MemoryNode) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(&id)
    }

    /// Whether a node is still alive in the arena.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Tag of an element node.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.kind {
            MemoryKind::Element { tag } => Some(tag.as_str()),
            MemoryKind::Text { .. } => None,
        }
    }

    /// Content of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.kind {
            MemoryKind::Text { content } => Some(content.as_str()),
            MemoryKind::Element { .. } => None,
        }
    }

    /// Look up an attribute value.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child IDs of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Number of nodes alive in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of mutating sink calls so far.
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Invoke the handler registered for `event` on `node`.
    ///
    /// Returns whether a handler was found.
    pub fn dispatch(&self, node: NodeId, event: &str) -> bool {
        let Some(handler) = self
            .get(node)
            .and_then(|n| n.handlers.iter().find(|(name, _)| name == event))
            .map(|(_, h)| h.clone())
        else {
            return false;
        };
        handler.call();
        true
    }

    /// Release a subtree from the arena.
    fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children.iter().copied());
            }
        }
    }

    /// Serialize a subtree to an HTML-like string, for snapshot assertions.
    pub fn to_string_tree(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            let _ = write!(out, "<!missing {id}>");
            return;
        };
        match &node.kind {
            MemoryKind::Text { content } => out.push_str(content),
            MemoryKind::Element { tag } => {
                let _ = write!(out, "<{tag}");
                for (name, value) in &node.attributes {
                    let _ = write!(out, " {name}=\"{value}\"");
                }
                for (name, _) in &node.handlers {
                    let _ = write!(out, " @{name}");
                }
                out.push('>');
                for &child in &node.children {
                    self.write_node(child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSink for MemoryTree {
    fn create_element(&mut self, tag: &str) -> NodeId {
        self.mutations += 1;
        self.alloc(MemoryNode::element(tag))
    }

    fn create_text(&mut self, content: &str) -> NodeId {
        self.mutations += 1;
        self.alloc(MemoryNode::text(content))
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.mutations += 1;
        if let Some(node) = self.nodes.get_mut(&node) {
            if let Some(slot) = node.attributes.iter_mut().find(|(n, _)| n == name) {
                slot.1 = value.into();
            } else {
                node.attributes.push((name.into(), value.into()));
            }
        }
    }

    fn set_handler(&mut self, node: NodeId, name: &str, handler: EventHandler) {
        self.mutations += 1;
        if let Some(node) = self.nodes.get_mut(&node) {
            if let Some(slot) = node.handlers.iter_mut().find(|(n, _)| n == name) {
                slot.1 = handler;
            } else {
                node.handlers.push((name.into(), handler));
            }
        }
    }

    fn splice(&mut self, parent: NodeId, start: usize, end: usize, replacement: &[NodeId]) {
        self.mutations += 1;
        let removed: Vec<NodeId> = match self.nodes.get_mut(&parent) {
            Some(node) => {
                debug_assert!(start <= end && end <= node.children.len());
                node.children
                    .drain(start..end.min(node.children.len()))
                    .collect()
            }
            None => return,
        };
        for id in removed {
            self.release(id);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.insert_from_slice(start, replacement);
        }
    }

    fn child_count(&self, parent: NodeId) -> usize {
        self.children(parent).len()
    }
}
