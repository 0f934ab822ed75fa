//! Virtual node definitions.
//!
//! Nodes pass through two phases. The *description* phase ([`Node`]) is what
//! the tree builder produces: tags, props, and unresolved children, with no
//! live-tree footprint. The *materialized* phase ([`VNode`]) is the frozen
//! snapshot the reconciler diffs: resolved children (`vchildren`) plus the
//! host node and [`Anchor`] the snapshot occupies. A snapshot's children are
//! resolved exactly once, when the snapshot is created, and never recomputed.

use compact_str::CompactString;
use pentimento_tela::{NodeId, TreeSink};

use super::anchor::Anchor;
use super::component::ComponentHandle;
use super::props::{PropValue, Props};

/// A declarative description of one node, as produced by the tree builder.
#[derive(Debug, Clone)]
pub enum Node {
    /// Primitive element
    Element(ElementNode),
    /// Literal text
    Text(TextNode),
    /// User component instance
    Component(ComponentHandle),
}

impl Node {
    /// The component handle, when this description is a component.
    pub fn as_component(&self) -> Option<&ComponentHandle> {
        match self {
            Node::Component(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Description of a primitive element.
#[derive(Debug, Clone)]
pub struct ElementNode {
    pub(crate) tag: CompactString,
    pub(crate) props: Props,
    pub(crate) children: Vec<Node>,
}

impl ElementNode {
    pub(crate) fn new(tag: CompactString) -> Self {
        Self {
            tag,
            props: Props::new(),
            children: Vec::new(),
        }
    }

    /// Store a property.
    pub fn set_attribute(&mut self, name: &str, value: PropValue) {
        self.props.set(name, value);
    }

    /// Append a child description.
    pub fn append_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Element tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Description of a text node.
#[derive(Debug, Clone)]
pub struct TextNode {
    pub(crate) content: CompactString,
}

impl TextNode {
    /// Text content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A materialized virtual node: the unit of comparison during reconciliation.
///
/// Component boundaries stay visible in the snapshot tree; the runtime behind
/// the handle owns its own rendered snapshot, which the reconciler flattens
/// through on demand.
#[derive(Debug)]
pub enum VNode {
    /// Element snapshot
    Element(VElement),
    /// Text snapshot
    Text(VText),
    /// Component boundary
    Component(ComponentHandle),
}

/// Element snapshot.
#[derive(Debug)]
pub struct VElement {
    pub(crate) tag: CompactString,
    pub(crate) props: Props,
    pub(crate) vchildren: Vec<VNode>,
    pub(crate) host: Option<NodeId>,
    pub(crate) anchor: Option<Anchor>,
}

/// Text snapshot.
#[derive(Debug)]
pub struct VText {
    pub(crate) content: CompactString,
    pub(crate) host: Option<NodeId>,
    pub(crate) anchor: Option<Anchor>,
}

impl VNode {
    /// The anchor this snapshot currently occupies, if attached.
    pub fn anchor(&self) -> Option<Anchor> {
        match self {
            VNode::Element(el) => el.anchor,
            VNode::Text(text) => text.anchor,
            VNode::Component(handle) => handle.anchor(),
        }
    }

    /// The live root node of this snapshot, if attached.
    pub fn host(&self) -> Option<NodeId> {
        match self {
            VNode::Element(el) => el.host,
            VNode::Text(text) => text.host,
            VNode::Component(handle) => handle.host(),
        }
    }

    /// Resolved children of an element snapshot.
    pub fn vchildren(&self) -> &[VNode] {
        match self {
            VNode::Element(el) => &el.vchildren,
            _ => &[],
        }
    }

    /// Attach this snapshot to the live tree at `anchor`.
    ///
    /// An element builds its entire subtree detached, then swaps it into the
    /// anchor in one splice, so observers never see a half-built state. Must
    /// not be called on an already-attached snapshot.
    pub fn materialize(&mut self, tree: &mut impl TreeSink, anchor: Anchor) {
        match self {
            VNode::Text(text) => {
                debug_assert!(text.anchor.is_none(), "text snapshot already attached");
                let host = tree.create_text(&text.content);
                let mut anchor = anchor;
                anchor.replace_with(tree, host);
                text.host = Some(host);
                text.anchor = Some(anchor);
            }
            VNode::Element(el) => {
                debug_assert!(el.anchor.is_none(), "element snapshot already attached");
                let host = tree.create_element(&el.tag);
                for (name, value) in el.props.iter() {
                    match value {
                        PropValue::Text(value) => tree.set_attribute(host, name, value),
                        PropValue::Handler(handler) => {
                            tree.set_handler(host, name, handler.clone());
                        }
                    }
                }
                for (index, child) in el.vchildren.iter_mut().enumerate() {
                    child.materialize(tree, Anchor::collapsed(host, index));
                }
                let mut anchor = anchor;
                anchor.replace_with(tree, host);
                el.host = Some(host);
                el.anchor = Some(anchor);
            }
            VNode::Component(handle) => handle.materialize(tree, anchor),
        }
    }
}

/// Resolve a description into an unattached snapshot.
///
/// Element children are resolved depth-first; component boundaries are kept
/// as handles and render lazily at materialization.
pub fn resolve(node: &Node) -> VNode {
    match node {
        Node::Element(el) => VNode::Element(VElement {
            tag: el.tag.clone(),
            props: el.props.clone(),
            vchildren: el.children.iter().map(resolve).collect(),
            host: None,
            anchor: None,
        }),
        Node::Text(text) => VNode::Text(VText {
            content: text.content.clone(),
            host: None,
            anchor: None,
        }),
        Node::Component(handle) => VNode::Component(handle.clone()),
    }
}
