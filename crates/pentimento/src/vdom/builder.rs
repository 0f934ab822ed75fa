//! The tree builder.
//!
//! [`h`] expands one tag or component invocation plus a nested child list
//! into a single description node: props are applied through the node's
//! attribute setter in declaration order, nested child lists are flattened in
//! place to unbounded depth, raw strings become text nodes, and skipped
//! (`None`) entries are dropped silently.

use compact_str::CompactString;

use super::component::{Component, ComponentHandle, ComponentRuntime};
use super::node::{ElementNode, Node, TextNode};
use super::props::Props;
use crate::error::RenderError;

/// What a description names: a primitive tag or a component instance.
pub enum Kind {
    /// Primitive element tag
    Tag(CompactString),
    /// User component
    Component(Box<dyn Component>),
}

impl Kind {
    /// Wrap a component instance.
    pub fn component(component: impl Component + 'static) -> Self {
        Kind::Component(Box::new(component))
    }
}

impl From<&str> for Kind {
    fn from(tag: &str) -> Self {
        Kind::Tag(tag.into())
    }
}

impl From<String> for Kind {
    fn from(tag: String) -> Self {
        Kind::Tag(tag.into())
    }
}

/// One child argument to [`h`]: a node, raw text, a nested list, or nothing.
pub enum Child {
    /// An already-built description
    Node(Node),
    /// Raw text, converted to a text node
    Text(CompactString),
    /// Nested list, flattened in place
    List(Vec<Child>),
    /// Skipped entry
    Empty,
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.into())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text.into())
    }
}

impl From<Vec<Child>> for Child {
    fn from(list: Vec<Child>) -> Self {
        Child::List(list)
    }
}

impl From<Option<Child>> for Child {
    fn from(entry: Option<Child>) -> Self {
        entry.unwrap_or(Child::Empty)
    }
}

/// Build a bare text node.
pub fn text(content: &str) -> Node {
    Node::Text(TextNode {
        content: content.into(),
    })
}

/// Build one description node from a tag or component, props, and children.
///
/// Fails with [`RenderError::InvalidNodeType`] when the tag cannot name a
/// node; that is a contract violation, not a recoverable condition.
pub fn h(
    kind: impl Into<Kind>,
    props: Props,
    children: impl IntoIterator<Item = Child>,
) -> Result<Node, RenderError> {
    let mut flattened = Vec::new();
    flatten_into(children, &mut flattened);

    match kind.into() {
        Kind::Tag(tag) => {
            validate_tag(&tag)?;
            let mut element = ElementNode::new(tag);
            for (name, value) in props.iter() {
                element.set_attribute(name, value.clone());
            }
            for child in flattened {
                element.append_child(child);
            }
            Ok(Node::Element(element))
        }
        Kind::Component(component) => {
            let handle = ComponentHandle::new(ComponentRuntime::new(component));
            for (name, value) in props.iter() {
                handle.set_attribute(name, value.clone());
            }
            for child in flattened {
                handle.append_child(child);
            }
            Ok(Node::Component(handle))
        }
    }
}

fn flatten_into(children: impl IntoIterator<Item = Child>, out: &mut Vec<Node>) {
    for child in children {
        match child {
            Child::Empty => {}
            Child::Text(content) => out.push(Node::Text(TextNode { content })),
            Child::Node(node) => out.push(node),
            Child::List(list) => flatten_into(list, out),
        }
    }
}

// `#` prefixes are reserved for synthetic kinds (text), and a tag with
// whitespace or no characters cannot name an element.
fn validate_tag(tag: &str) -> Result<(), RenderError> {
    if tag.is_empty() || tag.starts_with('#') || tag.chars().any(char::is_whitespace) {
        return Err(RenderError::InvalidNodeType(tag.to_owned()));
    }
    Ok(())
}
