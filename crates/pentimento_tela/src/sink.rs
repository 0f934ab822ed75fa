//! The host output-tree contract.

use std::fmt;
use std::rc::Rc;

/// Unique identifier for live tree nodes.
pub type NodeId = u64;

/// An event callback installed on a live node.
///
/// Handlers are opaque to the tree: the host decides when to invoke them.
/// Equality is pointer identity, so two separately constructed closures never
/// compare equal even if they do the same thing.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn()>);

impl EventHandler {
    /// Wrap a closure as an event handler.
    pub fn new(handler: impl Fn() + 'static) -> Self {
        Self(Rc::new(handler))
    }

    /// Invoke the handler.
    pub fn call(&self) {
        (self.0)();
    }

    /// Whether two handlers wrap the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.0))
    }
}

/// A live output tree the rendering core can write into.
///
/// Implementations own the node storage; the core only ever holds [`NodeId`]
/// handles. All structural mutation goes through [`splice`](TreeSink::splice),
/// which keeps ordering guarantees in one place.
pub trait TreeSink {
    /// Create a detached element node with the given tag.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Create a detached text node with the given content.
    fn create_text(&mut self, content: &str) -> NodeId;

    /// Set an attribute on a node.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Install an event handler on a node.
    fn set_handler(&mut self, node: NodeId, name: &str, handler: EventHandler);

    /// Remove `children[start..end]` of `parent`, releasing the removed
    /// subtrees, and insert `replacement` at `start`.
    fn splice(&mut self, parent: NodeId, start: usize, end: usize, replacement: &[NodeId]);

    /// Number of children currently attached to `parent`.
    fn child_count(&self, parent: NodeId) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn handler_call() {
        let hits = Rc::new(Cell::new(0u32));
        let h = {
            let hits = hits.clone();
            EventHandler::new(move || hits.set(hits.get() + 1))
        };
        h.call();
        h.call();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn handler_identity() {
        let a = EventHandler::new(|| {});
        let b = EventHandler::new(|| {});
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }
}
