//! The component runtime.
//!
//! A [`Component`] is the user-supplied render function; a
//! [`ComponentRuntime`] is the stateful wrapper around one instance of it:
//! props and children fixed at construction, optional JSON-like state, and
//! the most recent virtual snapshot together with the anchor it occupies.
//! Runtimes are shared behind [`ComponentHandle`]s so a description tree, its
//! snapshot, and the embedder can all address the same instance.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use pentimento_tela::{NodeId, TreeSink};
use serde_json::Value;

use super::anchor::Anchor;
use super::node::{resolve, Node, VNode};
use super::props::{PropValue, Props};
use super::reconcile::reconcile;
use crate::error::RenderError;
use crate::state::merge;

/// A user-defined component: a pure render function over its scope.
pub trait Component {
    /// Produce the description for the current props, children, and state.
    fn render(&self, scope: &Scope<'_>) -> Node;
}

/// What a component can see while rendering.
pub struct Scope<'a> {
    props: &'a Props,
    children: &'a [Node],
    state: Option<&'a Value>,
}

impl<'a> Scope<'a> {
    /// Props set on the component invocation.
    pub fn props(&self) -> &'a Props {
        self.props
    }

    /// Children passed to the component invocation.
    pub fn children(&self) -> &'a [Node] {
        self.children
    }

    /// Current state, if any has been set.
    pub fn state(&self) -> Option<&'a Value> {
        self.state
    }

    /// Convenience lookup of a top-level state field.
    pub fn state_field(&self, key: &str) -> Option<&'a Value> {
        self.state?.get(key)
    }
}

/// The stateful wrapper around one component instance.
pub struct ComponentRuntime {
    component: Box<dyn Component>,
    props: Props,
    children: Vec<Node>,
    state: Option<Value>,
    last: Option<VNode>,
    anchor: Option<Anchor>,
}

impl ComponentRuntime {
    pub(crate) fn new(component: Box<dyn Component>) -> Self {
        Self {
            component,
            props: Props::new(),
            children: Vec::new(),
            state: None,
            last: None,
            anchor: None,
        }
    }

    /// Store a prop. Valid only before first materialization.
    pub fn set_attribute(&mut self, name: &str, value: PropValue) {
        debug_assert!(self.last.is_none(), "props are fixed after first render");
        self.props.set(name, value);
    }

    /// Append a child. Valid only before first materialization.
    pub fn append_child(&mut self, child: Node) {
        debug_assert!(self.last.is_none(), "children are fixed after first render");
        self.children.push(child);
    }

    /// Current state, if set.
    pub fn state(&self) -> Option<&Value> {
        self.state.as_ref()
    }

    /// Anchor currently occupied by this component's output.
    pub fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    /// Live root node of this component's output.
    pub fn host(&self) -> Option<NodeId> {
        self.last.as_ref().and_then(VNode::host)
    }

    /// The most recent virtual snapshot.
    pub fn snapshot(&self) -> Option<&VNode> {
        self.last.as_ref()
    }

    fn render_scoped(&self) -> Node {
        let scope = Scope {
            props: &self.props,
            children: &self.children,
            state: self.state.as_ref(),
        };
        self.component.render(&scope)
    }

    /// First attachment: render once, resolve, and materialize at `anchor`.
    ///
    /// Must not be called twice on the same instance.
    pub fn materialize(&mut self, tree: &mut impl TreeSink, anchor: Anchor) {
        debug_assert!(self.last.is_none(), "component already materialized");
        let rendered = self.render_scoped();
        let mut snapshot = resolve(&rendered);
        snapshot.materialize(tree, anchor);
        self.anchor = snapshot.anchor();
        self.last = Some(snapshot);
    }

    /// Merge `partial` into the state and run exactly one synchronous
    /// reconcile pass against the previous snapshot.
    ///
    /// When the current state is unset or non-composite, the partial replaces
    /// it verbatim, whatever its shape. Fails with
    /// [`RenderError::DetachedNode`] before first materialization.
    pub fn set_state(
        &mut self,
        tree: &mut impl TreeSink,
        partial: Value,
    ) -> Result<(), RenderError> {
        match &mut self.state {
            Some(current @ (Value::Object(_) | Value::Array(_))) => merge(current, partial),
            slot => *slot = Some(partial),
        }
        self.update(tree)
    }

    /// Re-render and reconcile against the stored previous snapshot.
    pub fn update(&mut self, tree: &mut impl TreeSink) -> Result<(), RenderError> {
        let old = self.last.take().ok_or(RenderError::DetachedNode)?;
        let rendered = self.render_scoped();
        let mut new = resolve(&rendered);
        match reconcile(tree, &old, &mut new) {
            Ok(()) => {
                self.anchor = new.anchor();
                self.last = Some(new);
                Ok(())
            }
            Err(err) => {
                // Abort the pass; keep the previous snapshot authoritative.
                self.last = Some(old);
                Err(err)
            }
        }
    }
}

/// Shared handle to a [`ComponentRuntime`].
#[derive(Clone)]
pub struct ComponentHandle {
    inner: Rc<RefCell<ComponentRuntime>>,
}

impl ComponentHandle {
    pub(crate) fn new(runtime: ComponentRuntime) -> Self {
        Self {
            inner: Rc::new(RefCell::new(runtime)),
        }
    }

    /// Anchor currently occupied by the component's output.
    pub fn anchor(&self) -> Option<Anchor> {
        self.inner.borrow().anchor()
    }

    /// Live root node of the component's output.
    pub fn host(&self) -> Option<NodeId> {
        self.inner.borrow().host()
    }

    /// Clone of the current state, if set.
    pub fn state(&self) -> Option<Value> {
        self.inner.borrow().state().cloned()
    }

    /// See [`ComponentRuntime::materialize`].
    pub fn materialize(&self, tree: &mut impl TreeSink, anchor: Anchor) {
        self.inner.borrow_mut().materialize(tree, anchor);
    }

    /// See [`ComponentRuntime::set_state`].
    pub fn set_state(&self, tree: &mut impl TreeSink, partial: Value) -> Result<(), RenderError> {
        self.inner.borrow_mut().set_state(tree, partial)
    }

    /// See [`ComponentRuntime::update`].
    pub fn update(&self, tree: &mut impl TreeSink) -> Result<(), RenderError> {
        self.inner.borrow_mut().update(tree)
    }

    /// Whether two handles address the same runtime.
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn set_attribute(&self, name: &str, value: PropValue) {
        self.inner.borrow_mut().set_attribute(name, value);
    }

    pub(crate) fn append_child(&self, child: Node) {
        self.inner.borrow_mut().append_child(child);
    }

    /// Detach and return the previous snapshot (old side of a reconcile).
    pub(crate) fn take_last(&self) -> Option<VNode> {
        self.inner.borrow_mut().last.take()
    }

    /// Reconcile this component (new side) against an old snapshot: render,
    /// resolve, reconcile, then adopt the resulting snapshot and anchor.
    pub(crate) fn update_against(
        &self,
        tree: &mut impl TreeSink,
        old: &VNode,
    ) -> Result<(), RenderError> {
        let mut runtime = self.inner.borrow_mut();
        debug_assert!(
            runtime.last.is_none(),
            "fresh component already has a snapshot"
        );
        let rendered = runtime.render_scoped();
        let mut snapshot = resolve(&rendered);
        reconcile(tree, old, &mut snapshot)?;
        runtime.anchor = snapshot.anchor();
        runtime.last = Some(snapshot);
        Ok(())
    }
}

impl fmt::Debug for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentHandle")
            .field("anchor", &self.anchor())
            .finish_non_exhaustive()
    }
}
