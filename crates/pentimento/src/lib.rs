//! Pentimento - A minimal declarative-UI reconciliation runtime.
//!
//! A *pentimento* is the trace of an earlier painting showing through the
//! repaint. That is exactly what this engine works with: on every state
//! change it renders a fresh description of the UI, compares it against the
//! trace of the previous one, and repaints only the parts of the live tree
//! that actually changed.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │             user components (render)              │
//! └──────────────────────────────────────────────────┘
//!                         │ h(..)
//!                         ▼
//! ┌──────────────────────────────────────────────────┐
//! │        description tree (Node: builder output)    │
//! └──────────────────────────────────────────────────┘
//!                         │ resolve / materialize
//!                         ▼
//! ┌──────────────────────────────────────────────────┐
//! │     virtual snapshot (VNode, anchored spans)      │
//! └──────────────────────────────────────────────────┘
//!            │ reconcile (old vs. new)
//!            ▼
//! ┌──────────────────────────────────────────────────┐
//! │   live output tree, via TreeSink + Anchor splices │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! The live tree is abstract: anything implementing
//! [`TreeSink`](pentimento_tela::TreeSink) can be painted on.
//! [`MemoryTree`](pentimento_tela::MemoryTree) is the bundled reference host.
//!
//! # Example
//!
//! ```
//! use pentimento::{h, mount, Props};
//! use pentimento_tela::{MemoryTree, TreeSink};
//!
//! let mut tree = MemoryTree::new();
//! let body = tree.create_element("body");
//!
//! let view = h(
//!     "div",
//!     Props::new(),
//!     vec![
//!         "hello".into(),
//!         h("span", Props::new().attr("class", "x"), vec!["world".into()])
//!             .unwrap()
//!             .into(),
//!     ],
//! )
//! .unwrap();
//!
//! mount(&mut tree, &view, body);
//! assert_eq!(
//!     tree.to_string_tree(body),
//!     "<body><div>hello<span class=\"x\">world</span></div></body>"
//! );
//! ```

pub mod error;
pub mod state;
pub mod vdom;

// Re-exports for convenience
pub use error::RenderError;
pub use state::merge;
pub use vdom::{
    h, mount, reconcile, resolve, same_node, text, Anchor, Child, Component, ComponentHandle,
    ComponentRuntime, Kind, Node, PropValue, Props, Scope, VNode,
};

/// Pentimento version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
