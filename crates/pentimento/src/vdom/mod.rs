//! Virtual nodes and the reconciliation engine.
//!
//! - Node descriptions and materialized snapshots
//! - The `h` tree builder
//! - Component runtime and state updates
//! - Insertion points (anchors)
//! - The diff-and-patch pass

pub mod anchor;
pub mod builder;
pub mod component;
pub mod mount;
pub mod node;
pub mod props;
pub mod reconcile;

pub use anchor::Anchor;
pub use builder::{h, text, Child, Kind};
pub use component::{Component, ComponentHandle, ComponentRuntime, Scope};
pub use mount::mount;
pub use node::{resolve, ElementNode, Node, TextNode, VNode};
pub use props::{PropValue, Props};
pub use reconcile::{reconcile, same_node};
