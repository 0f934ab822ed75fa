//! Error types for the rendering core.

use thiserror::Error;

/// Errors surfaced by the rendering core.
///
/// Both variants signal contract violations by the caller; no operation in
/// the core retries or recovers. A failed pass aborts before it starts
/// mutating the live tree.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The tree builder was handed a type that cannot name a node
    #[error("invalid node type: {0:?}")]
    InvalidNodeType(String),

    /// An operation required a live-tree location, but the node was never
    /// attached (e.g. reconciling or updating state before the first mount)
    #[error("node is not attached to the live tree")]
    DetachedNode,
}
