//! Tela - The live output tree surface for Pentimento.
//!
//! A *tela* is the canvas an artist actually paints on. This crate defines the
//! canvas of the rendering engine: the [`TreeSink`] contract through which the
//! core mutates a live output tree, and [`MemoryTree`], an in-memory reference
//! host for embedders, tests, and benchmarks that have no real display tree.
//!
//! The core never touches the live tree except through [`TreeSink`]:
//! create a node, set an attribute or handler on it, and splice a span of
//! children. Everything else (replace, append, clear) is expressed in terms of
//! those primitives.

mod memory;
mod sink;

pub use memory::{MemoryKind, MemoryNode, MemoryTree};
pub use sink::{EventHandler, NodeId, TreeSink};

/// Tela version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
