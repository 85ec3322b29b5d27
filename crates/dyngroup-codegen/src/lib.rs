//! Subgraph serializer
//!
//! Turns a set of selected graph nodes into a deterministic, topologically
//! valid textual program representing equivalent computation. Pass-through
//! routing nodes are collapsed away, every intermediate value gets a unique
//! generated name, and each node becomes one call expression followed by
//! per-output accessor bindings.
//!
//! The output is a starting point for manual editing, not a guaranteed
//! correct program, so every failure mode degrades to partial output plus a
//! diagnostic rather than aborting.
//!
//! The `make_group_node` variant additionally hands the generated text to
//! the host: a new placeholder node carries it in its `pycode` property
//! (which the host's node builder then materializes) and the clipboard gets
//! a copy; both effects are best-effort.

pub mod elide;
pub mod emit;
pub mod error;
pub mod group;
pub mod names;
pub mod order;

// Re-export key types
pub use elide::elide_passthroughs;
pub use emit::{serialize, SerializeOptions, CODE_HEADER};
pub use error::{CodegenError, Result};
pub use group::{make_group_node, CodegenHost};
pub use names::NameAllocator;
pub use order::topological_order;
