//! Spec-driven node builder
//!
//! Given a node's declarative properties (input list, output list, widget
//! schema, stored widget values, stored link table), this crate (re)builds
//! the node's live port and widget collections, restoring prior link and
//! value state wherever identities match.
//!
//! Editing a spec destroys and rebuilds every port and widget, so the
//! durable state (`NodeConfigState`) is kept strictly apart from the
//! disposable projection (`LiveNode`). The host graph runtime is reached
//! only through the injected [`HostServices`] trait, which keeps the
//! rebuild logic testable without a live canvas.
//!
//! Every operation here runs synchronously on the host UI's event-dispatch
//! thread; an entered rebuild always runs to completion.

pub mod edit;
pub mod error;
pub mod host;
pub mod live;
pub mod rebuild;

// Re-export key types
pub use edit::{commit_edit, SpecEdit};
pub use error::{EngineError, Result};
pub use host::{EditorHandle, HostServices, LinkEndpoint};
pub use live::{LiveInput, LiveNode, LiveOutput, LiveWidget};
pub use rebuild::{change_widget_value, rebuild, record_connection_change};
