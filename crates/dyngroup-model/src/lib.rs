//! Data model for the dynamic group node
//!
//! This crate defines the declarative formats a dynamic group node is
//! configured with, plus the persisted state that survives rebuilds:
//!
//! - Port declarations (`name` / `name: TYPE` lines)
//! - Widget declarations (JSON array, with a legacy line format)
//! - The durable per-node configuration (`NodeConfigState`)
//! - Read-only graph snapshots consumed by the serializer (`NodeView`)
//! - Identifier validation for dialog edits
//! - One-time migration of older persisted shapes
//!
//! Parsing is deliberately forgiving: malformed entries are skipped with a
//! diagnostic so that saved workflows containing broken specs still render
//! a node with whatever could be parsed.

pub mod config;
pub mod error;
pub mod migrate;
pub mod ports;
pub mod validation;
pub mod view;
pub mod widgets;

// Re-export key types
pub use config::{NodeConfigState, PortLabels};
pub use error::{Result, SpecError};
pub use ports::{format_port_spec, parse_port_spec, PortSpec, WILDCARD_TYPE};
pub use validation::{Collection, ValidationError};
pub use view::{InputView, LinkId, NodeView, OutputView, WidgetView};
pub use widgets::{format_widget_spec, parse_widget_spec, WidgetKind, WidgetSpec};
