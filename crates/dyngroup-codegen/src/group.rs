//! The "make group node" action
//!
//! Serializes the selection and hands the text to the host twice: a new
//! placeholder node carries it in its `pycode` property, and the system
//! clipboard gets a copy. Both effects are best-effort; a failed insertion
//! or clipboard write is logged and never propagated, because the generated
//! text itself is still returned to the caller.

use log::{debug, warn};
use uuid::Uuid;

use dyngroup_model::NodeView;

use crate::emit::{serialize, SerializeOptions};
use crate::error::Result;

/// Host-side effects consumed by the group-node action.
pub trait CodegenHost {
    /// Insert a placeholder node whose `pycode` property carries the
    /// generated program. Returns the new node's host id.
    fn insert_code_node(&mut self, title: &str, code: &str) -> Result<u64>;

    /// Write plain text to the system clipboard.
    fn clipboard_write(&mut self, text: &str) -> Result<()>;
}

/// Serialize the selection and materialize it as a new group node.
///
/// The inserted node's declarative properties then flow through the host's
/// node-lifecycle hooks into the node builder, which materializes its ports
/// and widgets. Returns the generated program text.
pub fn make_group_node(
    selection: &[NodeView],
    host: &mut dyn CodegenHost,
    opts: &SerializeOptions,
) -> String {
    let code = serialize(selection, opts);
    let title = format!("group-{}", Uuid::new_v4());

    match host.insert_code_node(&title, &code) {
        Ok(id) => debug!("inserted group node '{title}' as #{id}"),
        Err(err) => warn!("could not insert group node: {err}"),
    }
    if let Err(err) = host.clipboard_write(&code) {
        warn!("{err}");
    }

    code
}
