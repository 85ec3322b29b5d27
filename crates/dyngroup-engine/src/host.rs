//! Narrow interface onto the host graph runtime
//!
//! The engine never touches host globals directly. Production adapters bind
//! these methods to the live runtime; tests use an in-memory mock.

use dyngroup_model::LinkId;

/// Where a link originates: the producing node and its output slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkEndpoint {
    /// Host id of the producing node
    pub origin_node: u64,
    /// Output slot index on the producing node
    pub origin_slot: usize,
}

/// Opaque handle to a host-owned editor element backing a multi-line
/// text widget.
///
/// The element outlives the widget object unless released explicitly, so a
/// rebuild must hand every captured handle back through
/// [`HostServices::release_editor`] before discarding the old widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorHandle(pub u64);

/// Services the node builder consumes from the host.
pub trait HostServices {
    /// Look up a link by id. `None` means the link no longer exists in the
    /// host graph (it may have been deleted concurrently).
    fn resolve_link(&self, link: LinkId) -> Option<LinkEndpoint>;

    /// Acquire a backing editor element for a multi-line text widget.
    fn acquire_editor(&mut self, widget_name: &str, initial: &str) -> EditorHandle;

    /// Release a backing editor captured during a previous build.
    fn release_editor(&mut self, handle: EditorHandle);

    /// Persist the node's state through the host save/serialize path.
    fn persist(&mut self, config: &dyngroup_model::NodeConfigState);

    /// Ask the canvas to redraw.
    fn request_redraw(&mut self);
}
