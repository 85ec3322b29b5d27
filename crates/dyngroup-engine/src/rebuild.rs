//! The rebuild operation and its change-notification companions
//!
//! `rebuild` is the single entry point the host calls whenever a node is
//! created, reconfigured or deserialized. It is idempotent and always fully
//! replaces the node's port and widget collections; durable state
//! (`widgets_values`, `links`, labels) survives because it lives in the
//! config, not in the projection.

use log::{debug, warn};
use serde_json::Value;

use dyngroup_model::{parse_port_spec, parse_widget_spec, LinkId, NodeConfigState};

use crate::host::HostServices;
use crate::live::{LiveInput, LiveNode, LiveOutput, LiveWidget};

/// Rebuild the node's live surface from its configuration.
///
/// Steps: capture restorable state from the old projection, discard it,
/// parse the three spec strings into fresh ports and widgets, restore link
/// associations, persist, redraw. Parse failures degrade to partial
/// collections; they never abort the rebuild.
pub fn rebuild(config: &mut NodeConfigState, node: &mut LiveNode, host: &mut dyn HostServices) {
    // Capture per-index input links for configs that predate the name-keyed
    // link table, then release every editor element the old widgets own.
    let prior_links: Vec<Option<LinkId>> = node.inputs.iter().map(|i| i.link).collect();
    for widget in node.widgets.drain(..) {
        if let Some(handle) = widget.editor {
            debug!("releasing editor for widget '{}'", widget.name);
            host.release_editor(handle);
        }
    }
    let size = node.size;
    node.inputs.clear();
    node.outputs.clear();

    for spec in parse_port_spec(&config.inputs) {
        node.inputs.push(LiveInput {
            label: config.labels.inputs.get(&spec.name).cloned(),
            name: spec.name,
            ty: spec.ty,
            link: None,
            from_widget: false,
        });
    }

    for spec in parse_widget_spec(&config.widgets) {
        let value = config
            .widgets_values
            .get(&spec.name)
            .cloned()
            .unwrap_or_else(|| spec.kind.default_value());

        if config.is_promoted(&spec.name) {
            node.inputs.push(LiveInput {
                label: config.labels.widgets.get(&spec.name).cloned(),
                ty: spec.kind.port_type().to_string(),
                name: spec.name,
                link: None,
                from_widget: true,
            });
            continue;
        }

        let editor = spec
            .kind
            .needs_editor()
            .then(|| host.acquire_editor(&spec.name, value.as_str().unwrap_or("")));
        node.widgets.push(LiveWidget {
            name: spec.name,
            kind: spec.kind,
            value,
            editor,
        });
    }

    for spec in parse_port_spec(&config.outputs) {
        node.outputs.push(LiveOutput {
            label: config.labels.outputs.get(&spec.name).cloned(),
            name: spec.name,
            ty: spec.ty,
        });
    }

    restore_links(config, node, host, &prior_links);

    node.size = size;
    host.persist(config);
    host.request_redraw();
}

/// Re-attach recorded links to the freshly created inputs.
///
/// Matching is by port name, which stays correct when the user reorders
/// spec lines. The per-index capture is used only when the config carries
/// no link table at all (older persisted schema). Link ids the host can no
/// longer resolve are skipped; the link may have been deleted concurrently
/// and that is not an error.
fn restore_links(
    config: &NodeConfigState,
    node: &mut LiveNode,
    host: &dyn HostServices,
    prior_links: &[Option<LinkId>],
) {
    if config.links.is_empty() {
        for (index, link) in prior_links.iter().enumerate() {
            let Some(link) = *link else { continue };
            if host.resolve_link(link).is_none() {
                debug!("dropping vanished link {link} at input {index}");
                continue;
            }
            if let Some(input) = node.inputs.get_mut(index) {
                input.link = Some(link);
            }
        }
        return;
    }

    for (name, link) in &config.links {
        if host.resolve_link(*link).is_none() {
            debug!("link {link} for port '{name}' no longer exists, skipping");
            continue;
        }
        match node.inputs.iter_mut().find(|i| i.name == *name) {
            Some(input) => {
                input.link = Some(*link);
                debug!("restored link {link} to port '{name}'");
            }
            None => warn!("recorded link {link} references missing port '{name}'"),
        }
    }
}

/// Write-back for an interactive widget change.
///
/// Fires on every interactive change, not only on commit. Persists only
/// when the stored value actually changed.
pub fn change_widget_value(
    config: &mut NodeConfigState,
    node: &mut LiveNode,
    host: &mut dyn HostServices,
    name: &str,
    value: Value,
) {
    if !config.record_widget_change(name, value.clone()) {
        return;
    }
    if let Some(widget) = node.widgets.iter_mut().find(|w| w.name == name) {
        widget.value = value;
    }
    debug!("widget updated: {name}");
    host.persist(config);
    host.request_redraw();
}

/// Connection-change notification from the host.
///
/// Updates the durable link table (keyed by port name) and mirrors the
/// change into the live input.
pub fn record_connection_change(
    config: &mut NodeConfigState,
    node: &mut LiveNode,
    host: &mut dyn HostServices,
    port: &str,
    link: LinkId,
    connected: bool,
) {
    config.record_connection(port, link, connected);
    if let Some(input) = node.inputs.iter_mut().find(|i| i.name == port) {
        input.link = if connected { Some(link) } else { None };
    }
    host.persist(config);
}
