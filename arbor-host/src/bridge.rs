//! Intrusive-hierarchy mutations and capability-filtered traversal.
//!
//! Nodes hang off a parent (a node or a scene) through `first_child` /
//! `first_node` heads and `next_sibling` links; UI elements form the same
//! shape inside a canvas. Traversal on behalf of a script only reports ids in
//! that script's capability set: a foreign child is skipped outright, and the
//! filtered index is recomputed on every call rather than persisted.

use arbor_core::capability::CapabilitySet;
use arbor_core::error::HostError;
use arbor_core::registry::ResourceRegistry;
use arbor_core::resource::Resource;
use arbor_core::types::{ResourceId, NIL_RESOURCE_ID};

fn node_ref(registry: &ResourceRegistry, id: ResourceId) -> Option<&arbor_core::resource::Node> {
    match registry.lookup(id) {
        Some(Resource::Node(n)) => Some(n),
        _ => None,
    }
}

fn node_mut(
    registry: &mut ResourceRegistry,
    id: ResourceId,
) -> Option<&mut arbor_core::resource::Node> {
    match registry.lookup_mut(id) {
        Some(Resource::Node(n)) => Some(n),
        _ => None,
    }
}

/// Head of the child chain under `container` (a node or a scene).
fn chain_head(registry: &ResourceRegistry, container: ResourceId) -> ResourceId {
    match registry.lookup(container) {
        Some(Resource::Node(n)) => n.first_child,
        Some(Resource::Scene(s)) => s.first_node,
        _ => NIL_RESOURCE_ID,
    }
}

fn set_chain_head(registry: &mut ResourceRegistry, container: ResourceId, head: ResourceId) {
    match registry.lookup_mut(container) {
        Some(Resource::Node(n)) => n.first_child = head,
        Some(Resource::Scene(s)) => s.first_node = head,
        _ => {}
    }
}

/// Ids in raw chain order under `container`.
pub fn children(registry: &ResourceRegistry, container: ResourceId) -> Vec<ResourceId> {
    let mut out = Vec::new();
    let mut cur = chain_head(registry, container);
    while cur != NIL_RESOURCE_ID {
        out.push(cur);
        cur = node_ref(registry, cur).map_or(NIL_RESOURCE_ID, |n| n.next_sibling);
    }
    out
}

/// Chain order with everything outside `caps` omitted.
pub fn filtered_children(
    registry: &ResourceRegistry,
    caps: &CapabilitySet,
    container: ResourceId,
) -> Vec<ResourceId> {
    children(registry, container)
        .into_iter()
        .filter(|id| caps.contains(*id))
        .collect()
}

/// Attach `child` at the tail of `container`'s chain. Re-attaching a node
/// that already has a parent moves it; attaching a node to itself or to its
/// own descendant is refused.
pub fn attach(
    registry: &mut ResourceRegistry,
    container: ResourceId,
    child: ResourceId,
) -> Result<(), HostError> {
    if container == child {
        return Err(HostError::decode("cannot attach a node to itself"));
    }
    // ancestor walk from the container; hitting `child` means a cycle
    let mut cur = container;
    while cur != NIL_RESOURCE_ID {
        if cur == child {
            return Err(HostError::decode("cannot attach a node to its descendant"));
        }
        cur = node_ref(registry, cur).map_or(NIL_RESOURCE_ID, |n| n.parent);
    }

    detach_from_parent(registry, child)?;

    let chain = children(registry, container);
    match chain.last() {
        None => set_chain_head(registry, container, child),
        Some(&tail) => {
            if let Some(n) = node_mut(registry, tail) {
                n.next_sibling = child;
            }
        }
    }
    if let Some(n) = node_mut(registry, child) {
        n.parent = container;
        n.next_sibling = NIL_RESOURCE_ID;
    }
    Ok(())
}

/// Unlink `child` from `container`; fails if it is not currently a child.
pub fn detach(
    registry: &mut ResourceRegistry,
    container: ResourceId,
    child: ResourceId,
) -> Result<(), HostError> {
    let parent = node_ref(registry, child).map_or(NIL_RESOURCE_ID, |n| n.parent);
    if parent != container {
        return Err(HostError::decode(format!(
            "{child} is not a child of {container}"
        )));
    }
    detach_from_parent(registry, child)
}

/// Unlink `child` from whatever parent it has; a parentless node is left
/// untouched.
pub fn detach_from_parent(
    registry: &mut ResourceRegistry,
    child: ResourceId,
) -> Result<(), HostError> {
    let (parent, next) = match node_ref(registry, child) {
        Some(n) => (n.parent, n.next_sibling),
        None => return Ok(()),
    };
    if parent == NIL_RESOURCE_ID {
        return Ok(());
    }

    if chain_head(registry, parent) == child {
        set_chain_head(registry, parent, next);
    } else {
        let mut cur = chain_head(registry, parent);
        while cur != NIL_RESOURCE_ID {
            let sibling_next = node_ref(registry, cur).map_or(NIL_RESOURCE_ID, |n| n.next_sibling);
            if sibling_next == child {
                if let Some(n) = node_mut(registry, cur) {
                    n.next_sibling = next;
                }
                break;
            }
            cur = sibling_next;
        }
    }

    if let Some(n) = node_mut(registry, child) {
        n.parent = NIL_RESOURCE_ID;
        n.next_sibling = NIL_RESOURCE_ID;
    }
    Ok(())
}

/// Cut every child loose from a container about to be destroyed.
fn orphan_chain(registry: &mut ResourceRegistry, container: ResourceId) {
    for id in children(registry, container) {
        if let Some(n) = node_mut(registry, id) {
            n.parent = NIL_RESOURCE_ID;
            n.next_sibling = NIL_RESOURCE_ID;
        }
    }
    set_chain_head(registry, container, NIL_RESOURCE_ID);
}

pub fn orphan_node_children(registry: &mut ResourceRegistry, node: ResourceId) {
    orphan_chain(registry, node);
}

pub fn orphan_scene_nodes(registry: &mut ResourceRegistry, scene: ResourceId) {
    orphan_chain(registry, scene);
}

// --- the same shape for UI element trees ---------------------------------

fn ui_links(registry: &ResourceRegistry, id: ResourceId) -> Option<(ResourceId, ResourceId)> {
    registry
        .lookup(id)
        .and_then(Resource::ui_element)
        .map(|e| (e.parent, e.next_sibling))
}

fn ui_first_child(registry: &ResourceRegistry, id: ResourceId) -> ResourceId {
    registry
        .lookup(id)
        .and_then(Resource::ui_element)
        .map_or(NIL_RESOURCE_ID, |e| e.first_child)
}

fn ui_set_first_child(registry: &mut ResourceRegistry, id: ResourceId, head: ResourceId) {
    if let Some(e) = registry.lookup_mut(id).and_then(Resource::ui_element_mut) {
        e.first_child = head;
    }
}

pub fn ui_children(registry: &ResourceRegistry, container: ResourceId) -> Vec<ResourceId> {
    let mut out = Vec::new();
    let mut cur = ui_first_child(registry, container);
    while cur != NIL_RESOURCE_ID {
        out.push(cur);
        cur = ui_links(registry, cur).map_or(NIL_RESOURCE_ID, |(_, next)| next);
    }
    out
}

pub fn ui_attach(
    registry: &mut ResourceRegistry,
    container: ResourceId,
    child: ResourceId,
) -> Result<(), HostError> {
    if container == child {
        return Err(HostError::decode("cannot attach a UI element to itself"));
    }
    let mut cur = container;
    while cur != NIL_RESOURCE_ID {
        if cur == child {
            return Err(HostError::decode(
                "cannot attach a UI element to its descendant",
            ));
        }
        cur = ui_links(registry, cur).map_or(NIL_RESOURCE_ID, |(parent, _)| parent);
    }

    ui_detach_from_parent(registry, child)?;

    let chain = ui_children(registry, container);
    match chain.last() {
        None => ui_set_first_child(registry, container, child),
        Some(&tail) => {
            if let Some(e) = registry.lookup_mut(tail).and_then(Resource::ui_element_mut) {
                e.next_sibling = child;
            }
        }
    }
    if let Some(e) = registry.lookup_mut(child).and_then(Resource::ui_element_mut) {
        e.parent = container;
        e.next_sibling = NIL_RESOURCE_ID;
    }
    Ok(())
}

pub fn ui_detach(
    registry: &mut ResourceRegistry,
    container: ResourceId,
    child: ResourceId,
) -> Result<(), HostError> {
    let parent = ui_links(registry, child).map_or(NIL_RESOURCE_ID, |(parent, _)| parent);
    if parent != container {
        return Err(HostError::decode(format!(
            "{child} is not a child of {container}"
        )));
    }
    ui_detach_from_parent(registry, child)
}

pub fn ui_detach_from_parent(
    registry: &mut ResourceRegistry,
    child: ResourceId,
) -> Result<(), HostError> {
    let Some((parent, next)) = ui_links(registry, child) else {
        return Ok(());
    };
    if parent == NIL_RESOURCE_ID {
        return Ok(());
    }

    if ui_first_child(registry, parent) == child {
        ui_set_first_child(registry, parent, next);
    } else {
        let mut cur = ui_first_child(registry, parent);
        while cur != NIL_RESOURCE_ID {
            let sibling_next = ui_links(registry, cur).map_or(NIL_RESOURCE_ID, |(_, n)| n);
            if sibling_next == child {
                if let Some(e) = registry.lookup_mut(cur).and_then(Resource::ui_element_mut) {
                    e.next_sibling = next;
                }
                break;
            }
            cur = sibling_next;
        }
    }

    if let Some(e) = registry.lookup_mut(child).and_then(Resource::ui_element_mut) {
        e.parent = NIL_RESOURCE_ID;
        e.next_sibling = NIL_RESOURCE_ID;
    }
    Ok(())
}

pub fn orphan_ui_children(registry: &mut ResourceRegistry, container: ResourceId) {
    for id in ui_children(registry, container) {
        if let Some(e) = registry.lookup_mut(id).and_then(Resource::ui_element_mut) {
            e.parent = NIL_RESOURCE_ID;
            e.next_sibling = NIL_RESOURCE_ID;
        }
    }
    ui_set_first_child(registry, container, NIL_RESOURCE_ID);
}
