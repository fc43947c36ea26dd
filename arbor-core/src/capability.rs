//! Per-environment capability sets and the access check every guest-supplied
//! handle must pass.
//!
//! A script may only reference ids in its own set. The check fails closed:
//! whatever the reason (unknown id, foreign id, wrong kind), the caller gets
//! an error and the resource is never touched.

use std::collections::HashSet;

use crate::error::AccessError;
use crate::registry::ResourceRegistry;
use crate::resource::Resource;
use crate::types::{ResourceId, ResourceKind};

#[derive(Debug, Clone, Default)]
pub struct CapabilitySet {
    ids: HashSet<ResourceId>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn authorize(&mut self, id: ResourceId) {
        self.ids.insert(id);
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.ids.contains(&id)
    }

    pub fn revoke(&mut self, id: ResourceId) -> bool {
        self.ids.remove(&id)
    }

    /// Remove every id, returning them lowest-first so teardown order is
    /// deterministic. Calling this on an empty set is a no-op.
    pub fn drain_sorted(&mut self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = self.ids.drain().collect();
        ids.sort_unstable();
        ids
    }

    /// Ids lowest-first, for deterministic filtered searches.
    pub fn ids_sorted(&self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Resolve a guest-supplied handle against the registry, scoped to `caps` and
/// required to carry the `expected` tag.
pub fn check_access<'r>(
    registry: &'r ResourceRegistry,
    caps: &CapabilitySet,
    id: ResourceId,
    expected: ResourceKind,
) -> Result<&'r Resource, AccessError> {
    let resource = registry.lookup(id).ok_or(AccessError::NotFound { id })?;
    if !caps.contains(id) {
        return Err(AccessError::NotAuthorized { id });
    }
    let actual = resource.kind();
    if actual != expected {
        return Err(AccessError::TypeMismatch {
            id,
            expected,
            actual,
        });
    }
    Ok(resource)
}

pub fn check_access_mut<'r>(
    registry: &'r mut ResourceRegistry,
    caps: &CapabilitySet,
    id: ResourceId,
    expected: ResourceKind,
) -> Result<&'r mut Resource, AccessError> {
    // run the read-only check first so the error paths are identical
    check_access(registry, caps, id, expected)?;
    Ok(registry.lookup_mut(id).unwrap())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::resource::{Material, Node};

    fn setup() -> (ResourceRegistry, CapabilitySet, ResourceId) {
        let mut reg = ResourceRegistry::new();
        let id = reg.register(Resource::Node(Node::default()));
        let mut caps = CapabilitySet::new();
        caps.authorize(id);
        (reg, caps, id)
    }

    #[test]
    fn authorized_matching_handle_resolves() {
        let (reg, caps, id) = setup();
        assert!(check_access(&reg, &caps, id, ResourceKind::Node).is_ok());
    }

    #[test]
    fn foreign_handle_is_not_authorized() {
        let (mut reg, caps, _) = setup();
        let foreign = reg.register(Resource::Material(Material::default()));
        assert_eq!(
            check_access(&reg, &caps, foreign, ResourceKind::Material).unwrap_err(),
            AccessError::NotAuthorized { id: foreign }
        );
    }

    #[test]
    fn stale_handle_is_not_found_even_if_still_authorized() {
        let (mut reg, caps, id) = setup();
        reg.unregister(id);
        assert_eq!(
            check_access(&reg, &caps, id, ResourceKind::Node).unwrap_err(),
            AccessError::NotFound { id }
        );
    }

    #[test]
    fn wrong_kind_is_a_type_mismatch() {
        let (reg, caps, id) = setup();
        assert_eq!(
            check_access(&reg, &caps, id, ResourceKind::Material).unwrap_err(),
            AccessError::TypeMismatch {
                id,
                expected: ResourceKind::Material,
                actual: ResourceKind::Node,
            }
        );
    }

    #[test]
    fn nil_handle_is_not_found() {
        let (reg, caps, _) = setup();
        assert_eq!(
            check_access(&reg, &caps, 0, ResourceKind::Node).unwrap_err(),
            AccessError::NotFound { id: 0 }
        );
    }
}
