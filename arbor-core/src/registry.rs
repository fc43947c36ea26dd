//! Process-wide mapping from resource ids to live resources.
//!
//! Ids come from a monotonically increasing counter and are never handed out
//! twice, so a disposed id stays dead forever: a later allocation can never
//! revive a handle a script squirreled away.

use std::collections::HashMap;

use crate::resource::Resource;
use crate::types::{ResourceId, ResourceKind, NIL_RESOURCE_ID};

#[derive(Default)]
pub struct ResourceRegistry {
    next_id: ResourceId,
    entries: HashMap<ResourceId, Resource>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, resource: Resource) -> ResourceId {
        self.next_id += 1;
        debug_assert_ne!(self.next_id, NIL_RESOURCE_ID);
        self.entries.insert(self.next_id, resource);
        self.next_id
    }

    pub fn lookup(&self, id: ResourceId) -> Option<&Resource> {
        self.entries.get(&id)
    }

    pub fn lookup_mut(&mut self, id: ResourceId) -> Option<&mut Resource> {
        self.entries.get_mut(&id)
    }

    pub fn unregister(&mut self, id: ResourceId) -> Option<Resource> {
        self.entries.remove(&id)
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn kind_of(&self, id: ResourceId) -> Option<ResourceKind> {
        self.entries.get(&id).map(Resource::kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &Resource)> {
        self.entries.iter().map(|(id, r)| (*id, r))
    }
}
