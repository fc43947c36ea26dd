//! A loaded script environment: its shared memory, its capability set, and
//! the subset of capabilities it actually owns.

use arbor_core::capability::CapabilitySet;
use arbor_core::types::{ResourceId, NIL_RESOURCE_ID};

/// Identifies one loaded environment for the lifetime of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvId(pub u32);

impl std::fmt::Display for EnvId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "env#{}", self.0)
    }
}

pub struct ScriptEnvironment {
    pub id: EnvId,
    /// Raw memory shared with the guest. Parameter blocks, strings, and data
    /// payloads all live here; offsets into it are untrusted.
    pub memory: Vec<u8>,
    /// Every id this environment may reference.
    pub caps: CapabilitySet,
    /// The ids this environment created (and must release at unload).
    /// Always a subset of `caps`.
    pub owned: CapabilitySet,
    /// Root scene handed to the environment at load time.
    pub scene: ResourceId,
}

impl ScriptEnvironment {
    pub fn new(id: EnvId, memory_len: usize) -> Self {
        Self {
            id,
            memory: vec![0; memory_len],
            caps: CapabilitySet::new(),
            owned: CapabilitySet::new(),
            scene: NIL_RESOURCE_ID,
        }
    }
}
