//! arbor-core
//!
//! Core pieces of the arbor scripting host: the resource data model, the
//! process-wide resource registry, per-environment capability sets, and the
//! bounds-checked cursor over guest-shared memory.
//!
//! Everything here is owned by a single logical thread. There are no locks
//! and no global state; the host crate threads an explicit context through
//! every operation.

pub mod capability;
pub mod cursor;
pub mod error;
pub mod registry;
pub mod resource;
pub mod types;

pub use capability::{check_access, check_access_mut, CapabilitySet};
pub use cursor::MemCursor;
pub use error::{AccessError, HostError};
pub use registry::ResourceRegistry;
pub use resource::Resource;
pub use types::{ResourceId, ResourceKind, NIL_RESOURCE_ID};
