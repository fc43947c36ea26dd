//! Decoding of fixed-layout parameter blocks out of guest memory.
//!
//! Block shape, for every resource kind: scalar fields in declared order,
//! then handle fields (u32 ids), then `(ptr, count)` variable-length
//! substructures at a fixed per-item stride, then the extensions block, then
//! a fixed 8-byte extras placeholder that is read past but not parsed.
//!
//! Decoding is all-or-nothing: a bad enum, a failed handle check, or a
//! truncated block aborts the call before any resource is constructed.

pub mod buffer;
pub mod extensions;
pub mod material;
pub mod mesh;
pub mod node;
pub mod physics;
pub mod ui;

use arbor_core::capability::{check_access, CapabilitySet};
use arbor_core::cursor::MemCursor;
use arbor_core::error::HostError;
use arbor_core::registry::ResourceRegistry;
use arbor_core::types::{ResourceId, ResourceKind, NIL_RESOURCE_ID};
use num_traits::FromPrimitive;

/// Read-side view of the caller's world: enough to resolve handles, nothing
/// more.
pub struct Scope<'a> {
    pub registry: &'a ResourceRegistry,
    pub caps: &'a CapabilitySet,
}

impl Scope<'_> {
    /// A handle field where 0 means "absent": skip the lookup entirely,
    /// otherwise it must pass the capability check for `kind`.
    pub fn optional_handle(
        &self,
        id: u32,
        kind: ResourceKind,
    ) -> Result<ResourceId, HostError> {
        if id == NIL_RESOURCE_ID {
            return Ok(NIL_RESOURCE_ID);
        }
        check_access(self.registry, self.caps, id, kind)?;
        Ok(id)
    }

    /// A handle field that must reference a live, authorized resource.
    pub fn required_handle(
        &self,
        id: u32,
        kind: ResourceKind,
    ) -> Result<ResourceId, HostError> {
        if id == NIL_RESOURCE_ID {
            return Err(HostError::decode(format!("required {kind} handle is 0")));
        }
        check_access(self.registry, self.caps, id, kind)?;
        Ok(id)
    }

    /// A handle that may be any of the three UI element kinds.
    pub fn optional_ui_handle(&self, id: u32) -> Result<ResourceId, HostError> {
        if id == NIL_RESOURCE_ID {
            return Ok(NIL_RESOURCE_ID);
        }
        match self.registry.kind_of(id) {
            None => Err(arbor_core::error::AccessError::NotFound { id }.into()),
            Some(_) if !self.caps.contains(id) => {
                Err(arbor_core::error::AccessError::NotAuthorized { id }.into())
            }
            Some(
                ResourceKind::UiElement | ResourceKind::UiButton | ResourceKind::UiText,
            ) => Ok(id),
            Some(actual) => Err(arbor_core::error::AccessError::TypeMismatch {
                id,
                expected: ResourceKind::UiElement,
                actual,
            }
            .into()),
        }
    }
}

/// Validate an enumerated field. Unknown discriminants are an error, never a
/// default.
pub fn enum_u32<T: FromPrimitive>(what: &'static str, value: u32) -> Result<T, HostError> {
    T::from_u32(value).ok_or(HostError::InvalidEnum { what, value })
}

/// An optional name passed as a `(ptr, len)` pair; ptr 0 means unnamed.
pub fn read_name(cur: &mut MemCursor<'_>) -> Result<Option<String>, HostError> {
    let ptr = cur.read_u32()?;
    let len = cur.read_u32()?;
    if ptr == 0 {
        return Ok(None);
    }
    Ok(Some(cur.read_utf8(ptr as usize, len as usize)?))
}
