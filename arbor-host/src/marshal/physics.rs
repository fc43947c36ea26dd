//! Collider, physics-body and interactable parameter blocks.

use arbor_core::cursor::MemCursor;
use arbor_core::error::HostError;
use arbor_core::resource::Collider;
use arbor_core::types::{BodyKind, ColliderKind, InteractableKind, ResourceKind};

use super::extensions::{decode_extension_block, ExtensionValue};
use super::{enum_u32, Scope};

/// Collider block layout:
/// u32 kind, u32 isTrigger, f32x3 size, f32 radius, f32 height,
/// u32 mesh, extensions, extras.
pub fn decode_collider(
    cur: &mut MemCursor<'_>,
    scope: &Scope<'_>,
) -> Result<Collider, HostError> {
    let kind: ColliderKind = enum_u32("collider kind", cur.read_u32()?)?;
    let is_trigger = cur.read_u32()? != 0;
    let size = cur.read_f32_array::<3>()?;
    let radius = cur.read_f32()?;
    let height = cur.read_f32()?;
    let mesh = match kind {
        ColliderKind::Hull | ColliderKind::Trimesh => {
            scope.required_handle(cur.read_u32()?, ResourceKind::Mesh)?
        }
        _ => scope.optional_handle(cur.read_u32()?, ResourceKind::Mesh)?,
    };

    let mut collider = Collider {
        kind,
        is_trigger,
        size,
        radius,
        height,
        mesh,
    };
    for ext in decode_extension_block(cur)? {
        if let ExtensionValue::ColliderExtent(extent) = ext {
            collider.size = extent;
        }
    }
    Ok(collider)
}

/// Physics body block layout: u32 kind, extensions, extras.
pub fn decode_body(cur: &mut MemCursor<'_>) -> Result<BodyKind, HostError> {
    let kind: BodyKind = enum_u32("body kind", cur.read_u32()?)?;
    decode_extension_block(cur)?;
    Ok(kind)
}

/// Interactable block layout: u32 kind, extensions, extras.
pub fn decode_interactable(cur: &mut MemCursor<'_>) -> Result<InteractableKind, HostError> {
    let kind: InteractableKind = enum_u32("interactable kind", cur.read_u32()?)?;
    decode_extension_block(cur)?;
    Ok(kind)
}
