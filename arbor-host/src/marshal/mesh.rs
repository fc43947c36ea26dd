//! Mesh parameter blocks: a header plus a variable-length primitive table,
//! each primitive carrying its own variable-length attribute table.
//!
//! Everything is parsed and handle-checked before the caller allocates a
//! single resource, so a bad primitive deep in the table can never leave a
//! half-built mesh behind.

use smallvec::SmallVec;

use arbor_core::cursor::MemCursor;
use arbor_core::error::HostError;
use arbor_core::resource::{MeshAttribute, MeshPrimitive};
use arbor_core::types::{AttributeKey, PrimitiveMode, ResourceKind};

use super::extensions::decode_extension_block;
use super::{enum_u32, read_name, Scope};

const PRIMITIVE_STRIDE: u32 = 20;
const ATTRIBUTE_STRIDE: u32 = 8;

pub struct MeshProps {
    pub name: Option<String>,
    pub primitives: Vec<MeshPrimitive>,
}

/// Mesh block layout:
/// u32 namePtr, u32 nameLen, u32 primitivesPtr, u32 primitiveCount,
/// extensions, extras.
///
/// Primitive item (stride 20):
/// u32 mode, u32 indicesAccessor, u32 material, u32 attributesPtr,
/// u32 attributeCount.
///
/// Attribute item (stride 8): u32 key, u32 accessor.
pub fn decode_mesh(cur: &mut MemCursor<'_>, scope: &Scope<'_>) -> Result<MeshProps, HostError> {
    let name = read_name(cur)?;
    let primitives_ptr = cur.read_u32()?;
    let primitive_count = cur.read_u32()?;
    decode_extension_block(cur)?;

    if primitive_count == 0 {
        return Err(HostError::decode("mesh needs at least one primitive"));
    }
    check_table(cur, primitives_ptr, primitive_count, PRIMITIVE_STRIDE)?;

    let mut primitives = Vec::with_capacity(primitive_count as usize);
    for i in 0..primitive_count {
        cur.move_to((primitives_ptr + i * PRIMITIVE_STRIDE) as usize)?;
        let mode: PrimitiveMode = enum_u32("primitive mode", cur.read_u32()?)?;
        let indices = scope.optional_handle(cur.read_u32()?, ResourceKind::Accessor)?;
        let material = scope.optional_handle(cur.read_u32()?, ResourceKind::Material)?;
        let attributes_ptr = cur.read_u32()?;
        let attribute_count = cur.read_u32()?;

        if attribute_count == 0 {
            return Err(HostError::decode(format!(
                "mesh primitive {i} has no attributes"
            )));
        }
        check_table(cur, attributes_ptr, attribute_count, ATTRIBUTE_STRIDE)?;

        let mut attributes = SmallVec::new();
        for j in 0..attribute_count {
            cur.move_to((attributes_ptr + j * ATTRIBUTE_STRIDE) as usize)?;
            let key: AttributeKey = enum_u32("attribute key", cur.read_u32()?)?;
            let accessor = scope.required_handle(cur.read_u32()?, ResourceKind::Accessor)?;
            attributes.push(MeshAttribute { key, accessor });
        }

        primitives.push(MeshPrimitive {
            mode,
            indices,
            material,
            attributes,
        });
    }

    Ok(MeshProps { name, primitives })
}

/// Reject a lying `(ptr, count)` pair before iterating the table.
pub(super) fn check_table(
    cur: &MemCursor<'_>,
    ptr: u32,
    count: u32,
    stride: u32,
) -> Result<(), HostError> {
    let end = count
        .checked_mul(stride)
        .and_then(|len| ptr.checked_add(len))
        .ok_or_else(|| HostError::decode("item table length overflows"))?;
    if end as usize > cur.buffer_len() {
        return Err(HostError::OutOfBounds {
            offset: ptr as usize,
            len: (end - ptr) as usize,
            buf_len: cur.buffer_len(),
        });
    }
    Ok(())
}
