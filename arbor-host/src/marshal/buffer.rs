//! Buffer-view and accessor parameter blocks.
//!
//! Views are validated against the backing buffer's real length and
//! accessors against their view, so by construction no registered accessor
//! can describe bytes that do not exist.

use arbor_core::cursor::MemCursor;
use arbor_core::error::HostError;
use arbor_core::resource::{Accessor, BufferView, Resource};
use arbor_core::types::{AccessorShape, ComponentType, ResourceKind};

use super::extensions::decode_extension_block;
use super::{enum_u32, Scope};

/// Buffer-view block layout:
/// u32 byteOffset, u32 byteLength, u32 byteStride, u32 buffer,
/// extensions, extras.
pub fn decode_buffer_view(
    cur: &mut MemCursor<'_>,
    scope: &Scope<'_>,
) -> Result<BufferView, HostError> {
    let byte_offset = cur.read_u32()?;
    let byte_length = cur.read_u32()?;
    let byte_stride = cur.read_u32()?;
    let buffer = scope.required_handle(cur.read_u32()?, ResourceKind::Buffer)?;
    decode_extension_block(cur)?;

    let backing_len = match scope.registry.lookup(buffer) {
        Some(Resource::Buffer(b)) => b.data.len() as u64,
        _ => 0,
    };
    let end = byte_offset as u64 + byte_length as u64;
    if end > backing_len {
        return Err(HostError::decode(format!(
            "buffer view [{byte_offset}, {end}) exceeds the {backing_len}-byte buffer"
        )));
    }

    Ok(BufferView {
        buffer,
        byte_offset,
        byte_length,
        byte_stride,
    })
}

/// Accessor block layout:
/// u32 componentType, u32 shape, u32 count, u32 normalized, u32 dynamic,
/// u32 bufferView, extensions, extras.
pub fn decode_accessor(
    cur: &mut MemCursor<'_>,
    scope: &Scope<'_>,
) -> Result<Accessor, HostError> {
    let component_type: ComponentType = enum_u32("component type", cur.read_u32()?)?;
    let shape: AccessorShape = enum_u32("accessor shape", cur.read_u32()?)?;
    let count = cur.read_u32()?;
    let normalized = cur.read_u32()? != 0;
    let dynamic = cur.read_u32()? != 0;
    let buffer_view = scope.required_handle(cur.read_u32()?, ResourceKind::BufferView)?;
    decode_extension_block(cur)?;

    if count == 0 {
        return Err(HostError::decode("accessor count is 0"));
    }
    let view = match scope.registry.lookup(buffer_view) {
        Some(Resource::BufferView(v)) => v,
        _ => return Err(HostError::decode("accessor buffer view vanished")),
    };

    let element = (component_type.byte_size() * shape.component_count()) as u64;
    let stride = if view.byte_stride == 0 {
        element
    } else {
        view.byte_stride as u64
    };
    if stride < element {
        return Err(HostError::decode("buffer view stride smaller than element"));
    }
    let needed = stride * (count as u64 - 1) + element;
    if needed > view.byte_length as u64 {
        return Err(HostError::decode(format!(
            "accessor needs {needed} bytes, view holds {}",
            view.byte_length
        )));
    }

    Ok(Accessor {
        buffer_view,
        component_type,
        shape,
        count,
        normalized,
        dynamic,
    })
}
