//! Accessor data updates: the one path where a guest pushes raw bytes into
//! an engine-owned buffer. Offsets and length come from the guest and are
//! checked twice — against guest memory on the read side, against the view's
//! window on the write side.

use anyhow::Result;

use arbor_core::cursor::MemCursor;
use arbor_core::resource::Resource;

use crate::environment::EnvId;
use crate::syscalls::syscall;
use crate::world::World;

syscall!(AccessorUpdateWith, accessor_update_with);

fn accessor_update_with(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, data_ptr, data_len) = (args[0], args[1], args[2]);

    let accessor = world.accessor(env, id)?;
    if !accessor.dynamic {
        anyhow::bail!("accessor {id} is not dynamic");
    }
    let view_id = accessor.buffer_view;

    let (buffer_id, window_offset, window_len) = match world.registry.lookup(view_id) {
        Some(Resource::BufferView(v)) => (v.buffer, v.byte_offset as usize, v.byte_length as usize),
        _ => anyhow::bail!("accessor {id} points at a missing buffer view"),
    };
    if data_len as usize > window_len {
        anyhow::bail!(
            "update of {data_len} bytes exceeds the {window_len}-byte view window"
        );
    }

    let data = {
        let (mem, _, _) = world.decode_parts(env)?;
        let mut cur = MemCursor::new(mem);
        cur.move_to(data_ptr as usize)?;
        cur.read_bytes(data_len as usize)?
    };

    match world.registry.lookup_mut(buffer_id) {
        Some(Resource::Buffer(b)) => {
            b.data[window_offset..window_offset + data.len()].copy_from_slice(&data);
        }
        _ => anyhow::bail!("buffer view {view_id} points at a missing buffer"),
    }
    Ok(0)
}
