//! Node state and hierarchy calls.

use anyhow::Result;

use glam::{Mat4, Quat, Vec3};

use arbor_core::types::{ResourceKind, NIL_RESOURCE_ID};

use crate::bridge;
use crate::environment::EnvId;
use crate::syscalls::syscall;
use crate::world::World;

syscall!(NodeAddChild, node_add_child);
syscall!(NodeRemoveChild, node_remove_child);
syscall!(NodeGetParent, node_get_parent);
syscall!(NodeGetChildCount, node_get_child_count);
syscall!(NodeGetChildren, node_get_children);
syscall!(NodeGetChildAt, node_get_child_at);
syscall!(NodeGetTranslation, node_get_translation);
syscall!(NodeSetTranslation, node_set_translation);
syscall!(NodeGetRotation, node_get_rotation);
syscall!(NodeSetRotation, node_set_rotation);
syscall!(NodeGetScale, node_get_scale);
syscall!(NodeSetScale, node_set_scale);
syscall!(NodeGetLocalMatrix, node_get_local_matrix);
syscall!(NodeSetLocalMatrix, node_set_local_matrix);
syscall!(NodeGetWorldMatrix, node_get_world_matrix);
syscall!(NodeGetVisible, node_get_visible);
syscall!(NodeSetVisible, node_set_visible);
syscall!(NodeGetNameLength, node_get_name_length);
syscall!(NodeGetName, node_get_name);
syscall!(NodeGetMesh, node_get_mesh);
syscall!(NodeSetMesh, node_set_mesh);
syscall!(NodeSetCollider, node_set_collider);
syscall!(NodeAddAudioEmitter, node_add_audio_emitter);
syscall!(NodeRemoveAudioEmitter, node_remove_audio_emitter);

fn node_add_child(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (parent, child) = (args[0], args[1]);
    world.node(env, parent)?;
    world.node(env, child)?;
    bridge::attach(&mut world.registry, parent, child)?;
    Ok(0)
}

fn node_remove_child(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (parent, child) = (args[0], args[1]);
    world.node(env, parent)?;
    world.node(env, child)?;
    bridge::detach(&mut world.registry, parent, child)?;
    Ok(0)
}

/// Parent as the caller sees it: a node it is authorized for, or nothing.
/// A scene parent or a foreign node both read as 0.
fn node_get_parent(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let parent = world.node(env, args[0])?.parent;
    if parent == NIL_RESOURCE_ID {
        return Ok(0);
    }
    let caps = &world.env(env)?.caps;
    let visible = caps.contains(parent)
        && world.registry.kind_of(parent) == Some(ResourceKind::Node);
    Ok(if visible { parent as i32 } else { 0 })
}

fn node_get_child_count(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let id = args[0];
    world.node(env, id)?;
    let caps = &world.env(env)?.caps;
    Ok(bridge::filtered_children(&world.registry, caps, id).len() as i32)
}

fn node_get_children(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, out_ptr, max) = (args[0], args[1], args[2]);
    world.node(env, id)?;
    let caps = &world.env(env)?.caps;
    let mut ids = bridge::filtered_children(&world.registry, caps, id);
    ids.truncate(max as usize);
    world.write_guest_u32s(env, out_ptr, &ids)?;
    Ok(ids.len() as i32)
}

fn node_get_child_at(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, index) = (args[0], args[1]);
    world.node(env, id)?;
    let caps = &world.env(env)?.caps;
    let ids = bridge::filtered_children(&world.registry, caps, id);
    Ok(ids.get(index as usize).copied().unwrap_or(NIL_RESOURCE_ID) as i32)
}

fn node_get_translation(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let values = world.node(env, args[0])?.translation.to_array();
    world.write_guest_f32s(env, args[1], &values)?;
    Ok(0)
}

fn node_set_translation(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.node(env, args[0])?;
    let values = world.read_guest_f32s::<3>(env, args[1])?;
    world.node_mut(env, args[0])?.translation = Vec3::from_array(values);
    Ok(0)
}

fn node_get_rotation(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let values = world.node(env, args[0])?.rotation.to_array();
    world.write_guest_f32s(env, args[1], &values)?;
    Ok(0)
}

fn node_set_rotation(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.node(env, args[0])?;
    let values = world.read_guest_f32s::<4>(env, args[1])?;
    world.node_mut(env, args[0])?.rotation = Quat::from_array(values);
    Ok(0)
}

fn node_get_scale(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let values = world.node(env, args[0])?.scale.to_array();
    world.write_guest_f32s(env, args[1], &values)?;
    Ok(0)
}

fn node_set_scale(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.node(env, args[0])?;
    let values = world.read_guest_f32s::<3>(env, args[1])?;
    world.node_mut(env, args[0])?.scale = Vec3::from_array(values);
    Ok(0)
}

fn node_get_local_matrix(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let node = world.node(env, args[0])?;
    // an explicitly set matrix reads back bit-for-bit; otherwise compose TRS
    let values = node.local_matrix.unwrap_or_else(|| {
        Mat4::from_scale_rotation_translation(node.scale, node.rotation, node.translation)
            .to_cols_array()
    });
    world.write_guest_f32s(env, args[1], &values)?;
    Ok(0)
}

fn node_set_local_matrix(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.node(env, args[0])?;
    let values = world.read_guest_f32s::<16>(env, args[1])?;
    world.node_mut(env, args[0])?.local_matrix = Some(values);
    Ok(0)
}

fn node_get_world_matrix(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.node(env, args[0])?;
    let values = world.transforms.world_matrix(args[0]);
    world.write_guest_f32s(env, args[1], &values)?;
    Ok(0)
}

fn node_get_visible(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    Ok(world.node(env, args[0])?.visible as i32)
}

fn node_set_visible(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.node_mut(env, args[0])?.visible = args[1] != 0;
    Ok(0)
}

fn node_get_name_length(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let len = world.node(env, args[0])?.name.as_deref().map_or(0, str::len);
    Ok(len as i32)
}

fn node_get_name(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, out_ptr, max) = (args[0], args[1], args[2]);
    let mut bytes = world
        .node(env, id)?
        .name
        .as_deref()
        .unwrap_or("")
        .as_bytes()
        .to_vec();
    bytes.truncate(max as usize);
    let written = bytes.len();
    let mem = world.guest_memory_mut(env)?;
    let mut cur = arbor_core::cursor::MemCursor::new(mem);
    cur.move_to(out_ptr as usize)?;
    cur.write_bytes(&bytes)?;
    Ok(written as i32)
}

fn node_get_mesh(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    Ok(world.node(env, args[0])?.mesh as i32)
}

fn node_set_mesh(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, mesh) = (args[0], args[1]);
    if mesh != NIL_RESOURCE_ID {
        world.mesh(env, mesh)?;
    }
    world.node_mut(env, id)?.mesh = mesh;
    Ok(0)
}

fn node_set_collider(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, collider) = (args[0], args[1]);
    if collider != NIL_RESOURCE_ID {
        world.collider(env, collider)?;
    }
    world.node_mut(env, id)?.collider = collider;
    Ok(0)
}

fn node_add_audio_emitter(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let id = args[0];
    if world.node(env, id)?.audio_emitter.is_some() {
        anyhow::bail!("node {id} already has an audio emitter");
    }
    let emitter = world.audio.create_emitter(id)?;
    world.node_mut(env, id)?.audio_emitter = Some(emitter);
    Ok(0)
}

fn node_remove_audio_emitter(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let id = args[0];
    let Some(emitter) = world.node_mut(env, id)?.audio_emitter.take() else {
        anyhow::bail!("node {id} has no audio emitter");
    };
    world.audio.release_emitter(emitter);
    Ok(0)
}
