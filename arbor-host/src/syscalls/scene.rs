//! Scene membership calls.
//!
//! A scene's node list is the same sibling chain nodes use, headed by
//! `first_node`. Counts and indices are computed against the caller's
//! capability set, so two scripts sharing one scene each see only their own
//! slice of it.

use anyhow::Result;

use arbor_core::types::NIL_RESOURCE_ID;

use crate::bridge;
use crate::environment::EnvId;
use crate::syscalls::syscall;
use crate::world::World;

syscall!(SceneAddNode, scene_add_node);
syscall!(SceneRemoveNode, scene_remove_node);
syscall!(SceneGetNodeCount, scene_get_node_count);
syscall!(SceneGetNodes, scene_get_nodes);
syscall!(SceneGetNodeAt, scene_get_node_at);

fn scene_add_node(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (scene, node) = (args[0], args[1]);
    world.scene(env, scene)?;
    world.node(env, node)?;
    bridge::attach(&mut world.registry, scene, node)?;
    Ok(0)
}

fn scene_remove_node(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (scene, node) = (args[0], args[1]);
    world.scene(env, scene)?;
    world.node(env, node)?;
    bridge::detach(&mut world.registry, scene, node)?;
    Ok(0)
}

fn scene_get_node_count(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let id = args[0];
    world.scene(env, id)?;
    let caps = &world.env(env)?.caps;
    Ok(bridge::filtered_children(&world.registry, caps, id).len() as i32)
}

fn scene_get_nodes(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, out_ptr, max) = (args[0], args[1], args[2]);
    world.scene(env, id)?;
    let caps = &world.env(env)?.caps;
    let mut ids = bridge::filtered_children(&world.registry, caps, id);
    ids.truncate(max as usize);
    world.write_guest_u32s(env, out_ptr, &ids)?;
    Ok(ids.len() as i32)
}

fn scene_get_node_at(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, index) = (args[0], args[1]);
    world.scene(env, id)?;
    let caps = &world.env(env)?.caps;
    let ids = bridge::filtered_children(&world.registry, caps, id);
    Ok(ids.get(index as usize).copied().unwrap_or(NIL_RESOURCE_ID) as i32)
}
