//! Mesh and primitive calls.

use anyhow::Result;

use arbor_core::types::NIL_RESOURCE_ID;

use crate::environment::EnvId;
use crate::syscalls::syscall;
use crate::world::World;

syscall!(MeshGetPrimitiveCount, mesh_get_primitive_count);
syscall!(MeshGetPrimitiveAt, mesh_get_primitive_at);
syscall!(MeshPrimitiveGetMaterial, mesh_primitive_get_material);
syscall!(MeshPrimitiveSetMaterial, mesh_primitive_set_material);
syscall!(MeshPrimitiveGetMode, mesh_primitive_get_mode);

fn mesh_get_primitive_count(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    Ok(world.mesh(env, args[0])?.primitives.len() as i32)
}

fn mesh_get_primitive_at(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let primitives = &world.mesh(env, args[0])?.primitives;
    Ok(primitives
        .get(args[1] as usize)
        .copied()
        .unwrap_or(NIL_RESOURCE_ID) as i32)
}

fn mesh_primitive_get_material(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    Ok(world.mesh_primitive(env, args[0])?.material as i32)
}

fn mesh_primitive_set_material(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, material) = (args[0], args[1]);
    if material != NIL_RESOURCE_ID {
        world.material(env, material)?;
    }
    world.mesh_primitive_mut(env, id)?.material = material;
    Ok(0)
}

fn mesh_primitive_get_mode(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    Ok(world.mesh_primitive(env, args[0])?.mode as i32)
}
