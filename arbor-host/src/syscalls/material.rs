//! Material state calls. Float data travels through guest memory; the enum
//! slot selector is validated like every other wire enum.

use anyhow::Result;

use arbor_core::types::{TextureSlot, NIL_RESOURCE_ID};

use crate::environment::EnvId;
use crate::marshal::enum_u32;
use crate::syscalls::syscall;
use crate::world::World;

syscall!(MaterialGetBaseColorFactor, material_get_base_color_factor);
syscall!(MaterialSetBaseColorFactor, material_set_base_color_factor);
syscall!(MaterialGetMetallicFactor, material_get_metallic_factor);
syscall!(MaterialSetMetallicFactor, material_set_metallic_factor);
syscall!(MaterialGetRoughnessFactor, material_get_roughness_factor);
syscall!(MaterialSetRoughnessFactor, material_set_roughness_factor);
syscall!(MaterialGetEmissiveFactor, material_get_emissive_factor);
syscall!(MaterialSetEmissiveFactor, material_set_emissive_factor);
syscall!(MaterialGetAlphaMode, material_get_alpha_mode);
syscall!(MaterialGetTexture, material_get_texture);
syscall!(MaterialSetTexture, material_set_texture);

fn material_get_base_color_factor(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let values = world.material(env, args[0])?.base_color_factor;
    world.write_guest_f32s(env, args[1], &values)?;
    Ok(0)
}

fn material_set_base_color_factor(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.material(env, args[0])?;
    let values = world.read_guest_f32s::<4>(env, args[1])?;
    world.material_mut(env, args[0])?.base_color_factor = values;
    Ok(0)
}

fn material_get_metallic_factor(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let value = world.material(env, args[0])?.metallic_factor;
    world.write_guest_f32s(env, args[1], &[value])?;
    Ok(0)
}

fn material_set_metallic_factor(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.material(env, args[0])?;
    let [value] = world.read_guest_f32s::<1>(env, args[1])?;
    world.material_mut(env, args[0])?.metallic_factor = value;
    Ok(0)
}

fn material_get_roughness_factor(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let value = world.material(env, args[0])?.roughness_factor;
    world.write_guest_f32s(env, args[1], &[value])?;
    Ok(0)
}

fn material_set_roughness_factor(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.material(env, args[0])?;
    let [value] = world.read_guest_f32s::<1>(env, args[1])?;
    world.material_mut(env, args[0])?.roughness_factor = value;
    Ok(0)
}

fn material_get_emissive_factor(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let values = world.material(env, args[0])?.emissive_factor;
    world.write_guest_f32s(env, args[1], &values)?;
    Ok(0)
}

fn material_set_emissive_factor(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.material(env, args[0])?;
    let values = world.read_guest_f32s::<3>(env, args[1])?;
    world.material_mut(env, args[0])?.emissive_factor = values;
    Ok(0)
}

fn material_get_alpha_mode(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    Ok(world.material(env, args[0])?.alpha_mode as i32)
}

fn slot_of(
    material: &arbor_core::resource::Material,
    slot: TextureSlot,
) -> arbor_core::types::ResourceId {
    match slot {
        TextureSlot::BaseColor => material.base_color_texture,
        TextureSlot::MetallicRoughness => material.metallic_roughness_texture,
        TextureSlot::Normal => material.normal_texture,
        TextureSlot::Occlusion => material.occlusion_texture,
        TextureSlot::Emissive => material.emissive_texture,
    }
}

fn material_get_texture(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let slot: TextureSlot = enum_u32("texture slot", args[1])?;
    let material = world.material(env, args[0])?;
    Ok(slot_of(material, slot) as i32)
}

fn material_set_texture(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, slot_code, texture) = (args[0], args[1], args[2]);
    let slot: TextureSlot = enum_u32("texture slot", slot_code)?;
    if texture != NIL_RESOURCE_ID {
        world.texture(env, texture)?;
    }
    let material = world.material_mut(env, id)?;
    match slot {
        TextureSlot::BaseColor => material.base_color_texture = texture,
        TextureSlot::MetallicRoughness => material.metallic_roughness_texture = texture,
        TextureSlot::Normal => material.normal_texture = texture,
        TextureSlot::Occlusion => material.occlusion_texture = texture,
        TextureSlot::Emissive => material.emissive_texture = texture,
    }
    Ok(0)
}
