//! Material and texture parameter blocks.

use arbor_core::cursor::MemCursor;
use arbor_core::error::HostError;
use arbor_core::resource::{Material, Texture};
use arbor_core::types::{AlphaMode, FilterMode, ResourceKind, WrapMode};

use super::extensions::{decode_extension_block, ExtensionValue};
use super::{enum_u32, read_name, Scope};

/// Material block layout:
/// f32x4 baseColorFactor, f32 metallicFactor, f32 roughnessFactor,
/// f32x3 emissiveFactor, f32 alphaCutoff, u32 alphaMode, u32 doubleSided,
/// u32 namePtr, u32 nameLen,
/// u32 baseColorTexture, u32 metallicRoughnessTexture, u32 normalTexture,
/// u32 occlusionTexture, u32 emissiveTexture,
/// extensions, extras.
pub fn decode_material(
    cur: &mut MemCursor<'_>,
    scope: &Scope<'_>,
) -> Result<Material, HostError> {
    let base_color_factor = cur.read_f32_array::<4>()?;
    let metallic_factor = cur.read_f32()?;
    let roughness_factor = cur.read_f32()?;
    let emissive_factor = cur.read_f32_array::<3>()?;
    let alpha_cutoff = cur.read_f32()?;
    let alpha_mode: AlphaMode = enum_u32("alpha mode", cur.read_u32()?)?;
    let double_sided = cur.read_u32()? != 0;
    let name = read_name(cur)?;

    let base_color_texture = scope.optional_handle(cur.read_u32()?, ResourceKind::Texture)?;
    let metallic_roughness_texture =
        scope.optional_handle(cur.read_u32()?, ResourceKind::Texture)?;
    let normal_texture = scope.optional_handle(cur.read_u32()?, ResourceKind::Texture)?;
    let occlusion_texture = scope.optional_handle(cur.read_u32()?, ResourceKind::Texture)?;
    let emissive_texture = scope.optional_handle(cur.read_u32()?, ResourceKind::Texture)?;

    let mut material = Material {
        name,
        base_color_factor,
        metallic_factor,
        roughness_factor,
        emissive_factor,
        alpha_mode,
        alpha_cutoff,
        double_sided,
        base_color_texture,
        metallic_roughness_texture,
        normal_texture,
        occlusion_texture,
        emissive_texture,
        ..Material::default()
    };

    for ext in decode_extension_block(cur)? {
        if let ExtensionValue::EmissiveStrength(strength) = ext {
            material.emissive_strength = strength;
        }
    }
    Ok(material)
}

/// Texture block layout:
/// u32 wrapS, u32 wrapT, u32 magFilter, u32 minFilter,
/// u32 namePtr, u32 nameLen, u32 sourceBufferView,
/// extensions, extras.
pub fn decode_texture(
    cur: &mut MemCursor<'_>,
    scope: &Scope<'_>,
) -> Result<Texture, HostError> {
    let wrap_s: WrapMode = enum_u32("wrap mode", cur.read_u32()?)?;
    let wrap_t: WrapMode = enum_u32("wrap mode", cur.read_u32()?)?;
    let mag_filter: FilterMode = enum_u32("filter mode", cur.read_u32()?)?;
    let min_filter: FilterMode = enum_u32("filter mode", cur.read_u32()?)?;
    let name = read_name(cur)?;
    let source = scope.optional_handle(cur.read_u32()?, ResourceKind::BufferView)?;
    decode_extension_block(cur)?;

    Ok(Texture {
        name,
        source,
        wrap_s,
        wrap_t,
        mag_filter,
        min_filter,
    })
}
