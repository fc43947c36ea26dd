//! Node and light parameter blocks.

use glam::{Quat, Vec3};

use arbor_core::cursor::MemCursor;
use arbor_core::error::HostError;
use arbor_core::resource::{Light, Node};
use arbor_core::types::{LightKind, ResourceKind};

use super::extensions::decode_extension_block;
use super::{enum_u32, read_name, Scope};

/// Node block layout:
/// f32x3 translation, f32x4 rotation, f32x3 scale, u32 visible,
/// u32 namePtr, u32 nameLen,
/// u32 mesh, u32 light, u32 collider, u32 uiCanvas,
/// extensions, extras.
pub fn decode_node(cur: &mut MemCursor<'_>, scope: &Scope<'_>) -> Result<Node, HostError> {
    let translation = cur.read_f32_array::<3>()?;
    let rotation = cur.read_f32_array::<4>()?;
    let scale = cur.read_f32_array::<3>()?;
    let visible = cur.read_u32()? != 0;
    let name = read_name(cur)?;

    let mesh = scope.optional_handle(cur.read_u32()?, ResourceKind::Mesh)?;
    let light = scope.optional_handle(cur.read_u32()?, ResourceKind::Light)?;
    let collider = scope.optional_handle(cur.read_u32()?, ResourceKind::Collider)?;
    let ui_canvas = scope.optional_handle(cur.read_u32()?, ResourceKind::UiCanvas)?;
    decode_extension_block(cur)?;

    Ok(Node {
        name,
        translation: Vec3::from_array(translation),
        rotation: Quat::from_array(rotation),
        scale: Vec3::from_array(scale),
        visible,
        mesh,
        light,
        collider,
        ui_canvas,
        ..Node::default()
    })
}

/// Light block layout:
/// u32 kind, f32x3 color, f32 intensity, f32 range,
/// f32 innerConeAngle, f32 outerConeAngle,
/// u32 namePtr, u32 nameLen,
/// extensions, extras.
pub fn decode_light(cur: &mut MemCursor<'_>) -> Result<Light, HostError> {
    let kind: LightKind = enum_u32("light kind", cur.read_u32()?)?;
    let color = cur.read_f32_array::<3>()?;
    let intensity = cur.read_f32()?;
    let range = cur.read_f32()?;
    let inner_cone_angle = cur.read_f32()?;
    let outer_cone_angle = cur.read_f32()?;
    let name = read_name(cur)?;
    decode_extension_block(cur)?;

    Ok(Light {
        name,
        kind,
        color,
        intensity,
        range,
        inner_cone_angle,
        outer_cone_angle,
    })
}
