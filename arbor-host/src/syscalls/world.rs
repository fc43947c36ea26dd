//! Creation and lookup calls.
//!
//! Every constructor decodes and validates its whole parameter block before
//! touching the registry, then registers the result under the calling
//! environment's ownership.

use anyhow::Result;

use arbor_core::cursor::MemCursor;
use arbor_core::resource::{
    Buffer, Interactable, InteractableState, Mesh, Resource, UiButton, UiCanvas, UiText,
};
use arbor_core::types::{ResourceKind, NIL_RESOURCE_ID};

use crate::environment::EnvId;
use crate::marshal;
use crate::syscalls::{decode_at, syscall};
use crate::world::World;

syscall!(WorldCreateNode, world_create_node);
syscall!(WorldCreateMesh, world_create_mesh);
syscall!(WorldCreateMaterial, world_create_material);
syscall!(WorldCreateTexture, world_create_texture);
syscall!(WorldCreateLight, world_create_light);
syscall!(WorldCreateCollider, world_create_collider);
syscall!(WorldCreateBuffer, world_create_buffer);
syscall!(WorldCreateBufferView, world_create_buffer_view);
syscall!(WorldCreateAccessor, world_create_accessor);
syscall!(WorldCreateUiCanvas, world_create_ui_canvas);
syscall!(WorldCreateUiElement, world_create_ui_element);
syscall!(WorldCreateUiButton, world_create_ui_button);
syscall!(WorldCreateUiText, world_create_ui_text);
syscall!(WorldGetEnvironmentScene, world_get_environment_scene);
syscall!(WorldFindNodeByName, world_find_node_by_name);
syscall!(WorldFindMeshByName, world_find_mesh_by_name);
syscall!(WorldFindMaterialByName, world_find_material_by_name);

fn world_create_node(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let node = decode_at(world, env, args[0], marshal::node::decode_node)?;
    let id = world.insert_owned(env, Resource::Node(node))?;
    Ok(id as i32)
}

fn world_create_mesh(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let props = decode_at(world, env, args[0], marshal::mesh::decode_mesh)?;
    // every primitive validated; reserve the whole allocation before the
    // first insert so nothing can be left half-registered
    world.reserve_owned(env, props.primitives.len() + 1)?;
    let mut primitive_ids = Vec::with_capacity(props.primitives.len());
    for primitive in props.primitives {
        primitive_ids.push(world.insert_owned(env, Resource::MeshPrimitive(primitive))?);
    }
    let id = world.insert_owned(
        env,
        Resource::Mesh(Mesh {
            name: props.name,
            primitives: primitive_ids,
        }),
    )?;
    Ok(id as i32)
}

fn world_create_material(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let material = decode_at(world, env, args[0], marshal::material::decode_material)?;
    let id = world.insert_owned(env, Resource::Material(material))?;
    Ok(id as i32)
}

fn world_create_texture(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let texture = decode_at(world, env, args[0], marshal::material::decode_texture)?;
    let id = world.insert_owned(env, Resource::Texture(texture))?;
    Ok(id as i32)
}

fn world_create_light(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let light = decode_at(world, env, args[0], |cur, _| marshal::node::decode_light(cur))?;
    let id = world.insert_owned(env, Resource::Light(light))?;
    Ok(id as i32)
}

fn world_create_collider(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let collider = decode_at(world, env, args[0], marshal::physics::decode_collider)?;
    let id = world.insert_owned(env, Resource::Collider(collider))?;
    Ok(id as i32)
}

fn world_create_buffer(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (data_ptr, data_len) = (args[0], args[1]);
    let data = {
        let (mem, _, _) = world.decode_parts(env)?;
        let mut cur = MemCursor::new(mem);
        cur.move_to(data_ptr as usize)?;
        cur.read_bytes(data_len as usize)?
    };
    let id = world.insert_owned(env, Resource::Buffer(Buffer { name: None, data }))?;
    Ok(id as i32)
}

fn world_create_buffer_view(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let view = decode_at(world, env, args[0], marshal::buffer::decode_buffer_view)?;
    let id = world.insert_owned(env, Resource::BufferView(view))?;
    Ok(id as i32)
}

fn world_create_accessor(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let accessor = decode_at(world, env, args[0], marshal::buffer::decode_accessor)?;
    let id = world.insert_owned(env, Resource::Accessor(accessor))?;
    Ok(id as i32)
}

/// Canvas construction has engine-wide side effects: an interaction panel in
/// the physics world and an interactable marker. The fallible collaborator
/// call happens first; only then does anything reach the registry.
fn world_create_ui_canvas(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let props = decode_at(world, env, args[0], marshal::ui::decode_ui_canvas)?;
    world.reserve_owned(env, 2)?;
    let physics_body = world.physics.create_panel(props.size)?;
    let interactable = world.insert_owned(
        env,
        Resource::Interactable(Interactable {
            kind: arbor_core::types::InteractableKind::Interactable,
            node: NIL_RESOURCE_ID,
            state: InteractableState::empty(),
        }),
    )?;
    let id = world.insert_owned(
        env,
        Resource::UiCanvas(UiCanvas {
            root: props.root,
            size: props.size,
            width: props.width,
            height: props.height,
            redraw_requested: false,
            interactable,
            physics_body,
        }),
    )?;
    Ok(id as i32)
}

fn world_create_ui_element(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let element = decode_at(world, env, args[0], |cur, _| marshal::ui::decode_ui_element(cur))?;
    let id = world.insert_owned(env, Resource::UiElement(element))?;
    Ok(id as i32)
}

/// Buttons register an interactable alongside the element, atomically.
fn world_create_ui_button(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let props = decode_at(world, env, args[0], |cur, _| marshal::ui::decode_ui_button(cur))?;
    world.reserve_owned(env, 2)?;
    let interactable = world.insert_owned(
        env,
        Resource::Interactable(Interactable {
            kind: arbor_core::types::InteractableKind::Interactable,
            node: NIL_RESOURCE_ID,
            state: InteractableState::empty(),
        }),
    )?;
    let id = world.insert_owned(
        env,
        Resource::UiButton(UiButton {
            element: props.element,
            label: props.label,
            interactable,
        }),
    )?;
    Ok(id as i32)
}

fn world_create_ui_text(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let props = decode_at(world, env, args[0], |cur, _| marshal::ui::decode_ui_text(cur))?;
    let id = world.insert_owned(
        env,
        Resource::UiText(UiText {
            element: props.element,
            value: props.value,
            font_size: props.font_size,
            color: props.color,
        }),
    )?;
    Ok(id as i32)
}

fn world_get_environment_scene(world: &mut World, env: EnvId, _args: &[u32]) -> Result<i32> {
    Ok(world.env(env)?.scene as i32)
}

fn find_by_name(
    world: &mut World,
    env: EnvId,
    args: &[u32],
    kind: ResourceKind,
) -> Result<i32> {
    let name = world.read_guest_utf8(env, args[0], args[1])?;
    Ok(world.find_by_name(env, kind, &name)? as i32)
}

fn world_find_node_by_name(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    find_by_name(world, env, args, ResourceKind::Node)
}

fn world_find_mesh_by_name(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    find_by_name(world, env, args, ResourceKind::Mesh)
}

fn world_find_material_by_name(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    find_by_name(world, env, args, ResourceKind::Material)
}
