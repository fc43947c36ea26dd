//! The ABI call surface.
//!
//! Every operation a guest can invoke is a [`Syscaller`] registered in the
//! [`SyscallTable`] under its wire name, together with its argument count and
//! return convention. Handlers receive nothing but u32 words and reply with
//! a single i32; everything richer goes through guest memory.

pub mod buffer;
pub mod material;
pub mod mesh;
pub mod node;
pub mod physics;
pub mod scene;
pub mod ui;
pub mod world;

use std::collections::HashMap;

use anyhow::Result;

use arbor_core::cursor::MemCursor;
use arbor_core::error::HostError;

use crate::environment::EnvId;
use crate::marshal::Scope;
use crate::world::World;

pub trait Syscaller: Send + Sync {
    fn call(&self, world: &mut World, env: EnvId, args: &[u32]) -> Result<i32>;
}

/// What the guest gets when a call fails: 0 for handle-returning calls,
/// -1 for status/count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetKind {
    Handle,
    Status,
}

impl RetKind {
    pub fn failure(self) -> i32 {
        match self {
            RetKind::Handle => 0,
            RetKind::Status => -1,
        }
    }
}

pub struct SyscallEntry {
    pub argc: usize,
    pub ret: RetKind,
    pub handler: Box<dyn Syscaller>,
}

#[derive(Default)]
pub struct SyscallTable {
    entries: HashMap<&'static str, SyscallEntry>,
}

impl SyscallTable {
    pub fn get(&self, name: &str) -> Option<&SyscallEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn add(
        &mut self,
        name: &'static str,
        argc: usize,
        ret: RetKind,
        handler: impl Syscaller + 'static,
    ) {
        self.entries.insert(
            name,
            SyscallEntry {
                argc,
                ret,
                handler: Box::new(handler),
            },
        );
    }
}

macro_rules! syscall {
    ($name:ident, $handler:path) => {
        pub struct $name;

        impl crate::syscalls::Syscaller for $name {
            fn call(
                &self,
                world: &mut crate::world::World,
                env: crate::environment::EnvId,
                args: &[u32],
            ) -> anyhow::Result<i32> {
                $handler(world, env, args)
            }
        }
    };
}

pub(crate) use syscall;

/// Decode helper shared by the creation calls: position a cursor on the
/// parameter block and hand it to a block decoder together with the caller's
/// access scope.
pub(crate) fn decode_at<T>(
    world: &mut World,
    env: EnvId,
    ptr: u32,
    f: impl FnOnce(&mut MemCursor<'_>, &Scope<'_>) -> Result<T, HostError>,
) -> Result<T, HostError> {
    let (mem, caps, registry) = world.decode_parts(env)?;
    let mut cur = MemCursor::new(mem);
    cur.move_to(ptr as usize)?;
    f(&mut cur, &Scope { registry, caps })
}

/// Build the full dispatch table. Owned by the [`crate::host::Host`], never
/// global.
pub fn build_syscall_table() -> SyscallTable {
    use RetKind::{Handle, Status};

    let mut t = SyscallTable::default();

    // creation & lookup
    t.add("world_create_node", 1, Handle, world::WorldCreateNode);
    t.add("world_create_mesh", 1, Handle, world::WorldCreateMesh);
    t.add("world_create_material", 1, Handle, world::WorldCreateMaterial);
    t.add("world_create_texture", 1, Handle, world::WorldCreateTexture);
    t.add("world_create_light", 1, Handle, world::WorldCreateLight);
    t.add("world_create_collider", 1, Handle, world::WorldCreateCollider);
    t.add("world_create_buffer", 2, Handle, world::WorldCreateBuffer);
    t.add("world_create_buffer_view", 1, Handle, world::WorldCreateBufferView);
    t.add("world_create_accessor", 1, Handle, world::WorldCreateAccessor);
    t.add("world_create_ui_canvas", 1, Handle, world::WorldCreateUiCanvas);
    t.add("world_create_ui_element", 1, Handle, world::WorldCreateUiElement);
    t.add("world_create_ui_button", 1, Handle, world::WorldCreateUiButton);
    t.add("world_create_ui_text", 1, Handle, world::WorldCreateUiText);
    t.add("world_get_environment_scene", 0, Handle, world::WorldGetEnvironmentScene);
    t.add("world_find_node_by_name", 2, Handle, world::WorldFindNodeByName);
    t.add("world_find_mesh_by_name", 2, Handle, world::WorldFindMeshByName);
    t.add("world_find_material_by_name", 2, Handle, world::WorldFindMaterialByName);

    // node hierarchy & state
    t.add("node_add_child", 2, Status, node::NodeAddChild);
    t.add("node_remove_child", 2, Status, node::NodeRemoveChild);
    t.add("node_get_parent", 1, Handle, node::NodeGetParent);
    t.add("node_get_child_count", 1, Status, node::NodeGetChildCount);
    t.add("node_get_children", 3, Status, node::NodeGetChildren);
    t.add("node_get_child_at", 2, Handle, node::NodeGetChildAt);
    t.add("node_get_translation", 2, Status, node::NodeGetTranslation);
    t.add("node_set_translation", 2, Status, node::NodeSetTranslation);
    t.add("node_get_rotation", 2, Status, node::NodeGetRotation);
    t.add("node_set_rotation", 2, Status, node::NodeSetRotation);
    t.add("node_get_scale", 2, Status, node::NodeGetScale);
    t.add("node_set_scale", 2, Status, node::NodeSetScale);
    t.add("node_get_local_matrix", 2, Status, node::NodeGetLocalMatrix);
    t.add("node_set_local_matrix", 2, Status, node::NodeSetLocalMatrix);
    t.add("node_get_world_matrix", 2, Status, node::NodeGetWorldMatrix);
    t.add("node_get_visible", 1, Status, node::NodeGetVisible);
    t.add("node_set_visible", 2, Status, node::NodeSetVisible);
    t.add("node_get_name_length", 1, Status, node::NodeGetNameLength);
    t.add("node_get_name", 3, Status, node::NodeGetName);
    t.add("node_get_mesh", 1, Handle, node::NodeGetMesh);
    t.add("node_set_mesh", 2, Status, node::NodeSetMesh);
    t.add("node_set_collider", 2, Status, node::NodeSetCollider);
    t.add("node_add_physics_body", 2, Status, physics::NodeAddPhysicsBody);
    t.add("node_remove_physics_body", 1, Status, physics::NodeRemovePhysicsBody);
    t.add("node_add_interactable", 2, Status, physics::NodeAddInteractable);
    t.add("node_remove_interactable", 1, Status, physics::NodeRemoveInteractable);
    t.add("node_has_interactable", 1, Status, physics::NodeHasInteractable);
    t.add("node_get_interactable_pressed", 1, Status, physics::NodeGetInteractablePressed);
    t.add("node_get_interactable_held", 1, Status, physics::NodeGetInteractableHeld);
    t.add("node_get_interactable_released", 1, Status, physics::NodeGetInteractableReleased);
    t.add("node_add_audio_emitter", 1, Status, node::NodeAddAudioEmitter);
    t.add("node_remove_audio_emitter", 1, Status, node::NodeRemoveAudioEmitter);

    // scene membership
    t.add("scene_add_node", 2, Status, scene::SceneAddNode);
    t.add("scene_remove_node", 2, Status, scene::SceneRemoveNode);
    t.add("scene_get_node_count", 1, Status, scene::SceneGetNodeCount);
    t.add("scene_get_nodes", 3, Status, scene::SceneGetNodes);
    t.add("scene_get_node_at", 2, Handle, scene::SceneGetNodeAt);

    // mesh & material
    t.add("mesh_get_primitive_count", 1, Status, mesh::MeshGetPrimitiveCount);
    t.add("mesh_get_primitive_at", 2, Handle, mesh::MeshGetPrimitiveAt);
    t.add("mesh_primitive_get_material", 1, Handle, mesh::MeshPrimitiveGetMaterial);
    t.add("mesh_primitive_set_material", 2, Status, mesh::MeshPrimitiveSetMaterial);
    t.add("mesh_primitive_get_mode", 1, Status, mesh::MeshPrimitiveGetMode);
    t.add("material_get_base_color_factor", 2, Status, material::MaterialGetBaseColorFactor);
    t.add("material_set_base_color_factor", 2, Status, material::MaterialSetBaseColorFactor);
    t.add("material_get_metallic_factor", 2, Status, material::MaterialGetMetallicFactor);
    t.add("material_set_metallic_factor", 2, Status, material::MaterialSetMetallicFactor);
    t.add("material_get_roughness_factor", 2, Status, material::MaterialGetRoughnessFactor);
    t.add("material_set_roughness_factor", 2, Status, material::MaterialSetRoughnessFactor);
    t.add("material_get_emissive_factor", 2, Status, material::MaterialGetEmissiveFactor);
    t.add("material_set_emissive_factor", 2, Status, material::MaterialSetEmissiveFactor);
    t.add("material_get_alpha_mode", 1, Status, material::MaterialGetAlphaMode);
    t.add("material_get_texture", 2, Handle, material::MaterialGetTexture);
    t.add("material_set_texture", 3, Status, material::MaterialSetTexture);

    // buffers
    t.add("accessor_update_with", 3, Status, buffer::AccessorUpdateWith);

    // ui
    t.add("ui_canvas_get_root", 1, Handle, ui::UiCanvasGetRoot);
    t.add("ui_canvas_set_root", 2, Status, ui::UiCanvasSetRoot);
    t.add("ui_canvas_get_size", 2, Status, ui::UiCanvasGetSize);
    t.add("ui_canvas_set_size", 2, Status, ui::UiCanvasSetSize);
    t.add("ui_canvas_get_width", 2, Status, ui::UiCanvasGetWidth);
    t.add("ui_canvas_set_width", 2, Status, ui::UiCanvasSetWidth);
    t.add("ui_canvas_get_height", 2, Status, ui::UiCanvasGetHeight);
    t.add("ui_canvas_set_height", 2, Status, ui::UiCanvasSetHeight);
    t.add("ui_canvas_redraw", 1, Status, ui::UiCanvasRedraw);
    t.add("ui_element_add_child", 2, Status, ui::UiElementAddChild);
    t.add("ui_element_remove_child", 2, Status, ui::UiElementRemoveChild);
    t.add("ui_element_get_parent", 1, Handle, ui::UiElementGetParent);
    t.add("ui_button_get_pressed", 1, Status, ui::UiButtonGetPressed);
    t.add("ui_text_set_value", 3, Status, ui::UiTextSetValue);

    // physics queries
    t.add("physics_ray_cast", 2, Handle, physics::PhysicsRayCast);
    t.add("physics_drain_contacts", 2, Status, physics::PhysicsDrainContacts);

    t
}
