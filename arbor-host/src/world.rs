//! The explicit host context every ABI call runs against.
//!
//! One `World` per host: the resource registry, the loaded environments, and
//! the collaborator endpoints. All mutation happens on the single logical
//! thread that drives the simulation tick; nothing here is shared or locked.

use std::collections::HashMap;

use arbor_core::capability::{check_access, check_access_mut, CapabilitySet};
use arbor_core::cursor::MemCursor;
use arbor_core::error::{AccessError, HostError};
use arbor_core::registry::ResourceRegistry;
use arbor_core::resource::{
    Accessor, Buffer, BufferView, Collider, Interactable, Light, Material, Mesh, MeshPrimitive,
    Node, Resource, Scene, Texture, UiButton, UiCanvas, UiElement, UiText,
};
use arbor_core::types::{ResourceId, ResourceKind, NIL_RESOURCE_ID};

use crate::bridge;
use crate::collab::{
    AudioEmitters, InputBindings, NullAudio, NullInput, NullPhysics, NullTransforms, PhysicsWorld,
    TransformGraph,
};
use crate::config::HostConfig;
use crate::environment::{EnvId, ScriptEnvironment};

pub struct World {
    pub config: HostConfig,
    pub registry: ResourceRegistry,
    envs: HashMap<u32, ScriptEnvironment>,
    next_env: u32,
    pub physics: Box<dyn PhysicsWorld>,
    pub input: Box<dyn InputBindings>,
    pub audio: Box<dyn AudioEmitters>,
    pub transforms: Box<dyn TransformGraph>,
}

macro_rules! checked_accessor {
    ($get:ident, $get_mut:ident, $variant:ident, $ty:ty) => {
        pub fn $get(&self, env: EnvId, id: ResourceId) -> Result<&$ty, HostError> {
            let e = self.env(env)?;
            match check_access(&self.registry, &e.caps, id, ResourceKind::$variant)? {
                Resource::$variant(r) => Ok(r),
                other => Err(mismatch(id, ResourceKind::$variant, other)),
            }
        }

        pub fn $get_mut(&mut self, env: EnvId, id: ResourceId) -> Result<&mut $ty, HostError> {
            let e = self.envs.get(&env.0).ok_or(HostError::UnknownEnvironment { env: env.0 })?;
            match check_access_mut(&mut self.registry, &e.caps, id, ResourceKind::$variant)? {
                Resource::$variant(r) => Ok(r),
                other => Err(mismatch(id, ResourceKind::$variant, &*other)),
            }
        }
    };
}

fn mismatch(id: ResourceId, expected: ResourceKind, actual: &Resource) -> HostError {
    AccessError::TypeMismatch {
        id,
        expected,
        actual: actual.kind(),
    }
    .into()
}

impl World {
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            registry: ResourceRegistry::new(),
            envs: HashMap::new(),
            next_env: 0,
            physics: Box::new(NullPhysics::default()),
            input: Box::new(NullInput),
            audio: Box::new(NullAudio::default()),
            transforms: Box::new(NullTransforms),
        }
    }

    // --- environment lifecycle -------------------------------------------

    /// Load a fresh environment: allocate its shared memory and hand it a
    /// root scene it owns.
    pub fn load_environment(&mut self) -> EnvId {
        self.next_env += 1;
        let id = EnvId(self.next_env);
        let mut env = ScriptEnvironment::new(id, self.config.guest_memory_len);
        let scene = self.registry.register(Resource::Scene(Scene::default()));
        env.caps.authorize(scene);
        env.owned.authorize(scene);
        env.scene = scene;
        self.envs.insert(id.0, env);
        log::info!("loaded {id} with root scene {scene}");
        id
    }

    /// Tear an environment down: revoke its whole capability set and release
    /// every resource it exclusively owns, atomically from the point of view
    /// of other callers. Unloading an unknown or already-unloaded
    /// environment is a no-op.
    pub fn unload_environment(&mut self, env: EnvId) {
        let Some(mut e) = self.envs.remove(&env.0) else {
            log::debug!("unload of {env}: not loaded, nothing to do");
            return;
        };
        let owned = e.owned.drain_sorted();

        // Unlink first, while every resource is still registered, so foreign
        // neighbors in a sibling chain are never left pointing at a dead id.
        for &id in &owned {
            match self.registry.kind_of(id) {
                Some(ResourceKind::Node) => {
                    let _ = bridge::detach_from_parent(&mut self.registry, id);
                    bridge::orphan_node_children(&mut self.registry, id);
                }
                Some(ResourceKind::Scene) => {
                    bridge::orphan_scene_nodes(&mut self.registry, id);
                }
                Some(
                    ResourceKind::UiElement | ResourceKind::UiButton | ResourceKind::UiText,
                ) => {
                    let _ = bridge::ui_detach_from_parent(&mut self.registry, id);
                    bridge::orphan_ui_children(&mut self.registry, id);
                }
                _ => {}
            }
        }

        for id in owned {
            let Some(resource) = self.registry.unregister(id) else {
                continue;
            };
            match resource {
                Resource::Node(node) => {
                    if let Some((_, body)) = node.body {
                        self.physics.destroy_body(body);
                    }
                    if let Some(emitter) = node.audio_emitter {
                        self.audio.release_emitter(emitter);
                    }
                }
                Resource::UiCanvas(canvas) => {
                    self.physics.destroy_body(canvas.physics_body);
                }
                _ => {}
            }
        }
        log::info!("unloaded {env}");
    }

    /// Host-mediated sharing: make `id` visible to `env` without moving
    /// ownership. The resource is still released by (and only by) its
    /// creator.
    pub fn grant(&mut self, env: EnvId, id: ResourceId) -> Result<(), HostError> {
        if !self.registry.contains(id) {
            return Err(AccessError::NotFound { id }.into());
        }
        self.env_mut(env)?.caps.authorize(id);
        Ok(())
    }

    pub fn env(&self, env: EnvId) -> Result<&ScriptEnvironment, HostError> {
        self.envs
            .get(&env.0)
            .ok_or(HostError::UnknownEnvironment { env: env.0 })
    }

    pub fn env_mut(&mut self, env: EnvId) -> Result<&mut ScriptEnvironment, HostError> {
        self.envs
            .get_mut(&env.0)
            .ok_or(HostError::UnknownEnvironment { env: env.0 })
    }

    /// Split borrow used by decode paths: guest memory mutably (for the
    /// cursor), capabilities and registry shared (for handle checks).
    pub fn decode_parts(
        &mut self,
        env: EnvId,
    ) -> Result<(&mut [u8], &CapabilitySet, &ResourceRegistry), HostError> {
        let e = self
            .envs
            .get_mut(&env.0)
            .ok_or(HostError::UnknownEnvironment { env: env.0 })?;
        Ok((&mut e.memory, &e.caps, &self.registry))
    }

    /// The embedder exposes this buffer to the guest runtime.
    pub fn guest_memory_mut(&mut self, env: EnvId) -> Result<&mut [u8], HostError> {
        Ok(&mut self.env_mut(env)?.memory)
    }

    // --- resource insertion ----------------------------------------------

    /// Register a resource created by `env` and authorize it to its creator.
    pub fn insert_owned(&mut self, env: EnvId, resource: Resource) -> Result<ResourceId, HostError> {
        self.reserve_owned(env, 1)?;
        let e = self
            .envs
            .get_mut(&env.0)
            .ok_or(HostError::UnknownEnvironment { env: env.0 })?;
        let id = self.registry.register(resource);
        e.caps.authorize(id);
        e.owned.authorize(id);
        Ok(id)
    }

    /// Quota check for a multi-part construction, done before the first
    /// registration so a failure can never strand partial parts.
    pub fn reserve_owned(&self, env: EnvId, count: usize) -> Result<(), HostError> {
        let e = self.env(env)?;
        let quota = self.config.env_resource_quota;
        if e.owned.len() + count > quota {
            return Err(HostError::QuotaExceeded { quota });
        }
        Ok(())
    }

    // --- guest memory helpers --------------------------------------------

    pub fn read_guest_f32s<const N: usize>(
        &mut self,
        env: EnvId,
        ptr: u32,
    ) -> Result<[f32; N], HostError> {
        let e = self.env_mut(env)?;
        let mut cur = MemCursor::new(&mut e.memory);
        cur.move_to(ptr as usize)?;
        cur.read_f32_array::<N>()
    }

    pub fn write_guest_f32s(
        &mut self,
        env: EnvId,
        ptr: u32,
        values: &[f32],
    ) -> Result<(), HostError> {
        let e = self.env_mut(env)?;
        let mut cur = MemCursor::new(&mut e.memory);
        cur.move_to(ptr as usize)?;
        cur.write_f32_slice(values)
    }

    pub fn write_guest_u32s(
        &mut self,
        env: EnvId,
        ptr: u32,
        values: &[u32],
    ) -> Result<(), HostError> {
        let e = self.env_mut(env)?;
        let mut cur = MemCursor::new(&mut e.memory);
        cur.move_to(ptr as usize)?;
        cur.write_u32_slice(values)
    }

    pub fn read_guest_utf8(
        &mut self,
        env: EnvId,
        ptr: u32,
        len: u32,
    ) -> Result<String, HostError> {
        let e = self.env_mut(env)?;
        let cur = MemCursor::new(&mut e.memory);
        cur.read_utf8(ptr as usize, len as usize)
    }

    // --- checked typed accessors -----------------------------------------

    checked_accessor!(node, node_mut, Node, Node);
    checked_accessor!(scene, scene_mut, Scene, Scene);
    checked_accessor!(mesh, mesh_mut, Mesh, Mesh);
    checked_accessor!(mesh_primitive, mesh_primitive_mut, MeshPrimitive, MeshPrimitive);
    checked_accessor!(accessor, accessor_mut, Accessor, Accessor);
    checked_accessor!(buffer, buffer_mut, Buffer, Buffer);
    checked_accessor!(buffer_view, buffer_view_mut, BufferView, BufferView);
    checked_accessor!(material, material_mut, Material, Material);
    checked_accessor!(texture, texture_mut, Texture, Texture);
    checked_accessor!(light, light_mut, Light, Light);
    checked_accessor!(collider, collider_mut, Collider, Collider);
    checked_accessor!(interactable, interactable_mut, Interactable, Interactable);
    checked_accessor!(ui_canvas, ui_canvas_mut, UiCanvas, UiCanvas);
    checked_accessor!(ui_element, ui_element_mut, UiElement, UiElement);
    checked_accessor!(ui_button, ui_button_mut, UiButton, UiButton);
    checked_accessor!(ui_text, ui_text_mut, UiText, UiText);

    /// Access check for handles that may be any of the three UI element
    /// kinds (plain element, button, text).
    pub fn check_ui_like(&self, env: EnvId, id: ResourceId) -> Result<(), HostError> {
        let e = self.env(env)?;
        let resource = self
            .registry
            .lookup(id)
            .ok_or(AccessError::NotFound { id })?;
        if !e.caps.contains(id) {
            return Err(AccessError::NotAuthorized { id }.into());
        }
        match resource.kind() {
            ResourceKind::UiElement | ResourceKind::UiButton | ResourceKind::UiText => Ok(()),
            actual => Err(AccessError::TypeMismatch {
                id,
                expected: ResourceKind::UiElement,
                actual,
            }
            .into()),
        }
    }

    // --- filtered queries -------------------------------------------------

    /// Lowest-id resource of `kind` named `name` among the ids the caller
    /// can see. Foreign resources with the same name stay invisible.
    pub fn find_by_name(
        &self,
        env: EnvId,
        kind: ResourceKind,
        name: &str,
    ) -> Result<ResourceId, HostError> {
        let e = self.env(env)?;
        for id in e.caps.ids_sorted() {
            if let Some(r) = self.registry.lookup(id) {
                if r.kind() == kind && r.name() == Some(name) {
                    return Ok(id);
                }
            }
        }
        Ok(NIL_RESOURCE_ID)
    }

    // --- per-tick collaborator mirroring ----------------------------------

    /// Refresh every interactable's pressed/held/released snapshot from the
    /// input collaborator. Called by the embedder once per simulation tick.
    pub fn tick_input(&mut self) {
        let targets: Vec<(ResourceId, ResourceId)> = self
            .registry
            .iter()
            .filter_map(|(id, r)| match r {
                Resource::Interactable(i) => Some((id, i.node)),
                _ => None,
            })
            .collect();
        for (id, node) in targets {
            let state = self.input.poll(node);
            if let Some(Resource::Interactable(i)) = self.registry.lookup_mut(id) {
                i.state = state;
            }
        }
    }
}
