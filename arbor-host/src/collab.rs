//! Collaborator interfaces the host consumes.
//!
//! The core never simulates physics, samples input, or mixes audio; it calls
//! into these traits and stores the opaque handles they return. The `Null*`
//! implementations are used by tests and by embedders that run headless.

use arbor_core::resource::{Collider, ExternHandle, InteractableState};
use arbor_core::types::{BodyKind, ResourceId};

/// A contact reported by the physics collaborator since the last drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: ResourceId,
    pub b: ResourceId,
    pub started: bool,
}

pub trait PhysicsWorld {
    /// Create a body for `node` with the given collider shape.
    fn create_body(
        &mut self,
        node: ResourceId,
        kind: BodyKind,
        collider: &Collider,
    ) -> anyhow::Result<ExternHandle>;

    /// Create the flat interaction panel backing a UI canvas.
    fn create_panel(&mut self, size: [f32; 2]) -> anyhow::Result<ExternHandle>;

    fn destroy_body(&mut self, body: ExternHandle);

    /// Cast a ray; returns the hit node and distance, nearest first.
    fn ray_cast(&self, origin: [f32; 3], direction: [f32; 3]) -> Option<(ResourceId, f32)>;

    /// Contacts accumulated since the previous call.
    fn drain_contacts(&mut self) -> Vec<ContactEvent>;
}

pub trait InputBindings {
    /// Current interaction state for the interactable attached to `node`.
    fn poll(&mut self, node: ResourceId) -> InteractableState;
}

pub trait AudioEmitters {
    fn create_emitter(&mut self, node: ResourceId) -> anyhow::Result<ExternHandle>;
    fn release_emitter(&mut self, emitter: ExternHandle);
}

pub trait TransformGraph {
    /// World-space matrix of a node, column-major.
    fn world_matrix(&self, node: ResourceId) -> [f32; 16];
}

#[derive(Debug, Default)]
pub struct NullPhysics {
    next_handle: ExternHandle,
}

impl PhysicsWorld for NullPhysics {
    fn create_body(
        &mut self,
        _node: ResourceId,
        _kind: BodyKind,
        _collider: &Collider,
    ) -> anyhow::Result<ExternHandle> {
        self.next_handle += 1;
        Ok(self.next_handle)
    }

    fn create_panel(&mut self, _size: [f32; 2]) -> anyhow::Result<ExternHandle> {
        self.next_handle += 1;
        Ok(self.next_handle)
    }

    fn destroy_body(&mut self, _body: ExternHandle) {}

    fn ray_cast(&self, _origin: [f32; 3], _direction: [f32; 3]) -> Option<(ResourceId, f32)> {
        None
    }

    fn drain_contacts(&mut self) -> Vec<ContactEvent> {
        Vec::new()
    }
}

#[derive(Debug, Default)]
pub struct NullInput;

impl InputBindings for NullInput {
    fn poll(&mut self, _node: ResourceId) -> InteractableState {
        InteractableState::empty()
    }
}

#[derive(Debug, Default)]
pub struct NullAudio {
    next_handle: ExternHandle,
}

impl AudioEmitters for NullAudio {
    fn create_emitter(&mut self, _node: ResourceId) -> anyhow::Result<ExternHandle> {
        self.next_handle += 1;
        Ok(self.next_handle)
    }

    fn release_emitter(&mut self, _emitter: ExternHandle) {}
}

#[derive(Debug, Default)]
pub struct NullTransforms;

impl TransformGraph for NullTransforms {
    fn world_matrix(&self, _node: ResourceId) -> [f32; 16] {
        glam::Mat4::IDENTITY.to_cols_array()
    }
}
