//! Environment teardown: unloading revokes the whole capability set, releases
//! owned resources and their collaborator side-objects, and never touches
//! what other environments own.

mod common;

use std::cell::Cell;
use std::rc::Rc;

use arbor_core::resource::Collider;
use arbor_core::types::{BodyKind, ResourceId};
use arbor_host::collab::{ContactEvent, PhysicsWorld};
use common::{create_node, host, poke, ui_canvas_block, BlockBuilder};

/// Physics double whose live-body count the test can watch from outside.
struct CountingPhysics {
    next: u64,
    live: Rc<Cell<usize>>,
}

impl PhysicsWorld for CountingPhysics {
    fn create_body(
        &mut self,
        _node: ResourceId,
        _kind: BodyKind,
        _collider: &Collider,
    ) -> anyhow::Result<u64> {
        self.next += 1;
        self.live.set(self.live.get() + 1);
        Ok(self.next)
    }

    fn create_panel(&mut self, _size: [f32; 2]) -> anyhow::Result<u64> {
        self.next += 1;
        self.live.set(self.live.get() + 1);
        Ok(self.next)
    }

    fn destroy_body(&mut self, _body: u64) {
        self.live.set(self.live.get() - 1);
    }

    fn ray_cast(&self, _origin: [f32; 3], _direction: [f32; 3]) -> Option<(ResourceId, f32)> {
        None
    }

    fn drain_contacts(&mut self) -> Vec<ContactEvent> {
        Vec::new()
    }
}

fn collider_block() -> Vec<u8> {
    BlockBuilder::new()
        .u32(0) // cuboid
        .u32(0) // not a trigger
        .f32s(&[1.0, 1.0, 1.0])
        .f32(0.0)
        .f32(0.0)
        .u32(0) // no mesh
        .no_extensions()
        .finish()
}

#[test]
fn unload_revokes_everything_the_environment_owned() {
    let mut h = host();
    let env_a = h.load_environment();
    let env_b = h.load_environment();

    let before = h.world.registry.len();
    let node = create_node(&mut h, env_a);
    let block = common::material_block(0);
    poke(&mut h, env_a, 0, &block);
    let material = h.syscall(env_a, "world_create_material", &[0]) as u32;
    assert!(material > 0);
    assert_eq!(h.world.registry.len(), before + 2);

    h.grant(env_b, node).unwrap();
    assert_eq!(h.syscall(env_b, "node_get_visible", &[node]), 1);

    h.unload_environment(env_a);

    // everything A owned is gone, for everyone, immediately
    assert_eq!(h.world.registry.len(), before - 1); // A's scene went too
    assert_eq!(h.syscall(env_b, "node_get_visible", &[node]), -1);
}

#[test]
fn unloading_twice_is_a_quiet_no_op() {
    let mut h = host();
    let env = h.load_environment();
    create_node(&mut h, env);
    h.unload_environment(env);
    let after_first = h.world.registry.len();
    h.unload_environment(env);
    assert_eq!(h.world.registry.len(), after_first);
}

#[test]
fn stale_ids_stay_dead_after_new_allocations() {
    let mut h = host();
    let env_a = h.load_environment();
    let stale = create_node(&mut h, env_a);
    h.unload_environment(env_a);

    let env_b = h.load_environment();
    let fresh = create_node(&mut h, env_b);
    assert_ne!(stale, fresh);
    // even a grant cannot revive an unregistered id
    assert!(h.grant(env_b, stale).is_err());
    assert_eq!(h.syscall(env_b, "node_get_visible", &[stale]), -1);
}

#[test]
fn collaborator_side_objects_are_released_on_unload() {
    let mut h = host();
    let live = Rc::new(Cell::new(0));
    h.world.physics = Box::new(CountingPhysics {
        next: 0,
        live: live.clone(),
    });

    let env = h.load_environment();

    // a canvas allocates an interaction panel
    let block = ui_canvas_block();
    poke(&mut h, env, 0, &block);
    let canvas = h.syscall(env, "world_create_ui_canvas", &[0]);
    assert!(canvas > 0);

    // a node with a collider gets a rigid body
    let node = create_node(&mut h, env);
    let cblock = collider_block();
    poke(&mut h, env, 256, &cblock);
    let collider = h.syscall(env, "world_create_collider", &[256]) as u32;
    assert!(collider > 0);
    assert_eq!(h.syscall(env, "node_set_collider", &[node, collider]), 0);
    let body_props = BlockBuilder::new().u32(2).no_extensions().finish();
    poke(&mut h, env, 512, &body_props);
    assert_eq!(h.syscall(env, "node_add_physics_body", &[node, 512]), 0);

    assert_eq!(live.get(), 2);
    h.unload_environment(env);
    assert_eq!(live.get(), 0);
}

#[test]
fn owner_teardown_detaches_surviving_foreign_children() {
    let mut h = host();
    let env_a = h.load_environment();
    let env_b = h.load_environment();

    // B's node sits under A's scene (B was granted the scene)
    let scene = h.syscall(env_a, "world_get_environment_scene", &[]) as u32;
    let foreign = create_node(&mut h, env_b);
    h.grant(env_b, scene).unwrap();
    assert_eq!(h.syscall(env_b, "scene_add_node", &[scene, foreign]), 0);

    h.unload_environment(env_a);

    // B's node survives, orphaned, and stays fully usable
    assert_eq!(h.syscall(env_b, "node_get_visible", &[foreign]), 1);
    assert_eq!(h.syscall(env_b, "node_get_parent", &[foreign]), 0);
}
