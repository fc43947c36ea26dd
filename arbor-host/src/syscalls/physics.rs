//! Physics body, interactable, and physics query calls.

use anyhow::Result;

use arbor_core::resource::{Interactable, InteractableState, Resource};
use arbor_core::types::NIL_RESOURCE_ID;

use crate::environment::EnvId;
use crate::marshal;
use crate::syscalls::{decode_at, syscall};
use crate::world::World;

syscall!(NodeAddPhysicsBody, node_add_physics_body);
syscall!(NodeRemovePhysicsBody, node_remove_physics_body);
syscall!(NodeAddInteractable, node_add_interactable);
syscall!(NodeRemoveInteractable, node_remove_interactable);
syscall!(NodeHasInteractable, node_has_interactable);
syscall!(NodeGetInteractablePressed, node_get_interactable_pressed);
syscall!(NodeGetInteractableHeld, node_get_interactable_held);
syscall!(NodeGetInteractableReleased, node_get_interactable_released);
syscall!(PhysicsRayCast, physics_ray_cast);
syscall!(PhysicsDrainContacts, physics_drain_contacts);

/// Attaching a body needs a collider on the node; the collaborator call is
/// the only fallible step and happens before the node is touched.
fn node_add_physics_body(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, props_ptr) = (args[0], args[1]);
    let kind = decode_at(world, env, props_ptr, |cur, _| {
        marshal::physics::decode_body(cur)
    })?;

    let node = world.node(env, id)?;
    if node.body.is_some() {
        anyhow::bail!("node {id} already has a physics body");
    }
    let collider_id = node.collider;
    if collider_id == NIL_RESOURCE_ID {
        anyhow::bail!("node {id} has no collider to build a body from");
    }
    let collider = match world.registry.lookup(collider_id) {
        Some(Resource::Collider(c)) => c.clone(),
        _ => anyhow::bail!("node {id} collider {collider_id} is gone"),
    };

    let body = world.physics.create_body(id, kind, &collider)?;
    world.node_mut(env, id)?.body = Some((kind, body));
    Ok(0)
}

fn node_remove_physics_body(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let id = args[0];
    let Some((_, body)) = world.node_mut(env, id)?.body.take() else {
        anyhow::bail!("node {id} has no physics body");
    };
    world.physics.destroy_body(body);
    Ok(0)
}

fn node_add_interactable(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, props_ptr) = (args[0], args[1]);
    let kind = decode_at(world, env, props_ptr, |cur, _| {
        marshal::physics::decode_interactable(cur)
    })?;
    if world.node(env, id)?.interactable != NIL_RESOURCE_ID {
        anyhow::bail!("node {id} already has an interactable");
    }
    let interactable = world.insert_owned(
        env,
        Resource::Interactable(Interactable {
            kind,
            node: id,
            state: InteractableState::empty(),
        }),
    )?;
    world.node_mut(env, id)?.interactable = interactable;
    Ok(0)
}

fn node_remove_interactable(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let id = args[0];
    let interactable = world.node(env, id)?.interactable;
    if interactable == NIL_RESOURCE_ID {
        anyhow::bail!("node {id} has no interactable");
    }
    world.node_mut(env, id)?.interactable = NIL_RESOURCE_ID;
    world.registry.unregister(interactable);
    let e = world.env_mut(env)?;
    e.caps.revoke(interactable);
    e.owned.revoke(interactable);
    Ok(0)
}

fn node_has_interactable(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    Ok((world.node(env, args[0])?.interactable != NIL_RESOURCE_ID) as i32)
}

fn interactable_state(world: &World, env: EnvId, node: u32) -> Result<InteractableState> {
    let interactable = world.node(env, node)?.interactable;
    Ok(match world.registry.lookup(interactable) {
        Some(Resource::Interactable(i)) => i.state,
        _ => InteractableState::empty(),
    })
}

fn node_get_interactable_pressed(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    Ok(interactable_state(world, env, args[0])?.contains(InteractableState::PRESSED) as i32)
}

fn node_get_interactable_held(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    Ok(interactable_state(world, env, args[0])?.contains(InteractableState::HELD) as i32)
}

fn node_get_interactable_released(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    Ok(interactable_state(world, env, args[0])?.contains(InteractableState::RELEASED) as i32)
}

/// Ray cast against the collaborator; a hit on a node the caller cannot see
/// reads as a miss.
fn physics_ray_cast(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let origin = world.read_guest_f32s::<3>(env, args[0])?;
    let direction = world.read_guest_f32s::<3>(env, args[1])?;
    let Some((hit, _distance)) = world.physics.ray_cast(origin, direction) else {
        return Ok(0);
    };
    let visible = world.env(env)?.caps.contains(hit);
    Ok(if visible { hit as i32 } else { 0 })
}

/// Drain contact events, reporting only pairs fully visible to the caller as
/// (a, b, started) u32 triples.
fn physics_drain_contacts(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (out_ptr, max) = (args[0], args[1]);
    let events = world.physics.drain_contacts();
    let caps = &world.env(env)?.caps;
    let mut words = Vec::new();
    let mut written = 0u32;
    for event in events {
        if written == max {
            break;
        }
        if caps.contains(event.a) && caps.contains(event.b) {
            words.extend_from_slice(&[event.a, event.b, event.started as u32]);
            written += 1;
        }
    }
    world.write_guest_u32s(env, out_ptr, &words)?;
    Ok(written as i32)
}
