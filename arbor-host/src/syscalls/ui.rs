//! UI canvas, element, button and text calls.

use anyhow::Result;

use arbor_core::resource::{InteractableState, Resource};
use arbor_core::types::NIL_RESOURCE_ID;

use crate::bridge;
use crate::environment::EnvId;
use crate::syscalls::syscall;
use crate::world::World;

syscall!(UiCanvasGetRoot, ui_canvas_get_root);
syscall!(UiCanvasSetRoot, ui_canvas_set_root);
syscall!(UiCanvasGetSize, ui_canvas_get_size);
syscall!(UiCanvasSetSize, ui_canvas_set_size);
syscall!(UiCanvasGetWidth, ui_canvas_get_width);
syscall!(UiCanvasSetWidth, ui_canvas_set_width);
syscall!(UiCanvasGetHeight, ui_canvas_get_height);
syscall!(UiCanvasSetHeight, ui_canvas_set_height);
syscall!(UiCanvasRedraw, ui_canvas_redraw);
syscall!(UiElementAddChild, ui_element_add_child);
syscall!(UiElementRemoveChild, ui_element_remove_child);
syscall!(UiElementGetParent, ui_element_get_parent);
syscall!(UiButtonGetPressed, ui_button_get_pressed);
syscall!(UiTextSetValue, ui_text_set_value);

fn ui_canvas_get_root(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    Ok(world.ui_canvas(env, args[0])?.root as i32)
}

fn ui_canvas_set_root(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, root) = (args[0], args[1]);
    if root != NIL_RESOURCE_ID {
        world.check_ui_like(env, root)?;
    }
    world.ui_canvas_mut(env, id)?.root = root;
    Ok(0)
}

fn ui_canvas_get_size(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let values = world.ui_canvas(env, args[0])?.size;
    world.write_guest_f32s(env, args[1], &values)?;
    Ok(0)
}

fn ui_canvas_set_size(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.ui_canvas(env, args[0])?;
    let values = world.read_guest_f32s::<2>(env, args[1])?;
    world.ui_canvas_mut(env, args[0])?.size = values;
    Ok(0)
}

fn ui_canvas_get_width(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let value = world.ui_canvas(env, args[0])?.width;
    world.write_guest_f32s(env, args[1], &[value])?;
    Ok(0)
}

fn ui_canvas_set_width(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.ui_canvas(env, args[0])?;
    let [value] = world.read_guest_f32s::<1>(env, args[1])?;
    world.ui_canvas_mut(env, args[0])?.width = value;
    Ok(0)
}

fn ui_canvas_get_height(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let value = world.ui_canvas(env, args[0])?.height;
    world.write_guest_f32s(env, args[1], &[value])?;
    Ok(0)
}

fn ui_canvas_set_height(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.ui_canvas(env, args[0])?;
    let [value] = world.read_guest_f32s::<1>(env, args[1])?;
    world.ui_canvas_mut(env, args[0])?.height = value;
    Ok(0)
}

fn ui_canvas_redraw(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    world.ui_canvas_mut(env, args[0])?.redraw_requested = true;
    Ok(0)
}

fn ui_element_add_child(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (parent, child) = (args[0], args[1]);
    world.check_ui_like(env, parent)?;
    world.check_ui_like(env, child)?;
    bridge::ui_attach(&mut world.registry, parent, child)?;
    Ok(0)
}

fn ui_element_remove_child(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (parent, child) = (args[0], args[1]);
    world.check_ui_like(env, parent)?;
    world.check_ui_like(env, child)?;
    bridge::ui_detach(&mut world.registry, parent, child)?;
    Ok(0)
}

fn ui_element_get_parent(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let id = args[0];
    world.check_ui_like(env, id)?;
    let parent = world
        .registry
        .lookup(id)
        .and_then(Resource::ui_element)
        .map_or(NIL_RESOURCE_ID, |e| e.parent);
    let visible = parent != NIL_RESOURCE_ID && world.env(env)?.caps.contains(parent);
    Ok(if visible { parent as i32 } else { 0 })
}

fn ui_button_get_pressed(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let interactable = world.ui_button(env, args[0])?.interactable;
    let pressed = match world.registry.lookup(interactable) {
        Some(Resource::Interactable(i)) => i.state.contains(InteractableState::PRESSED),
        _ => false,
    };
    Ok(pressed as i32)
}

fn ui_text_set_value(world: &mut World, env: EnvId, args: &[u32]) -> Result<i32> {
    let (id, ptr, len) = (args[0], args[1], args[2]);
    world.ui_text(env, id)?;
    let value = world.read_guest_utf8(env, ptr, len)?;
    world.ui_text_mut(env, id)?.value = value;
    Ok(0)
}
