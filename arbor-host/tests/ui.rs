//! UI surface: canvas side effects, the element tree, button interaction
//! state.

mod common;

use arbor_core::resource::InteractableState;
use arbor_core::types::ResourceId;
use arbor_host::collab::InputBindings;
use common::{host, peek_f32s, poke, poke_f32s, ui_canvas_block, BlockBuilder};

struct AlwaysPressed;

impl InputBindings for AlwaysPressed {
    fn poll(&mut self, _node: ResourceId) -> InteractableState {
        InteractableState::PRESSED | InteractableState::HELD
    }
}

fn element_block() -> Vec<u8> {
    BlockBuilder::new()
        .f32s(&[0.0; 4]) // position
        .f32(100.0) // width
        .f32(40.0) // height
        .u32(2) // row
        .f32s(&[0.0; 4]) // padding
        .f32s(&[0.0; 4]) // margin
        .f32s(&[0.1, 0.1, 0.1, 1.0]) // background
        .f32s(&[0.0; 4]) // border
        .no_extensions()
        .finish()
}

fn button_block(h: &mut arbor_host::Host, env: arbor_host::EnvId, label: &str) -> Vec<u8> {
    poke(h, env, 1024, label.as_bytes());
    BlockBuilder::new()
        .f32s(&[0.0; 4])
        .f32(100.0)
        .f32(40.0)
        .u32(0)
        .f32s(&[0.0; 4])
        .f32s(&[0.0; 4])
        .f32s(&[0.0; 4])
        .f32s(&[0.0; 4])
        .u32(1024)
        .u32(label.len() as u32)
        .no_extensions()
        .finish()
}

#[test]
fn canvas_creation_registers_its_side_objects_atomically() {
    let mut h = host();
    let env = h.load_environment();
    let before = h.world.registry.len();

    let block = ui_canvas_block();
    poke(&mut h, env, 0, &block);
    let canvas = h.syscall(env, "world_create_ui_canvas", &[0]) as u32;
    assert!(canvas > 0);
    // canvas plus its interactable marker
    assert_eq!(h.world.registry.len(), before + 2);

    // an invalid flex-direction on an element leaves the registry alone
    let mut bad = element_block();
    bad[24..28].copy_from_slice(&9u32.to_le_bytes());
    poke(&mut h, env, 0, &bad);
    assert_eq!(h.syscall(env, "world_create_ui_element", &[0]), 0);
    assert_eq!(h.world.registry.len(), before + 2);
}

#[test]
fn element_tree_attach_detach_and_canvas_root() {
    let mut h = host();
    let env = h.load_environment();

    let block = ui_canvas_block();
    poke(&mut h, env, 0, &block);
    let canvas = h.syscall(env, "world_create_ui_canvas", &[0]) as u32;

    let block = element_block();
    poke(&mut h, env, 0, &block);
    let root = h.syscall(env, "world_create_ui_element", &[0]) as u32;
    poke(&mut h, env, 0, &element_block());
    let child = h.syscall(env, "world_create_ui_element", &[0]) as u32;
    assert!(root > 0 && child > 0);

    assert_eq!(h.syscall(env, "ui_canvas_set_root", &[canvas, root]), 0);
    assert_eq!(h.syscall(env, "ui_canvas_get_root", &[canvas]) as u32, root);

    assert_eq!(h.syscall(env, "ui_element_add_child", &[root, child]), 0);
    assert_eq!(h.syscall(env, "ui_element_get_parent", &[child]) as u32, root);

    // cycles are refused in the element tree too
    assert_eq!(h.syscall(env, "ui_element_add_child", &[child, root]), -1);

    assert_eq!(h.syscall(env, "ui_element_remove_child", &[root, child]), 0);
    assert_eq!(h.syscall(env, "ui_element_get_parent", &[child]), 0);

    // a node handle is not a UI element
    let node = common::create_node(&mut h, env);
    assert_eq!(h.syscall(env, "ui_canvas_set_root", &[canvas, node]), -1);
}

#[test]
fn canvas_scalar_props_and_redraw() {
    let mut h = host();
    let env = h.load_environment();
    let block = ui_canvas_block();
    poke(&mut h, env, 0, &block);
    let canvas = h.syscall(env, "world_create_ui_canvas", &[0]) as u32;

    poke_f32s(&mut h, env, 2048, &[800.0]);
    assert_eq!(h.syscall(env, "ui_canvas_set_width", &[canvas, 2048]), 0);
    poke_f32s(&mut h, env, 2048, &[600.0]);
    assert_eq!(h.syscall(env, "ui_canvas_set_height", &[canvas, 2048]), 0);

    assert_eq!(h.syscall(env, "ui_canvas_get_width", &[canvas, 4096]), 0);
    assert_eq!(peek_f32s(&mut h, env, 4096, 1), vec![800.0]);
    assert_eq!(h.syscall(env, "ui_canvas_get_height", &[canvas, 4096]), 0);
    assert_eq!(peek_f32s(&mut h, env, 4096, 1), vec![600.0]);

    assert_eq!(h.syscall(env, "ui_canvas_redraw", &[canvas]), 0);
    assert!(h.world.ui_canvas(env, canvas).unwrap().redraw_requested);
}

#[test]
fn button_state_follows_the_input_collaborator() {
    let mut h = host();
    let env = h.load_environment();

    let block = button_block(&mut h, env, "launch");
    poke(&mut h, env, 0, &block);
    let button = h.syscall(env, "world_create_ui_button", &[0]) as u32;
    assert!(button > 0);
    assert_eq!(h.world.ui_button(env, button).unwrap().label, "launch");

    // nothing pressed before the input mirror runs
    assert_eq!(h.syscall(env, "ui_button_get_pressed", &[button]), 0);

    h.world.input = Box::new(AlwaysPressed);
    h.tick_input();
    assert_eq!(h.syscall(env, "ui_button_get_pressed", &[button]), 1);
}

#[test]
fn text_value_updates_through_guest_memory() {
    let mut h = host();
    let env = h.load_environment();

    let value = "hello";
    poke(&mut h, env, 1024, value.as_bytes());
    let block = BlockBuilder::new()
        .f32s(&[0.0; 4])
        .f32(0.0)
        .f32(0.0)
        .u32(0)
        .f32s(&[0.0; 4])
        .f32s(&[0.0; 4])
        .f32s(&[0.0; 4])
        .f32s(&[0.0; 4])
        .u32(1024)
        .u32(value.len() as u32)
        .f32(14.0)
        .f32s(&[1.0, 1.0, 1.0, 1.0])
        .no_extensions()
        .finish();
    poke(&mut h, env, 0, &block);
    let text = h.syscall(env, "world_create_ui_text", &[0]) as u32;
    assert!(text > 0);
    assert_eq!(h.world.ui_text(env, text).unwrap().value, "hello");

    poke(&mut h, env, 1024, "goodbye".as_bytes());
    assert_eq!(h.syscall(env, "ui_text_set_value", &[text, 1024, 7]), 0);
    assert_eq!(h.world.ui_text(env, text).unwrap().value, "goodbye");

    // malformed UTF-8 is refused and the value survives
    poke(&mut h, env, 1024, &[0xC0, 0x80, 0xFF]);
    assert_eq!(h.syscall(env, "ui_text_set_value", &[text, 1024, 3]), -1);
    assert_eq!(h.world.ui_text(env, text).unwrap().value, "goodbye");
}
