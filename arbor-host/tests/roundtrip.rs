//! Bit-exact round-trips: every value a guest writes through a `set` call
//! must read back identically through the matching `get` call, across the
//! vector widths the ABI uses (2, 3, 4 and 16 floats).

mod common;

use common::{create_node, host, peek_f32s, poke, poke_f32s, ui_canvas_block};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const IN_PTR: u32 = 2048;
const OUT_PTR: u32 = 4096;
const ROUNDS: usize = 2500;

fn random_vec(rng: &mut SmallRng, n: usize) -> Vec<f32> {
    (0..n).map(|_| (rng.gen::<f32>() - 0.5) * 2.0e6).collect()
}

fn assert_bits_eq(sent: &[f32], got: &[f32]) {
    assert_eq!(sent.len(), got.len());
    for (a, b) in sent.iter().zip(got.iter()) {
        assert_eq!(a.to_bits(), b.to_bits(), "{a} != {b} after round-trip");
    }
}

#[test]
fn vec3_translation_round_trips() {
    let mut h = host();
    let env = h.load_environment();
    let node = create_node(&mut h, env);
    let mut rng = SmallRng::seed_from_u64(3);

    for _ in 0..ROUNDS {
        let sent = random_vec(&mut rng, 3);
        poke_f32s(&mut h, env, IN_PTR, &sent);
        assert_eq!(h.syscall(env, "node_set_translation", &[node, IN_PTR]), 0);
        assert_eq!(h.syscall(env, "node_get_translation", &[node, OUT_PTR]), 0);
        assert_bits_eq(&sent, &peek_f32s(&mut h, env, OUT_PTR, 3));
    }
}

#[test]
fn vec4_rotation_and_color_round_trip() {
    let mut h = host();
    let env = h.load_environment();
    let node = create_node(&mut h, env);

    let block = common::material_block(0);
    poke(&mut h, env, 0, &block);
    let material = h.syscall(env, "world_create_material", &[0]) as u32;
    assert!(material > 0);

    let mut rng = SmallRng::seed_from_u64(4);
    for round in 0..ROUNDS {
        let sent = random_vec(&mut rng, 4);
        poke_f32s(&mut h, env, IN_PTR, &sent);
        if round % 2 == 0 {
            assert_eq!(h.syscall(env, "node_set_rotation", &[node, IN_PTR]), 0);
            assert_eq!(h.syscall(env, "node_get_rotation", &[node, OUT_PTR]), 0);
        } else {
            assert_eq!(
                h.syscall(env, "material_set_base_color_factor", &[material, IN_PTR]),
                0
            );
            assert_eq!(
                h.syscall(env, "material_get_base_color_factor", &[material, OUT_PTR]),
                0
            );
        }
        assert_bits_eq(&sent, &peek_f32s(&mut h, env, OUT_PTR, 4));
    }
}

#[test]
fn vec2_canvas_size_round_trips() {
    let mut h = host();
    let env = h.load_environment();
    let block = ui_canvas_block();
    poke(&mut h, env, 0, &block);
    let canvas = h.syscall(env, "world_create_ui_canvas", &[0]) as u32;
    assert!(canvas > 0);

    let mut rng = SmallRng::seed_from_u64(2);
    for _ in 0..ROUNDS {
        let sent = random_vec(&mut rng, 2);
        poke_f32s(&mut h, env, IN_PTR, &sent);
        assert_eq!(h.syscall(env, "ui_canvas_set_size", &[canvas, IN_PTR]), 0);
        assert_eq!(h.syscall(env, "ui_canvas_get_size", &[canvas, OUT_PTR]), 0);
        assert_bits_eq(&sent, &peek_f32s(&mut h, env, OUT_PTR, 2));
    }
}

#[test]
fn mat16_local_matrix_round_trips() {
    let mut h = host();
    let env = h.load_environment();
    let node = create_node(&mut h, env);
    let mut rng = SmallRng::seed_from_u64(16);

    for _ in 0..ROUNDS {
        let sent = random_vec(&mut rng, 16);
        poke_f32s(&mut h, env, IN_PTR, &sent);
        assert_eq!(h.syscall(env, "node_set_local_matrix", &[node, IN_PTR]), 0);
        assert_eq!(h.syscall(env, "node_get_local_matrix", &[node, OUT_PTR]), 0);
        assert_bits_eq(&sent, &peek_f32s(&mut h, env, OUT_PTR, 16));
    }
}

#[test]
fn scalar_factors_round_trip() {
    let mut h = host();
    let env = h.load_environment();
    let block = common::material_block(0);
    poke(&mut h, env, 0, &block);
    let material = h.syscall(env, "world_create_material", &[0]) as u32;

    let mut rng = SmallRng::seed_from_u64(1);
    for _ in 0..500 {
        let sent = random_vec(&mut rng, 1);
        poke_f32s(&mut h, env, IN_PTR, &sent);
        assert_eq!(
            h.syscall(env, "material_set_metallic_factor", &[material, IN_PTR]),
            0
        );
        assert_eq!(
            h.syscall(env, "material_get_metallic_factor", &[material, OUT_PTR]),
            0
        );
        assert_bits_eq(&sent, &peek_f32s(&mut h, env, OUT_PTR, 1));
    }
}
