//! Cross-environment isolation: a handle only works for the environment that
//! owns it or was granted it, and every filtered view hides foreign ids.

mod common;

use common::{create_node, host, named_node_block, peek_f32s, poke, poke_f32s};

#[test]
fn foreign_handles_fail_closed_and_own_handles_work() {
    let mut h = host();
    let env_a = h.load_environment();
    let env_b = h.load_environment();

    let node = create_node(&mut h, env_a);

    // B cannot see A's node, whatever the call
    assert_eq!(h.syscall(env_b, "node_set_visible", &[node, 1]), -1);
    assert_eq!(h.syscall(env_b, "node_get_visible", &[node]), -1);

    // A flips the flag itself
    assert_eq!(h.syscall(env_a, "node_set_visible", &[node, 0]), 0);
    assert_eq!(h.syscall(env_a, "node_get_visible", &[node]), 0);
    assert_eq!(h.syscall(env_a, "node_set_visible", &[node, 1]), 0);
    assert_eq!(h.syscall(env_a, "node_get_visible", &[node]), 1);
}

#[test]
fn denied_calls_mutate_nothing() {
    let mut h = host();
    let env_a = h.load_environment();
    let env_b = h.load_environment();

    let node = create_node(&mut h, env_a);
    poke_f32s(&mut h, env_a, 2048, &[1.0, 2.0, 3.0]);
    assert_eq!(h.syscall(env_a, "node_set_translation", &[node, 2048]), 0);

    // B stages different values in its own memory and is denied
    poke_f32s(&mut h, env_b, 2048, &[9.0, 9.0, 9.0]);
    assert_eq!(h.syscall(env_b, "node_set_translation", &[node, 2048]), -1);

    assert_eq!(h.syscall(env_a, "node_get_translation", &[node, 4096]), 0);
    assert_eq!(peek_f32s(&mut h, env_a, 4096, 3), vec![1.0, 2.0, 3.0]);
}

#[test]
fn granted_handles_work_but_stay_owned() {
    let mut h = host();
    let env_a = h.load_environment();
    let env_b = h.load_environment();

    let node = create_node(&mut h, env_a);
    assert_eq!(h.syscall(env_b, "node_get_visible", &[node]), -1);

    h.grant(env_b, node).unwrap();
    assert_eq!(h.syscall(env_b, "node_get_visible", &[node]), 1);

    // grantee unload leaves the owner untouched
    h.unload_environment(env_b);
    assert_eq!(h.syscall(env_a, "node_get_visible", &[node]), 1);
}

#[test]
fn scene_counts_are_filtered_per_caller() {
    let mut h = host();
    let env_a = h.load_environment();
    let env_b = h.load_environment();

    let scene = h.syscall(env_a, "world_get_environment_scene", &[]) as u32;
    assert!(scene > 0);

    let nodes: Vec<u32> = (0..5).map(|_| create_node(&mut h, env_a)).collect();
    for &n in &nodes {
        assert_eq!(h.syscall(env_a, "scene_add_node", &[scene, n]), 0);
    }

    h.grant(env_b, scene).unwrap();
    for &n in &nodes[..3] {
        h.grant(env_b, n).unwrap();
    }

    assert_eq!(h.syscall(env_a, "scene_get_node_count", &[scene]), 5);
    assert_eq!(h.syscall(env_b, "scene_get_node_count", &[scene]), 3);

    // indexed access skips hidden entries instead of renumbering them away
    assert_eq!(
        h.syscall(env_b, "scene_get_node_at", &[scene, 0]) as u32,
        nodes[0]
    );
    assert_eq!(
        h.syscall(env_b, "scene_get_node_at", &[scene, 2]) as u32,
        nodes[2]
    );
    assert_eq!(h.syscall(env_b, "scene_get_node_at", &[scene, 3]), 0);

    // the listing agrees with the count
    assert_eq!(h.syscall(env_b, "scene_get_nodes", &[scene, 1024, 16]), 3);
    assert_eq!(
        common::peek_u32s(&mut h, env_b, 1024, 3),
        nodes[..3].to_vec()
    );
}

#[test]
fn find_by_name_only_sees_authorized_resources() {
    let mut h = host();
    let env_a = h.load_environment();
    let env_b = h.load_environment();

    let block = named_node_block(&mut h, env_a, "lamp", 1024);
    poke(&mut h, env_a, 0, &block);
    let node = h.syscall(env_a, "world_create_node", &[0]) as u32;
    assert!(node > 0);

    poke(&mut h, env_a, 1024, "lamp".as_bytes());
    assert_eq!(
        h.syscall(env_a, "world_find_node_by_name", &[1024, 4]) as u32,
        node
    );

    poke(&mut h, env_b, 1024, "lamp".as_bytes());
    assert_eq!(h.syscall(env_b, "world_find_node_by_name", &[1024, 4]), 0);

    h.grant(env_b, node).unwrap();
    assert_eq!(
        h.syscall(env_b, "world_find_node_by_name", &[1024, 4]) as u32,
        node
    );
}

#[test]
fn hierarchy_mutation_needs_both_handles() {
    let mut h = host();
    let env_a = h.load_environment();
    let env_b = h.load_environment();

    let parent = create_node(&mut h, env_a);
    let child = create_node(&mut h, env_a);
    let foreign = create_node(&mut h, env_b);

    assert_eq!(h.syscall(env_a, "node_add_child", &[parent, child]), 0);
    assert_eq!(h.syscall(env_a, "node_get_child_count", &[parent]), 1);

    // B owns `foreign` but not `parent`; A cannot attach B's node either
    assert_eq!(h.syscall(env_b, "node_add_child", &[parent, foreign]), -1);
    assert_eq!(h.syscall(env_a, "node_add_child", &[parent, foreign]), -1);
    assert_eq!(h.syscall(env_a, "node_get_child_count", &[parent]), 1);

    assert_eq!(
        h.syscall(env_a, "node_get_parent", &[child]) as u32,
        parent
    );
}

#[test]
fn unknown_calls_and_bad_argc_return_the_sentinel() {
    let mut h = host();
    let env = h.load_environment();
    assert_eq!(h.syscall(env, "node_levitate", &[1]), -1);
    assert_eq!(h.syscall(env, "node_set_visible", &[1]), -1);
    // handle-returning calls fail with 0
    assert_eq!(h.syscall(env, "world_create_node", &[0, 0]), 0);
}
