//! Shared plumbing for the integration tests: a little-endian block builder
//! and guest-memory helpers, standing in for the guest runtime that would
//! normally fill shared memory.

#![allow(dead_code)]

use arbor_host::{EnvId, Host, HostConfig};

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn host() -> Host {
    init_logs();
    Host::new(HostConfig::default())
}

/// Builds a parameter block byte-by-byte, in field order.
#[derive(Default)]
pub struct BlockBuilder {
    bytes: Vec<u8>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u32(mut self, v: u32) -> Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f32(mut self, v: f32) -> Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f32s(mut self, vs: &[f32]) -> Self {
        for v in vs {
            self.bytes.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    /// Empty extensions table plus the 8-byte extras placeholder.
    pub fn no_extensions(self) -> Self {
        self.u32(0).u32(0).u32(0).u32(0)
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

pub fn poke(host: &mut Host, env: EnvId, at: u32, bytes: &[u8]) {
    let mem = host.world.guest_memory_mut(env).unwrap();
    mem[at as usize..at as usize + bytes.len()].copy_from_slice(bytes);
}

pub fn poke_f32s(host: &mut Host, env: EnvId, at: u32, values: &[f32]) {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    poke(host, env, at, &bytes);
}

pub fn peek_f32s(host: &mut Host, env: EnvId, at: u32, n: usize) -> Vec<f32> {
    let mem = host.world.guest_memory_mut(env).unwrap();
    (0..n)
        .map(|i| {
            let o = at as usize + i * 4;
            f32::from_le_bytes(mem[o..o + 4].try_into().unwrap())
        })
        .collect()
}

pub fn peek_u32s(host: &mut Host, env: EnvId, at: u32, n: usize) -> Vec<u32> {
    let mem = host.world.guest_memory_mut(env).unwrap();
    (0..n)
        .map(|i| {
            let o = at as usize + i * 4;
            u32::from_le_bytes(mem[o..o + 4].try_into().unwrap())
        })
        .collect()
}

/// Default node block: identity transform, visible, unnamed, no handles.
pub fn node_block() -> Vec<u8> {
    BlockBuilder::new()
        .f32s(&[0.0, 0.0, 0.0]) // translation
        .f32s(&[0.0, 0.0, 0.0, 1.0]) // rotation
        .f32s(&[1.0, 1.0, 1.0]) // scale
        .u32(1) // visible
        .u32(0)
        .u32(0) // name
        .u32(0) // mesh
        .u32(0) // light
        .u32(0) // collider
        .u32(0) // ui canvas
        .no_extensions()
        .finish()
}

/// Node block with a name already staged at `name_at`.
pub fn named_node_block(host: &mut Host, env: EnvId, name: &str, name_at: u32) -> Vec<u8> {
    poke(host, env, name_at, name.as_bytes());
    BlockBuilder::new()
        .f32s(&[0.0, 0.0, 0.0])
        .f32s(&[0.0, 0.0, 0.0, 1.0])
        .f32s(&[1.0, 1.0, 1.0])
        .u32(1)
        .u32(name_at)
        .u32(name.len() as u32)
        .u32(0)
        .u32(0)
        .u32(0)
        .u32(0)
        .no_extensions()
        .finish()
}

/// Default material block with a chosen alpha mode code.
pub fn material_block(alpha_mode: u32) -> Vec<u8> {
    BlockBuilder::new()
        .f32s(&[1.0, 1.0, 1.0, 1.0]) // base color factor
        .f32(1.0) // metallic
        .f32(1.0) // roughness
        .f32s(&[0.0, 0.0, 0.0]) // emissive
        .f32(0.5) // alpha cutoff
        .u32(alpha_mode)
        .u32(0) // double sided
        .u32(0)
        .u32(0) // name
        .u32(0)
        .u32(0)
        .u32(0)
        .u32(0)
        .u32(0) // five texture slots
        .no_extensions()
        .finish()
}

/// Default canvas block: 1x1 size, no root.
pub fn ui_canvas_block() -> Vec<u8> {
    BlockBuilder::new()
        .f32s(&[1.0, 1.0])
        .f32(512.0)
        .f32(512.0)
        .u32(0)
        .no_extensions()
        .finish()
}

/// Create a node from the default block staged at offset 0.
pub fn create_node(host: &mut Host, env: EnvId) -> u32 {
    let block = node_block();
    poke(host, env, 0, &block);
    let id = host.syscall(env, "world_create_node", &[0]);
    assert!(id > 0, "node creation failed");
    id as u32
}
