//! The guest-facing entry point.
//!
//! `Host` owns the dispatch table and the world it mutates. Whatever goes
//! wrong inside a call — unknown name, bad argument count, denied handle,
//! malformed block — the guest only ever sees the call's failure sentinel;
//! the reason is logged host-side with enough context to debug an operator
//! report.

use crate::config::HostConfig;
use crate::environment::EnvId;
use crate::syscalls::{build_syscall_table, SyscallTable};
use crate::world::World;

use arbor_core::types::ResourceId;

pub struct Host {
    table: SyscallTable,
    pub world: World,
}

impl Host {
    pub fn new(config: HostConfig) -> Self {
        Self {
            table: build_syscall_table(),
            world: World::new(config),
        }
    }

    /// Execute one ABI call on behalf of `env`. Runs to completion; never
    /// panics on guest input; never surfaces error detail across the
    /// boundary.
    pub fn syscall(&mut self, env: EnvId, name: &str, args: &[u32]) -> i32 {
        let Some(entry) = self.table.get(name) else {
            log::error!("{env}: unknown syscall {name:?}");
            return -1;
        };
        if args.len() != entry.argc {
            log::error!(
                "{env}: syscall {name} expected {} args, got {}",
                entry.argc,
                args.len()
            );
            return entry.ret.failure();
        }
        match entry.handler.call(&mut self.world, env, args) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("{env}: syscall {name} failed: {err:#}");
                entry.ret.failure()
            }
        }
    }

    pub fn load_environment(&mut self) -> EnvId {
        self.world.load_environment()
    }

    pub fn unload_environment(&mut self, env: EnvId) {
        self.world.unload_environment(env)
    }

    /// Share a host- or script-owned resource with another environment
    /// without transferring ownership.
    pub fn grant(&mut self, env: EnvId, id: ResourceId) -> Result<(), arbor_core::HostError> {
        self.world.grant(env, id)
    }

    /// Mirror collaborator input state into interactables; the embedder
    /// calls this once per simulation tick, before scripts run.
    pub fn tick_input(&mut self) {
        self.world.tick_input()
    }
}
