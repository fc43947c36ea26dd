//! arbor-host
//!
//! The host side of the arbor scripting sandbox. Guest code — loaded into an
//! isolated execution environment — talks to the engine exclusively through
//! named ABI calls whose arguments are flat u32 words: resource ids, offsets
//! into the environment's shared memory, lengths, and packed enum codes.
//!
//! This crate owns the dispatch table for those calls, the marshaling layer
//! that decodes parameter blocks out of guest memory, the per-environment
//! lifecycle (load, grant, unload), and the capability-filtered scene-graph
//! bridge. Rendering, physics stepping, input and audio are collaborator
//! traits implemented elsewhere.

pub mod bridge;
pub mod collab;
pub mod config;
pub mod environment;
pub mod host;
pub mod marshal;
pub mod syscalls;
pub mod world;

pub use config::HostConfig;
pub use environment::EnvId;
pub use host::Host;
pub use world::World;
