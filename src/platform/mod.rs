//! Platform abstraction layer
//!
//! What the simulation consumes from its host:
//! - Arena bounds and resize requests (`ArenaHost`)
//! - Per-frame input snapshots and discrete input events

pub mod arena;
pub mod input;

pub use arena::{ArenaHost, ResizeRequest, SimpleArena};
pub use input::{InputEvent, InputState, Key, MouseButton};
