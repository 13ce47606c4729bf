//! Polygon Arena - collision and simulation core of a top-down arena shooter
//!
//! Core modules:
//! - `sim`: Entities, SAT collision, collision resolution and spawning
//! - `render`: Vertex types and the draw surface the simulation draws into
//! - `platform`: Arena host and input abstraction
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod render;
pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GameManager, GamePhase};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the driver loop
    pub const SCREEN_FPS: u32 = 60;
    /// Frame time at the target rate
    pub const FRAME_DT: f32 = 1.0 / SCREEN_FPS as f32;
    /// Longest step a single update will simulate (avoids tunnelling after stalls)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Vertices used to approximate circles and ellipses
    pub const CIRCLE_SEGMENTS: usize = 12;

    /// Default window and starting arena
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
}
