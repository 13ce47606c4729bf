//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Linear RGBA, 0.0 - 1.0 per channel
pub type Color = [f32; 4];

/// 2D vertex with position and color, laid out for direct upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn at(p: Vec2, color: Color) -> Self {
        Self::new(p.x, p.y, color)
    }
}

/// Replace the alpha channel
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
    pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
    pub const CYAN: Color = [0.0, 1.0, 1.0, 1.0];
    /// Dying player, off-beat of the flash
    pub const GHOST: Color = [1.0, 1.0, 1.0, 100.0 / 255.0];

    pub const PLAYER: Color = WHITE;
    pub const PROJECTILE: Color = CYAN;
    pub const TRIANGLE: Color = YELLOW;
    pub const PENTAGON: Color = CYAN;
    pub const BEAM: Color = WHITE;
    pub const BEAM_WARNING: Color = YELLOW;
    pub const HEALTH_BAR_BACK: Color = WHITE;
}
