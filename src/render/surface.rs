//! Draw surface collaborator

use glam::Vec2;

use super::vertex::{Color, Vertex};

/// Receives primitive draws from entities
///
/// Coordinates are relative to the arena's top-left corner. Implementations
/// may drop calls; the simulation never depends on draw success.
pub trait DrawSurface {
    /// Size of the output in pixels (for HUD placement)
    fn output_size(&self) -> Vec2;

    /// A triangle list
    fn fill_triangles(&mut self, vertices: &[Vertex]);

    fn draw_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color);
}

/// One recorded draw
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Triangles(Vec<Vertex>),
    Text {
        text: String,
        position: Vec2,
        font_size: f32,
        color: Color,
    },
}

/// Surface that keeps every call; used headless and in tests
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Vec2,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn triangle_batches(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Triangles(_)))
            .count()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            DrawCall::Triangles(_) => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn output_size(&self) -> Vec2 {
        self.size
    }

    fn fill_triangles(&mut self, vertices: &[Vertex]) {
        if !vertices.is_empty() {
            self.calls.push(DrawCall::Triangles(vertices.to_vec()));
        }
    }

    fn draw_text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            position,
            font_size,
            color,
        });
    }
}
