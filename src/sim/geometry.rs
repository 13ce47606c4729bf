//! Geometry primitives shared by the collision engine and entities
//!
//! `glam::Vec2` is the vector type everywhere; `normalize_or_zero` is the
//! zero-magnitude case (a zero vector, never NaN). This module adds the arena
//! rectangle, projection intervals and the model-to-world transform.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world coordinates, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strictly inside (points on the border are outside)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.left() && p.x < self.right() && p.y > self.top() && p.y < self.bottom()
    }

    /// Outside or on the border
    pub fn excludes(&self, p: Vec2) -> bool {
        p.x < self.left() || p.x > self.right() || p.y < self.top() || p.y > self.bottom()
    }

    /// Clamp a point so a box of `half` extents centered on it stays inside
    pub fn clamp_inset(&self, p: Vec2, half: Vec2) -> Vec2 {
        // min/max rather than clamp: a rect smaller than the box must not panic
        Vec2::new(
            p.x.max(self.left() + half.x).min(self.right() - half.x),
            p.y.max(self.top() + half.y).min(self.bottom() - half.y),
        )
    }
}

/// One side of the arena rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// 0 = top, 1 = bottom, 2 = left, 3 = right
    pub fn from_index(index: i32) -> Option<Edge> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }

    /// Unit vector pointing from this edge into the arena
    pub fn inward(&self) -> Vec2 {
        match self {
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
        }
    }
}

/// Closed interval of projections onto a separating-axis candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// The inverted interval produced by projecting nothing; overlaps nothing
    pub const EMPTY: Interval = Interval {
        min: f32::MAX,
        max: f32::MIN,
    };

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Touching intervals count as overlapping
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.max < other.min || other.max < self.min)
    }
}

/// Rotate a model-space point by `angle` radians, then translate it
#[inline]
pub fn to_world(local: Vec2, angle: f32, translation: Vec2) -> Vec2 {
    Vec2::from_angle(angle).rotate(local) + translation
}
