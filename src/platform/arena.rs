//! Arena bounds provided by the window host

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Edge, Rect};

/// Smallest arena side `SimpleArena` will shrink to
pub const MIN_ARENA_SIZE: f32 = 150.0;

/// Grow one arena edge outward
///
/// Fire-and-forget: the host animates (or applies) it on its own schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeRequest {
    pub edge: Edge,
    /// Pixels to move the edge outward
    pub amount: f32,
    /// Host-defined animation speed
    pub speed: f32,
    /// Seconds
    pub duration: f32,
}

/// The window the arena lives in
pub trait ArenaHost {
    /// Current arena rectangle in world coordinates
    fn bounds(&self) -> Rect;

    /// Full screen size; the arena can never outgrow it
    fn screen_size(&self) -> Vec2;

    fn request_resize(&mut self, request: ResizeRequest);

    /// Restore the initial arena on restart
    fn reset(&mut self) {}
}

/// Host that applies resizes immediately, clamped to the screen
#[derive(Debug, Clone)]
pub struct SimpleArena {
    initial: Rect,
    bounds: Rect,
    screen: Vec2,
    /// Every request seen, oldest first
    pub requests: Vec<ResizeRequest>,
}

impl SimpleArena {
    pub fn new(bounds: Rect, screen: Vec2) -> Self {
        Self {
            initial: bounds,
            bounds,
            screen,
            requests: Vec::new(),
        }
    }

    /// Arena of `size` centered on the screen
    pub fn centered(size: Vec2, screen: Vec2) -> Self {
        let origin = (screen - size) / 2.0;
        Self::new(Rect::new(origin.x, origin.y, size.x, size.y), screen)
    }
}

impl ArenaHost for SimpleArena {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn screen_size(&self) -> Vec2 {
        self.screen
    }

    fn request_resize(&mut self, request: ResizeRequest) {
        self.requests.push(request);

        let r = self.bounds;
        let (mut left, mut top, mut right, mut bottom) = (r.left(), r.top(), r.right(), r.bottom());
        match request.edge {
            Edge::Left => left = (left - request.amount).max(0.0).min(right - MIN_ARENA_SIZE),
            Edge::Right => {
                right = (right + request.amount)
                    .min(self.screen.x)
                    .max(left + MIN_ARENA_SIZE)
            }
            Edge::Top => top = (top - request.amount).max(0.0).min(bottom - MIN_ARENA_SIZE),
            Edge::Bottom => {
                bottom = (bottom + request.amount)
                    .min(self.screen.y)
                    .max(top + MIN_ARENA_SIZE)
            }
        }
        self.bounds = Rect::new(left, top, right - left, bottom - top);
        log::debug!("arena {:?} edge -> {:?}", request.edge, self.bounds);
    }

    fn reset(&mut self) {
        self.bounds = self.initial;
        self.requests.clear();
    }
}
