//! Shared game-object state: transform, tint, activity and collision polygon

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::polygon::{Polygon, Shape};
use crate::render::Color;

/// Classification tag: enemies are `Global`, the player and its shots `Local`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    Local,
    Global,
}

/// Closed set of entity type tags used by collision dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Generic,
    Player,
    Projectile,
    Triangle,
    Beam,
    Pentagon,
}

impl EntityKind {
    /// Every kind that carries behaviour
    pub const GAMEPLAY: [EntityKind; 5] = [
        EntityKind::Player,
        EntityKind::Projectile,
        EntityKind::Triangle,
        EntityKind::Beam,
        EntityKind::Pentagon,
    ];
}

/// Position, orientation and collision geometry of one entity
///
/// Every mutator that touches position, angle or dimensions refreshes the
/// world vertices before returning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    position: Vec2,
    dimensions: Vec2,
    /// Movement heading; independent of `angle`
    direction: Vec2,
    angle: f32,
    pub tint: Color,
    pub active: bool,
    /// Pixels per second
    pub speed: f32,
    pub scope: Scope,
    polygon: Polygon,
}

impl Body {
    pub fn new(
        shape: Shape,
        position: Vec2,
        dimensions: Vec2,
        direction: Vec2,
        speed: f32,
        tint: Color,
    ) -> Self {
        Self {
            position,
            dimensions,
            direction,
            angle: 0.0,
            tint,
            active: true,
            speed,
            scope: Scope::default(),
            polygon: Polygon::new(shape, dimensions, 0.0, position),
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.set_angle(angle);
        self
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn dimensions(&self) -> Vec2 {
        self.dimensions
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    pub fn collision_vertices(&self) -> &[Vec2] {
        self.polygon.world_vertices()
    }

    pub fn collides_with(&self, other: &Body) -> bool {
        self.polygon.collides_with(&other.polygon)
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh();
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.position += delta;
        self.refresh();
    }

    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction;
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        self.refresh();
    }

    pub fn rotate(&mut self, delta: f32) {
        self.angle += delta;
        self.refresh();
    }

    pub fn set_dimensions(&mut self, dimensions: Vec2) {
        self.dimensions = dimensions;
        self.polygon.rebuild(dimensions, self.angle, self.position);
    }

    pub fn is_out_of_bounds(&self, bounds: &Rect) -> bool {
        bounds.excludes(self.position)
    }

    pub fn is_in_window(&self, bounds: &Rect) -> bool {
        bounds.contains(self.position)
    }

    fn refresh(&mut self) {
        self.polygon.transform(self.angle, self.position);
    }
}

/// Hit points clamped to `[0, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self { current: max, max }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Fraction of max remaining, 0 for a zero pool
    pub fn ratio(&self) -> f32 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Apply a delta and return the new value
    pub fn change_by(&mut self, delta: f32) -> f32 {
        self.set(self.current + delta)
    }

    pub fn set(&mut self, value: f32) -> f32 {
        self.current = value.clamp(0.0, self.max);
        self.current
    }

    pub fn reset(&mut self) {
        self.current = self.max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_2;

    fn square() -> Body {
        Body::new(
            Shape::Rectangle,
            Vec2::new(100.0, 100.0),
            Vec2::splat(10.0),
            Vec2::X,
            0.0,
            [1.0; 4],
        )
    }

    fn assert_vertices_consistent(body: &Body) {
        let expected =
            Polygon::new(body.polygon().shape(), body.dimensions(), body.angle(), body.position());
        for (a, b) in body.collision_vertices().iter().zip(expected.world_vertices()) {
            assert!((*a - *b).length() < 1e-4, "{a} vs {b}");
        }
    }

    #[test]
    fn test_mutators_keep_world_vertices_fresh() {
        let mut body = square();
        body.move_by(Vec2::new(5.0, -3.0));
        assert_vertices_consistent(&body);
        body.set_angle(FRAC_PI_2);
        assert_vertices_consistent(&body);
        body.rotate(0.3);
        assert_vertices_consistent(&body);
        body.set_dimensions(Vec2::new(30.0, 4.0));
        assert_vertices_consistent(&body);
        body.set_position(Vec2::new(-7.0, 2.0));
        assert_vertices_consistent(&body);
    }

    #[test]
    fn test_direction_does_not_rotate_body() {
        let mut body = square();
        let before = body.collision_vertices().to_vec();
        body.set_direction(Vec2::Y);
        assert_eq!(body.collision_vertices(), before.as_slice());
    }

    #[test]
    fn test_bounds_checks() {
        let body = square();
        assert!(body.is_in_window(&Rect::new(0.0, 0.0, 200.0, 200.0)));
        assert!(body.is_out_of_bounds(&Rect::new(0.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn test_health_clamps_both_ways() {
        let mut hp = Health::new(50.0);
        assert_eq!(hp.change_by(-80.0), 0.0);
        assert!(hp.is_depleted());
        assert_eq!(hp.change_by(500.0), 50.0);
        assert_eq!(hp.ratio(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_health_stays_within_bounds(
            max in 0.0f32..1000.0,
            deltas in prop::collection::vec(-2000.0f32..2000.0, 0..40),
        ) {
            let mut hp = Health::new(max);
            for d in deltas {
                hp.change_by(d);
                prop_assert!(hp.current() >= 0.0);
                prop_assert!(hp.current() <= hp.max());
            }
        }
    }
}
