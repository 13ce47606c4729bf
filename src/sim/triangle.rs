//! Chasers: spinning triangles that home in on the player

use glam::Vec2;
use rand::Rng;

use super::body::{Body, Health, Scope};
use super::entity::{UpdateContext, is_flashing};
use super::geometry::Rect;
use super::polygon::Shape;
use super::store::EntityId;
use crate::render::{DrawSurface, colors, shapes};
use crate::tuning::TriangleTuning;

/// Below this squared length a heading carries no direction
const MIN_HEADING_SQ: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct Triangle {
    pub body: Body,
    health: Health,
    score: u32,
    target: Option<EntityId>,
    /// +1 or -1
    spin: f32,
    /// Radians per second
    spin_rate: f32,
    deviation: f32,
    last_hit: Option<f32>,
    flash_duration: f32,
}

impl Triangle {
    pub fn new(
        position: Vec2,
        speed: f32,
        angle: f32,
        spin: f32,
        target: Option<EntityId>,
        tuning: &TriangleTuning,
    ) -> Self {
        Self {
            body: Body::new(
                Shape::Triangle,
                position,
                Vec2::new(tuning.width, tuning.height),
                Vec2::ZERO,
                speed,
                colors::TRIANGLE,
            )
            .with_scope(Scope::Global)
            .with_angle(angle),
            health: Health::new(tuning.health),
            score: tuning.score,
            target,
            spin: spin.signum(),
            spin_rate: tuning.spin_rate.to_radians(),
            deviation: tuning.homing_deviation,
            last_hit: None,
            flash_duration: tuning.flash_duration,
        }
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Lose health and start the hit flash; returns true once depleted
    pub fn take_damage(&mut self, amount: f32, now: f32) -> bool {
        self.health.change_by(-amount);
        self.last_hit = Some(now);
        self.health.is_depleted()
    }

    /// Steer toward `target` with a little per-axis noise
    fn home(&mut self, target: Vec2, rng: &mut impl Rng) {
        let to_target = (target - self.body.position()).normalize_or_zero();
        if to_target.length_squared() <= MIN_HEADING_SQ {
            return;
        }

        let d = self.deviation;
        let noise = if d > 0.0 {
            Vec2::new(rng.random_range(-d..=d), rng.random_range(-d..=d))
        } else {
            Vec2::ZERO
        };
        self.body.set_direction((to_target + noise).normalize_or_zero());
    }

    pub fn update(&mut self, ctx: &mut UpdateContext) {
        if self.health.is_depleted() {
            self.body.active = false;
            return;
        }

        if let Some(target) = ctx.target {
            self.home(target, ctx.rng);
        }

        self.body.rotate(self.spin * self.spin_rate * ctx.dt);
        let velocity = self.body.direction() * self.body.speed;
        self.body.move_by(velocity * ctx.dt);
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, view: &Rect, now: f32) {
        if !self.body.is_in_window(view) {
            return;
        }

        let tint = if is_flashing(self.last_hit, now, self.flash_duration) {
            colors::WHITE
        } else {
            self.body.tint
        };
        let origin = view.origin();
        surface.fill_triangles(&shapes::polygon_fan(
            self.body.collision_vertices(),
            origin,
            tint,
        ));
        surface.fill_triangles(&shapes::health_bar(
            self.body.position() - origin,
            self.body.dimensions(),
            self.health.ratio(),
        ));
    }
}
