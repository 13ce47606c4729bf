//! Slow, tough pentagons that drift in place

use glam::Vec2;

use super::body::{Body, Health, Scope};
use super::entity::{UpdateContext, is_flashing};
use super::geometry::Rect;
use super::polygon::Shape;
use crate::render::{DrawSurface, colors, shapes};
use crate::tuning::PentagonTuning;

#[derive(Debug, Clone)]
pub struct Pentagon {
    pub body: Body,
    health: Health,
    score: u32,
    /// Radians per second
    spin_rate: f32,
    last_hit: Option<f32>,
    flash_duration: f32,
}

impl Pentagon {
    pub fn new(position: Vec2, angle: f32, tuning: &PentagonTuning) -> Self {
        Self {
            body: Body::new(
                Shape::Pentagon,
                position,
                Vec2::splat(tuning.size),
                Vec2::ZERO,
                0.0,
                colors::PENTAGON,
            )
            .with_scope(Scope::Global)
            .with_angle(angle),
            health: Health::new(tuning.health),
            score: tuning.score,
            spin_rate: tuning.spin_rate.to_radians(),
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

    /// Lose health and start the hit flash; returns true once depleted
    pub fn take_damage(&mut self, amount: f32, now: f32) -> bool {
        self.health.change_by(-amount);
        self.last_hit = Some(now);
        self.health.is_depleted()
    }

    pub fn update(&mut self, ctx: &mut UpdateContext) {
        if self.health.is_depleted() {
            self.body.active = false;
            return;
        }
        self.body.rotate(self.spin_rate * ctx.dt);
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
