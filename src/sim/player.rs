//! The player: movement, shooting, knockback and the death sequence

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Health};
use super::entity::{Entity, UpdateContext, is_flashing};
use super::event::GameEvent;
use super::geometry::Rect;
use super::polygon::Shape;
use super::projectile::Projectile;
use crate::render::{DrawSurface, colors, shapes};
use crate::tuning::{KnockbackTuning, PlayerTuning, ProjectileTuning, Tuning};

/// Diagonal movement scale (1/√2)
const DIAGONAL: f32 = 0.7071;
const HUD_FONT_SIZE: f32 = 16.0;
const HUD_PADDING: f32 = 10.0;

/// Three-phase knockback
///
/// An impulse moves the player once immediately, then drives a short rapid
/// velocity that decays linearly to zero, alongside a trailing velocity that
/// decays multiplicatively and snaps to zero below a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knockback {
    rapid: Vec2,
    rapid_timer: f32,
    trailing: Vec2,
    tuning: KnockbackTuning,
}

impl Knockback {
    pub fn new(tuning: KnockbackTuning) -> Self {
        Self {
            rapid: Vec2::ZERO,
            rapid_timer: 0.0,
            trailing: Vec2::ZERO,
            tuning,
        }
    }

    /// Start a knockback; returns the immediate displacement
    pub fn start(&mut self, impulse: Vec2) -> Vec2 {
        self.rapid = impulse * self.tuning.rapid;
        self.rapid_timer = self.tuning.rapid_duration;
        self.trailing = impulse * self.tuning.trailing;
        impulse * self.tuning.immediate
    }

    /// Displacement for this frame
    pub fn step(&mut self, dt: f32) -> Vec2 {
        let mut delta = Vec2::ZERO;

        if self.rapid_timer > 0.0 {
            let duration = self.tuning.rapid_duration.max(f32::EPSILON);
            delta += self.rapid * (self.rapid_timer / duration) * dt;
            self.rapid_timer -= dt;
            if self.rapid_timer <= 0.0 {
                // Hand the overshoot to the trailing phase
                self.trailing += self.rapid * (-self.rapid_timer / duration);
                self.rapid = Vec2::ZERO;
                self.rapid_timer = 0.0;
            }
        }

        if self.trailing != Vec2::ZERO {
            delta += self.trailing * dt;
            self.trailing *= (1.0 - self.tuning.decay * dt).max(0.0);
            if self.trailing.length() < self.tuning.min_speed {
                self.trailing = Vec2::ZERO;
            }
        }

        delta
    }

    pub fn trailing_velocity(&self) -> Vec2 {
        self.trailing
    }

    pub fn is_settled(&self) -> bool {
        self.rapid_timer <= 0.0 && self.trailing == Vec2::ZERO
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    health: Health,
    score: u32,
    knockback: Knockback,
    last_hit: Option<f32>,
    last_shot: Option<f32>,
    /// Seconds into the death animation
    death_timer: Option<f32>,
    base_dimensions: Vec2,
    tuning: PlayerTuning,
    weapon: ProjectileTuning,
}

impl Player {
    pub fn new(position: Vec2, tuning: &Tuning) -> Self {
        let t = tuning.player;
        let dims = Vec2::splat(t.radius * 2.0);
        Self {
            body: Body::new(Shape::Circle, position, dims, Vec2::ZERO, t.speed, colors::PLAYER),
            health: Health::new(t.max_health),
            score: 0,
            knockback: Knockback::new(tuning.knockback),
            last_hit: None,
            last_shot: None,
            death_timer: None,
            base_dimensions: dims,
            tuning: t,
            weapon: tuning.projectile,
        }
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn is_dying(&self) -> bool {
        self.death_timer.is_some()
    }

    pub fn knockback(&self) -> &Knockback {
        &self.knockback
    }

    /// Apply a health delta at sim time `now`
    ///
    /// Damage inside the grace period after the previous hit is ignored and
    /// `false` is returned. Reaching zero starts the death sequence.
    pub fn change_health_by(&mut self, delta: f32, now: f32) -> bool {
        if delta < 0.0 {
            if let Some(last) = self.last_hit {
                if now - last < self.tuning.grace_period {
                    return false;
                }
            }
            self.last_hit = Some(now);
        }

        self.health.change_by(delta);
        if self.health.is_depleted() && !self.is_dying() {
            log::info!("Player death sequence started");
            self.death_timer = Some(0.0);
        }
        true
    }

    pub fn apply_knockback(&mut self, impulse: Vec2) {
        let immediate = self.knockback.start(impulse);
        self.body.move_by(immediate);
    }

    /// Fire toward `target` if the weapon is ready
    pub fn try_shoot(&mut self, target: Vec2, now: f32) -> Option<Projectile> {
        if self.is_dying() || !self.body.active {
            return None;
        }
        if let Some(last) = self.last_shot {
            if now - last < 1.0 / self.tuning.fire_rate.max(f32::EPSILON) {
                return None;
            }
        }

        let direction = (target - self.body.position()).normalize_or_zero();
        if direction == Vec2::ZERO {
            return None;
        }
        self.last_shot = Some(now);
        Some(Projectile::new(
            self.body.position(),
            direction,
            self.tuning.projectile_speed,
            &self.weapon,
        ))
    }

    pub fn update(&mut self, ctx: &mut UpdateContext) {
        if self.death_timer.is_some() {
            self.update_death(ctx);
            return;
        }

        let mut axis = ctx.input.movement();
        if axis.x != 0.0 && axis.y != 0.0 {
            axis *= DIAGONAL;
        }
        let delta = axis * self.body.speed * ctx.dt + self.knockback.step(ctx.dt);
        self.body.move_by(delta);

        let half = self.body.dimensions() / 2.0;
        let clamped = ctx.bounds.clamp_inset(self.body.position(), half);
        self.body.set_position(clamped);

        if ctx.input.mouse_left {
            if let Some(projectile) = self.try_shoot(ctx.input.mouse_position, ctx.now) {
                ctx.spawns.push(Entity::Projectile(projectile));
            }
        }
    }

    fn update_death(&mut self, ctx: &mut UpdateContext) {
        let timer = self.death_timer.unwrap_or(0.0) + ctx.dt;
        self.death_timer = Some(timer);

        let flash_on = (timer * self.tuning.death_flash_rate) as u32 % 2 == 0;
        self.body.tint = if flash_on { colors::RED } else { colors::GHOST };

        let duration = self.tuning.death_duration.max(f32::EPSILON);
        let scale = (1.0 - timer / duration).max(self.tuning.death_min_scale);
        self.body.set_dimensions(self.base_dimensions * scale);

        if timer >= duration && self.body.active {
            log::info!("Player death animation complete");
            self.body.active = false;
            ctx.events.push(GameEvent::PlayerDied);
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, view: &Rect, now: f32) {
        let tint = if !self.is_dying() && is_flashing(self.last_hit, now, self.tuning.flash_duration) {
            colors::RED
        } else {
            self.body.tint
        };
        surface.fill_triangles(&shapes::polygon_fan(
            self.body.collision_vertices(),
            view.origin(),
            tint,
        ));
        self.draw_hud(surface);
    }

    fn draw_hud(&self, surface: &mut dyn DrawSurface) {
        let size = surface.output_size();

        let health_text = format!("{}/{} HP", self.health.current(), self.health.max());
        let text_width = health_text.len() as f32 * (HUD_FONT_SIZE / 2.0 + 1.0);
        surface.draw_text(
            &health_text,
            Vec2::new(
                size.x - text_width - HUD_PADDING,
                size.y - HUD_FONT_SIZE - HUD_PADDING,
            ),
            HUD_FONT_SIZE,
            shapes::health_color(self.health.ratio()),
        );

        surface.draw_text(
            &format!("Score: {}", self.score),
            Vec2::splat(HUD_PADDING),
            HUD_FONT_SIZE,
            colors::WHITE,
        );
    }
}
