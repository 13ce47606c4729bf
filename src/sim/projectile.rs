//! Player shots

use glam::Vec2;

use super::body::Body;
use super::entity::UpdateContext;
use super::event::GameEvent;
use super::geometry::{Edge, Rect};
use super::polygon::Shape;
use crate::platform::ResizeRequest;
use crate::render::{DrawSurface, colors, shapes};
use crate::tuning::ProjectileTuning;

#[derive(Debug, Clone)]
pub struct Projectile {
    pub body: Body,
    damage: f32,
    edge_expand: f32,
    resize_duration: f32,
}

impl Projectile {
    pub fn new(position: Vec2, direction: Vec2, speed: f32, tuning: &ProjectileTuning) -> Self {
        Self {
            body: Body::new(
                Shape::Circle,
                position,
                Vec2::splat(tuning.size),
                direction,
                speed,
                colors::PROJECTILE,
            ),
            damage: tuning.damage,
            edge_expand: tuning.edge_expand,
            resize_duration: tuning.resize_duration,
        }
    }

    pub fn damage(&self) -> f32 {
        self.damage
    }

    /// Edge the projectile has crossed; later checks win
    pub fn crossed_edge(&self, bounds: &Rect) -> Option<Edge> {
        let p = self.body.position();
        let mut edge = None;
        if p.x < bounds.left() {
            edge = Some(Edge::Left);
        }
        if p.x > bounds.right() {
            edge = Some(Edge::Right);
        }
        if p.y < bounds.top() {
            edge = Some(Edge::Top);
        }
        if p.y > bounds.bottom() {
            edge = Some(Edge::Bottom);
        }
        edge
    }

    pub fn update(&mut self, ctx: &mut UpdateContext) {
        let velocity = self.body.direction() * self.body.speed;
        self.body.move_by(velocity * ctx.dt);

        if let Some(edge) = self.crossed_edge(&ctx.bounds) {
            let request = ResizeRequest {
                edge,
                amount: self.edge_expand,
                speed: self.body.speed / 100.0,
                duration: self.resize_duration,
            };
            log::debug!("Projectile left through {edge:?}, expanding arena");
            ctx.events.push(GameEvent::ArenaResize(request));
            self.body.active = false;
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, view: &Rect) {
        surface.fill_triangles(&shapes::polygon_fan(
            self.body.collision_vertices(),
            view.origin(),
            self.body.tint,
        ));
    }
}
