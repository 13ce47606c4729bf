//! Edge beams
//!
//! A beam telegraphs from one arena edge, then sweeps across the whole arena:
//!
//! ```text
//! Warning (1.5s) -> Expanding (0.2s) -> Active (1.0s) -> Fading (1.0s) -> gone
//! ```
//!
//! Only `Expanding` and `Active` hurt. The rectangle is axis-aligned; its long
//! axis runs away from the start edge toward the opposite one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Scope};
use super::entity::UpdateContext;
use super::geometry::{Edge, Rect};
use super::polygon::Shape;
use crate::render::vertex::with_alpha;
use crate::render::{DrawSurface, colors, shapes};
use crate::tuning::BeamTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamState {
    Warning,
    Expanding,
    Active,
    Fading,
}

#[derive(Debug, Clone)]
pub struct Beam {
    pub body: Body,
    /// `None` for a beam built with a bad edge index; it only times out
    edge: Option<Edge>,
    state: BeamState,
    timer: f32,
    /// Coordinate across the beam's long axis, fixed at spawn
    cross: f32,
    alpha: f32,
    tuning: BeamTuning,
}

impl Beam {
    /// Beam from edge `edge_index` (0 top, 1 bottom, 2 left, 3 right)
    ///
    /// `position` is the spawn point; its coordinate along the edge is kept
    /// for the beam's whole life.
    pub fn new(edge_index: i32, position: Vec2, tuning: &BeamTuning) -> Self {
        let edge = Edge::from_index(edge_index);
        if edge.is_none() {
            log::warn!("Beam start edge {edge_index} is not 0..=3, beam will stay inert");
        }

        let cross = match edge {
            Some(e) if e.is_horizontal() => position.x,
            _ => position.y,
        };
        Self {
            body: Body::new(
                Shape::Rectangle,
                position,
                Vec2::splat(tuning.initial_size),
                edge.map_or(Vec2::ZERO, |e| e.inward()),
                0.0,
                colors::BEAM,
            )
            .with_scope(Scope::Global),
            edge,
            state: BeamState::Warning,
            timer: 0.0,
            cross,
            alpha: 1.0,
            tuning: *tuning,
        }
    }

    pub fn state(&self) -> BeamState {
        self.state
    }

    pub fn edge(&self) -> Option<Edge> {
        self.edge
    }

    pub fn damage(&self) -> f32 {
        self.tuning.damage
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// True while the beam hurts on contact
    pub fn is_damaging(&self) -> bool {
        self.edge.is_some() && matches!(self.state, BeamState::Expanding | BeamState::Active)
    }

    fn duration(&self) -> f32 {
        match self.state {
            BeamState::Warning => self.tuning.warning_duration,
            BeamState::Expanding => self.tuning.expand_duration,
            BeamState::Active => self.tuning.active_duration,
            BeamState::Fading => self.tuning.fade_duration,
        }
    }

    fn enter(&mut self, state: BeamState) {
        log::debug!("Beam {:?} -> {state:?}", self.state);
        self.state = state;
        self.timer = 0.0;
    }

    pub fn update(&mut self, ctx: &mut UpdateContext) {
        self.timer += ctx.dt;
        let done = self.timer >= self.duration();

        if let Some(edge) = self.edge {
            self.reshape(edge, &ctx.bounds, ctx.screen);
        }

        match self.state {
            BeamState::Warning if done => self.enter(BeamState::Expanding),
            BeamState::Expanding if done => {
                self.enter(BeamState::Active);
                if let Some(edge) = self.edge {
                    self.reshape(edge, &ctx.bounds, ctx.screen);
                }
            }
            BeamState::Active if done => self.enter(BeamState::Fading),
            BeamState::Fading => {
                let fade = self.tuning.fade_duration.max(f32::EPSILON);
                self.alpha = (1.0 - self.timer / fade).max(0.0);
                if done {
                    self.alpha = 0.0;
                    self.body.active = false;
                }
            }
            _ => {}
        }
    }

    /// Resize and place the rectangle for the current state
    fn reshape(&mut self, edge: Edge, bounds: &Rect, screen: Vec2) {
        let extent = if edge.is_horizontal() { screen.y } else { screen.x };
        let warning_len = extent * self.tuning.warning_fraction;
        let full_len = extent * self.tuning.overscale;

        let len = match self.state {
            BeamState::Warning => warning_len,
            BeamState::Expanding => {
                let duration = self.tuning.expand_duration.max(f32::EPSILON);
                let fraction = (self.timer / duration).min(1.0);
                warning_len + (full_len - warning_len) * fraction
            }
            BeamState::Active | BeamState::Fading => full_len,
        };

        // +1 when moving into the arena increases the coordinate
        let sign = edge.inward().x + edge.inward().y;
        let edge_coord = match edge {
            Edge::Top => bounds.top(),
            Edge::Bottom => bounds.bottom(),
            Edge::Left => bounds.left(),
            Edge::Right => bounds.right(),
        };
        // The outer end stays put; the strip pokes `edge_inset` into the arena
        let outer = edge_coord + sign * (self.tuning.edge_inset - warning_len);
        let center = outer + sign * len / 2.0;

        let (dims, position) = if edge.is_horizontal() {
            (
                Vec2::new(self.tuning.width, len),
                Vec2::new(self.cross, center),
            )
        } else {
            (
                Vec2::new(len, self.tuning.width),
                Vec2::new(center, self.cross),
            )
        };
        self.body.set_position(position);
        self.body.set_dimensions(dims);
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface, view: &Rect) {
        if self.edge.is_none() {
            return;
        }
        let color = match self.state {
            BeamState::Warning => colors::BEAM_WARNING,
            BeamState::Expanding | BeamState::Active => self.body.tint,
            BeamState::Fading => with_alpha(self.body.tint, self.alpha),
        };
        surface.fill_triangles(&shapes::polygon_fan(
            self.body.collision_vertices(),
            view.origin(),
            color,
        ));
    }
}
