//! The closed set of game entities
//!
//! Every variant owns a `Body` plus its own state. Per-frame behaviour goes
//! through `Entity::update` with an `UpdateContext` carrying everything an
//! entity may read (clock, arena, input, homing target) or emit (events,
//! newly spawned entities).

use glam::Vec2;
use rand_pcg::Pcg32;

use super::beam::Beam;
use super::body::{Body, EntityKind};
use super::event::GameEvent;
use super::geometry::Rect;
use super::pentagon::Pentagon;
use super::player::Player;
use super::projectile::Projectile;
use super::store::EntityId;
use super::triangle::Triangle;
use crate::platform::InputState;
use crate::render::{DrawSurface, shapes};

/// Per-frame inputs and outboxes for one entity update
pub struct UpdateContext<'a> {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Simulation clock in seconds
    pub now: f32,
    /// Arena rectangle this frame
    pub bounds: Rect,
    pub screen: Vec2,
    pub input: &'a InputState,
    /// Position of this entity's homing target, if it is live and active
    pub target: Option<Vec2>,
    pub rng: &'a mut Pcg32,
    pub events: &'a mut Vec<GameEvent>,
    /// Entities created during the update, added by the manager afterwards
    pub spawns: &'a mut Vec<Entity>,
}

#[derive(Debug, Clone)]
pub enum Entity {
    /// Plain body without behaviour
    Generic(Body),
    Player(Player),
    Projectile(Projectile),
    Triangle(Triangle),
    Beam(Beam),
    Pentagon(Pentagon),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Generic(_) => EntityKind::Generic,
            Entity::Player(_) => EntityKind::Player,
            Entity::Projectile(_) => EntityKind::Projectile,
            Entity::Triangle(_) => EntityKind::Triangle,
            Entity::Beam(_) => EntityKind::Beam,
            Entity::Pentagon(_) => EntityKind::Pentagon,
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            Entity::Generic(body) => body,
            Entity::Player(p) => &p.body,
            Entity::Projectile(p) => &p.body,
            Entity::Triangle(t) => &t.body,
            Entity::Beam(b) => &b.body,
            Entity::Pentagon(p) => &p.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Generic(body) => body,
            Entity::Player(p) => &mut p.body,
            Entity::Projectile(p) => &mut p.body,
            Entity::Triangle(t) => &mut t.body,
            Entity::Beam(b) => &mut b.body,
            Entity::Pentagon(p) => &mut p.body,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body().active
    }

    pub fn collides_with(&self, other: &Entity) -> bool {
        self.body().collides_with(other.body())
    }

    /// Handle of the entity this one chases
    pub fn homing_target(&self) -> Option<EntityId> {
        match self {
            Entity::Triangle(t) => t.target(),
            _ => None,
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match self {
            Entity::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut Player> {
        match self {
            Entity::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn update(&mut self, ctx: &mut UpdateContext) {
        match self {
            Entity::Generic(_) => {}
            Entity::Player(p) => p.update(ctx),
            Entity::Projectile(p) => p.update(ctx),
            Entity::Triangle(t) => t.update(ctx),
            Entity::Beam(b) => b.update(ctx),
            Entity::Pentagon(p) => p.update(ctx),
        }
    }

    /// Draw relative to the arena's top-left corner
    pub fn draw(&self, surface: &mut dyn DrawSurface, view: &Rect, now: f32) {
        match self {
            Entity::Generic(body) => surface.fill_triangles(&shapes::polygon_fan(
                body.collision_vertices(),
                view.origin(),
                body.tint,
            )),
            Entity::Player(p) => p.draw(surface, view, now),
            Entity::Projectile(p) => p.draw(surface, view),
            Entity::Triangle(t) => t.draw(surface, view, now),
            Entity::Beam(b) => b.draw(surface, view),
            Entity::Pentagon(p) => p.draw(surface, view, now),
        }
    }
}

impl From<Body> for Entity {
    fn from(body: Body) -> Self {
        Entity::Generic(body)
    }
}

impl From<Player> for Entity {
    fn from(p: Player) -> Self {
        Entity::Player(p)
    }
}

impl From<Projectile> for Entity {
    fn from(p: Projectile) -> Self {
        Entity::Projectile(p)
    }
}

impl From<Triangle> for Entity {
    fn from(t: Triangle) -> Self {
        Entity::Triangle(t)
    }
}

impl From<Beam> for Entity {
    fn from(b: Beam) -> Self {
        Entity::Beam(b)
    }
}

impl From<Pentagon> for Entity {
    fn from(p: Pentagon) -> Self {
        Entity::Pentagon(p)
    }
}

/// Shared by every variant that tints on hit
pub(crate) fn is_flashing(last_hit: Option<f32>, now: f32, duration: f32) -> bool {
    last_hit.is_some_and(|t| now - t < duration)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use rand::SeedableRng;

    /// Owns everything an `UpdateContext` borrows
    pub struct Harness {
        pub input: InputState,
        pub rng: Pcg32,
        pub events: Vec<GameEvent>,
        pub spawns: Vec<Entity>,
        pub bounds: Rect,
        pub screen: Vec2,
        pub now: f32,
    }

    impl Default for Harness {
        fn default() -> Self {
            Self {
                input: InputState::default(),
                rng: Pcg32::seed_from_u64(7),
                events: Vec::new(),
                spawns: Vec::new(),
                bounds: Rect::new(0.0, 0.0, 800.0, 600.0),
                screen: Vec2::new(800.0, 600.0),
                now: 0.0,
            }
        }
    }

    impl Harness {
        /// Advance the clock and build a context for one update
        pub fn step(&mut self, dt: f32, target: Option<Vec2>) -> UpdateContext<'_> {
            self.now += dt;
            UpdateContext {
                dt,
                now: self.now,
                bounds: self.bounds,
                screen: self.screen,
                input: &self.input,
                target,
                rng: &mut self.rng,
                events: &mut self.events,
                spawns: &mut self.spawns,
            }
        }
    }
}
