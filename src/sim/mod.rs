//! Simulation module
//!
//! All gameplay logic lives here:
//! - Geometry and SAT polygon collision
//! - The entity set and its per-frame behaviour
//! - Broad-phase pair checks and kind-pair collision resolution
//! - Spawning, phases and frame ordering (`GameManager`)
//!
//! Nothing in here touches a window or GPU; the host supplies bounds, input
//! and a draw surface through `platform` and `render`.

pub mod beam;
pub mod body;
pub mod collision;
pub mod entity;
pub mod event;
pub mod geometry;
pub mod manager;
pub mod pentagon;
pub mod player;
pub mod polygon;
pub mod projectile;
pub mod resolve;
pub mod store;
pub mod triangle;

pub use beam::{Beam, BeamState};
pub use body::{Body, EntityKind, Health, Scope};
pub use collision::CollisionManager;
pub use entity::{Entity, UpdateContext};
pub use event::GameEvent;
pub use geometry::{Edge, Interval, Rect};
pub use manager::{GameManager, GamePhase};
pub use pentagon::Pentagon;
pub use player::{Knockback, Player};
pub use polygon::{Polygon, Shape, sat_overlap};
pub use projectile::Projectile;
pub use resolve::{Resolution, ResolveContext, handle_collision};
pub use store::{EntityId, EntityStore};
pub use triangle::Triangle;
