//! Things the simulation tells its driver about

use serde::{Deserialize, Serialize};

use super::body::EntityKind;
use crate::platform::ResizeRequest;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile left through an arena edge
    ArenaResize(ResizeRequest),
    /// Damage actually landed on the player (grace period not active)
    PlayerHit { damage: f32, health: f32 },
    EnemyDestroyed { kind: EntityKind, score: u32 },
    /// Death animation finished
    PlayerDied,
    GameOver { score: u32 },
}
