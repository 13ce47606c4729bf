//! Data-driven game balance
//!
//! Every per-type constant lives here so a JSON file can retune a run without
//! a rebuild. Missing fields fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Player movement, health and weapon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub radius: f32,
    /// Pixels per second
    pub speed: f32,
    pub max_health: f32,
    /// Seconds after a hit during which damage is ignored
    pub grace_period: f32,
    /// Seconds of red tint after a hit
    pub flash_duration: f32,
    pub death_duration: f32,
    /// Death flash toggles per second
    pub death_flash_rate: f32,
    /// Smallest size fraction while shrinking
    pub death_min_scale: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub projectile_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: 25.0,
            speed: 500.0,
            max_health: 20.0,
            grace_period: 0.2,
            flash_duration: 0.05,
            death_duration: 1.0,
            death_flash_rate: 10.0,
            death_min_scale: 0.1,
            fire_rate: 3.0,
            projectile_speed: 1500.0,
        }
    }
}

/// Three-phase knockback response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnockbackTuning {
    /// Impulse magnitude applied by enemy contact
    pub impulse: f32,
    /// Fraction of the impulse applied as instant displacement
    pub immediate: f32,
    /// Multiplier for the rapid phase velocity
    pub rapid: f32,
    /// Seconds for the rapid phase to decay to zero
    pub rapid_duration: f32,
    /// Multiplier for the trailing phase velocity
    pub trailing: f32,
    /// Trailing decay per second (higher = faster)
    pub decay: f32,
    /// Trailing speed below which the velocity snaps to zero
    pub min_speed: f32,
}

impl Default for KnockbackTuning {
    fn default() -> Self {
        Self {
            impulse: 50.0,
            immediate: 0.2,
            rapid: 16.0,
            rapid_duration: 0.04,
            trailing: 0.1,
            decay: 12.0,
            min_speed: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub size: f32,
    pub damage: f32,
    /// Pixels an arena edge grows when a projectile leaves through it
    pub edge_expand: f32,
    /// Seconds for the resize animation
    pub resize_duration: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            size: 10.0,
            damage: 10.0,
            edge_expand: 100.0,
            resize_duration: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangleTuning {
    pub width: f32,
    pub height: f32,
    pub health: f32,
    pub score: u32,
    pub base_speed: f32,
    /// Spawn speed is uniform in `base_speed ± speed_range`
    pub speed_range: f32,
    /// Degrees per second
    pub spin_rate: f32,
    /// Per-axis homing noise magnitude
    pub homing_deviation: f32,
    pub flash_duration: f32,
    /// Health lost by the player on contact
    pub contact_damage: f32,
}

impl Default for TriangleTuning {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 51.0,
            health: 50.0,
            score: 10,
            base_speed: 100.0,
            speed_range: 50.0,
            spin_rate: 60.0,
            homing_deviation: 0.2,
            flash_duration: 0.05,
            contact_damage: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PentagonTuning {
    pub size: f32,
    pub health: f32,
    pub score: u32,
    /// Degrees per second
    pub spin_rate: f32,
    pub flash_duration: f32,
    pub contact_damage: f32,
}

impl Default for PentagonTuning {
    fn default() -> Self {
        Self {
            size: 100.0,
            health: 500.0,
            score: 50,
            spin_rate: 10.0,
            flash_duration: 0.05,
            contact_damage: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamTuning {
    pub width: f32,
    /// Side of the square the beam spawns as
    pub initial_size: f32,
    pub warning_duration: f32,
    pub expand_duration: f32,
    pub active_duration: f32,
    pub fade_duration: f32,
    /// Warning strip length as a fraction of the screen extent
    pub warning_fraction: f32,
    /// Full length as a multiple of the screen extent
    pub overscale: f32,
    /// How far the warning strip pokes into the arena
    pub edge_inset: f32,
    pub damage: f32,
}

impl Default for BeamTuning {
    fn default() -> Self {
        Self {
            width: 200.0,
            initial_size: 20.0,
            warning_duration: 1.5,
            expand_duration: 0.2,
            active_duration: 1.0,
            fade_duration: 1.0,
            warning_fraction: 0.1,
            overscale: 2.5,
            edge_inset: 20.0,
            damage: 2.0,
        }
    }
}

/// Spawn timers and randomization limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub triangle_interval: f32,
    pub beam_interval: f32,
    pub pentagon_interval: f32,
    pub wave_min: u32,
    pub wave_max: u32,
    /// Distance outside the arena edge chasers appear at
    pub edge_margin_min: f32,
    pub edge_margin_max: f32,
    pub pentagon_group_min: u32,
    pub pentagon_group_max: u32,
    pub pentagon_min_distance: f32,
    /// Rejection sampling attempts per pentagon before giving up
    pub pentagon_placement_attempts: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            triangle_interval: 5.0,
            beam_interval: 5.0,
            pentagon_interval: 5.0,
            wave_min: 1,
            wave_max: 4,
            edge_margin_min: 50.0,
            edge_margin_max: 100.0,
            pentagon_group_min: 1,
            pentagon_group_max: 3,
            pentagon_min_distance: 500.0,
            pentagon_placement_attempts: 64,
        }
    }
}

/// All balance knobs for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub knockback: KnockbackTuning,
    pub projectile: ProjectileTuning,
    pub triangle: TriangleTuning,
    pub pentagon: PentagonTuning,
    pub beam: BeamTuning,
    pub spawn: SpawnTuning,
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Bad tuning file {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No tuning at {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }
}
