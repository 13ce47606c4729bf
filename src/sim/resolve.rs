//! Collision outcomes by entity-kind pair
//!
//! Dispatch is order-independent: the pair is sorted by `EntityKind` before
//! the rule is looked up, so `(Triangle, Projectile)` and
//! `(Projectile, Triangle)` land in the same handler.

use super::body::EntityKind;
use super::entity::Entity;
use super::event::GameEvent;
use super::store::{EntityId, EntityStore};
use crate::tuning::Tuning;

/// What a colliding pair is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Projectile damages a triangle or pentagon and is consumed
    ProjectileHit,
    /// Triangle or pentagon body-checks the player: damage plus knockback
    EnemyContact,
    /// Beam burns the player while expanding or active
    BeamContact,
    Ignored,
}

/// Inputs the resolver needs beyond the two entities
pub struct ResolveContext<'a> {
    /// Simulation clock in seconds
    pub now: f32,
    pub tuning: &'a Tuning,
    pub events: &'a mut Vec<GameEvent>,
}

/// The rule for a kind pair, in either order
pub fn rule_for(a: EntityKind, b: EntityKind) -> Resolution {
    use EntityKind::*;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    match (lo, hi) {
        (Projectile, Triangle) | (Projectile, Pentagon) => Resolution::ProjectileHit,
        (Player, Triangle) | (Player, Pentagon) => Resolution::EnemyContact,
        (Player, Beam) => Resolution::BeamContact,
        _ => Resolution::Ignored,
    }
}

/// Apply the gameplay effect of `a` touching `b`
///
/// Entities are only ever marked inactive here; removal happens in the
/// manager's sweep.
pub fn handle_collision(
    store: &mut EntityStore<Entity>,
    a: EntityId,
    b: EntityId,
    ctx: &mut ResolveContext,
) -> Resolution {
    let (Some(ka), Some(kb)) = (
        store.get(a).map(Entity::kind),
        store.get(b).map(Entity::kind),
    ) else {
        return Resolution::Ignored;
    };
    // Lower kind first: Player < Projectile < Triangle < Beam < Pentagon
    let (first, second) = if ka <= kb { (a, b) } else { (b, a) };

    let rule = rule_for(ka, kb);
    match rule {
        Resolution::ProjectileHit => projectile_hit(store, first, second, ctx),
        Resolution::EnemyContact => enemy_contact(store, first, second, ctx),
        Resolution::BeamContact => beam_contact(store, first, second, ctx),
        Resolution::Ignored => {}
    }
    rule
}

fn projectile_hit(
    store: &mut EntityStore<Entity>,
    projectile: EntityId,
    enemy: EntityId,
    ctx: &mut ResolveContext,
) {
    let Some((Entity::Projectile(shot), target)) = store.get_pair_mut(projectile, enemy) else {
        return;
    };
    if !shot.body.active || !target.is_active() {
        return;
    }

    let damage = shot.damage();
    shot.body.active = false;

    let (destroyed, score, kind) = match target {
        Entity::Triangle(t) => (t.take_damage(damage, ctx.now), t.score(), EntityKind::Triangle),
        Entity::Pentagon(p) => (p.take_damage(damage, ctx.now), p.score(), EntityKind::Pentagon),
        _ => return,
    };
    log::debug!("Projectile hit {kind:?} for {damage}");

    if destroyed {
        target.body_mut().active = false;
        log::info!("{kind:?} destroyed, +{score} points");
        award_score(store, score);
        ctx.events.push(GameEvent::EnemyDestroyed { kind, score });
    }
}

fn enemy_contact(
    store: &mut EntityStore<Entity>,
    player: EntityId,
    enemy: EntityId,
    ctx: &mut ResolveContext,
) {
    let Some((Entity::Player(player), enemy)) = store.get_pair_mut(player, enemy) else {
        return;
    };
    if !player.body.active || !enemy.is_active() || player.is_dying() {
        return;
    }

    let damage = match enemy.kind() {
        EntityKind::Triangle => ctx.tuning.triangle.contact_damage,
        EntityKind::Pentagon => ctx.tuning.pentagon.contact_damage,
        _ => return,
    };
    if player.change_health_by(-damage, ctx.now) {
        log::debug!(
            "{:?} hit player, health {}",
            enemy.kind(),
            player.health().current()
        );
        ctx.events.push(GameEvent::PlayerHit {
            damage,
            health: player.health().current(),
        });
    }

    let away = (player.body.position() - enemy.body().position()).normalize_or_zero();
    player.apply_knockback(away * ctx.tuning.knockback.impulse);
}

fn beam_contact(
    store: &mut EntityStore<Entity>,
    player: EntityId,
    beam: EntityId,
    ctx: &mut ResolveContext,
) {
    let Some((Entity::Player(player), Entity::Beam(beam))) = store.get_pair_mut(player, beam) else {
        return;
    };
    if !player.body.active || !beam.body.active || player.is_dying() || !beam.is_damaging() {
        return;
    }

    let damage = beam.damage();
    if player.change_health_by(-damage, ctx.now) {
        log::debug!("Beam hit player, health {}", player.health().current());
        ctx.events.push(GameEvent::PlayerHit {
            damage,
            health: player.health().current(),
        });
    }
}

fn award_score(store: &mut EntityStore<Entity>, score: u32) {
    match store.iter_mut().find_map(Entity::as_player_mut) {
        Some(player) => player.add_score(score),
        None => log::warn!("No player to credit {score} points to"),
    }
}
