//! Top-level game state: entity ownership, frame ordering, spawning, phases
//!
//! One `update` call is one frame:
//! 1. spawn timers advance and due spawns join the store
//! 2. every active entity updates, including anything spawned this frame
//! 3. arena resize requests go to the host, a finished death ends the run
//! 4. the broad phase checks all pairs and the resolver applies outcomes
//! 5. inactive entities are swept
//!
//! Paused and game-over frames skip all of it; entities stay frozen but are
//! still drawn.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::beam::Beam;
use super::collision::CollisionManager;
use super::entity::{Entity, UpdateContext};
use super::event::GameEvent;
use super::geometry::{Edge, Rect};
use super::pentagon::Pentagon;
use super::player::Player;
use super::projectile::Projectile;
use super::resolve::{ResolveContext, handle_collision};
use super::store::{EntityId, EntityStore};
use super::triangle::Triangle;
use crate::consts::MAX_FRAME_DT;
use crate::platform::{ArenaHost, InputEvent, InputState, Key, MouseButton};
use crate::render::{DrawSurface, colors};
use crate::tuning::Tuning;

/// Top-level run state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Paused,
    GameOver,
}

/// Seconds accumulated toward each periodic spawn
#[derive(Debug, Clone, Copy, Default)]
struct SpawnTimers {
    triangle: f32,
    beam: f32,
    pentagon: f32,
}

/// Owns every entity and drives the frame
///
/// Events pile up in an outbox until the host calls `drain_events`; a host
/// that never drains keeps them all. `restart_game` discards whatever the
/// previous run left behind.
pub struct GameManager {
    tuning: Tuning,
    store: EntityStore<Entity>,
    collisions: CollisionManager,
    phase: GamePhase,
    /// Simulation seconds since the run started
    clock: f32,
    timers: SpawnTimers,
    rng: Pcg32,
    events: Vec<GameEvent>,
    player: Option<EntityId>,
    /// Score at game over, kept after the player is swept
    final_score: u32,
    restart_requested: bool,
    /// Arena and screen as of the last update
    bounds: Rect,
    screen: Vec2,
}

impl GameManager {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        log::info!("Game manager created (seed {seed})");
        Self {
            tuning,
            store: EntityStore::new(),
            collisions: CollisionManager::new(),
            phase: GamePhase::Running,
            clock: 0.0,
            timers: SpawnTimers::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            player: None,
            final_score: 0,
            restart_requested: false,
            bounds: Rect::default(),
            screen: Vec2::ZERO,
        }
    }

    /// Adopt the host's arena and put a fresh player at its centre
    pub fn start(&mut self, host: &dyn ArenaHost) -> EntityId {
        self.bounds = host.bounds();
        self.screen = host.screen_size();
        self.spawn_player(self.bounds.center())
    }

    // --- Accessors ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn store(&self) -> &EntityStore<Entity> {
        &self.store
    }

    pub fn collisions(&self) -> &CollisionManager {
        &self.collisions
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.store.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.store.get_mut(id)
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    /// The player while it is still stored
    pub fn player(&self) -> Option<&Player> {
        self.player
            .and_then(|id| self.store.get(id))
            .and_then(Entity::as_player)
    }

    /// Live score, or the final score once the player is gone
    pub fn score(&self) -> u32 {
        self.player().map_or(self.final_score, Player::score)
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Frame ---

    pub fn update(&mut self, dt: f32, input: &InputState, host: &mut dyn ArenaHost) {
        if self.restart_requested {
            self.restart_requested = false;
            self.restart_game(host);
        }

        self.bounds = host.bounds();
        self.screen = host.screen_size();
        if self.phase != GamePhase::Running {
            return;
        }

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.clock += dt;

        self.update_spawns(dt);

        let first_event = self.events.len();
        self.update_entities(dt, input);

        let mut player_died = false;
        for event in &self.events[first_event..] {
            match event {
                GameEvent::ArenaResize(request) => host.request_resize(*request),
                GameEvent::PlayerDied => player_died = true,
                _ => {}
            }
        }
        if player_died {
            self.trigger_game_over();
        }

        self.check_collisions();
        self.cleanup_inactive_objects();
    }

    fn update_entities(&mut self, dt: f32, input: &InputState) {
        let mut spawns = Vec::new();
        let mut queue = self.store.ids();
        let mut next = 0;
        // Entities spawned mid-pass are queued so they update this frame too
        while next < queue.len() {
            let id = queue[next];
            next += 1;
            let target = self
                .store
                .get(id)
                .and_then(Entity::homing_target)
                .and_then(|t| self.store.get(t))
                .filter(|e| e.is_active())
                .map(|e| e.body().position());

            let Some(entity) = self.store.get_mut(id) else {
                continue;
            };
            if !entity.is_active() {
                continue;
            }
            let mut ctx = UpdateContext {
                dt,
                now: self.clock,
                bounds: self.bounds,
                screen: self.screen,
                input,
                target,
                rng: &mut self.rng,
                events: &mut self.events,
                spawns: &mut spawns,
            };
            entity.update(&mut ctx);

            for spawned in spawns.drain(..) {
                queue.push(self.add_object(spawned));
            }
        }
    }

    /// Run the broad phase and resolve every overlapping pair
    pub fn check_collisions(&mut self) -> usize {
        let Self {
            store,
            collisions,
            tuning,
            events,
            clock,
            ..
        } = self;
        let mut ctx = ResolveContext {
            now: *clock,
            tuning,
            events,
        };
        collisions.check_collisions(store, |store, a, b| {
            handle_collision(store, a, b, &mut ctx);
        })
    }

    /// Drop every inactive entity; returns how many went
    pub fn cleanup_inactive_objects(&mut self) -> usize {
        let mut removed = 0;
        for id in self.store.ids() {
            if self.store.get(id).is_some_and(|e| !e.is_active()) {
                self.collisions.remove_object(id);
                self.store.remove(id);
                removed += 1;
            }
        }
        if removed > 0 {
            log::trace!("Swept {removed} inactive entities");
        }
        removed
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let view = self.bounds;
        // Player last so the HUD sits on top
        for players in [false, true] {
            for entity in self
                .store
                .iter()
                .filter(|e| e.is_active() && e.as_player().is_some() == players)
            {
                entity.draw(surface, &view, self.clock);
            }
        }

        let center = surface.output_size() / 2.0;
        match self.phase {
            GamePhase::Running => {}
            GamePhase::Paused => surface.draw_text("PAUSED", center, 32.0, colors::WHITE),
            GamePhase::GameOver => {
                surface.draw_text("GAME OVER", center, 32.0, colors::RED);
                surface.draw_text(
                    &format!("Final score: {}", self.score()),
                    center + Vec2::new(0.0, 40.0),
                    16.0,
                    colors::WHITE,
                );
            }
        }
    }

    // --- Entities ---

    /// Take ownership of an entity and register it for collisions
    pub fn add_object(&mut self, entity: Entity) -> EntityId {
        let is_player = entity.as_player().is_some();
        let id = self.store.insert(entity);
        self.collisions.add_object(id);
        if is_player && self.player().is_none() {
            self.player = Some(id);
        }
        id
    }

    /// Forward a discrete input event on behalf of `player`
    pub fn handle_input(&mut self, event: &InputEvent, player: EntityId) {
        match *event {
            InputEvent::KeyPressed(Key::Pause) => match self.phase {
                GamePhase::Running => self.pause_game(),
                GamePhase::Paused => self.resume_game(),
                GamePhase::GameOver => {}
            },
            InputEvent::KeyPressed(Key::Restart) if self.phase == GamePhase::GameOver => {
                self.restart_requested = true;
            }
            InputEvent::MousePressed {
                button: MouseButton::Left,
                position,
            } if self.phase == GamePhase::Running => {
                let now = self.clock;
                let shot = self
                    .store
                    .get_mut(player)
                    .and_then(Entity::as_player_mut)
                    .and_then(|p| p.try_shoot(position, now));
                if let Some(projectile) = shot {
                    self.add_object(projectile.into());
                }
            }
            _ => {}
        }
    }

    pub fn spawn_player(&mut self, position: Vec2) -> EntityId {
        let id = self.add_object(Player::new(position, &self.tuning).into());
        self.player = Some(id);
        log::info!("Player spawned at {position}");
        id
    }

    pub fn spawn_projectile(&mut self, position: Vec2, direction: Vec2, speed: f32) -> EntityId {
        let projectile = Projectile::new(
            position,
            direction.normalize_or_zero(),
            speed,
            &self.tuning.projectile,
        );
        self.add_object(projectile.into())
    }

    fn player_position(&self) -> Option<Vec2> {
        self.player()
            .filter(|p| p.body.active)
            .map(|p| p.body.position())
    }

    /// 1-4 chasers just outside a random arena edge, heading for the player
    pub fn spawn_triangle_wave(&mut self) -> Vec<EntityId> {
        let t = self.tuning.triangle;
        let s = self.tuning.spawn;
        let target = self.player_position().unwrap_or(self.bounds.center());
        let count = self.rng.random_range(s.wave_min..=s.wave_max.max(s.wave_min));

        // One margin for the whole wave
        let margin = self
            .rng
            .random_range(s.edge_margin_min..=s.edge_margin_max.max(s.edge_margin_min));

        let mut ids = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let edge = Edge::ALL[self.rng.random_range(0..Edge::ALL.len())];
            let position = self.outside_edge(edge, margin);

            let spread = t.speed_range.abs();
            let speed = t.base_speed + self.rng.random_range(-spread..=spread);
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let spin = if self.rng.random::<bool>() { 1.0 } else { -1.0 };

            let mut triangle = Triangle::new(position, speed, angle, spin, self.player, &t);
            triangle
                .body
                .set_direction((target - position).normalize_or_zero());
            ids.push(self.add_object(triangle.into()));
        }
        log::info!("Spawned wave of {count} triangles");
        ids
    }

    /// Random point along `edge`, `margin` pixels outside the arena
    fn outside_edge(&mut self, edge: Edge, margin: f32) -> Vec2 {
        let b = self.bounds;
        let along_x = b.left() + self.rng.random::<f32>() * b.width;
        let along_y = b.top() + self.rng.random::<f32>() * b.height;
        match edge {
            Edge::Top => Vec2::new(along_x, b.top() - margin),
            Edge::Bottom => Vec2::new(along_x, b.bottom() + margin),
            Edge::Left => Vec2::new(b.left() - margin, along_y),
            Edge::Right => Vec2::new(b.right() + margin, along_y),
        }
    }

    /// A beam from a random edge, lined up with the player
    pub fn spawn_beam(&mut self) -> Option<EntityId> {
        let Some(target) = self.player_position() else {
            log::debug!("No player to aim a beam at");
            return None;
        };
        let edge_index = self.rng.random_range(0..4);
        Some(self.spawn_beam_from(edge_index, target))
    }

    /// Beam from `edge_index` crossing `target`; a bad index gives an inert beam
    pub fn spawn_beam_from(&mut self, edge_index: i32, target: Vec2) -> EntityId {
        let b = self.bounds;
        let position = match Edge::from_index(edge_index) {
            Some(Edge::Top) => Vec2::new(target.x, b.top()),
            Some(Edge::Bottom) => Vec2::new(target.x, b.bottom()),
            Some(Edge::Left) => Vec2::new(b.left(), target.y),
            Some(Edge::Right) => Vec2::new(b.right(), target.y),
            None => target,
        };
        log::info!("Beam spawned from edge {edge_index}");
        self.add_object(Beam::new(edge_index, position, &self.tuning.beam).into())
    }

    /// 1-3 pentagons anywhere on screen, away from the player
    pub fn spawn_pentagons(&mut self) -> Vec<EntityId> {
        let s = self.tuning.spawn;
        let avoid = self.player_position();
        let count = self
            .rng
            .random_range(s.pentagon_group_min..=s.pentagon_group_max.max(s.pentagon_group_min));

        let mut ids = Vec::new();
        for _ in 0..count {
            let Some(position) = self.sample_clear_of(avoid, s.pentagon_min_distance) else {
                log::warn!(
                    "No pentagon spot {} px from the player after {} tries",
                    s.pentagon_min_distance,
                    s.pentagon_placement_attempts
                );
                continue;
            };
            let angle = (self.rng.random_range(0..360) as f32).to_radians();
            ids.push(self.add_object(Pentagon::new(position, angle, &self.tuning.pentagon).into()));
        }
        log::info!("Spawned {} pentagons", ids.len());
        ids
    }

    /// Rejection-sample a screen point at least `min_distance` from `avoid`
    fn sample_clear_of(&mut self, avoid: Option<Vec2>, min_distance: f32) -> Option<Vec2> {
        for _ in 0..self.tuning.spawn.pentagon_placement_attempts {
            let p = Vec2::new(
                self.rng.random::<f32>() * self.screen.x,
                self.rng.random::<f32>() * self.screen.y,
            );
            if avoid.is_none_or(|a| a.distance(p) >= min_distance) {
                return Some(p);
            }
        }
        None
    }

    fn update_spawns(&mut self, dt: f32) {
        let s = self.tuning.spawn;
        self.timers.triangle += dt;
        self.timers.beam += dt;
        self.timers.pentagon += dt;

        if self.timers.triangle >= s.triangle_interval {
            self.timers.triangle = 0.0;
            self.spawn_triangle_wave();
        }
        if self.timers.beam >= s.beam_interval {
            self.timers.beam = 0.0;
            self.spawn_beam();
        }
        if self.timers.pentagon >= s.pentagon_interval {
            self.timers.pentagon = 0.0;
            self.spawn_pentagons();
        }
    }

    // --- Phases ---

    pub fn pause_game(&mut self) {
        if self.phase == GamePhase::Running {
            log::info!("Paused");
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume_game(&mut self) {
        if self.phase == GamePhase::Paused {
            log::info!("Resumed");
            self.phase = GamePhase::Running;
        }
    }

    pub fn trigger_game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.final_score = self.score();
        self.phase = GamePhase::GameOver;
        log::info!("Game over, final score {}", self.final_score);
        self.events.push(GameEvent::GameOver {
            score: self.final_score,
        });
    }

    /// Fresh run: arena reset, every entity and timer cleared, new player
    pub fn restart_game(&mut self, host: &mut dyn ArenaHost) -> EntityId {
        host.reset();
        self.store.clear();
        self.collisions.clear();
        self.events.clear();
        self.timers = SpawnTimers::default();
        self.clock = 0.0;
        self.final_score = 0;
        self.player = None;
        self.phase = GamePhase::Running;
        log::info!("Game restarted");
        self.start(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SimpleArena;
    use crate::render::RecordingSurface;
    use crate::sim::body::EntityKind;

    const DT: f32 = 1.0 / 60.0;

    fn arena() -> SimpleArena {
        SimpleArena::centered(Vec2::new(800.0, 600.0), Vec2::new(1920.0, 1080.0))
    }

    fn count(game: &GameManager, kind: EntityKind) -> usize {
        game.store().iter().filter(|e| e.kind() == kind).count()
    }

    #[test]
    fn test_projectile_hits_triangle_in_one_check() {
        let tuning = Tuning::default();
        let mut game = GameManager::new(tuning.clone(), 1);
        let shot = game.spawn_projectile(Vec2::ZERO, Vec2::X, 1500.0);
        let tri = game.add_object(
            Triangle::new(Vec2::new(10.0, 0.0), 100.0, 0.0, 1.0, None, &tuning.triangle).into(),
        );

        assert_eq!(game.check_collisions(), 1);

        let Some(Entity::Triangle(t)) = game.entity(tri) else {
            panic!("triangle missing");
        };
        assert_eq!(t.health().current(), 40.0);
        assert!(!game.entity(shot).is_some_and(Entity::is_active));
    }

    #[test]
    fn test_kill_is_swept_and_scored() {
        let tuning = Tuning::default();
        let mut game = GameManager::new(tuning.clone(), 1);
        let player = game.spawn_player(Vec2::new(500.0, 500.0));
        let mut triangle =
            Triangle::new(Vec2::new(10.0, 0.0), 100.0, 0.0, 1.0, None, &tuning.triangle);
        triangle.take_damage(40.0, 0.0);
        let tri = game.add_object(triangle.into());
        game.spawn_projectile(Vec2::ZERO, Vec2::X, 1500.0);

        game.check_collisions();
        assert_eq!(game.cleanup_inactive_objects(), 2);

        assert!(game.entity(tri).is_none());
        assert_eq!(game.collisions().len(), 1);
        assert_eq!(game.player().map(Player::score), Some(10));
        assert_eq!(game.player_id(), Some(player));
        assert!(game.drain_events().contains(&GameEvent::EnemyDestroyed {
            kind: EntityKind::Triangle,
            score: 10
        }));
    }

    #[test]
    fn test_spawn_timers_fill_the_arena() {
        let mut host = arena();
        let mut game = GameManager::new(Tuning::default(), 42);
        let player = game.start(&host);
        let input = InputState::default();

        for _ in 0..310 {
            game.update(DT, &input, &mut host);
        }

        let waves = count(&game, EntityKind::Triangle);
        assert!((1..=4).contains(&waves), "{waves} triangles");
        assert_eq!(count(&game, EntityKind::Beam), 1);
        let pentagons = count(&game, EntityKind::Pentagon);
        assert!((1..=3).contains(&pentagons), "{pentagons} pentagons");

        let center = host.bounds().center();
        for e in game.store().iter() {
            if let Entity::Pentagon(p) = e {
                assert!(p.body.position().distance(center) >= 500.0);
            }
            if let Entity::Triangle(t) = e {
                assert_eq!(t.target(), Some(player));
            }
        }
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut host = arena();
        let mut game = GameManager::new(Tuning::default(), 3);
        let player = game.start(&host);
        let mut input = InputState::default();
        input.right = true;

        game.handle_input(&InputEvent::KeyPressed(Key::Pause), player);
        assert_eq!(game.phase(), GamePhase::Paused);
        let before = game.player().map(|p| p.body.position());
        game.update(0.5, &input, &mut host);
        assert_eq!(game.player().map(|p| p.body.position()), before);
        assert_eq!(game.clock(), 0.0);

        let mut surface = RecordingSurface::new(Vec2::new(1920.0, 1080.0));
        game.draw(&mut surface);
        assert!(surface.texts().any(|t| t == "PAUSED"));
        assert!(surface.triangle_batches() >= 1);

        game.handle_input(&InputEvent::KeyPressed(Key::Pause), player);
        game.update(0.1, &input, &mut host);
        assert!(game.player().map(|p| p.body.position()) != before);
    }

    #[test]
    fn test_click_fires_and_edge_exit_grows_arena() {
        let mut host = arena();
        let mut game = GameManager::new(Tuning::default(), 5);
        let player = game.start(&host);
        let start = host.bounds();
        let aim = start.center() + Vec2::new(1000.0, 0.0);

        game.handle_input(
            &InputEvent::MousePressed {
                button: MouseButton::Left,
                position: aim,
            },
            player,
        );
        assert_eq!(count(&game, EntityKind::Projectile), 1);

        let input = InputState::default();
        for _ in 0..30 {
            game.update(DT, &input, &mut host);
        }
        assert_eq!(count(&game, EntityKind::Projectile), 0);
        assert_eq!(host.bounds().right(), start.right() + 100.0);
        assert_eq!(host.requests.len(), 1);
        assert!(
            game.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::ArenaResize(r) if r.edge == Edge::Right))
        );
    }

    #[test]
    fn test_death_ends_run_and_restart_resets() {
        let mut host = arena();
        let mut game = GameManager::new(Tuning::default(), 9);
        let player = game.start(&host);
        game.spawn_pentagons();
        if let Some(p) = game.entity_mut(player).and_then(Entity::as_player_mut) {
            p.add_score(25);
            p.change_health_by(-100.0, 0.0);
        }

        let input = InputState::default();
        for _ in 0..70 {
            game.update(DT, &input, &mut host);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(game.player().is_none(), "dead player is swept");
        assert_eq!(game.score(), 25);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::PlayerDied));
        assert!(events.contains(&GameEvent::GameOver { score: 25 }));

        // Frozen while the run is over
        let clock = game.clock();
        game.update(DT, &input, &mut host);
        assert_eq!(game.clock(), clock);

        game.handle_input(&InputEvent::KeyPressed(Key::Restart), player);
        game.update(DT, &input, &mut host);
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.store().len(), 1);
        assert_eq!(game.score(), 0);
        let fresh = game.player().expect("new player");
        assert_eq!(fresh.health().current(), 20.0);
        assert_ne!(game.player_id(), Some(player));
        assert!(game.entity(player).is_none());
    }

    #[test]
    fn test_stale_homing_target_is_ignored() {
        let mut host = arena();
        let mut game = GameManager::new(Tuning::default(), 11);
        let player = game.start(&host);
        let ids = game.spawn_triangle_wave();
        let heading = ids
            .iter()
            .filter_map(|&id| game.entity(id))
            .map(|e| e.body().direction())
            .collect::<Vec<_>>();

        // Player vanishes; triangles keep their last heading
        if let Some(e) = game.entity_mut(player) {
            e.body_mut().active = false;
        }
        game.cleanup_inactive_objects();
        game.update(DT, &InputState::default(), &mut host);

        let after = ids
            .iter()
            .filter_map(|&id| game.entity(id))
            .map(|e| e.body().direction())
            .collect::<Vec<_>>();
        assert_eq!(heading, after);
    }

    #[test]
    fn test_spawned_entities_update_before_collisions() {
        let mut host = arena();
        let mut tuning = Tuning::default();
        tuning.spawn.pentagon_interval = 0.0;
        let mut game = GameManager::new(tuning, 17);
        game.start(&host);

        game.update(DT, &InputState::default(), &mut host);

        // Spawn angles are whole degrees; one frame of spin adds 10/60 of one
        let spun = game
            .store()
            .iter()
            .filter(|e| e.kind() == EntityKind::Pentagon)
            .map(|e| e.body().angle().to_degrees())
            .collect::<Vec<_>>();
        assert!(!spun.is_empty());
        for degrees in spun {
            let fraction = degrees - degrees.floor();
            assert!((fraction - 10.0 / 60.0).abs() < 1e-2, "angle {degrees}");
        }
    }

    #[test]
    fn test_held_fire_projectile_moves_on_its_first_frame() {
        let mut host = arena();
        let mut game = GameManager::new(Tuning::default(), 19);
        game.start(&host);
        let center = host.bounds().center();
        let mut input = InputState::default();
        input.mouse_left = true;
        input.mouse_position = center + Vec2::new(300.0, 0.0);

        game.update(DT, &input, &mut host);

        let shots = game
            .store()
            .iter()
            .filter(|e| e.kind() == EntityKind::Projectile)
            .map(|e| e.body().position())
            .collect::<Vec<_>>();
        assert_eq!(shots.len(), 1);
        assert!((shots[0].x - (center.x + 1500.0 * DT)).abs() < 1e-2, "{}", shots[0]);
    }

    #[test]
    fn test_wave_shares_one_edge_margin() {
        let host = arena();
        let mut game = GameManager::new(Tuning::default(), 23);
        game.start(&host);
        let b = host.bounds();
        let outside = |p: Vec2| {
            (b.top() - p.y)
                .max(p.y - b.bottom())
                .max(b.left() - p.x)
                .max(p.x - b.right())
        };

        for _ in 0..20 {
            let margins = game
                .spawn_triangle_wave()
                .into_iter()
                .filter_map(|id| game.entity(id))
                .map(|e| outside(e.body().position()))
                .collect::<Vec<_>>();
            for m in &margins {
                assert!((50.0..=100.0).contains(m));
                assert!((m - margins[0]).abs() < 1e-3, "{margins:?}");
            }
        }
    }

    #[test]
    fn test_enemies_are_global_scope() {
        use crate::sim::body::Scope;

        let mut host = arena();
        let mut game = GameManager::new(Tuning::default(), 29);
        let player = game.start(&host);
        game.spawn_triangle_wave();
        game.spawn_pentagons();
        game.spawn_beam();
        game.handle_input(
            &InputEvent::MousePressed {
                button: MouseButton::Left,
                position: Vec2::ZERO,
            },
            player,
        );
        game.update(DT, &InputState::default(), &mut host);

        for e in game.store().iter() {
            let expected = match e.kind() {
                EntityKind::Player | EntityKind::Projectile => Scope::Local,
                _ => Scope::Global,
            };
            assert_eq!(e.body().scope, expected, "{:?}", e.kind());
        }
        assert_eq!(count(&game, EntityKind::Beam), 1);
    }

    #[test]
    fn test_restart_discards_undrained_events() {
        let mut host = arena();
        let mut game = GameManager::new(Tuning::default(), 31);
        game.start(&host);
        game.trigger_game_over();

        game.restart_game(&mut host);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_invalid_beam_edge_is_harmless() {
        let mut host = arena();
        let mut game = GameManager::new(Tuning::default(), 13);
        game.start(&host);
        let center = host.bounds().center();
        let beam = game.spawn_beam_from(9, center);

        let input = InputState::default();
        for _ in 0..180 {
            game.update(DT, &input, &mut host);
        }
        assert!(game.entity(beam).is_some());
        assert_eq!(game.player().map(|p| p.health().current()), Some(20.0));
    }
}
