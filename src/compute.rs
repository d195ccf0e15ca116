/// Frame orchestration.
///
/// `tick` takes an immutable reference to the current `GameState` (plus the
/// frame's input and an RNG handle) and returns the next state. Internally it
/// works on a copy through the phase functions below, which are public so
/// tests can drive a single phase. All randomness comes through the injected
/// RNG.
use glam::Vec2;
use rand::Rng;

use crate::abilities::{self, Ability};
use crate::assets::Assets;
use crate::collision;
use crate::constants::*;
use crate::entities::{
    Alien, Avatar, Bomb, CollisionLine, Enemy, EnemyKind, GameState, GameStatus, HealthBar,
    Score,
};
use crate::input::{FrameInput, InputEvent, Key};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state from resolved sprite sizes.
pub fn init_state(assets: Assets) -> GameState {
    let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
    let (x, y) = AVATAR_START;
    GameState {
        avatar: Avatar::new(Vec2::new(x, y), assets.avatar),
        beams: Vec::new(),
        continuous_beams: Vec::new(),
        bombs: Vec::new(),
        explosions: Vec::new(),
        enemies: Vec::new(),
        bosses: Vec::new(),
        aliens: Vec::new(),
        shields: Vec::new(),
        gravity_fields: Vec::new(),
        health: HealthBar::new(arena),
        base_line: CollisionLine::new(arena),
        score: Score::default(),
        status: GameStatus::Playing,
        frame: 0,
        arena,
        emp_flash: false,
        assets,
    }
}

// ── Phases ───────────────────────────────────────────────────────────────────

/// Dispatches one discrete input event. Only presses of ability keys do
/// anything here; held keys are read separately each frame.
pub fn handle_event(state: &mut GameState, event: &InputEvent) {
    if let InputEvent::Pressed(key) = event {
        if let Some(ability) = Ability::bound_to(*key) {
            abilities::invoke(state, ability);
        }
    }
}

/// Timed and score-triggered spawns, then bomb drops from stopped enemies.
pub fn spawn_timed(state: &mut GameState, rng: &mut impl Rng) {
    if state.score.value >= BOSS_SCORE_THRESHOLD && state.bosses.is_empty() {
        let boss = Enemy::spawn(EnemyKind::Boss, &state.assets, state.arena, rng);
        tracing::info!(frame = state.frame, score = state.score.value, "boss incoming");
        state.bosses.push(boss);
    }

    if state.frame % ENEMY_SPAWN_EVERY == 0 {
        let enemy = Enemy::spawn(EnemyKind::Grunt, &state.assets, state.arena, rng);
        tracing::debug!(frame = state.frame, x = enemy.rect.x, "enemy spawned");
        state.enemies.push(enemy);
    }

    if state.frame % ALIEN_SPAWN_EVERY == 0 {
        let alien = Alien::spawn(&state.assets, state.arena, &state.avatar, rng);
        tracing::debug!(frame = state.frame, x = alien.rect.x, "alien spawned");
        state.aliens.push(alien);
    }

    let frame = state.frame;
    let droppers: Vec<_> = state
        .bosses
        .iter()
        .chain(state.enemies.iter())
        .filter(|dropper| dropper.drops_bomb_at(frame))
        .map(|dropper| dropper.rect)
        .collect();
    for source in droppers {
        let bomb = Bomb::drop_from(&source, &state.avatar, rng);
        state.bombs.push(bomb);
    }
}

/// Moves every entity one frame and drops those that expired or left the arena.
pub fn update_entities(state: &mut GameState, input: &FrameInput) {
    let arena = state.arena;
    state.avatar.update(input, arena);
    state.beams.retain_mut(|beam| beam.update(arena));
    state.enemies.retain_mut(|enemy| enemy.update(arena));
    state.bombs.retain_mut(|bomb| bomb.update(arena));
    state.aliens.retain_mut(|alien| alien.update(arena));
    state.explosions.retain_mut(|explosion| explosion.update());
    state.gravity_fields.retain_mut(|field| field.update());
    state.continuous_beams.retain_mut(|beam| beam.update(arena));
    state.bosses.retain_mut(|boss| boss.update(arena));
    state.shields.retain_mut(|shield| shield.update());
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame. A finished game is returned unchanged.
pub fn tick(state: &GameState, input: &FrameInput, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    if next.status != GameStatus::Playing {
        return next;
    }
    next.emp_flash = false;

    for event in &input.events {
        handle_event(&mut next, event);
    }
    next.avatar.set_boost(input.is_held(Key::Boost));

    spawn_timed(&mut next, rng);
    update_entities(&mut next, input);
    collision::resolve(&mut next);

    next.frame += 1;
    next
}
