use std::io;
use std::time::Duration;

use arena_blaster::assets::{Assets, BuiltinAssets};
use arena_blaster::clock::Clock;
use arena_blaster::compute::init_state;
use arena_blaster::constants::*;
use arena_blaster::entities::*;
use arena_blaster::error::GameError;
use arena_blaster::game::{run, Outcome, Summary};
use arena_blaster::geometry::Rect;
use arena_blaster::input::{FrameInput, ScriptedInput};
use arena_blaster::render::{draw_frame, Effect, Image, Surface};

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Default)]
struct RecordingSurface {
    blits: Vec<(Image, Rect, Effect)>,
    presents: usize,
    /// Blits of the most recently presented frame.
    last_frame: Vec<(Image, Rect, Effect)>,
}

impl RecordingSurface {
    fn images(&self) -> Vec<Image> {
        self.blits.iter().map(|(image, _, _)| image.clone()).collect()
    }
}

impl Surface for RecordingSurface {
    fn blit(&mut self, image: &Image, dest: Rect, effect: Effect) {
        self.blits.push((image.clone(), dest, effect));
    }

    fn present(&mut self) -> io::Result<()> {
        self.presents += 1;
        self.last_frame = std::mem::take(&mut self.blits);
        Ok(())
    }
}

struct BrokenSurface;

impl Surface for BrokenSurface {
    fn blit(&mut self, _: &Image, _: Rect, _: Effect) {}

    fn present(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
    }
}

#[derive(Default)]
struct ManualClock {
    ticks: usize,
    pauses: Vec<Duration>,
}

impl Clock for ManualClock {
    fn wait_next_tick(&mut self) {
        self.ticks += 1;
    }

    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }
}

fn make_state() -> GameState {
    let mut s = init_state(Assets::load(&BuiltinAssets).unwrap());
    s.frame = 1;
    s
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── run ───────────────────────────────────────────────────────────────────────

#[test]
fn quit_before_first_frame() {
    let mut input = ScriptedInput::new(Vec::new());
    let mut surface = RecordingSurface::default();
    let mut clock = ManualClock::default();

    let summary = run(make_state(), &mut seeded_rng(), &mut input, &mut surface, &mut clock).unwrap();

    assert_eq!(
        summary,
        Summary {
            outcome: Outcome::Quit,
            score: 0,
            frames: 1,
        }
    );
    assert_eq!(surface.presents, 0);
    assert_eq!(clock.ticks, 0);
    assert!(clock.pauses.is_empty());
}

#[test]
fn one_present_and_wait_per_frame() {
    let mut input = ScriptedInput::new(vec![FrameInput::default(); 3]);
    let mut surface = RecordingSurface::default();
    let mut clock = ManualClock::default();

    let summary = run(make_state(), &mut seeded_rng(), &mut input, &mut surface, &mut clock).unwrap();

    assert_eq!(summary.outcome, Outcome::Quit);
    assert_eq!(summary.frames, 4);
    assert_eq!(surface.presents, 3);
    assert_eq!(clock.ticks, 3);
}

#[test]
fn caught_by_alien_shows_sad_frame_then_pauses() {
    let mut state = make_state();
    let assets = state.assets.clone();
    let mut alien = Alien::spawn(&assets, state.arena, &state.avatar, &mut seeded_rng());
    alien.rect.set_center(state.avatar.rect.center());
    state.aliens.push(alien);

    let mut input = ScriptedInput::new(vec![FrameInput::default(); 5]);
    let mut surface = RecordingSurface::default();
    let mut clock = ManualClock::default();

    let summary = run(state, &mut seeded_rng(), &mut input, &mut surface, &mut clock).unwrap();

    assert_eq!(
        summary.outcome,
        Outcome::GameOver(GameOverCause::CaughtByAlien)
    );
    assert_eq!(summary.frames, 2);
    assert_eq!(surface.presents, 1);
    assert_eq!(clock.ticks, 0);
    assert_eq!(clock.pauses, vec![Duration::from_millis(GAME_OVER_PAUSE_MS)]);
    assert_eq!(input.remaining(), 4);
    assert!(surface
        .last_frame
        .iter()
        .any(|(image, _, _)| *image == Image::AvatarSad));
}

#[test]
fn present_failure_is_reported() {
    let mut input = ScriptedInput::new(vec![FrameInput::default()]);
    let mut clock = ManualClock::default();
    let result = run(
        make_state(),
        &mut seeded_rng(),
        &mut input,
        &mut BrokenSurface,
        &mut clock,
    );
    assert!(matches!(result, Err(GameError::Io(_))));
}

// ── draw_frame ────────────────────────────────────────────────────────────────

#[test]
fn empty_state_draws_background_avatar_and_hud() {
    let state = make_state();
    let mut surface = RecordingSurface::default();
    draw_frame(&state, &mut surface);
    assert_eq!(
        surface.images(),
        vec![
            Image::Background,
            Image::Avatar(Facing::East),
            Image::ScoreLabel(0),
            Image::HealthGauge,
            Image::BaseLine,
        ]
    );
    assert_eq!(surface.presents, 0);
}

#[test]
fn draw_order_is_fixed() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    let assets = s.assets.clone();
    s.avatar.enter_hyper();
    s.score.value = 42;

    s.beams.push(Beam::fire(&s.avatar, assets.beam));
    let mut enemy = Enemy::spawn(EnemyKind::Grunt, &assets, s.arena, &mut rng);
    enemy.disable();
    let variant = enemy.variant;
    s.enemies.push(enemy);
    let bomb = Bomb::drop_from(&s.enemies[0].rect, &s.avatar, &mut rng);
    let palette = bomb.palette;
    s.bombs.push(bomb);
    let alien = Alien::spawn(&assets, s.arena, &s.avatar, &mut rng);
    let alien_variant = alien.variant;
    s.aliens.push(alien);
    s.explosions.push(Explosion::at(&s.avatar.rect, assets.explosion, 100));
    s.gravity_fields.push(GravityField::new(s.arena, GRAVITY_LIFE));
    s.continuous_beams.push(ContinuousBeam::fire(&s.avatar, assets.continuous_beam));
    s.bosses.push(Enemy::spawn(EnemyKind::Boss, &assets, s.arena, &mut rng));
    s.shields.push(Shield::place(&s.avatar, SHIELD_LIFE));
    s.health.take_hit();
    s.emp_flash = true;

    let mut surface = RecordingSurface::default();
    draw_frame(&s, &mut surface);

    assert_eq!(
        surface.images(),
        vec![
            Image::Background,
            Image::Avatar(Facing::East),
            Image::Beam(Facing::East),
            Image::Enemy(variant),
            Image::Bomb(palette),
            Image::Alien(alien_variant),
            Image::Explosion(0),
            Image::GravityField,
            Image::ContinuousBeam(Facing::East),
            Image::Boss,
            Image::Shield(Facing::East),
            Image::ScoreLabel(42),
            Image::HealthGauge,
            Image::DamageMark,
            Image::BaseLine,
            Image::EmpFlash,
        ]
    );

    let effects: Vec<Effect> = surface.blits.iter().map(|(_, _, e)| *e).collect();
    assert_eq!(effects[1], Effect::Inverted);
    assert_eq!(effects[3], Effect::Dimmed);
    assert_eq!(effects[2], Effect::None);
}

#[test]
fn mood_selects_avatar_image() {
    let mut s = make_state();
    for (mood, expected) in [(Mood::Joy, Image::AvatarJoy), (Mood::Sad, Image::AvatarSad)] {
        s.avatar.mood = mood;
        let mut surface = RecordingSurface::default();
        draw_frame(&s, &mut surface);
        assert_eq!(surface.blits[1].0, expected);
        assert_eq!(surface.blits[1].1, s.avatar.rect);
    }
}

#[test]
fn score_label_sits_bottom_left() {
    let s = make_state();
    let mut surface = RecordingSurface::default();
    draw_frame(&s, &mut surface);
    let (_, rect, _) = &surface.blits[2];
    assert_eq!(rect.center(), Vec2::new(100.0, ARENA_HEIGHT - 50.0));
    assert_eq!(rect.size(), Vec2::new(200.0, 40.0));
}
