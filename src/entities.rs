/// Game entity types and their per-frame update rules.
///
/// Every moving entity owns its rectangle and velocity and exposes an
/// `update` that advances it one frame and returns whether it is still alive.
/// Cross-entity interaction lives in `collision`, never here.
use glam::{IVec2, Vec2};
use rand::Rng;

use crate::assets::Assets;
use crate::constants::*;
use crate::geometry::{direction_to, in_arena, overlaps_arena, rotated_extent, Rect};
use crate::input::{FrameInput, Key};

/// Anything with a collision rectangle.
pub trait Body {
    fn rect(&self) -> &Rect;
}

macro_rules! impl_body {
    ($($ty:ty),* $(,)?) => {
        $(impl Body for $ty {
            fn rect(&self) -> &Rect {
                &self.rect
            }
        })*
    };
}

impl_body!(
    Avatar,
    Beam,
    ContinuousBeam,
    Bomb,
    Explosion,
    Enemy,
    Alien,
    Shield,
    GravityField,
    CollisionLine,
);

// ── Facing ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::East,
        Facing::NorthEast,
        Facing::North,
        Facing::NorthWest,
        Facing::West,
        Facing::SouthWest,
        Facing::South,
        Facing::SouthEast,
    ];

    /// Grid step for this direction (y grows downwards).
    pub fn delta(self) -> IVec2 {
        match self {
            Facing::East => IVec2::new(1, 0),
            Facing::NorthEast => IVec2::new(1, -1),
            Facing::North => IVec2::new(0, -1),
            Facing::NorthWest => IVec2::new(-1, -1),
            Facing::West => IVec2::new(-1, 0),
            Facing::SouthWest => IVec2::new(-1, 1),
            Facing::South => IVec2::new(0, 1),
            Facing::SouthEast => IVec2::new(1, 1),
        }
    }

    pub fn from_delta(delta: IVec2) -> Option<Facing> {
        Self::ALL.into_iter().find(|facing| facing.delta() == delta)
    }

    pub fn unit(self) -> Vec2 {
        self.delta().as_vec2().normalize()
    }
}

// ── Avatar ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvatarMode {
    Normal,
    Hyper,
}

/// Short-lived expression shown instead of the directional sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mood {
    Plain,
    Joy,
    Sad,
}

const MOVE_KEYS: [(Key, IVec2); 4] = [
    (Key::Up, IVec2::new(0, -1)),
    (Key::Down, IVec2::new(0, 1)),
    (Key::Left, IVec2::new(-1, 0)),
    (Key::Right, IVec2::new(1, 0)),
];

#[derive(Clone, Debug)]
pub struct Avatar {
    pub rect: Rect,
    pub facing: Facing,
    /// 0 while immobilized, `NORMAL_SPEED` or `BOOST_SPEED` otherwise. The
    /// avatar only steers at `NORMAL_SPEED`.
    pub speed: u32,
    pub mode: AvatarMode,
    pub hyper_life: i32,
    /// Frames spent immobilized so far.
    pub stun_frames: u32,
    pub mood: Mood,
}

impl Avatar {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            rect: Rect::from_center(center, size),
            facing: Facing::East,
            speed: NORMAL_SPEED,
            mode: AvatarMode::Normal,
            hyper_life: -1,
            stun_frames: 0,
            mood: Mood::Plain,
        }
    }

    pub fn is_immobilized(&self) -> bool {
        self.speed == 0
    }

    pub fn is_hyper(&self) -> bool {
        self.mode == AvatarMode::Hyper
    }

    pub fn stun(&mut self) {
        self.speed = 0;
        self.stun_frames = 0;
        self.mood = Mood::Sad;
    }

    pub fn enter_hyper(&mut self) {
        self.mode = AvatarMode::Hyper;
        self.hyper_life = HYPER_LIFE;
    }

    /// Boost only switches between normal and boosted speed; it never
    /// wakes an immobilized avatar.
    pub fn set_boost(&mut self, held: bool) {
        match (held, self.speed) {
            (true, NORMAL_SPEED) => self.speed = BOOST_SPEED,
            (false, BOOST_SPEED) => self.speed = NORMAL_SPEED,
            _ => {}
        }
    }

    pub fn update(&mut self, input: &FrameInput, arena: Vec2) {
        if self.is_immobilized() {
            self.stun_frames += 1;
            if self.stun_frames >= STUN_RECOVERY_FRAMES {
                self.speed = NORMAL_SPEED;
                self.stun_frames = 0;
            }
        } else if self.speed == NORMAL_SPEED {
            self.steer(input, arena);
        }

        if self.is_hyper() {
            self.hyper_life -= 1;
            if self.hyper_life < 0 {
                self.mode = AvatarMode::Normal;
            }
        }
    }

    fn steer(&mut self, input: &FrameInput, arena: Vec2) {
        let sum: IVec2 = MOVE_KEYS
            .iter()
            .filter(|(key, _)| input.is_held(*key))
            .map(|(_, delta)| *delta)
            .sum();

        // Out-of-bounds moves are undone on both axes, not clamped.
        let step = sum.as_vec2() * self.speed as f32;
        self.rect.translate(step);
        if !in_arena(&self.rect, arena) {
            self.rect.translate(-step);
        }

        if let Some(facing) = Facing::from_delta(sum) {
            self.facing = facing;
            self.mood = Mood::Plain;
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Beam {
    pub rect: Rect,
    pub facing: Facing,
    pub velocity: Vec2,
    pub speed: f32,
}

impl Beam {
    /// A beam one avatar-extent ahead of `avatar`, flying along its facing.
    pub fn fire(avatar: &Avatar, sprite: Vec2) -> Self {
        let velocity = avatar.facing.unit();
        let center = avatar.rect.center() + velocity * avatar.rect.size();
        Self {
            rect: Rect::from_center(center, rotated_extent(sprite, velocity)),
            facing: avatar.facing,
            velocity,
            speed: BEAM_SPEED,
        }
    }

    pub fn update(&mut self, arena: Vec2) -> bool {
        self.rect.translate(self.velocity * self.speed);
        in_arena(&self.rect, arena)
    }
}

/// Long, slow beam that sweeps everything it touches until its lifetime runs out.
#[derive(Clone, Debug)]
pub struct ContinuousBeam {
    pub rect: Rect,
    pub facing: Facing,
    pub velocity: Vec2,
    pub speed: f32,
    pub life: i32,
}

impl ContinuousBeam {
    pub fn fire(avatar: &Avatar, sprite: Vec2) -> Self {
        let velocity = avatar.facing.unit();
        let center =
            avatar.rect.center() + velocity * avatar.rect.size() * CONTINUOUS_BEAM_REACH;
        Self {
            rect: Rect::from_center(center, rotated_extent(sprite, velocity)),
            facing: avatar.facing,
            velocity,
            speed: CONTINUOUS_BEAM_SPEED,
            life: CONTINUOUS_BEAM_LIFE,
        }
    }

    /// The beam is longer than the arena is wide, so it only counts as gone
    /// once it no longer overlaps the arena at all.
    pub fn update(&mut self, arena: Vec2) -> bool {
        self.rect.translate(self.velocity * self.speed);
        self.life -= 1;
        self.life >= 0 && overlaps_arena(&self.rect, arena)
    }
}

// ── Bombs ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombState {
    Active,
    /// Neutralized by an EMP: harmless to the avatar.
    Inactive,
}

#[derive(Clone, Debug)]
pub struct Bomb {
    pub rect: Rect,
    pub velocity: Vec2,
    pub speed: f32,
    pub state: BombState,
    /// Index into `BOMB_COLORS`.
    pub palette: usize,
}

impl Bomb {
    /// Drops a bomb from the bottom centre of `source`.
    ///
    /// Against a mobile avatar a coin flip picks between an aimed bomb and a
    /// straight drop; an avatar off normal speed only gets straight drops.
    pub fn drop_from(source: &Rect, avatar: &Avatar, rng: &mut impl Rng) -> Self {
        let radius = rng.gen_range(BOMB_RADIUS_MIN..=BOMB_RADIUS_MAX) as f32;
        let palette = rng.gen_range(0..BOMB_COLORS.len());

        let (velocity, speed) = if avatar.speed == NORMAL_SPEED {
            if rng.gen_bool(0.5) {
                let aim = direction_to(source, &avatar.rect);
                let aim = if aim.is_finite() { aim } else { Vec2::Y };
                (aim, AIMED_BOMB_SPEED)
            } else {
                (Vec2::Y, FALLING_BOMB_SPEED)
            }
        } else {
            (Vec2::new(0.0, STUNNED_BOMB_VY), FALLING_BOMB_SPEED)
        };

        let center = Vec2::new(source.center().x, source.center().y + source.h / 2.0);
        Self {
            rect: Rect::from_center(center, Vec2::splat(radius * 2.0)),
            velocity,
            speed,
            state: BombState::Active,
            palette,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == BombState::Active
    }

    pub fn neutralize(&mut self) {
        self.speed /= 2.0;
        self.state = BombState::Inactive;
    }

    pub fn update(&mut self, arena: Vec2) -> bool {
        self.rect.translate(self.velocity * self.speed);
        in_arena(&self.rect, arena)
    }
}

// ── Explosion ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Explosion {
    pub rect: Rect,
    pub life: i32,
}

impl Explosion {
    pub fn at(target: &Rect, size: Vec2, life: i32) -> Self {
        Self {
            rect: Rect::from_center(target.center(), size),
            life,
        }
    }

    /// Which of the two animation frames to show.
    pub fn frame(&self) -> u8 {
        (self.life.max(0) / EXPLOSION_FRAME_TICKS % 2) as u8
    }

    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Grunt,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Descent {
    Descending,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub rect: Rect,
    pub vy: f32,
    /// Centre depth past which the enemy stops and starts bombing.
    pub stop_depth: f32,
    pub descent: Descent,
    /// Frames between drops; `None` once an EMP has disabled it.
    pub drop_interval: Option<u64>,
    pub variant: usize,
    pub dimmed: bool,
}

impl Enemy {
    /// Spawns along the top edge at a random column, fully inside the arena.
    pub fn spawn(kind: EnemyKind, assets: &Assets, arena: Vec2, rng: &mut impl Rng) -> Self {
        let (variant, size) = match kind {
            EnemyKind::Grunt => {
                let variant = rng.gen_range(0..assets.enemies.len());
                (variant, assets.enemies[variant])
            }
            EnemyKind::Boss => (0, assets.boss),
        };
        let x = rng.gen_range(0.0..=(arena.x - size.x).max(0.0));

        let (deepest, drop_interval) = match kind {
            EnemyKind::Grunt => (
                arena.y / 2.0,
                rng.gen_range(ENEMY_DROP_INTERVAL_MIN..=ENEMY_DROP_INTERVAL_MAX),
            ),
            EnemyKind::Boss => (arena.y / 3.0, BOSS_DROP_INTERVAL),
        };
        let stop_depth = rng.gen_range(ENEMY_STOP_MIN..=deepest);

        Self {
            kind,
            rect: Rect::new(x, 0.0, size.x, size.y),
            vy: ENEMY_DESCENT_SPEED,
            stop_depth,
            descent: Descent::Descending,
            drop_interval: Some(drop_interval),
            variant,
            dimmed: false,
        }
    }

    pub fn drops_bomb_at(&self, frame: u64) -> bool {
        self.descent == Descent::Stopped
            && matches!(self.drop_interval, Some(interval) if frame % interval == 0)
    }

    /// EMP hit: never drop again and render dimmed.
    pub fn disable(&mut self) {
        self.drop_interval = None;
        self.dimmed = true;
    }

    pub fn update(&mut self, arena: Vec2) -> bool {
        if self.rect.center().y > self.stop_depth {
            self.vy = 0.0;
            self.descent = Descent::Stopped;
        }
        self.rect.translate(Vec2::new(0.0, self.vy));
        in_arena(&self.rect, arena)
    }
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Alien {
    pub rect: Rect,
    pub velocity: Vec2,
    pub speed: f32,
    pub variant: usize,
}

impl Alien {
    /// Spawns at the top edge heading for where the avatar is now; it does
    /// not re-aim afterwards.
    pub fn spawn(assets: &Assets, arena: Vec2, avatar: &Avatar, rng: &mut impl Rng) -> Self {
        let variant = rng.gen_range(0..assets.aliens.len());
        let size = assets.aliens[variant];
        let x = rng.gen_range(0.0..=(arena.x - size.x).max(0.0));
        let rect = Rect::new(x, 0.0, size.x, size.y);

        let heading = direction_to(&rect, &avatar.rect);
        Self {
            rect,
            velocity: if heading.is_finite() { heading } else { Vec2::Y },
            speed: ALIEN_SPEED,
            variant,
        }
    }

    pub fn update(&mut self, arena: Vec2) -> bool {
        self.rect.translate(self.velocity * self.speed);
        in_arena(&self.rect, arena)
    }
}

// ── Area effects ──────────────────────────────────────────────────────────────

/// Wall segment just ahead of the avatar that soaks up bombs.
#[derive(Clone, Debug)]
pub struct Shield {
    pub rect: Rect,
    pub facing: Facing,
    pub life: i32,
}

impl Shield {
    pub fn place(avatar: &Avatar, life: i32) -> Self {
        let wall = Vec2::new(SHIELD_THICKNESS, avatar.rect.h * 2.0);
        let offset = avatar.facing.delta().as_vec2() * avatar.rect.size();
        Self {
            rect: Rect::from_center(
                avatar.rect.center() + offset,
                rotated_extent(wall, avatar.facing.unit()),
            ),
            facing: avatar.facing,
            life,
        }
    }

    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }
}

#[derive(Clone, Debug)]
pub struct GravityField {
    pub rect: Rect,
    pub life: i32,
}

impl GravityField {
    pub fn new(arena: Vec2, life: i32) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, arena.x, arena.y),
            life,
        }
    }

    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }
}

// ── Base ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct HealthBar {
    pub rect: Rect,
    pub hp: i32,
}

impl HealthBar {
    pub fn new(arena: Vec2) -> Self {
        let (w, h) = HEALTH_BAR_SIZE;
        Self {
            rect: Rect::from_center(
                Vec2::new(arena.x - w / 2.0, arena.y - 50.0),
                Vec2::new(w, h),
            ),
            hp: HEALTH_MAX,
        }
    }

    pub fn take_hit(&mut self) {
        self.hp -= HEALTH_PER_HIT;
    }

    pub fn is_depleted(&self) -> bool {
        self.hp <= 0
    }

    /// The painted-over part of the gauge, from the current hp to the end.
    pub fn damage_rect(&self) -> Option<Rect> {
        if self.hp >= HEALTH_MAX {
            return None;
        }
        let scale = self.rect.w / HEALTH_MAX as f32;
        let hp = self.hp.max(0) as f32 * scale;
        Some(Rect::new(
            self.rect.x + hp,
            self.rect.y,
            self.rect.w - hp,
            self.rect.h,
        ))
    }
}

/// The strip along the bottom edge that bombs must not reach.
#[derive(Clone, Debug)]
pub struct CollisionLine {
    pub rect: Rect,
}

impl CollisionLine {
    pub fn new(arena: Vec2) -> Self {
        Self {
            rect: Rect::new(0.0, arena.y - BASE_LINE_HEIGHT, arena.x, BASE_LINE_HEIGHT),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub value: u32,
}

impl Score {
    pub fn add(&mut self, points: u32) {
        self.value += points;
    }

    /// Deducts `cost` if affordable. Returns `false` and leaves the score
    /// untouched otherwise.
    pub fn spend(&mut self, cost: u32) -> bool {
        if self.value < cost {
            return false;
        }
        self.value -= cost;
        true
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverCause {
    BaseDestroyed,
    CaughtByAlien,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver(GameOverCause),
}

/// Every live entity plus the counters the orchestrator owns.
#[derive(Clone, Debug)]
pub struct GameState {
    pub avatar: Avatar,
    pub beams: Vec<Beam>,
    pub continuous_beams: Vec<ContinuousBeam>,
    pub bombs: Vec<Bomb>,
    pub explosions: Vec<Explosion>,
    pub enemies: Vec<Enemy>,
    /// At most one boss is alive at a time.
    pub bosses: Vec<Enemy>,
    pub aliens: Vec<Alien>,
    pub shields: Vec<Shield>,
    pub gravity_fields: Vec<GravityField>,
    pub health: HealthBar,
    pub base_line: CollisionLine,
    pub score: Score,
    pub status: GameStatus,
    pub frame: u64,
    pub arena: Vec2,
    /// Set for the single frame in which an EMP went off.
    pub emp_flash: bool,
    pub assets: Assets,
}
