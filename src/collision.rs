/// Cross-group collision resolution and the score / health / state changes
/// that follow from it. Runs once per frame after every entity has moved.
use crate::entities::{
    Body, EnemyKind, Explosion, GameOverCause, GameState, GameStatus, Mood,
};
use crate::geometry::Rect;

/// What was destroyed, for reward and explosion bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kill {
    Bomb,
    Enemy,
    Boss,
    Alien,
}

impl Kill {
    pub fn reward(self) -> u32 {
        match self {
            Kill::Bomb => 1,
            Kill::Enemy => 10,
            Kill::Boss => 100,
            Kill::Alien => 5,
        }
    }

    fn explosion_life(self) -> i32 {
        match self {
            Kill::Bomb => 50,
            Kill::Enemy | Kill::Alien => 100,
            Kill::Boss => 200,
        }
    }

    fn cheers(self) -> bool {
        self != Kill::Bomb
    }
}

impl From<EnemyKind> for Kill {
    fn from(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Grunt => Kill::Enemy,
            EnemyKind::Boss => Kill::Boss,
        }
    }
}

/// Removes every target that overlaps at least one hitter and returns them.
/// With `consume` set, the hitters involved are removed as well.
pub fn collide_groups<T: Body, H: Body>(
    targets: &mut Vec<T>,
    hitters: &mut Vec<H>,
    consume: bool,
) -> Vec<T> {
    let mut hit = Vec::new();
    let mut survivors = Vec::with_capacity(targets.len());
    for target in targets.drain(..) {
        let area = *target.rect();
        if hitters.iter().any(|h| h.rect().intersects(&area)) {
            if consume {
                hitters.retain(|h| !h.rect().intersects(&area));
            }
            hit.push(target);
        } else {
            survivors.push(target);
        }
    }
    *targets = survivors;
    hit
}

/// Removes and returns every member of `group` overlapping `area`.
pub fn collide_with<T: Body>(area: &Rect, group: &mut Vec<T>) -> Vec<T> {
    let (hit, missed) = group.drain(..).partition(|t| t.rect().intersects(area));
    *group = missed;
    hit
}

fn record_kill(state: &mut GameState, at: &Rect, kill: Kill) {
    state
        .explosions
        .push(Explosion::at(at, state.assets.explosion, kill.explosion_life()));
    state.score.add(kill.reward());
    if kill.cheers() {
        state.avatar.mood = Mood::Joy;
    }
}

fn game_over(state: &mut GameState, cause: GameOverCause) {
    state.avatar.mood = Mood::Sad;
    state.status = GameStatus::GameOver(cause);
    tracing::info!(?cause, score = state.score.value, frame = state.frame, "game over");
}

/// Resolves every collision for this frame in fixed precedence. Stops as
/// soon as the game is over.
pub fn resolve(state: &mut GameState) {
    // 1. Beams against everything hostile.
    for enemy in collide_groups(&mut state.enemies, &mut state.beams, true) {
        record_kill(state, &enemy.rect, enemy.kind.into());
    }
    for boss in collide_groups(&mut state.bosses, &mut state.beams, true) {
        record_kill(state, &boss.rect, boss.kind.into());
    }
    for bomb in collide_groups(&mut state.bombs, &mut state.beams, true) {
        record_kill(state, &bomb.rect, Kill::Bomb);
    }
    for alien in collide_groups(&mut state.aliens, &mut state.beams, true) {
        record_kill(state, &alien.rect, Kill::Alien);
    }

    // 2. Shields soak bombs without scoring.
    let explosion = state.assets.explosion;
    for bomb in collide_groups(&mut state.bombs, &mut state.shields, true) {
        state
            .explosions
            .push(Explosion::at(&bomb.rect, explosion, Kill::Bomb.explosion_life()));
    }

    // 3. Bombs reaching the base.
    let base = state.base_line.rect;
    for _ in collide_with(&base, &mut state.bombs) {
        state.health.take_hit();
        tracing::debug!(hp = state.health.hp, "base hit");
        if state.health.is_depleted() {
            game_over(state, GameOverCause::BaseDestroyed);
            return;
        }
    }

    // 4. Bombs against the avatar.
    let avatar = state.avatar.rect;
    for bomb in collide_with(&avatar, &mut state.bombs) {
        if state.avatar.is_hyper() {
            record_kill(state, &bomb.rect, Kill::Bomb);
        } else if bomb.is_active() {
            state.avatar.stun();
            tracing::debug!(frame = state.frame, "avatar stunned");
        } else {
            state.avatar.mood = Mood::Sad;
        }
    }

    // 5. Aliens against the avatar.
    for alien in collide_with(&avatar, &mut state.aliens) {
        if !state.avatar.is_hyper() {
            game_over(state, GameOverCause::CaughtByAlien);
            return;
        }
        record_kill(state, &alien.rect, Kill::Alien);
    }

    // 6. Area effects destroy without being used up.
    for enemy in collide_groups(&mut state.enemies, &mut state.gravity_fields, false) {
        record_kill(state, &enemy.rect, enemy.kind.into());
    }
    for bomb in collide_groups(&mut state.bombs, &mut state.gravity_fields, false) {
        record_kill(state, &bomb.rect, Kill::Bomb);
    }
    for enemy in collide_groups(&mut state.enemies, &mut state.continuous_beams, false) {
        record_kill(state, &enemy.rect, enemy.kind.into());
    }
    for bomb in collide_groups(&mut state.bombs, &mut state.continuous_beams, false) {
        record_kill(state, &bomb.rect, Kill::Bomb);
    }
}
