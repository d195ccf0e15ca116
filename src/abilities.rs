/// Score-gated actions bound to discrete key presses.
use crate::constants::{GRAVITY_LIFE, SHIELD_LIFE};
use crate::entities::{Beam, Bomb, ContinuousBeam, Enemy, GameState, GravityField, Shield};
use crate::input::Key;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ability {
    Fire,
    Emp,
    Hyper,
    Gravity,
    ContinuousBeam,
    Shield,
}

impl Ability {
    pub fn bound_to(key: Key) -> Option<Self> {
        match key {
            Key::Fire => Some(Self::Fire),
            Key::Emp => Some(Self::Emp),
            Key::Hyper => Some(Self::Hyper),
            Key::Gravity => Some(Self::Gravity),
            Key::ContinuousBeam => Some(Self::ContinuousBeam),
            Key::Shield => Some(Self::Shield),
            _ => None,
        }
    }

    pub fn cost(self) -> u32 {
        match self {
            Self::Fire => 0,
            Self::Emp => 20,
            Self::Hyper => 100,
            Self::Gravity => 200,
            Self::ContinuousBeam => 100,
            Self::Shield => 50,
        }
    }
}

/// Applies `ability` if the score covers its cost. Returns whether it fired;
/// a refused ability leaves the state untouched.
pub fn invoke(state: &mut GameState, ability: Ability) -> bool {
    if ability == Ability::Shield && !state.shields.is_empty() {
        return false;
    }
    if !state.score.spend(ability.cost()) {
        tracing::debug!(?ability, score = state.score.value, "not enough score");
        return false;
    }

    match ability {
        Ability::Fire => {
            let beam = Beam::fire(&state.avatar, state.assets.beam);
            state.beams.push(beam);
        }
        Ability::Emp => {
            emp_burst(&mut state.enemies, &mut state.bombs);
            state.emp_flash = true;
        }
        Ability::Hyper => state.avatar.enter_hyper(),
        Ability::Gravity => {
            let field = GravityField::new(state.arena, GRAVITY_LIFE);
            state.gravity_fields.push(field);
        }
        Ability::ContinuousBeam => {
            let beam = ContinuousBeam::fire(&state.avatar, state.assets.continuous_beam);
            state.continuous_beams.push(beam);
        }
        Ability::Shield => {
            let shield = Shield::place(&state.avatar, SHIELD_LIFE);
            state.shields.push(shield);
        }
    }

    tracing::debug!(?ability, score = state.score.value, frame = state.frame, "ability used");
    true
}

/// One-shot EMP: every enemy stops dropping bombs for good and every bomb in
/// flight slows to half speed and turns harmless.
pub fn emp_burst(enemies: &mut [Enemy], bombs: &mut [Bomb]) {
    for enemy in enemies.iter_mut() {
        enemy.disable();
    }
    for bomb in bombs.iter_mut() {
        bomb.neutralize();
    }
}
