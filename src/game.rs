/// The frame loop: poll input, step the world, draw, present, wait.
use std::time::Duration;

use rand::Rng;

use crate::clock::Clock;
use crate::compute::tick;
use crate::constants::GAME_OVER_PAUSE_MS;
use crate::entities::{GameOverCause, GameState, GameStatus};
use crate::error::GameError;
use crate::input::InputSource;
use crate::render::{draw_frame, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Quit,
    GameOver(GameOverCause),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub outcome: Outcome,
    pub score: u32,
    pub frames: u64,
}

/// Runs until the player quits or the game ends.
///
/// On game over the final frame stays on screen (the avatar shows its sad
/// face) for a fixed pause before control returns to the caller.
pub fn run(
    mut state: GameState,
    rng: &mut impl Rng,
    input: &mut impl InputSource,
    surface: &mut impl Surface,
    clock: &mut impl Clock,
) -> Result<Summary, GameError> {
    tracing::info!(frame = state.frame, hp = state.health.hp, "game started");
    loop {
        let frame_input = input.poll()?;
        if frame_input.quit_requested() {
            tracing::info!(frame = state.frame, score = state.score.value, "quit");
            return Ok(summary(&state, Outcome::Quit));
        }

        state = tick(&state, &frame_input, rng);
        draw_frame(&state, surface);
        surface.present()?;

        if let GameStatus::GameOver(cause) = state.status {
            clock.pause(Duration::from_millis(GAME_OVER_PAUSE_MS));
            return Ok(summary(&state, Outcome::GameOver(cause)));
        }
        clock.wait_next_tick();
    }
}

fn summary(state: &GameState, outcome: Outcome) -> Summary {
    Summary {
        outcome,
        score: state.score.value,
        frames: state.frame,
    }
}
