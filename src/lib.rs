//! Arena shoot-em-up core.
//!
//! The game logic (`entities`, `abilities`, `collision`, `compute`, `game`) is
//! independent of any terminal: input, drawing, timing and sprite geometry
//! all come in through the traits in `input`, `render`, `clock` and `assets`.
//! `display` is the crossterm-backed drawing surface used by the binary.

pub mod abilities;
pub mod assets;
pub mod clock;
pub mod collision;
pub mod compute;
pub mod constants;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod render;
