/// What gets drawn, and in which order.
///
/// The game hands a `Surface` a list of logical images with destination
/// rectangles each frame; how an image looks is the surface's business.
use std::io;

use crate::entities::{Facing, GameState, Mood};
use crate::geometry::Rect;

#[derive(Clone, Debug, PartialEq)]
pub enum Image {
    Background,
    Avatar(Facing),
    AvatarJoy,
    AvatarSad,
    Beam(Facing),
    ContinuousBeam(Facing),
    /// Index into `BOMB_COLORS`.
    Bomb(usize),
    /// Animation frame 0 or 1.
    Explosion(u8),
    Enemy(usize),
    Boss,
    Alien(usize),
    Shield(Facing),
    GravityField,
    ScoreLabel(u32),
    HealthGauge,
    DamageMark,
    BaseLine,
    EmpFlash,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Negative image (hyper avatar).
    Inverted,
    /// Greyed out (EMP-disabled enemy).
    Dimmed,
}

pub trait Surface {
    fn blit(&mut self, image: &Image, dest: Rect, effect: Effect);
    /// Shows everything blitted since the last present.
    fn present(&mut self) -> io::Result<()>;
}

const SCORE_LABEL: Rect = Rect {
    x: 0.0,
    y: 0.0,
    w: 200.0,
    h: 40.0,
};

/// Blits one full frame in fixed back-to-front order. Does not present.
pub fn draw_frame(state: &GameState, surface: &mut impl Surface) {
    let arena = Rect::new(0.0, 0.0, state.arena.x, state.arena.y);
    surface.blit(&Image::Background, arena, Effect::None);

    let avatar = &state.avatar;
    let image = match avatar.mood {
        Mood::Plain => Image::Avatar(avatar.facing),
        Mood::Joy => Image::AvatarJoy,
        Mood::Sad => Image::AvatarSad,
    };
    let effect = if avatar.is_hyper() {
        Effect::Inverted
    } else {
        Effect::None
    };
    surface.blit(&image, avatar.rect, effect);

    for beam in &state.beams {
        surface.blit(&Image::Beam(beam.facing), beam.rect, Effect::None);
    }
    for enemy in &state.enemies {
        let effect = if enemy.dimmed {
            Effect::Dimmed
        } else {
            Effect::None
        };
        surface.blit(&Image::Enemy(enemy.variant), enemy.rect, effect);
    }
    for bomb in &state.bombs {
        surface.blit(&Image::Bomb(bomb.palette), bomb.rect, Effect::None);
    }
    for alien in &state.aliens {
        surface.blit(&Image::Alien(alien.variant), alien.rect, Effect::None);
    }
    for explosion in &state.explosions {
        surface.blit(
            &Image::Explosion(explosion.frame()),
            explosion.rect,
            Effect::None,
        );
    }
    for field in &state.gravity_fields {
        surface.blit(&Image::GravityField, field.rect, Effect::None);
    }
    for beam in &state.continuous_beams {
        surface.blit(&Image::ContinuousBeam(beam.facing), beam.rect, Effect::None);
    }
    for boss in &state.bosses {
        surface.blit(&Image::Boss, boss.rect, Effect::None);
    }
    for shield in &state.shields {
        surface.blit(&Image::Shield(shield.facing), shield.rect, Effect::None);
    }

    let mut label = SCORE_LABEL;
    label.set_center(glam::Vec2::new(100.0, state.arena.y - 50.0));
    surface.blit(&Image::ScoreLabel(state.score.value), label, Effect::None);

    surface.blit(&Image::HealthGauge, state.health.rect, Effect::None);
    if let Some(damage) = state.health.damage_rect() {
        surface.blit(&Image::DamageMark, damage, Effect::None);
    }
    surface.blit(&Image::BaseLine, state.base_line.rect, Effect::None);

    if state.emp_flash {
        surface.blit(&Image::EmpFlash, arena, Effect::None);
    }
}
