/// Terminal front-end. All terminal I/O lives here.
///
/// `TerminalSurface` scales arena coordinates onto the terminal grid and
/// composes blits into a cell buffer; `present` writes the whole buffer in
/// one go. `TerminalInput` turns crossterm key events into per-frame input.
/// No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use glam::Vec2;

use crate::constants::BOMB_COLORS;
use crate::entities::Facing;
use crate::geometry::Rect;
use crate::render::{Effect, Image, Surface};

mod keys;

pub use keys::{is_quit, keyboard_flags, map_key, TerminalInput, HOLD_WINDOW};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_AVATAR: Color = Color::White;
const C_JOY: Color = Color::Yellow;
const C_SAD: Color = Color::Blue;
const C_BEAM: Color = Color::Cyan;
const C_CONTINUOUS_BEAM: Color = Color::Blue;
const C_ENEMIES: [Color; 3] = [Color::Green, Color::Magenta, Color::Red];
const C_BOSS: Color = Color::Red;
const C_ALIEN: Color = Color::Green;
const C_EXPLOSION: [Color; 2] = [Color::Yellow, Color::Red];
const C_SHIELD: Color = Color::Blue;
const C_GRAVITY: Color = Color::DarkGrey;
const C_EMP: Color = Color::DarkYellow;
const C_HUD_SCORE: Color = Color::Blue;
const C_GAUGE: Color = Color::Green;
const C_DAMAGE: Color = Color::White;
const C_BASE: Color = Color::DarkGrey;
const C_DIM: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

const HINT: &str =
    "←↑↓→ move  SPACE fire  E emp  H hyper  ENTER gravity  B beam  TAB shield  Z boost  Q quit";

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
    bg: Color::Reset,
};

/// How a logical image turns into cells.
enum Look {
    /// Fill the area with `fill`, with `emblem` in the centre cell.
    Solid { fill: char, emblem: char, fg: Color },
    /// Tint the background, keeping whatever glyphs are underneath.
    Tint(Color),
    Text(String, Color),
    Clear,
}

fn facing_glyph(facing: Facing) -> char {
    match facing {
        Facing::East => '→',
        Facing::NorthEast => '↗',
        Facing::North => '↑',
        Facing::NorthWest => '↖',
        Facing::West => '←',
        Facing::SouthWest => '↙',
        Facing::South => '↓',
        Facing::SouthEast => '↘',
    }
}

fn beam_glyph(facing: Facing) -> char {
    match facing {
        Facing::East | Facing::West => '═',
        Facing::North | Facing::South => '║',
        Facing::NorthEast | Facing::SouthWest => '╱',
        Facing::NorthWest | Facing::SouthEast => '╲',
    }
}

fn look(image: &Image) -> Look {
    match image {
        Image::Background => Look::Clear,
        Image::Avatar(facing) => Look::Solid {
            fill: '▒',
            emblem: facing_glyph(*facing),
            fg: C_AVATAR,
        },
        Image::AvatarJoy => Look::Solid {
            fill: '▒',
            emblem: '☺',
            fg: C_JOY,
        },
        Image::AvatarSad => Look::Solid {
            fill: '▒',
            emblem: '☹',
            fg: C_SAD,
        },
        Image::Beam(facing) => {
            let glyph = beam_glyph(*facing);
            Look::Solid {
                fill: glyph,
                emblem: glyph,
                fg: C_BEAM,
            }
        }
        Image::ContinuousBeam(facing) => {
            let glyph = beam_glyph(*facing);
            Look::Solid {
                fill: glyph,
                emblem: glyph,
                fg: C_CONTINUOUS_BEAM,
            }
        }
        Image::Bomb(palette) => {
            let (r, g, b) = BOMB_COLORS[*palette % BOMB_COLORS.len()];
            Look::Solid {
                fill: '●',
                emblem: '●',
                fg: Color::Rgb { r, g, b },
            }
        }
        Image::Explosion(frame) => Look::Solid {
            fill: if *frame == 0 { '*' } else { '+' },
            emblem: '✸',
            fg: C_EXPLOSION[*frame as usize % 2],
        },
        Image::Enemy(variant) => Look::Solid {
            fill: '▓',
            emblem: '▼',
            fg: C_ENEMIES[*variant % C_ENEMIES.len()],
        },
        Image::Boss => Look::Solid {
            fill: '█',
            emblem: '◉',
            fg: C_BOSS,
        },
        Image::Alien(_) => Look::Solid {
            fill: '░',
            emblem: 'Ж',
            fg: C_ALIEN,
        },
        Image::Shield(_) => Look::Solid {
            fill: '█',
            emblem: '█',
            fg: C_SHIELD,
        },
        Image::GravityField => Look::Tint(C_GRAVITY),
        Image::ScoreLabel(score) => Look::Text(format!("Score: {score}"), C_HUD_SCORE),
        Image::HealthGauge => Look::Solid {
            fill: '▬',
            emblem: '▬',
            fg: C_GAUGE,
        },
        Image::DamageMark => Look::Solid {
            fill: '▬',
            emblem: '▬',
            fg: C_DAMAGE,
        },
        Image::BaseLine => Look::Solid {
            fill: '─',
            emblem: '─',
            fg: C_BASE,
        },
        Image::EmpFlash => Look::Tint(C_EMP),
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

/// Cell-buffered terminal surface. The last terminal row is reserved for the
/// controls hint; the arena is scaled onto the rows above it.
pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    arena: Vec2,
    cells: Vec<Cell>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, arena: Vec2) -> Self {
        let rows = rows.saturating_sub(1).max(1);
        let cols = cols.max(1);
        Self {
            out,
            cols,
            rows,
            arena,
            cells: vec![BLANK; cols as usize * rows as usize],
        }
    }

    /// Glyph currently buffered at a playfield cell.
    pub fn glyph(&self, col: u16, row: u16) -> Option<char> {
        self.index(col, row).map(|i| self.cells[i].ch)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.cols && row < self.rows)
            .then(|| row as usize * self.cols as usize + col as usize)
    }

    /// Terminal cells covered by `rect`, clipped to the playfield. Any rect
    /// that overlaps the arena covers at least one cell.
    fn span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let sx = self.cols as f32 / self.arena.x;
        let sy = self.rows as f32 / self.arena.y;
        let c0 = (rect.left() * sx).floor().max(0.0) as u16;
        let r0 = (rect.top() * sy).floor().max(0.0) as u16;
        let c1 = ((rect.right() * sx).ceil().max(0.0) as u16).min(self.cols);
        let r1 = ((rect.bottom() * sy).ceil().max(0.0) as u16).min(self.rows);
        if c0 >= self.cols || r0 >= self.rows || rect.right() <= 0.0 || rect.bottom() <= 0.0 {
            return None;
        }
        Some((c0, r0, c1.max(c0 + 1), r1.max(r0 + 1)))
    }

    fn paint(&mut self, col: u16, row: u16, paint: impl FnOnce(&mut Cell)) {
        if let Some(i) = self.index(col, row) {
            paint(&mut self.cells[i]);
        }
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn blit(&mut self, image: &Image, dest: Rect, effect: Effect) {
        let look = look(image);
        if let Look::Clear = look {
            self.cells.fill(BLANK);
            return;
        }
        let Some((c0, r0, c1, r1)) = self.span(&dest) else {
            return;
        };

        match look {
            Look::Solid { fill, emblem, fg } => {
                let (cc, cr) = ((c0 + c1 - 1) / 2, (r0 + r1 - 1) / 2);
                let (fg, bg) = match effect {
                    Effect::None => (fg, Color::Reset),
                    Effect::Inverted => (Color::Black, fg),
                    Effect::Dimmed => (C_DIM, Color::Reset),
                };
                for row in r0..r1 {
                    for col in c0..c1 {
                        let ch = if (col, row) == (cc, cr) { emblem } else { fill };
                        self.paint(col, row, |cell| *cell = Cell { ch, fg, bg });
                    }
                }
            }
            Look::Tint(bg) => {
                for row in r0..r1 {
                    for col in c0..c1 {
                        self.paint(col, row, |cell| cell.bg = bg);
                    }
                }
            }
            Look::Text(text, fg) => {
                for (col, ch) in (c0..self.cols).zip(text.chars()) {
                    self.paint(col, r0, |cell| {
                        *cell = Cell {
                            ch,
                            fg,
                            bg: Color::Reset,
                        }
                    });
                }
            }
            Look::Clear => {}
        }
    }

    fn present(&mut self) -> std::io::Result<()> {
        let mut fg = Color::Reset;
        let mut bg = Color::Reset;
        self.out.queue(style::ResetColor)?;

        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                if cell.fg != fg {
                    self.out.queue(style::SetForegroundColor(cell.fg))?;
                    fg = cell.fg;
                }
                if cell.bg != bg {
                    self.out.queue(style::SetBackgroundColor(cell.bg))?;
                    bg = cell.bg;
                }
                self.out.queue(Print(cell.ch))?;
            }
        }

        // Controls hint on the reserved last row
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        let hint: String = HINT.chars().take(self.cols as usize).collect();
        self.out.queue(Print(hint))?;

        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}
