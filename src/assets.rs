/// Sprite geometry.
///
/// The game never looks at pixels; it only needs each sprite's native size.
/// An `AssetSource` maps logical sprite names to sizes, and `Assets::load`
/// resolves every name up front so a missing sprite stops the game before
/// the first frame.
use glam::Vec2;

use crate::error::GameError;

pub const AVATAR: &str = "avatar";
pub const AVATAR_JOY: &str = "avatar_joy";
pub const AVATAR_SAD: &str = "avatar_sad";
pub const BACKGROUND: &str = "background";
pub const BEAM: &str = "beam";
pub const CONTINUOUS_BEAM: &str = "beam_blue";
pub const EXPLOSION: &str = "explosion";
pub const ENEMIES: [&str; 3] = ["enemy1", "enemy2", "enemy3"];
pub const BOSS: &str = "boss";
pub const ALIENS: [&str; 2] = ["alien1", "alien2"];
pub const HEALTH_GAUGE: &str = "health_gauge";

pub trait AssetSource {
    /// Native width and height of the sprite called `name`, if it exists.
    fn extent(&self, name: &str) -> Option<Vec2>;
}

/// The glyph atlas shipped with the terminal front-end.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinAssets;

const BUILTIN: &[(&str, f32, f32)] = &[
    (AVATAR, 100.0, 90.0),
    (AVATAR_JOY, 100.0, 90.0),
    (AVATAR_SAD, 100.0, 90.0),
    (BACKGROUND, 1600.0, 900.0),
    (BEAM, 100.0, 30.0),
    (CONTINUOUS_BEAM, 1500.0, 30.0),
    (EXPLOSION, 100.0, 100.0),
    ("enemy1", 90.0, 70.0),
    ("enemy2", 80.0, 80.0),
    ("enemy3", 100.0, 60.0),
    (BOSS, 300.0, 200.0),
    ("alien1", 80.0, 80.0),
    ("alien2", 70.0, 90.0),
    (HEALTH_GAUGE, 800.0, 30.0),
];

impl AssetSource for BuiltinAssets {
    fn extent(&self, name: &str) -> Option<Vec2> {
        BUILTIN
            .iter()
            .find(|(key, _, _)| *key == name)
            .map(|&(_, w, h)| Vec2::new(w, h))
    }
}

/// Resolved sprite sizes for everything the game spawns.
#[derive(Clone, Debug, PartialEq)]
pub struct Assets {
    pub avatar: Vec2,
    pub beam: Vec2,
    pub continuous_beam: Vec2,
    pub explosion: Vec2,
    pub enemies: [Vec2; 3],
    pub boss: Vec2,
    pub aliens: [Vec2; 2],
}

impl Assets {
    pub fn load(source: &impl AssetSource) -> Result<Self, GameError> {
        // Drawn but never measured; still required to exist.
        for name in [AVATAR_JOY, AVATAR_SAD, BACKGROUND, HEALTH_GAUGE] {
            require(source, name)?;
        }
        Ok(Self {
            avatar: require(source, AVATAR)?,
            beam: require(source, BEAM)?,
            continuous_beam: require(source, CONTINUOUS_BEAM)?,
            explosion: require(source, EXPLOSION)?,
            enemies: [
                require(source, ENEMIES[0])?,
                require(source, ENEMIES[1])?,
                require(source, ENEMIES[2])?,
            ],
            boss: require(source, BOSS)?,
            aliens: [require(source, ALIENS[0])?, require(source, ALIENS[1])?],
        })
    }
}

fn require(source: &impl AssetSource, name: &str) -> Result<Vec2, GameError> {
    source.extent(name).ok_or_else(|| {
        tracing::error!(sprite = name, "sprite not found");
        GameError::MissingAsset {
            name: name.to_string(),
        }
    })
}
