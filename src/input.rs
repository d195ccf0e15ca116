/// Logical keys and the per-frame input snapshot handed to the game.
///
/// The game sees two things each frame: the set of keys currently held
/// (movement, speed boost) and the ordered list of discrete events that
/// arrived since the last frame (abilities, quit).
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Emp,
    Hyper,
    Gravity,
    ContinuousBeam,
    Shield,
    Boost,
}

impl Key {
    /// Movement and boost act for as long as they are held; every other key
    /// acts once per press.
    pub fn is_held_control(self) -> bool {
        matches!(
            self,
            Key::Up | Key::Down | Key::Left | Key::Right | Key::Boost
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
    Quit,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub held: HashSet<Key>,
    pub events: Vec<InputEvent>,
}

impl FrameInput {
    /// A frame where `keys` are held and nothing else happens.
    pub fn holding(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            events: Vec::new(),
        }
    }

    /// A frame with a single key press and nothing held.
    pub fn pressing(key: Key) -> Self {
        Self {
            held: HashSet::new(),
            events: vec![InputEvent::Pressed(key)],
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn quit_requested(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }
}

pub trait InputSource {
    fn poll(&mut self) -> io::Result<FrameInput>;
}

// ── Held-key tracking ────────────────────────────────────────────────────────

/// Tracks which keys are held from a stream of press / repeat / release
/// notifications.
///
/// Terminals with keyboard enhancement send real releases. Classic terminals
/// only send presses (auto-repeat shows up as more presses), so a key is also
/// dropped once no press has been seen for `hold_window` frames.
#[derive(Clone, Debug)]
pub struct KeyTracker {
    last_seen: HashMap<Key, u64>,
    hold_window: u64,
}

impl KeyTracker {
    pub fn new(hold_window: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window,
        }
    }

    /// Records a press or repeat. Returns `true` if the key was not already held.
    pub fn press(&mut self, key: Key, frame: u64) -> bool {
        self.last_seen.insert(key, frame).is_none()
    }

    /// Returns `true` if the key was held.
    pub fn release(&mut self, key: Key) -> bool {
        self.last_seen.remove(&key).is_some()
    }

    /// Drops keys whose last press is older than the hold window and returns them.
    pub fn expire(&mut self, frame: u64) -> Vec<Key> {
        let window = self.hold_window;
        let stale: Vec<Key> = self
            .last_seen
            .iter()
            .filter(|(_, last)| frame.saturating_sub(**last) > window)
            .map(|(key, _)| *key)
            .collect();
        for key in &stale {
            self.last_seen.remove(key);
        }
        stale
    }

    pub fn held(&self) -> HashSet<Key> {
        self.last_seen.keys().copied().collect()
    }
}

// ── Scripted source ──────────────────────────────────────────────────────────

/// Replays a fixed list of frames, then asks to quit.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<FrameInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<FrameInput> {
        Ok(self.frames.pop_front().unwrap_or_else(|| FrameInput {
            held: HashSet::new(),
            events: vec![InputEvent::Quit],
        }))
    }
}
