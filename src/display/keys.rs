use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    ModifierKeyCode,
};

use crate::input::{FrameInput, InputEvent, InputSource, Key, KeyTracker};

/// A held key is considered "held" if its last press/repeat event arrived
/// within this many frames. Covers terminals that don't emit key-release
/// events: OS key-repeat refreshes the key well inside the window (≈140 ms @ 50 FPS).
pub const HOLD_WINDOW: u64 = 7;

/// Enhancement flags requested from the terminal. Event types give real
/// releases; reporting all keys as escape codes is what makes bare modifier
/// and lock keys (Left Shift, CapsLock) arrive at all.
pub fn keyboard_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(Key::Emp),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Key::Hyper),
        KeyCode::Enter => Some(Key::Gravity),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Key::ContinuousBeam),
        KeyCode::Tab | KeyCode::CapsLock => Some(Key::Shield),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Modifier(ModifierKeyCode::LeftShift) => Some(Key::Boost),
        _ => None,
    }
}

pub fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Turns the raw crossterm event stream into one `FrameInput` per frame.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are released on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Held controls expire after `HOLD_WINDOW` frames of
///   silence, which synthesises the release.
///
/// Only movement and boost go through the hold tracker. Ability keys emit a
/// `Pressed` event for every press, so a quick second tap fires again; on a
/// classic terminal holding an ability key auto-repeats it.
pub struct TerminalInput {
    rx: Receiver<Event>,
    tracker: KeyTracker,
    frame: u64,
}

impl TerminalInput {
    pub fn new(rx: Receiver<Event>, hold_window: u64) -> Self {
        Self {
            rx,
            tracker: KeyTracker::new(hold_window),
            frame: 0,
        }
    }

    fn held_control(&mut self, key: Key, kind: KeyEventKind, events: &mut Vec<InputEvent>) {
        match kind {
            KeyEventKind::Press => {
                if self.tracker.press(key, self.frame) {
                    events.push(InputEvent::Pressed(key));
                }
            }
            // Repeat: refresh timestamp so key stays "held"
            KeyEventKind::Repeat => {
                self.tracker.press(key, self.frame);
            }
            KeyEventKind::Release => {
                if self.tracker.release(key) {
                    events.push(InputEvent::Released(key));
                }
            }
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<FrameInput> {
        self.frame += 1;
        let mut events = Vec::new();

        // Drain all pending input events (non-blocking)
        loop {
            let ev = match self.rx.try_recv() {
                Ok(ev) => ev,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    events.push(InputEvent::Quit);
                    break;
                }
            };
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };

            if kind == KeyEventKind::Press && is_quit(code, modifiers) {
                events.push(InputEvent::Quit);
                continue;
            }
            let Some(key) = map_key(code) else {
                continue;
            };
            if key.is_held_control() {
                self.held_control(key, kind, &mut events);
            } else if kind == KeyEventKind::Press {
                events.push(InputEvent::Pressed(key));
            }
        }

        for key in self.tracker.expire(self.frame) {
            events.push(InputEvent::Released(key));
        }

        Ok(FrameInput {
            held: self.tracker.held(),
            events,
        })
    }
}
