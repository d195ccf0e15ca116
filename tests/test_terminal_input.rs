use std::sync::mpsc::{self, Sender};

use arena_blaster::display::{keyboard_flags, map_key, TerminalInput, HOLD_WINDOW};
use arena_blaster::input::{InputEvent, InputSource, Key};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    ModifierKeyCode,
};

fn make_input() -> (Sender<Event>, TerminalInput) {
    let (tx, rx) = mpsc::channel();
    (tx, TerminalInput::new(rx, HOLD_WINDOW))
}

fn key(code: KeyCode, kind: KeyEventKind) -> Event {
    Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind))
}

fn press(code: KeyCode) -> Event {
    key(code, KeyEventKind::Press)
}

// ── Ability keys ──────────────────────────────────────────────────────────────

#[test]
fn double_tap_fires_twice_in_one_frame() {
    let (tx, mut input) = make_input();
    tx.send(press(KeyCode::Char(' '))).unwrap();
    tx.send(press(KeyCode::Char(' '))).unwrap();
    let frame = input.poll().unwrap();
    assert_eq!(
        frame.events,
        vec![InputEvent::Pressed(Key::Fire), InputEvent::Pressed(Key::Fire)]
    );
}

#[test]
fn tap_on_consecutive_frames_fires_each_time() {
    let (tx, mut input) = make_input();
    for _ in 0..3 {
        tx.send(press(KeyCode::Char('e'))).unwrap();
        let frame = input.poll().unwrap();
        assert_eq!(frame.events, vec![InputEvent::Pressed(Key::Emp)]);
        assert!(frame.held.is_empty());
    }
}

#[test]
fn ability_repeat_and_release_are_ignored() {
    let (tx, mut input) = make_input();
    tx.send(key(KeyCode::Char('h'), KeyEventKind::Repeat)).unwrap();
    tx.send(key(KeyCode::Char('h'), KeyEventKind::Release)).unwrap();
    assert!(input.poll().unwrap().events.is_empty());
}

// ── Held controls ─────────────────────────────────────────────────────────────

#[test]
fn movement_press_is_reported_once_and_held() {
    let (tx, mut input) = make_input();
    tx.send(press(KeyCode::Up)).unwrap();
    tx.send(press(KeyCode::Up)).unwrap();
    let frame = input.poll().unwrap();
    assert_eq!(frame.events, vec![InputEvent::Pressed(Key::Up)]);
    assert!(frame.is_held(Key::Up));
}

#[test]
fn release_event_drops_held_key() {
    let (tx, mut input) = make_input();
    tx.send(press(KeyCode::Left)).unwrap();
    input.poll().unwrap();
    tx.send(key(KeyCode::Left, KeyEventKind::Release)).unwrap();
    let frame = input.poll().unwrap();
    assert_eq!(frame.events, vec![InputEvent::Released(Key::Left)]);
    assert!(!frame.is_held(Key::Left));
}

#[test]
fn silent_held_key_expires_after_window() {
    let (tx, mut input) = make_input();
    tx.send(press(KeyCode::Char('z'))).unwrap();
    input.poll().unwrap();
    for _ in 0..HOLD_WINDOW {
        assert!(input.poll().unwrap().is_held(Key::Boost));
    }
    let frame = input.poll().unwrap();
    assert_eq!(frame.events, vec![InputEvent::Released(Key::Boost)]);
    assert!(!frame.is_held(Key::Boost));
}

// ── Bindings ──────────────────────────────────────────────────────────────────

#[test]
fn modifier_and_lock_keys_are_bound() {
    assert_eq!(
        map_key(KeyCode::Modifier(ModifierKeyCode::LeftShift)),
        Some(Key::Boost)
    );
    assert_eq!(map_key(KeyCode::CapsLock), Some(Key::Shield));
    assert_eq!(map_key(KeyCode::Char('x')), None);
}

#[test]
fn terminal_is_asked_to_report_bare_modifiers() {
    let flags = keyboard_flags();
    assert!(flags.contains(KeyboardEnhancementFlags::REPORT_EVENT_TYPES));
    assert!(flags.contains(KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES));
}

#[test]
fn left_shift_holds_boost() {
    let (tx, mut input) = make_input();
    tx.send(press(KeyCode::Modifier(ModifierKeyCode::LeftShift))).unwrap();
    assert!(input.poll().unwrap().is_held(Key::Boost));
}

// ── Quit ──────────────────────────────────────────────────────────────────────

#[test]
fn quit_keys_and_ctrl_c() {
    let (tx, mut input) = make_input();
    tx.send(press(KeyCode::Esc)).unwrap();
    assert!(input.poll().unwrap().quit_requested());

    tx.send(Event::Key(KeyEvent::new_with_kind(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
        KeyEventKind::Press,
    )))
    .unwrap();
    assert!(input.poll().unwrap().quit_requested());
}

#[test]
fn closed_channel_quits() {
    let (tx, mut input) = make_input();
    drop(tx);
    assert!(input.poll().unwrap().quit_requested());
}
