use arena_blaster::input::*;

#[test]
fn press_reports_only_new_keys() {
    let mut t = KeyTracker::new(4);
    assert!(t.press(Key::Fire, 1));
    assert!(!t.press(Key::Fire, 2)); // auto-repeat
    assert!(t.held().contains(&Key::Fire));
}

#[test]
fn release_removes_key() {
    let mut t = KeyTracker::new(4);
    t.press(Key::Left, 1);
    assert!(t.release(Key::Left));
    assert!(!t.release(Key::Left));
    assert!(t.held().is_empty());
}

#[test]
fn silent_keys_expire_after_window() {
    let mut t = KeyTracker::new(4);
    t.press(Key::Up, 10);
    assert!(t.expire(14).is_empty());
    assert_eq!(t.expire(15), vec![Key::Up]);
    assert!(t.held().is_empty());
}

#[test]
fn repeats_keep_key_alive() {
    let mut t = KeyTracker::new(4);
    t.press(Key::Boost, 1);
    t.press(Key::Boost, 4);
    t.press(Key::Boost, 8);
    assert!(t.expire(11).is_empty());
    assert!(t.held().contains(&Key::Boost));
}

#[test]
fn frame_input_helpers() {
    let f = FrameInput::holding(&[Key::Up, Key::Right]);
    assert!(f.is_held(Key::Up));
    assert!(!f.is_held(Key::Down));
    assert!(!f.quit_requested());

    let p = FrameInput::pressing(Key::Emp);
    assert_eq!(p.events, vec![InputEvent::Pressed(Key::Emp)]);
}

#[test]
fn scripted_input_quits_when_exhausted() {
    let mut src = ScriptedInput::new(vec![FrameInput::pressing(Key::Fire)]);
    assert_eq!(src.remaining(), 1);
    assert!(!src.poll().unwrap().quit_requested());
    assert!(src.poll().unwrap().quit_requested());
}

#[test]
fn only_movement_and_boost_are_held_controls() {
    for key in [Key::Up, Key::Down, Key::Left, Key::Right, Key::Boost] {
        assert!(key.is_held_control(), "{key:?}");
    }
    for key in [Key::Fire, Key::Emp, Key::Hyper, Key::Gravity, Key::ContinuousBeam, Key::Shield] {
        assert!(!key.is_held_control(), "{key:?}");
    }
}
