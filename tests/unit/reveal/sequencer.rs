use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::foundation::core::Viewport;

fn runtime() -> Runtime {
    Runtime::new(Viewport::new(800, 600).unwrap())
}

fn script(lines: &[&str]) -> BootScript {
    BootScript::new(lines.iter().copied()).unwrap()
}

#[test]
fn default_timing() {
    let t = BootTiming::default();
    assert_eq!((t.tick_ms, t.pause_ms, t.settle_ms), (50, 500, 500));
    assert!(BootTiming { tick_ms: 0, ..t }.validate().is_err());
}

#[test]
fn two_short_lines_follow_the_timeline() {
    let rt = runtime();
    let seq = BootSequencer::mount(&rt, script(&["AB", "C"]), BootTiming::default()).unwrap();
    assert_eq!(seq.state(), RevealState::RevealingLine(0, 0));

    rt.advance_to(Millis(100));
    assert_eq!(seq.state(), RevealState::LineComplete(0));
    assert_eq!(seq.revealed_text(), "AB");

    rt.advance_to(Millis(599));
    assert_eq!(seq.state(), RevealState::LineComplete(0));
    rt.advance_to(Millis(600));
    assert_eq!(seq.state(), RevealState::RevealingLine(1, 0));

    rt.advance_to(Millis(650));
    assert_eq!(seq.state(), RevealState::LineComplete(1));
    assert_eq!(seq.transcript(), vec!["AB".to_string(), "C".to_string()]);

    rt.advance_to(Millis(1150));
    assert_eq!(seq.state(), RevealState::SequenceComplete);
    assert!(!seq.is_booted());
    assert_eq!(seq.ticks(), 3);
}

#[test]
fn init_ok_completes_then_boots_after_settle() {
    let rt = runtime();
    let timing = BootTiming::default();
    let s = script(&["INIT", "OK"]);
    assert_eq!(timing.completion_time(&s), Millis(1300));

    let seq = BootSequencer::mount(&rt, s, timing).unwrap();
    let booted_at = Rc::new(Cell::new(None));
    {
        let booted_at = booted_at.clone();
        let rt2 = rt.clone();
        seq.on_booted(move || booted_at.set(Some(rt2.now())));
    }

    rt.advance_to(Millis(1299));
    assert!(!seq.state().is_complete());
    rt.advance_to(Millis(1300));
    assert_eq!(seq.state(), RevealState::SequenceComplete);

    rt.advance_to(Millis(1799));
    assert!(!seq.is_booted());
    rt.advance_to(Millis(1800));
    assert!(seq.is_booted());
    assert_eq!(booted_at.get(), Some(Millis(1800)));
    assert_eq!(seq.ticks(), 6);
    assert!(!seq.is_pending());
    assert_eq!(rt.pending_tasks(), 0);

    let history = seq.history();
    let (t, last) = history.last().copied().unwrap();
    assert_eq!((t, last), (Millis(1300), RevealState::SequenceComplete));
}

#[test]
fn revealed_length_never_shrinks_within_a_line() {
    let rt = runtime();
    let seq =
        BootSequencer::mount(&rt, script(&["HELLO", "WORLD!"]), BootTiming::default()).unwrap();
    let mut last = (0usize, 0usize);
    for step in 1..=80 {
        rt.advance_to(Millis(step * 25));
        let now = match seq.state() {
            RevealState::RevealingLine(i, k) => (i, k),
            RevealState::LineComplete(i) => (i, usize::MAX),
            RevealState::SequenceComplete => (usize::MAX, usize::MAX),
            RevealState::Idle => (0, 0),
        };
        assert!(now >= last, "{now:?} < {last:?}");
        last = now;
    }
    assert!(seq.state().is_complete());
}

#[test]
fn one_timer_at_a_time() {
    let rt = runtime();
    let seq = BootSequencer::mount(&rt, script(&["ABC"]), BootTiming::default()).unwrap();
    for t in [0, 50, 120, 150, 400, 650, 900, 1150] {
        rt.advance_to(Millis(t));
        assert!(rt.pending_tasks() <= 1);
    }
    assert!(seq.is_booted());
}

#[test]
fn empty_script_completes_at_mount() {
    let rt = runtime();
    let seq = BootSequencer::mount(&rt, script(&[]), BootTiming::default()).unwrap();
    assert_eq!(seq.state(), RevealState::SequenceComplete);
    rt.advance_to(Millis(500));
    assert!(seq.is_booted());
}

#[test]
fn dropping_mid_sequence_stops_everything() {
    let rt = runtime();
    let fired = Rc::new(Cell::new(false));
    let seq = BootSequencer::mount(&rt, script(&["ABCDEF"]), BootTiming::default()).unwrap();
    {
        let fired = fired.clone();
        seq.on_booted(move || fired.set(true));
    }
    rt.advance_to(Millis(120));
    assert_eq!(seq.state(), RevealState::RevealingLine(0, 2));
    assert_eq!(rt.pending_tasks(), 1);

    seq.unmount();
    assert_eq!(rt.pending_tasks(), 0);
    rt.advance_to(Millis(10_000));
    assert!(!fired.get());
}

#[test]
fn on_booted_after_boot_runs_immediately() {
    let rt = runtime();
    let seq = BootSequencer::mount(&rt, script(&["X"]), BootTiming::default()).unwrap();
    rt.advance_to(Millis(2_000));
    let hit = Rc::new(Cell::new(false));
    let h = hit.clone();
    seq.on_booted(move || h.set(true));
    assert!(hit.get());
}
