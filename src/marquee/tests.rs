use super::*;
use crate::config::MarqueeSettings;

const TICK: f32 = 1.0 / 60.0;

fn vp(left: f32, width: f32) -> Viewport {
    Viewport { left, width }
}

fn engine(viewport: Viewport, content: f32) -> MarqueeEngine {
    let mut e = MarqueeEngine::new(&MarqueeSettings::default());
    e.set_viewport(viewport);
    e.set_content_width(content);
    e
}

#[test]
fn fitting_text_centers_and_never_scrolls() {
    let mut e = engine(vp(10.0, 200.0), 80.0);
    assert_eq!(e.phase(), MarqueePhase::Idle);
    assert_eq!(e.offset_x(), 10.0 + (200.0 - 80.0) / 2.0);

    // Restart requests on fitting text must not start a scroll.
    e.restart(true);
    assert_eq!(e.phase(), MarqueePhase::Idle);

    for _ in 0..600 {
        e.tick(TICK);
    }
    assert_eq!(e.phase(), MarqueePhase::Idle);
    assert_eq!(e.offset_x(), 70.0);
}

#[test]
fn restart_starts_at_viewport_left_and_scrolls_monotonically() {
    let mut e = engine(vp(0.0, 200.0), 600.0);
    e.restart(false);
    assert_eq!(e.phase(), MarqueePhase::Scrolling);
    assert_eq!(e.offset_x(), 0.0);

    let mut prev = e.offset_x();
    while e.phase() == MarqueePhase::Scrolling {
        e.tick(TICK);
        if e.phase() == MarqueePhase::Scrolling {
            assert!(e.offset_x() < prev);
            prev = e.offset_x();
        }
    }
    assert_eq!(e.phase(), MarqueePhase::BlankPause);
}

#[test]
fn long_transit_reaches_blank_pause_on_schedule() {
    // 600 cells of content at 40 cells/s must fully exit a 200-cell
    // viewport after 15s of continuous scrolling, within one tick.
    let mut e = engine(vp(0.0, 200.0), 600.0);
    e.restart(true);

    let mut elapsed = 0.0f32;
    while e.phase() == MarqueePhase::Scrolling {
        e.tick(TICK);
        elapsed += TICK;
        assert!(elapsed < 16.0, "transit never completed");
    }
    assert!(
        elapsed >= 15.0 - 1e-4 && elapsed <= 15.0 + TICK + 1e-4,
        "elapsed = {elapsed}"
    );
}

#[test]
fn blank_pause_holds_for_the_configured_interval() {
    let mut e = engine(vp(0.0, 200.0), 600.0);
    e.restart(true);
    while e.phase() == MarqueePhase::Scrolling {
        e.tick(TICK);
    }

    // Parked just right of the viewport while blank.
    assert!(e.offset_x() >= e.viewport().right());
    let parked = e.offset_x();

    let mut paused = 0.0f32;
    while e.phase() == MarqueePhase::BlankPause {
        e.tick(TICK);
        paused += TICK;
        assert!(paused < 1.0, "pause never ended");
    }
    assert_eq!(e.phase(), MarqueePhase::Scrolling);
    // Frozen throughout the pause; re-entry resumes from the parked spot.
    assert_eq!(e.offset_x(), parked);
    assert!(
        paused >= 0.6 - 1e-4 && paused < 0.6 + TICK + 1e-4,
        "paused = {paused}"
    );
}

#[test]
fn nonforced_restart_mid_scroll_preserves_position() {
    let mut e = engine(vp(0.0, 200.0), 600.0);
    e.restart(true);
    for _ in 0..120 {
        e.tick(TICK);
    }
    let pos = e.offset_x();
    assert!(pos < 0.0);

    e.restart(false);
    assert_eq!(e.offset_x(), pos);

    e.restart(true);
    assert_eq!(e.offset_x(), 0.0);
}

#[test]
fn viewport_shift_preserves_relative_position() {
    let mut e = engine(vp(5.0, 200.0), 600.0);
    e.restart(true);
    for _ in 0..60 {
        e.tick(TICK);
    }

    let rel_before = e.offset_x() - e.viewport().left;
    e.set_viewport(vp(25.0, 200.0));
    let rel_after = e.offset_x() - e.viewport().left;

    assert!((rel_before - rel_after).abs() < 1e-4);
    assert_eq!(e.phase(), MarqueePhase::Scrolling);
}

#[test]
fn widening_viewport_until_content_fits_stops_the_scroll() {
    let mut e = engine(vp(0.0, 200.0), 300.0);
    e.restart(true);
    for _ in 0..30 {
        e.tick(TICK);
    }

    e.set_viewport(vp(0.0, 400.0));
    assert_eq!(e.phase(), MarqueePhase::Idle);
    assert_eq!(e.offset_x(), 50.0);
}

#[test]
fn shorter_replacement_text_drops_to_idle() {
    let mut e = engine(vp(0.0, 200.0), 600.0);
    e.restart(true);
    for _ in 0..10 {
        e.tick(TICK);
    }

    e.set_content_width(120.0);
    assert_eq!(e.phase(), MarqueePhase::Idle);
    assert_eq!(e.offset_x(), 40.0);
}

#[test]
fn stop_cancels_blank_pause_deadline() {
    let mut e = engine(vp(0.0, 200.0), 600.0);
    e.restart(true);
    while e.phase() == MarqueePhase::Scrolling {
        e.tick(TICK);
    }
    assert_eq!(e.phase(), MarqueePhase::BlankPause);

    e.stop();
    assert_eq!(e.phase(), MarqueePhase::Idle);

    // Stale ticks after stop must not resurrect the animation.
    for _ in 0..120 {
        e.tick(TICK);
    }
    assert_eq!(e.phase(), MarqueePhase::Idle);
}
