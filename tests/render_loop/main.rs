mod harness;

use harness::{FakeCompositor, Request};
use spinny::geometry::Size;
use spinny::render_loop::RenderLoop;

const WINDOWED: Size = Size::new(250, 250);
const OUTPUT: Size = Size::new(1920, 1080);

#[test]
fn windowed_startup_draws_after_one_roundtrip() {
    let mut rl = RenderLoop::new(WINDOWED);
    let mut compositor = FakeCompositor::with_output(OUTPUT);

    compositor.set_fullscreen(&mut rl, false);
    assert_eq!(rl.size(), WINDOWED);
    assert!(!rl.is_configured());
    assert!(compositor.draws.is_empty());

    compositor.roundtrip(&mut rl, 10);
    assert!(rl.is_configured());
    // no frame has been presented yet, the clock starts at zero
    assert_eq!(compositor.draws, vec![0]);
    assert_eq!(compositor.presents, 1);
    assert_eq!(compositor.frames_requested(), 1);
}

#[test]
fn fullscreen_and_back() {
    let mut rl = RenderLoop::new(WINDOWED);
    let mut compositor = FakeCompositor::with_output(OUTPUT);
    compositor.set_fullscreen(&mut rl, false);
    compositor.roundtrip(&mut rl, 0);

    compositor.set_fullscreen(&mut rl, true);
    assert!(!rl.is_configured());

    compositor.roundtrip(&mut rl, 16);
    assert!(rl.is_configured());
    assert_eq!(rl.size(), OUTPUT);
    assert_eq!(compositor.target_size, Some(OUTPUT));
    assert_eq!(rl.windowed_size(), WINDOWED);

    compositor.set_fullscreen(&mut rl, false);
    assert_eq!(rl.size(), WINDOWED);
    assert_eq!(compositor.target_size, Some(WINDOWED));

    compositor.roundtrip(&mut rl, 32);
    assert!(rl.is_configured());
    assert_eq!(rl.size(), WINDOWED);
}

#[test]
fn steady_state_keeps_one_frame_in_flight() {
    let mut rl = RenderLoop::new(WINDOWED);
    let mut compositor = FakeCompositor::default();
    compositor.set_fullscreen(&mut rl, false);

    for t in 0..60 {
        compositor.roundtrip(&mut rl, t * 16);
        assert_eq!(compositor.frames_requested(), 1);
        assert!(rl.pending_frame().is_some());
    }
    assert_eq!(compositor.draws.len(), 60);
}

#[test]
fn toggle_between_frames_skips_one_draw() {
    let mut rl = RenderLoop::new(WINDOWED);
    let mut compositor = FakeCompositor::with_output(OUTPUT);
    compositor.set_fullscreen(&mut rl, false);
    compositor.roundtrip(&mut rl, 0);
    assert_eq!(compositor.draws.len(), 1);

    // the frame callback for the windowed frame is already queued ahead of the barrier
    compositor.set_fullscreen(&mut rl, true);
    assert!(matches!(compositor.requests[0], Request::Frame(_)));

    compositor.roundtrip(&mut rl, 16);

    // frame callback suppressed, barrier bootstrapped a single fresh frame
    assert_eq!(compositor.draws, vec![0, 16]);
    assert_eq!(compositor.frames_requested(), 1);
    assert_eq!(rl.size(), OUTPUT);
}

#[test]
fn repeated_fullscreen_requests_converge() {
    let mut rl = RenderLoop::new(WINDOWED);
    let mut compositor = FakeCompositor::with_output(OUTPUT);
    compositor.set_fullscreen(&mut rl, true);
    compositor.set_fullscreen(&mut rl, true);

    let fullscreen_requests = compositor
        .requests
        .iter()
        .filter(|r| **r == Request::Fullscreen)
        .count();
    assert_eq!(fullscreen_requests, 2);

    compositor.roundtrip(&mut rl, 5);
    assert!(rl.is_fullscreen());
    assert!(rl.is_configured());
    assert_eq!(compositor.draws, vec![0]);
    assert_eq!(compositor.frames_requested(), 1);
}
