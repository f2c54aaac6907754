use physicsbox::core::random::Rng;
use physicsbox::sandbox::solver_iterations;
use physicsbox::{FrameLoop, ManualDriver, RecordingSurface, Settings, Tick, WorldLayout};

fn standard_loop() -> FrameLoop {
    let layout = WorldLayout::new(1280.0, 720.0);
    FrameLoop::new(&layout, Settings::default().shared(), &mut Rng::new(7))
}

#[test]
fn frame_loop_smoke_ticks() {
    let mut frame_loop = standard_loop();
    let mut driver = ManualDriver::default();
    for _ in 0..120 {
        let mut surface = RecordingSurface::new();
        assert_eq!(frame_loop.tick(&mut driver, &mut surface), Ok(Tick::Continue));
        // background + 279 bodies
        assert_eq!(surface.fills().len(), 280);
        assert_eq!(surface.depth(), 0);
    }
    assert_eq!(driver.requested, 120);

    let stats = frame_loop.stats();
    assert_eq!(stats.frames(), 120);
    assert_eq!(stats.body_count(), 279);
    assert!(stats.last_tick_ms() >= 0.0);
    assert!(stats.contact_count() > 0);
}

#[test]
fn bodies_stay_inside_the_walls() {
    let mut frame_loop = standard_loop();
    let mut driver = ManualDriver::default();
    for _ in 0..300 {
        frame_loop.tick(&mut driver, &mut RecordingSurface::new()).expect("tick");
    }
    for body in frame_loop.world().bodies().iter().filter(|b| !b.is_static) {
        assert!(body.pos.x.is_finite() && body.pos.y.is_finite());
        assert!(body.pos.x > -50.0 && body.pos.x < 1330.0, "x = {}", body.pos.x);
        assert!(body.pos.y > -50.0 && body.pos.y < 770.0, "y = {}", body.pos.y);
    }
}

#[test]
fn slow_motion_runs_more_passes_over_shorter_steps() {
    let mut frame_loop = standard_loop();
    frame_loop.settings().borrow_mut().time.speed = 0.25;
    frame_loop.tick(&mut ManualDriver::default(), &mut RecordingSurface::new()).expect("tick");

    assert_eq!(frame_loop.world().iterations, solver_iterations(0.25));
    assert_eq!(frame_loop.world().iterations.position, 24);
    assert_eq!(frame_loop.world().elapsed_ms(), 4.0);
}

#[test]
fn stopping_ends_the_chain() {
    let mut frame_loop = standard_loop();
    let token = frame_loop.run_token();
    let mut driver = ManualDriver::default();

    frame_loop.tick(&mut driver, &mut RecordingSurface::new()).expect("tick");
    token.stop();
    let mut surface = RecordingSurface::new();
    assert_eq!(frame_loop.tick(&mut driver, &mut surface), Ok(Tick::Stopped));
    assert_eq!(driver.requested, 1);
    assert!(surface.commands().is_empty());
    assert_eq!(frame_loop.stats().frames(), 1);
}
