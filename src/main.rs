//! Flop Bird entry point
//!
//! Natively this runs a headless attract-mode demo: the autopilot plays a few
//! runs and the best score is kept in a file next to the working directory.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flop_bird::persistence::JsonFileStore;
    use flop_bird::sim::{GameEvent, RunState, WorldBounds};
    use flop_bird::{Session, Settings};

    /// Runs in the demo
    const DEMO_RUNS: u32 = 3;
    /// Safety cap so a perfect autopilot still terminates
    const MAX_FRAMES_PER_RUN: u32 = 20_000;

    env_logger::init();
    log::info!("Flop Bird (native) starting headless autopilot demo...");

    let seed: u64 = rand::random();
    let store = JsonFileStore::new("flop_bird_best.json");
    let mut session = Session::new(seed, Box::new(store));
    session.resize(WorldBounds::new(800.0, 600.0));
    session.apply_settings(&Settings {
        autopilot: true,
        ..Default::default()
    });
    session.add_listener(Box::new(|event: &GameEvent| {
        if let GameEvent::Scored { score } = event {
            log::debug!("Score: {score}");
        }
    }));

    for run in 1..=DEMO_RUNS {
        if let Err(e) = session.start() {
            log::error!("Cannot start run {run}: {e}");
            return;
        }

        let mut frames = 0;
        while session.run_state() == RunState::Running && frames < MAX_FRAMES_PER_RUN {
            session.step();
            frames += 1;
        }

        let snapshot = session.snapshot();
        log::info!(
            "Run {run}/{DEMO_RUNS}: score={}, best={}, frames={}, final speed={:.1}",
            snapshot.score,
            snapshot.best,
            snapshot.run_frames,
            snapshot.speed
        );
        if snapshot.phase == RunState::Running {
            log::info!("Run {run} hit the frame cap");
            break;
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Session` directly; nothing to do here
}
