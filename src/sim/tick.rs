//! Per-frame simulation step and run transitions
//!
//! One call to [`tick`] is one rendered frame. There is no fixed timestep and
//! no catch-up: dropped frames slow the game down.

use rand::Rng;

use super::collision::detect_collision;
use super::difficulty::DifficultyProfile;
use super::obstacles::ObstacleField;
use super::state::{Actor, GameEvent, GameState, RunState, WorldBounds};
use crate::consts::*;
use crate::error::GameError;

/// Autopilot jumps when this far below its target and falling
const AUTOPILOT_MARGIN: f32 = 10.0;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump requested since the last frame
    pub jump: bool,
    /// Demo mode - the autopilot decides when to jump
    pub autopilot: bool,
}

/// IDLE/ENDED -> RUNNING
///
/// Validates everything up front so a failure leaves `state` untouched.
/// Returns `Ok(false)` when already running.
pub fn start_run(
    state: &mut GameState,
    world: WorldBounds,
    profile: DifficultyProfile,
) -> Result<bool, GameError> {
    if state.phase == RunState::Running {
        return Ok(false);
    }

    world.validate()?;
    let field = ObstacleField::new(&world, &profile)?;

    state.world = world;
    state.profile = profile;
    state.actor = Actor::new(&world);
    state.field = field;
    state.score.reset_current();
    state.grace_frames = GRACE_FRAMES;
    state.started_at_frame = state.frame;
    state.run_frames = 0;
    state.phase = RunState::Running;
    state.events.push(GameEvent::RunStarted {
        difficulty: profile.id,
    });

    log::info!(
        "Run started: {} (gap={}, speed={}), world={}x{}",
        profile.name,
        profile.gap_height,
        profile.base_speed,
        world.width,
        world.height
    );
    Ok(true)
}

/// ENDED -> IDLE. Returns false (and does nothing) from any other phase.
pub fn return_to_menu(state: &mut GameState) -> bool {
    if state.phase != RunState::Ended {
        return false;
    }
    state.phase = RunState::Idle;
    true
}

/// RUNNING -> ENDED
fn end_run(state: &mut GameState) {
    state.phase = RunState::Ended;
    let new_best = state.score.finalize();
    state.events.push(GameEvent::RunEnded {
        score: state.score.current,
        best: state.score.best,
        new_best,
    });
    log::info!(
        "Run ended after {} frames: score={}, best={}{}",
        state.run_frames,
        state.score.current,
        state.score.best,
        if new_best { " (new best!)" } else { "" }
    );
}

/// Advance the game state by one frame
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, rng: &mut R) {
    // The loop only runs while a run is active
    if state.phase != RunState::Running {
        return;
    }

    state.frame += 1;
    state.run_frames += 1;

    let wants_jump = input.jump || (input.autopilot && !state.in_grace() && autopilot_wants_jump(state));
    if wants_jump {
        state.actor.jump();
        state.events.push(GameEvent::Jump);
    }

    state.actor.integrate(GRAVITY);

    // Grace window: hold the actor centered, nothing else happens
    if state.grace_frames > 0 {
        state.grace_frames -= 1;
        state.actor.pin(state.world.center_y());
        return;
    }

    // Speed is read before scoring, so this frame moves at the pre-score speed
    let speed = state.current_speed();
    state.field.maybe_spawn(rng);
    state.field.advance(speed);
    state.field.retire();

    if let Some(kind) = detect_collision(&state.actor, &state.field, &state.world) {
        log::debug!("Collision: {kind:?} at y={}", state.actor.y);
        state.events.push(GameEvent::Collision { kind });
        end_run(state);
        return;
    }

    let passed = state.field.mark_passed(state.actor.hitbox_left());
    for _ in 0..passed {
        let score = state.score.record_pass();
        state.events.push(GameEvent::Scored { score });
    }
}

/// Demo-mode decision: aim for the middle of the next gap
///
/// Jumps only while falling, so each impulse gets its full rise before the
/// next decision.
pub fn autopilot_wants_jump(state: &GameState) -> bool {
    let target = state
        .field
        .next_unpassed()
        .map(|o| o.gap_top + state.field.gap_height() / 2.0)
        .unwrap_or_else(|| state.world.center_y());
    state.actor.vel > 0.0 && state.actor.y > target + AUTOPILOT_MARGIN
}
