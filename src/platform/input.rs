//! Key and pointer mapping
//!
//! In a run only Space/ArrowUp (or a click/tap) jump. In the menu and on the
//! game-over screen any key starts a run; clicks there belong to the menu
//! widgets.

use crate::session::Command;
use crate::sim::RunState;

/// Key codes that jump while running (DOM `KeyboardEvent.code`)
pub const JUMP_KEYS: [&str; 2] = ["Space", "ArrowUp"];

/// Command for a key press
pub fn command_for_key(code: &str, state: RunState) -> Option<Command> {
    match state {
        RunState::Running => JUMP_KEYS.contains(&code).then_some(Command::Jump),
        RunState::Idle | RunState::Ended => Some(Command::Start),
    }
}

/// Command for a click or touch on the play area
pub fn command_for_pointer(state: RunState) -> Option<Command> {
    (state == RunState::Running).then_some(Command::Jump)
}
