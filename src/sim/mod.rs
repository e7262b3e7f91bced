//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per rendered frame, no wall-clock time
//! - Injected RNG only
//! - Stable iteration order (obstacles by creation)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod obstacles;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionKind, detect_collision};
pub use difficulty::{DEFAULT_DIFFICULTY_ID, DifficultyProfile, PROFILES};
pub use obstacles::{GapRange, Obstacle, ObstacleField};
pub use score::ScoreTracker;
pub use state::{Actor, GameEvent, GameState, RunState, WorldBounds};
pub use tick::{TickInput, autopilot_wants_jump, return_to_menu, start_run, tick};
