//! Flop Bird - A side-scrolling gap-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic frame-driven simulation (physics, obstacles, collisions, scoring)
//! - `session`: Owns one game state and drives it from host commands and frames
//! - `persistence`: Best-score stores (memory, file, LocalStorage)
//! - `settings`: Player preferences (difficulty, character, audio)
//! - `audio`: Sound effects triggered by simulation events
//! - `platform`: Key/pointer to command mapping

pub mod audio;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{GameError, StoreError};
pub use session::{Command, EventListener, Session, Snapshot};
pub use settings::Settings;

/// Game configuration constants
///
/// All per-frame quantities are in pixels per rendered frame; the simulation is
/// coupled to the display refresh, not to wall-clock time.
pub mod consts {
    /// Velocity added to the actor every frame
    pub const GRAVITY: f32 = 0.6;
    /// Velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -10.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    /// Distance from the newest obstacle to the right edge before the next spawn
    pub const PIPE_SPACING: f32 = 350.0;
    /// Minimum height of the top and bottom obstacle segments
    pub const MIN_OBSTACLE_EXTENT: f32 = 50.0;
    /// Ground band at the bottom of the world
    pub const GROUND_HEIGHT: f32 = 20.0;

    /// Frames of immunity after a run starts (actor held at center)
    pub const GRACE_FRAMES: u32 = 60;
    /// Obstacle speed added per point scored
    pub const SPEED_SCORE_FACTOR: f32 = 0.2;

    /// Actor defaults
    pub const ACTOR_X_FRACTION: f32 = 0.2;
    /// Half extent of the actor body (ground/ceiling checks)
    pub const ACTOR_HALF_EXTENT: f32 = 20.0;
    /// Half extent of the forgiving hitbox used against obstacles
    pub const ACTOR_HITBOX_HALF_EXTENT: f32 = 15.0;
}
