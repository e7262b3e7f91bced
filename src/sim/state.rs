//! Game state and core simulation types
//!
//! Everything a frame mutates lives in [`GameState`]. Readers outside the
//! simulation only ever see it through `&GameState` or a snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, CollisionKind};
use super::difficulty::DifficultyProfile;
use super::obstacles::ObstacleField;
use super::score::ScoreTracker;
use crate::consts::*;
use crate::error::GameError;

/// Current phase of the run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// In the menu, waiting for a start command
    #[default]
    Idle,
    /// Active gameplay, one step per frame
    Running,
    /// Run ended by a collision
    Ended,
}

/// World dimensions in pixels, fixed for the duration of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Reject zero, negative or non-finite dimensions
    pub fn validate(&self) -> Result<(), GameError> {
        let ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if ok {
            Ok(())
        } else {
            Err(GameError::InvalidWorld {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Top of the ground band
    pub fn floor_y(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// The player-controlled body
///
/// Only the vertical axis moves; `x` is fixed at a fraction of the world width
/// for the whole run.
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub vel: f32,
    /// Half extents of the body (ground/ceiling checks)
    pub half_extent: Vec2,
    /// Half extents of the hitbox used against obstacles and for pass-through
    pub hitbox_half_extent: Vec2,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new(&WorldBounds::default())
    }
}

impl Actor {
    /// Actor centered vertically, at rest
    pub fn new(world: &WorldBounds) -> Self {
        Self {
            x: world.width * ACTOR_X_FRACTION,
            y: world.center_y(),
            vel: 0.0,
            half_extent: Vec2::splat(ACTOR_HALF_EXTENT),
            hitbox_half_extent: Vec2::splat(ACTOR_HITBOX_HALF_EXTENT),
        }
    }

    /// Overwrite velocity with the jump impulse
    pub fn jump(&mut self) {
        self.vel = JUMP_IMPULSE;
    }

    /// One frame of gravity then motion
    pub fn integrate(&mut self, gravity: f32) {
        self.vel += gravity;
        self.y += self.vel;
    }

    /// Hold at a height with no velocity (grace window)
    pub fn pin(&mut self, y: f32) {
        self.y = y;
        self.vel = 0.0;
    }

    pub fn top(&self) -> f32 {
        self.y - self.half_extent.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.half_extent.y
    }

    /// Hitbox used for obstacle overlap
    pub fn hitbox(&self) -> Aabb {
        Aabb::from_center(Vec2::new(self.x, self.y), self.hitbox_half_extent)
    }

    /// Leading edge used for pass-through scoring
    pub fn hitbox_left(&self) -> f32 {
        self.x - self.hitbox_half_extent.x
    }
}

/// Discrete notifications emitted by a step, drained by the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// A run started with the given difficulty tier
    RunStarted { difficulty: u8 },
    /// Jump impulse applied
    Jump,
    /// An obstacle was passed, `score` is the new current score
    Scored { score: u32 },
    /// The actor hit something
    Collision { kind: CollisionKind },
    /// Run finished
    RunEnded { score: u32, best: u32, new_best: bool },
}

/// Complete simulation state for one session
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Current phase
    pub phase: RunState,
    /// World bounds captured when the run started
    pub world: WorldBounds,
    /// Difficulty captured when the run started
    pub profile: DifficultyProfile,
    /// Player body
    pub actor: Actor,
    /// Live obstacles
    pub field: ObstacleField,
    /// Current and best score
    pub score: ScoreTracker,
    /// Grace frames left before physics takes effect
    pub grace_frames: u32,
    /// Frames stepped over the whole session
    pub frame: u64,
    /// Session frame at which the current run started
    pub started_at_frame: u64,
    /// Frames stepped in the current run
    pub run_frames: u64,
    /// Events emitted since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GameState {
    /// Idle state with a previously persisted best score
    pub fn new(best_score: u32) -> Self {
        let world = WorldBounds::default();
        Self {
            phase: RunState::Idle,
            world,
            profile: DifficultyProfile::default(),
            actor: Actor::new(&world),
            field: ObstacleField::default(),
            score: ScoreTracker::new(best_score),
            grace_frames: 0,
            frame: 0,
            started_at_frame: 0,
            run_frames: 0,
            events: Vec::new(),
        }
    }

    /// Obstacle speed for the current score
    pub fn current_speed(&self) -> f32 {
        self.profile.live_speed(self.score.current)
    }

    pub fn in_grace(&self) -> bool {
        self.grace_frames > 0
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_validation() {
        assert!(WorldBounds::new(800.0, 600.0).validate().is_ok());
        assert!(matches!(
            WorldBounds::new(0.0, 600.0).validate(),
            Err(GameError::InvalidWorld { .. })
        ));
        assert!(WorldBounds::new(800.0, -1.0).validate().is_err());
        assert!(WorldBounds::new(f32::NAN, 600.0).validate().is_err());
    }

    #[test]
    fn test_actor_starts_centered() {
        let world = WorldBounds::new(1000.0, 500.0);
        let actor = Actor::new(&world);
        assert_eq!(actor.x, 200.0);
        assert_eq!(actor.y, 250.0);
        assert_eq!(actor.vel, 0.0);
    }

    #[test]
    fn test_jump_overwrites_velocity() {
        let mut actor = Actor::default();
        actor.vel = 12.0;
        actor.jump();
        assert_eq!(actor.vel, JUMP_IMPULSE);

        // Jumping again while rising resets to the same impulse
        actor.integrate(GRAVITY);
        actor.jump();
        assert_eq!(actor.vel, JUMP_IMPULSE);
    }

    #[test]
    fn test_integrate_adds_gravity_before_moving() {
        let mut actor = Actor::default();
        let y0 = actor.y;
        actor.integrate(GRAVITY);
        assert!((actor.vel - GRAVITY).abs() < 1e-6);
        assert!((actor.y - (y0 + GRAVITY)).abs() < 1e-6);
    }
}
