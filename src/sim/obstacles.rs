//! Obstacle spawning, movement and retirement
//!
//! Obstacles are stored oldest first. New ones always enter at the right edge
//! of the world, so x is strictly decreasing along the list from newest to
//! oldest.

use rand::Rng;
use serde::Serialize;

use super::difficulty::DifficultyProfile;
use super::state::WorldBounds;
use crate::consts::*;
use crate::error::GameError;

/// A pair of segments with a gap between them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Bottom of the top segment
    pub gap_top: f32,
    /// Actor has cleared the trailing edge
    pub passed: bool,
}

impl Obstacle {
    /// Trailing edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }
}

/// Inclusive integer range `gap_top` is drawn from
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GapRange {
    pub min_top: i32,
    pub max_top: i32,
    pub gap_height: f32,
}

impl GapRange {
    /// Valid placements for a gap of `gap_height` in `world`
    ///
    /// Fails when the gap plus both minimum segment heights does not fit above
    /// the ground band.
    pub fn new(world: &WorldBounds, gap_height: f32) -> Result<Self, GameError> {
        let min_top = MIN_OBSTACLE_EXTENT.ceil() as i32;
        let max_top = world.height - gap_height - MIN_OBSTACLE_EXTENT - GROUND_HEIGHT;
        if !max_top.is_finite() || max_top < min_top as f32 {
            return Err(GameError::GapDoesNotFit {
                gap_height,
                available: world.floor_y() - 2.0 * MIN_OBSTACLE_EXTENT,
            });
        }
        Ok(Self {
            min_top,
            max_top: max_top.floor() as i32,
            gap_height,
        })
    }

    pub fn contains(&self, gap_top: f32) -> bool {
        gap_top >= self.min_top as f32 && gap_top <= self.max_top as f32
    }
}

/// The live obstacle set for one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    gap: GapRange,
    /// Right edge of the world, where obstacles enter
    spawn_x: f32,
    next_id: u32,
}

impl ObstacleField {
    /// Empty field for a validated world/profile combination
    pub fn new(world: &WorldBounds, profile: &DifficultyProfile) -> Result<Self, GameError> {
        let gap = GapRange::new(world, profile.gap_height)?;
        Ok(Self {
            obstacles: Vec::new(),
            gap,
            spawn_x: world.width,
            next_id: 1,
        })
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn gap(&self) -> &GapRange {
        &self.gap
    }

    pub fn gap_height(&self) -> f32 {
        self.gap.gap_height
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Newest obstacle (largest x)
    pub fn newest(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    /// Empty, or the newest obstacle is at least `PIPE_SPACING` from the right edge
    pub fn should_spawn(&self) -> bool {
        self.newest()
            .is_none_or(|last| self.spawn_x - last.x >= PIPE_SPACING)
    }

    /// Spawn one obstacle at the right edge if spacing allows. Returns its id.
    pub fn maybe_spawn<R: Rng>(&mut self, rng: &mut R) -> Option<u32> {
        if !self.should_spawn() {
            return None;
        }
        Some(self.spawn(rng))
    }

    /// Spawn unconditionally at the right edge
    pub fn spawn<R: Rng>(&mut self, rng: &mut R) -> u32 {
        let gap_top = rng.random_range(self.gap.min_top..=self.gap.max_top) as f32;
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Spawn obstacle {id}: x={}, gap_top={gap_top}", self.spawn_x);
        self.obstacles.push(Obstacle {
            id,
            x: self.spawn_x,
            gap_top,
            passed: false,
        });
        id
    }

    /// Move every obstacle left by `speed`
    pub fn advance(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Drop obstacles fully past the left edge. Returns how many were removed.
    pub fn retire(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.right() >= 0.0);
        before - self.obstacles.len()
    }

    /// Mark obstacles whose trailing edge is behind `actor_left`.
    /// Returns the number newly passed.
    pub fn mark_passed(&mut self, actor_left: f32) -> u32 {
        let mut count = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && actor_left > obstacle.right() {
                obstacle.passed = true;
                count += 1;
            }
        }
        count
    }

    /// Oldest obstacle the actor has not yet passed
    pub fn next_unpassed(&self) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| !o.passed)
    }

    #[cfg(test)]
    pub(crate) fn push_for_test(&mut self, x: f32, gap_top: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle {
            id,
            x,
            gap_top,
            passed: false,
        });
        id
    }
}
