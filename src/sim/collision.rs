//! Collision detection
//!
//! Axis-aligned boxes only: the actor's hitbox against each obstacle's two
//! segments, plus the actor body against the ceiling and the ground band.
//! Detection is pure and stops at the first hit.

use glam::Vec2;
use serde::Serialize;

use super::obstacles::{Obstacle, ObstacleField};
use super::state::{Actor, WorldBounds};
use crate::consts::OBSTACLE_WIDTH;

/// What the actor hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollisionKind {
    Obstacle { id: u32 },
    Ground,
    Ceiling,
}

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// Top segment `[0, gap_top]` and bottom segment `[gap_top + gap, floor]`
pub fn obstacle_segments(obstacle: &Obstacle, gap_height: f32, floor_y: f32) -> [Aabb; 2] {
    let left = obstacle.x;
    let right = obstacle.x + OBSTACLE_WIDTH;
    [
        Aabb::new(Vec2::new(left, 0.0), Vec2::new(right, obstacle.gap_top)),
        Aabb::new(
            Vec2::new(left, obstacle.gap_top + gap_height),
            Vec2::new(right, floor_y),
        ),
    ]
}

/// Does the actor's hitbox overlap either segment of `obstacle`?
pub fn actor_obstacle_collision(
    actor: &Actor,
    obstacle: &Obstacle,
    gap_height: f32,
    floor_y: f32,
) -> bool {
    let hitbox = actor.hitbox();
    obstacle_segments(obstacle, gap_height, floor_y)
        .iter()
        .any(|segment| hitbox.overlaps(segment))
}

/// Ground/ceiling check on the actor body (inclusive bounds)
pub fn actor_bounds_collision(actor: &Actor, world: &WorldBounds) -> Option<CollisionKind> {
    if actor.bottom() >= world.floor_y() {
        Some(CollisionKind::Ground)
    } else if actor.top() <= 0.0 {
        Some(CollisionKind::Ceiling)
    } else {
        None
    }
}

/// First collision found this frame, if any
pub fn detect_collision(
    actor: &Actor,
    field: &ObstacleField,
    world: &WorldBounds,
) -> Option<CollisionKind> {
    let floor_y = world.floor_y();
    field
        .obstacles()
        .iter()
        .find(|o| actor_obstacle_collision(actor, o, field.gap_height(), floor_y))
        .map(|o| CollisionKind::Obstacle { id: o.id })
        .or_else(|| actor_bounds_collision(actor, world))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::DifficultyProfile;

    fn world() -> WorldBounds {
        WorldBounds::new(800.0, 600.0)
    }

    fn actor_at(y: f32) -> Actor {
        let mut actor = Actor::new(&world());
        actor.y = y;
        actor
    }

    fn obstacle(x: f32, gap_top: f32) -> Obstacle {
        Obstacle {
            id: 1,
            x,
            gap_top,
            passed: false,
        }
    }

    #[test]
    fn test_ground_and_ceiling_bounds() {
        let world = world();
        // 561 + 20 = 581 >= 580
        assert_eq!(actor_bounds_collision(&actor_at(561.0), &world), Some(CollisionKind::Ground));
        assert_eq!(actor_bounds_collision(&actor_at(560.0), &world), Some(CollisionKind::Ground));
        assert_eq!(actor_bounds_collision(&actor_at(559.0), &world), None);

        assert_eq!(actor_bounds_collision(&actor_at(20.0), &world), Some(CollisionKind::Ceiling));
        assert_eq!(actor_bounds_collision(&actor_at(21.0), &world), None);
    }

    #[test]
    fn test_actor_inside_gap_is_safe() {
        // Actor at x=160, hitbox 145..175; gap 200..450
        let o = obstacle(140.0, 200.0);
        assert!(!actor_obstacle_collision(&actor_at(300.0), &o, 250.0, 580.0));
    }

    #[test]
    fn test_actor_hits_top_segment() {
        let o = obstacle(140.0, 200.0);
        // Hitbox top at 199 < 200
        assert!(actor_obstacle_collision(&actor_at(214.0), &o, 250.0, 580.0));
        // Hitbox top exactly at the gap edge is not an overlap
        assert!(!actor_obstacle_collision(&actor_at(215.0), &o, 250.0, 580.0));
    }

    #[test]
    fn test_actor_hits_bottom_segment() {
        let o = obstacle(140.0, 200.0);
        // Bottom segment starts at 450; hitbox bottom 451
        assert!(actor_obstacle_collision(&actor_at(436.0), &o, 250.0, 580.0));
        assert!(!actor_obstacle_collision(&actor_at(435.0), &o, 250.0, 580.0));
    }

    #[test]
    fn test_no_horizontal_overlap() {
        // Obstacle spans 175..255; hitbox right edge is 175 (touching only)
        let o = obstacle(175.0, 200.0);
        assert!(!actor_obstacle_collision(&actor_at(100.0), &o, 250.0, 580.0));
        // Obstacle spans 65..145; hitbox left edge is 145 (touching only)
        let o = obstacle(65.0, 200.0);
        assert!(!actor_obstacle_collision(&actor_at(100.0), &o, 250.0, 580.0));
    }

    #[test]
    fn test_detect_prefers_obstacle_then_bounds() {
        let world = world();
        let mut field = ObstacleField::new(&world, &DifficultyProfile::default()).unwrap();
        assert_eq!(detect_collision(&actor_at(300.0), &field, &world), None);

        let id = field.push_for_test(140.0, 200.0);
        assert_eq!(
            detect_collision(&actor_at(100.0), &field, &world),
            Some(CollisionKind::Obstacle { id })
        );
        // Below the obstacle's bottom segment and into the ground: obstacle reported first
        assert_eq!(
            detect_collision(&actor_at(570.0), &field, &world),
            Some(CollisionKind::Obstacle { id })
        );
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(1.0));
        let b = Aabb::from_center(Vec2::new(1.5, 0.0), Vec2::splat(1.0));
        let c = Aabb::from_center(Vec2::new(2.0, 0.0), Vec2::splat(1.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
