//! The visibility oracle shared by all searches on a [`Plane`].

use crate::{geometry::Segment, Plane, Position};

/// `true` if the straight line from `a` to `b` is not blocked by any solid Obstacle on `plane`.
///
/// Every edge of every solid Obstacle is tested against the line, stopping at the first hit.
/// Touching an edge, or running along it, counts as blocked. Point obstacles only block if the
/// Plane's [`PlannerConfig::point_obstacles_block`](crate::PlannerConfig::point_obstacles_block)
/// is set.
///
/// ```
/// # use incremental_pathfinding::prelude::*;
/// # use incremental_pathfinding::visibility::visible;
/// let mut plane = Plane::new(100, 100).unwrap();
/// let a = plane
///     .add_obstacle(Obstacle::segment(Position::new(10.0, 10.0), Position::new(90.0, 90.0)).unwrap())
///     .unwrap();
/// let b = plane
///     .add_obstacle(Obstacle::segment(Position::new(10.0, 90.0), Position::new(90.0, 10.0)).unwrap())
///     .unwrap();
///
/// let top = Position::new(50.0, 10.0);
/// let bottom = Position::new(50.0, 90.0);
/// assert!(!visible(top, bottom, &plane));
///
/// plane.remove_obstacle(a);
/// plane.remove_obstacle(b);
/// assert!(visible(top, bottom, &plane));
/// ```
pub fn visible(a: Position, b: Position, plane: &Plane) -> bool {
    let sight = Segment::new(a, b);
    let point_obstacles_block = plane.config().point_obstacles_block;
    !plane
        .obstacles()
        .any(|(_, obstacle)| obstacle.blocks(&sight, point_obstacles_block))
}
