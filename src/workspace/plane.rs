use super::Bounds;
use crate::{visibility, Obstacle, PlanResult, PlannerConfig, Position};
use hashbrown::HashMap;
use log::trace;

/// A handle to an [`Obstacle`] placed on a [`Plane`]
pub type ObstacleID = usize;

/// A continuous workspace of `rows` x `cols`, populated with [`Obstacle`]s.
///
/// The Plane keeps the union of all via points of its Obstacles up to date on every
/// modification. Adding or removing an Obstacle only touches the via points of that Obstacle.
/// Via points that would lie outside the Plane are dropped.
///
/// ## Examples
/// ```
/// # use incremental_pathfinding::prelude::*;
/// let mut plane = Plane::new(10, 10).unwrap();
/// let id = plane
///     .add_obstacle(Obstacle::point(Position::new(5.0, 5.0)))
///     .unwrap();
/// assert_eq!(plane.via_points().count(), 4);
///
/// // vertices have to lie on the Plane
/// assert!(plane.add_obstacle(Obstacle::point(Position::new(11.0, 5.0))).is_err());
///
/// plane.remove_obstacle(id);
/// assert_eq!(plane.via_points().count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Plane {
    bounds: Bounds,
    obstacles: slab::Slab<Obstacle>,
    /// every via point and the number of Obstacles contributing it
    via_points: HashMap<Position, usize>,
    config: PlannerConfig,
}

impl Plane {
    /// Creates an empty Plane with the default [`PlannerConfig`].
    ///
    /// ## Errors
    /// [`PlanError::InvalidBounds`](crate::PlanError::InvalidBounds) if either dimension is 0.
    pub fn new(rows: usize, cols: usize) -> PlanResult<Plane> {
        Plane::with_config(rows, cols, PlannerConfig::default())
    }

    /// Creates an empty Plane.
    ///
    /// ## Errors
    /// [`PlanError::InvalidBounds`](crate::PlanError::InvalidBounds) if either dimension is 0.
    pub fn with_config(rows: usize, cols: usize, config: PlannerConfig) -> PlanResult<Plane> {
        Ok(Plane {
            bounds: Bounds::new(rows, cols)?,
            obstacles: slab::Slab::new(),
            via_points: HashMap::new(),
            config,
        })
    }

    /// the Bounds of the Plane
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// the config used for via points and visibility
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// `true` if `position` lies on the Plane. The border counts as part of the Plane.
    pub fn contains(&self, position: Position) -> bool {
        self.bounds.contains_position(position)
    }

    /// Places an Obstacle on the Plane.
    ///
    /// ## Errors
    /// [`PlanError::OutOfBounds`](crate::PlanError::OutOfBounds) for the first vertex that does
    /// not lie on the Plane. The Plane is not modified in that case.
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> PlanResult<ObstacleID> {
        for &vertex in obstacle.vertex_points() {
            self.bounds.check_position(vertex)?;
        }
        for via in self.contributed_via_points(&obstacle) {
            *self.via_points.entry(via).or_insert(0) += 1;
        }
        let kind = obstacle.kind();
        let id = self.obstacles.insert(obstacle);
        trace!(
            "added {} obstacle #{}, {} via points in total",
            kind,
            id,
            self.via_points.len()
        );
        Ok(id)
    }

    /// Removes an Obstacle from the Plane and returns it, or `None` if `id` is unknown.
    pub fn remove_obstacle(&mut self, id: ObstacleID) -> Option<Obstacle> {
        if !self.obstacles.contains(id) {
            return None;
        }
        let obstacle = self.obstacles.remove(id);
        for via in self.contributed_via_points(&obstacle) {
            if let Some(count) = self.via_points.get_mut(&via) {
                *count -= 1;
                if *count == 0 {
                    self.via_points.remove(&via);
                }
            }
        }
        trace!(
            "removed {} obstacle #{}, {} via points left",
            obstacle.kind(),
            id,
            self.via_points.len()
        );
        Some(obstacle)
    }

    /// Removes every Obstacle
    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
        self.via_points.clear();
    }

    /// the Obstacle with the given id
    pub fn obstacle(&self, id: ObstacleID) -> Option<&Obstacle> {
        self.obstacles.get(id)
    }

    /// All Obstacles on the Plane with their ids
    pub fn obstacles(&self) -> impl Iterator<Item = (ObstacleID, &Obstacle)> + '_ {
        self.obstacles.iter()
    }

    /// the number of Obstacles on the Plane
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// The via points of all Obstacles, each listed once, in no particular order.
    pub fn via_points(&self) -> impl Iterator<Item = Position> + '_ {
        self.via_points.keys().copied()
    }

    /// The via points of all Obstacles in ascending order.
    pub fn sorted_via_points(&self) -> Vec<Position> {
        let mut ret: Vec<Position> = self.via_points().collect();
        ret.sort_unstable();
        ret
    }

    /// The corners and endpoints of all Obstacles
    pub fn vertex_points(&self) -> impl Iterator<Item = Position> + '_ {
        self.obstacles
            .iter()
            .flat_map(|(_, obstacle)| obstacle.vertex_points().iter().copied())
    }

    /// `true` if nothing on the Plane blocks the straight line from `a` to `b`.
    ///
    /// See [`visibility::visible`].
    pub fn visible(&self, a: Position, b: Position) -> bool {
        visibility::visible(a, b, self)
    }

    /// How far via points are pushed away from the Obstacles
    pub fn propagation_magnitude(&self) -> f64 {
        self.config.propagation_magnitude
    }

    /// Changes how far via points are pushed away from the Obstacles.
    ///
    /// Unlike adding or removing Obstacles, this recomputes the via points of every Obstacle.
    pub fn set_propagation_magnitude(&mut self, magnitude: f64) {
        self.config.propagation_magnitude = magnitude;
        self.via_points.clear();
        for (_, obstacle) in self.obstacles.iter() {
            for via in obstacle.bounding_points(magnitude) {
                if self.bounds.contains_position(via) {
                    *self.via_points.entry(via).or_insert(0) += 1;
                }
            }
        }
        trace!(
            "recomputed {} via points with magnitude {}",
            self.via_points.len(),
            magnitude
        );
    }

    fn contributed_via_points(&self, obstacle: &Obstacle) -> Vec<Position> {
        let mut ret = obstacle.bounding_points(self.config.propagation_magnitude);
        ret.retain(|&p| self.bounds.contains_position(p));
        ret
    }
}
