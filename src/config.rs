/// Options for configuring workspaces and planners
///
/// Default options:
/// ```
/// # use incremental_pathfinding::PlannerConfig;
/// assert_eq!(
///     PlannerConfig {
///         include_diagonals: true,
///         propagation_magnitude: 1.0,
///         point_obstacles_block: false,
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerConfig {
    /// `true` (default): Grid searches move along the 4 cardinal directions and the 4 diagonals.
    ///
    /// `false`: only the 4 cardinal directions are used.
    ///
    /// This has no effect on searches over a [`Plane`](crate::Plane), which are not bound to
    /// any neighborhood.
    pub include_diagonals: bool,
    /// How far (defaults to `1.0`) the via points of an [`Obstacle`](crate::Obstacle) are
    /// pushed away from its geometry.
    ///
    /// Larger values keep the resulting Paths further away from obstacles, at the risk of via
    /// points landing outside the workspace or inside other obstacles.
    pub propagation_magnitude: f64,
    /// `true`: a solid point obstacle lying exactly on a line of sight blocks it.
    ///
    /// `false` (default): point obstacles have no edges and never block visibility. They still
    /// contribute via points.
    pub point_obstacles_block: bool,
}

impl PlannerConfig {
    /// a PlannerConfig for agents restricted to the 4 cardinal directions
    ///
    /// Values:
    /// ```
    /// # use incremental_pathfinding::PlannerConfig;
    /// assert_eq!(
    ///     PlannerConfig {
    ///         include_diagonals: false,
    ///         propagation_magnitude: 1.0,
    ///         point_obstacles_block: false,
    ///     },
    ///     PlannerConfig::CARDINAL
    /// );
    /// ```
    pub const CARDINAL: PlannerConfig = PlannerConfig {
        include_diagonals: false,
        propagation_magnitude: 1.0,
        point_obstacles_block: false,
    };
    /// a PlannerConfig that keeps Plane Paths well clear of obstacles
    ///
    /// Values:
    /// ```
    /// # use incremental_pathfinding::PlannerConfig;
    /// assert_eq!(
    ///     PlannerConfig {
    ///         include_diagonals: true,
    ///         propagation_magnitude: 5.0,
    ///         point_obstacles_block: true,
    ///     },
    ///     PlannerConfig::WIDE_CLEARANCE
    /// );
    /// ```
    pub const WIDE_CLEARANCE: PlannerConfig = PlannerConfig {
        include_diagonals: true,
        propagation_magnitude: 5.0,
        point_obstacles_block: true,
    };

    /// Returns a copy of this config with a different
    /// [`propagation_magnitude`](PlannerConfig::propagation_magnitude).
    pub fn with_propagation_magnitude(self, propagation_magnitude: f64) -> PlannerConfig {
        PlannerConfig {
            propagation_magnitude,
            ..self
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> PlannerConfig {
        PlannerConfig {
            include_diagonals: true,
            propagation_magnitude: 1.0,
            point_obstacles_block: false,
        }
    }
}
