//! The bounded areas Paths are planned through.
//!
//! A [`Grid`] is discrete: obstacles occupy whole cells. A [`Plane`] is continuous: it holds
//! [`Obstacle`](crate::Obstacle)s and the via points derived from them.

mod grid;
pub use self::grid::{Grid, OccupantID};

mod plane;
pub use self::plane::{ObstacleID, Plane};

use crate::{Coordinate, PlanError, PlanResult, PlannerConfig, Position};

/// The fixed `rows` x `cols` extent of a workspace.
///
/// On a Grid, valid Coordinates are `0..rows` x `0..cols`. On a Plane, valid Positions are
/// `0.0..=rows` x `0.0..=cols`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    rows: usize,
    cols: usize,
}

impl Bounds {
    /// Creates new Bounds.
    ///
    /// ## Errors
    /// [`PlanError::InvalidBounds`] if either dimension is 0.
    pub fn new(rows: usize, cols: usize) -> PlanResult<Bounds> {
        if rows == 0 || cols == 0 {
            return Err(PlanError::InvalidBounds { rows, cols });
        }
        Ok(Bounds { rows, cols })
    }

    /// the number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// the number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// the number of cells of a Grid with these Bounds
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    /// `true` if the Coordinate is a cell of a Grid with these Bounds
    pub fn contains_coordinate(&self, (x, y): Coordinate) -> bool {
        x < self.rows && y < self.cols
    }

    /// `true` if the Position lies on a Plane with these Bounds. The border is included.
    pub fn contains_position(&self, p: Position) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.rows as f64 && p.y <= self.cols as f64
    }

    /// Returns an error if the Coordinate is outside of these Bounds
    pub fn check_coordinate(&self, c: Coordinate) -> PlanResult<()> {
        if self.contains_coordinate(c) {
            Ok(())
        } else {
            Err(PlanError::out_of_bounds(
                c.0 as f64, c.1 as f64, self.rows, self.cols,
            ))
        }
    }

    /// Returns an error if the Position is outside of these Bounds
    pub fn check_position(&self, p: Position) -> PlanResult<()> {
        if self.contains_position(p) {
            Ok(())
        } else {
            Err(PlanError::out_of_bounds(p.x, p.y, self.rows, self.cols))
        }
    }

    /// the dense index of a Coordinate inside these Bounds
    pub(crate) fn index(&self, (x, y): Coordinate) -> usize {
        x * self.cols + y
    }
}

/// Either kind of workspace, for code that picks a planner at runtime.
#[derive(Clone, Debug)]
pub enum Workspace {
    /// a discrete occupancy Grid
    Grid(Grid),
    /// a continuous Plane with Obstacles
    Plane(Plane),
}

impl Workspace {
    /// Creates an empty Grid workspace.
    ///
    /// ## Errors
    /// [`PlanError::InvalidBounds`] if either dimension is 0.
    pub fn grid(rows: usize, cols: usize) -> PlanResult<Workspace> {
        Grid::new(rows, cols).map(Workspace::Grid)
    }

    /// Creates an empty Plane workspace with the given config.
    ///
    /// ## Errors
    /// [`PlanError::InvalidBounds`] if either dimension is 0.
    pub fn plane(rows: usize, cols: usize, config: PlannerConfig) -> PlanResult<Workspace> {
        Plane::with_config(rows, cols, config).map(Workspace::Plane)
    }

    /// the Bounds of the workspace
    pub fn bounds(&self) -> Bounds {
        match self {
            Workspace::Grid(grid) => grid.bounds(),
            Workspace::Plane(plane) => plane.bounds(),
        }
    }

    /// `"grid"` or `"plane"`
    pub fn kind(&self) -> &'static str {
        match self {
            Workspace::Grid(_) => "grid",
            Workspace::Plane(_) => "plane",
        }
    }

    /// the Grid, if this is one
    pub fn as_grid(&self) -> Option<&Grid> {
        match self {
            Workspace::Grid(grid) => Some(grid),
            Workspace::Plane(_) => None,
        }
    }

    /// the Grid, if this is one
    pub fn as_grid_mut(&mut self) -> Option<&mut Grid> {
        match self {
            Workspace::Grid(grid) => Some(grid),
            Workspace::Plane(_) => None,
        }
    }

    /// the Plane, if this is one
    pub fn as_plane(&self) -> Option<&Plane> {
        match self {
            Workspace::Plane(plane) => Some(plane),
            Workspace::Grid(_) => None,
        }
    }

    /// the Plane, if this is one
    pub fn as_plane_mut(&mut self) -> Option<&mut Plane> {
        match self {
            Workspace::Plane(plane) => Some(plane),
            Workspace::Grid(_) => None,
        }
    }
}
