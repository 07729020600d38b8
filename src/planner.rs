use crate::{
    search::{AnyAngleSearch, DStarLiteSearch, GridAStar, SegmentSearch, ThetaStar},
    stitcher, Coordinate, Path, PlanError, PlanResult, PlannerConfig, Position, Workspace,
};
use std::fmt;
use std::str::FromStr;

/// The searches that can be picked at runtime, e.g. from a name in a config file.
///
/// ```
/// # use incremental_pathfinding::prelude::*;
/// let workspace = Workspace::grid(4, 4).unwrap();
/// let kind: PlannerKind = "theta*".parse().unwrap();
///
/// let planner = kind.build(&workspace).unwrap();
/// let path = planner.as_grid().unwrap().search_segment((0, 0), (3, 3), true).unwrap();
/// assert_eq!(path.unwrap().len(), 2);
///
/// assert!(PlannerKind::LineOfSight.build(&workspace).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlannerKind {
    /// [`GridAStar`] on a Grid
    AStar,
    /// [`ThetaStar`] on a Grid
    ThetaStar,
    /// [`DStarLiteSearch`] on a Grid
    DStarLite,
    /// [`AnyAngleSearch`] on a Plane
    LineOfSight,
}

impl PlannerKind {
    /// All kinds, in declaration order
    pub const ALL: [PlannerKind; 4] = [
        PlannerKind::AStar,
        PlannerKind::ThetaStar,
        PlannerKind::DStarLite,
        PlannerKind::LineOfSight,
    ];

    /// the canonical name of the kind
    pub fn name(self) -> &'static str {
        match self {
            PlannerKind::AStar => "a*",
            PlannerKind::ThetaStar => "theta*",
            PlannerKind::DStarLite => "d*-lite",
            PlannerKind::LineOfSight => "line-of-sight",
        }
    }

    /// the kind of workspace the search runs on
    pub fn workspace_kind(self) -> &'static str {
        match self {
            PlannerKind::LineOfSight => "plane",
            _ => "grid",
        }
    }

    /// Creates the search over `workspace`.
    ///
    /// ## Errors
    /// [`PlanError::WorkspaceMismatch`] if the search cannot run on this kind of workspace.
    pub fn build(self, workspace: &Workspace) -> PlanResult<Planner<'_>> {
        let planner = match (self, workspace) {
            (PlannerKind::AStar, Workspace::Grid(grid)) => {
                Planner::Grid(Box::new(GridAStar::new(grid)))
            }
            (PlannerKind::ThetaStar, Workspace::Grid(grid)) => {
                Planner::Grid(Box::new(ThetaStar::new(grid)))
            }
            (PlannerKind::DStarLite, Workspace::Grid(grid)) => {
                Planner::Grid(Box::new(DStarLiteSearch::new(grid)))
            }
            (PlannerKind::LineOfSight, Workspace::Plane(plane)) => {
                Planner::Plane(Box::new(AnyAngleSearch::new(plane)))
            }
            _ => {
                return Err(PlanError::WorkspaceMismatch {
                    planner: self.name(),
                    workspace: workspace.kind(),
                })
            }
        };
        Ok(planner)
    }
}

impl fmt::Display for PlannerKind {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

impl FromStr for PlannerKind {
    type Err = PlanError;

    fn from_str(s: &str) -> PlanResult<PlannerKind> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "a*" | "astar" | "a-star" => Ok(PlannerKind::AStar),
            "theta*" | "thetastar" | "theta-star" => Ok(PlannerKind::ThetaStar),
            "d*-lite" | "dstarlite" | "d-star-lite" | "d*lite" => Ok(PlannerKind::DStarLite),
            "line-of-sight" | "lineofsight" | "los" | "any-angle" => Ok(PlannerKind::LineOfSight),
            _ => Err(PlanError::UnknownPlanner { name: s.to_string() }),
        }
    }
}

/// A search picked through [`PlannerKind::build`].
pub enum Planner<'a> {
    /// a search over a Grid
    Grid(Box<dyn SegmentSearch<Point = Coordinate> + Sync + 'a>),
    /// a search over a Plane
    Plane(Box<dyn SegmentSearch<Point = Position> + Sync + 'a>),
}

impl fmt::Debug for Planner<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_tuple("Planner").field(&self.name()).finish()
    }
}

impl<'a> Planner<'a> {
    /// the search, if it runs on a Grid
    pub fn as_grid(&self) -> Option<&(dyn SegmentSearch<Point = Coordinate> + Sync + 'a)> {
        match self {
            Planner::Grid(search) => Some(search.as_ref()),
            Planner::Plane(_) => None,
        }
    }

    /// the search, if it runs on a Plane
    pub fn as_plane(&self) -> Option<&(dyn SegmentSearch<Point = Position> + Sync + 'a)> {
        match self {
            Planner::Plane(search) => Some(search.as_ref()),
            Planner::Grid(_) => None,
        }
    }

    /// the name of the underlying search
    pub fn name(&self) -> &'static str {
        match self {
            Planner::Grid(search) => search.name(),
            Planner::Plane(search) => search.name(),
        }
    }

    /// Runs [`generate_path`](stitcher::generate_path) over Grid waypoints.
    ///
    /// ## Errors
    /// [`PlanError::WorkspaceMismatch`] if this search runs on a Plane, and everything
    /// [`generate_path`](stitcher::generate_path) returns.
    pub fn route_grid(
        &self,
        waypoints: &[Coordinate],
        include_diagonals: bool,
    ) -> PlanResult<Option<Path<Coordinate>>> {
        match self {
            Planner::Grid(search) => {
                stitcher::generate_path(search.as_ref(), waypoints, include_diagonals)
            }
            Planner::Plane(search) => Err(PlanError::WorkspaceMismatch {
                planner: search.name(),
                workspace: "grid",
            }),
        }
    }

    /// Like [`route_grid`](Planner::route_grid), with the connectivity taken from
    /// [`config.include_diagonals`](PlannerConfig::include_diagonals).
    pub fn route_grid_with_config(
        &self,
        waypoints: &[Coordinate],
        config: &PlannerConfig,
    ) -> PlanResult<Option<Path<Coordinate>>> {
        self.route_grid(waypoints, config.include_diagonals)
    }

    /// Runs [`generate_path`](stitcher::generate_path) over Plane waypoints.
    ///
    /// ## Errors
    /// [`PlanError::WorkspaceMismatch`] if this search runs on a Grid, and everything
    /// [`generate_path`](stitcher::generate_path) returns.
    pub fn route_plane(&self, waypoints: &[Position]) -> PlanResult<Option<Path<Position>>> {
        match self {
            Planner::Plane(search) => stitcher::generate_path(search.as_ref(), waypoints, false),
            Planner::Grid(search) => Err(PlanError::WorkspaceMismatch {
                planner: search.name(),
                workspace: "plane",
            }),
        }
    }
}
