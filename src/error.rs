//! Error types for workspace construction and planning.
//!
//! Failing to find a route is not an error: searches return `Ok(None)` for that case, so the
//! caller can decide whether to retry, replan or give up.

use thiserror::Error;

/// Errors raised eagerly when a workspace, obstacle or query is malformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// A workspace was created with zero rows or columns.
    #[error("workspace bounds must be positive, got {rows}x{cols}")]
    InvalidBounds {
        /// the requested number of rows
        rows: usize,
        /// the requested number of columns
        cols: usize,
    },

    /// A point lies outside the workspace.
    #[error("({x}, {y}) lies outside the {rows}x{cols} workspace")]
    OutOfBounds {
        /// first component of the offending point
        x: f64,
        /// second component of the offending point
        y: f64,
        /// rows of the workspace
        rows: usize,
        /// columns of the workspace
        cols: usize,
    },

    /// An obstacle has fewer vertices than its kind requires.
    #[error("{kind} obstacle needs at least {required} vertices, got {actual}")]
    InvalidGeometry {
        /// the kind of obstacle that was being built
        kind: &'static str,
        /// the minimum number of vertices
        required: usize,
        /// the number of vertices given
        actual: usize,
    },

    /// A segment obstacle whose endpoints coincide.
    #[error("segment obstacle has zero length at ({x}, {y})")]
    DegenerateSegment {
        /// first component of the repeated endpoint
        x: f64,
        /// second component of the repeated endpoint
        y: f64,
    },

    /// The replanner was initialized for a workspace with different bounds.
    #[error("replanner was initialized for a {expected_rows}x{expected_cols} grid, got {rows}x{cols}")]
    StaleReplannerState {
        /// rows of the grid the replanner was created for
        expected_rows: usize,
        /// columns of the grid the replanner was created for
        expected_cols: usize,
        /// rows of the grid that was passed in
        rows: usize,
        /// columns of the grid that was passed in
        cols: usize,
    },

    /// A route was requested without any waypoints.
    #[error("at least one waypoint is required")]
    EmptyWaypoints,

    /// A planner was asked to run on the wrong kind of workspace.
    #[error("{planner} planner cannot run on a {workspace} workspace")]
    WorkspaceMismatch {
        /// name of the planner
        planner: &'static str,
        /// `"grid"` or `"plane"`
        workspace: &'static str,
    },

    /// A planner name that does not match any [`PlannerKind`](crate::PlannerKind).
    #[error("unknown planner: {name}")]
    UnknownPlanner {
        /// the name as it was given
        name: String,
    },
}

/// Result type alias for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

impl PlanError {
    pub(crate) fn out_of_bounds(x: f64, y: f64, rows: usize, cols: usize) -> PlanError {
        PlanError::OutOfBounds { x, y, rows, cols }
    }
}
