//! The searches that produce [`Path`]s.
//!
//! Every search implements [`SegmentSearch`], so that the [stitcher](crate::stitcher) can chain
//! any of them across a list of waypoints.

mod open_list;
pub use self::open_list::{Key, OpenList, KEY_TOLERANCE};

mod a_star;
pub use self::a_star::{a_star_search, GridAStar};

mod theta_star;
pub use self::theta_star::ThetaStar;

mod any_angle;
pub use self::any_angle::AnyAngleSearch;

mod d_star_lite;
pub use self::d_star_lite::{DStarLite, DStarLiteSearch};

use crate::{Coordinate, Grid, Path, PlanResult};
use log::debug;

/// A search that connects two points of a workspace.
///
/// Finding no route is not an error: the search returns `Ok(None)`. Errors are reserved for
/// malformed queries, like endpoints outside of the workspace.
pub trait SegmentSearch {
    /// the kind of point the search works with
    type Point: Copy + PartialEq + std::fmt::Debug;

    /// Searches a Path from `start` to `end`.
    ///
    /// `include_diagonals` selects 8-connected movement on a Grid. Searches on a Plane ignore it.
    fn search_segment(
        &self,
        start: Self::Point,
        end: Self::Point,
        include_diagonals: bool,
    ) -> PlanResult<Option<Path<Self::Point>>>;

    /// a short name for log messages
    fn name(&self) -> &'static str;
}

/// Checks that both endpoints lie on the Grid. Returns `false` if either of them is occupied.
pub(crate) fn grid_endpoints_free(
    grid: &Grid,
    start: Coordinate,
    end: Coordinate,
) -> PlanResult<bool> {
    grid.bounds().check_coordinate(start)?;
    grid.bounds().check_coordinate(end)?;
    if grid.is_occupied(start) {
        debug!("start {:?} is occupied", start);
        return Ok(false);
    }
    if grid.is_occupied(end) {
        debug!("goal {:?} is occupied", end);
        return Ok(false);
    }
    Ok(true)
}

/// Walks the predecessor links from `goal` back to `start` and returns the points in travel
/// order.
pub(crate) fn reconstruct<K: Copy + PartialEq>(
    start: K,
    goal: K,
    mut predecessor: impl FnMut(K) -> K,
) -> Vec<K> {
    let mut steps = vec![];
    let mut current = goal;
    while current != start {
        steps.push(current);
        current = predecessor(current);
    }
    steps.push(start);
    steps.reverse();
    steps
}
