//! Multi-stop routes built from one search per pair of consecutive waypoints.

use crate::{search::SegmentSearch, Path, PlanError, PlanResult};
use log::{debug, trace};

/// Searches a Path that visits every waypoint in order.
///
/// `search` runs once for each consecutive pair of waypoints and the segments are joined into a
/// single Path. The waypoint where two segments meet appears only once. A single waypoint
/// results in a Path of just that point.
///
/// Returns `Ok(None)` as soon as any segment has no route.
///
/// ## Errors
/// - [`PlanError::EmptyWaypoints`] if `waypoints` is empty.
/// - Any error of the segment search, e.g. a waypoint outside of the workspace.
///
/// ## Examples
/// ```
/// # use incremental_pathfinding::prelude::*;
/// let grid = Grid::new(5, 5).unwrap();
/// let waypoints = [(0, 0), (0, 4), (4, 4)];
///
/// let path = generate_path(&GridAStar::new(&grid), &waypoints, false)
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(path.len(), 9);
/// assert_eq!(path.cost(), 8.0);
/// assert_eq!(path[4], (0, 4));
/// ```
pub fn generate_path<S: SegmentSearch + ?Sized>(
    search: &S,
    waypoints: &[S::Point],
    include_diagonals: bool,
) -> PlanResult<Option<Path<S::Point>>> {
    let (&first, rest) = waypoints.split_first().ok_or(PlanError::EmptyWaypoints)?;
    if rest.is_empty() {
        return Ok(Some(Path::single(first)));
    }

    let mut segments = Vec::with_capacity(rest.len());
    for pair in waypoints.windows(2) {
        match search.search_segment(pair[0], pair[1], include_diagonals)? {
            Some(segment) => segments.push(segment),
            None => {
                debug!(
                    "{} found no route from {:?} to {:?}",
                    search.name(),
                    pair[0],
                    pair[1]
                );
                return Ok(None);
            }
        }
    }
    Ok(Some(stitch(segments, search.name())))
}

/// Like [`generate_path`], but searches all segments in parallel on the rayon thread pool.
///
/// The result is the same as that of [`generate_path`], apart from which segment error is
/// reported if several segments fail.
#[cfg(feature = "parallel")]
pub fn generate_path_parallel<S>(
    search: &S,
    waypoints: &[S::Point],
    include_diagonals: bool,
) -> PlanResult<Option<Path<S::Point>>>
where
    S: SegmentSearch + Sync + ?Sized,
    S::Point: Send + Sync,
{
    use rayon::prelude::*;

    let (&first, rest) = waypoints.split_first().ok_or(PlanError::EmptyWaypoints)?;
    if rest.is_empty() {
        return Ok(Some(Path::single(first)));
    }

    let segments: Vec<Option<Path<S::Point>>> = waypoints
        .par_windows(2)
        .map(|pair| search.search_segment(pair[0], pair[1], include_diagonals))
        .collect::<PlanResult<_>>()?;

    match segments.into_iter().collect::<Option<Vec<_>>>() {
        Some(segments) => Ok(Some(stitch(segments, search.name()))),
        None => {
            debug!("{} found no route for at least one segment", search.name());
            Ok(None)
        }
    }
}

fn stitch<P: Copy>(segments: Vec<Path<P>>, name: &str) -> Path<P> {
    let mut points = Vec::with_capacity(segments.iter().map(Path::len).sum());
    let mut cost = 0.0;
    for (i, segment) in segments.iter().enumerate() {
        // every segment starts where the previous one ended
        let skip = if i == 0 { 0 } else { 1 };
        points.extend(segment.iter().skip(skip).copied());
        cost += segment.cost();
    }
    trace!(
        "{} stitched {} segments into {} points",
        name,
        segments.len(),
        points.len()
    );
    Path::new(points, cost)
}
