use super::{grid_endpoints_free, reconstruct, Key, OpenList, SegmentSearch};
use crate::{
    neighbors::{GridNeighborhood, Neighborhood},
    Coordinate, CoordinateMap, CoordinateSet, Grid, Path, PlanResult,
};
use log::trace;

/// Searches a Grid using the [A* Algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm).
///
/// `walkable` decides which cells may be entered. Among entries with the same `f = g + h`, the
/// one with the lower `g` is expanded first.
///
/// ## Returns
/// the Path, if one was found, or None if the `goal` is unreachable.
/// The first Coordinate in the Path is always `start` and the last is `goal`.
///
/// ## Examples
/// ```
/// # use incremental_pathfinding::prelude::*;
/// # use incremental_pathfinding::search::a_star_search;
/// // 0 = empty, 1 = wall
/// let grid = [
///     [0, 1, 0],
///     [0, 1, 0],
///     [0, 0, 0],
/// ];
/// let neighborhood = ManhattanNeighborhood::new(3, 3);
///
/// let path = a_star_search(&neighborhood, |(x, y)| grid[x][y] == 0, (0, 0), (0, 2), 9).unwrap();
///
/// assert_eq!(path, vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2)]);
/// assert_eq!(path.cost(), 6.0);
/// ```
pub fn a_star_search<N: Neighborhood>(
    neighborhood: &N,
    mut walkable: impl FnMut(Coordinate) -> bool,
    start: Coordinate,
    goal: Coordinate,
    size_hint: usize,
) -> Option<Path<Coordinate>> {
    if !walkable(start) || !walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(Path::single(start));
    }
    let mut visited = CoordinateMap::with_capacity(size_hint);
    let mut closed = CoordinateSet::with_capacity(size_hint);
    let mut next = OpenList::with_capacity(size_hint / 2);
    next.push_or_update(start, Key(neighborhood.heuristic(start, goal), 0.0));
    visited.insert(start, (0.0, start));

    let mut all_neighbors = vec![];

    while let Some((current_id, Key(_, current_cost))) = next.pop() {
        if current_id == goal {
            break;
        }
        closed.insert(current_id);

        all_neighbors.clear();
        neighborhood.get_all_neighbors(current_id, &mut all_neighbors);
        for &other_id in all_neighbors.iter() {
            if closed.contains(&other_id) || !walkable(other_id) {
                continue;
            }
            let other_cost = current_cost + neighborhood.cost(current_id, other_id);

            let mut needs_visit = true;
            if let Some((prev_cost, prev_id)) = visited.get_mut(&other_id) {
                if *prev_cost > other_cost {
                    *prev_cost = other_cost;
                    *prev_id = current_id;
                } else {
                    needs_visit = false;
                }
            } else {
                visited.insert(other_id, (other_cost, current_id));
            }

            if needs_visit {
                let heuristic = neighborhood.heuristic(other_id, goal);
                next.push_or_update(other_id, Key(other_cost + heuristic, other_cost));
            }
        }
    }

    let &(cost, _) = visited.get(&goal)?;
    trace!(
        "A* expanded {} cells between {:?} and {:?}",
        closed.len(),
        start,
        goal
    );
    let steps = reconstruct(start, goal, |current| visited[&current].1);
    Some(Path::new(steps, cost))
}

/// Classic A* over the cells of a [`Grid`].
///
/// Moves between neighboring free cells, 4- or 8-connected. Cardinal steps cost `1`, diagonal
/// steps `√2`.
#[derive(Clone, Copy, Debug)]
pub struct GridAStar<'a> {
    grid: &'a Grid,
}

impl<'a> GridAStar<'a> {
    /// Creates a new search over `grid`
    pub fn new(grid: &'a Grid) -> GridAStar<'a> {
        GridAStar { grid }
    }

    /// Searches the shortest Path from `start` to `end`.
    ///
    /// Returns `Ok(None)` if either endpoint is occupied or no route exists.
    ///
    /// ## Errors
    /// [`PlanError::OutOfBounds`](crate::PlanError::OutOfBounds) if either endpoint is not part
    /// of the Grid.
    pub fn search(
        &self,
        start: Coordinate,
        end: Coordinate,
        include_diagonals: bool,
    ) -> PlanResult<Option<Path<Coordinate>>> {
        if !grid_endpoints_free(self.grid, start, end)? {
            return Ok(None);
        }
        let neighborhood =
            GridNeighborhood::new(self.grid.rows(), self.grid.cols(), include_diagonals);
        Ok(a_star_search(
            &neighborhood,
            |cell| !self.grid.is_occupied(cell),
            start,
            end,
            self.grid.bounds().area(),
        ))
    }
}

impl SegmentSearch for GridAStar<'_> {
    type Point = Coordinate;

    fn search_segment(
        &self,
        start: Coordinate,
        end: Coordinate,
        include_diagonals: bool,
    ) -> PlanResult<Option<Path<Coordinate>>> {
        self.search(start, end, include_diagonals)
    }

    fn name(&self) -> &'static str {
        "A*"
    }
}
