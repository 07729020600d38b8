use super::{grid_endpoints_free, reconstruct, Key, OpenList, SegmentSearch};
use crate::{
    neighbors::{GridNeighborhood, Neighborhood},
    Coordinate, CoordinateMap, CoordinateSet, Cost, Grid, Path, PlanResult, Position,
};
use log::trace;

fn euclid(a: Coordinate, b: Coordinate) -> Cost {
    Position::from(a).distance(Position::from(b))
}

/// Any-angle A* over the cells of a [`Grid`], also known as
/// [Theta*](https://en.wikipedia.org/wiki/Theta*).
///
/// Cells are expanded like in [`GridAStar`](super::GridAStar), but a cell may take the parent of
/// its predecessor as its own parent whenever the two can see each other (see
/// [`Grid::line_of_sight`]). The resulting Paths only contain the cells where they turn, and
/// every pair of consecutive cells is in line of sight.
///
/// Costs and the heuristic are Euclidean distances between cell centers.
///
/// ```
/// # use incremental_pathfinding::prelude::*;
/// let grid = Grid::new(10, 10).unwrap();
/// let path = ThetaStar::new(&grid).search((0, 0), (9, 4), true).unwrap().unwrap();
///
/// assert_eq!(path, vec![(0, 0), (9, 4)]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ThetaStar<'a> {
    grid: &'a Grid,
}

impl<'a> ThetaStar<'a> {
    /// Creates a new search over `grid`
    pub fn new(grid: &'a Grid) -> ThetaStar<'a> {
        ThetaStar { grid }
    }

    /// Searches a short any-angle Path from `start` to `end`.
    ///
    /// `include_diagonals` decides which cells are expanded, the straight shortcuts are taken
    /// either way.
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
        if start == end {
            return Ok(Some(Path::single(start)));
        }
        let grid = self.grid;
        let neighborhood = GridNeighborhood::new(grid.rows(), grid.cols(), include_diagonals);

        // cell -> (g, parent)
        let mut visited: CoordinateMap<(Cost, Coordinate)> = CoordinateMap::default();
        let mut closed = CoordinateSet::default();
        let mut next = OpenList::new();
        visited.insert(start, (0.0, start));
        next.push_or_update(start, Key(euclid(start, end), 0.0));

        let mut all_neighbors = vec![];
        while let Some((current, Key(_, current_cost))) = next.pop() {
            if current == end {
                break;
            }
            closed.insert(current);
            let (_, parent) = visited[&current];

            all_neighbors.clear();
            neighborhood.get_all_neighbors(current, &mut all_neighbors);
            for &other in all_neighbors.iter() {
                if closed.contains(&other) || grid.is_occupied(other) {
                    continue;
                }
                let (other_cost, other_parent) = if grid.line_of_sight(parent, other) {
                    (visited[&parent].0 + euclid(parent, other), parent)
                } else if grid.line_of_sight(current, other) {
                    (current_cost + euclid(current, other), current)
                } else {
                    // a diagonal step squeezing past a corner
                    continue;
                };

                let improves = visited
                    .get(&other)
                    .map_or(true, |&(prev_cost, _)| other_cost < prev_cost);
                if improves {
                    visited.insert(other, (other_cost, other_parent));
                    next.push_or_update(other, Key(other_cost + euclid(other, end), other_cost));
                }
            }
        }

        let Some(&(cost, _)) = visited.get(&end) else {
            trace!("Theta* found no path from {:?} to {:?}", start, end);
            return Ok(None);
        };
        trace!("Theta* expanded {} cells", closed.len());
        let steps = reconstruct(start, end, |current| visited[&current].1);
        Ok(Some(Path::new(steps, cost)))
    }
}

impl SegmentSearch for ThetaStar<'_> {
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
        "Theta*"
    }
}
