use super::{Key, OpenList, SegmentSearch};
use crate::{
    neighbors::{GridNeighborhood, Neighborhood},
    workspace::Bounds,
    Coordinate, CoordinateSet, Cost, Grid, Path, PlanError, PlanResult,
};
use log::{debug, trace};

/// An incremental replanner using [D*-Lite](http://idm-lab.org/bib/abstracts/papers/aaai02b.pdf).
///
/// The replanner searches backwards from the goal and keeps its search state alive between
/// calls. When the agent moves or cells of the Grid change, [`replan`](DStarLite::replan)
/// repairs only the part of that state affected by the change instead of starting over.
///
/// Every cell has two estimates of its distance to the goal: `g`, the value settled by the last
/// search, and `rhs`, the one-step lookahead `min(c(s, s') + g(s'))` over its neighbors. A cell is
/// queued exactly when the two disagree. After a search, every cell that is not queued has
/// `g == rhs`.
///
/// The replanner does not own the Grid. It reads occupancy from the Grid passed to each call, so
/// the caller has to report every cell it changed in between.
///
/// ## Examples
/// ```
/// # use incremental_pathfinding::prelude::*;
/// let mut grid = Grid::new(5, 5).unwrap();
/// let mut planner = DStarLite::new(&grid, (0, 2), (4, 2), false).unwrap();
/// let path = planner.plan(&grid).unwrap().unwrap();
/// assert_eq!(path.len(), 5);
///
/// // wall off the straight line
/// grid.add_obstacle((2, 2)).unwrap();
/// let path = planner.replan(&grid, (1, 2), &[(2, 2)]).unwrap().unwrap();
/// assert_eq!(path.cost(), 5.0);
/// assert_eq!(planner.g((2, 2)), f64::INFINITY);
/// ```
#[derive(Clone, Debug)]
pub struct DStarLite {
    bounds: Bounds,
    neighborhood: GridNeighborhood,
    start: Coordinate,
    goal: Coordinate,
    km: Cost,
    g: Vec<Cost>,
    rhs: Vec<Cost>,
    open: OpenList<Coordinate>,
}

impl DStarLite {
    /// Creates a replanner for a route from `start` to `goal` over `grid` and initializes its
    /// search state. No search is run yet.
    ///
    /// ## Errors
    /// [`PlanError::OutOfBounds`] if either endpoint is not part of the Grid.
    pub fn new(
        grid: &Grid,
        start: Coordinate,
        goal: Coordinate,
        include_diagonals: bool,
    ) -> PlanResult<DStarLite> {
        let bounds = grid.bounds();
        bounds.check_coordinate(start)?;
        bounds.check_coordinate(goal)?;

        let mut planner = DStarLite {
            bounds,
            neighborhood: GridNeighborhood::new(bounds.rows(), bounds.cols(), include_diagonals),
            start,
            goal,
            km: 0.0,
            g: vec![],
            rhs: vec![],
            open: OpenList::new(),
        };
        planner.initialize();
        Ok(planner)
    }

    /// Discards all search state: every `g` and `rhs` is set to infinity, except for
    /// `rhs(goal) = 0`, and only the goal is queued.
    pub fn initialize(&mut self) {
        let area = self.bounds.area();
        self.km = 0.0;
        self.g = vec![Cost::INFINITY; area];
        self.rhs = vec![Cost::INFINITY; area];
        self.rhs[self.bounds.index(self.goal)] = 0.0;
        self.open.clear();
        let key = self.calculate_key(self.goal);
        self.open.push_or_update(self.goal, key);
    }

    /// the current position of the agent
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// the goal of the route
    pub fn goal(&self) -> Coordinate {
        self.goal
    }

    /// the accumulated heuristic offset from all moves of the agent
    pub fn km(&self) -> Cost {
        self.km
    }

    /// the settled distance estimate of `cell`. Infinite for cells outside of the Grid.
    pub fn g(&self, cell: Coordinate) -> Cost {
        if self.bounds.contains_coordinate(cell) {
            self.g[self.bounds.index(cell)]
        } else {
            Cost::INFINITY
        }
    }

    /// the lookahead distance estimate of `cell`. Infinite for cells outside of the Grid.
    pub fn rhs(&self, cell: Coordinate) -> Cost {
        if self.bounds.contains_coordinate(cell) {
            self.rhs[self.bounds.index(cell)]
        } else {
            Cost::INFINITY
        }
    }

    /// `true` if `cell` is waiting in the priority queue
    pub fn is_queued(&self, cell: Coordinate) -> bool {
        self.open.contains(cell)
    }

    /// the number of queued cells
    pub fn queue_len(&self) -> usize {
        self.open.len()
    }

    /// Runs the search until the route from the current start is settled, and extracts it.
    ///
    /// Calling this again without any changes does no additional work.
    ///
    /// ## Errors
    /// [`PlanError::StaleReplannerState`] if `grid` does not have the bounds this replanner was
    /// created for.
    pub fn plan(&mut self, grid: &Grid) -> PlanResult<Option<Path<Coordinate>>> {
        self.check_grid(grid)?;
        self.compute_shortest_path(grid)?;
        Ok(self.extract_path(grid))
    }

    /// Moves the agent to `new_start`, repairs the search state around the `changed` cells and
    /// returns the new route.
    ///
    /// `changed` lists every cell whose occupancy changed since the last call. The cells and
    /// their neighbors lose their estimates and are reevaluated, together with every cell whose
    /// lookahead depends on them.
    ///
    /// ## Errors
    /// - [`PlanError::StaleReplannerState`] if `grid` does not have the bounds this replanner was
    ///   created for.
    /// - [`PlanError::OutOfBounds`] if `new_start` or any changed cell is not part of the Grid.
    pub fn replan(
        &mut self,
        grid: &Grid,
        new_start: Coordinate,
        changed: &[Coordinate],
    ) -> PlanResult<Option<Path<Coordinate>>> {
        self.check_grid(grid)?;
        self.bounds.check_coordinate(new_start)?;
        for &cell in changed {
            self.bounds.check_coordinate(cell)?;
        }

        self.km += self.neighborhood.heuristic(self.start, new_start);
        self.start = new_start;

        let mut affected = CoordinateSet::default();
        for &cell in changed {
            affected.insert(cell);
            affected.extend(self.neighbors(cell));
        }
        for &cell in affected.iter() {
            let i = self.bounds.index(cell);
            self.g[i] = Cost::INFINITY;
            if cell != self.goal {
                self.rhs[i] = Cost::INFINITY;
            }
        }

        let mut to_update = affected.clone();
        for &cell in affected.iter() {
            to_update.extend(self.neighbors(cell));
        }
        // sorted, so that the state after replanning does not depend on hashing
        let mut to_update: Vec<Coordinate> = to_update.into_iter().collect();
        to_update.sort_unstable();
        for cell in to_update {
            self.update_cell(grid, cell);
        }
        trace!(
            "replanning from {:?}: {} cells changed, {} reset",
            new_start,
            changed.len(),
            affected.len()
        );

        self.compute_shortest_path(grid)?;
        Ok(self.extract_path(grid))
    }

    /// Recomputes `rhs(cell)` from the neighbors of `cell` and queues it if it is inconsistent.
    ///
    /// The goal always keeps `rhs = 0`, occupied cells get an infinite `rhs`.
    ///
    /// ## Errors
    /// - [`PlanError::StaleReplannerState`] if `grid` does not have the bounds this replanner was
    ///   created for.
    /// - [`PlanError::OutOfBounds`] if `cell` is not part of the Grid. The search state is left
    ///   untouched in both cases.
    pub fn update_vertex(&mut self, grid: &Grid, cell: Coordinate) -> PlanResult<()> {
        self.check_grid(grid)?;
        self.bounds.check_coordinate(cell)?;
        self.update_cell(grid, cell);
        Ok(())
    }

    fn update_cell(&mut self, grid: &Grid, cell: Coordinate) {
        let i = self.bounds.index(cell);
        if cell != self.goal {
            self.rhs[i] = if grid.is_occupied(cell) {
                Cost::INFINITY
            } else {
                self.neighbors(cell)
                    .into_iter()
                    .map(|other| self.edge_cost(grid, cell, other) + self.g[self.bounds.index(other)])
                    .fold(Cost::INFINITY, Cost::min)
            };
        }
        self.open.remove(cell);
        if self.g[i] != self.rhs[i] {
            let key = self.calculate_key(cell);
            self.open.push_or_update(cell, key);
        }
    }

    /// Expands queued cells until the start is consistent and no queued cell could still
    /// improve it.
    ///
    /// ## Errors
    /// [`PlanError::StaleReplannerState`] if `grid` does not have the bounds this replanner was
    /// created for.
    pub fn compute_shortest_path(&mut self, grid: &Grid) -> PlanResult<()> {
        self.check_grid(grid)?;
        let start = self.bounds.index(self.start);
        let mut expanded = 0;

        while let Some((cell, old_key)) = self.open.peek() {
            // keys within rounding noise of the start's key still get expanded
            if !old_key.precedes(self.calculate_key(self.start))
                && self.g[start] == self.rhs[start]
            {
                break;
            }
            expanded += 1;
            let i = self.bounds.index(cell);
            let new_key = self.calculate_key(cell);

            if old_key.precedes(new_key) {
                self.open.push_or_update(cell, new_key);
            } else if self.g[i] > self.rhs[i] {
                self.g[i] = self.rhs[i];
                self.open.remove(cell);
                for other in self.neighbors(cell) {
                    self.update_cell(grid, other);
                }
            } else {
                self.g[i] = Cost::INFINITY;
                for other in self.neighbors(cell) {
                    self.update_cell(grid, other);
                }
                self.update_cell(grid, cell);
            }
        }
        trace!(
            "D*-Lite expanded {} cells, {} still queued",
            expanded,
            self.open.len()
        );
        Ok(())
    }

    fn extract_path(&self, grid: &Grid) -> Option<Path<Coordinate>> {
        if grid.is_occupied(self.start) || grid.is_occupied(self.goal) {
            debug!("start {:?} or goal {:?} is occupied", self.start, self.goal);
            return None;
        }
        if self.g(self.start).is_infinite() {
            debug!("goal {:?} is unreachable from {:?}", self.goal, self.start);
            return None;
        }

        let mut steps = vec![self.start];
        let mut cost = 0.0;
        let mut current = self.start;
        while current != self.goal {
            if steps.len() > self.bounds.area() {
                debug!("path extraction from {:?} does not terminate", self.start);
                return None;
            }
            let mut best: Option<(Cost, Cost, Coordinate)> = None;
            for other in self.neighbors(current) {
                let step = self.edge_cost(grid, current, other);
                if step.is_infinite() {
                    continue;
                }
                let g = self.g(other);
                let candidate = (step + g, g, other);
                if best.map_or(true, |(total, best_g, _)| {
                    candidate.0 < total || (candidate.0 == total && g < best_g)
                }) {
                    best = Some(candidate);
                }
            }
            match best {
                Some((total, _, next)) if total.is_finite() => {
                    cost += self.edge_cost(grid, current, next);
                    steps.push(next);
                    current = next;
                }
                _ => {
                    debug!("no finite step out of {:?}", current);
                    return None;
                }
            }
        }
        Some(Path::new(steps, cost))
    }

    fn calculate_key(&self, cell: Coordinate) -> Key {
        let i = self.bounds.index(cell);
        let min = self.g[i].min(self.rhs[i]);
        Key(
            min + self.neighborhood.heuristic(self.start, cell) + self.km,
            min,
        )
    }

    fn edge_cost(&self, grid: &Grid, a: Coordinate, b: Coordinate) -> Cost {
        if grid.is_occupied(a) || grid.is_occupied(b) {
            Cost::INFINITY
        } else {
            self.neighborhood.cost(a, b)
        }
    }

    fn neighbors(&self, cell: Coordinate) -> Vec<Coordinate> {
        let mut ret = Vec::with_capacity(8);
        self.neighborhood.get_all_neighbors(cell, &mut ret);
        ret
    }

    fn check_grid(&self, grid: &Grid) -> PlanResult<()> {
        if grid.bounds() == self.bounds {
            return Ok(());
        }
        debug!(
            "replanner built for {}x{} used on a {}x{} grid",
            self.bounds.rows(),
            self.bounds.cols(),
            grid.rows(),
            grid.cols()
        );
        Err(PlanError::StaleReplannerState {
            expected_rows: self.bounds.rows(),
            expected_cols: self.bounds.cols(),
            rows: grid.rows(),
            cols: grid.cols(),
        })
    }
}

/// Runs a fresh [`DStarLite`] for every segment.
///
/// Useful to compare it against the other searches, or to get its tie-breaking when no
/// replanning is needed.
#[derive(Clone, Copy, Debug)]
pub struct DStarLiteSearch<'a> {
    grid: &'a Grid,
}

impl<'a> DStarLiteSearch<'a> {
    /// Creates a new search over `grid`
    pub fn new(grid: &'a Grid) -> DStarLiteSearch<'a> {
        DStarLiteSearch { grid }
    }
}

impl SegmentSearch for DStarLiteSearch<'_> {
    type Point = Coordinate;

    fn search_segment(
        &self,
        start: Coordinate,
        end: Coordinate,
        include_diagonals: bool,
    ) -> PlanResult<Option<Path<Coordinate>>> {
        DStarLite::new(self.grid, start, end, include_diagonals)?.plan(self.grid)
    }

    fn name(&self) -> &'static str {
        "D*-Lite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{workspace::OccupantID, GridAStar};
    use nanorand::{Rng, WyRand};

    fn assert_consistent(planner: &DStarLite, grid: &Grid) {
        for x in 0..grid.rows() {
            for y in 0..grid.cols() {
                if !planner.is_queued((x, y)) {
                    assert_eq!(
                        planner.g((x, y)),
                        planner.rhs((x, y)),
                        "g != rhs at {:?}",
                        (x, y)
                    );
                }
            }
        }
    }

    #[test]
    fn consistent_after_search() {
        let mut grid = Grid::new(8, 8).unwrap();
        grid.add_obstacles(&[(3, 1), (3, 2), (3, 3), (3, 4), (3, 5)])
            .unwrap();
        let mut planner = DStarLite::new(&grid, (0, 3), (7, 3), true).unwrap();
        let path = planner.plan(&grid).unwrap().unwrap();

        assert_consistent(&planner, &grid);
        assert_eq!(*path.start(), (0, 3));
        assert_eq!(*path.end(), (7, 3));
        assert!((path.cost() - planner.g((0, 3))).abs() < 1e-9);
    }

    #[test]
    fn matches_a_star() {
        let mut rng = WyRand::new_seed(7);
        for include_diagonals in [false, true] {
            for _ in 0..20 {
                let mut grid = Grid::new(12, 12).unwrap();
                for _ in 0..40 {
                    let cell = (rng.generate_range(0..12usize), rng.generate_range(0..12usize));
                    grid.add_obstacle(cell).unwrap();
                }
                grid.clear_cell((0, 0));
                grid.clear_cell((11, 11));

                let expected = GridAStar::new(&grid)
                    .search((0, 0), (11, 11), include_diagonals)
                    .unwrap();
                let mut planner = DStarLite::new(&grid, (0, 0), (11, 11), include_diagonals).unwrap();
                let actual = planner.plan(&grid).unwrap();

                match (expected, actual) {
                    (None, None) => {}
                    (Some(expected), Some(actual)) => {
                        assert!((expected.cost() - actual.cost()).abs() < 1e-9);
                        for &cell in actual.iter() {
                            assert!(!grid.is_occupied(cell));
                        }
                    }
                    (expected, actual) => panic!("{:?} != {:?}", expected, actual),
                }
                assert_consistent(&planner, &grid);
            }
        }
    }

    #[test]
    fn replan_around_new_obstacle() {
        let mut grid = Grid::new(10, 10).unwrap();
        let mut planner = DStarLite::new(&grid, (0, 0), (9, 9), true).unwrap();
        let first = planner.plan(&grid).unwrap().unwrap();

        let blocked = first[4];
        assert!(planner.g(blocked).is_finite());
        grid.add_obstacle(blocked).unwrap();

        let second = planner.replan(&grid, first[1], &[blocked]).unwrap().unwrap();
        assert_eq!(planner.g(blocked), Cost::INFINITY);
        assert!(second.iter().all(|&cell| cell != blocked));
        assert_eq!(second[0], first[1]);
        assert_eq!(*second.end(), (9, 9));
        assert!(planner.km() > 0.0);
        assert_consistent(&planner, &grid);

        // same result as searching from scratch
        let fresh = GridAStar::new(&grid)
            .search(first[1], (9, 9), true)
            .unwrap()
            .unwrap();
        assert!((fresh.cost() - second.cost()).abs() < 1e-9);
    }

    #[test]
    fn replan_after_removal() {
        let mut grid = Grid::new(6, 6).unwrap();
        let ids = grid
            .add_obstacles(&[(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)])
            .unwrap();
        let mut planner = DStarLite::new(&grid, (0, 0), (5, 0), false).unwrap();
        let first = planner.plan(&grid).unwrap().unwrap();
        assert_eq!(first.cost(), 15.0);

        grid.remove_obstacle(ids[0]);
        let second = planner.replan(&grid, (0, 0), &[(2, 0)]).unwrap().unwrap();
        assert_eq!(second.cost(), 5.0);
        assert_consistent(&planner, &grid);
    }

    #[test]
    fn unreachable_and_blocked_goal() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.add_obstacles(&[(0, 2), (1, 2), (2, 2), (3, 2)]).unwrap();
        let mut planner = DStarLite::new(&grid, (0, 0), (0, 3), true).unwrap();
        assert_eq!(planner.plan(&grid), Ok(None));

        let mut grid = Grid::new(4, 4).unwrap();
        grid.add_obstacle((3, 3)).unwrap();
        let mut planner = DStarLite::new(&grid, (0, 0), (3, 3), true).unwrap();
        assert_eq!(planner.plan(&grid), Ok(None));
    }

    #[test]
    fn stale_state() {
        let grid = Grid::new(4, 4).unwrap();
        let mut planner = DStarLite::new(&grid, (0, 0), (3, 3), true).unwrap();
        planner.plan(&grid).unwrap();

        let bigger = Grid::new(5, 4).unwrap();
        assert_eq!(
            planner.replan(&bigger, (0, 1), &[]),
            Err(PlanError::StaleReplannerState {
                expected_rows: 4,
                expected_cols: 4,
                rows: 5,
                cols: 4
            })
        );
        assert!(planner.plan(&bigger).is_err());
    }

    #[test]
    fn initialize_resets() {
        let grid = Grid::new(3, 3).unwrap();
        let mut planner = DStarLite::new(&grid, (0, 0), (2, 2), true).unwrap();
        planner.plan(&grid).unwrap();
        assert!(planner.g((0, 0)).is_finite());

        planner.initialize();
        assert_eq!(planner.g((0, 0)), Cost::INFINITY);
        assert_eq!(planner.rhs((2, 2)), 0.0);
        assert_eq!(planner.queue_len(), 1);
        assert!(planner.is_queued((2, 2)));
    }

    #[test]
    fn single_cell_route() {
        let grid = Grid::new(3, 3).unwrap();
        let path = DStarLiteSearch::new(&grid)
            .search_segment((1, 1), (1, 1), true)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![(1, 1)]);
    }

    #[test]
    fn update_vertex_checks_bounds() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut planner = DStarLite::new(&grid, (0, 0), (3, 3), false).unwrap();
        planner.plan(&grid).unwrap();
        let rhs = planner.rhs((1, 1));
        let queued = planner.queue_len();

        // (0, 5) would share its dense index with (1, 1)
        assert_eq!(
            planner.update_vertex(&grid, (0, 5)),
            Err(PlanError::OutOfBounds {
                x: 0.0,
                y: 5.0,
                rows: 4,
                cols: 4
            })
        );
        assert!(planner.update_vertex(&grid, (10, 10)).is_err());
        assert_eq!(planner.rhs((1, 1)), rhs);
        assert_eq!(planner.queue_len(), queued);
        assert!(planner
            .update_vertex(&Grid::new(5, 5).unwrap(), (1, 1))
            .is_err());

        grid.add_obstacle((1, 1)).unwrap();
        planner.update_vertex(&grid, (1, 1)).unwrap();
        assert_eq!(planner.rhs((1, 1)), Cost::INFINITY);
        assert!(planner.is_queued((1, 1)));
        assert_consistent(&planner, &grid);
    }

    #[test]
    fn replans_match_a_star() {
        let mut rng = WyRand::new_seed(40);
        let goal = (9, 9);
        for include_diagonals in [false, true] {
            for _ in 0..150 {
                let mut grid = Grid::new(10, 10).unwrap();
                let mut placed: Vec<(OccupantID, Coordinate)> = vec![];
                let mut position = (0, 0);
                let mut planner = DStarLite::new(&grid, position, goal, include_diagonals).unwrap();
                let mut path = planner.plan(&grid).unwrap();

                for _ in 0..12 {
                    if let Some(p) = &path {
                        if p.len() > 1 {
                            position = p[1];
                        }
                    }
                    let mut changed = vec![];
                    for _ in 0..3 {
                        if !placed.is_empty() && rng.generate_range(0..3u32) == 0 {
                            let (id, cell) =
                                placed.swap_remove(rng.generate_range(0..placed.len()));
                            grid.remove_obstacle(id);
                            changed.push(cell);
                        } else {
                            let cell = (rng.generate_range(0..10usize), rng.generate_range(0..10usize));
                            if cell != position && cell != goal {
                                placed.push((grid.add_obstacle(cell).unwrap(), cell));
                                changed.push(cell);
                            }
                        }
                    }

                    path = planner.replan(&grid, position, &changed).unwrap();
                    let expected = GridAStar::new(&grid)
                        .search(position, goal, include_diagonals)
                        .unwrap();
                    match (&expected, &path) {
                        (None, None) => {}
                        (Some(expected), Some(actual)) => {
                            assert!((expected.cost() - actual.cost()).abs() < 1e-6);
                            assert_eq!(actual[0], position);
                            assert_eq!(*actual.end(), goal);
                            assert!(actual.iter().all(|&cell| !grid.is_occupied(cell)));
                        }
                        (expected, actual) => panic!("{:?} != {:?}", expected, actual),
                    }
                    assert_consistent(&planner, &grid);
                }
            }
        }
    }
}
