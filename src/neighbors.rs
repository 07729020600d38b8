//! A module with the Neighborhoods used to move across a [`Grid`](crate::Grid)

use crate::{Coordinate, Cost};
use std::f64::consts::SQRT_2;
use std::fmt::Debug;

/// Defines how a Path can move along the Grid.
///
/// Different Scenarios may have different constraints as to how a Path may be formed.
/// For example if Agents can only move along the 4 cardinal directions, any Paths generated should
/// reflect that by only containing those steps.
///
/// This Trait provides a function to query all neighboring Cells of an existing Cell, the Cost of
/// stepping between two neighboring Cells and a Heuristic for how expensive it might be to reach a
/// goal from a Cell.
///
/// The Heuristic has to be consistent with [`cost`](Neighborhood::cost): it may never
/// overestimate the remaining Cost, and moving one step may never decrease it by more than the
/// Cost of that step. Both provided implementations satisfy this.
///
/// The most common implementations of this Trait are already provided by this Module:
/// - [`ManhattanNeighborhood`] for Agents that can move
/// up, down, left or right
/// - [`MooreNeighborhood`] for Agents that can move
/// up, down, left, right, as well as the 4 diagonals (up-right, ...)
pub trait Neighborhood: Clone + Debug {
    /// Provides a list of Neighbors of a Cell
    ///
    /// Note that it is not necessary to check weather the Cell is occupied or not.
    /// That check is done later.
    fn get_all_neighbors(&self, point: Coordinate, target: &mut Vec<Coordinate>);
    /// The Cost of stepping from `a` to its neighbor `b`.
    fn cost(&self, a: Coordinate, b: Coordinate) -> Cost;
    /// Gives a Heuristic for how expensive it is to reach `goal` from `point`.
    fn heuristic(&self, point: Coordinate, goal: Coordinate) -> Cost;
}

fn axis_distances(a: Coordinate, b: Coordinate) -> (usize, usize) {
    (a.0.abs_diff(b.0), a.1.abs_diff(b.1))
}

fn collect_offsets(
    offsets: &[(isize, isize)],
    point: Coordinate,
    (rows, cols): (usize, usize),
    target: &mut Vec<Coordinate>,
) {
    target.extend(
        offsets
            .iter()
            .map(|(dx, dy)| (point.0 as isize + dx, point.1 as isize + dy))
            .filter(|&(x, y)| x >= 0 && y >= 0 && (x as usize) < rows && (y as usize) < cols)
            .map(|(x, y)| (x as usize, y as usize)),
    );
}

/// A Neighborhood for Agents moving along the 4 cardinal directions.
///
/// Also known as [Von Neumann Neighborhood](https://en.wikipedia.org/wiki/Von_Neumann_neighborhood),
/// Manhattan Metric or [Taxicab Geometry](https://en.wikipedia.org/wiki/Taxicab_geometry).
///
/// ```no_code
/// A: Agent, o: reachable in one step
///   o
///   |
/// o-A-o
///   |
///   o
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ManhattanNeighborhood {
    rows: usize,
    cols: usize,
}

impl ManhattanNeighborhood {
    /// Creates a new ManhattanNeighborhood.
    ///
    /// `rows` and `cols` are the size of the Grid to move on.
    pub fn new(rows: usize, cols: usize) -> ManhattanNeighborhood {
        ManhattanNeighborhood { rows, cols }
    }
}

impl Neighborhood for ManhattanNeighborhood {
    fn get_all_neighbors(&self, point: Coordinate, target: &mut Vec<Coordinate>) {
        collect_offsets(
            &[(0, -1), (1, 0), (0, 1), (-1, 0)],
            point,
            (self.rows, self.cols),
            target,
        );
    }
    fn cost(&self, _a: Coordinate, _b: Coordinate) -> Cost {
        1.0
    }
    fn heuristic(&self, point: Coordinate, goal: Coordinate) -> Cost {
        let (dx, dy) = axis_distances(point, goal);
        (dx + dy) as Cost
    }
}

/// A Neighborhood for Agents moving along the 4 cardinal directions and the 4 diagonals.
///
/// Also known as [Moore Neighborhood](https://en.wikipedia.org/wiki/Moore_neighborhood).
/// Diagonal steps cost `√2`, so the Heuristic is the octile distance.
///
/// ```no_code
/// A: Agent, o: reachable in one step
/// o o o
///  \|/
/// o-A-o
///  /|\
/// o o o
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MooreNeighborhood {
    rows: usize,
    cols: usize,
}

impl MooreNeighborhood {
    /// Creates a new MooreNeighborhood.
    ///
    /// `rows` and `cols` are the size of the Grid to move on.
    pub fn new(rows: usize, cols: usize) -> MooreNeighborhood {
        MooreNeighborhood { rows, cols }
    }
}

impl Neighborhood for MooreNeighborhood {
    fn get_all_neighbors(&self, point: Coordinate, target: &mut Vec<Coordinate>) {
        collect_offsets(
            &[
                (0, -1),
                (1, -1),
                (1, 0),
                (1, 1),
                (0, 1),
                (-1, 1),
                (-1, 0),
                (-1, -1),
            ],
            point,
            (self.rows, self.cols),
            target,
        );
    }
    fn cost(&self, a: Coordinate, b: Coordinate) -> Cost {
        if a.0 != b.0 && a.1 != b.1 {
            SQRT_2
        } else {
            1.0
        }
    }
    fn heuristic(&self, point: Coordinate, goal: Coordinate) -> Cost {
        let (dx, dy) = axis_distances(point, goal);
        let (low, high) = if dx < dy { (dx, dy) } else { (dy, dx) };
        (high - low) as Cost + SQRT_2 * low as Cost
    }
}

/// Either of the provided Neighborhoods, picked at runtime by an `include_diagonals` flag.
#[derive(Clone, Copy, Debug)]
pub enum GridNeighborhood {
    /// 4-connected movement
    Manhattan(ManhattanNeighborhood),
    /// 8-connected movement
    Moore(MooreNeighborhood),
}

impl GridNeighborhood {
    /// Creates the Neighborhood for a `rows` x `cols` Grid.
    pub fn new(rows: usize, cols: usize, include_diagonals: bool) -> GridNeighborhood {
        if include_diagonals {
            GridNeighborhood::Moore(MooreNeighborhood::new(rows, cols))
        } else {
            GridNeighborhood::Manhattan(ManhattanNeighborhood::new(rows, cols))
        }
    }
}

impl Neighborhood for GridNeighborhood {
    fn get_all_neighbors(&self, point: Coordinate, target: &mut Vec<Coordinate>) {
        match self {
            GridNeighborhood::Manhattan(n) => n.get_all_neighbors(point, target),
            GridNeighborhood::Moore(n) => n.get_all_neighbors(point, target),
        }
    }
    fn cost(&self, a: Coordinate, b: Coordinate) -> Cost {
        match self {
            GridNeighborhood::Manhattan(n) => n.cost(a, b),
            GridNeighborhood::Moore(n) => n.cost(a, b),
        }
    }
    fn heuristic(&self, point: Coordinate, goal: Coordinate) -> Cost {
        match self {
            GridNeighborhood::Manhattan(n) => n.heuristic(point, goal),
            GridNeighborhood::Moore(n) => n.heuristic(point, goal),
        }
    }
}

#[test]
fn test_manhattan_get_all_neighbors() {
    let neighborhood = ManhattanNeighborhood::new(5, 5);
    let mut target = vec![];
    neighborhood.get_all_neighbors((0, 2), &mut target);
    assert_eq!(target, vec![(0, 1), (1, 2), (0, 3)]);
}

#[test]
fn test_manhattan_heuristic() {
    let neighborhood = ManhattanNeighborhood::new(5, 5);
    assert_eq!(neighborhood.heuristic((3, 1), (0, 0)), 3.0 + 1.0);
}

#[test]
fn test_moore_get_all_neighbors() {
    let neighborhood = MooreNeighborhood::new(5, 5);
    let mut target = vec![];
    neighborhood.get_all_neighbors((0, 2), &mut target);
    assert_eq!(target, vec![(0, 1), (1, 1), (1, 2), (1, 3), (0, 3)]);
}

#[test]
fn test_moore_heuristic() {
    let neighborhood = MooreNeighborhood::new(5, 5);
    assert_eq!(neighborhood.heuristic((3, 1), (0, 0)), 2.0 + SQRT_2);
    assert_eq!(neighborhood.heuristic((2, 2), (2, 2)), 0.0);
}

#[test]
fn test_moore_cost() {
    let neighborhood = MooreNeighborhood::new(5, 5);
    assert_eq!(neighborhood.cost((1, 1), (2, 2)), SQRT_2);
    assert_eq!(neighborhood.cost((1, 1), (1, 2)), 1.0);
}

#[test]
fn test_grid_neighborhood_switch() {
    let mut target = vec![];
    GridNeighborhood::new(3, 3, false).get_all_neighbors((1, 1), &mut target);
    assert_eq!(target.len(), 4);
    target.clear();
    GridNeighborhood::new(3, 3, true).get_all_neighbors((1, 1), &mut target);
    assert_eq!(target.len(), 8);
}
