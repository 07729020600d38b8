use super::Bounds;
use crate::{
    neighbors::{GridNeighborhood, Neighborhood},
    Coordinate, CoordinateMap, PlanResult,
};
use log::trace;

/// A handle to a single obstacle placed on a [`Grid`], used to remove it again.
pub type OccupantID = usize;

/// A discrete workspace of `rows` x `cols` cells.
///
/// Every cell holds zero or more occupants. A cell is blocked as long as at least one occupant
/// remains, so overlapping obstacles can be added and removed independently.
///
/// ## Examples
/// ```
/// # use incremental_pathfinding::prelude::*;
/// let mut grid = Grid::new(3, 3).unwrap();
/// let a = grid.add_obstacle((1, 1)).unwrap();
/// let b = grid.add_obstacle((1, 1)).unwrap();
///
/// grid.remove_obstacle(a);
/// assert!(grid.is_occupied((1, 1)));
/// grid.remove_obstacle(b);
/// assert!(!grid.is_occupied((1, 1)));
///
/// assert!(grid.add_obstacle((3, 0)).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    bounds: Bounds,
    occupants: CoordinateMap<Vec<OccupantID>>,
    cells: slab::Slab<Coordinate>,
}

impl Grid {
    /// Creates an empty Grid.
    ///
    /// ## Errors
    /// [`PlanError::InvalidBounds`](crate::PlanError::InvalidBounds) if either dimension is 0.
    pub fn new(rows: usize, cols: usize) -> PlanResult<Grid> {
        Ok(Grid {
            bounds: Bounds::new(rows, cols)?,
            occupants: CoordinateMap::default(),
            cells: slab::Slab::new(),
        })
    }

    /// the number of rows
    pub fn rows(&self) -> usize {
        self.bounds.rows()
    }

    /// the number of columns
    pub fn cols(&self) -> usize {
        self.bounds.cols()
    }

    /// the Bounds of the Grid
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// `true` if `cell` is part of the Grid
    pub fn contains(&self, cell: Coordinate) -> bool {
        self.bounds.contains_coordinate(cell)
    }

    /// Places an obstacle on `cell`.
    ///
    /// ## Errors
    /// [`PlanError::OutOfBounds`](crate::PlanError::OutOfBounds) if `cell` is not part of the
    /// Grid.
    pub fn add_obstacle(&mut self, cell: Coordinate) -> PlanResult<OccupantID> {
        self.bounds.check_coordinate(cell)?;
        let id = self.cells.insert(cell);
        self.occupants.entry(cell).or_default().push(id);
        trace!("occupied {:?} as #{}", cell, id);
        Ok(id)
    }

    /// Places an obstacle on each of the cells.
    ///
    /// Nothing is added if any of the cells is out of bounds.
    pub fn add_obstacles(&mut self, cells: &[Coordinate]) -> PlanResult<Vec<OccupantID>> {
        for &cell in cells {
            self.bounds.check_coordinate(cell)?;
        }
        cells.iter().map(|&cell| self.add_obstacle(cell)).collect()
    }

    /// Removes a single obstacle. Returns the cell it occupied, or `None` if `id` is unknown.
    pub fn remove_obstacle(&mut self, id: OccupantID) -> Option<Coordinate> {
        if !self.cells.contains(id) {
            return None;
        }
        let cell = self.cells.remove(id);
        if let Some(list) = self.occupants.get_mut(&cell) {
            list.retain(|&other| other != id);
            if list.is_empty() {
                self.occupants.remove(&cell);
            }
        }
        trace!("removed #{} from {:?}", id, cell);
        Some(cell)
    }

    /// Removes every obstacle on `cell`. Returns how many were removed.
    pub fn clear_cell(&mut self, cell: Coordinate) -> usize {
        let Some(list) = self.occupants.remove(&cell) else {
            return 0;
        };
        for &id in &list {
            self.cells.remove(id);
        }
        trace!("cleared {} occupants from {:?}", list.len(), cell);
        list.len()
    }

    /// Removes every obstacle
    pub fn clear(&mut self) {
        self.occupants.clear();
        self.cells.clear();
    }

    /// `true` if at least one obstacle is placed on `cell`
    pub fn is_occupied(&self, cell: Coordinate) -> bool {
        self.occupants.contains_key(&cell)
    }

    /// The ids of all obstacles placed on `cell`
    pub fn occupants(&self, cell: Coordinate) -> &[OccupantID] {
        self.occupants.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All cells with at least one obstacle, in no particular order
    pub fn occupied_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.occupants.keys().copied()
    }

    /// the number of obstacles on the Grid
    pub fn obstacle_count(&self) -> usize {
        self.cells.len()
    }

    /// The cells around `cell`, with or without diagonals.
    pub fn neighbors(&self, cell: Coordinate, include_diagonals: bool) -> Vec<Coordinate> {
        let mut ret = Vec::with_capacity(8);
        GridNeighborhood::new(self.rows(), self.cols(), include_diagonals)
            .get_all_neighbors(cell, &mut ret);
        ret
    }

    /// The unoccupied cells around `cell`
    pub fn empty_neighbors(&self, cell: Coordinate, include_diagonals: bool) -> Vec<Coordinate> {
        let mut ret = self.neighbors(cell, include_diagonals);
        ret.retain(|&c| !self.is_occupied(c));
        ret
    }

    /// The occupied cells around `cell`
    pub fn occupied_neighbors(&self, cell: Coordinate, include_diagonals: bool) -> Vec<Coordinate> {
        let mut ret = self.neighbors(cell, include_diagonals);
        ret.retain(|&c| self.is_occupied(c));
        ret
    }

    /// `true` if a straight line between the centers of `a` and `b` crosses no occupied cell.
    ///
    /// Every cell the line touches has to be free. Where the line passes exactly through the
    /// corner of four cells, both cells beside the corner have to be free as well.
    ///
    /// ```
    /// # use incremental_pathfinding::prelude::*;
    /// let mut grid = Grid::new(5, 5).unwrap();
    /// assert!(grid.line_of_sight((0, 0), (4, 2)));
    ///
    /// grid.add_obstacle((2, 1)).unwrap();
    /// assert!(!grid.line_of_sight((0, 0), (4, 2)));
    /// assert!(grid.line_of_sight((0, 0), (0, 4)));
    /// ```
    pub fn line_of_sight(&self, a: Coordinate, b: Coordinate) -> bool {
        if !self.contains(a) || !self.contains(b) {
            return false;
        }
        let blocked = |x: isize, y: isize| self.is_occupied((x as usize, y as usize));

        let (mut x, mut y) = (a.0 as isize, a.1 as isize);
        let (x1, y1) = (b.0 as isize, b.1 as isize);
        let (dx, dy) = ((x1 - x).abs(), (y1 - y).abs());
        let (sx, sy) = ((x1 - x).signum(), (y1 - y).signum());

        if blocked(x, y) {
            return false;
        }

        let mut error = dx - dy;
        let mut remaining = dx + dy;
        while remaining > 0 {
            if error > 0 {
                x += sx;
                error -= 2 * dy;
                remaining -= 1;
            } else if error < 0 {
                y += sy;
                error += 2 * dx;
                remaining -= 1;
            } else {
                // the line passes through a corner
                if blocked(x + sx, y) || blocked(x, y + sy) {
                    return false;
                }
                x += sx;
                y += sy;
                error += 2 * (dx - dy);
                remaining -= 2;
            }
            if blocked(x, y) {
                return false;
            }
        }
        true
    }
}
