#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! A crate to plan collision-free routes through 2D workspaces.
//!
//! ## Introduction
//! A workspace comes in two flavors: a discrete [`Grid`] where obstacles occupy cells, and a
//! continuous [`Plane`] populated with point, segment and polygon [`Obstacle`]s. Three families
//! of searches run on top of them:
//!
//! - [`GridAStar`] (and its any-angle cousin [`ThetaStar`]) searches the Grid cell by cell,
//!   either 4- or 8-connected.
//! - [`AnyAngleSearch`] runs A* over the implicit visibility graph formed by the via points that
//!   every obstacle on the Plane derives around itself. The resulting Paths bend only at those
//!   via points.
//! - [`DStarLite`] keeps its search state alive between calls. When the agent moves or cells
//!   change, [`replan`](DStarLite::replan) repairs only the affected part of that state instead
//!   of searching from scratch.
//!
//! Multi-stop routes are built by [`generate_path`](stitcher::generate_path), which runs any of
//! the searches once per consecutive pair of waypoints and concatenates the results.
//!
//! ## Examples
//! Searching a Grid:
//! ```
//! use incremental_pathfinding::prelude::*;
//!
//! let mut grid = Grid::new(5, 5).unwrap();
//! // a wall across the middle, with a gap at (4, 2)
//! for x in 0..4 {
//!     grid.add_obstacle((x, 2)).unwrap();
//! }
//!
//! let path = GridAStar::new(&grid)
//!     .search((0, 0), (0, 4), false)
//!     .unwrap()
//!     .expect("the gap keeps the goal reachable");
//!
//! assert_eq!(path[0], (0, 0));
//! assert_eq!(path[path.len() - 1], (0, 4));
//! assert!(path.iter().all(|&cell| !grid.is_occupied(cell)));
//! ```
//!
//! Searching a Plane:
//! ```
//! use incremental_pathfinding::prelude::*;
//!
//! let mut plane = Plane::new(100, 100).unwrap();
//! plane
//!     .add_obstacle(Obstacle::segment(Position::new(50.0, 20.0), Position::new(50.0, 80.0)).unwrap())
//!     .unwrap();
//!
//! let start = Position::new(20.0, 50.0);
//! let goal = Position::new(80.0, 50.0);
//! assert!(!plane.visible(start, goal));
//!
//! let path = AnyAngleSearch::new(&plane).search(start, goal).unwrap().unwrap();
//! // the path has to bend around one of the segment's ends
//! assert_eq!(path.len(), 3);
//! ```
//!
//! ### Replanning
//! The [`DStarLite`] replanner does not own the Grid. The caller keeps both and tells the
//! replanner which cells changed:
//! ```
//! use incremental_pathfinding::prelude::*;
//!
//! let mut grid = Grid::new(6, 6).unwrap();
//! let mut planner = DStarLite::new(&grid, (0, 0), (5, 5), true).unwrap();
//! let first = planner.plan(&grid).unwrap().unwrap();
//!
//! // something shows up right in front of the agent
//! let blocked = first[2];
//! grid.add_obstacle(blocked).unwrap();
//!
//! let second = planner.replan(&grid, first[1], &[blocked]).unwrap().unwrap();
//! assert_eq!(second[0], first[1]);
//! assert!(second.iter().all(|&cell| cell != blocked));
//! ```

/// A shorthand for Cells on the [`Grid`]. The first component is the row, the second the column.
pub type Coordinate = (usize, usize);

/// A specialized [`HashMap`](hashbrown::HashMap) keyed by [`Coordinate`]s
pub type CoordinateMap<V> = hashbrown::HashMap<Coordinate, V>;
/// A specialized [`HashSet`](hashbrown::HashSet) of [`Coordinate`]s
pub type CoordinateSet = hashbrown::HashSet<Coordinate>;

mod error;
pub use self::error::{PlanError, PlanResult};

mod config;
pub use self::config::PlannerConfig;

pub mod neighbors;

mod path;
pub use self::path::{Cost, Path};

pub mod geometry;
pub use self::geometry::{Obstacle, Position};

pub mod workspace;
pub use self::workspace::{Bounds, Grid, Plane, Workspace};

pub mod visibility;

pub mod search;
pub use self::search::{AnyAngleSearch, DStarLite, DStarLiteSearch, GridAStar, ThetaStar};

pub mod stitcher;

mod planner;
pub use self::planner::{Planner, PlannerKind};

/// The prelude for this crate.
pub mod prelude {
    pub use crate::{
        geometry::{Obstacle, Position, Segment},
        neighbors::{ManhattanNeighborhood, MooreNeighborhood, Neighborhood},
        search::{AnyAngleSearch, DStarLite, DStarLiteSearch, GridAStar, SegmentSearch, ThetaStar},
        stitcher::generate_path,
        workspace::{Grid, Plane, Workspace},
        Coordinate, Path, PlanError, PlannerConfig, PlannerKind,
    };
}
