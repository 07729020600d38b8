use incremental_pathfinding::prelude::*;
use incremental_pathfinding::{stitcher, visibility};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn p(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

#[test]
fn open_grid_diagonal_path() {
    init();
    let grid = Grid::new(3, 3).unwrap();
    let path = GridAStar::new(&grid)
        .search((0, 0), (2, 2), true)
        .unwrap()
        .unwrap();

    assert_eq!(path.len(), 3);
    for pair in path.as_slice().windows(2) {
        assert!(grid.neighbors(pair[0], true).contains(&pair[1]));
    }
}

#[test]
fn crossing_segments_block_visibility() {
    init();
    let mut plane = Plane::new(100, 100).unwrap();
    let a = plane
        .add_obstacle(Obstacle::segment(p(10.0, 10.0), p(90.0, 90.0)).unwrap())
        .unwrap();
    let b = plane
        .add_obstacle(Obstacle::segment(p(10.0, 90.0), p(90.0, 10.0)).unwrap())
        .unwrap();

    assert!(!visibility::visible(p(50.0, 10.0), p(50.0, 90.0), &plane));

    plane.remove_obstacle(a).unwrap();
    assert!(!plane.visible(p(50.0, 10.0), p(50.0, 90.0)));
    plane.remove_obstacle(b).unwrap();
    assert!(plane.visible(p(50.0, 10.0), p(50.0, 90.0)));
    assert_eq!(plane.via_points().count(), 0);
}

#[test]
fn any_angle_cost_matches_length() {
    init();
    let mut plane = Plane::new(100, 100).unwrap();
    plane
        .add_obstacle(Obstacle::segment(p(10.0, 10.0), p(90.0, 90.0)).unwrap())
        .unwrap();
    plane
        .add_obstacle(Obstacle::polygon(vec![p(20.0, 60.0), p(40.0, 60.0), p(30.0, 80.0)]).unwrap())
        .unwrap();

    let path = AnyAngleSearch::new(&plane)
        .search(p(80.0, 20.0), p(20.0, 90.0))
        .unwrap()
        .unwrap();
    let length: f64 = path
        .as_slice()
        .windows(2)
        .map(|pair| pair[0].distance(pair[1]))
        .sum();

    assert!((length - path.cost()).abs() < 1e-6);
    assert_eq!(*path.start(), p(80.0, 20.0));
    assert_eq!(*path.end(), p(20.0, 90.0));
    for pair in path.as_slice().windows(2) {
        assert!(plane.visible(pair[0], pair[1]));
    }
}

#[test]
fn replanning_while_walking() {
    init();
    let mut grid = Grid::new(12, 12).unwrap();
    let goal = (11, 6);
    let mut planner = DStarLite::new(&grid, (0, 6), goal, true).unwrap();
    let mut path = planner.plan(&grid).unwrap().unwrap();

    // a wall grows in front of the agent while it walks
    let walls = [(8, 4), (8, 5), (8, 6), (8, 7), (8, 8), (8, 3), (8, 9)];
    for &wall in walls.iter() {
        let position = path[1];
        grid.add_obstacle(wall).unwrap();
        path = planner.replan(&grid, position, &[wall]).unwrap().unwrap();

        assert_eq!(path[0], position);
        assert_eq!(*path.end(), goal);
        assert!(path.iter().all(|&cell| !grid.is_occupied(cell)));

        let fresh = GridAStar::new(&grid)
            .search(position, goal, true)
            .unwrap()
            .unwrap();
        assert!((fresh.cost() - path.cost()).abs() < 1e-9);
    }
    assert_eq!(planner.start(), path[0]);
}

#[test]
fn replanning_until_enclosed() {
    init();
    let mut grid = Grid::new(5, 5).unwrap();
    let mut planner = DStarLite::new(&grid, (0, 0), (4, 4), false).unwrap();
    assert!(planner.plan(&grid).unwrap().is_some());

    let ring = [(3, 3), (3, 4), (4, 3)];
    grid.add_obstacles(&ring).unwrap();
    assert_eq!(planner.replan(&grid, (0, 0), &ring), Ok(None));

    // and open it again
    grid.clear_cell((3, 4));
    let path = planner.replan(&grid, (0, 0), &[(3, 4)]).unwrap().unwrap();
    assert_eq!(path.cost(), 8.0);
}

#[test]
fn stitched_route_equals_segments() {
    init();
    let mut grid = Grid::new(10, 10).unwrap();
    for x in 0..8 {
        grid.add_obstacle((x, 5)).unwrap();
    }
    let search = GridAStar::new(&grid);
    let waypoints = [(0, 0), (0, 9), (9, 9)];

    let route = stitcher::generate_path(&search, &waypoints, true)
        .unwrap()
        .unwrap();
    let first = search.search((0, 0), (0, 9), true).unwrap().unwrap();
    let second = search.search((0, 9), (9, 9), true).unwrap().unwrap();

    let mut expected = first.to_vec();
    expected.extend_from_slice(&second.as_slice()[1..]);
    assert_eq!(route, expected);
    assert_eq!(
        stitcher::generate_path(&search, &waypoints, true).unwrap(),
        Some(route)
    );
}

#[test]
fn planner_kinds_route_waypoints() {
    init();
    let mut workspace = Workspace::grid(8, 8).unwrap();
    workspace
        .as_grid_mut()
        .unwrap()
        .add_obstacles(&[(3, 0), (3, 1), (3, 2), (3, 3), (3, 4), (3, 5)])
        .unwrap();

    let costs: Vec<f64> = [PlannerKind::AStar, PlannerKind::DStarLite]
        .into_iter()
        .map(|kind| {
            kind.build(&workspace)
                .unwrap()
                .route_grid(&[(0, 0), (7, 0), (7, 7)], true)
                .unwrap()
                .unwrap()
                .cost()
        })
        .collect();
    assert!((costs[0] - costs[1]).abs() < 1e-9);

    let theta = PlannerKind::ThetaStar
        .build(&workspace)
        .unwrap()
        .route_grid(&[(0, 0), (7, 0), (7, 7)], true)
        .unwrap()
        .unwrap();
    let cardinal = PlannerKind::AStar
        .build(&workspace)
        .unwrap()
        .route_grid(&[(0, 0), (7, 0), (7, 7)], false)
        .unwrap()
        .unwrap();
    assert_eq!(cardinal.cost(), 26.0);
    assert!(theta.cost() < cardinal.cost());
}

#[test]
fn wide_clearance_keeps_distance() {
    init();
    let mut plane = Plane::with_config(100, 100, PlannerConfig::WIDE_CLEARANCE).unwrap();
    plane
        .add_obstacle(Obstacle::segment(p(50.0, 20.0), p(50.0, 80.0)).unwrap())
        .unwrap();
    let path = AnyAngleSearch::new(&plane)
        .search(p(20.0, 50.0), p(80.0, 50.0))
        .unwrap()
        .unwrap();

    assert_eq!(path.len(), 3);
    let corner = path[1];
    assert!(corner == p(50.0, 15.0) || corner == p(50.0, 85.0));
}
