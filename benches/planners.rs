use env_logger::Env;

use criterion::{criterion_group, criterion_main, Criterion};

use incremental_pathfinding::prelude::*;
use nanorand::{Rng, WyRand};

/// a Grid where roughly one in `density` cells is occupied, with both corners kept free
fn random_grid(size: usize, density: u32) -> Grid {
    let mut grid = Grid::new(size, size).unwrap();
    let mut rng = WyRand::new_seed(4);
    for x in 0..size {
        for y in 0..size {
            if rng.generate_range(0..density) == 0 {
                grid.add_obstacle((x, y)).unwrap();
            }
        }
    }
    grid.clear_cell((0, 0));
    grid.clear_cell((size - 1, size - 1));
    grid
}

/// a Plane scattered with small random triangles
fn random_plane(size: usize, count: usize) -> Plane {
    let mut plane = Plane::new(size, size).unwrap();
    let mut rng = WyRand::new_seed(4);
    let max = size as u32 - 10;
    for _ in 0..count {
        let x = rng.generate_range(10..max) as f64;
        let y = rng.generate_range(10..max) as f64;
        let triangle = Obstacle::polygon(vec![
            Position::new(x, y),
            Position::new(x + 6.0, y + 1.0),
            Position::new(x + 2.0, y + 5.0),
        ])
        .unwrap();
        plane.add_obstacle(triangle).unwrap();
    }
    plane
}

#[allow(unused)]
// Setup logging output
fn init() {
    let env = Env::default()
        .filter_or("MY_LOG_LEVEL", "debug") // Change this from debug to trace to see every search.
        .write_style_or("MY_LOG_STYLE", "always");

    let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
}

fn bench_grid_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Grid Search");

    // Log to stdout
    init();

    for size in [64, 256] {
        let grid = random_grid(size, 5);
        let goal = (size - 1, size - 1);

        let id = format!("A*, Random Map, Map Size: ({}, {})", size, size);
        group.bench_function(&id, |b| {
            b.iter(|| GridAStar::new(&grid).search((0, 0), goal, true))
        });

        let id = format!("Theta*, Random Map, Map Size: ({}, {})", size, size);
        group.bench_function(&id, |b| {
            b.iter(|| ThetaStar::new(&grid).search((0, 0), goal, true))
        });

        let id = format!("D*-Lite, Random Map, Map Size: ({}, {})", size, size);
        group.bench_function(&id, |b| {
            b.iter(|| {
                DStarLite::new(&grid, (0, 0), goal, true)
                    .and_then(|mut planner| planner.plan(&grid))
            })
        });
    }
}

fn bench_replan(c: &mut Criterion) {
    let mut group = c.benchmark_group("Replan");
    group.sample_size(20);

    let size = 256;
    let goal = (size - 1, size - 1);
    let mut grid = random_grid(size, 6);
    let mut planner = DStarLite::new(&grid, (0, 0), goal, true).unwrap();
    let first = planner.plan(&grid).unwrap().unwrap();

    // drop a short wall right across the current route
    let center = first[first.len() / 2];
    let mut changed = vec![];
    for dy in 0..5 {
        let cell = (center.0, (center.1 + dy).saturating_sub(2).min(size - 1));
        if !grid.is_occupied(cell) && cell != goal {
            grid.add_obstacle(cell).unwrap();
            changed.push(cell);
        }
    }
    let new_start = first[1];

    let id = format!("D*-Lite replan, Map Size: ({}, {})", size, size);
    group.bench_function(&id, |b| {
        b.iter_batched(
            || planner.clone(),
            |mut planner| planner.replan(&grid, new_start, &changed),
            criterion::BatchSize::LargeInput,
        )
    });

    let id = format!("A* from scratch, Map Size: ({}, {})", size, size);
    group.bench_function(&id, |b| {
        b.iter(|| GridAStar::new(&grid).search(new_start, goal, true))
    });
}

fn bench_plane_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Plane Search");
    group.sample_size(10);

    for count in [20, 80] {
        let plane = random_plane(500, count);
        let id = format!("Any-angle, {} triangles", count);
        group.bench_function(&id, |b| {
            b.iter(|| {
                AnyAngleSearch::new(&plane).search(Position::new(1.0, 1.0), Position::new(499.0, 499.0))
            })
        });
    }
}

fn bench_stitch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stitch");

    let size = 256;
    let grid = random_grid(size, 6);
    let mut waypoints = vec![(0, 0)];
    let mut rng = WyRand::new_seed(9);
    while waypoints.len() < 8 {
        let cell = (
            rng.generate_range(0..size as u32) as usize,
            rng.generate_range(0..size as u32) as usize,
        );
        if !grid.is_occupied(cell) {
            waypoints.push(cell);
        }
    }
    let search = GridAStar::new(&grid);

    let id = format!("Stitch 8 waypoints, Single Threaded, Map Size: ({}, {})", size, size);
    group.bench_function(&id, |b| {
        b.iter(|| generate_path(&search, &waypoints, true))
    });

    #[cfg(feature = "parallel")]
    {
        let id = format!("Stitch 8 waypoints, Parallel, Map Size: ({}, {})", size, size);
        group.bench_function(&id, |b| {
            b.iter(|| {
                incremental_pathfinding::stitcher::generate_path_parallel(&search, &waypoints, true)
            })
        });
    }
}

criterion_group!(
    benches,
    bench_grid_search,
    bench_replan,
    bench_plane_search,
    bench_stitch
);
criterion_main!(benches);
