use criterion::{criterion_group, criterion_main, Criterion};
use grid_search::{
    pathing_grid::PathingGrid,
    solver::{astar::AstarSolver, dijkstra::DijkstraSolver, jps::JPSSolver, GridSolver},
};
use grid_util::point::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

const SIZE: usize = 128;
const N_SCENARIOS: usize = 32;

/// A seeded grid with scattered obstructions and a few long walls, plus start/goal pairs that
/// are known to be connected.
fn random_bench_grid(seed: u64) -> (PathingGrid, Vec<(Point, Point)>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pathing_grid = PathingGrid::new(SIZE, SIZE);
    for x in 0..SIZE as i32 {
        for y in 0..SIZE as i32 {
            if rng.gen_bool(0.2) {
                pathing_grid.set_obstruction(Point::new(x, y), true).unwrap();
            }
        }
    }
    for _ in 0..8 {
        let x = rng.gen_range(0..SIZE as i32);
        let gap = rng.gen_range(0..SIZE as i32);
        for y in (0..SIZE as i32).filter(|y| (y - gap).abs() > 2) {
            pathing_grid.set_obstruction(Point::new(x, y), true).unwrap();
        }
    }
    pathing_grid.generate_components();
    let mut scenarios = Vec::new();
    while scenarios.len() < N_SCENARIOS {
        let mut random_point = || {
            Point::new(
                rng.gen_range(0..SIZE as i32),
                rng.gen_range(0..SIZE as i32),
            )
        };
        let (start, goal) = (random_point(), random_point());
        if pathing_grid.can_move_to_simple(start)
            && pathing_grid.can_move_to_simple(goal)
            && pathing_grid.reachable(&start, &goal)
        {
            scenarios.push((start, goal));
        }
    }
    (pathing_grid, scenarios)
}

fn bench_solver<S: GridSolver>(c: &mut Criterion, solver_name: &str, solver: S) {
    let (mut pathing_grid, scenarios) = random_bench_grid(0);
    c.bench_function(
        format!("random {SIZE}x{SIZE}, {solver_name}").as_str(),
        |b| {
            b.iter(|| {
                for (start, end) in &scenarios {
                    black_box(
                        solver
                            .get_waypoints_single_goal(&mut pathing_grid, *start, *end)
                            .unwrap(),
                    );
                }
            })
        },
    );
}

fn bench_dijkstra(c: &mut Criterion) {
    bench_solver(c, "Dijkstra", DijkstraSolver);
}

fn bench_astar(c: &mut Criterion) {
    bench_solver(c, "Astar", AstarSolver::new());
}

fn bench_jps(c: &mut Criterion) {
    bench_solver(c, "JPS", JPSSolver);
}

fn bench_jps_expanded(c: &mut Criterion) {
    let (mut pathing_grid, scenarios) = random_bench_grid(0);
    c.bench_function(
        format!("random {SIZE}x{SIZE}, JPS (expanded path)").as_str(),
        |b| {
            b.iter(|| {
                for (start, end) in &scenarios {
                    black_box(
                        JPSSolver
                            .get_path_single_goal(&mut pathing_grid, *start, *end)
                            .unwrap(),
                    );
                }
            })
        },
    );
}

criterion_group!(
    benches,
    bench_dijkstra,
    bench_astar,
    bench_jps,
    bench_jps_expanded
);
criterion_main!(benches);
