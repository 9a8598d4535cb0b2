use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{CellState, Grid, Pathfinder};
use grid_util::point::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use std::ops::ControlFlow;

fn random_grid(n: usize, density: f64, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(n);
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            if rng.gen_bool(density) {
                grid.set_state(Point::new(x, y), CellState::Barrier);
            }
        }
    }
    grid.reset_cell(Point::new(0, 0));
    grid.reset_cell(Point::new(n as i32 - 1, n as i32 - 1));
    grid.refresh_neighbors();
    grid
}

fn search_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for (n, density) in [(50, 0.0), (50, 0.25), (200, 0.25)] {
        let grid = random_grid(n, density, &mut rng);
        let start = Point::new(0, 0);
        let end = Point::new(n as i32 - 1, n as i32 - 1);
        let mut pathfinder = Pathfinder::new();
        c.bench_function(format!("{n}x{n}, density {density}").as_str(), |b| {
            b.iter(|| {
                black_box(pathfinder.search(&grid, start, end, |p, s| {
                    black_box((p, s));
                    ControlFlow::Continue(())
                }))
            })
        });
    }
}

criterion_group!(benches, search_bench);
criterion_main!(benches);
