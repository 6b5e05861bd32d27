use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pathfind::find::{MapTrait, PathFinder, PathFinderState};
use pathfind::grid::{Cell, Grid, Point};

/// A maze where every other row is a wall with a single gap, the gap
/// alternating between the right and left edge. Forces the search to sweep
/// the full width of the grid on every level.
fn serpentine(n: usize) -> Grid {
    let mut grid = Grid::new(n, n);

    for row in (1..n).step_by(2) {
        for col in 0..n {
            grid.set(Point { row, col }, Cell::Blocked);
        }
        let gap = if (row / 2) % 2 == 0 { n - 1 } else { 0 };
        grid.set(Point { row, col: gap }, Cell::Open);
    }

    grid
}

fn bench_grid(c: &mut Criterion, name: &str, grid: Grid) {
    let start = Point { row: 0, col: 0 };
    let goal = Point {
        row: grid.rows() - 1,
        col: grid.columns() - 1,
    };

    c.bench_function(name, |b| {
        b.iter(|| {
            let (state, _) = PathFinder::new(
                black_box(start),
                black_box(goal),
                black_box(grid.create_storage()),
            )
            .finish(&grid);
            assert!(matches!(state, PathFinderState::PathFound(_)));
        })
    });
}

pub fn empty_small(c: &mut Criterion) {
    bench_grid(c, "empty_21", Grid::new(21, 21));
}

pub fn empty_large(c: &mut Criterion) {
    bench_grid(c, "empty_201", Grid::new(201, 201));
}

pub fn serpentine_small(c: &mut Criterion) {
    bench_grid(c, "serpentine_21", serpentine(21));
}

pub fn serpentine_large(c: &mut Criterion) {
    bench_grid(c, "serpentine_201", serpentine(201));
}

criterion_group!(
    benches,
    empty_small,
    empty_large,
    serpentine_small,
    serpentine_large
);
criterion_main!(benches);
