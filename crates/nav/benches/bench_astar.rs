use std::hint::black_box;
use std::time::Instant;

use islewalk_common::TileCoord;
use islewalk_nav::{OccupancyGrid, Pathfinder, SearchConfig};

/// Square grid with every fourth column walled off except for one gap,
/// alternating between the top and bottom rows.
fn make_serpentine(size: u32) -> OccupancyGrid {
    let mut grid = OccupancyGrid::new(size, size).expect("non-zero size");
    for (n, x) in (2..size as i32).step_by(4).enumerate() {
        let gap = if n % 2 == 0 { size as i32 - 1 } else { 0 };
        for y in 0..size as i32 {
            if y != gap {
                grid.set_blocked(TileCoord::new(x, y), true);
            }
        }
    }
    grid
}

fn bench_open(size: u32, iterations: usize) {
    let grid = OccupancyGrid::new(size, size).expect("non-zero size");
    let finder = Pathfinder::default();
    let goal = TileCoord::new(size as i32 - 1, size as i32 - 1);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(finder.search(black_box(TileCoord::new(0, 0)), black_box(goal), &grid));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  open {size}x{size} ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_serpentine(size: u32, iterations: usize) {
    let grid = make_serpentine(size);
    let finder = Pathfinder::new(SearchConfig {
        max_iterations: usize::MAX,
    });
    let goal = TileCoord::new(size as i32 - 1, 0);

    let start = Instant::now();
    let mut len = 0;
    for _ in 0..iterations {
        len = black_box(finder.search(black_box(TileCoord::new(0, 0)), black_box(goal), &grid))
            .map_or(0, |p| p.len());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  serpentine {size}x{size} (path {len}, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_unreachable(size: u32, iterations: usize) {
    let mut grid = OccupancyGrid::new(size, size).expect("non-zero size");
    let goal = TileCoord::new(size as i32 - 1, size as i32 - 1);
    grid.set_blocked(goal, true);
    let finder = Pathfinder::default();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = black_box(finder.search(black_box(TileCoord::new(0, 0)), black_box(goal), &grid));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  unreachable {size}x{size} ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== A* Benchmarks ===\n");

    println!("Open grid, corner to corner:");
    bench_open(16, 10000);
    bench_open(64, 1000);
    bench_open(256, 100);

    println!("\nSerpentine walls:");
    bench_serpentine(16, 1000);
    bench_serpentine(64, 100);

    println!("\nUnreachable goal (exhaust or cap):");
    bench_unreachable(32, 100);
    bench_unreachable(128, 10);

    println!("\n=== Done ===");
}
