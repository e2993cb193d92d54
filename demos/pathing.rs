//! Layered pathfinding demo: route across a walled board, then soften or
//! clear the unit layer and watch the route change.
//!
//! Run: cargo run --bin pathing

use gridstar_core::Point;
use gridstar_demos::{HEIGHT, UNITS, WALLS, WIDTH, demo_board, render};
use gridstar_paths::PathGrid;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(42);
    let board = demo_board(&mut rng, 10);
    let mut grid = PathGrid::new(WIDTH, HEIGHT);

    let starts = [Point::new(0, 0)];
    let goals = [Point::new(WIDTH - 1, HEIGHT - 1)];

    let strict = board.find_path(&mut grid, &starts, &goals);
    println!("everything blocks ({} cells):", strict.len());
    println!("{}", render(&board, &strict));

    // Units are soft: keep them on the board but let the search ignore them.
    let mut soft = board.clone();
    soft.set_blocking(WALLS.mask());
    let through = soft.find_path(&mut grid, &starts, &goals);
    println!("only walls block ({} cells):", through.len());
    println!("{}", render(&soft, &through));

    // Or drop them from the bitmap entirely.
    let mut cleared = board.clone();
    cleared.clear_layer(UNITS);
    let calm = cleared.find_path(&mut grid, &starts, &goals);
    println!("units cleared ({} cells):", calm.len());
    println!("{}", render(&cleared, &calm));
}
