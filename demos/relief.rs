//! Range-relief demo: a wall stops mattering once a path has worked far
//! enough from home.
//!
//! Run: cargo run --bin relief

use gridstar_board::Board;
use gridstar_core::Point;
use gridstar_demos::{WALLS, render};
use gridstar_paths::PathGrid;

const W: i32 = 17;
const H: i32 = 7;

fn main() {
    env_logger::init();
    let mut board = Board::new(W, H);
    let foot = Point::new(W / 2, 0);
    for y in 0..H {
        board.add_obstacle(foot.shift(0, y), WALLS);
    }
    let mut grid = PathGrid::new(W, H);
    let starts = [Point::new(0, H / 2)];
    let goals = [Point::new(W - 1, H / 2)];

    let sealed = board.find_path(&mut grid, &starts, &goals);
    println!("unlimited range ({} cells):", sealed.len());
    println!("{}", render(&board, &sealed));

    // From the start, the nearest wall cell sits 8 away and the farthest 11.
    for range in [11, 8, 7] {
        grid.set_layer_range(WALLS, range);
        let path = board.find_path(&mut grid, &starts, &goals);
        println!("wall range {range} ({} cells):", path.len());
        println!("{}", render(&board, &path));
    }

    grid.reset_layer_range(WALLS);
    let sealed_again = board.find_path(&mut grid, &starts, &goals);
    println!("range reset ({} cells):", sealed_again.len());
}
