//! Shared scenario helpers for the gridstar demo binaries.
//!
//! Builds a small walled board with scattered units and renders boards and
//! paths as text.

use gridstar_board::Board;
use gridstar_core::Point;
use gridstar_paths::Layer;
use rand::{Rng, RngExt};

pub const WIDTH: i32 = 24;
pub const HEIGHT: i32 = 12;

/// Obstacle layers used by the demos.
pub const WALLS: Layer = Layer::new(0);
pub const UNITS: Layer = Layer::new(1);

/// A board split by a wall with a single doorway, with roughly `density`
/// percent of the remaining cells covered by units.
///
/// The top-left and bottom-right corners are kept free so the demos can
/// route between them.
pub fn demo_board(rng: &mut impl Rng, density: u32) -> Board {
    let mut board = Board::new(WIDTH, HEIGHT);
    let wall_x = WIDTH / 2;
    let door_y = rng.random_range(1..HEIGHT - 1);
    for y in 0..HEIGHT {
        if y != door_y {
            board.add_obstacle(Point::new(wall_x, y), WALLS);
        }
    }
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if x == wall_x || (x, y) == (0, 0) || (x, y) == (WIDTH - 1, HEIGHT - 1) {
                continue;
            }
            if rng.random_range(0..100u32) < density {
                board.add_obstacle(Point::new(x, y), UNITS);
            }
        }
    }
    board
}

/// Render the board as text with `path` overlaid.
///
/// Walls print as `#`, units as `o`, the path as `*` with `S` and `G` on
/// its endpoints.
pub fn render(board: &Board, path: &[Point]) -> String {
    let mut out = String::new();
    for y in 0..board.height() {
        for x in 0..board.width() {
            let p = Point::new(x, y);
            let glyph = if path.first() == Some(&p) {
                'S'
            } else if path.len() > 1 && path.last() == Some(&p) {
                'G'
            } else if path.contains(&p) {
                '*'
            } else {
                match board.at(p) {
                    Some(c) if c.contains(WALLS.mask()) => '#',
                    Some(c) if c.contains(UNITS.mask()) => 'o',
                    _ => '.',
                }
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
