//! The obstacle board a host mutates between searches.

use gridstar_core::Point;
use gridstar_paths::{Layer, LayerMask, PathGrid, clear_layer};

/// A `width x height` bitmap of obstacle layers plus the blocking mask to
/// search it with.
///
/// Cells are stored row-major, matching what
/// [`PathGrid::find_path`] expects. A new board is empty and blocks on every
/// layer until [`set_blocking`](Self::set_blocking) narrows the mask.
///
/// Mutators taking a point silently ignore coordinates off the board, so
/// hosts can stamp shapes that overlap the edge without pre-clipping.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<LayerMask>,
    blocking: LayerMask,
}

impl Board {
    /// Create an empty board.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![LayerMask::NONE; (width as usize) * (height as usize)],
            blocking: LayerMask::ALL,
        }
    }

    /// Board width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Board height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `p` lies on the board.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }

    /// The layers occupying `p`, or `None` off the board.
    pub fn at(&self, p: Point) -> Option<LayerMask> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// The raw bitmap, one mask per cell in row-major order.
    pub fn cells(&self) -> &[LayerMask] {
        &self.cells
    }

    /// Put an obstacle on `layer` at `p`.
    pub fn add_obstacle(&mut self, p: Point, layer: Layer) {
        if self.contains(p) {
            let i = self.index(p);
            self.cells[i] = self.cells[i] | layer.mask();
        }
    }

    /// Remove the `layer` obstacle at `p`.
    pub fn remove_obstacle(&mut self, p: Point, layer: Layer) {
        if self.contains(p) {
            let i = self.index(p);
            self.cells[i] = self.cells[i] & !layer.mask();
        }
    }

    /// Put obstacles on `layer` at every listed point.
    pub fn add_obstacles(&mut self, points: &[Point], layer: Layer) {
        for &p in points {
            self.add_obstacle(p, layer);
        }
    }

    /// Replace the whole bitmap.
    ///
    /// # Panics
    /// Panics if `cells` does not cover the board exactly.
    pub fn load(&mut self, cells: &[LayerMask]) {
        assert_eq!(cells.len(), self.cells.len(), "bitmap must cover the board");
        self.cells.copy_from_slice(cells);
    }

    /// Clear one layer from every cell.
    pub fn clear_layer(&mut self, layer: Layer) {
        clear_layer(&mut self.cells, layer);
    }

    /// Clear every layer in `mask` from every cell.
    pub fn clear(&mut self, mask: LayerMask) {
        for cell in self.cells.iter_mut() {
            *cell = *cell & !mask;
        }
    }

    /// Choose which layers block subsequent searches through this board.
    pub fn set_blocking(&mut self, mask: LayerMask) {
        self.blocking = mask;
    }

    /// The current blocking mask.
    pub fn blocking(&self) -> LayerMask {
        self.blocking
    }

    /// Search `grid` through this board's obstacles and blocking mask.
    ///
    /// A start that is already a goal short-circuits to a single-point path
    /// before the engine runs. Any engine refusal, configuration error or
    /// unreachable goal alike, comes back as an empty path; configuration
    /// diagnostics are logged by the engine.
    pub fn find_path(&self, grid: &mut PathGrid, starts: &[Point], goals: &[Point]) -> Vec<Point> {
        for &s in starts {
            if goals.contains(&s) {
                return vec![s];
            }
        }
        match grid.find_path(starts, goals, &self.cells, self.blocking) {
            Ok(Some(path)) => path,
            Ok(None) | Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALLS: Layer = Layer::new(0);
    const UNITS: Layer = Layer::new(1);

    #[test]
    fn new_board_is_empty_and_fully_blocking() {
        let board = Board::new(4, 3);
        assert_eq!((board.width(), board.height()), (4, 3));
        assert_eq!(board.cells().len(), 12);
        assert!(board.cells().iter().all(|c| c.is_empty()));
        assert_eq!(board.blocking(), LayerMask::ALL);
    }

    #[test]
    fn obstacles_come_and_go_per_layer() {
        let mut board = Board::new(4, 4);
        let p = Point::new(2, 1);
        board.add_obstacle(p, WALLS);
        board.add_obstacle(p, UNITS);
        let bits: Vec<u32> = board.at(p).unwrap().layers().map(Layer::bit).collect();
        assert_eq!(bits, vec![0, 1]);

        board.remove_obstacle(p, WALLS);
        assert_eq!(board.at(p), Some(UNITS.mask()));

        // Off-board coordinates are ignored, not errors.
        board.add_obstacle(Point::new(-1, 0), WALLS);
        board.remove_obstacle(Point::new(4, 0), WALLS);
        assert_eq!(board.at(Point::new(-1, 0)), None);
    }

    #[test]
    fn bulk_add_and_clear() {
        let mut board = Board::new(5, 5);
        let column: Vec<Point> = (0..5).map(|y| Point::new(2, y)).collect();
        board.add_obstacles(&column, WALLS);
        board.add_obstacle(Point::new(2, 2), UNITS);

        board.clear_layer(WALLS);
        assert!(board.at(Point::new(2, 0)).unwrap().is_empty());
        assert_eq!(board.at(Point::new(2, 2)), Some(UNITS.mask()));

        board.add_obstacles(&column, WALLS);
        board.clear(LayerMask::ALL);
        assert!(board.cells().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn load_replaces_the_bitmap() {
        let mut board = Board::new(3, 2);
        let image = vec![
            WALLS.mask(),
            LayerMask::NONE,
            UNITS.mask(),
            LayerMask::NONE,
            WALLS.mask() | UNITS.mask(),
            LayerMask::NONE,
        ];
        board.load(&image);
        assert_eq!(board.cells(), &image[..]);
    }

    #[test]
    #[should_panic(expected = "bitmap must cover the board")]
    fn load_rejects_mismatched_bitmaps() {
        let mut board = Board::new(3, 2);
        board.load(&[LayerMask::NONE; 5]);
    }

    #[test]
    fn find_path_uses_board_state() {
        let mut board = Board::new(5, 5);
        let mut grid = PathGrid::new(5, 5);
        let start = [Point::new(0, 2)];
        let goal = [Point::new(4, 2)];

        let open = board.find_path(&mut grid, &start, &goal);
        assert_eq!(open.len(), 5);

        let wall: Vec<Point> = (0..5).map(|y| Point::new(2, y)).collect();
        board.add_obstacles(&wall, WALLS);
        assert!(board.find_path(&mut grid, &start, &goal).is_empty());

        // Narrowing the blocking mask turns the wall layer off.
        board.set_blocking(UNITS.mask());
        assert_eq!(board.find_path(&mut grid, &start, &goal).len(), 5);
    }

    #[test]
    fn trivial_overlap_short_circuits() {
        let board = Board::new(5, 5);
        let mut grid = PathGrid::new(5, 5);
        let p = Point::new(3, 3);
        let path = board.find_path(&mut grid, &[Point::new(0, 0), p], &[p, Point::new(4, 4)]);
        assert_eq!(path, vec![p]);
    }

    #[test]
    fn engine_errors_become_empty_paths() {
        let board = Board::new(5, 5);
        // A grid of different dimensions rejects the board's bitmap.
        let mut grid = PathGrid::new(4, 4);
        let path = board.find_path(&mut grid, &[Point::new(0, 0)], &[Point::new(3, 3)]);
        assert!(path.is_empty());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn board_round_trip() {
        let mut board = Board::new(4, 3);
        board.add_obstacle(Point::new(1, 1), Layer::new(0));
        board.add_obstacle(Point::new(3, 2), Layer::new(5));
        board.set_blocking(Layer::new(0).mask() | Layer::new(5).mask());
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
