use gridstar_core::Point;

use crate::layers::{Layer, LayerRanges};

// ---------------------------------------------------------------------------
// Internal node + open-set entry for the search
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    /// Best total estimate (steps so far + heuristic) recorded for the cell.
    pub(crate) best: i32,
    /// Predecessor cell index; `usize::MAX` marks a seeded start.
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    /// Permanently expanded this search; later queue entries are stale.
    pub(crate) closed: bool,
    pub(crate) start: bool,
    pub(crate) goal: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            best: 0,
            parent: usize::MAX,
            generation: 0,
            closed: false,
            start: false,
            goal: false,
        }
    }
}

/// Open-set entry, ordered by total estimate for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct OpenNode {
    pub(crate) idx: usize,
    pub(crate) sofar: i32,
    pub(crate) est: i32,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest total first.
        (other.est + other.sofar).cmp(&(self.est + self.sofar))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// In-bounds neighbors of one cell, in fixed expansion order.
#[derive(Clone, Copy, Default)]
pub(crate) struct CellNeighbors {
    cells: [usize; 4],
    len: u8,
}

impl CellNeighbors {
    fn push(&mut self, idx: usize) {
        self.cells[self.len as usize] = idx;
        self.len += 1;
    }

    #[inline]
    pub(crate) fn cells(&self) -> &[usize] {
        &self.cells[..self.len as usize]
    }
}

// ---------------------------------------------------------------------------
// PathGrid
// ---------------------------------------------------------------------------

/// Central coordinator for layered pathfinding on a `width x height` grid.
///
/// `PathGrid` owns everything that outlives a single search: the precomputed
/// adjacency table, the per-layer blocking ranges, and the node caches reused
/// by every call so that repeated searches incur no allocations after the
/// first use.
///
/// Coordinates are 0-based with `(0, 0)` in the top-left corner; cells are
/// indexed row-major.
pub struct PathGrid {
    pub(crate) width: i32,
    pub(crate) height: i32,
    /// Per-cell in-bounds neighbor indices, in +x, -x, +y, -y order.
    pub(crate) adjacency: Vec<CellNeighbors>,
    pub(crate) ranges: LayerRanges,
    // search caches
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) goal_buf: Vec<Point>,
}

impl PathGrid {
    /// Create a new `PathGrid` for the given dimensions.
    ///
    /// Negative dimensions are treated as zero. Every layer starts with
    /// unlimited blocking range.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let len = (width as usize) * (height as usize);
        let mut adjacency = Vec::new();
        fill_adjacency(&mut adjacency, width, height);
        Self {
            width,
            height,
            adjacency,
            ranges: LayerRanges::new(len as i32),
            nodes: vec![Node::default(); len],
            generation: 0,
            goal_buf: Vec::new(),
        }
    }

    /// Replace the grid dimensions, rebuilding the adjacency table.
    ///
    /// Every layer's blocking range is reset to unlimited. If the new size
    /// fits within existing capacity the node cache is preserved and only the
    /// generation counter is bumped so stale entries are ignored; otherwise
    /// it is reallocated.
    pub fn resize(&mut self, width: i32, height: i32) {
        let width = width.max(0);
        let height = height.max(0);
        let len = (width as usize) * (height as usize);
        self.width = width;
        self.height = height;
        fill_adjacency(&mut self.adjacency, width, height);
        self.ranges.reset_all(len as i32);

        if len <= self.nodes.len() {
            self.generation = self.generation.wrapping_add(1);
            return;
        }
        self.nodes.clear();
        self.nodes.resize(len, Node::default());
        self.generation = 0;
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -----------------------------------------------------------------------
    // Per-layer blocking ranges
    // -----------------------------------------------------------------------

    /// Limit how far obstacles on `layer` block.
    ///
    /// An obstacle on `layer` stops blocking a path once the Manhattan
    /// distance from the path's originating start cell to the obstacle cell
    /// strictly exceeds `range`. A range equal to the total cell count is
    /// indistinguishable from unlimited.
    pub fn set_layer_range(&mut self, layer: Layer, range: i32) {
        self.ranges.set(layer, range);
    }

    /// Restore unlimited blocking range for `layer`.
    pub fn reset_layer_range(&mut self, layer: Layer) {
        self.ranges.reset(layer);
    }

    /// The configured blocking range of `layer`, or `None` when unlimited.
    pub fn layer_range(&self, layer: Layer) -> Option<i32> {
        self.ranges.get(layer)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.x >= self.width || p.y < 0 || p.y >= self.height {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width as usize) as i32;
        let y = (idx / self.width as usize) as i32;
        Point::new(x, y)
    }
}

/// Rebuild the per-cell neighbor table for the given dimensions.
///
/// Both horizontal and vertical neighbors are bounds-checked against their
/// own axis, so non-square grids get the full 4-neighborhood everywhere.
fn fill_adjacency(adjacency: &mut Vec<CellNeighbors>, width: i32, height: i32) {
    const DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    let len = (width as usize) * (height as usize);
    adjacency.clear();
    adjacency.resize(len, CellNeighbors::default());
    for y in 0..height {
        for x in 0..width {
            let cell = &mut adjacency[(y * width + x) as usize];
            for (dx, dy) in DIRS {
                let (nx, ny) = (x + dx, y + dy);
                if nx >= 0 && nx < width && ny >= 0 && ny < height {
                    cell.push((ny * width + nx) as usize);
                }
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathGrid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.width, self.height).serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathGrid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (width, height) = <(i32, i32)>::deserialize(deserializer)?;
        Ok(PathGrid::new(width, height))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pathgrid_round_trip() {
        let mut grid = PathGrid::new(7, 5);
        grid.set_layer_range(Layer::new(2), 3);
        let json = serde_json::to_string(&grid).unwrap();
        let back: PathGrid = serde_json::from_str(&json).unwrap();
        assert_eq!((back.width(), back.height()), (7, 5));
        // Caches and layer ranges are freshly initialized (not serialized).
        assert_eq!(back.generation, 0);
        assert_eq!(back.nodes.len(), 35);
        assert_eq!(back.layer_range(Layer::new(2)), None);
    }
}
