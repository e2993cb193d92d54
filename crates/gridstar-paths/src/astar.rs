use std::collections::BinaryHeap;

use gridstar_core::Point;

use crate::PathGrid;
use crate::distance::manhattan;
use crate::error::{PathError, Result};
use crate::layers::LayerMask;
use crate::pathgrid::{Node, OpenNode};

impl PathGrid {
    /// Find a shortest path from any start to any goal using A*.
    ///
    /// The search runs over every start at once with unit step cost and a
    /// Manhattan heuristic toward the nearest goal; the first goal reached
    /// ends it. `obstacles` holds one [`LayerMask`] per cell, row-major, and
    /// `blocking` selects which of its layers block this call. Layers given
    /// a finite range with [`set_layer_range`](Self::set_layer_range) stop
    /// blocking once a path has covered more than that Manhattan distance
    /// from its originating start.
    ///
    /// A goal cell is accepted before its obstacle bits are tested, so a
    /// goal covered by blocking layers is still reachable from an adjacent
    /// cell.
    ///
    /// Returns `Ok(Some(path))` with the chosen start first and the chosen
    /// goal last, `Ok(None)` when no goal can be reached, and a
    /// [`PathError`] when the call is misconfigured: a coordinate in both
    /// endpoint lists, an endpoint off the grid, or a bitmap of the wrong
    /// length. Configuration errors are also logged.
    pub fn find_path(
        &mut self,
        starts: &[Point],
        goals: &[Point],
        obstacles: &[LayerMask],
        blocking: LayerMask,
    ) -> Result<Option<Vec<Point>>> {
        if obstacles.len() != self.len() {
            return Err(config_error(PathError::BitmapLen {
                expected: self.len(),
                got: obstacles.len(),
            }));
        }

        // Bump generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;
        let sentinel = self.len() as i32;

        // Record goals as per-node flags for the O(1) membership test, plus
        // a point list for heuristic scans.
        self.goal_buf.clear();
        for &g in goals {
            let Some(gi) = self.idx(g) else {
                return Err(config_error(PathError::OutOfBounds(g)));
            };
            self.nodes[gi] = Node {
                best: sentinel,
                parent: usize::MAX,
                generation: cur_gen,
                closed: false,
                start: false,
                goal: true,
            };
            self.goal_buf.push(g);
        }

        // Seed every start with its estimate toward the nearest goal.
        let mut open: BinaryHeap<OpenNode> = BinaryHeap::new();
        for &s in starts {
            let Some(si) = self.idx(s) else {
                return Err(config_error(PathError::OutOfBounds(s)));
            };
            if self.nodes[si].generation == cur_gen && self.nodes[si].goal {
                return Err(config_error(PathError::SharedStartGoal(s)));
            }
            let est = nearest_goal_estimate(&self.goal_buf, s, sentinel);
            self.nodes[si] = Node {
                best: est,
                parent: usize::MAX,
                generation: cur_gen,
                closed: false,
                start: true,
                goal: false,
            };
            open.push(OpenNode { idx: si, sofar: 0, est });
        }

        let selected = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search None;
            };
            let ci = current.idx;

            // Lazy deletion: a cell can sit in the heap under several keys;
            // only its first pop survives this check.
            if self.nodes[ci].closed {
                continue;
            }
            self.nodes[ci].closed = true;

            let traveled = current.sofar + 1;
            let neighbors = self.adjacency[ci];
            for &ni in neighbors.cells() {
                // A goal is accepted before its obstacle bits are tested, so
                // goals covered by blocking layers stay reachable.
                if self.nodes[ni].generation == cur_gen && self.nodes[ni].goal {
                    self.nodes[ni].parent = ci;
                    break 'search Some(ni);
                }

                let mut blocked = obstacles[ni] & blocking;
                if !blocked.is_empty() {
                    // Layers with a configured range stop blocking once this
                    // path has ranged far enough from its own start.
                    let origin = self.point(self.chain_origin(ci));
                    let covered = manhattan(origin, self.point(ni));
                    for layer in blocked.layers() {
                        if let Some(range) = self.ranges.get(layer) {
                            if covered > range {
                                blocked = blocked & !layer.mask();
                            }
                        }
                    }
                }
                if !blocked.is_empty() {
                    continue;
                }

                let est = nearest_goal_estimate(&self.goal_buf, self.point(ni), sentinel);
                let total = traveled + est;

                let n = &mut self.nodes[ni];
                if n.generation != cur_gen {
                    *n = Node {
                        best: sentinel,
                        parent: usize::MAX,
                        generation: cur_gen,
                        closed: false,
                        start: false,
                        goal: false,
                    };
                }
                if n.closed && total >= n.best {
                    continue;
                }
                if total < n.best {
                    n.best = total;
                    n.parent = ci;
                    open.push(OpenNode { idx: ni, sofar: traveled, est });
                }
            }
        };

        let Some(goal_idx) = selected else {
            return Ok(None);
        };

        // Walk predecessor links back to a start cell.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        loop {
            path.push(self.point(ci));
            let node = &self.nodes[ci];
            if node.start {
                break;
            }
            assert!(
                node.parent != usize::MAX && path.len() <= self.nodes.len(),
                "path reconstruction failed to reach a start cell"
            );
            ci = node.parent;
        }
        path.reverse();
        Ok(Some(path))
    }

    /// Index of the start cell the path through `idx` originates from.
    ///
    /// Follows predecessor links up to the parentless root. Every link on
    /// the chain was written during the current search.
    fn chain_origin(&self, idx: usize) -> usize {
        let mut cur = idx;
        for _ in 0..self.nodes.len() {
            let parent = self.nodes[cur].parent;
            if parent == usize::MAX {
                return cur;
            }
            cur = parent;
        }
        panic!("predecessor chain does not terminate");
    }
}

/// Smallest Manhattan distance from `p` to any goal, or `default` when the
/// goal list is empty.
fn nearest_goal_estimate(goals: &[Point], p: Point, default: i32) -> i32 {
    goals.iter().map(|&g| manhattan(p, g)).min().unwrap_or(default)
}

fn config_error(err: PathError) -> PathError {
    log::error!("{err}");
    err
}
