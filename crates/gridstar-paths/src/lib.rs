//! Layered pathfinding for grid-based games.
//!
//! This crate implements a multi-source, multi-target A* shortest-path
//! search over a fixed-size 2D grid with 4-way movement and unit step cost:
//!
//! - **[`PathGrid`]** owns the precomputed topology (per-cell neighbor
//!   lists), the per-layer blocking ranges, and the node caches reused by
//!   every search, so repeated queries incur zero allocations after warm-up.
//! - **[`Layer`] / [`LayerMask`]** describe obstacles: every cell of a
//!   caller-owned bitmap carries one bit per obstacle layer, and each call
//!   to [`PathGrid::find_path`] picks the layers that block it with a
//!   blocking mask.
//! - **Range relief**: a layer given a finite range with
//!   [`PathGrid::set_layer_range`] stops blocking once a path has covered
//!   more than that Manhattan distance from its originating start.
//! - **[`clear_layer`]** bulk-clears one layer from a bitmap in place.
//!
//! Searches are synchronous and deterministic. `PathGrid` hands out no
//! interior mutability; concurrent use means one grid per thread or an
//! external lock.

mod astar;
mod distance;
mod error;
mod layers;
mod pathgrid;

pub use distance::manhattan;
pub use error::{PathError, Result};
pub use layers::{Layer, LayerMask, Layers, clear_layer};
pub use pathgrid::PathGrid;
