//! **gridstar-core** — core geometry types for the gridstar pathfinding
//! engine.
//!
//! This crate holds the primitives shared by the rest of the workspace,
//! chiefly [`Point`], the integer grid coordinate type.

pub mod geom;

pub use geom::Point;
