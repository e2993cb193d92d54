//! Host-side obstacle bookkeeping for gridstar.
//!
//! [`Board`] owns the per-cell obstacle bitmap a game feeds into searches,
//! together with the blocking mask those searches run under. It is the
//! mutable-world companion to `gridstar_paths::PathGrid`, which owns the
//! immutable topology and the search caches.

mod board;

pub use board::Board;
