//! # Graph algorithms
//!
//! All algorithms borrow a finished [`Graph`](crate::graph::Graph) immutably
//! and keep their bookkeeping in a per-call state value, so several runs can
//! coexist over the same graph.
//!
//! ## Available Algorithms
//!
//! ### Traversal
//! - [`dfs`]: depth-first search with tri-color marking, predecessors and
//!   discovery/finish timestamps, rooted or over the whole graph.
//!
//! ### Components
//! - [`kosaraju`]: strongly connected components and their condensation.
//! - [`topological_order`]: Kahn ordering of a condensation.

pub mod dfs;
pub mod kosaraju;
pub mod topological_order;

pub use dfs::{Color, DfsRecord, DfsState, Direction};
pub use kosaraju::Components;
