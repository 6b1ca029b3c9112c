//! # depgraph
//!
//! Directed graphs for dependency analysis. A [`Graph`](graph::Graph) is
//! built by inserting `source -> target` edges between values of any
//! hashable type, and can then be explored with:
//!
//! - depth-first search, rooted at one value or over the whole graph, with
//!   tri-color marking, predecessors and discovery/finish timestamps,
//! - Kosaraju's strongly connected components, together with the acyclic
//!   condensation graph between components.
//!
//! Graphs can be read from the edge lines of a DOT digraph with
//! [`DotReader`](parser::DotReader) and written back with
//! [`Graph::dot`](graph::Graph::dot).
//!
//! ```
//! use depgraph::parser::DotReader;
//!
//! let graph = DotReader::strings()
//!     .read_str("a -> b;\nb -> c;\nc -> b;\nd -> c;")
//!     .unwrap();
//!
//! let components = graph.kosaraju();
//! assert_eq!(components.len(), 3);
//! assert!(components.is_cyclic(&"b".to_string()));
//! ```

pub mod graph;
pub mod parser;
mod typed_vec;

pub use graph::{
    algorithms::{Color, Components, DfsRecord, DfsState, Direction},
    Graph, GraphError, Node, NodeIndex,
};
pub use parser::{DotReader, ParseError};
