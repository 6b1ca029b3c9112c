//! # Edge list reader
//!
//! A deliberately small reader for the edge lines of a DOT digraph, as
//! produced by dependency tools (`cargo depgraph`, `jdeps -dotoutput`, ...).
//! It does not parse the DOT language: every input line is looked at on its
//! own, and only lines of the shape
//!
//! ```text
//!   "source" -> "target";
//! ```
//!
//! contribute an edge. Quotes around either side and the trailing `;` are
//! optional. Everything else (the `digraph {` header, the closing brace,
//! attribute lines, lines with more than one arrow) is silently skipped.
//!
//! Each accepted line goes through a caller supplied conversion for both
//! endpoints, then through an optional filter, and finally into
//! [`Graph::add`].
//!
//! ```
//! use depgraph::parser::DotReader;
//!
//! let text = r#"digraph "deps" {
//!   "app" -> "core";
//!   "app" -> "std";
//!   "core" -> "std";
//! }"#;
//!
//! let graph = DotReader::strings()
//!     .with_filter(|name: &String| name != "std")
//!     .read_str(text)
//!     .unwrap();
//!
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.n_edges(), 1);
//! ```

use std::{
    convert::Infallible,
    fs::File,
    hash::Hash,
    io::{BufRead, BufReader},
    path::Path,
};

use itertools::Itertools;
use tracing::{debug, trace};

use crate::graph::Graph;

pub mod error;
pub use error::ParseError;

/// Builds a `Graph<String>` from edge statements written inline.
///
/// Statements are separated by `;`. Evaluates to
/// `Result<Graph<String>, ParseError<Infallible>>`.
///
/// ```
/// let graph = depgraph::dot!(a -> b; b -> c;).unwrap();
/// assert_eq!(graph.n_edges(), 2);
/// ```
#[macro_export]
macro_rules! dot {
    ($($t:tt)*) => {
        $crate::parser::DotReader::strings().read_str(&stringify!($($t)*).replace(';', ";\n"))
    };
}

/// Counters collected while reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    pub lines: usize,
    pub edges: usize,
    pub skipped: usize,
    pub filtered: usize,
}

/// Reads edge lists into a [`Graph<T>`].
///
/// `E` is the error of the value conversion; readers built with
/// [`DotReader::new`] cannot fail on conversion.
pub struct DotReader<'f, T, E = Infallible> {
    convert: Box<dyn Fn(&str) -> Result<T, E> + 'f>,
    filter: Option<Box<dyn Fn(&T) -> bool + 'f>>,
}

impl DotReader<'static, String> {
    /// A reader keeping node names as they appear in the input.
    pub fn strings() -> Self {
        DotReader::new(|s: &str| s.to_string())
    }
}

impl<'f, T> DotReader<'f, T> {
    pub fn new(convert: impl Fn(&str) -> T + 'f) -> Self {
        DotReader::try_new(move |s| Ok(convert(s)))
    }
}

impl<'f, T, E> DotReader<'f, T, E> {
    /// A reader whose conversion may reject a node name, aborting the read
    /// with [`ParseError::Value`].
    pub fn try_new(convert: impl Fn(&str) -> Result<T, E> + 'f) -> Self {
        DotReader {
            convert: Box::new(convert),
            filter: None,
        }
    }

    /// Keeps only edges whose two converted endpoints pass `filter`.
    /// Replaces any earlier filter.
    pub fn with_filter(mut self, filter: impl Fn(&T) -> bool + 'f) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    fn accepts(&self, from: &T, to: &T) -> bool {
        self.filter
            .as_ref()
            .map_or(true, |filter| filter(from) && filter(to))
    }

    fn convert(&self, text: &str, line: usize) -> Result<T, ParseError<E>> {
        (self.convert)(text).map_err(|source| ParseError::Value {
            line,
            text: text.to_string(),
            source,
        })
    }
}

impl<T: Hash + Eq, E> DotReader<'_, T, E> {
    pub fn read(&self, reader: impl BufRead) -> Result<Graph<T>, ParseError<E>> {
        let mut graph = Graph::new();
        self.read_into(reader, &mut graph)?;
        Ok(graph)
    }

    /// Adds the edges found in `reader` to an existing graph.
    pub fn read_into(
        &self,
        reader: impl BufRead,
        graph: &mut Graph<T>,
    ) -> Result<ReadStats, ParseError<E>> {
        let mut stats = ReadStats::default();

        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            let number = n + 1;
            stats.lines = number;

            let Some((from, to)) = parse_edge_line(&line) else {
                trace!(line = number, "no single edge on line");
                stats.skipped += 1;
                continue;
            };

            let from = self.convert(from, number)?;
            let to = self.convert(to, number)?;
            if !self.accepts(&from, &to) {
                stats.filtered += 1;
                continue;
            }

            graph.add(from, [to]);
            stats.edges += 1;
        }

        debug!(
            lines = stats.lines,
            edges = stats.edges,
            skipped = stats.skipped,
            filtered = stats.filtered,
            nodes = graph.len(),
            "edge list read"
        );
        Ok(stats)
    }

    pub fn read_str(&self, s: &str) -> Result<Graph<T>, ParseError<E>> {
        self.read(s.as_bytes())
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<Graph<T>, ParseError<E>> {
        let file = File::open(path)?;
        self.read(BufReader::new(file))
    }
}

/// Splits one line into its source and target names.
///
/// Returns `None` unless the line has exactly one `->` separating a non-empty
/// name on each side. Arrows at the very end of the line are ignored, so
/// `a -> b ->` still reads as `a -> b`.
///
/// ```
/// use depgraph::parser::parse_edge_line;
///
/// assert_eq!(parse_edge_line(r#"  "foo" -> "bar";"#), Some(("foo", "bar")));
/// assert_eq!(parse_edge_line("a -> b -> c"), None);
/// ```
pub fn parse_edge_line(line: &str) -> Option<(&str, &str)> {
    let (from, to) = line.trim_end_matches("->").split("->").collect_tuple()?;
    let from = unquote(from.trim());
    let to = unquote(remove_trailing(to.trim(), ';').trim());
    if from.is_empty() || to.is_empty() {
        return None;
    }
    Some((from, to))
}

/// Strips a single leading and a single trailing quote.
fn unquote(s: &str) -> &str {
    remove_leading(remove_trailing(s, '"'), '"')
}

fn remove_trailing(s: &str, c: char) -> &str {
    s.strip_suffix(c).unwrap_or(s)
}

fn remove_leading(s: &str, c: char) -> &str {
    s.strip_prefix(c).unwrap_or(s)
}

#[cfg(test)]
mod tests;
