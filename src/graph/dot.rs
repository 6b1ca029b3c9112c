//! Serialization of a [`Graph`] to a minimal DOT digraph.
//!
//! One `"source" -> "target";` line is written per edge, and nodes without
//! any edge get a line of their own so they are not lost. The edge lines are
//! the exact shape [`DotReader`](crate::parser::DotReader) accepts, so a graph
//! written here reads back with the same edges.
//!
//! That only holds for names the reader can split back out of a line: a name
//! must be non-empty and contain neither `->` nor a line break. Writing a
//! graph with any other name fails with [`GraphError::UnwritableName`]
//! instead of producing a line the reader would skip.

use std::{
    fmt::{self, Display},
    io,
};

use super::{Graph, GraphError};

/// Whether `name`, written between quotes, is parsed back as itself.
pub fn is_writable_name(name: &str) -> bool {
    !name.is_empty() && !name.contains("->") && !name.contains(['\n', '\r'])
}

fn quoted(name: String) -> Result<String, GraphError> {
    if is_writable_name(&name) {
        Ok(format!("\"{name}\""))
    } else {
        Err(GraphError::UnwritableName { name })
    }
}

impl<T> Graph<T> {
    /// Statement lines of the digraph body, without indentation or `;`.
    fn dot_statements<'s>(
        &'s self,
        node_map: &'s impl Fn(&T) -> String,
    ) -> impl Iterator<Item = Result<String, GraphError>> + 's {
        let isolated = self
            .nodes
            .iter()
            .filter(|(_, adjacency)| adjacency.uses.is_empty() && adjacency.used_by.is_empty())
            .map(move |(value, _)| quoted(node_map(value)));
        let edges = self.edges().map(move |(source, target)| -> Result<String, GraphError> {
            Ok(format!(
                "{} -> {}",
                quoted(node_map(source))?,
                quoted(node_map(target))?
            ))
        });
        isolated.chain(edges)
    }

    /// Writes the graph to `writer`. An unwritable name is reported as
    /// [`io::ErrorKind::InvalidInput`] wrapping the [`GraphError`].
    pub fn dot_serialize_io(
        &self,
        writer: &mut impl io::Write,
        node_map: &impl Fn(&T) -> String,
    ) -> Result<(), io::Error> {
        writeln!(writer, "digraph {{")?;
        for statement in self.dot_statements(node_map) {
            let statement =
                statement.map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
            writeln!(writer, "  {statement};")?;
        }
        writeln!(writer, "}}")?;
        Ok(())
    }

    /// Writes the graph to `writer`. An unwritable name is reported as
    /// [`fmt::Error`]; use [`Graph::dot`] to learn which name it was.
    pub fn dot_serialize_fmt(
        &self,
        writer: &mut impl fmt::Write,
        node_map: &impl Fn(&T) -> String,
    ) -> fmt::Result {
        writeln!(writer, "digraph {{")?;
        for statement in self.dot_statements(node_map) {
            writeln!(writer, "  {};", statement.map_err(|_| fmt::Error)?)?;
        }
        writeln!(writer, "}}")
    }
}

impl<T: Display> Graph<T> {
    /// DOT text using each value's `Display` form as its node name.
    pub fn dot(&self) -> Result<String, GraphError> {
        let mut out = String::from("digraph {\n");
        for statement in self.dot_statements(&|v: &T| v.to_string()) {
            out.push_str("  ");
            out.push_str(&statement?);
            out.push_str(";\n");
        }
        out.push_str("}\n");
        Ok(out)
    }
}
