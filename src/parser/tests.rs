use std::io::{self, BufRead, Read};

use super::{parse_edge_line, DotReader, ParseError, ReadStats};
use crate::graph::Graph;

fn edges(graph: &Graph<String>) -> Vec<(&str, &str)> {
    graph
        .edges()
        .map(|(s, t)| (s.as_str(), t.as_str()))
        .collect()
}

#[test]
fn spacing_and_quotes_do_not_matter() {
    let spaced = DotReader::strings()
        .read_str("\"foo\"         -> \"bar\";")
        .unwrap();
    let tight = DotReader::strings().read_str("\"foo\"->\"bar\";").unwrap();

    assert_eq!(edges(&spaced), [("foo", "bar")]);
    assert_eq!(edges(&spaced), edges(&tight));
}

#[test]
fn reads_a_dependency_digraph() {
    let text = "digraph \"deps\" {\n  \"foo\"         -> \"bar\";\n  \"bar'\"        -> \"baz\";\n}";

    let graph = DotReader::strings().read_str(text).unwrap();

    assert_eq!(edges(&graph), [("foo", "bar"), ("bar'", "baz")]);
    assert_eq!(graph.len(), 4);
}

#[test]
fn line_shapes() {
    assert_eq!(parse_edge_line("a -> b"), Some(("a", "b")));
    assert_eq!(parse_edge_line("a->b;"), Some(("a", "b")));
    assert_eq!(parse_edge_line("  \"a\" -> \"b\" ;  "), Some(("a", "b")));
    assert_eq!(parse_edge_line("\"a b\" -> \"c\""), Some(("a b", "c")));
    // Only one quote is removed from each end.
    assert_eq!(parse_edge_line("\"\"a\"\" -> b"), Some(("\"a\"", "b")));

    assert_eq!(parse_edge_line("digraph {"), None);
    assert_eq!(parse_edge_line("}"), None);
    assert_eq!(parse_edge_line(""), None);
    assert_eq!(parse_edge_line("a -> b -> c;"), None);
    // Empty pieces after trailing arrows do not count.
    assert_eq!(parse_edge_line("a->b->"), Some(("a", "b")));
    assert_eq!(parse_edge_line("a -> b ->->"), Some(("a", "b")));
    assert_eq!(parse_edge_line("a -> b -> "), None);
    assert_eq!(parse_edge_line("->"), None);
    assert_eq!(parse_edge_line("a ->"), None);
    assert_eq!(parse_edge_line("-> b"), None);
    assert_eq!(parse_edge_line("\"\" -> b"), None);
}

#[test]
fn skipped_lines_are_counted() {
    let text = "digraph {\n a -> b;\n a -> b -> c;\n\n c -> d;\n}\n";
    let mut graph = Graph::new();

    let stats = DotReader::strings()
        .read_into(text.as_bytes(), &mut graph)
        .unwrap();

    assert_eq!(
        stats,
        ReadStats {
            lines: 6,
            edges: 2,
            skipped: 4,
            filtered: 0,
        }
    );
    assert_eq!(edges(&graph), [("a", "b"), ("c", "d")]);
}

#[test]
fn duplicate_lines_are_idempotent() {
    let graph = DotReader::strings()
        .read_str("a -> b;\na -> b;\n\"a\" -> \"b\"")
        .unwrap();

    assert_eq!(graph.n_edges(), 1);
    assert_eq!(graph.node(&"b".into()).unwrap().in_degree(), 1);
}

#[test]
fn filter_needs_both_endpoints() {
    let text = "app -> core;\napp -> test_utils;\ntest_utils -> core;\ncore -> alloc;";

    let graph = DotReader::strings()
        .with_filter(|name| !name.starts_with("test"))
        .read_str(text)
        .unwrap();

    assert_eq!(edges(&graph), [("app", "core"), ("core", "alloc")]);
    assert!(!graph.contains(&"test_utils".into()));
}

#[test]
fn converts_values() {
    let graph = DotReader::new(|s| s.len()).read_str("ab -> abc;\nx -> yy;").unwrap();

    let pairs: Vec<_> = graph.edges().map(|(s, t)| (*s, *t)).collect();
    assert_eq!(pairs, [(2, 3), (1, 2)]);
}

#[test]
fn conversion_failure_reports_line() {
    let err = DotReader::try_new(|s| s.parse::<u32>())
        .read_str("digraph {\n1 -> 2;\n3 -> x;\n}")
        .unwrap_err();

    assert_eq!(err.line(), Some(3));
    match &err {
        ParseError::Value { text, .. } => assert_eq!(text, "x"),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(err.to_string(), "line 3: cannot convert \"x\"");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn io_failures_surface() {
    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    let reader: Box<dyn BufRead> = Box::new(io::BufReader::new(Broken));
    let err = DotReader::strings().read(reader).unwrap_err();

    assert!(matches!(err, ParseError::Io(_)));
    assert_eq!(err.line(), None);
}

#[test]
fn invalid_utf8_is_an_io_error() {
    let bytes: &[u8] = b"a -> b;\n\xff\xfe -> c;\n";

    let err = DotReader::strings().read(bytes).unwrap_err();

    assert!(matches!(err, ParseError::Io(_)));
}

#[test]
fn reads_files() {
    let path = std::env::temp_dir().join(format!("depgraph-read-{}.dot", std::process::id()));
    std::fs::write(&path, "digraph {\n  \"a\" -> \"b\";\n}\n").unwrap();

    let graph = DotReader::strings().read_file(&path);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(edges(&graph.unwrap()), [("a", "b")]);

    let missing = DotReader::strings().read_file(path.with_extension("missing"));
    assert!(matches!(missing, Err(ParseError::Io(_))));
}

#[test]
fn macro_builds_string_graphs() {
    let graph = crate::dot!("foo" -> bar; bar -> "baz";).unwrap();

    assert_eq!(edges(&graph), [("foo", "bar"), ("bar", "baz")]);
}
