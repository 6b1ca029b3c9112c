use super::{Graph, NodeIndex};
use crate::dot;

#[test]
fn add_links_both_directions() {
    let mut graph = Graph::new();
    graph.add("a", ["b"]);

    let a = graph.node(&"a").unwrap();
    let b = graph.node(&"b").unwrap();

    assert_eq!(a.uses().collect::<Vec<_>>(), [b]);
    assert_eq!(b.used_by().collect::<Vec<_>>(), [a]);
    assert_eq!(a.used_by().count(), 0);
    assert_eq!(b.uses().count(), 0);
}

#[test]
fn add_is_idempotent() {
    let mut graph = Graph::new();
    graph.add(1, [2, 3]);
    graph.add(1, [3, 2]);
    graph.add_edge(1, 2);

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.n_edges(), 2);
    assert_eq!(graph.node(&1).unwrap().out_degree(), 2);
    assert_eq!(graph.node(&2).unwrap().in_degree(), 1);
}

#[test]
fn nodes_are_created_lazily_in_reference_order() {
    let mut graph = Graph::new();
    graph.add('c', ['a']);
    graph.add('b', []);
    graph.add('a', ['c', 'd']);

    assert_eq!(graph.values().copied().collect::<String>(), "cabd");
    assert_eq!(graph.index_of(&'b'), Some(NodeIndex(2)));
    assert_eq!(graph[NodeIndex(3)], 'd');
    assert!(graph.contains(&'d'));
    assert!(!graph.contains(&'e'));
    assert!(graph.node(&'e').is_none());
}

#[test]
fn self_loops_are_allowed() {
    let mut graph = Graph::new();
    graph.add_edge("me", "me");

    let me = graph.node(&"me").unwrap();

    assert_eq!(graph.len(), 1);
    assert_eq!(me.out_degree(), 1);
    assert_eq!(me.in_degree(), 1);
}

#[test]
fn adjacency_sets_are_inverse() {
    let graph = Graph::random(40, 120, 1);

    for node in graph.iter_nodes() {
        for used in node.uses() {
            assert!(used.used_by().any(|n| n == node));
        }
        for user in node.used_by() {
            assert!(user.uses().any(|n| n == node));
        }
    }
    let in_total: usize = graph.iter_nodes().map(|n| n.in_degree()).sum();
    assert_eq!(in_total, graph.n_edges());
}

#[test]
fn edges_in_insertion_order() {
    let graph = dot!(x -> z; x -> y; y -> z;).unwrap();

    let edges: Vec<_> = graph
        .edges()
        .map(|(s, t)| format!("{s}->{t}"))
        .collect();

    assert_eq!(edges, ["x->z", "x->y", "y->z"]);
}

#[test]
fn collects_from_pairs() {
    let mut graph: Graph<&str> = [("a", "b"), ("b", "c")].into_iter().collect();
    graph.extend([("c", "a"), ("a", "b")]);

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.n_edges(), 3);
}

#[test]
fn random_graph_is_reproducible() {
    let first = Graph::random(20, 50, 42);
    let second = Graph::random(20, 50, 42);

    assert_eq!(first.len(), 20);
    assert!(first.n_edges() <= 50);
    assert!(first.edges().eq(second.edges()));
    assert!(Graph::random(0, 10, 1).is_empty());
}

#[test]
fn debug_lists_uses() {
    let graph = dot!(a -> b; a -> c;).unwrap();

    assert_eq!(
        format!("{graph:?}"),
        r#"{"a": ["b", "c"], "b": [], "c": []}"#
    );
    let a = graph.node(&"a".into()).unwrap();
    assert_eq!(format!("{a:?} {a}"), "Node(\"a\") a");
}
