//! Connection highlighting
//!
//! Selecting a component highlights everything downstream of it: the
//! components reachable by following connections forward, and the
//! connections leaving them.

use std::collections::{BTreeSet, HashSet};

use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Bfs;

use crate::model::{Component, Connection};

/// Connections whose endpoints both exist and are visible
pub fn active_connections<'a>(
    connections: &'a [Connection],
    components: &[Component],
) -> Vec<&'a Connection> {
    let visible: HashSet<&str> = components
        .iter()
        .filter(|c| c.visible)
        .map(|c| c.id.as_str())
        .collect();

    connections
        .iter()
        .filter(|conn| {
            visible.contains(conn.source.as_str()) && visible.contains(conn.target.as_str())
        })
        .collect()
}

/// Ids reachable from `start` along `source -> target` edges, including `start`
pub fn reachable_from<'a, I>(start: &str, connections: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Connection>,
{
    let mut graph = DiGraphMap::<&str, ()>::new();
    graph.add_node(start);
    for conn in connections {
        graph.add_edge(conn.source.as_str(), conn.target.as_str(), ());
    }

    let mut reached = BTreeSet::new();
    let mut bfs = Bfs::new(&graph, start);
    while let Some(node) = bfs.next(&graph) {
        reached.insert(node.to_string());
    }
    reached
}
