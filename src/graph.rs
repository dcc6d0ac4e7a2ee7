//! Page graph construction helpers.

use log::debug;
use petgraph::graphmap::UnGraphMap;
use std::collections::HashSet;

/// Identifier of a page in the network.
pub type PageId = u32;

/// The undirected page-to-page network.
///
/// Nodes are keyed by [`PageId`] directly. Duplicate edges collapse on
/// insert, so an edge list that states a link in both directions still
/// produces a single undirected edge.
pub type PageGraph = UnGraphMap<PageId, ()>;

/// Builds the full page graph from raw `(source, target)` pairs.
///
/// Self links are skipped: they carry no neighborhood information and none of
/// the sampling or rendering steps is defined on them.
pub fn from_edge_list<I>(edges: I) -> PageGraph
where
    I: IntoIterator<Item = (PageId, PageId)>,
{
    let mut graph = PageGraph::new();
    let mut self_links = 0usize;
    for (source, target) in edges {
        if source == target {
            self_links += 1;
            continue;
        }
        graph.add_edge(source, target, ());
    }
    debug!(
        "full graph built: {} pages, {} links ({} self links skipped)",
        graph.node_count(),
        graph.edge_count(),
        self_links
    );
    graph
}

/// Number of links incident to `page`.
pub fn degree(graph: &PageGraph, page: PageId) -> usize {
    graph.neighbors(page).count()
}

/// The subgraph over exactly `pages` plus every edge of `graph` with both
/// endpoints among them.
///
/// Nodes are inserted in the order of `pages`, which keeps every later
/// iteration over the subgraph deterministic for a given sample.
pub fn induced_subgraph(graph: &PageGraph, pages: &[PageId]) -> PageGraph {
    let members: HashSet<PageId> = pages.iter().copied().collect();
    let mut sub = PageGraph::new();
    for &page in pages {
        sub.add_node(page);
    }
    for &page in pages {
        for neighbor in graph.neighbors(page) {
            if members.contains(&neighbor) {
                sub.add_edge(page, neighbor, ());
            }
        }
    }
    sub
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_edges_collapse() {
        let graph = from_edge_list([(1, 2), (2, 1), (1, 2)]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(degree(&graph, 1), 1);
    }

    #[test]
    fn self_links_are_skipped() {
        let graph = from_edge_list([(1, 1), (1, 2)]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(degree(&graph, 1), 1);
    }

    #[test]
    fn induced_subgraph_keeps_only_inner_edges() {
        // Triangle 1-2-3 with a pendant 4 on page 1.
        let graph = from_edge_list([(1, 2), (2, 3), (3, 1), (1, 4)]);
        let sub = induced_subgraph(&graph, &[1, 2, 3]);

        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 3);
        assert!(!sub.contains_node(4));
        for (a, b, _) in sub.all_edges() {
            assert!(sub.contains_node(a) && sub.contains_node(b));
        }
    }

    #[test]
    fn induced_subgraph_preserves_requested_order() {
        let graph = from_edge_list([(1, 2), (2, 3), (3, 4)]);
        let sub = induced_subgraph(&graph, &[3, 1, 2]);
        let order: Vec<PageId> = sub.nodes().collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn induced_subgraph_keeps_isolated_members() {
        let graph = from_edge_list([(1, 2), (3, 4)]);
        let sub = induced_subgraph(&graph, &[1, 3]);
        assert_eq!(sub.node_count(), 2);
        assert_eq!(sub.edge_count(), 0);
    }
}
