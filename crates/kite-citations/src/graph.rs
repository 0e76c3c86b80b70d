//! The citation graph (C7, §4.6): a directed multigraph over case
//! identifiers, built wholesale from a case/citation set and rebuilt
//! idempotently (§5: "rebuilds are wholesale ... then swap").
//!
//! Represented as an arena (§9 design note): two vectors (`nodes`,
//! `edges`) plus a `node_index: id -> usize` map, so traversals use
//! indices rather than back-pointers and a rebuild is just allocating
//! fresh vectors and swapping them in.

use std::collections::{HashMap, VecDeque};

use kite_core::{Case, Citation};
use uuid::Uuid;

use crate::error::CitationError;

/// A node in the citation graph: one per case that has ever appeared as
/// a citing or cited case.
#[derive(Debug, Clone)]
pub struct CitationNode {
    pub case_id: Uuid,
    pub in_degree: usize,
    pub out_degree: usize,
    pub influence: f64,
}

/// A directed edge: `from` cites `to` via `citation_string`.
#[derive(Debug, Clone)]
pub struct CitationEdge {
    pub from: Uuid,
    pub to: Uuid,
    pub citation_string: String,
    pub weight: f64,
}

const DAMPING: f64 = 0.85;
const PAGERANK_ITERATIONS: usize = 10;

/// The citation graph itself, arena-backed per the design note.
#[derive(Debug, Clone, Default)]
pub struct CitationGraph {
    nodes: Vec<CitationNode>,
    edges: Vec<CitationEdge>,
    node_index: HashMap<Uuid, usize>,
}

impl CitationGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh graph from the given cases and citations (§4.6,
    /// §8: deterministic up to edge insertion order; node maps equal as
    /// sets). Only citations with both a citing and a resolved cited id
    /// contribute edges.
    #[must_use]
    pub fn build(cases: &[Case], citations: &[Citation]) -> Self {
        let mut graph = Self::new();
        for case in cases {
            graph.ensure_node(case.id);
        }
        for citation in citations {
            let Some(cited) = citation.cited_case_id else {
                continue;
            };
            graph.add_edge(citation.citing_case_id, cited, citation.normalized.clone());
        }
        graph.compute_influence();
        graph
    }

    fn ensure_node(&mut self, case_id: Uuid) -> usize {
        if let Some(&idx) = self.node_index.get(&case_id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(CitationNode {
            case_id,
            in_degree: 0,
            out_degree: 0,
            influence: 1.0,
        });
        self.node_index.insert(case_id, idx);
        idx
    }

    fn add_edge(&mut self, from: Uuid, to: Uuid, citation_string: String) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);
        self.edges.push(CitationEdge {
            from,
            to,
            citation_string,
            weight: 1.0,
        });
        self.nodes[from_idx].out_degree += 1;
        self.nodes[to_idx].in_degree += 1;
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn nodes(&self) -> &[CitationNode] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[CitationEdge] {
        &self.edges
    }

    #[must_use]
    pub fn node(&self, case_id: Uuid) -> Option<&CitationNode> {
        self.node_index.get(&case_id).map(|&idx| &self.nodes[idx])
    }

    /// Looks up a node's PageRank-style influence score, failing loudly
    /// when the case never appeared in the graph rather than silently
    /// reporting zero influence.
    pub fn influence_of(&self, case_id: Uuid) -> Result<f64, CitationError> {
        self.node(case_id).map(|n| n.influence).ok_or(CitationError::UnknownCase(case_id))
    }

    /// Runs PageRank for exactly 10 iterations at damping 0.85, starting
    /// every node at score 1.0 (§4.6). `out_degree(u) = 0` contributes
    /// zero, per spec.
    fn compute_influence(&mut self) {
        let n = self.nodes.len();
        if n == 0 {
            return;
        }

        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];
        for edge in &self.edges {
            let from_idx = self.node_index[&edge.from];
            let to_idx = self.node_index[&edge.to];
            incoming[to_idx].push(from_idx);
        }

        let mut scores: Vec<f64> = vec![1.0; n];
        for _ in 0..PAGERANK_ITERATIONS {
            let mut next = vec![1.0 - DAMPING; n];
            for (v, sources) in incoming.iter().enumerate() {
                for &u in sources {
                    let out_degree = self.nodes[u].out_degree;
                    if out_degree == 0 {
                        continue;
                    }
                    next[v] += DAMPING * scores[u] / out_degree as f64;
                }
            }
            scores = next;
        }

        for (idx, node) in self.nodes.iter_mut().enumerate() {
            node.influence = scores[idx];
        }
    }

    /// Top-k cases by in-degree, stable sort (ties keep insertion order).
    #[must_use]
    pub fn most_cited(&self, k: usize) -> Vec<Uuid> {
        let mut ranked: Vec<&CitationNode> = self.nodes.iter().collect();
        ranked.sort_by(|a, b| b.in_degree.cmp(&a.in_degree));
        ranked.into_iter().take(k).map(|n| n.case_id).collect()
    }

    /// Shortest directed path `from -> to` via BFS, inclusive of both
    /// endpoints. `citation_chain(x, x)` returns `[x]` (§8). `None` if
    /// either endpoint is missing from the graph or `to` is unreachable.
    #[must_use]
    pub fn citation_chain(&self, from: Uuid, to: Uuid) -> Option<Vec<Uuid>> {
        let from_idx = *self.node_index.get(&from)?;
        let to_idx = *self.node_index.get(&to)?;

        if from_idx == to_idx {
            return Some(vec![from]);
        }

        let adjacency = self.adjacency();
        let mut visited = vec![false; self.nodes.len()];
        let mut predecessor = vec![usize::MAX; self.nodes.len()];
        let mut queue = VecDeque::new();

        visited[from_idx] = true;
        queue.push_back(from_idx);

        while let Some(current) = queue.pop_front() {
            if current == to_idx {
                break;
            }
            for &next in &adjacency[current] {
                if !visited[next] {
                    visited[next] = true;
                    predecessor[next] = current;
                    queue.push_back(next);
                }
            }
        }

        if !visited[to_idx] {
            return None;
        }

        let mut path = vec![to_idx];
        let mut current = to_idx;
        while current != from_idx {
            current = predecessor[current];
            path.push(current);
        }
        path.reverse();
        Some(path.into_iter().map(|idx| self.nodes[idx].case_id).collect())
    }

    /// Longest simple directed path starting at `case_id`, by DFS with
    /// the current path tracked as a visited set so cycles return depth
    /// 0 at that branch rather than recursing forever (§4.6).
    #[must_use]
    pub fn citation_depth(&self, case_id: Uuid) -> usize {
        let Some(&start) = self.node_index.get(&case_id) else {
            return 0;
        };
        let adjacency = self.adjacency();
        let mut visiting = vec![false; self.nodes.len()];
        Self::dfs_depth(start, &adjacency, &mut visiting)
    }

    fn dfs_depth(node: usize, adjacency: &[Vec<usize>], visiting: &mut [bool]) -> usize {
        visiting[node] = true;
        let mut best = 0;
        for &next in &adjacency[node] {
            if visiting[next] {
                continue;
            }
            let depth = 1 + Self::dfs_depth(next, adjacency, visiting);
            best = best.max(depth);
        }
        visiting[node] = false;
        best
    }

    fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.nodes.len()];
        for edge in &self.edges {
            let from_idx = self.node_index[&edge.from];
            let to_idx = self.node_index[&edge.to];
            adjacency[from_idx].push(to_idx);
        }
        adjacency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kite_core::CitationParts;

    fn case() -> Case {
        Case::new("Alpha v. Beta", "Supreme Court", "UK")
    }

    fn edge_citation(citing: Uuid, cited: Uuid) -> Citation {
        let mut c = Citation::new(
            "raw",
            kite_core::CitationFormat::Other,
            CitationParts {
                court: Some("X".into()),
                ..Default::default()
            },
            citing,
            0.9,
        );
        c.cited_case_id = Some(cited);
        c
    }

    #[test]
    fn degree_sums_match_edge_count() {
        let a = case();
        let b = case();
        let citations = vec![edge_citation(a.id, b.id)];
        let graph = CitationGraph::build(&[a.clone(), b.clone()], &citations);
        let total_in: usize = graph.nodes().iter().map(|n| n.in_degree).sum();
        let total_out: usize = graph.nodes().iter().map(|n| n.out_degree).sum();
        assert_eq!(total_in, graph.edge_count());
        assert_eq!(total_out, graph.edge_count());
    }

    #[test]
    fn three_cycle_converges_to_roughly_equal_influence() {
        let a = case();
        let b = case();
        let c = case();
        let citations = vec![
            edge_citation(a.id, b.id),
            edge_citation(b.id, c.id),
            edge_citation(c.id, a.id),
        ];
        let graph = CitationGraph::build(&[a.clone(), b.clone(), c.clone()], &citations);

        let scores: Vec<f64> = graph.nodes().iter().map(|n| n.influence).collect();
        let max = scores.iter().cloned().fold(f64::MIN, f64::max);
        let min = scores.iter().cloned().fold(f64::MAX, f64::min);
        assert!(max - min < 0.01, "expected near-equal influence, got {scores:?}");

        let most_cited = graph.most_cited(3);
        assert_eq!(most_cited.len(), 3);
        for node in graph.nodes() {
            assert_eq!(node.in_degree, 1);
        }
    }

    #[test]
    fn citation_chain_same_node_returns_singleton() {
        let a = case();
        let graph = CitationGraph::build(&[a.clone()], &[]);
        assert_eq!(graph.citation_chain(a.id, a.id), Some(vec![a.id]));
    }

    #[test]
    fn citation_chain_finds_shortest_path() {
        let a = case();
        let b = case();
        let c = case();
        let citations = vec![edge_citation(a.id, b.id), edge_citation(b.id, c.id)];
        let graph = CitationGraph::build(&[a.clone(), b.clone(), c.clone()], &citations);
        assert_eq!(graph.citation_chain(a.id, c.id), Some(vec![a.id, b.id, c.id]));
    }

    #[test]
    fn citation_chain_unreachable_is_none() {
        let a = case();
        let b = case();
        let graph = CitationGraph::build(&[a.clone(), b.clone()], &[]);
        assert_eq!(graph.citation_chain(a.id, b.id), None);
    }

    #[test]
    fn citation_chain_missing_endpoint_is_none() {
        let a = case();
        let graph = CitationGraph::build(&[a.clone()], &[]);
        assert_eq!(graph.citation_chain(a.id, Uuid::new_v4()), None);
    }

    #[test]
    fn citation_depth_on_cycle_does_not_crash_and_is_finite() {
        let a = case();
        let b = case();
        let citations = vec![edge_citation(a.id, b.id), edge_citation(b.id, a.id)];
        let graph = CitationGraph::build(&[a.clone(), b.clone()], &citations);
        let depth = graph.citation_depth(a.id);
        assert!(depth <= 2);
    }

    #[test]
    fn citation_depth_linear_chain() {
        let a = case();
        let b = case();
        let c = case();
        let citations = vec![edge_citation(a.id, b.id), edge_citation(b.id, c.id)];
        let graph = CitationGraph::build(&[a.clone(), b.clone(), c.clone()], &citations);
        assert_eq!(graph.citation_depth(a.id), 2);
        assert_eq!(graph.citation_depth(c.id), 0);
    }

    #[test]
    fn empty_graph_has_no_nodes_or_edges() {
        let graph = CitationGraph::build(&[], &[]);
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn influence_of_known_case_matches_node() {
        let a = Case::new("Alpha", "Court", "UK");
        let graph = CitationGraph::build(&[a.clone()], &[]);
        assert_eq!(graph.influence_of(a.id).unwrap(), graph.node(a.id).unwrap().influence);
    }

    #[test]
    fn influence_of_unknown_case_is_unknown_case_error() {
        let graph = CitationGraph::build(&[], &[]);
        let missing = Uuid::new_v4();
        assert!(matches!(graph.influence_of(missing), Err(CitationError::UnknownCase(id)) if id == missing));
    }
}
