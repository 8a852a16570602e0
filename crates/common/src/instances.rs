//! Small graph families used by the tests of the workspace crates.
//!
//! Test support only, compiled for tests and with the `instances` feature. The
//! constructors panic on graphs above the vertex capacity.

use crate::graph::Graph;

pub fn empty_graph(n: usize) -> Graph {
    Graph::new(n).unwrap()
}

pub fn complete_graph(n: usize) -> Graph {
    Graph::from_edges(n, (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v)))).unwrap()
}

pub fn path_graph(n: usize) -> Graph {
    Graph::from_edges(n, (1..n).map(|v| (v - 1, v))).unwrap()
}

pub fn cycle_graph(n: usize) -> Graph {
    assert!(n >= 3);
    Graph::from_edges(n, (0..n).map(|v| (v, (v + 1) % n))).unwrap()
}

/// A star with the given center and all other vertices as leaves.
pub fn star_graph(n: usize, center: usize) -> Graph {
    Graph::from_edges(n, (0..n).filter(|&v| v != center).map(|v| (center, v))).unwrap()
}

/// A `rows` x `cols` grid, vertex `(r, c)` has index `r * cols + c`.
pub fn grid_graph(rows: usize, cols: usize) -> Graph {
    let mut graph = Graph::new(rows * cols).unwrap();
    for r in 0..rows {
        for c in 0..cols {
            let v = r * cols + c;
            if c + 1 < cols {
                graph.add_edge(v, v + 1);
            }
            if r + 1 < rows {
                graph.add_edge(v, v + cols);
            }
        }
    }
    graph
}

pub fn petersen_graph() -> Graph {
    let outer = (0..5).map(|i| (i, (i + 1) % 5));
    let spokes = (0..5).map(|i| (i, i + 5));
    let inner = (0..5).map(|i| (5 + i, 5 + (i + 2) % 5));
    Graph::from_edges(10, outer.chain(spokes).chain(inner)).unwrap()
}

/// All labeled graphs on `n` vertices, one for every subset of the vertex pairs.
pub fn all_graphs(n: usize) -> impl Iterator<Item = Graph> {
    let pairs: Vec<_> = (0..n).flat_map(|u| (u + 1..n).map(move |v| (u, v))).collect();
    assert!(pairs.len() < 32);
    (0u32..1 << pairs.len()).map(move |subset| {
        Graph::from_edges(n, pairs.iter().enumerate().filter(|(i, _)| subset >> i & 1 == 1).map(|(_, &e)| e)).unwrap()
    })
}
