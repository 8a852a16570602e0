use petgraph::graph::{NodeIndex, UnGraph};
use std::ops::{Deref, DerefMut};
use thiserror::Error;

/// The largest number of vertices a [Graph] can hold. Every adjacency row is a
/// single `u128` bitset.
pub const MAX_VERTICES: usize = 128;

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
#[error("{requested} vertices exceed the supported maximum of {MAX_VERTICES}")]
pub struct CapacityError {
    pub requested: usize,
}

/// Returns the set `{0, …, n - 1}` as a bitset.
#[inline(always)]
pub const fn vertex_mask(n: usize) -> u128 {
    if n >= MAX_VERTICES {
        u128::MAX
    } else {
        (1u128 << n) - 1
    }
}

#[inline(always)]
const fn bit(v: usize) -> u128 {
    1u128 << v
}

/// Iterates over the members of a bitset in ascending order.
pub fn members(mut set: u128) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if set == 0 {
            return None;
        }
        let v = set.trailing_zeros() as usize;
        set &= set - 1;
        Some(v)
    })
}

/// A simple undirected graph on the vertices `0..n` with adjacency bitsets and
/// degree counters.
///
/// The adjacency relation is symmetric and loop-free. Adding an edge that is
/// already present or removing one that is missing is a logic error and
/// panics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Graph {
    adjacency: Vec<u128>,
    degrees: Vec<u32>,
    edge_count: usize,
}

impl Graph {
    pub fn new(n: usize) -> Result<Self, CapacityError> {
        if n > MAX_VERTICES {
            return Err(CapacityError { requested: n });
        }
        Ok(Self { adjacency: vec![0; n], degrees: vec![0; n], edge_count: 0 })
    }

    pub fn from_edges<I>(n: usize, edges: I) -> Result<Self, CapacityError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(n)?;
        for (u, v) in edges {
            graph.add_edge(u, v);
        }
        Ok(graph)
    }

    /// Removes all edges. The number of vertices is unchanged.
    pub fn reset(&mut self) {
        self.adjacency.fill(0);
        self.degrees.fill(0);
        self.edge_count = 0;
    }

    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[inline(always)]
    pub fn vertices(&self) -> u128 {
        vertex_mask(self.node_count())
    }

    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert_ne!(u, v, "self loop at vertex {u}");
        assert!(!self.has_edge(u, v), "edge {u}-{v} already present");
        self.adjacency[u] |= bit(v);
        self.adjacency[v] |= bit(u);
        self.degrees[u] += 1;
        self.degrees[v] += 1;
        self.edge_count += 1;
    }

    pub fn remove_edge(&mut self, u: usize, v: usize) {
        assert!(self.has_edge(u, v), "edge {u}-{v} not present");
        self.adjacency[u] &= !bit(v);
        self.adjacency[v] &= !bit(u);
        self.degrees[u] -= 1;
        self.degrees[v] -= 1;
        self.edge_count -= 1;
    }

    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency[u] & bit(v) != 0
    }

    #[inline(always)]
    pub fn degree(&self, v: usize) -> usize {
        self.degrees[v] as usize
    }

    /// The neighborhood of `v` as a bitset.
    #[inline(always)]
    pub fn neighbor_set(&self, v: usize) -> u128 {
        self.adjacency[v]
    }

    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> {
        members(self.adjacency[v])
    }

    /// Iterates over all edges `(u, v)` with `u < v`, ordered by `u` and then `v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, &row)| members(row & !vertex_mask(u + 1)).map(move |v| (u, v)))
    }

    /// Adds the edge `(u, v)` for the lifetime of the returned guard.
    pub fn add_edge_scoped(&mut self, u: usize, v: usize) -> EdgeGuard<'_> {
        self.add_edge(u, v);
        EdgeGuard { graph: self, u, v }
    }

    /// Connects `hub` to every vertex of `others` for the lifetime of the
    /// returned guard.
    pub fn connect_scoped(&mut self, hub: usize, others: u128) -> StarGuard<'_> {
        for v in members(others) {
            self.add_edge(hub, v);
        }
        StarGuard { graph: self, hub, others }
    }

    pub fn from_petgraph<N, E>(graph: &UnGraph<N, E>) -> Result<Self, CapacityError> {
        let mut result = Self::new(graph.node_count())?;
        for (u, v) in graph.raw_edges().iter().map(|e| (e.source().index(), e.target().index())) {
            if !result.has_edge(u, v) {
                result.add_edge(u, v);
            }
        }
        Ok(result)
    }

    pub fn to_petgraph(&self) -> UnGraph<(), ()> {
        let mut graph = UnGraph::with_capacity(self.node_count(), self.edge_count());
        for _ in 0..self.node_count() {
            graph.add_node(());
        }
        for (u, v) in self.edges() {
            graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
        }
        graph
    }
}

/// Removes its edge again when dropped.
#[derive(Debug)]
pub struct EdgeGuard<'a> {
    graph: &'a mut Graph,
    u: usize,
    v: usize,
}

impl Deref for EdgeGuard<'_> {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        self.graph
    }
}

impl DerefMut for EdgeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Graph {
        self.graph
    }
}

impl Drop for EdgeGuard<'_> {
    fn drop(&mut self) {
        self.graph.remove_edge(self.u, self.v);
    }
}

/// Removes the edges between its hub and the attached vertices when dropped.
#[derive(Debug)]
pub struct StarGuard<'a> {
    graph: &'a mut Graph,
    hub: usize,
    others: u128,
}

impl Deref for StarGuard<'_> {
    type Target = Graph;

    fn deref(&self) -> &Graph {
        self.graph
    }
}

impl DerefMut for StarGuard<'_> {
    fn deref_mut(&mut self) -> &mut Graph {
        self.graph
    }
}

impl Drop for StarGuard<'_> {
    fn drop(&mut self) {
        for v in members(self.others) {
            self.graph.remove_edge(self.hub, v);
        }
    }
}
