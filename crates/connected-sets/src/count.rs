use crate::enumerate::connected_supersets;
use crate::partition::{Partition, VertexState};
use common::Graph;
use tracing::{info, instrument};

/// Counts the connected sets that contain `anchor`.
#[instrument(skip_all)]
pub fn count_anchored(graph: &Graph, anchor: usize) -> u64 {
    let mut partition = Partition::new(graph.node_count());
    partition.set(anchor, VertexState::Included);

    let mut count = 0;
    connected_supersets(graph, &mut partition, |_| count += 1);
    info!(n = graph.node_count(), anchor, count);
    count
}

/// The seed and tracking vertices of a two-seed stratified count.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Terminals {
    /// Vertices whose presence is fixed by the caller.
    pub seeds: [usize; 2],
    /// Vertices whose presence in the produced sets is counted.
    pub tracking: [usize; 2],
}

impl Terminals {
    /// The vertices used by type II gadgets: seeds `0`, `1` and tracking
    /// vertices `2`, `3`.
    pub const GADGET: Terminals = Terminals { seeds: [0, 1], tracking: [2, 3] };

    fn validate(&self, n: usize) {
        let all = [self.seeds[0], self.seeds[1], self.tracking[0], self.tracking[1]];
        for (i, &v) in all.iter().enumerate() {
            assert!(v < n, "terminal {v} out of range");
            assert!(!all[..i].contains(&v), "terminal {v} used twice");
        }
    }
}

impl Default for Terminals {
    fn default() -> Self {
        Self::GADGET
    }
}

/// Connected sets of a stratified count, split by which tracking vertices they
/// contain.
///
/// Sets containing neither tracking vertex are not counted. They do not
/// contribute to the transfer matrix of chained gadgets.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct StratifiedCounts {
    /// Sets containing both tracking vertices.
    pub both: u64,
    /// Sets containing only the first tracking vertex.
    pub first_only: u64,
    /// Sets containing only the second tracking vertex.
    pub second_only: u64,
}

impl StratifiedCounts {
    /// Returns `[both, first_only, second_only]`.
    pub fn to_array(&self) -> [u64; 3] {
        [self.both, self.first_only, self.second_only]
    }
}

/// The seed combinations evaluated for a transfer matrix, in row order: both
/// seeds, only the first seed, only the second seed.
pub const SEED_COMBINATIONS: [[bool; 2]; 3] = [[true, true], [true, false], [false, true]];

/// Counts connected sets where each seed is included or excluded according to
/// `present`, stratified by the tracking vertices.
///
/// A set counts as connected here if every vertex is connected to one of the
/// present seeds.
///
/// Panics if both seeds are absent, or if the terminals are not distinct
/// vertices of `graph`.
#[instrument(skip_all)]
pub fn count_stratified(graph: &Graph, terminals: Terminals, present: [bool; 2]) -> StratifiedCounts {
    assert!(present[0] || present[1], "at least one seed must be present");
    terminals.validate(graph.node_count());

    let mut partition = Partition::new(graph.node_count());
    for (&seed, &present) in terminals.seeds.iter().zip(&present) {
        partition.set(seed, if present { VertexState::Included } else { VertexState::Excluded });
    }

    let [first, second] = terminals.tracking;
    let mut counts = StratifiedCounts::default();
    connected_supersets(graph, &mut partition, |p| match (p.is_included(first), p.is_included(second)) {
        (true, true) => counts.both += 1,
        (true, false) => counts.first_only += 1,
        (false, true) => counts.second_only += 1,
        (false, false) => {}
    });
    info!(?present, both = counts.both, first_only = counts.first_only, second_only = counts.second_only);
    counts
}

/// Evaluates [count_stratified] for every entry of [SEED_COMBINATIONS]. Row `i`
/// holds the counts of combination `i` as `[both, first_only, second_only]`.
pub fn transfer_matrix(graph: &Graph, terminals: Terminals) -> [[u64; 3]; 3] {
    SEED_COMBINATIONS.map(|present| count_stratified(graph, terminals, present).to_array())
}

/// The connected sets containing the boundary vertex compared against all
/// subsets of the remaining vertices.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundaryRatio {
    /// Number of connected sets containing the boundary vertex.
    pub count: u64,
    /// `count / 2^(n - 1)`.
    pub ratio: f64,
}

/// Counts the connected sets containing the boundary vertex, the vertex with
/// the highest index.
///
/// Panics if the graph has no vertices.
pub fn count_boundary_connected(graph: &Graph) -> u64 {
    let n = graph.node_count();
    assert!(n > 0, "the null graph has no boundary vertex");
    count_anchored(graph, n - 1)
}

/// Computes the [BoundaryRatio] of `graph`.
pub fn boundary_ratio(graph: &Graph) -> BoundaryRatio {
    let count = count_boundary_connected(graph);
    let subsets = 2f64.powi(graph.node_count() as i32 - 1);
    BoundaryRatio { count, ratio: count as f64 / subsets }
}
