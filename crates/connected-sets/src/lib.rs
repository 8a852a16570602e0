//! Exact enumeration and counting of connected vertex subsets of small graphs.
//!
//! Every set is produced exactly once by growing an initial seed along its
//! fringe, the undetermined vertices adjacent to the current set, in ascending
//! index order. The running time is exponential in the number of undetermined
//! vertices; the search is meant for gadgets and neighborhoods with a few dozen
//! vertices.
//!
//! # Examples
//!
//! The connected sets of a path that contain one of its ends.
//! ```rust
//! use common::Graph;
//! use connected_sets::{connected_supersets, count_anchored, Partition, VertexState};
//!
//! // a path graph with 4 nodes
//! let graph = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
//! assert_eq!(count_anchored(&graph, 0), 4);
//!
//! let mut partition = Partition::new(4);
//! partition.set(0, VertexState::Included);
//! let mut sets = vec![];
//! connected_supersets(&graph, &mut partition, |p| sets.push(p.included_vertices().collect::<Vec<_>>()));
//! assert_eq!(sets, [vec![0], vec![0, 1], vec![0, 1, 2], vec![0, 1, 2, 3]]);
//! ```
//!
//! The boundary ratio of a neighborhood, with the boundary as last vertex.
//! ```rust
//! use common::Graph;
//! use connected_sets::boundary_ratio;
//!
//! let graph = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
//! let ratio = boundary_ratio(&graph);
//! assert_eq!(ratio.count, 4);
//! assert_eq!(ratio.ratio, 0.5);
//! ```

#![forbid(unsafe_code)]
#![doc(test(attr(deny(warnings, rust_2018_idioms), allow(dead_code))))]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod count;
mod enumerate;
mod partition;

pub use count::boundary_ratio;
pub use count::count_anchored;
pub use count::count_boundary_connected;
pub use count::count_stratified;
pub use count::transfer_matrix;
pub use count::BoundaryRatio;
pub use count::StratifiedCounts;
pub use count::Terminals;
pub use count::SEED_COMBINATIONS;
pub use enumerate::connected_supersets;
pub use partition::Partition;
pub use partition::VertexState;
