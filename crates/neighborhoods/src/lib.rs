//! Enumeration of the degree-bounded two-level neighborhoods of a vertex.
//!
//! A neighborhood consists of a root `0`, `p` vertices at depth 1 adjacent to
//! the root, `q` vertices at depth 2 adjacent only to depth-1 vertices, and an
//! outer vertex that absorbs the remaining degree of the depth-2 vertices. All
//! vertices except the outer one have degree at most `d`.
//!
//! Relabelings are partially broken by keeping the depth-1 degrees and the
//! depth-1 neighbor masks of the depth-2 vertices non-increasing. This prunes
//! most isomorphic copies, but not all of them.
//!
//! # Examples
//!
//! ```rust
//! use neighborhoods::{enumerate_neighborhoods, NeighborhoodConfig};
//! use std::convert::Infallible;
//!
//! let config = NeighborhoodConfig::new(3).unwrap();
//! let mut edges = vec![];
//! let count = enumerate_neighborhoods(&config, 3, |graph| {
//!     edges.push(graph.edges().collect::<Vec<_>>());
//!     Ok::<_, Infallible>(())
//! })
//! .unwrap();
//!
//! // root 0, depth 1 vertex 1, depth 2 vertex 2 and the outer vertex 3
//! assert_eq!(count, 1);
//! assert_eq!(edges, [vec![(0, 1), (1, 2), (2, 3)]]);
//! ```

#![forbid(unsafe_code)]
#![doc(test(attr(deny(warnings, rust_2018_idioms), allow(dead_code))))]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod config;
mod search;

pub use config::ConfigError;
pub use config::NeighborhoodConfig;
pub use config::Shape;
pub use config::MIN_DEGREE;
pub use config::MIN_SIZE;
pub use search::enumerate_neighborhoods;
