use common::MAX_VERTICES;
use std::ops::{Range, RangeInclusive};
use thiserror::Error;

/// Smallest supported maximum degree.
pub const MIN_DEGREE: usize = 3;

/// Smallest neighborhood size: the root, one vertex at depth 1 and one at
/// depth 2.
pub const MIN_SIZE: usize = 3;

/// Invalid enumeration parameters.
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum ConfigError {
    /// The maximum degree is below [MIN_DEGREE].
    #[error("degree must be at least {MIN_DEGREE} (got {0})")]
    DegreeTooSmall(usize),
    /// The largest neighborhood does not fit into a graph.
    #[error("degree {degree} is too large, neighborhoods of size {size} exceed the vertex capacity of {MAX_VERTICES}")]
    DegreeTooLarge {
        /// The requested maximum degree.
        degree: usize,
        /// The largest neighborhood size for this degree.
        size: usize,
    },
    /// The size is not within `[MIN_SIZE, max_size]`.
    #[error("size must be within [{MIN_SIZE},{max}] (got {size})")]
    SizeOutOfRange {
        /// The requested size.
        size: usize,
        /// The largest neighborhood size for the configured degree.
        max: usize,
    },
}

/// Validated parameters of the neighborhood enumeration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct NeighborhoodConfig {
    max_degree: usize,
}

impl NeighborhoodConfig {
    /// Creates a configuration for neighborhoods with maximum degree `max_degree`.
    pub fn new(max_degree: usize) -> Result<Self, ConfigError> {
        if max_degree < MIN_DEGREE {
            return Err(ConfigError::DegreeTooSmall(max_degree));
        }
        let config = Self { max_degree };
        // the outer vertex needs one more slot
        if config.max_size() + 1 > MAX_VERTICES {
            return Err(ConfigError::DegreeTooLarge { degree: max_degree, size: config.max_size() });
        }
        Ok(config)
    }

    /// The maximum degree.
    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// The largest possible neighborhood, `d² + 1` vertices.
    pub fn max_size(&self) -> usize {
        self.max_degree * self.max_degree + 1
    }

    /// All neighborhood sizes, `MIN_SIZE..=max_size`.
    pub fn sizes(&self) -> RangeInclusive<usize> {
        MIN_SIZE..=self.max_size()
    }

    /// Checks that neighborhoods with `size` vertices can be enumerated.
    pub fn check_size(&self, size: usize) -> Result<(), ConfigError> {
        if self.sizes().contains(&size) {
            Ok(())
        } else {
            Err(ConfigError::SizeOutOfRange { size, max: self.max_size() })
        }
    }

    /// All shapes with `size` vertices, ordered by `p` and then `q`.
    pub fn shapes(&self, size: usize) -> impl Iterator<Item = Shape> {
        let d = self.max_degree;
        (1..=d).flat_map(move |p| (1..=p * (d - 1)).map(move |q| Shape { p, q })).filter(move |s| s.size() == size)
    }
}

/// The number of vertices at depth 1 (`p`) and depth 2 (`q`) of a neighborhood.
///
/// The vertices are laid out as root `0`, depth 1 `1..=p`, depth 2
/// `p + 1..=p + q`, and the outer vertex `p + q + 1`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Shape {
    /// Number of vertices at depth 1.
    pub p: usize,
    /// Number of vertices at depth 2.
    pub q: usize,
}

impl Shape {
    /// The number of vertices without the outer vertex.
    pub fn size(&self) -> usize {
        1 + self.p + self.q
    }

    /// The number of vertices including the outer vertex.
    pub fn node_count(&self) -> usize {
        self.size() + 1
    }

    /// The vertices at depth 1.
    pub fn depth1(&self) -> Range<usize> {
        1..1 + self.p
    }

    /// The vertices at depth 2.
    pub fn depth2(&self) -> Range<usize> {
        1 + self.p..1 + self.p + self.q
    }

    /// The outer vertex, standing for everything beyond depth 2.
    pub fn outer(&self) -> usize {
        1 + self.p + self.q
    }
}
